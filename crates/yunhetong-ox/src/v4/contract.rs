use bon::Builder;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::types::{IdType, SealClass, SignForm, SignMode, SignPositionType, SignValidateType};
use crate::{
    request::ApiRequest,
    response::{BaseResponse, V4Response},
};

/// Creates a contract by filling in a template
#[derive(Debug, Clone, Serialize, Builder)]
#[serde(rename_all = "camelCase")]
pub struct CreateTemplateContract {
    #[builder(into)]
    pub contract_title: String,
    /// Caller-defined contract number
    #[builder(into)]
    pub contract_no: String,
    #[builder(into)]
    pub template_id: String,
    /// Template placeholder values, usually a JSON object
    #[builder(default)]
    pub contract_data: Value,
}

impl ApiRequest for CreateTemplateContract {
    const PATH: &'static str = "/contract/templateContract";
    type Response = V4Response<ContractId>;
}

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContractId {
    pub contract_id: i64,
}

/// Signing slot of one signer in a contract
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Builder)]
#[serde(rename_all = "camelCase")]
pub struct Signer {
    #[builder(into)]
    pub signer_id: String,
    #[builder(default)]
    pub sign_position_type: SignPositionType,
    /// Keyword, placeholder name or coordinates, depending on `sign_position_type`
    #[builder(into)]
    pub position_content: String,
    #[builder(default)]
    pub sign_validate_type: SignValidateType,
    #[builder(default)]
    pub sign_mode: SignMode,
    #[builder(default)]
    pub sign_form: SignForm,
}

#[derive(Debug, Clone, Serialize, Builder)]
#[serde(rename_all = "camelCase")]
pub struct AddSigner {
    #[builder(default)]
    pub id_type: IdType,
    /// Contract id or number, as selected by `id_type`
    #[builder(into)]
    pub id_content: String,
    pub signers: Vec<Signer>,
}

impl ApiRequest for AddSigner {
    const PATH: &'static str = "/contract/signer";
    type Response = BaseResponse;
}

/// Signs a contract on behalf of a signer with one of its moulages
#[derive(Debug, Clone, Serialize, Builder)]
#[serde(rename_all = "camelCase")]
pub struct SignContract {
    #[builder(default)]
    pub id_type: IdType,
    #[builder(into)]
    pub id_content: String,
    #[builder(into)]
    pub signer_id: String,
    #[builder(into)]
    pub moulage_id: String,
    /// Normal style when absent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seal_class: Option<SealClass>,
}

impl ApiRequest for SignContract {
    const PATH: &'static str = "/contract/sign";
    type Response = BaseResponse;
}
