//! Operations of the V4 JSON API.
//!
//! Requests carry the platform token in the `token` header, so a refresh must
//! have succeeded (see [`YunHeTong::start_token_refresh`] and
//! [`YunHeTong::refresh_platform_token`]) before these calls can pass.

pub mod contract;
pub mod types;
pub mod user;

use std::collections::HashMap;

use crate::{
    YunHeTong,
    error::{YunHeTongRequestError, require},
    response::{BaseResponse, V4Response},
    token::LoginResponse,
};

use self::{
    contract::{AddSigner, ContractId, CreateTemplateContract, SignContract},
    user::{
        CreateCompany, CreateCompanyMoulage, CreatePerson, CreatePersonMoulage, MoulageId,
        QuerySignerId, SignerId,
    },
};

impl YunHeTong {
    /// Logs a signer in and returns the user token from the response header.
    pub async fn user_token_v4(
        &self,
        signer_id: &str,
    ) -> Result<LoginResponse, YunHeTongRequestError> {
        require("signer_id", signer_id)?;
        self.login(Some(signer_id)).await
    }

    pub async fn create_person(
        &self,
        request: &CreatePerson,
    ) -> Result<V4Response<SignerId>, YunHeTongRequestError> {
        require("user_name", &request.user_name)?;
        require("cert_num", &request.cert_num)?;
        require("phone", &request.phone)?;
        self.call_json(request).await
    }

    pub async fn create_company(
        &self,
        request: &CreateCompany,
    ) -> Result<V4Response<SignerId>, YunHeTongRequestError> {
        require("user_name", &request.user_name)?;
        require("cert_num", &request.cert_num)?;
        require("phone", &request.phone)?;
        self.call_json(request).await
    }

    /// Maps certificate numbers to signer ids; unknown numbers are left out.
    pub async fn query_signer_id(
        &self,
        request: &QuerySignerId,
    ) -> Result<V4Response<Vec<HashMap<String, i64>>>, YunHeTongRequestError> {
        if request.cert_nums.is_empty() {
            return Err(YunHeTongRequestError::invalid_argument("cert_nums"));
        }
        self.call_json(request).await
    }

    pub async fn create_person_moulage(
        &self,
        request: &CreatePersonMoulage,
    ) -> Result<V4Response<MoulageId>, YunHeTongRequestError> {
        require("signer_id", &request.signer_id)?;
        self.call_json(request).await
    }

    pub async fn create_company_moulage(
        &self,
        request: &CreateCompanyMoulage,
    ) -> Result<V4Response<MoulageId>, YunHeTongRequestError> {
        require("signer_id", &request.signer_id)?;
        require("text_content", &request.text_content)?;
        self.call_json(request).await
    }

    pub async fn create_contract_from_template(
        &self,
        request: &CreateTemplateContract,
    ) -> Result<V4Response<ContractId>, YunHeTongRequestError> {
        require("contract_title", &request.contract_title)?;
        require("template_id", &request.template_id)?;
        self.call_json(request).await
    }

    pub async fn add_signer(
        &self,
        request: &AddSigner,
    ) -> Result<BaseResponse, YunHeTongRequestError> {
        require("id_content", &request.id_content)?;
        if request.signers.is_empty() {
            return Err(YunHeTongRequestError::invalid_argument("signers"));
        }
        self.call_json(request).await
    }

    pub async fn sign_contract_v4(
        &self,
        request: &SignContract,
    ) -> Result<BaseResponse, YunHeTongRequestError> {
        require("id_content", &request.id_content)?;
        require("signer_id", &request.signer_id)?;
        require("moulage_id", &request.moulage_id)?;
        self.call_json(request).await
    }
}
