//! Contract lifecycle of the legacy form API.
//!
//! Nested arguments (template placeholders, partner and signer lists) travel
//! as JSON strings inside a single form field.

use bon::Builder;
use bytes::Bytes;
use serde::{Deserialize, Serialize};

use crate::{
    YunHeTong,
    error::{YunHeTongRequestError, require},
    internal::{Endpoint, HttpMethod, TOKEN_KEY, append_query},
    request::ApiRequest,
    response::LegacyResponse,
};

/// Contract metadata shared by template and file based creation
#[derive(Debug, Clone, Builder)]
pub struct NewContract {
    #[builder(into)]
    pub title: String,
    /// Caller-defined contract number
    #[builder(into)]
    pub contract_no: String,
    /// Apply a CA certificate when signing
    #[builder(default)]
    pub use_cer: bool,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTemplateContract {
    pub title: String,
    pub def_contract_no: String,
    pub template_id: String,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub use_cer: bool,
    /// Placeholder values as a JSON object string
    pub param: String,
}

impl ApiRequest for CreateTemplateContract {
    const PATH: &'static str = "/contract/templateContract";
    type Response = LegacyResponse<TemplateContractId>;
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateContractId {
    pub contract_id: i64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateFileContract {
    pub title: String,
    pub def_contract_no: String,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub use_cer: bool,
}

impl ApiRequest for CreateFileContract {
    const PATH: &'static str = "/contract/fileContract";
    type Response = LegacyResponse<FileContractId>;
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileContractId {
    pub contract_id: String,
}

/// A party taking part in a contract
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Builder)]
#[serde(rename_all = "camelCase")]
pub struct Partner {
    #[builder(into)]
    pub app_user_id: String,
    /// Name of the signature placeholder in the template; this or `keyword` is required
    #[builder(into)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location_name: Option<String>,
    #[builder(into)]
    #[serde(rename = "keyWord", skip_serializing_if = "Option::is_none")]
    pub keyword: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AddPartner {
    pub contract_id: String,
    /// Partners as a JSON array string
    pub partners: String,
}

impl ApiRequest for AddPartner {
    const PATH: &'static str = "/contract/addPartner";
    type Response = LegacyResponse;
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SignContract {
    pub contract_id: String,
    /// Signer ids as a JSON array string
    pub signer: String,
}

impl ApiRequest for SignContract {
    const PATH: &'static str = "/contract/signContract";
    type Response = LegacyResponse;
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InvalidateContract {
    pub contract_id: String,
}

impl ApiRequest for InvalidateContract {
    const PATH: &'static str = "/contract/invalid";
    type Response = LegacyResponse;
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListContracts {
    pub page_num: u32,
    pub page_size: u32,
}

impl ApiRequest for ListContracts {
    const PATH: &'static str = "/contract/list";
    type Response = LegacyResponse<ContractList>;
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContractList {
    #[serde(default)]
    pub contract_list: Vec<ContractSummary>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ContractSummary {
    pub id: String,
    pub title: String,
    pub status: String,
    pub app_name: String,
    pub gmt_modify: String,
    pub partner_list: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LookupContractDetail {
    pub contract_id: String,
}

impl ApiRequest for LookupContractDetail {
    const PATH: &'static str = "/contract/detail";
    type Response = LegacyResponse<ContractDetail>;
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ContractDetail {
    pub partner_list: Vec<PartnerStatus>,
    pub title: String,
    pub status: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PartnerStatus {
    pub sign_status: String,
    pub user_id: String,
}

/// Download of a finished contract; everything travels in the query string.
#[derive(Clone)]
pub struct DownloadContract {
    pub contract_id: String,
    pub token: String,
}

impl DownloadContract {
    pub const PATH: &'static str = "/contract/download";

    pub fn new(contract_id: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            contract_id: contract_id.into(),
            token: token.into(),
        }
    }

    pub fn endpoint(&self) -> Endpoint {
        let path = append_query(
            Self::PATH,
            &[
                (TOKEN_KEY, self.token.as_str()),
                ("contractId", self.contract_id.as_str()),
            ],
        );
        Endpoint::new(path, HttpMethod::Get)
    }
}

impl std::fmt::Debug for DownloadContract {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DownloadContract")
            .field("contract_id", &self.contract_id)
            .field("token", &"[REDACTED]")
            .finish()
    }
}

impl YunHeTong {
    /// Creates a contract from a platform template.
    ///
    /// `placeholders` maps template placeholder names to their values.
    pub async fn create_template_contract<P: Serialize + ?Sized>(
        &self,
        contract: &NewContract,
        template_id: &str,
        placeholders: &P,
        token: &str,
    ) -> Result<LegacyResponse<TemplateContractId>, YunHeTongRequestError> {
        require("title", &contract.title)?;
        require("template_id", template_id)?;
        require("token", token)?;

        let param = serde_json::to_string(placeholders).map_err(YunHeTongRequestError::Encoding)?;
        let request = CreateTemplateContract {
            title: contract.title.clone(),
            def_contract_no: contract.contract_no.clone(),
            template_id: template_id.to_string(),
            use_cer: contract.use_cer,
            param,
        };
        self.call_form(&request, [(TOKEN_KEY, token)]).await
    }

    /// Creates a contract by uploading the document itself.
    pub async fn create_file_contract(
        &self,
        contract: &NewContract,
        token: &str,
        file: impl Into<Vec<u8>>,
    ) -> Result<LegacyResponse<FileContractId>, YunHeTongRequestError> {
        require("title", &contract.title)?;
        require("token", token)?;
        let file = file.into();
        if file.is_empty() {
            return Err(YunHeTongRequestError::invalid_argument("file"));
        }

        let request = CreateFileContract {
            title: contract.title.clone(),
            def_contract_no: contract.contract_no.clone(),
            use_cer: contract.use_cer,
        };
        self.call_multipart(&request, [(TOKEN_KEY, token)], file)
            .await
    }

    /// Adds signing parties to a contract.
    pub async fn add_partner(
        &self,
        contract_id: i64,
        token: &str,
        partners: &[Partner],
    ) -> Result<LegacyResponse, YunHeTongRequestError> {
        require("token", token)?;
        if partners.is_empty() {
            return Err(YunHeTongRequestError::invalid_argument("partners"));
        }

        let request = AddPartner {
            contract_id: contract_id.to_string(),
            partners: serde_json::to_string(partners).map_err(YunHeTongRequestError::Encoding)?,
        };
        self.call_form(&request, [(TOKEN_KEY, token)]).await
    }

    /// Signs a contract automatically for the given signers.
    pub async fn sign_contract<S: AsRef<str>>(
        &self,
        contract_id: &str,
        token: &str,
        signers: &[S],
    ) -> Result<LegacyResponse, YunHeTongRequestError> {
        require("contract_id", contract_id)?;
        require("token", token)?;
        if signers.is_empty() {
            return Err(YunHeTongRequestError::invalid_argument("signers"));
        }

        let signers: Vec<&str> = signers.iter().map(AsRef::as_ref).collect();
        let request = SignContract {
            contract_id: contract_id.to_string(),
            signer: serde_json::to_string(&signers).map_err(YunHeTongRequestError::Encoding)?,
        };
        self.call_form(&request, [(TOKEN_KEY, token)]).await
    }

    /// Voids a contract.
    pub async fn invalidate_contract(
        &self,
        contract_id: &str,
        token: &str,
    ) -> Result<LegacyResponse, YunHeTongRequestError> {
        require("contract_id", contract_id)?;
        require("token", token)?;

        let request = InvalidateContract {
            contract_id: contract_id.to_string(),
        };
        self.call_form(&request, [(TOKEN_KEY, token)]).await
    }

    /// Lists finished or voided contracts, one page at a time.
    pub async fn list_contracts(
        &self,
        page_num: u32,
        page_size: u32,
        token: &str,
    ) -> Result<LegacyResponse<ContractList>, YunHeTongRequestError> {
        require("token", token)?;
        if page_size == 0 {
            return Err(YunHeTongRequestError::InvalidArgument(
                "`page_size` must be positive".to_string(),
            ));
        }

        let request = ListContracts {
            page_num,
            page_size,
        };
        self.call_form(&request, [(TOKEN_KEY, token)]).await
    }

    /// Fetches title, status and per-partner signing state of a contract.
    pub async fn lookup_contract_detail(
        &self,
        contract_id: &str,
        token: &str,
    ) -> Result<LegacyResponse<ContractDetail>, YunHeTongRequestError> {
        require("contract_id", contract_id)?;
        require("token", token)?;

        let request = LookupContractDetail {
            contract_id: contract_id.to_string(),
        };
        self.call_form(&request, [(TOKEN_KEY, token)]).await
    }

    /// Downloads the contract document and returns its raw bytes.
    pub async fn download_contract(
        &self,
        contract_id: &str,
        token: &str,
    ) -> Result<Bytes, YunHeTongRequestError> {
        require("contract_id", contract_id)?;
        require("token", token)?;

        let request = DownloadContract::new(contract_id, token);
        self.throttle().await;
        self.helper.request_bytes(&request.endpoint()).await
    }
}
