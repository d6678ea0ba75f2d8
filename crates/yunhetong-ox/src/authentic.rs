//! Real-name verification.
//!
//! Every path here contains `authentic`, so all of these calls are routed to
//! the verification gateway rather than the API gateway.

use serde::{Deserialize, Serialize};

use crate::{
    YunHeTong,
    error::{YunHeTongRequestError, check_verification, require},
    request::ApiRequest,
    response::{Envelope, V4Response, decode},
    types::AuthRequestType,
};

/// Identity check against the legacy verification service
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Authentication {
    pub id_no: String,
    pub id_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bank_card_no: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mobile: Option<String>,
}

impl ApiRequest for Authentication {
    const PATH: &'static str = "/authentic/authentication";
    type Response = AuthResponse;
}

/// Reply of the legacy verification service.
///
/// `data` is a JSON document encoded as a string; [`AuthResponse::decode_payload`]
/// parses it into `message` and `status`.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthResponse {
    pub code: i64,
    #[serde(default)]
    pub msg: String,
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub data: String,
    #[serde(skip)]
    pub message: String,
    #[serde(skip)]
    pub status: String,
}

#[derive(Debug, Deserialize)]
struct VerificationOutcome {
    #[serde(default)]
    message: String,
    #[serde(default)]
    status: String,
}

impl AuthResponse {
    /// Second decode pass over the string-encoded `data` field.
    pub fn decode_payload(mut self) -> Result<Self, YunHeTongRequestError> {
        let outcome: VerificationOutcome = decode(self.data.as_bytes())?;
        self.message = outcome.message;
        self.status = outcome.status;
        Ok(self)
    }
}

impl AuthResponse {
    /// Passes the reply through when the check succeeded, turns it into an error otherwise.
    pub fn check(self) -> Result<Self, YunHeTongRequestError> {
        check_verification(self.code, &self.msg, self.success)?;
        Ok(self)
    }
}

impl Envelope for AuthResponse {
    fn parse(body: &[u8]) -> Result<Self, YunHeTongRequestError> {
        decode::<Self>(body)?.check()
    }
}

/// Carrier three-factor check: ID number, name and mobile number
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MobileRealName {
    pub id_no: String,
    pub id_name: String,
    pub mobile: String,
}

impl ApiRequest for MobileRealName {
    const PATH: &'static str = "/authentic/personal/mobile/realName";
    type Response = V4Response<AuthSerialNumber>;
}

/// Bank four-factor check: ID number, name, mobile number and bank card
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BankFourRealName {
    pub id_no: String,
    pub id_name: String,
    pub mobile: String,
    pub bank_card_no: String,
}

impl ApiRequest for BankFourRealName {
    const PATH: &'static str = "/authentic/personal/bankFour";
    type Response = V4Response<AuthSerialNumber>;
}

/// Serial number of a verification, for reconciliation with the platform
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AuthSerialNumber {
    #[serde(default)]
    pub id: String,
}

impl YunHeTong {
    /// Verifies that an ID number belongs to `id_name`, optionally against the portrait on file.
    pub async fn auth_real_name(
        &self,
        id_no: &str,
        id_name: &str,
        portrait: bool,
    ) -> Result<AuthResponse, YunHeTongRequestError> {
        require("id_no", id_no)?;
        require("id_name", id_name)?;

        let request_type = if portrait {
            AuthRequestType::Portrait
        } else {
            AuthRequestType::IdentityTwoFactor
        };
        let request = Authentication {
            id_no: id_no.to_string(),
            id_name: id_name.to_string(),
            bank_card_no: None,
            mobile: None,
        };

        self.call_form(&request, self.verification_credentials(request_type))
            .await?
            .decode_payload()
    }

    /// Verifies identity against a bank card, and its reserved mobile number when given.
    pub async fn auth_real_name_bank(
        &self,
        id_no: &str,
        id_name: &str,
        bank_card: &str,
        mobile: Option<&str>,
    ) -> Result<AuthResponse, YunHeTongRequestError> {
        require("id_no", id_no)?;
        require("id_name", id_name)?;
        require("bank_card", bank_card)?;

        let mobile = mobile.filter(|m| !m.is_empty());
        let request_type = if mobile.is_some() {
            AuthRequestType::BankFourFactor
        } else {
            AuthRequestType::BankThreeFactor
        };
        let request = Authentication {
            id_no: id_no.to_string(),
            id_name: id_name.to_string(),
            bank_card_no: Some(bank_card.to_string()),
            mobile: mobile.map(str::to_string),
        };

        self.call_form(&request, self.verification_credentials(request_type))
            .await?
            .decode_payload()
    }

    /// Carrier three-factor verification of the V4 generation.
    pub async fn auth_real_name_mobile_v4(
        &self,
        id_no: &str,
        id_name: &str,
        phone: &str,
    ) -> Result<V4Response<AuthSerialNumber>, YunHeTongRequestError> {
        require("id_no", id_no)?;
        require("id_name", id_name)?;
        require("phone", phone)?;

        let request = MobileRealName {
            id_no: id_no.to_string(),
            id_name: id_name.to_string(),
            mobile: phone.to_string(),
        };
        self.call_form(&request, self.app_key_credentials()).await
    }

    /// Bank four-factor verification of the V4 generation.
    pub async fn auth_real_name_bank_v4(
        &self,
        id_no: &str,
        id_name: &str,
        phone: &str,
        bank_card_no: &str,
    ) -> Result<V4Response<AuthSerialNumber>, YunHeTongRequestError> {
        require("id_no", id_no)?;
        require("id_name", id_name)?;
        require("phone", phone)?;
        require("bank_card_no", bank_card_no)?;

        let request = BankFourRealName {
            id_no: id_no.to_string(),
            id_name: id_name.to_string(),
            mobile: phone.to_string(),
            bank_card_no: bank_card_no.to_string(),
        };
        self.call_form(&request, self.app_key_credentials()).await
    }
}
