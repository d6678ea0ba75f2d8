use std::collections::HashMap;

use bon::Builder;
use serde::{Deserialize, Serialize};

use super::types::{
    BorderType, CompanyCertType, CompanyMoulageStyle, DEFAULT_CA_TYPE, FontColor, FontFamily,
    IdentityRegion, MoulageMode, PersonCertType, PhoneRegion, ZoomCode,
};
use crate::{request::ApiRequest, response::V4Response};

/// Registers a personal user
#[derive(Debug, Clone, Serialize, Builder)]
#[serde(rename_all = "camelCase")]
pub struct CreatePerson {
    #[builder(into)]
    pub user_name: String,
    #[builder(default)]
    pub identity_region: IdentityRegion,
    #[builder(default)]
    #[serde(rename = "certifyType")]
    pub cert_type: PersonCertType,
    #[builder(into)]
    #[serde(rename = "certifyNum")]
    pub cert_num: String,
    #[builder(default)]
    pub phone_region: PhoneRegion,
    #[builder(into)]
    #[serde(rename = "phoneNo")]
    pub phone: String,
    #[builder(into, default = DEFAULT_CA_TYPE.to_string())]
    pub ca_type: String,
}

impl ApiRequest for CreatePerson {
    const PATH: &'static str = "/user/person";
    type Response = V4Response<SignerId>;
}

/// Registers a company
#[derive(Debug, Clone, Serialize, Builder)]
#[serde(rename_all = "camelCase")]
pub struct CreateCompany {
    #[builder(into)]
    pub user_name: String,
    #[builder(default)]
    #[serde(rename = "certifyType")]
    pub cert_type: CompanyCertType,
    #[builder(into)]
    #[serde(rename = "certifyNum")]
    pub cert_num: String,
    #[builder(into)]
    #[serde(rename = "phoneNo")]
    pub phone: String,
    #[builder(into, default = DEFAULT_CA_TYPE.to_string())]
    pub ca_type: String,
}

impl ApiRequest for CreateCompany {
    const PATH: &'static str = "/user/company";
    type Response = V4Response<SignerId>;
}

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignerId {
    pub signer_id: i64,
}

/// Looks up signer ids by certificate number
#[derive(Debug, Clone, Serialize, Builder)]
#[serde(rename_all = "camelCase")]
pub struct QuerySignerId {
    #[serde(rename = "certifyNumList")]
    pub cert_nums: Vec<String>,
}

impl ApiRequest for QuerySignerId {
    const PATH: &'static str = "/user/signerId/certifyNums";
    /// One `{certifyNum: signerId}` entry per match
    type Response = V4Response<Vec<HashMap<String, i64>>>;
}

/// Draws a personal moulage from the user's name
#[derive(Debug, Clone, Serialize, Builder)]
#[serde(rename_all = "camelCase")]
pub struct CreatePersonMoulage {
    #[builder(into)]
    pub signer_id: String,
    #[builder(default)]
    pub border_type: BorderType,
    #[builder(default)]
    pub font_family: FontFamily,
    #[builder(default)]
    #[serde(rename = "color")]
    pub font_color: FontColor,
    #[builder(default)]
    pub mode: MoulageMode,
    #[builder(default)]
    pub zoom_code: ZoomCode,
}

impl ApiRequest for CreatePersonMoulage {
    const PATH: &'static str = "/user/personMoulage";
    type Response = V4Response<MoulageId>;
}

/// Draws a company seal
#[derive(Debug, Clone, Serialize, Builder)]
#[serde(rename_all = "camelCase")]
pub struct CreateCompanyMoulage {
    #[builder(into)]
    pub signer_id: String,
    #[builder(default)]
    pub style_type: CompanyMoulageStyle,
    /// Horizontal text across the seal
    #[builder(into)]
    pub text_content: String,
    /// Anti-counterfeit code, 13 digits
    #[builder(into)]
    pub key_content: String,
    #[builder(default)]
    #[serde(rename = "color")]
    pub font_color: FontColor,
    #[builder(default)]
    pub mode: MoulageMode,
}

impl ApiRequest for CreateCompanyMoulage {
    const PATH: &'static str = "/user/companyMoulage";
    type Response = V4Response<MoulageId>;
}

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoulageId {
    pub moulage_id: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn person_serializes_wire_names_and_defaults() {
        let request = CreatePerson::builder()
            .user_name("张三")
            .cert_num("110101199001011234")
            .phone("13800000000")
            .build();
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "userName": "张三",
                "identityRegion": "0",
                "certifyType": "a",
                "certifyNum": "110101199001011234",
                "phoneRegion": "0",
                "phoneNo": "13800000000",
                "caType": "B2"
            })
        );
    }

    #[test]
    fn company_moulage_uses_color_key() {
        let request = CreateCompanyMoulage::builder()
            .signer_id("42")
            .text_content("合同专用章")
            .key_content("1234567890123")
            .font_color(FontColor::Blue)
            .build();
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["color"], "C2");
        assert_eq!(json["styleType"], "1");
        assert_eq!(json["signerId"], "42");
    }
}
