//! Wire codes of the V4 JSON API.

use serde::{Deserialize, Serialize};

/// Certificate authority type; the platform only accepts `B2`.
pub const DEFAULT_CA_TYPE: &str = "B2";

/// Where a personal user's identity document was issued
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum IdentityRegion {
    #[default]
    #[serde(rename = "0")]
    Mainland,
    #[serde(rename = "1")]
    HongKong,
    #[serde(rename = "2")]
    Taiwan,
    #[serde(rename = "3")]
    Macao,
    #[serde(rename = "4")]
    Foreign,
}

/// Identity document of a personal user
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum PersonCertType {
    #[default]
    #[serde(rename = "a")]
    IdCard,
    #[serde(rename = "b")]
    Passport,
    /// Exit-entry permit for Hong Kong and Macao
    #[serde(rename = "d")]
    ExitEntryPermit,
    /// Mainland travel permit for Taiwan residents
    #[serde(rename = "e")]
    TaiwanTravelPermit,
    /// Mainland travel permit for Hong Kong and Macao residents
    #[serde(rename = "f")]
    HongKongMacaoTravelPermit,
    #[serde(rename = "z")]
    Other,
}

/// Region of a phone number
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum PhoneRegion {
    #[default]
    #[serde(rename = "0")]
    Mainland,
    #[serde(rename = "1")]
    HongKongMacao,
    #[serde(rename = "2")]
    Taiwan,
}

/// Identity document of a company; only the unified social credit code is accepted
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum CompanyCertType {
    #[default]
    #[serde(rename = "1")]
    SocialCreditCode,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum BorderType {
    #[serde(rename = "B1")]
    WithBorder,
    #[default]
    #[serde(rename = "B2")]
    WithoutBorder,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum FontFamily {
    #[default]
    #[serde(rename = "F1")]
    Kaiti,
    /// STFangsong
    #[serde(rename = "F2")]
    HuawenFangsong,
    /// STKaiti
    #[serde(rename = "F3")]
    HuawenKaiti,
    #[serde(rename = "F4")]
    MicrosoftYahei,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum FontColor {
    #[default]
    #[serde(rename = "C1")]
    Red,
    #[serde(rename = "C2")]
    Blue,
    #[serde(rename = "C3")]
    Black,
}

/// Rendering mode of a moulage image
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum MoulageMode {
    #[default]
    #[serde(rename = "0")]
    Normal,
    #[serde(rename = "1")]
    Transparent,
    /// Desensitized
    #[serde(rename = "2")]
    Masked,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ZoomCode {
    #[serde(rename = "0")]
    Large,
    #[default]
    #[serde(rename = "1")]
    Normal,
    #[serde(rename = "2")]
    Small,
}

/// Outline of a company seal
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum CompanyMoulageStyle {
    #[default]
    #[serde(rename = "1")]
    Circle,
    #[serde(rename = "2")]
    Ellipse,
}

/// How a contract is identified in `idContent`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum IdType {
    /// Platform contract id
    #[default]
    #[serde(rename = "0")]
    System,
    /// Caller-defined contract number
    #[serde(rename = "1")]
    Custom,
}

/// How the signing position is located in the document
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SignPositionType {
    #[default]
    #[serde(rename = "0")]
    Keyword,
    #[serde(rename = "1")]
    Placeholder,
    #[serde(rename = "2")]
    Coordinate,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SignValidateType {
    #[default]
    #[serde(rename = "0")]
    None,
    #[serde(rename = "1")]
    Sms,
}

/// Which moulage a page signature uses
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SignMode {
    #[default]
    #[serde(rename = "0")]
    Specified,
    /// Drawn by hand on every signature
    #[serde(rename = "1")]
    Drawn,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SignForm {
    #[default]
    #[serde(rename = "0")]
    JsIntegrated,
    #[serde(rename = "1")]
    StandaloneH5,
}

/// Appearance of the applied seal
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SealClass {
    #[default]
    #[serde(rename = "0")]
    Normal,
    /// Perforation seal across page edges
    #[serde(rename = "1")]
    Perforation,
    #[serde(rename = "2")]
    WithAbstract,
    #[serde(rename = "3")]
    WithSignTime,
    #[serde(rename = "4")]
    NormalWithPerforation,
}
