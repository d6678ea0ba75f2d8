//! Wire codes of the legacy form API.

use serde::{Deserialize, Serialize};

/// Kind of account registered on the platform
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, strum::AsRefStr)]
pub enum UserType {
    #[serde(rename = "1")]
    #[strum(serialize = "1")]
    Personal,
    #[serde(rename = "2")]
    #[strum(serialize = "2")]
    Enterprise,
    #[serde(rename = "4")]
    #[strum(serialize = "4")]
    Platform,
}

/// Kind of certificate identifying a user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, strum::AsRefStr)]
pub enum CertType {
    #[serde(rename = "1")]
    #[strum(serialize = "1")]
    IdCard,
    #[serde(rename = "2")]
    #[strum(serialize = "2")]
    Passport,
    /// Military officer certificate
    #[serde(rename = "3")]
    #[strum(serialize = "3")]
    Officer,
    /// Business licence
    #[serde(rename = "4")]
    #[strum(serialize = "4")]
    Licence,
    /// Organization code certificate
    #[serde(rename = "5")]
    #[strum(serialize = "5")]
    Organization,
    /// Unified social credit code
    #[serde(rename = "6")]
    #[strum(serialize = "6")]
    SocialCreditCode,
}

/// Which checks a real-name verification runs (`rcaRequestType`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::AsRefStr)]
pub enum AuthRequestType {
    /// ID number and name
    #[strum(serialize = "1")]
    IdentityTwoFactor,
    /// ID number and name checked against the portrait on file
    #[strum(serialize = "2")]
    Portrait,
    /// ID number, name and bank card
    #[strum(serialize = "3")]
    BankThreeFactor,
    /// ID number, name, bank card and reserved mobile number
    #[strum(serialize = "4")]
    BankFourFactor,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn enums_serialize_to_codes() {
        assert_eq!(serde_json::to_string(&UserType::Enterprise).unwrap(), "\"2\"");
        assert_eq!(serde_json::to_string(&CertType::SocialCreditCode).unwrap(), "\"6\"");
        assert_eq!(UserType::Platform.as_ref(), "4");
        assert_eq!(AuthRequestType::BankFourFactor.as_ref(), "4");
    }
}
