use thiserror::Error;

/// Status code the platform uses to mark a successful call.
pub const SUCCESS_CODE: i64 = 200;

/// Categorizes errors by the stage of a call that produced them
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// A required argument was missing - nothing was sent
    InvalidArgument,
    /// The request could not be turned into wire parameters - nothing was sent
    Encoding,
    /// Connection, TLS or timeout failure
    Network,
    /// The response body did not match the expected envelope
    Decode,
    /// The platform answered with a non-success status
    Platform,
    /// Misuse of the client itself
    Client,
}

#[derive(Debug, Error)]
pub enum YunHeTongRequestError {
    /// A required argument was empty
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// A request field has no flat string form
    #[error("Parameter `{name}` cannot be sent as a form field: {kind} values are not supported")]
    UnsupportedParameter { name: String, kind: &'static str },

    /// A required environment variable is missing or not unicode
    #[error("Environment variable error: {0}")]
    Env(#[from] std::env::VarError),

    /// The request could not be serialized
    #[error("Encoding error: {0}")]
    Encoding(#[source] serde_json::Error),

    /// Errors from the HTTP client
    #[error(transparent)]
    ReqwestError(#[from] reqwest::Error),

    /// The response body is not the expected JSON envelope
    #[error("Failed to decode response: {source}; body: {body}")]
    Deserialization {
        #[source]
        source: serde_json::Error,
        body: String,
    },

    /// A login succeeded but the platform sent no token header
    #[error("Login succeeded but no token was returned")]
    MissingToken,

    /// Legacy API failure carrying the primary and secondary codes
    #[error("Platform error: code {code}, subCode {sub_code}: {message}")]
    Platform {
        code: i64,
        sub_code: i64,
        message: String,
    },

    /// V4 API failure
    #[error("Platform error: code {code}: {message}")]
    Api { code: i64, message: String },

    /// Real-name verification was rejected
    #[error("Real-name verification failed: code {code}: {message}")]
    Verification { code: i64, message: String },

    /// The token refresher was started twice for the same client
    #[error("Token refresher is already running for this client")]
    RefreshAlreadyRunning,

    /// An async notification body could not be understood
    #[error("Invalid notification: {0}")]
    InvalidNotification(String),
}

impl YunHeTongRequestError {
    /// Returns the error kind for categorizing failures
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidArgument(_) | Self::Env(_) => ErrorKind::InvalidArgument,
            Self::UnsupportedParameter { .. } | Self::Encoding(_) => ErrorKind::Encoding,
            Self::ReqwestError(e) => {
                if e.is_decode() {
                    ErrorKind::Decode
                } else {
                    ErrorKind::Network
                }
            }
            Self::Deserialization { .. } | Self::MissingToken | Self::InvalidNotification(_) => {
                ErrorKind::Decode
            }
            Self::Platform { .. } | Self::Api { .. } | Self::Verification { .. } => {
                ErrorKind::Platform
            }
            Self::RefreshAlreadyRunning => ErrorKind::Client,
        }
    }

    /// Returns true if a caller-side retry can reasonably succeed
    pub fn is_retryable(&self) -> bool {
        matches!(self.kind(), ErrorKind::Network)
    }

    /// Platform status code, when the platform produced the error
    pub fn code(&self) -> Option<i64> {
        match self {
            Self::Platform { code, .. } | Self::Api { code, .. } | Self::Verification { code, .. } => {
                Some(*code)
            }
            _ => None,
        }
    }

    pub(crate) fn invalid_argument(name: &str) -> Self {
        Self::InvalidArgument(format!("`{name}` must not be empty"))
    }
}

/// Fails fast when a required argument is empty.
pub(crate) fn require(name: &str, value: &str) -> Result<(), YunHeTongRequestError> {
    if value.trim().is_empty() {
        Err(YunHeTongRequestError::invalid_argument(name))
    } else {
        Ok(())
    }
}

/// Classifies the status fields of a legacy envelope.
pub fn check_legacy(code: i64, sub_code: i64, message: &str) -> Result<(), YunHeTongRequestError> {
    if code == SUCCESS_CODE {
        return Ok(());
    }
    Err(YunHeTongRequestError::Platform {
        code,
        sub_code,
        message: message.to_string(),
    })
}

/// Classifies the status fields of a real-name verification envelope.
///
/// The verification host reports success with both the status code and the
/// `success` flag; either one failing rejects the call.
pub fn check_verification(
    code: i64,
    msg: &str,
    success: bool,
) -> Result<(), YunHeTongRequestError> {
    if code == SUCCESS_CODE && success {
        return Ok(());
    }
    Err(YunHeTongRequestError::Verification {
        code,
        message: msg.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn legacy_success_passes() {
        assert!(check_legacy(200, 0, "ok").is_ok());
    }

    #[test]
    fn legacy_failure_keeps_both_codes() {
        let err = check_legacy(400, 12, "duplicate user").unwrap_err();
        let text = err.to_string();
        assert!(text.contains("400"));
        assert!(text.contains("12"));
        assert!(text.contains("duplicate user"));
        assert_eq!(err.kind(), ErrorKind::Platform);
        assert_eq!(err.code(), Some(400));
        assert!(!err.is_retryable());
    }

    #[test]
    fn verification_needs_success_flag() {
        assert!(check_verification(200, "ok", true).is_ok());
        let err = check_verification(200, "no match", false).unwrap_err();
        assert!(matches!(err, YunHeTongRequestError::Verification { code: 200, .. }));
        assert!(check_verification(500, "boom", true).is_err());
    }

    #[test]
    fn missing_env_var_is_an_argument_error() {
        let err = YunHeTongRequestError::from(std::env::VarError::NotPresent);
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);
        assert!(!err.is_retryable());
        assert_eq!(err.code(), None);
    }

    #[test]
    fn require_rejects_blank() {
        assert!(require("phone", "13800000000").is_ok());
        let err = require("phone", "  ").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);
        assert!(err.to_string().contains("phone"));
    }
}
