use serde::{Deserialize, de::DeserializeOwned};
use serde_json::Value;

use crate::error::{SUCCESS_CODE, YunHeTongRequestError, check_legacy};

/// A platform reply that knows how to classify its own status.
pub trait Envelope: Sized {
    /// Decodes a raw reply body.
    ///
    /// The status is classified before any payload is typed, so a failed call
    /// surfaces as a platform error even when its payload has an unexpected shape.
    fn parse(body: &[u8]) -> Result<Self, YunHeTongRequestError>;
}

/// Decodes a raw response body into `T`.
pub fn decode<T: DeserializeOwned>(body: &[u8]) -> Result<T, YunHeTongRequestError> {
    serde_json::from_slice(body).map_err(|source| deserialization(source, body))
}

fn deserialization(source: serde_json::Error, body: &[u8]) -> YunHeTongRequestError {
    YunHeTongRequestError::Deserialization {
        source,
        body: String::from_utf8_lossy(body).into_owned(),
    }
}

/// Types an untyped payload; `null` and absent payloads become `None`.
fn typed_payload<T: DeserializeOwned>(
    payload: Option<Value>,
    body: &[u8],
) -> Result<Option<T>, YunHeTongRequestError> {
    match payload {
        None | Some(Value::Null) => Ok(None),
        Some(value) => serde_json::from_value(value)
            .map(Some)
            .map_err(|source| deserialization(source, body)),
    }
}

/// Reply of the legacy form API: `code`, `subCode`, `message` and a `value` payload.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LegacyResponse<T = Value> {
    pub code: i64,
    #[serde(default)]
    pub sub_code: i64,
    #[serde(default)]
    pub message: String,
    pub value: Option<T>,
}

impl<T> LegacyResponse<T> {
    pub fn is_success(&self) -> bool {
        self.code == SUCCESS_CODE
    }

    /// Passes the envelope through on success, turns it into an error otherwise.
    pub fn check(self) -> Result<Self, YunHeTongRequestError> {
        check_legacy(self.code, self.sub_code, &self.message)?;
        Ok(self)
    }
}

impl<T: DeserializeOwned> Envelope for LegacyResponse<T> {
    fn parse(body: &[u8]) -> Result<Self, YunHeTongRequestError> {
        let raw = decode::<LegacyResponse<Value>>(body)?.check()?;
        Ok(Self {
            code: raw.code,
            sub_code: raw.sub_code,
            message: raw.message,
            value: typed_payload(raw.value, body)?,
        })
    }
}

/// Reply of the V4 JSON API: `code`, a free-form `msg` and a `data` payload.
#[derive(Debug, Clone, Deserialize)]
pub struct V4Response<T = Value> {
    pub code: i64,
    /// A string on failure, an object (or absent) on success
    #[serde(default)]
    pub msg: Value,
    pub data: Option<T>,
}

/// V4 reply without a payload.
pub type BaseResponse = V4Response<Value>;

impl<T> V4Response<T> {
    pub fn is_success(&self) -> bool {
        self.code == SUCCESS_CODE
    }

    /// Human readable message: the text of `msg` when it is a string, its JSON otherwise.
    pub fn message(&self) -> String {
        match &self.msg {
            Value::String(s) => s.clone(),
            Value::Null => String::new(),
            other => other.to_string(),
        }
    }

    /// Passes the envelope through on success, turns it into an error otherwise.
    pub fn check(self) -> Result<Self, YunHeTongRequestError> {
        if self.is_success() {
            Ok(self)
        } else {
            Err(YunHeTongRequestError::Api {
                code: self.code,
                message: self.message(),
            })
        }
    }
}

impl<T: DeserializeOwned> Envelope for V4Response<T> {
    fn parse(body: &[u8]) -> Result<Self, YunHeTongRequestError> {
        let raw = decode::<V4Response<Value>>(body)?.check()?;
        Ok(Self {
            code: raw.code,
            msg: raw.msg,
            data: typed_payload(raw.data, body)?,
        })
    }
}
