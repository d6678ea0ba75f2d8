//! Asynchronous notifications pushed by the platform.
//!
//! The platform POSTs a form body with a single `notice` field whose value is
//! a JSON document, and expects a small JSON acknowledgment in return.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{YunHeTong, error::YunHeTongRequestError, response::decode};

const NOTICE_FIELD: &str = "notice";

/// One notification about a contract or user event.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AsyncNotifyResult {
    /// Free-text description of the event
    pub content: String,
    pub notice_type: i64,
    /// Parameters whose meaning depends on `notice_type`
    pub notice_params: String,
    #[serde(rename = "map")]
    pub info_map: HashMap<String, Value>,
}

/// Acknowledgment returned to the platform.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotifyAnswer {
    pub response: bool,
    pub msg: String,
}

/// Parses the raw body of a notification request.
pub fn parse_async_notify(body: &[u8]) -> Result<AsyncNotifyResult, YunHeTongRequestError> {
    let notice = url::form_urlencoded::parse(body)
        .find(|(name, _)| name == NOTICE_FIELD)
        .map(|(_, value)| value.into_owned())
        .ok_or_else(|| {
            YunHeTongRequestError::InvalidNotification(format!(
                "body has no `{NOTICE_FIELD}` field"
            ))
        })?;

    decode(notice.as_bytes())
}

/// JSON text acknowledging a notification.
pub fn answer_async_notify(success: bool, msg: &str) -> String {
    let answer = NotifyAnswer {
        response: success,
        msg: msg.to_string(),
    };
    serde_json::to_string(&answer).unwrap_or_default()
}

impl YunHeTong {
    /// Parses a notification body received from the platform.
    pub fn async_notify(&self, body: &[u8]) -> Result<AsyncNotifyResult, YunHeTongRequestError> {
        parse_async_notify(body)
    }

    /// Builds the acknowledgment for a received notification.
    pub fn answer_async_notify(&self, success: bool, msg: &str) -> String {
        answer_async_notify(success, msg)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encode(json: &str) -> Vec<u8> {
        url::form_urlencoded::Serializer::new(String::new())
            .append_pair("notice", json)
            .finish()
            .into_bytes()
    }

    #[test]
    fn parses_url_encoded_notice() {
        let body = encode(
            r#"{"content":"合同已签署 & 归档","noticeType":3,"noticeParams":"c-1","map":{"contractId":123}}"#,
        );
        let notice = parse_async_notify(&body).unwrap();
        assert_eq!(notice.content, "合同已签署 & 归档");
        assert_eq!(notice.notice_type, 3);
        assert_eq!(notice.notice_params, "c-1");
        assert_eq!(notice.info_map["contractId"], serde_json::json!(123));
    }

    #[test]
    fn missing_fields_default() {
        let notice = parse_async_notify(&encode(r#"{"noticeType":1}"#)).unwrap();
        assert_eq!(notice.notice_type, 1);
        assert!(notice.content.is_empty());
        assert!(notice.info_map.is_empty());
    }

    #[test]
    fn body_without_notice_is_rejected() {
        let err = parse_async_notify(b"other=1").unwrap_err();
        assert!(matches!(err, YunHeTongRequestError::InvalidNotification(_)));
    }

    #[test]
    fn notice_with_bad_json_is_decode_error() {
        let err = parse_async_notify(&encode("{not json")).unwrap_err();
        assert!(matches!(err, YunHeTongRequestError::Deserialization { .. }));
    }

    #[test]
    fn answer_is_json_ack() {
        let answer: NotifyAnswer =
            serde_json::from_str(&answer_async_notify(true, "received")).unwrap();
        assert_eq!(
            answer,
            NotifyAnswer {
                response: true,
                msg: "received".into()
            }
        );
    }
}
