//! Flattening of typed requests into form parameters.
//!
//! The legacy API only understands flat `key=value` fields, so every request
//! descriptor is serialized once and each top-level field is rendered as a
//! string under its wire name. Nested values are rejected: a field that needs
//! structure (placeholders, partner lists) is serialized to a JSON string by
//! the operation before it reaches this module.

use std::collections::HashMap;

use serde::Serialize;
use serde_json::Value;

use crate::error::YunHeTongRequestError;

/// Flat wire parameters of one legacy call.
pub type Params = HashMap<String, String>;

/// Converts `request` into flat parameters and merges `overlay` on top.
///
/// Numbers are rendered in decimal, booleans as `"1"`/`"0"`, strings pass
/// through, `null` fields are left out. On a key collision the overlay value
/// wins.
pub fn to_params<T, I, K, V>(request: &T, overlay: I) -> Result<Params, YunHeTongRequestError>
where
    T: Serialize + ?Sized,
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: Into<String>,
{
    let value = serde_json::to_value(request).map_err(YunHeTongRequestError::Encoding)?;
    let fields = match value {
        Value::Object(fields) => fields,
        Value::Null => serde_json::Map::new(),
        other => {
            return Err(YunHeTongRequestError::UnsupportedParameter {
                name: "<request>".to_string(),
                kind: value_kind(&other),
            });
        }
    };

    let mut params = Params::with_capacity(fields.len());
    for (name, value) in fields {
        if let Some(text) = field_to_string(&name, value)? {
            params.insert(name, text);
        }
    }

    for (key, value) in overlay {
        params.insert(key.into(), value.into());
    }

    Ok(params)
}

/// Renders one field, `None` for fields that are left out.
fn field_to_string(name: &str, value: Value) -> Result<Option<String>, YunHeTongRequestError> {
    match value {
        Value::Null => Ok(None),
        Value::String(s) => Ok(Some(s)),
        Value::Number(n) => Ok(Some(n.to_string())),
        Value::Bool(b) => Ok(Some(if b { "1" } else { "0" }.to_string())),
        other @ (Value::Array(_) | Value::Object(_)) => {
            Err(YunHeTongRequestError::UnsupportedParameter {
                name: name.to_string(),
                kind: value_kind(&other),
            })
        }
    }
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// An empty overlay, for calls that carry no extra fields.
#[cfg(test)]
pub(crate) fn no_overlay() -> [(String, String); 0] {
    []
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Serialize;

    #[derive(Serialize)]
    #[serde(rename_all = "camelCase")]
    struct Sample {
        app_user_id: String,
        page_num: u32,
        create_signature: bool,
        #[serde(skip_serializing_if = "Option::is_none")]
        keyword: Option<String>,
        optional: Option<String>,
    }

    fn sample() -> Sample {
        Sample {
            app_user_id: "u-1".into(),
            page_num: 3,
            create_signature: true,
            keyword: None,
            optional: None,
        }
    }

    #[test]
    fn fields_use_wire_names_and_string_forms() {
        let params = to_params(&sample(), no_overlay()).unwrap();
        assert_eq!(params.get("appUserId").map(String::as_str), Some("u-1"));
        assert_eq!(params.get("pageNum").map(String::as_str), Some("3"));
        assert_eq!(params.get("createSignature").map(String::as_str), Some("1"));
        assert!(!params.contains_key("keyword"));
        assert!(!params.contains_key("optional"));
        assert_eq!(params.len(), 3);
    }

    #[test]
    fn false_renders_as_zero() {
        let mut s = sample();
        s.create_signature = false;
        let params = to_params(&s, no_overlay()).unwrap();
        assert_eq!(params["createSignature"], "0");
    }

    #[test]
    fn overlay_is_merged_and_wins_collisions() {
        let params = to_params(
            &sample(),
            [("appId", "app-9"), ("appUserId", "from-overlay")],
        )
        .unwrap();
        assert_eq!(params["appId"], "app-9");
        assert_eq!(params["appUserId"], "from-overlay");
        assert_eq!(params["pageNum"], "3");
    }

    #[test]
    fn nested_values_are_rejected() {
        #[derive(Serialize)]
        struct Nested {
            list: Vec<String>,
        }
        let err = to_params(&Nested { list: vec!["a".into()] }, no_overlay()).unwrap_err();
        match err {
            YunHeTongRequestError::UnsupportedParameter { name, kind } => {
                assert_eq!(name, "list");
                assert_eq!(kind, "array");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn non_struct_request_is_rejected() {
        let err = to_params(&"plain", no_overlay()).unwrap_err();
        assert!(matches!(err, YunHeTongRequestError::UnsupportedParameter { .. }));
    }
}
