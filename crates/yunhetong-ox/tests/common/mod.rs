#![allow(dead_code)]

use std::time::Duration;

use wiremock::{MockServer, Request};
use yunhetong_ox::{Config, YunHeTong};

pub fn config(server: &MockServer) -> Config {
    Config::builder()
        .app_id("app-1")
        .app_key("key-1")
        .password("pw-1")
        .auth_id("auth-1")
        .auth_password("auth-pw")
        .timeout(Duration::from_secs(5))
        .build()
        .with_single_gateway(server.uri())
}

pub fn client(server: &MockServer) -> YunHeTong {
    YunHeTong::new(config(server)).expect("client")
}

/// Decoded `application/x-www-form-urlencoded` body of a captured request.
pub fn form_fields(request: &Request) -> Vec<(String, String)> {
    url::form_urlencoded::parse(&request.body)
        .into_owned()
        .collect()
}

pub fn form_field(request: &Request, name: &str) -> Option<String> {
    form_fields(request)
        .into_iter()
        .find(|(k, _)| k == name)
        .map(|(_, v)| v)
}

pub fn query_param(request: &Request, name: &str) -> Option<String> {
    request
        .url
        .query_pairs()
        .find(|(k, _)| k == name)
        .map(|(_, v)| v.into_owned())
}

pub fn legacy_ok(value: serde_json::Value) -> serde_json::Value {
    serde_json::json!({"code": 200, "subCode": 0, "message": "success", "value": value})
}
