use bytes::Bytes;
use log::debug;
use reqwest::{
    Method,
    header::CONTENT_TYPE,
    multipart::{Form, Part},
};
use serde::Serialize;

use crate::{error::YunHeTongRequestError, params::Params};

/// Path of the login endpoint; its response carries the token in a header.
pub const LOGIN_PATH: &str = "/auth/login";
/// Parameter and header name of the access token.
pub const TOKEN_KEY: &str = "token";
/// Requests whose path contains this go to the authentication gateway.
const AUTH_ROUTE_MARKER: &str = "authentic";
/// Multipart field holding the uploaded file.
const FILE_FIELD: &str = "file";

const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded;charset=utf-8";
const JSON_CONTENT_TYPE: &str = "application/json;charset=UTF-8";

/// HTTP method for API endpoints
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
}

impl From<HttpMethod> for Method {
    fn from(method: HttpMethod) -> Self {
        match method {
            HttpMethod::Get => Method::GET,
            HttpMethod::Post => Method::POST,
        }
    }
}

/// Protocol generation an endpoint belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiVersion {
    /// Form-encoded API under the SDK gateway
    Legacy,
    /// JSON API under the V4 gateway
    V4,
}

/// Relative path plus method of one platform operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    pub path: String,
    pub method: HttpMethod,
}

impl Endpoint {
    pub fn new(path: impl Into<String>, method: HttpMethod) -> Self {
        Self {
            path: path.into(),
            method,
        }
    }
}

/// Raw reply of a JSON call
#[derive(Debug, Clone)]
pub struct JsonReply {
    pub body: Bytes,
    /// Token from the response header, only read for the login endpoint
    pub token: Option<String>,
}

/// Moves a `token` parameter out of the body and onto the query string.
///
/// The legacy API rejects tokens sent as form fields.
pub fn split_token(path: &str, mut params: Params) -> (String, Params) {
    match params.remove(TOKEN_KEY) {
        Some(token) => (append_query(path, &[(TOKEN_KEY, token.as_str())]), params),
        None => (path.to_string(), params),
    }
}

/// Appends url-encoded pairs to `path`, keeping any query it already has.
pub fn append_query(path: &str, pairs: &[(&str, &str)]) -> String {
    if pairs.is_empty() {
        return path.to_string();
    }
    let query = url::form_urlencoded::Serializer::new(String::new())
        .extend_pairs(pairs)
        .finish();
    let separator = if path.contains('?') { '&' } else { '?' };
    format!("{path}{separator}{query}")
}

/// Url-encodes a parameter map as a form body.
pub fn encode_form(params: &Params) -> String {
    url::form_urlencoded::Serializer::new(String::new())
        .extend_pairs(params.iter())
        .finish()
}

/// Performs the network side of every call and hands back raw bytes.
///
/// Response content is never looked at here, and HTTP status codes are not
/// checked either: the platform reports failures inside the JSON envelope.
#[derive(Debug, Clone)]
pub struct RequestHelper {
    client: reqwest::Client,
    api_gateway: String,
    api_gateway_v4: String,
    auth_gateway: String,
}

impl RequestHelper {
    pub fn new(
        client: reqwest::Client,
        api_gateway: &str,
        api_gateway_v4: &str,
        auth_gateway: &str,
    ) -> Self {
        Self {
            client,
            api_gateway: api_gateway.trim_end_matches('/').to_string(),
            api_gateway_v4: api_gateway_v4.trim_end_matches('/').to_string(),
            auth_gateway: auth_gateway.trim_end_matches('/').to_string(),
        }
    }

    /// Absolute URL for `path`, routed purely on the path text.
    pub fn resolve_url(&self, version: ApiVersion, path: &str) -> String {
        let base = if path.contains(AUTH_ROUTE_MARKER) {
            &self.auth_gateway
        } else {
            match version {
                ApiVersion::Legacy => &self.api_gateway,
                ApiVersion::V4 => &self.api_gateway_v4,
            }
        };
        format!("{base}{path}")
    }

    /// Form-encoded call of the legacy API
    pub async fn request_form(
        &self,
        endpoint: &Endpoint,
        params: Params,
    ) -> Result<Bytes, YunHeTongRequestError> {
        let (path, params) = split_token(&endpoint.path, params);
        let url = self.resolve_url(ApiVersion::Legacy, &path);
        debug!("{:?} {} (form, {} fields)", endpoint.method, endpoint.path, params.len());

        let res = self
            .client
            .request(endpoint.method.into(), &url)
            .header(CONTENT_TYPE, FORM_CONTENT_TYPE)
            .body(encode_form(&params))
            .send()
            .await?;

        Ok(res.bytes().await?)
    }

    /// Multipart upload of the legacy API, `file` carries the payload
    pub async fn request_multipart(
        &self,
        endpoint: &Endpoint,
        params: Params,
        file: Vec<u8>,
    ) -> Result<Bytes, YunHeTongRequestError> {
        let (path, params) = split_token(&endpoint.path, params);
        let url = self.resolve_url(ApiVersion::Legacy, &path);
        debug!(
            "{:?} {} (multipart, {} fields, {} bytes)",
            endpoint.method,
            endpoint.path,
            params.len(),
            file.len()
        );

        let form = params
            .into_iter()
            .fold(Form::new(), |form, (name, value)| form.text(name, value))
            .part(FILE_FIELD, Part::bytes(file));

        let res = self
            .client
            .request(endpoint.method.into(), &url)
            .multipart(form)
            .send()
            .await?;

        Ok(res.bytes().await?)
    }

    /// JSON call of the V4 API, the token travels as a header
    pub async fn request_json<B: Serialize + ?Sized>(
        &self,
        endpoint: &Endpoint,
        body: &B,
        token: Option<&str>,
    ) -> Result<JsonReply, YunHeTongRequestError> {
        let url = self.resolve_url(ApiVersion::V4, &endpoint.path);
        let payload = serde_json::to_vec(body).map_err(YunHeTongRequestError::Encoding)?;
        debug!("{:?} {} (json, {} bytes)", endpoint.method, endpoint.path, payload.len());

        let mut req = self
            .client
            .request(endpoint.method.into(), &url)
            .header(CONTENT_TYPE, JSON_CONTENT_TYPE)
            .body(payload);

        if let Some(token) = token.filter(|t| !t.is_empty()) {
            req = req.header(TOKEN_KEY, token);
        }

        let res = req.send().await?;

        let token = if endpoint.path == LOGIN_PATH {
            res.headers()
                .get(TOKEN_KEY)
                .and_then(|v| v.to_str().ok())
                .map(str::to_string)
        } else {
            None
        };

        Ok(JsonReply {
            body: res.bytes().await?,
            token,
        })
    }

    /// Plain request without a body, the path already carries its query
    pub async fn request_bytes(&self, endpoint: &Endpoint) -> Result<Bytes, YunHeTongRequestError> {
        let url = self.resolve_url(ApiVersion::Legacy, &endpoint.path);
        debug!("{:?} {}", endpoint.method, strip_query(&endpoint.path));

        let res = self
            .client
            .request(endpoint.method.into(), &url)
            .header(CONTENT_TYPE, FORM_CONTENT_TYPE)
            .send()
            .await?;

        Ok(res.bytes().await?)
    }
}

/// Keeps tokens out of the logs.
fn strip_query(path: &str) -> &str {
    path.split_once('?').map_or(path, |(path, _)| path)
}
