#![cfg_attr(not(test), deny(unsafe_code))]
#![warn(
    clippy::pedantic,
    clippy::unwrap_used,
    clippy::missing_docs_in_private_items
)]

//! Client for the YunHeTong electronic contract platform.
//!
//! Two API generations are covered:
//!
//! * the legacy form API, authenticated with per-user tokens passed to each
//!   call, and
//! * the V4 JSON API, authenticated with a shared platform token that the
//!   client keeps fresh in the background (see [`YunHeTong::start_token_refresh`]).
//!
//! Real-name verification calls go to a separate gateway, and inbound
//! notifications are handled by [`notify`].

pub mod authentic;
pub mod config;
pub mod contract;
pub mod error;
pub mod internal;
pub mod notify;
pub mod params;
pub mod request;
pub mod response;
pub mod token;
pub mod types;
pub mod user;
pub mod v4;

pub use config::Config;
pub use error::{ErrorKind, YunHeTongRequestError};
pub use notify::{AsyncNotifyResult, answer_async_notify, parse_async_notify};
pub use response::{BaseResponse, LegacyResponse, V4Response};
pub use token::{LoginResponse, TokenRefresher};

use core::fmt;
use std::sync::Arc;

#[cfg(feature = "leaky-bucket")]
use leaky_bucket::RateLimiter;

use crate::{
    internal::RequestHelper,
    params::to_params,
    request::ApiRequest,
    response::Envelope,
    token::TokenStore,
    types::AuthRequestType,
};

/// Handle to the platform.
///
/// Cloning is cheap and clones share the HTTP connection pool and the
/// platform token.
#[derive(Clone)]
pub struct YunHeTong {
    pub(crate) config: Arc<Config>,
    pub(crate) helper: RequestHelper,
    pub(crate) tokens: TokenStore,
    #[cfg(feature = "leaky-bucket")]
    pub(crate) leaky_bucket: Option<Arc<RateLimiter>>,
}

impl YunHeTong {
    /// Builds a client with its own HTTP connection pool.
    pub fn new(config: Config) -> Result<Self, YunHeTongRequestError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()?;
        Ok(Self::with_client(config, client))
    }

    /// Builds a client on top of an existing `reqwest::Client`.
    ///
    /// The configured timeout is not applied; the given client's settings win.
    pub fn with_client(config: Config, client: reqwest::Client) -> Self {
        let helper = RequestHelper::new(
            client,
            &config.api_gateway,
            &config.api_gateway_v4,
            &config.auth_gateway,
        );
        Self {
            config: Arc::new(config),
            helper,
            tokens: TokenStore::new(),
            #[cfg(feature = "leaky-bucket")]
            leaky_bucket: None,
        }
    }

    /// Builds a client from `YUNHETONG_*` environment variables, see [`Config::load_from_env`].
    pub fn load_from_env() -> Result<Self, YunHeTongRequestError> {
        Self::new(Config::load_from_env()?)
    }

    /// Makes every platform call wait for a permit of `limiter` first.
    #[cfg(feature = "leaky-bucket")]
    #[must_use]
    pub fn with_rate_limiter(mut self, limiter: Arc<RateLimiter>) -> Self {
        self.leaky_bucket = Some(limiter);
        self
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub(crate) async fn throttle(&self) {
        #[cfg(feature = "leaky-bucket")]
        if let Some(ref limiter) = self.leaky_bucket {
            limiter.acquire_one().await;
        }
    }

    /// `appId` and `password`, authenticating legacy calls that take no user token
    pub(crate) fn app_credentials(&self) -> [(&'static str, String); 2] {
        [
            ("appId", self.config.app_id.clone()),
            ("password", self.config.password.clone()),
        ]
    }

    /// `appId` and `appKey`, authenticating V4 verification calls
    pub(crate) fn app_key_credentials(&self) -> [(&'static str, String); 2] {
        [
            ("appId", self.config.app_id.clone()),
            ("appKey", self.config.app_key.clone()),
        ]
    }

    /// Account of the legacy verification service plus the kind of check
    pub(crate) fn verification_credentials(
        &self,
        request_type: AuthRequestType,
    ) -> [(&'static str, String); 3] {
        [
            ("key", self.config.auth_id.clone()),
            ("value", self.config.auth_password.clone()),
            ("rcaRequestType", request_type.as_ref().to_string()),
        ]
    }

    /// Sends `request` as a form, with `overlay` merged over its fields.
    pub(crate) async fn call_form<R, I, K, V>(
        &self,
        request: &R,
        overlay: I,
    ) -> Result<R::Response, YunHeTongRequestError>
    where
        R: ApiRequest,
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let params = to_params(request, overlay)?;
        self.throttle().await;
        let body = self.helper.request_form(&request.endpoint(), params).await?;
        R::Response::parse(&body)
    }

    /// Like [`Self::call_form`], uploading `file` alongside the fields.
    pub(crate) async fn call_multipart<R, I, K, V>(
        &self,
        request: &R,
        overlay: I,
        file: Vec<u8>,
    ) -> Result<R::Response, YunHeTongRequestError>
    where
        R: ApiRequest,
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let params = to_params(request, overlay)?;
        self.throttle().await;
        let body = self
            .helper
            .request_multipart(&request.endpoint(), params, file)
            .await?;
        R::Response::parse(&body)
    }

    /// Sends `request` as JSON, authenticated with the current platform token.
    pub(crate) async fn call_json<R: ApiRequest>(
        &self,
        request: &R,
    ) -> Result<R::Response, YunHeTongRequestError> {
        let token = self.tokens.current();
        self.throttle().await;
        let reply = self
            .helper
            .request_json(&request.endpoint(), request, Some(&token))
            .await?;
        R::Response::parse(&reply.body)
    }
}

impl fmt::Debug for YunHeTong {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("YunHeTong")
            .field("config", &self.config)
            .field("tokens", &self.tokens)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> YunHeTong {
        let config = Config::builder()
            .app_id("app-1")
            .app_key("key-1")
            .password("pw-1")
            .auth_id("auth-1")
            .auth_password("auth-pw")
            .build();
        YunHeTong::new(config).unwrap()
    }

    #[test]
    fn credentials_overlays() {
        let client = client();
        assert_eq!(
            client.app_credentials(),
            [("appId", "app-1".to_string()), ("password", "pw-1".to_string())]
        );
        assert_eq!(client.app_key_credentials()[1], ("appKey", "key-1".to_string()));
        assert_eq!(
            client.verification_credentials(AuthRequestType::BankFourFactor),
            [
                ("key", "auth-1".to_string()),
                ("value", "auth-pw".to_string()),
                ("rcaRequestType", "4".to_string()),
            ]
        );
    }

    #[test]
    fn debug_redacts_secrets() {
        let rendered = format!("{:?}", client());
        assert!(rendered.contains("app-1"));
        assert!(!rendered.contains("pw-1"));
        assert!(!rendered.contains("auth-pw"));
    }

    #[test]
    fn clones_share_the_platform_token() {
        let a = client();
        let b = a.clone();
        a.tokens.replace("shared".to_string());
        assert_eq!(b.platform_token(), "shared");
    }
}
