use core::fmt;
use std::time::Duration;

use bon::Builder;

/// Gateway of the legacy form API
pub const API_GATEWAY: &str = "https://sdk.yunhetong.com/sdk";
/// Gateway of the V4 JSON API
pub const API_GATEWAY_V4: &str = "https://api.yunhetong.com/api";
/// Gateway of the real-name verification service
pub const AUTH_GATEWAY: &str = "https://authentic.yunhetong.com";

/// Per-request transport timeout
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);
/// Platform tokens live about 15 minutes; refreshing every 14 leaves a one minute margin.
pub const TOKEN_REFRESH_INTERVAL: Duration = Duration::from_secs(14 * 60);

/// Connection parameters of a [`crate::YunHeTong`] client.
#[derive(Clone, Builder)]
pub struct Config {
    /// Application identifier issued by the platform
    #[builder(into)]
    pub app_id: String,
    /// Application key, used by the V4 API
    #[builder(into, default)]
    pub app_key: String,
    /// Application password, used by the legacy API
    #[builder(into, default)]
    pub password: String,
    /// Key of the real-name verification account
    #[builder(into, default)]
    pub auth_id: String,
    /// Secret of the real-name verification account
    #[builder(into, default)]
    pub auth_password: String,
    #[builder(into, default = API_GATEWAY.to_string())]
    pub api_gateway: String,
    #[builder(into, default = API_GATEWAY_V4.to_string())]
    pub api_gateway_v4: String,
    #[builder(into, default = AUTH_GATEWAY.to_string())]
    pub auth_gateway: String,
    #[builder(default = DEFAULT_TIMEOUT)]
    pub timeout: Duration,
    /// Cadence of the background platform token refresh
    #[builder(default = TOKEN_REFRESH_INTERVAL)]
    pub refresh_interval: Duration,
}

impl Config {
    /// Reads the configuration from `YUNHETONG_*` environment variables.
    ///
    /// Only `YUNHETONG_APP_ID` is required; unset optional variables keep
    /// their defaults.
    pub fn load_from_env() -> Result<Self, std::env::VarError> {
        let app_id = std::env::var("YUNHETONG_APP_ID")?;
        let var = |name: &str| std::env::var(name).ok();

        Ok(Self::builder()
            .app_id(app_id)
            .app_key(var("YUNHETONG_APP_KEY").unwrap_or_default())
            .password(var("YUNHETONG_PASSWORD").unwrap_or_default())
            .auth_id(var("YUNHETONG_AUTH_ID").unwrap_or_default())
            .auth_password(var("YUNHETONG_AUTH_PASSWORD").unwrap_or_default())
            .api_gateway(var("YUNHETONG_API_GATEWAY").unwrap_or_else(|| API_GATEWAY.to_string()))
            .api_gateway_v4(
                var("YUNHETONG_API_GATEWAY_V4").unwrap_or_else(|| API_GATEWAY_V4.to_string()),
            )
            .auth_gateway(var("YUNHETONG_AUTH_GATEWAY").unwrap_or_else(|| AUTH_GATEWAY.to_string()))
            .build())
    }

    /// A config whose three gateways all point at `base_url`, handy for local mocks.
    pub fn with_single_gateway(self, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        Self {
            api_gateway: base_url.clone(),
            api_gateway_v4: base_url.clone(),
            auth_gateway: base_url,
            ..self
        }
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("app_id", &self.app_id)
            .field("app_key", &"[REDACTED]")
            .field("password", &"[REDACTED]")
            .field("auth_id", &self.auth_id)
            .field("auth_password", &"[REDACTED]")
            .field("api_gateway", &self.api_gateway)
            .field("api_gateway_v4", &self.api_gateway_v4)
            .field("auth_gateway", &self.auth_gateway)
            .field("timeout", &self.timeout)
            .field("refresh_interval", &self.refresh_interval)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_defaults() {
        let config = Config::builder().app_id("app").build();
        assert_eq!(config.api_gateway, API_GATEWAY);
        assert_eq!(config.api_gateway_v4, API_GATEWAY_V4);
        assert_eq!(config.auth_gateway, AUTH_GATEWAY);
        assert_eq!(config.timeout, DEFAULT_TIMEOUT);
        assert_eq!(config.refresh_interval, Duration::from_secs(840));
        assert!(config.app_key.is_empty());
    }

    #[test]
    fn debug_redacts_secrets() {
        let config = Config::builder()
            .app_id("app")
            .app_key("very-secret-key")
            .password("hunter2")
            .auth_password("auth-secret")
            .build();
        let debug = format!("{config:?}");
        assert!(debug.contains("app"));
        assert!(!debug.contains("very-secret-key"));
        assert!(!debug.contains("hunter2"));
        assert!(!debug.contains("auth-secret"));
    }

    #[test]
    fn single_gateway_overrides_all_hosts() {
        let config = Config::builder()
            .app_id("app")
            .build()
            .with_single_gateway("http://127.0.0.1:9999");
        assert_eq!(config.api_gateway, "http://127.0.0.1:9999");
        assert_eq!(config.api_gateway_v4, "http://127.0.0.1:9999");
        assert_eq!(config.auth_gateway, "http://127.0.0.1:9999");
    }
}
