//! Platform token lifecycle.
//!
//! V4 calls authenticate with a platform token that expires after roughly
//! fifteen minutes. A background task owned through [`TokenRefresher`] logs in
//! again on a fixed cadence and swaps the token in place. Readers always get a
//! complete value: either the previous token or the new one.

use core::fmt;
use std::{
    sync::{
        Arc,
        atomic::{AtomicBool, Ordering},
    },
    time::Duration,
};

use log::{debug, info, warn};
use serde::Serialize;
use tokio::{sync::watch, task::JoinHandle};
use tokio_util::sync::CancellationToken;

use crate::{
    YunHeTong,
    error::YunHeTongRequestError,
    internal::{Endpoint, HttpMethod, LOGIN_PATH},
    response::{BaseResponse, Envelope},
};

/// Shared slot holding the current platform token.
///
/// Written only by refreshes, read by every V4 call.
#[derive(Clone)]
pub struct TokenStore {
    tx: Arc<watch::Sender<String>>,
    refresher_running: Arc<AtomicBool>,
}

impl TokenStore {
    pub fn new() -> Self {
        let (tx, _) = watch::channel(String::new());
        Self {
            tx: Arc::new(tx),
            refresher_running: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Current token, empty until the first successful refresh.
    pub fn current(&self) -> String {
        self.tx.borrow().clone()
    }

    /// Receiver that observes every replacement of the token.
    pub fn subscribe(&self) -> watch::Receiver<String> {
        self.tx.subscribe()
    }

    pub(crate) fn replace(&self, token: String) {
        self.tx.send_replace(token);
    }
}

impl Default for TokenStore {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for TokenStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenStore")
            .field("token", &"[REDACTED]")
            .field(
                "refresher_running",
                &self.refresher_running.load(Ordering::SeqCst),
            )
            .finish()
    }
}

/// Login request; without a signer it yields the platform token.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct LoginRequest<'a> {
    app_id: &'a str,
    app_key: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    signer_id: Option<&'a str>,
}

/// Outcome of a login: the envelope plus the token taken from the response header.
#[derive(Clone)]
pub struct LoginResponse {
    pub response: BaseResponse,
    pub token: String,
}

impl fmt::Debug for LoginResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginResponse")
            .field("response", &self.response)
            .field("token", &"[REDACTED]")
            .finish()
    }
}

impl YunHeTong {
    /// Logs in as the application, or as `signer_id` when given.
    pub(crate) async fn login(
        &self,
        signer_id: Option<&str>,
    ) -> Result<LoginResponse, YunHeTongRequestError> {
        let request = LoginRequest {
            app_id: &self.config.app_id,
            app_key: &self.config.app_key,
            signer_id,
        };

        self.throttle().await;
        let reply = self
            .helper
            .request_json(&Endpoint::new(LOGIN_PATH, HttpMethod::Post), &request, None)
            .await?;

        let response = BaseResponse::parse(&reply.body)?;
        let token = reply
            .token
            .filter(|t| !t.is_empty())
            .ok_or(YunHeTongRequestError::MissingToken)?;

        Ok(LoginResponse { response, token })
    }

    /// Performs one platform token refresh right now.
    ///
    /// On failure the previous token stays in place.
    pub async fn refresh_platform_token(&self) -> Result<(), YunHeTongRequestError> {
        let login = self.login(None).await?;
        self.tokens.replace(login.token);
        debug!("platform token refreshed");
        Ok(())
    }

    /// Current platform token, empty before the first successful refresh.
    pub fn platform_token(&self) -> String {
        self.tokens.current()
    }

    /// Observes platform token replacements.
    pub fn watch_platform_token(&self) -> watch::Receiver<String> {
        self.tokens.subscribe()
    }

    /// Spawns the background refresh loop on the current tokio runtime.
    ///
    /// The first refresh starts immediately but is not awaited, so V4 calls
    /// issued right after this returns may still go out without a token.
    /// Only one refresher may run per client; a second call fails until the
    /// first loop has exited.
    pub fn start_token_refresh(&self) -> Result<TokenRefresher, YunHeTongRequestError> {
        if self.tokens.refresher_running.swap(true, Ordering::SeqCst) {
            return Err(YunHeTongRequestError::RefreshAlreadyRunning);
        }

        let guard = RunningGuard(Arc::clone(&self.tokens.refresher_running));
        let cancel = CancellationToken::new();
        let interval = self.config.refresh_interval;
        let client = self.clone();
        let loop_cancel = cancel.clone();
        let handle = tokio::spawn(async move {
            let _guard = guard;
            refresh_loop(client, interval, loop_cancel).await;
        });
        info!("platform token refresher started, interval {interval:?}");

        Ok(TokenRefresher {
            cancel,
            handle: Some(handle),
        })
    }
}

/// Refreshes, sleeps, repeats. Attempts never overlap and failures only get logged.
async fn refresh_loop(client: YunHeTong, interval: Duration, cancel: CancellationToken) {
    loop {
        tokio::select! {
            biased;
            () = cancel.cancelled() => break,
            result = client.refresh_platform_token() => {
                if let Err(e) = result {
                    warn!("platform token refresh failed, keeping previous token: {e}");
                }
            }
        }

        tokio::select! {
            biased;
            () = cancel.cancelled() => break,
            () = tokio::time::sleep(interval) => {}
        }
    }
    debug!("platform token refresh loop exited");
}

/// Releases the once-only guard when the refresh task's future goes away,
/// whether it returned, was aborted or panicked.
struct RunningGuard(Arc<AtomicBool>);

impl Drop for RunningGuard {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

/// Handle of the background refresh task.
///
/// Dropping the handle cancels the task without waiting for it; a new
/// refresher can only start once the old loop has exited.
/// [`TokenRefresher::stop`] cancels and waits, so a restart right after it
/// always succeeds.
#[derive(Debug)]
pub struct TokenRefresher {
    cancel: CancellationToken,
    handle: Option<JoinHandle<()>>,
}

impl TokenRefresher {
    /// Cancels the loop and waits until it has exited.
    pub async fn stop(mut self) {
        self.cancel.cancel();
        if let Some(handle) = self.handle.take() {
            if let Err(e) = handle.await {
                warn!("platform token refresher ended abnormally: {e}");
            }
        }
        info!("platform token refresher stopped");
    }

    pub fn is_running(&self) -> bool {
        self.handle.as_ref().is_some_and(|h| !h.is_finished())
    }
}

impl Drop for TokenRefresher {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn store_starts_empty_and_replaces_whole_values() {
        let store = TokenStore::new();
        assert_eq!(store.current(), "");

        let mut rx = store.subscribe();
        store.replace("t-1".to_string());
        assert_eq!(store.current(), "t-1");
        assert!(rx.has_changed().unwrap());
        assert_eq!(*rx.borrow_and_update(), "t-1");

        store.replace("t-2".to_string());
        assert_eq!(store.clone().current(), "t-2");
    }

    #[test]
    fn store_debug_hides_token() {
        let store = TokenStore::new();
        store.replace("secret-token".to_string());
        assert!(!format!("{store:?}").contains("secret-token"));
    }

    #[test]
    fn running_guard_clears_flag_on_drop() {
        let flag = Arc::new(AtomicBool::new(true));
        drop(RunningGuard(Arc::clone(&flag)));
        assert!(!flag.load(Ordering::SeqCst));
    }

    #[test]
    fn login_request_omits_missing_signer() {
        let request = LoginRequest {
            app_id: "app",
            app_key: "key",
            signer_id: None,
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json, serde_json::json!({"appId": "app", "appKey": "key"}));
    }
}
