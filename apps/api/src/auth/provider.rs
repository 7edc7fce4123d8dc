use std::time::Duration;

use anyhow::Result;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, warn};

use crate::config::AuthProviderConfig;
use crate::errors::AppError;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

/// REST client for the hosted auth provider.
#[derive(Clone)]
pub struct AuthProvider {
    client: Client,
    config: AuthProviderConfig,
}

impl AuthProvider {
    pub fn new(config: AuthProviderConfig) -> Result<Self> {
        Ok(Self {
            client: Client::builder().timeout(Duration::from_secs(15)).build()?,
            config,
        })
    }

    pub fn signup_url(&self) -> String {
        format!("{}/auth/v1/signup", self.config.url)
    }

    pub fn signin_url(&self) -> String {
        format!("{}/auth/v1/token?grant_type=password", self.config.url)
    }

    pub async fn sign_up(&self, credentials: &Credentials) -> Result<Value, AppError> {
        self.post(&self.signup_url(), credentials).await
    }

    /// Returns the provider's session (access token, refresh token, user).
    pub async fn sign_in(&self, credentials: &Credentials) -> Result<Value, AppError> {
        self.post(&self.signin_url(), credentials).await
    }

    async fn post(&self, url: &str, credentials: &Credentials) -> Result<Value, AppError> {
        let response = self
            .client
            .post(url)
            .header("apikey", &self.config.api_key)
            .json(credentials)
            .send()
            .await
            .map_err(|e| AppError::Upstream {
                status: 502,
                message: format!("Auth provider unreachable: {e}"),
            })?;

        let status = response.status();
        let bytes = response.bytes().await.map_err(|e| AppError::Upstream {
            status: 502,
            message: format!("Auth provider response interrupted: {e}"),
        })?;

        let body = read_reply(status, &bytes)?;
        debug!("Auth provider call to {url} succeeded");
        Ok(body)
    }
}

/// Maps a provider reply to the session body or an upstream error.
///
/// A success status with a body that is not JSON is an error, never a null session.
fn read_reply(status: StatusCode, bytes: &[u8]) -> Result<Value, AppError> {
    let parsed = serde_json::from_slice::<Value>(bytes);

    if !status.is_success() {
        let message = parsed
            .ok()
            .as_ref()
            .and_then(provider_message)
            .unwrap_or_else(|| format!("Auth provider returned {status}"));
        warn!("Auth provider rejected request: {status} {message}");
        return Err(AppError::Upstream {
            status: status.as_u16(),
            message,
        });
    }

    parsed.map_err(|e| {
        warn!("Auth provider sent an unreadable {status} body: {e}");
        AppError::Upstream {
            status: 502,
            message: "Auth provider returned an unreadable response".to_string(),
        }
    })
}

/// Providers disagree on where the human-readable message goes.
fn provider_message(body: &Value) -> Option<String> {
    ["msg", "error_description", "message", "error"]
        .iter()
        .find_map(|key| body.get(*key).and_then(Value::as_str))
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn provider() -> AuthProvider {
        AuthProvider::new(AuthProviderConfig {
            url: "https://project.example.co".into(),
            api_key: "anon".into(),
        })
        .unwrap()
    }

    #[test]
    fn test_urls() {
        let p = provider();
        assert_eq!(p.signup_url(), "https://project.example.co/auth/v1/signup");
        assert_eq!(
            p.signin_url(),
            "https://project.example.co/auth/v1/token?grant_type=password"
        );
    }

    #[test]
    fn test_provider_message_keys() {
        assert_eq!(
            provider_message(&json!({"msg": "User already registered"})).as_deref(),
            Some("User already registered")
        );
        assert_eq!(
            provider_message(&json!({"error": "invalid_grant", "error_description": "Invalid login credentials"}))
                .as_deref(),
            Some("Invalid login credentials")
        );
        assert_eq!(provider_message(&json!({"code": 500})), None);
    }

    #[test]
    fn test_read_reply_success() {
        let body = read_reply(StatusCode::OK, br#"{"access_token": "abc"}"#).unwrap();
        assert_eq!(body["access_token"], "abc");
    }

    #[test]
    fn test_read_reply_unreadable_success_is_upstream_error() {
        for bytes in [&b"<html>gateway</html>"[..], &b""[..]] {
            match read_reply(StatusCode::OK, bytes) {
                Err(AppError::Upstream { status, message }) => {
                    assert_eq!(status, 502);
                    assert_eq!(message, "Auth provider returned an unreadable response");
                }
                other => panic!("expected upstream error, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_read_reply_passes_provider_message() {
        match read_reply(StatusCode::BAD_REQUEST, br#"{"msg": "User already registered"}"#) {
            Err(AppError::Upstream { status, message }) => {
                assert_eq!(status, 400);
                assert_eq!(message, "User already registered");
            }
            other => panic!("expected upstream error, got {other:?}"),
        }
        match read_reply(StatusCode::BAD_GATEWAY, b"oops") {
            Err(AppError::Upstream { message, .. }) => {
                assert_eq!(message, "Auth provider returned 502 Bad Gateway");
            }
            other => panic!("expected upstream error, got {other:?}"),
        }
    }
}
