use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use subtle::ConstantTimeEq;
use thiserror::Error;
use zeroize::Zeroize;

use crate::models::profile::{RideRecord, UserProfile};

/// Simulated network latency for the stubbed credential check.
pub const LOGIN_LATENCY: Duration = Duration::from_millis(1500);

/// The fixed identity accepted by the stub.
const STUB_USERNAME: &str = "safestreets";
const STUB_PASSWORD: &str = "password123";

/// An authentication failure.
#[derive(Error, Debug)]
pub enum AuthError {
    /// Credential mismatch. Recovered locally, user re-prompted.
    #[error("Invalid username or password")]
    InvalidCredentials,

    /// The credential check itself failed. Surfaced as a generic
    /// message, cause logged for diagnostics.
    #[error("Auth backend failure: {0}")]
    Backend(String),
}

/// Credential-verification capability.
///
/// The login flow is agnostic to the strategy behind this seam: the
/// stub below for the demo build, [`HttpAuthenticator`] against the
/// real backend.
#[async_trait]
pub trait Authenticator: Send + Sync {
    /// Verifies the credentials, returning the user's profile on
    /// success.
    async fn login(&self, username: &str, password: &str) -> Result<UserProfile, AuthError>;
}

/// Exact-match check against a single fixed identity, with simulated
/// network latency. Placeholder for a real backend call.
pub struct StubAuthenticator {
    latency: Duration,
}

impl StubAuthenticator {
    pub fn new(latency: Duration) -> Self {
        Self { latency }
    }
}

impl Default for StubAuthenticator {
    fn default() -> Self {
        Self::new(LOGIN_LATENCY)
    }
}

#[async_trait]
impl Authenticator for StubAuthenticator {
    async fn login(&self, username: &str, password: &str) -> Result<UserProfile, AuthError> {
        tokio::time::sleep(self.latency).await;

        let mut password_bytes = password.as_bytes().to_vec();
        let username_ok: bool = username.as_bytes().ct_eq(STUB_USERNAME.as_bytes()).into();
        let password_ok: bool = password_bytes.ct_eq(STUB_PASSWORD.as_bytes()).into();
        password_bytes.zeroize();

        if username_ok && password_ok {
            tracing::debug!("✅ Stub credentials accepted for {}", username);
            Ok(demo_profile())
        } else {
            Err(AuthError::InvalidCredentials)
        }
    }
}

/// The canned profile returned by the stub.
fn demo_profile() -> UserProfile {
    UserProfile {
        first_name: Some("Asha".to_string()),
        profile_photo: None,
        ride_history: vec![
            RideRecord {
                start: "Indiranagar".to_string(),
                end: "Koramangala".to_string(),
                date: "12 Mar 2025".to_string(),
            },
            RideRecord {
                start: "MG Road".to_string(),
                end: "Whitefield".to_string(),
                date: "28 Feb 2025".to_string(),
            },
            RideRecord {
                start: "HSR Layout".to_string(),
                end: "Electronic City".to_string(),
                date: "15 Feb 2025".to_string(),
            },
        ],
    }
}

/// Authenticates against the real SafeStreets backend.
///
/// Posts the credentials to `POST /api/login` and hydrates the profile
/// from `GET /api/user_data/<username>`.
pub struct HttpAuthenticator {
    client: reqwest::Client,
    base_url: String,
}

#[derive(Serialize)]
struct BackendLoginRequest<'a> {
    // The backend keys login on the account email; the form's username
    // field carries it.
    email: &'a str,
    password: &'a str,
}

#[derive(Deserialize)]
struct BackendLoginResponse {
    #[serde(default)]
    username: Option<String>,
}

#[derive(Deserialize)]
struct BackendUserDataResponse {
    user: BackendUser,
}

#[derive(Deserialize)]
struct BackendUser {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    ride_history: Vec<RideRecord>,
}

impl HttpAuthenticator {
    /// Creates an authenticator against `base_url`.
    pub fn new(base_url: String) -> Result<Self, AuthError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(10))
            .build()
            .map_err(|e| AuthError::Backend(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }
}

#[async_trait]
impl Authenticator for HttpAuthenticator {
    async fn login(&self, username: &str, password: &str) -> Result<UserProfile, AuthError> {
        let response = self
            .client
            .post(format!("{}/api/login", self.base_url))
            .json(&BackendLoginRequest {
                email: username,
                password,
            })
            .send()
            .await
            .map_err(|e| AuthError::Backend(format!("login request failed: {}", e)))?;

        if response.status() == reqwest::StatusCode::UNAUTHORIZED {
            return Err(AuthError::InvalidCredentials);
        }
        if !response.status().is_success() {
            return Err(AuthError::Backend(format!(
                "login returned {}",
                response.status()
            )));
        }

        let login: BackendLoginResponse = response
            .json()
            .await
            .map_err(|e| AuthError::Backend(format!("malformed login response: {}", e)))?;
        let account = login.username.unwrap_or_else(|| username.to_string());

        // A failed profile fetch is not a failed login; fall back to a
        // bare profile and let the renderer use its placeholders.
        let response = self
            .client
            .get(format!("{}/api/user_data/{}", self.base_url, account))
            .send()
            .await
            .map_err(|e| AuthError::Backend(format!("user_data request failed: {}", e)))?;

        if !response.status().is_success() {
            tracing::warn!(
                "⚠️ user_data returned {} for {}, using bare profile",
                response.status(),
                account
            );
            return Ok(UserProfile {
                first_name: Some(account),
                ..UserProfile::default()
            });
        }

        let data: BackendUserDataResponse = response
            .json()
            .await
            .map_err(|e| AuthError::Backend(format!("malformed user_data response: {}", e)))?;

        Ok(UserProfile {
            first_name: data.user.name,
            profile_photo: None,
            ride_history: data.user.ride_history,
        })
    }
}
