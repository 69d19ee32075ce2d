use std::time::Duration;

use crate::{
    error::AppError,
    models::session::SessionRecord,
    routes,
    services::auth::{AuthError, Authenticator},
    services::status::{StatusBanner, StatusLevel},
    session::store::SessionStore,
    validation::auth::validate_credentials,
};

/// Pause between the success banner and the dashboard redirect, for
/// user-perceptible feedback.
pub const SUCCESS_REDIRECT_DELAY: Duration = Duration::from_millis(1500);

pub const MSG_LOGGING_IN: &str = "Logging in...";
pub const MSG_SUCCESS: &str = "Login successful! Redirecting...";
pub const MSG_INVALID_CREDENTIALS: &str = "Invalid username or password. Please try again.";
pub const MSG_UNEXPECTED: &str = "Something went wrong. Please try again later.";

/// Where a login submission leaves the user.
#[derive(Debug, Clone, PartialEq)]
pub enum LoginOutcome {
    /// Stay on the login form; the banner explains why.
    Stay,
    /// Session written; navigate to `to` after `delay`.
    Navigate { to: &'static str, delay: Duration },
}

/// The login form lifecycle: entry guard, credential check through the
/// [`Authenticator`] seam, status transitions, session write on
/// success.
///
/// Errors are terminal here — nothing propagates past this component
/// except through the session store's state.
pub struct LoginFlow<'a, S: SessionStore> {
    authenticator: &'a dyn Authenticator,
    store: &'a S,
    banner: StatusBanner,
}

impl<'a, S: SessionStore> LoginFlow<'a, S> {
    pub fn new(authenticator: &'a dyn Authenticator, store: &'a S) -> Self {
        Self {
            authenticator,
            store,
            banner: StatusBanner::new(),
        }
    }

    /// The status display backing this flow.
    pub fn banner(&self) -> &StatusBanner {
        &self.banner
    }

    /// Handles one form submission.
    pub async fn submit(&self, username: &str, password: &str) -> LoginOutcome {
        let username = username.trim();
        let password = password.trim();

        if let Err(AppError::Validation(msg)) = validate_credentials(username, password) {
            self.banner.show(StatusLevel::Error, msg).await;
            return LoginOutcome::Stay;
        }

        self.banner.show(StatusLevel::Info, MSG_LOGGING_IN).await;

        match self.authenticator.login(username, password).await {
            Ok(profile) => {
                let record = SessionRecord {
                    username: username.to_string(),
                    profile,
                };
                if let Err(e) = self.store.set(&record) {
                    tracing::error!("❌ Failed to persist session: {}", e);
                    self.banner.show(StatusLevel::Error, MSG_UNEXPECTED).await;
                    return LoginOutcome::Stay;
                }

                tracing::info!("✅ User logged in: {}", record.username);
                self.banner.show(StatusLevel::Success, MSG_SUCCESS).await;
                LoginOutcome::Navigate {
                    to: routes::DASHBOARD_PATH,
                    delay: SUCCESS_REDIRECT_DELAY,
                }
            }
            Err(AuthError::InvalidCredentials) => {
                tracing::warn!("❌ Invalid credentials for {}", username);
                self.banner
                    .show(StatusLevel::Error, MSG_INVALID_CREDENTIALS)
                    .await;
                LoginOutcome::Stay
            }
            Err(e) => {
                tracing::error!("❌ Credential check failed: {}", e);
                self.banner.show(StatusLevel::Error, MSG_UNEXPECTED).await;
                LoginOutcome::Stay
            }
        }
    }
}
