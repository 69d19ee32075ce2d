use std::sync::Arc;

use crate::{
    config::Config,
    error::{AppError, Result},
    services::auth::{Authenticator, HttpAuthenticator, StubAuthenticator},
};

/// The application's state.
#[derive(Clone)]
pub struct AppState {
    /// The application's configuration.
    pub config: Config,
    /// The credential-verification strategy.
    pub authenticator: Arc<dyn Authenticator>,
}

impl AppState {
    /// Creates a new `AppState`, picking the authenticator from the
    /// configuration.
    ///
    /// # Arguments
    ///
    /// * `config` - The application's configuration.
    ///
    /// # Returns
    ///
    /// A `Result` containing the `AppState`.
    pub fn new(config: &Config) -> Result<Self> {
        let authenticator: Arc<dyn Authenticator> = match &config.backend_url {
            Some(url) => {
                tracing::info!("✅ Authenticating against backend at {}", url);
                Arc::new(
                    HttpAuthenticator::new(url.clone())
                        .map_err(|e| AppError::Internal(e.to_string()))?,
                )
            }
            None => {
                tracing::info!("✅ Using the stubbed authenticator");
                Arc::new(StubAuthenticator::default())
            }
        };

        Ok(Self {
            config: config.clone(),
            authenticator,
        })
    }

    /// Builds state around an explicit authenticator (tests, embedding).
    pub fn with_authenticator(config: Config, authenticator: Arc<dyn Authenticator>) -> Self {
        Self {
            config,
            authenticator,
        }
    }
}
