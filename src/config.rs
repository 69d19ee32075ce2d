use std::env;
use std::net::SocketAddr;

use anyhow::{Context, Result};

/// The application's configuration.
#[derive(Clone)]
pub struct Config {
    /// The address the server binds to.
    pub bind_addr: SocketAddr,
    /// Base URL of the real authentication backend. When unset the
    /// stubbed authenticator is used instead.
    pub backend_url: Option<String>,
}

impl Config {
    /// Creates a new `Config` from environment variables.
    ///
    /// # Returns
    ///
    /// A `Result` containing the `Config`.
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            bind_addr: env::var("BIND_ADDR")
                .unwrap_or_else(|_| "127.0.0.1:3000".to_string())
                .parse()
                .context("BIND_ADDR must be a valid socket address")?,
            backend_url: env::var("BACKEND_URL").ok().filter(|url| !url.is_empty()),
        })
    }
}
