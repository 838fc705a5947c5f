//! # Application State
//!
//! Shared state for the Axum application.
//! Contains the order lookup, the token signer, and configuration.
//! Handlers only read from here; nothing touches the environment per request.

use std::sync::Arc;
use verify_core::{BoxedOrderLookup, TokenSigner, VerifyError};
use verify_lemonsqueezy::LemonSqueezyOrderLookup;

/// Application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Host to bind to
    pub host: String,
    /// Port to listen on
    pub port: u16,
    /// Environment (development, staging, production)
    pub environment: String,
}

impl AppConfig {
    /// Load from environment variables
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        Self {
            host: std::env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            port: std::env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8080),
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string()),
        }
    }

    /// Get the socket address to bind to
    pub fn socket_addr(&self) -> anyhow::Result<std::net::SocketAddr> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|e| {
                anyhow::anyhow!("Invalid socket address {}:{}: {}", self.host, self.port, e)
            })
    }

    /// Check if running in production
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
            environment: "development".to_string(),
        }
    }
}

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Order lookup; `None` when `LS_API_KEY` is missing
    pub lookup: Option<BoxedOrderLookup>,
    /// Token signer
    pub signer: TokenSigner,
    /// Application config
    pub config: AppConfig,
}

impl AppState {
    /// Create a new AppState from the environment.
    ///
    /// A missing `LS_API_KEY` does not stop the server; every verification
    /// request then answers with a configuration error.
    pub fn new() -> anyhow::Result<Self> {
        let config = AppConfig::from_env();
        Self::from_vars(config, |key| std::env::var(key).ok())
    }

    /// Build state with secrets and provider settings read through `vars`
    pub fn from_vars(
        config: AppConfig,
        vars: impl Fn(&str) -> Option<String>,
    ) -> anyhow::Result<Self> {
        let signer = TokenSigner::from_vars(&vars);

        let lookup = match LemonSqueezyOrderLookup::from_vars(&vars) {
            Ok(lookup) => {
                tracing::info!("LemonSqueezy API: {}", lookup.api_base_url());
                Some(Arc::new(lookup) as BoxedOrderLookup)
            }
            Err(e @ VerifyError::MissingCredential(_)) => {
                tracing::error!("{}; order verification will fail until it is configured", e);
                None
            }
            Err(e) => return Err(anyhow::anyhow!("Failed to initialize LemonSqueezy: {}", e)),
        };

        if signer.is_using_default_secret() {
            // Predictable signing key: tokens can be forged by anyone who reads the source.
            tracing::warn!(
                "{} not set, signing tokens with the built-in default secret",
                verify_core::TOKEN_SECRET_ENV
            );
        }

        Ok(Self::with_parts(config, signer, lookup))
    }

    /// Assemble state from explicit parts (for testing)
    pub fn with_parts(
        config: AppConfig,
        signer: TokenSigner,
        lookup: Option<BoxedOrderLookup>,
    ) -> Self {
        Self {
            lookup,
            signer,
            config,
        }
    }

    /// Name of the configured provider, if any
    pub fn provider_name(&self) -> Option<&'static str> {
        self.lookup.as_ref().map(|l| l.provider_name())
    }
}
