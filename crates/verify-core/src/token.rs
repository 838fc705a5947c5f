//! # Order Tokens
//!
//! Short-lived HMAC-SHA256 tokens proving an order was confirmed paid.
//!
//! ```text
//! window  = floor(unix_secs / 3600)
//! payload = "<order_id>:<window>"
//! token   = hex(HMAC_SHA256(secret, payload))
//! ```
//!
//! A token is only reproducible inside the hour window it was minted in.
//! There is no grace period across the boundary.

use chrono::Utc;
use hmac::{Hmac, Mac};
use sha2::Sha256;
use std::fmt;
use std::sync::Arc;

type HmacSha256 = Hmac<Sha256>;

/// Environment variable holding the signing secret
pub const TOKEN_SECRET_ENV: &str = "LS_TOKEN_SECRET";

/// Secret used when `LS_TOKEN_SECRET` is unset.
///
/// SECURITY: anyone who knows this value can mint valid tokens.
pub const DEFAULT_TOKEN_SECRET: &str = "momentor-default-secret";

/// Length of one token window in seconds
pub const TOKEN_WINDOW_SECS: i64 = 3600;

/// Source of the current Unix time
pub trait Clock: Send + Sync {
    /// Seconds since the Unix epoch
    fn now_unix(&self) -> i64;
}

/// Wall clock
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_unix(&self) -> i64 {
        Utc::now().timestamp()
    }
}

/// Clock pinned to one instant
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub i64);

impl Clock for FixedClock {
    fn now_unix(&self) -> i64 {
        self.0
    }
}

/// Hour bucket for a Unix timestamp
pub fn time_window(unix_secs: i64) -> i64 {
    unix_secs.div_euclid(TOKEN_WINDOW_SECS)
}

/// Issues order tokens
#[derive(Clone)]
pub struct TokenSigner {
    secret: String,
    using_default: bool,
    clock: Arc<dyn Clock>,
}

impl TokenSigner {
    /// Create a signer with an explicit secret and the system clock
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
            using_default: false,
            clock: Arc::new(SystemClock),
        }
    }

    /// Create a signer keyed with [`DEFAULT_TOKEN_SECRET`]
    pub fn with_default_secret() -> Self {
        Self {
            secret: DEFAULT_TOKEN_SECRET.to_string(),
            using_default: true,
            clock: Arc::new(SystemClock),
        }
    }

    /// Load the secret from `LS_TOKEN_SECRET`, falling back to the default.
    ///
    /// An empty value is treated as unset.
    pub fn from_env() -> Self {
        Self::from_vars(|key| std::env::var(key).ok())
    }

    /// Same as [`TokenSigner::from_env`], reading through `vars`
    pub fn from_vars(vars: impl Fn(&str) -> Option<String>) -> Self {
        match vars(TOKEN_SECRET_ENV) {
            Some(secret) if !secret.is_empty() => Self::new(secret),
            _ => Self::with_default_secret(),
        }
    }

    /// Builder: replace the clock (for testing)
    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Arc::new(clock);
        self
    }

    /// True when signing with the built-in fallback secret
    pub fn is_using_default_secret(&self) -> bool {
        self.using_default
    }

    /// Current window according to this signer's clock
    pub fn current_window(&self) -> i64 {
        time_window(self.clock.now_unix())
    }

    /// Sign an order ID for the current window
    pub fn sign(&self, order_id: &str) -> String {
        self.sign_for_window(order_id, self.current_window())
    }

    /// Sign an order ID for an explicit window
    pub fn sign_for_window(&self, order_id: &str, window: i64) -> String {
        hex::encode(self.mac_for(order_id, window).finalize().into_bytes())
    }

    /// Check a hex token against the current window.
    ///
    /// The digest comparison is constant-time (`Mac::verify_slice`).
    pub fn verify(&self, order_id: &str, token: &str) -> bool {
        let Ok(tag) = hex::decode(token) else {
            return false;
        };
        self.mac_for(order_id, self.current_window())
            .verify_slice(&tag)
            .is_ok()
    }

    fn mac_for(&self, order_id: &str, window: i64) -> HmacSha256 {
        let mut mac = HmacSha256::new_from_slice(self.secret.as_bytes())
            .expect("HMAC can take key of any size");
        mac.update(format!("{}:{}", order_id, window).as_bytes());
        mac
    }
}

impl fmt::Debug for TokenSigner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenSigner")
            .field("secret", &"<redacted>")
            .field("using_default", &self.using_default)
            .finish()
    }
}
