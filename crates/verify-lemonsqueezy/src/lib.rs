//! # verify-lemonsqueezy
//!
//! LemonSqueezy order lookup for order-verify-rs.
//!
//! Implements [`verify_core::OrderLookup`] over the LemonSqueezy REST API
//! (`GET /v1/orders/{id}`, JSON:API media type, bearer auth).
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use verify_core::{OrderId, OrderLookup};
//! use verify_lemonsqueezy::LemonSqueezyOrderLookup;
//!
//! // Requires LS_API_KEY
//! let lookup = LemonSqueezyOrderLookup::from_env()?;
//!
//! let record = lookup.fetch_order(&OrderId::new("123456").unwrap()).await?;
//! if record.is_paid() {
//!     // issue a token
//! }
//! ```

pub mod config;
pub mod orders;

// Re-exports
pub use config::{LemonSqueezyConfig, DEFAULT_API_BASE_URL, JSON_API_MEDIA_TYPE};
pub use orders::LemonSqueezyOrderLookup;
