//! # verify-core
//!
//! Core types and traits for order verification.
//!
//! This crate provides:
//! - `OrderId` and `OrderRecord` for the order being verified
//! - `OrderLookup` trait for implementing commerce providers
//! - `TokenSigner` for issuing hour-windowed HMAC tokens
//! - `VerifyError` for typed error handling
//!
//! ## Example
//!
//! ```rust,ignore
//! use verify_core::{OrderId, OrderLookup, TokenSigner};
//!
//! let order_id = OrderId::new("123456").unwrap();
//! let record = lookup.fetch_order(&order_id).await?;
//!
//! if record.is_paid() {
//!     let token = TokenSigner::from_env().sign(order_id.as_str());
//! }
//! ```

pub mod error;
pub mod lookup;
pub mod order;
pub mod token;

// Re-exports for convenience
pub use error::{VerifyError, VerifyResult};
pub use lookup::{BoxedOrderLookup, OrderLookup};
pub use order::{OrderId, OrderRecord, OrderStatus};
pub use token::{
    time_window, Clock, FixedClock, SystemClock, TokenSigner, DEFAULT_TOKEN_SECRET,
    TOKEN_SECRET_ENV, TOKEN_WINDOW_SECS,
};
