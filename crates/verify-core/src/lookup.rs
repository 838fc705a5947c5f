//! # Order Lookup Trait
//!
//! Seam between the HTTP handler and the commerce provider.
//!
//! ```text
//! ┌──────────────────────────────────────────┐
//! │          OrderLookup (trait)             │
//! │  ├── fetch_order()                       │
//! │  └── provider_name()                     │
//! └──────────────────────────────────────────┘
//!                     ▲
//!          ┌──────────┴──────────┐
//!  ┌───────┴────────┐    ┌───────┴───────┐
//!  │  LemonSqueezy  │    │  test stubs   │
//!  │  OrderLookup   │    │               │
//!  └────────────────┘    └───────────────┘
//! ```

use crate::error::VerifyResult;
use crate::order::{OrderId, OrderRecord};
use async_trait::async_trait;
use std::sync::Arc;

/// Fetches an order record from a commerce provider.
#[async_trait]
pub trait OrderLookup: Send + Sync {
    /// Fetch the order with the given ID.
    ///
    /// # Errors
    /// - `VerifyError::OrderNotFound` for any non-success upstream status
    /// - `VerifyError::Network` if the request could not complete
    /// - `VerifyError::Serialization` if the body is not JSON
    async fn fetch_order(&self, order_id: &OrderId) -> VerifyResult<OrderRecord>;

    /// Get the provider name (for logging).
    fn provider_name(&self) -> &'static str;
}

/// Type alias for a shared lookup
pub type BoxedOrderLookup = Arc<dyn OrderLookup>;
