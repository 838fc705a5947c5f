//! # verify-api
//!
//! HTTP API layer for order-verify-rs.
//!
//! This crate provides:
//! - Axum-based HTTP server
//! - The order verification endpoint
//! - Startup wiring from environment configuration
//!
//! ## Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | GET | `/health` | Health check |
//! | POST | `/api/verify-order` | Verify a LemonSqueezy order, return a token |

pub mod handlers;
pub mod routes;
pub mod state;

pub use routes::create_router;
pub use state::{AppConfig, AppState};
