//! # Verification Error Types
//!
//! Typed error handling for order verification.
//! All verification operations return `Result<T, VerifyError>`.
//!
//! `Display` carries internal detail for logs. Callers see only
//! [`VerifyError::public_message`].

use thiserror::Error;

/// Core error type for all verification operations
#[derive(Debug, Error)]
pub enum VerifyError {
    /// Request used a method other than POST
    #[error("Method not allowed")]
    MethodNotAllowed,

    /// Request body had no usable `orderId`
    #[error("Missing orderId")]
    MissingOrderId,

    /// A required credential is not configured
    #[error("{0} not set")]
    MissingCredential(&'static str),

    /// Configuration errors (bad base URL, bad timeout)
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Upstream lookup answered with a non-success status.
    /// Covers 404 as well as auth failures and upstream 5xx.
    #[error("Order not found (upstream status {status})")]
    OrderNotFound { status: u16 },

    /// Order exists but its status is not `paid`
    #[error("Order status: {status}")]
    OrderNotPaid { status: String },

    /// Network/HTTP error talking to the provider
    #[error("Network error: {0}")]
    Network(String),

    /// Upstream body could not be parsed
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl VerifyError {
    /// Returns the HTTP status code appropriate for this error
    pub fn status_code(&self) -> u16 {
        match self {
            VerifyError::MethodNotAllowed => 405,
            VerifyError::MissingOrderId => 400,
            VerifyError::MissingCredential(_) => 500,
            VerifyError::Configuration(_) => 500,
            VerifyError::OrderNotFound { .. } => 403,
            VerifyError::OrderNotPaid { .. } => 403,
            VerifyError::Network(_) => 500,
            VerifyError::Serialization(_) => 500,
        }
    }

    /// Message safe to return to the caller
    pub fn public_message(&self) -> String {
        match self {
            VerifyError::MethodNotAllowed => "Method not allowed".to_string(),
            VerifyError::MissingOrderId => "Missing orderId".to_string(),
            VerifyError::MissingCredential(_) | VerifyError::Configuration(_) => {
                "Server configuration error".to_string()
            }
            VerifyError::OrderNotFound { .. } => "Order not found".to_string(),
            VerifyError::OrderNotPaid { status } => format!("Order status: {}", status),
            VerifyError::Network(_) | VerifyError::Serialization(_) => {
                "Verification failed".to_string()
            }
        }
    }

    /// Returns true if this error should be logged at error level.
    /// Rejections of the caller's order are expected outcomes, not faults.
    pub fn is_server_fault(&self) -> bool {
        self.status_code() >= 500
    }
}

/// Result type alias for verification operations
pub type VerifyResult<T> = Result<T, VerifyError>;
