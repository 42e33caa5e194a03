//! # Checkout Error Types
//!
//! Typed error handling for card authorization.
//!
//! A declined card is NOT an error: authorizers return `Ok(false)` for that.
//! These variants only cover the cases where no decision could be obtained.

use thiserror::Error;

/// Error raised when an authorizer cannot produce a decision
#[derive(Debug, Error)]
pub enum CheckoutError {
    /// Invalid startup configuration (unknown authorizer, missing keys)
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Transport failure or timeout while reaching the authorizer
    #[error("Authorizer unavailable: {0}")]
    AuthorizerUnavailable(String),

    /// Authorization provider answered with a failure status
    #[error("Provider error [{provider}]: {message}")]
    Provider { provider: String, message: String },

    /// Authorization provider answered with a body we could not read
    #[error("Invalid authorizer response: {0}")]
    InvalidResponse(String),
}

impl CheckoutError {
    /// Returns the HTTP status code appropriate for this error
    pub fn status_code(&self) -> u16 {
        match self {
            CheckoutError::Configuration(_) => 500,
            CheckoutError::AuthorizerUnavailable(_) => 503,
            CheckoutError::Provider { .. } => 502,
            CheckoutError::InvalidResponse(_) => 502,
        }
    }
}

/// Result type alias for authorization operations
pub type CheckoutResult<T> = Result<T, CheckoutError>;
