//! # checkout-core
//!
//! Core types and traits for card-checkout.
//!
//! This crate provides:
//! - `CardAuthorizer` trait for implementing authorization mechanisms
//! - `AlwaysAuthorize` and `RuleBasedAuthorizer` local authorizers
//! - `CheckoutService`, which owns the checkout decision
//! - `CardNumber` and `CheckoutError`
//!
//! ## Example
//!
//! ```rust,ignore
//! use checkout_core::{AlwaysAuthorize, CardNumber, CheckoutService};
//! use std::sync::Arc;
//!
//! let service = CheckoutService::new(Arc::new(AlwaysAuthorize));
//! let authorized = service.checkout(&CardNumber::new("4111111111111111")).await?;
//! ```

pub mod authorizer;
pub mod card;
pub mod error;
pub mod service;

// Re-exports for convenience
pub use authorizer::{
    AlwaysAuthorize, AuthorizationRules, AuthorizerKind, BoxedCardAuthorizer, CardAuthorizer,
    RuleBasedAuthorizer,
};
pub use card::CardNumber;
pub use error::{CheckoutError, CheckoutResult};
pub use service::CheckoutService;
