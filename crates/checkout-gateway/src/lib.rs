//! # checkout-gateway
//!
//! Remote card authorization for card-checkout.
//!
//! `GatewayAuthorizer` implements `CardAuthorizer` by calling an external
//! authorization gateway:
//!
//! ```text
//! POST {GATEWAY_URL}/v1/authorizations
//! Authorization: Bearer {GATEWAY_API_KEY}
//! Idempotency-Key: <uuid v4>
//!
//! {"card_number": "4111111111111111"}  ->  {"authorized": true}
//! ```
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use checkout_gateway::GatewayAuthorizer;
//! use checkout_core::CheckoutService;
//! use std::sync::Arc;
//!
//! let authorizer = GatewayAuthorizer::from_env()?;
//! let service = CheckoutService::new(Arc::new(authorizer));
//! ```

pub mod authorizer;
pub mod config;

// Re-exports
pub use authorizer::GatewayAuthorizer;
pub use config::GatewayConfig;
