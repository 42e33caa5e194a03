//! # checkout-api
//!
//! HTTP API layer for card-checkout.
//!
//! This crate provides:
//! - Axum-based HTTP server
//! - The checkout controller
//! - The composition root wiring authorizer, service and router
//!
//! ## Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | POST | `/api/v1.0/checkout/{cardnumber}` | Authorize a card: 200 `Payment accepted` or 402 `Payment unauthorized` |

pub mod handlers;
pub mod routes;
pub mod state;

pub use routes::create_router;
pub use state::{AppConfig, AppState};
