//! # Gateway Authorizer
//!
//! `CardAuthorizer` backed by a remote authorization gateway over HTTPS.
//!
//! One request per `authorize` call, never retried. Failures to reach the
//! gateway surface as `CheckoutError::AuthorizerUnavailable`, distinct from a
//! decline.

use crate::config::GatewayConfig;
use async_trait::async_trait;
use checkout_core::{CardAuthorizer, CardNumber, CheckoutError, CheckoutResult};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, instrument};
use uuid::Uuid;

const PROVIDER: &str = "gateway";

/// Remote authorization gateway client
pub struct GatewayAuthorizer {
    config: GatewayConfig,
    client: Client,
}

impl GatewayAuthorizer {
    /// Create a new gateway authorizer
    pub fn new(config: GatewayConfig) -> CheckoutResult<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| {
                CheckoutError::Configuration(format!("Failed to create HTTP client: {}", e))
            })?;

        Ok(Self { config, client })
    }

    /// Create from environment variables
    pub fn from_env() -> CheckoutResult<Self> {
        let config = GatewayConfig::from_env()?;
        Self::new(config)
    }
}

#[async_trait]
impl CardAuthorizer for GatewayAuthorizer {
    #[instrument(skip(self, card), fields(card = %card))]
    async fn authorize(&self, card: &CardNumber) -> CheckoutResult<bool> {
        let idempotency_key = Uuid::new_v4().to_string();
        let url = self.config.authorizations_url();

        debug!("Requesting authorization: idempotency_key={}", idempotency_key);

        let response = self
            .client
            .post(&url)
            .header("Authorization", self.config.auth_header())
            .header("Idempotency-Key", &idempotency_key)
            .json(&AuthorizationRequest {
                card_number: card.as_str(),
            })
            .send()
            .await
            .map_err(|e| {
                error!("Authorization gateway unreachable: {}", e);
                CheckoutError::AuthorizerUnavailable(e.to_string())
            })?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| {
                error!("Authorization gateway response unreadable: {}", e);
                CheckoutError::AuthorizerUnavailable(e.to_string())
            })?;

        if !status.is_success() {
            error!("Authorization gateway error: status={}, body={}", status, body);

            if let Ok(error_response) = serde_json::from_str::<GatewayErrorResponse>(&body) {
                return Err(CheckoutError::Provider {
                    provider: PROVIDER.to_string(),
                    message: error_response.error.message,
                });
            }

            return Err(CheckoutError::Provider {
                provider: PROVIDER.to_string(),
                message: format!("HTTP {}: {}", status, body),
            });
        }

        let decision: AuthorizationResponse = serde_json::from_str(&body).map_err(|e| {
            error!("Authorization gateway sent an unparseable body: {}", e);
            CheckoutError::InvalidResponse(format!("Failed to parse gateway response: {}", e))
        })?;

        info!("Gateway decision: authorized={}", decision.authorized);

        Ok(decision.authorized)
    }

    fn name(&self) -> &'static str {
        PROVIDER
    }
}

// =============================================================================
// Gateway API Types
// =============================================================================

#[derive(Debug, Serialize)]
struct AuthorizationRequest<'a> {
    card_number: &'a str,
}

#[derive(Debug, Deserialize)]
struct AuthorizationResponse {
    authorized: bool,
}

#[derive(Debug, Deserialize)]
struct GatewayErrorResponse {
    error: GatewayError,
}

#[derive(Debug, Deserialize)]
struct GatewayError {
    message: String,
}
