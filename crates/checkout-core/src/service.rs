//! # Checkout Service
//!
//! Owns the checkout decision. Today that decision is entirely the injected
//! authorizer's; business rules beyond "ask the authorizer" belong here.

use crate::authorizer::BoxedCardAuthorizer;
use crate::card::CardNumber;
use crate::error::CheckoutResult;
use tracing::{debug, info, instrument};

/// Orchestrates a checkout by consulting a [`CardAuthorizer`](crate::CardAuthorizer)
#[derive(Clone)]
pub struct CheckoutService {
    authorizer: BoxedCardAuthorizer,
}

impl CheckoutService {
    pub fn new(authorizer: BoxedCardAuthorizer) -> Self {
        Self { authorizer }
    }

    /// Name of the injected authorizer
    pub fn authorizer_name(&self) -> &'static str {
        self.authorizer.name()
    }

    /// Run a checkout for `card`.
    ///
    /// The card is forwarded unchanged and the authorizer's answer, or its
    /// error, is returned as is.
    #[instrument(skip(self, card), fields(card = %card, authorizer = self.authorizer.name()))]
    pub async fn checkout(&self, card: &CardNumber) -> CheckoutResult<bool> {
        match self.authorizer.authorize(card).await {
            Ok(authorized) => {
                info!(authorized, "Checkout decided");
                Ok(authorized)
            }
            Err(e) => {
                debug!("Checkout could not be decided: {}", e);
                Err(e)
            }
        }
    }
}
