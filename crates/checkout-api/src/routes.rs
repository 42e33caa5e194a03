//! # Routes
//!
//! Axum router configuration for the checkout API.

use crate::handlers;
use crate::state::AppState;
use axum::{routing::post, Router};
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

/// Checkout route; `{cardnumber}` is percent-decoded by the router
pub const CHECKOUT_ROUTE: &str = "/api/v1.0/checkout/{cardnumber}";

/// Create the main application router
///
/// Routes:
///   - POST /api/v1.0/checkout/{cardnumber} - Authorize a card for checkout
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route(CHECKOUT_ROUTE, post(handlers::checkout))
        .layer(ServiceBuilder::new().layer(TraceLayer::new_for_http()))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::AppConfig;
    use async_trait::async_trait;
    use axum::http::StatusCode;
    use axum_test::TestServer;
    use checkout_core::{
        AlwaysAuthorize, AuthorizationRules, BoxedCardAuthorizer, CardAuthorizer, CardNumber,
        CheckoutError, CheckoutResult, RuleBasedAuthorizer,
    };
    use std::future::IntoFuture;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};
    use std::time::Duration;
    use tracing_subscriber::layer::{Context, SubscriberExt};
    use tracing_subscriber::Layer;

    fn test_config() -> AppConfig {
        AppConfig::from_lookup(|_| None).unwrap()
    }

    fn server_with(authorizer: BoxedCardAuthorizer) -> TestServer {
        let state = AppState::with_authorizer(test_config(), authorizer);
        TestServer::new(create_router(state)).unwrap()
    }

    /// Records every card it is asked about, then authorizes it
    #[derive(Default)]
    struct Capturing {
        seen: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl CardAuthorizer for Capturing {
        async fn authorize(&self, card: &CardNumber) -> CheckoutResult<bool> {
            self.seen.lock().unwrap().push(card.as_str().to_string());
            Ok(true)
        }

        fn name(&self) -> &'static str {
            "capturing"
        }
    }

    /// Authorizes cards starting with `4`, after a delay
    struct SlowVisaOnly;

    #[async_trait]
    impl CardAuthorizer for SlowVisaOnly {
        async fn authorize(&self, card: &CardNumber) -> CheckoutResult<bool> {
            tokio::time::sleep(Duration::from_millis(20)).await;
            Ok(card.starts_with("4"))
        }

        fn name(&self) -> &'static str {
            "slow-visa-only"
        }
    }

    struct Unreachable;

    #[async_trait]
    impl CardAuthorizer for Unreachable {
        async fn authorize(&self, _card: &CardNumber) -> CheckoutResult<bool> {
            Err(CheckoutError::AuthorizerUnavailable("connection refused".into()))
        }

        fn name(&self) -> &'static str {
            "unreachable"
        }
    }

    #[tokio::test]
    async fn test_default_authorizer_accepts() {
        let server = server_with(Arc::new(AlwaysAuthorize));

        let response = server.post("/api/v1.0/checkout/4111111111111111").await;

        response.assert_status(StatusCode::OK);
        response.assert_text("Payment accepted");
        let content_type = response.header("content-type");
        assert!(content_type.to_str().unwrap().starts_with("text/plain"));
    }

    #[tokio::test]
    async fn test_default_authorizer_accepts_any_card() {
        let server = server_with(Arc::new(AlwaysAuthorize));

        for card in ["0000000000000000", "abc", "5500-0000"] {
            let response = server.post(&format!("/api/v1.0/checkout/{}", card)).await;
            response.assert_status(StatusCode::OK);
            response.assert_text("Payment accepted");
        }
    }

    #[tokio::test]
    async fn test_prefix_rule_declines() {
        let rules = AuthorizationRules::new().decline_prefix("0");
        let server = server_with(Arc::new(RuleBasedAuthorizer::new(rules)));

        let response = server.post("/api/v1.0/checkout/0000000000000000").await;

        response.assert_status(StatusCode::PAYMENT_REQUIRED);
        response.assert_text("Payment unauthorized");
    }

    #[tokio::test]
    async fn test_card_reaches_authorizer_unmodified() {
        let capturing = Arc::new(Capturing::default());
        let server = server_with(capturing.clone());

        server
            .post("/api/v1.0/checkout/AbC%2041-11")
            .await
            .assert_status(StatusCode::OK);

        assert_eq!(*capturing.seen.lock().unwrap(), vec!["AbC 41-11"]);
    }

    #[tokio::test]
    async fn test_unavailable_authorizer_is_not_a_decline() {
        let server = server_with(Arc::new(Unreachable));

        let response = server.post("/api/v1.0/checkout/4111111111111111").await;

        response.assert_status(StatusCode::SERVICE_UNAVAILABLE);
        let body: serde_json::Value = serde_json::from_str(&response.text()).unwrap();
        assert_eq!(body["code"], 503);
    }

    /// Counts WARN and ERROR events emitted by this workspace's crates
    #[derive(Clone, Default)]
    struct LoudEvents(Arc<AtomicUsize>);

    impl<S: tracing::Subscriber> Layer<S> for LoudEvents {
        fn on_event(&self, event: &tracing::Event<'_>, _ctx: Context<'_, S>) {
            let meta = event.metadata();
            if *meta.level() <= tracing::Level::WARN && meta.target().starts_with("checkout_") {
                self.0.fetch_add(1, Ordering::SeqCst);
            }
        }
    }

    #[tokio::test]
    async fn test_authorizer_failure_is_not_relogged_upstream() {
        let loud = LoudEvents::default();
        let subscriber = tracing_subscriber::registry().with(loud.clone());
        let _guard = tracing::subscriber::set_default(subscriber);

        let server = server_with(Arc::new(Unreachable));
        server
            .post("/api/v1.0/checkout/4111111111111111")
            .await
            .assert_status(StatusCode::SERVICE_UNAVAILABLE);

        // The authorizer owns the failure log; service and controller stay quiet
        assert_eq!(loud.0.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_concurrent_requests_are_independent() {
        let server = server_with(Arc::new(SlowVisaOnly));

        let (visa, other) = tokio::join!(
            server.post("/api/v1.0/checkout/4111111111111111").into_future(),
            server.post("/api/v1.0/checkout/5500000000000004").into_future(),
        );

        visa.assert_status(StatusCode::OK);
        visa.assert_text("Payment accepted");
        other.assert_status(StatusCode::PAYMENT_REQUIRED);
        other.assert_text("Payment unauthorized");
    }

    #[tokio::test]
    async fn test_other_methods_and_paths_are_not_routed() {
        let server = server_with(Arc::new(AlwaysAuthorize));

        server
            .get("/api/v1.0/checkout/4111111111111111")
            .await
            .assert_status(StatusCode::METHOD_NOT_ALLOWED);
        server
            .post("/api/v1/checkout/4111111111111111")
            .await
            .assert_status(StatusCode::NOT_FOUND);
    }
}
