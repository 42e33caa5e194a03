//! # card-checkout
//!
//! Card authorization checkout service.
//!
//! ## Usage
//!
//! ```bash
//! # Pick an authorizer: stub (default), rules or gateway
//! export AUTHORIZER=rules
//! export DECLINED_PREFIXES=0
//!
//! # Run the server
//! card-checkout
//! ```

use checkout_api::{routes, state::AppState};
use tracing::{info, Level};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(
            EnvFilter::builder()
                .with_default_directive(Level::INFO.into())
                .from_env_lossy(),
        )
        .init();

    print_banner();

    // Composition root: authorizer -> service -> router
    let state = AppState::new()?;

    let addr = state.config.socket_addr()?;
    let is_prod = state.config.is_production();

    info!("Environment: {}", state.config.environment);
    info!("Card authorizer: {}", state.authorizer_name());

    let app = routes::create_router(state);

    info!("Card checkout starting on http://{}", addr);

    if !is_prod {
        info!("Checkout: POST http://{}/api/v1.0/checkout/{{cardnumber}}", addr);
    }

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

fn print_banner() {
    println!(
        r#"
  card-checkout
  ━━━━━━━━━━━━━━━━━━━━━━━
  Card authorization service
  Version: {}

"#,
        env!("CARGO_PKG_VERSION")
    );
}
