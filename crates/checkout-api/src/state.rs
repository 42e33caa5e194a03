//! # Application State
//!
//! Shared state for the Axum application and the composition root that
//! builds it: one authorizer, injected into one checkout service, shared by
//! every request.

use checkout_core::{
    AlwaysAuthorize, AuthorizationRules, AuthorizerKind, BoxedCardAuthorizer, CheckoutService,
    RuleBasedAuthorizer,
};
use checkout_gateway::GatewayAuthorizer;
use std::net::{AddrParseError, SocketAddr};
use std::sync::Arc;

/// Application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Host to bind to
    pub host: String,
    /// Port to listen on
    pub port: u16,
    /// Environment (development, staging, production)
    pub environment: String,
    /// Authorizer to build at startup
    pub authorizer: AuthorizerKind,
    /// Explicit rules file for the `rules` authorizer
    pub rules_path: Option<String>,
    /// Comma separated declined prefixes; overrides `config/authorizer.toml`
    pub declined_prefixes: Option<String>,
}

impl AppConfig {
    /// Load from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load using `lookup` to resolve variable names
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let authorizer = match lookup("AUTHORIZER") {
            Some(kind) => kind.parse::<AuthorizerKind>()?,
            None => AuthorizerKind::default(),
        };

        Ok(Self {
            host: lookup("HOST").unwrap_or_else(|| "127.0.0.1".to_string()),
            port: lookup("PORT")
                .and_then(|p| p.parse().ok())
                .unwrap_or(8080),
            environment: lookup("ENVIRONMENT").unwrap_or_else(|| "development".to_string()),
            authorizer,
            rules_path: lookup("RULES_PATH"),
            declined_prefixes: lookup("DECLINED_PREFIXES"),
        })
    }

    /// Get the socket address to bind to
    pub fn socket_addr(&self) -> Result<SocketAddr, AddrParseError> {
        format!("{}:{}", self.host, self.port).parse()
    }

    /// Check if running in production
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }
}

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Checkout service, shared by every request
    pub service: CheckoutService,
    /// Application config
    pub config: Arc<AppConfig>,
}

impl AppState {
    /// Build state from the environment, selecting the configured authorizer
    pub fn new() -> anyhow::Result<Self> {
        let config = AppConfig::from_env()?;
        let authorizer = build_authorizer(&config)?;
        Ok(Self::with_authorizer(config, authorizer))
    }

    /// Wire an explicit authorizer into a fresh service
    pub fn with_authorizer(config: AppConfig, authorizer: BoxedCardAuthorizer) -> Self {
        Self {
            service: CheckoutService::new(authorizer),
            config: Arc::new(config),
        }
    }

    /// Name of the authorizer behind the service
    pub fn authorizer_name(&self) -> &'static str {
        self.service.authorizer_name()
    }
}

/// Build the authorizer selected by `config.authorizer`
pub fn build_authorizer(config: &AppConfig) -> anyhow::Result<BoxedCardAuthorizer> {
    let authorizer: BoxedCardAuthorizer = match config.authorizer {
        AuthorizerKind::Stub => Arc::new(AlwaysAuthorize),
        AuthorizerKind::Rules => Arc::new(RuleBasedAuthorizer::new(load_authorization_rules(
            config,
        )?)),
        AuthorizerKind::Gateway => Arc::new(
            GatewayAuthorizer::from_env()
                .map_err(|e| anyhow::anyhow!("Failed to initialize gateway: {}", e))?,
        ),
    };

    Ok(authorizer)
}

/// Load authorization rules: `RULES_PATH`, then `DECLINED_PREFIXES`, then `config/authorizer.toml`
fn load_authorization_rules(config: &AppConfig) -> anyhow::Result<AuthorizationRules> {
    if let Some(path) = &config.rules_path {
        let content = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("Failed to read {}: {}", path, e))?;
        let rules = AuthorizationRules::from_toml(&content)?;
        tracing::info!(
            "Loaded {} declined prefixes from {}",
            rules.declined_prefixes.len(),
            path
        );
        return Ok(rules);
    }

    // An explicit prefix list wins over the default rules file
    if let Some(list) = &config.declined_prefixes {
        return Ok(AuthorizationRules::from_prefix_list(list));
    }

    let config_paths = [
        "config/authorizer.toml",
        "../config/authorizer.toml",
        "../../config/authorizer.toml",
    ];

    for path in config_paths {
        if let Ok(content) = std::fs::read_to_string(path) {
            let rules = AuthorizationRules::from_toml(&content)
                .map_err(|e| anyhow::anyhow!("Failed to parse {}: {}", path, e))?;
            tracing::info!(
                "Loaded {} declined prefixes from {}",
                rules.declined_prefixes.len(),
                path
            );
            return Ok(rules);
        }
    }

    tracing::warn!("No authorization rules found, every card will be accepted");
    Ok(AuthorizationRules::new())
}
