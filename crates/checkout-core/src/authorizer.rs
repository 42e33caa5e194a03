//! # Card Authorizer Trait
//!
//! Strategy trait deciding whether a card may be used for a checkout.
//! The checkout service only sees `dyn CardAuthorizer`; the concrete
//! implementation is picked once at startup.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                    CardAuthorizer (trait)                   │
//! │  ├── authorize()                                            │
//! │  └── name()                                                 │
//! └─────────────────────────────────────────────────────────────┘
//!                            ▲
//!          ┌─────────────────┼─────────────────┐
//!          │                 │                 │
//!  ┌───────┴───────┐ ┌───────┴───────┐ ┌───────┴───────┐
//!  │AlwaysAuthorize│ │  RuleBased    │ │   Gateway     │
//!  │    (stub)     │ │  Authorizer   │ │  Authorizer   │
//!  └───────────────┘ └───────────────┘ └───────────────┘
//! ```

use crate::card::CardNumber;
use crate::error::{CheckoutError, CheckoutResult};
use async_trait::async_trait;
use serde::Deserialize;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use tracing::debug;

/// Decides whether a card is authorized for a transaction.
///
/// `Ok(false)` is a decline. `Err` means no decision could be obtained and
/// must never be reported to the caller as a decline.
#[async_trait]
pub trait CardAuthorizer: Send + Sync {
    /// Authorize `card`. Implementations make exactly one attempt.
    async fn authorize(&self, card: &CardNumber) -> CheckoutResult<bool>;

    /// Short name used in logs.
    fn name(&self) -> &'static str;
}

/// Type alias for a shared authorizer (dynamic dispatch)
pub type BoxedCardAuthorizer = Arc<dyn CardAuthorizer>;

/// Which authorizer the composition root should build
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AuthorizerKind {
    /// Accept every card
    #[default]
    Stub,
    /// Local prefix rules
    Rules,
    /// Remote authorization gateway
    Gateway,
}

impl AuthorizerKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            AuthorizerKind::Stub => "stub",
            AuthorizerKind::Rules => "rules",
            AuthorizerKind::Gateway => "gateway",
        }
    }
}

impl FromStr for AuthorizerKind {
    type Err = CheckoutError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "stub" => Ok(AuthorizerKind::Stub),
            "rules" => Ok(AuthorizerKind::Rules),
            "gateway" => Ok(AuthorizerKind::Gateway),
            other => Err(CheckoutError::Configuration(format!(
                "Unknown authorizer: {} (expected stub, rules or gateway)",
                other
            ))),
        }
    }
}

impl fmt::Display for AuthorizerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Stub authorizer that accepts every card without any I/O
#[derive(Debug, Clone, Copy, Default)]
pub struct AlwaysAuthorize;

#[async_trait]
impl CardAuthorizer for AlwaysAuthorize {
    async fn authorize(&self, _card: &CardNumber) -> CheckoutResult<bool> {
        Ok(true)
    }

    fn name(&self) -> &'static str {
        "stub"
    }
}

/// Local authorization rules, usually loaded from `config/authorizer.toml`
///
/// ```toml
/// declined_prefixes = ["0", "9999"]
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct AuthorizationRules {
    /// Cards starting with any of these are declined
    #[serde(default)]
    pub declined_prefixes: Vec<String>,
}

impl AuthorizationRules {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder: decline cards starting with `prefix`
    pub fn decline_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.declined_prefixes.push(prefix.into());
        self
    }

    /// Parse a comma separated prefix list, e.g. `"0,9999"`. Blank entries are skipped.
    pub fn from_prefix_list(list: &str) -> Self {
        Self {
            declined_prefixes: list
                .split(',')
                .map(str::trim)
                .filter(|p| !p.is_empty())
                .map(String::from)
                .collect(),
        }
    }

    /// Parse from TOML text. Blank prefixes are dropped: they would match every card.
    pub fn from_toml(content: &str) -> CheckoutResult<Self> {
        let mut rules: Self = toml::from_str(content).map_err(|e| {
            CheckoutError::Configuration(format!("Failed to parse authorizer rules: {}", e))
        })?;
        rules.declined_prefixes.retain(|p| !p.trim().is_empty());
        Ok(rules)
    }

    fn declining_prefix(&self, card: &CardNumber) -> Option<&str> {
        self.declined_prefixes
            .iter()
            .map(String::as_str)
            .find(|prefix| card.starts_with(prefix))
    }
}

/// Authorizer applying [`AuthorizationRules`] locally; no I/O
#[derive(Debug, Clone)]
pub struct RuleBasedAuthorizer {
    rules: AuthorizationRules,
}

impl RuleBasedAuthorizer {
    pub fn new(rules: AuthorizationRules) -> Self {
        Self { rules }
    }
}

#[async_trait]
impl CardAuthorizer for RuleBasedAuthorizer {
    async fn authorize(&self, card: &CardNumber) -> CheckoutResult<bool> {
        match self.rules.declining_prefix(card) {
            Some(prefix) => {
                debug!("Declined card {} by prefix rule {:?}", card, prefix);
                Ok(false)
            }
            None => Ok(true),
        }
    }

    fn name(&self) -> &'static str {
        "rules"
    }
}
