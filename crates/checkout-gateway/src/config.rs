//! # Gateway Configuration
//!
//! Configuration for the remote authorization gateway.
//! Secrets are loaded from environment variables.

use checkout_core::CheckoutError;
use std::env;
use std::time::Duration;

const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Authorization gateway configuration
#[derive(Clone)]
pub struct GatewayConfig {
    /// Base URL, e.g. `https://auth.example.com`
    pub base_url: String,

    /// API key sent as a bearer token
    pub api_key: String,

    /// Per-request timeout
    pub timeout: Duration,
}

impl GatewayConfig {
    /// Load configuration from environment variables.
    ///
    /// Required env vars:
    /// - `GATEWAY_URL`
    /// - `GATEWAY_API_KEY`
    ///
    /// Optional: `GATEWAY_TIMEOUT_SECS` (default 10)
    pub fn from_env() -> Result<Self, CheckoutError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        let base_url = env::var("GATEWAY_URL")
            .map_err(|_| CheckoutError::Configuration("GATEWAY_URL not set".to_string()))?;

        let api_key = env::var("GATEWAY_API_KEY")
            .map_err(|_| CheckoutError::Configuration("GATEWAY_API_KEY not set".to_string()))?;

        if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
            return Err(CheckoutError::Configuration(
                "GATEWAY_URL must start with http:// or https://".to_string(),
            ));
        }

        let timeout_secs = match env::var("GATEWAY_TIMEOUT_SECS") {
            Ok(raw) => raw.parse::<u64>().map_err(|_| {
                CheckoutError::Configuration(format!("Invalid GATEWAY_TIMEOUT_SECS: {}", raw))
            })?,
            Err(_) => DEFAULT_TIMEOUT_SECS,
        };

        Ok(Self::new(base_url, api_key).with_timeout(Duration::from_secs(timeout_secs)))
    }

    /// Create config with explicit values (for testing)
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }

    /// Get authorization header value
    pub fn auth_header(&self) -> String {
        format!("Bearer {}", self.api_key)
    }

    /// Endpoint receiving authorization requests
    pub fn authorizations_url(&self) -> String {
        format!("{}/v1/authorizations", self.base_url)
    }

    /// Builder: set request timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

// Keep the API key out of logs.
impl std::fmt::Debug for GatewayConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GatewayConfig")
            .field("base_url", &self.base_url)
            .field("api_key", &"***")
            .field("timeout", &self.timeout)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_urls() {
        let config = GatewayConfig::new("https://auth.example.com/", "key_123");
        assert_eq!(config.base_url, "https://auth.example.com");
        assert_eq!(
            config.authorizations_url(),
            "https://auth.example.com/v1/authorizations"
        );
    }

    #[test]
    fn test_auth_header() {
        let config = GatewayConfig::new("https://auth.example.com", "key_123");
        assert_eq!(config.auth_header(), "Bearer key_123");
    }

    #[test]
    fn test_debug_hides_key() {
        let config = GatewayConfig::new("https://auth.example.com", "key_123");
        assert!(!format!("{:?}", config).contains("key_123"));
    }

    #[test]
    fn test_default_timeout() {
        let config = GatewayConfig::new("https://auth.example.com", "key_123");
        assert_eq!(config.timeout, Duration::from_secs(10));

        let config = config.with_timeout(Duration::from_millis(250));
        assert_eq!(config.timeout, Duration::from_millis(250));
    }

    #[test]
    fn test_from_env_missing_key() {
        // Clear any existing env vars
        env::remove_var("GATEWAY_URL");

        let result = GatewayConfig::from_env();
        assert!(matches!(result, Err(CheckoutError::Configuration(_))));
    }
}
