//! API client configuration.
//!
//! Configuration priority: explicit values > environment variables.

use std::env;
use zirkl_core::{Result, ZirklError};

const DEFAULT_API_URL: &str = "https://api.zirkl.app";

/// Connection settings for the Zirkl HTTP API.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Base URL of the API, without a trailing slash.
    pub base_url: String,
    /// Bearer token; requests go out unauthenticated when absent.
    pub token: Option<String>,
}

impl ApiConfig {
    /// Creates a config with an explicit base URL and token.
    pub fn new(base_url: impl Into<String>, token: Option<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token,
        }
    }

    /// Loads configuration from environment variables.
    ///
    /// `ZIRKL_API_URL` defaults to the production endpoint if not
    /// specified; `ZIRKL_API_TOKEN` is required.
    pub fn from_env() -> Result<Self> {
        let base_url = env::var("ZIRKL_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string());

        let token = env::var("ZIRKL_API_TOKEN").map_err(|_| {
            ZirklError::config("ZIRKL_API_TOKEN not found in environment variables")
        })?;

        Ok(Self::new(base_url, Some(token)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_strips_trailing_slash() {
        let config = ApiConfig::new("https://api.example.com/", None);
        assert_eq!(config.base_url, "https://api.example.com");
    }
}
