//! Shared request plumbing for the HTTP API clients.

use crate::config::ApiConfig;
use reqwest::{Client, Method, RequestBuilder, Response};
use std::time::Duration;
use zirkl_core::{Result, ZirklError};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// One configured connection to the Zirkl API, shared by every client in
/// this crate. Cheap to clone.
#[derive(Clone)]
pub(crate) struct Transport {
    client: Client,
    config: ApiConfig,
}

impl Transport {
    pub(crate) fn new(config: ApiConfig) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }

    /// Builds a request for `path` (leading slash expected) with bearer
    /// auth and the standard timeout applied.
    pub(crate) fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}{}", self.config.base_url, path);
        tracing::debug!(target: "zirkl_api", %url, "building request");
        let mut request = self.client.request(method, url).timeout(REQUEST_TIMEOUT);

        if let Some(token) = &self.config.token {
            request = request.header("Authorization", format!("Bearer {}", token));
        }

        request
    }

    /// Sends the request and maps transport and status failures into the
    /// shared error type.
    pub(crate) async fn send(&self, request: RequestBuilder) -> Result<Response> {
        let response = request
            .send()
            .await
            .map_err(|e| ZirklError::Http(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(ZirklError::api(status.as_u16(), message));
        }

        Ok(response)
    }
}
