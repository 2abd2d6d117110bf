//! HTTP implementation of the profile API.

use crate::config::ApiConfig;
use crate::transport::Transport;
use async_trait::async_trait;
use reqwest::Method;
use zirkl_core::{OnboardingStatus, ProfileApi, Result, UserProfile, ZirklError};

/// Reads the signed-in user's profile and onboarding status.
#[derive(Clone)]
pub struct HttpProfileApi {
    transport: Transport,
}

impl HttpProfileApi {
    pub fn new(config: ApiConfig) -> Self {
        Self {
            transport: Transport::new(config),
        }
    }

    async fn get_json<T: serde::de::DeserializeOwned>(&self, path: &str) -> Result<T> {
        let response = self
            .transport
            .send(self.transport.request(Method::GET, path))
            .await?;
        response
            .json::<T>()
            .await
            .map_err(|e| ZirklError::Http(format!("Failed to parse {} response: {}", path, e)))
    }
}

#[async_trait]
impl ProfileApi for HttpProfileApi {
    async fn fetch_profile(&self) -> Result<UserProfile> {
        self.get_json("/users/me").await
    }

    async fn fetch_completion(&self) -> Result<OnboardingStatus> {
        self.get_json("/onboarding/status").await
    }
}
