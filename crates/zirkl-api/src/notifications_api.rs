//! HTTP implementation of the notifications API.

use crate::config::ApiConfig;
use crate::transport::Transport;
use async_trait::async_trait;
use reqwest::Method;
use zirkl_core::{Notification, NotificationsApi, Result, ZirklError};

/// Reads the server's notification feed.
#[derive(Clone)]
pub struct HttpNotificationsApi {
    transport: Transport,
}

impl HttpNotificationsApi {
    pub fn new(config: ApiConfig) -> Self {
        Self {
            transport: Transport::new(config),
        }
    }
}

#[async_trait]
impl NotificationsApi for HttpNotificationsApi {
    async fn fetch(&self, limit: u32, skip: u32) -> Result<Vec<Notification>> {
        let request = self
            .transport
            .request(Method::GET, "/notifications")
            .query(&[("limit", limit), ("skip", skip)]);

        let response = self.transport.send(request).await?;
        response
            .json::<Vec<Notification>>()
            .await
            .map_err(|e| ZirklError::Http(format!("Failed to parse notifications: {}", e)))
    }
}
