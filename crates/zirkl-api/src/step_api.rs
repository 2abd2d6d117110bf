//! HTTP implementation of the onboarding step API.

use crate::config::ApiConfig;
use crate::payload::{ConversationPayload, FillerMessage, LoadingMessages};
use crate::transport::Transport;
use async_trait::async_trait;
use reqwest::Method;
use serde::Serialize;
use zirkl_core::{
    Contact, Message, OnboardingProgress, OnboardingStatus, Result, StepApi, StepPrompt,
    ZirklError,
};

#[derive(Debug, Serialize)]
struct SaveResponseBody<'a> {
    response: &'a str,
}

#[derive(Debug, Serialize)]
struct UploadContactsBody<'a> {
    contacts: &'a [Contact],
}

/// Talks to the server-driven onboarding endpoints.
#[derive(Clone)]
pub struct HttpStepApi {
    transport: Transport,
}

impl HttpStepApi {
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
impl StepApi for HttpStepApi {
    async fn save_response(&self, response: &str) -> Result<()> {
        let request = self
            .transport
            .request(Method::POST, "/onboarding/response")
            .json(&SaveResponseBody { response });
        self.transport.send(request).await?;
        Ok(())
    }

    async fn fetch_step(&self) -> Result<StepPrompt> {
        self.get_json("/onboarding/step").await
    }

    async fn fetch_conversation(&self) -> Result<Vec<Message>> {
        let payload: ConversationPayload = self.get_json("/onboarding/conversation").await?;
        Ok(payload.into_messages())
    }

    async fn clear_conversation(&self) -> Result<()> {
        let request = self
            .transport
            .request(Method::DELETE, "/onboarding/conversation");
        self.transport.send(request).await?;
        Ok(())
    }

    async fn fetch_welcome_message(&self) -> Result<String> {
        let body: FillerMessage = self.get_json("/onboarding/welcome-message").await?;
        Ok(body.message)
    }

    async fn fetch_returning_message(&self) -> Result<String> {
        let body: FillerMessage = self.get_json("/onboarding/returning-message").await?;
        Ok(body.message)
    }

    async fn fetch_loading_messages(&self) -> Result<Vec<String>> {
        let body: LoadingMessages = self.get_json("/onboarding/loading-messages").await?;
        Ok(body.messages)
    }

    async fn fetch_progress(&self) -> Result<OnboardingProgress> {
        self.get_json("/onboarding/progress").await
    }

    async fn fetch_status(&self) -> Result<OnboardingStatus> {
        self.get_json("/onboarding/status").await
    }

    async fn upload_contacts(&self, contacts: &[Contact]) -> Result<()> {
        let request = self
            .transport
            .request(Method::POST, "/contacts/sync")
            .json(&UploadContactsBody { contacts });
        self.transport.send(request).await?;
        Ok(())
    }
}
