//! HTTP implementation of the notes API.

use crate::config::ApiConfig;
use crate::transport::Transport;
use async_trait::async_trait;
use reqwest::Method;
use serde::Serialize;
use zirkl_core::{Contact, NotesApi, Result};

#[derive(Debug, Serialize)]
struct CreateNoteBody<'a> {
    name: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    contact_id: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    phone_number: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    email: Option<&'a str>,
}

/// Creates note records for selected contacts.
#[derive(Clone)]
pub struct HttpNotesApi {
    transport: Transport,
}

impl HttpNotesApi {
    pub fn new(config: ApiConfig) -> Self {
        Self {
            transport: Transport::new(config),
        }
    }
}

#[async_trait]
impl NotesApi for HttpNotesApi {
    async fn create_note(&self, contact: &Contact) -> Result<()> {
        let body = CreateNoteBody {
            name: &contact.name,
            contact_id: contact.id.as_deref(),
            phone_number: contact.phone_number.as_deref(),
            email: contact.email.as_deref(),
        };

        let request = self.transport.request(Method::POST, "/notes").json(&body);
        self.transport.send(request).await?;
        Ok(())
    }
}
