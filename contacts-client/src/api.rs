use crate::errors::api_error::ApiError;
use crate::models::contact::{Contact, ContactForm};
use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::Deserialize;

pub const DEFAULT_API_URL: &str = "http://localhost:5000";

/// The four calls the contact view makes against the REST API
#[async_trait]
pub trait ContactsApi: Send + Sync {
    async fn list(&self) -> Result<Vec<Contact>, ApiError>;
    async fn create(&self, form: &ContactForm) -> Result<Contact, ApiError>;
    async fn update(&self, id: &str, form: &ContactForm) -> Result<(), ApiError>;
    async fn delete(&self, id: &str) -> Result<(), ApiError>;
}

#[derive(Deserialize)]
struct MessageBody {
    message: String,
}

pub struct HttpContactsApi {
    client: Client,
    contacts_url: String,
}

impl HttpContactsApi {
    /// `base_url` is the server root, e.g. `http://localhost:5000`
    pub fn new(base_url: &str) -> Self {
        HttpContactsApi {
            client: Client::new(),
            contacts_url: format!("{}/api/contacts", base_url.trim_end_matches('/')),
        }
    }

    fn contact_url(&self, id: &str) -> String {
        format!("{}/{}", self.contacts_url, urlencoding::encode(id))
    }
}

async fn check_status(response: Response) -> Result<Response, ApiError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let text = response.text().await?;
    let message = match serde_json::from_str::<MessageBody>(&text) {
        Ok(body) => body.message,
        Err(_) => text,
    };

    Err(ApiError::Status { status, message })
}

#[async_trait]
impl ContactsApi for HttpContactsApi {
    async fn list(&self) -> Result<Vec<Contact>, ApiError> {
        let response = self.client.get(&self.contacts_url).send().await?;
        Ok(check_status(response).await?.json().await?)
    }

    async fn create(&self, form: &ContactForm) -> Result<Contact, ApiError> {
        let response = self.client.post(&self.contacts_url).json(form).send().await?;
        Ok(check_status(response).await?.json().await?)
    }

    async fn update(&self, id: &str, form: &ContactForm) -> Result<(), ApiError> {
        let response = self.client.put(self.contact_url(id)).json(form).send().await?;
        check_status(response).await?;
        Ok(())
    }

    async fn delete(&self, id: &str) -> Result<(), ApiError> {
        let response = self.client.delete(self.contact_url(id)).send().await?;
        check_status(response).await?;
        Ok(())
    }
}
