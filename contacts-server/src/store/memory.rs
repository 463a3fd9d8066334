use super::ContactStore;
use crate::errors::store_error::StoreError;
use crate::models::contact::{Contact, ContactFields, parse_contact_id};
use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;
use tokio::sync::RwLock;

/// Process-local store with the same id and update rules as MongoDB
#[derive(Default)]
pub struct InMemoryContactStore {
    contacts: RwLock<Vec<Contact>>,
}

impl InMemoryContactStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ContactStore for InMemoryContactStore {
    async fn list(&self) -> Result<Vec<Contact>, StoreError> {
        Ok(self.contacts.read().await.clone())
    }

    async fn create(&self, fields: ContactFields) -> Result<Contact, StoreError> {
        let contact = Contact::new(ObjectId::new(), fields);
        self.contacts.write().await.push(contact.clone());
        Ok(contact)
    }

    async fn update(&self, id: &str, fields: ContactFields) -> Result<(), StoreError> {
        let id = parse_contact_id(id)?.to_hex();
        let mut contacts = self.contacts.write().await;
        if let Some(contact) = contacts.iter_mut().find(|contact| contact.id == id) {
            contact.apply(fields);
        }
        Ok(())
    }

    async fn delete(&self, id: &str) -> Result<(), StoreError> {
        let id = parse_contact_id(id)?.to_hex();
        self.contacts.write().await.retain(|contact| contact.id != id);
        Ok(())
    }
}
