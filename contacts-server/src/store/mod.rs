use crate::config::{Config, StoreKind};
use crate::errors::store_error::StoreError;
use crate::models::contact::{Contact, ContactFields};
use async_trait::async_trait;
use log::{error, info};
use std::sync::Arc;

pub mod memory;
pub mod mongo;

pub use memory::InMemoryContactStore;
pub use mongo::MongoContactStore;

/// Persistence behind the contact routes. Every call is one store operation.
#[async_trait]
pub trait ContactStore: Send + Sync {
    /// All contacts in insertion order
    async fn list(&self) -> Result<Vec<Contact>, StoreError>;

    /// Inserts a new contact and returns it with its generated id
    async fn create(&self, fields: ContactFields) -> Result<Contact, StoreError>;

    /// Sets the supplied fields on the contact with `id`. Unknown ids are a no-op.
    async fn update(&self, id: &str, fields: ContactFields) -> Result<(), StoreError>;

    /// Removes the contact with `id`. Unknown ids are a no-op.
    async fn delete(&self, id: &str) -> Result<(), StoreError>;
}

/// Opens the store selected by the config.
///
/// For MongoDB the connection is checked in the background, a failed check is
/// only logged and requests will fail later on.
pub async fn open(config: &Config) -> Result<Arc<dyn ContactStore>, StoreError> {
    match &config.store {
        StoreKind::Memory => {
            info!("Using in-memory contact store");
            Ok(Arc::new(InMemoryContactStore::new()))
        }

        StoreKind::Mongo { url, database } => {
            let store = Arc::new(MongoContactStore::connect(url, database.as_deref()).await?);

            let ping_store = store.clone();
            tokio::spawn(async move {
                match ping_store.ping().await {
                    Ok(()) => info!("Connected to MongoDB"),
                    Err(error) => error!("MongoDB connection error: {error}"),
                }
            });

            Ok(store as Arc<dyn ContactStore>)
        }
    }
}
