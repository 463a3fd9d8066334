use super::ContactStore;
use crate::errors::store_error::StoreError;
use crate::models::contact::{Contact, ContactFields, parse_contact_id};
use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::{
    Client, Collection,
    bson::{Bson, Document, doc, oid::ObjectId},
    options::ClientOptions,
};

pub const DEFAULT_DATABASE: &str = "contacts";
pub const COLLECTION: &str = "contact_lists";

pub struct MongoContactStore {
    client: Client,
    contacts: Collection<Document>,
}

impl MongoContactStore {
    /// Builds a client for `url`. The database is `database` if given, else the
    /// one named in the connection string, else `contacts`.
    pub async fn connect(url: &str, database: Option<&str>) -> Result<Self, StoreError> {
        let options = ClientOptions::parse(url).await?;
        let database = database
            .map(str::to_string)
            .or_else(|| options.default_database.clone())
            .unwrap_or_else(|| DEFAULT_DATABASE.to_string());

        let client = Client::with_options(options)?;
        let contacts = client.database(&database).collection(COLLECTION);

        Ok(MongoContactStore { client, contacts })
    }

    pub async fn ping(&self) -> Result<(), StoreError> {
        self.client
            .database("admin")
            .run_command(doc! { "ping": 1 })
            .await?;
        Ok(())
    }
}

fn fields_document(fields: &ContactFields) -> Document {
    let mut document = Document::new();
    if let Some(name) = &fields.name {
        document.insert("name", name.as_str());
    }
    if let Some(email) = &fields.email {
        document.insert("email", email.as_str());
    }
    if let Some(phone) = &fields.phone {
        document.insert("phone", phone.as_str());
    }
    document
}

/// Stored scalars read back as strings, whoever wrote them
fn cast_bson(value: Option<&Bson>, path: &'static str) -> Result<Option<String>, StoreError> {
    match value {
        None | Some(Bson::Null) | Some(Bson::Undefined) => Ok(None),
        Some(Bson::String(value)) => Ok(Some(value.clone())),
        Some(Bson::Int32(value)) => Ok(Some(value.to_string())),
        Some(Bson::Int64(value)) => Ok(Some(value.to_string())),
        Some(Bson::Double(value)) => Ok(Some(value.to_string())),
        Some(Bson::Boolean(value)) => Ok(Some(value.to_string())),
        Some(Bson::ObjectId(value)) => Ok(Some(value.to_hex())),
        Some(value) => Err(StoreError::Cast {
            value: value.to_string(),
            path,
        }),
    }
}

fn contact_from_document(document: &Document) -> Result<Contact, StoreError> {
    let id = match document.get("_id") {
        Some(Bson::ObjectId(id)) => id.to_hex(),
        Some(Bson::String(id)) => id.clone(),
        other => {
            return Err(StoreError::Cast {
                value: other.map(Bson::to_string).unwrap_or_default(),
                path: "_id",
            });
        }
    };

    Ok(Contact {
        id,
        name: cast_bson(document.get("name"), "name")?,
        email: cast_bson(document.get("email"), "email")?,
        phone: cast_bson(document.get("phone"), "phone")?,
    })
}

#[async_trait]
impl ContactStore for MongoContactStore {
    async fn list(&self) -> Result<Vec<Contact>, StoreError> {
        let documents: Vec<Document> = self.contacts.find(doc! {}).await?.try_collect().await?;
        documents.iter().map(contact_from_document).collect()
    }

    async fn create(&self, fields: ContactFields) -> Result<Contact, StoreError> {
        let id = ObjectId::new();
        let mut document = doc! { "_id": id };
        for (key, value) in fields_document(&fields) {
            document.insert(key, value);
        }

        self.contacts.insert_one(document).await?;
        Ok(Contact::new(id, fields))
    }

    async fn update(&self, id: &str, fields: ContactFields) -> Result<(), StoreError> {
        let id = parse_contact_id(id)?;
        if fields.is_empty() {
            return Ok(());
        }

        self.contacts
            .update_one(doc! { "_id": id }, doc! { "$set": fields_document(&fields) })
            .await?;
        Ok(())
    }

    async fn delete(&self, id: &str) -> Result<(), StoreError> {
        let id = parse_contact_id(id)?;
        self.contacts.delete_one(doc! { "_id": id }).await?;
        Ok(())
    }
}
