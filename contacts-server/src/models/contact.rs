use crate::errors::store_error::StoreError;
use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A contact as it is returned by the API, `_id` rendered as hex
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

impl Contact {
    pub fn new(id: ObjectId, fields: ContactFields) -> Self {
        Contact {
            id: id.to_hex(),
            name: fields.name,
            email: fields.email,
            phone: fields.phone,
        }
    }

    /// Overwrites every field present in `fields`, leaving the others untouched
    pub fn apply(&mut self, fields: ContactFields) {
        if let Some(name) = fields.name {
            self.name = Some(name);
        }
        if let Some(email) = fields.email {
            self.email = Some(email);
        }
        if let Some(phone) = fields.phone {
            self.phone = Some(phone);
        }
    }
}

/// The writable part of a contact, as sent in request bodies
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactFields {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

impl ContactFields {
    /// Reads the three fields out of a request body.
    ///
    /// Numbers and booleans are stored as their string form and `null` counts as
    /// absent. Unknown keys are dropped.
    pub fn cast(body: &Value) -> Result<Self, StoreError> {
        let Value::Object(object) = body else {
            return Err(StoreError::NotAnObject(body.to_string()));
        };

        Ok(ContactFields {
            name: cast_string(object.get("name"), "name")?,
            email: cast_string(object.get("email"), "email")?,
            phone: cast_string(object.get("phone"), "phone")?,
        })
    }

    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.email.is_none() && self.phone.is_none()
    }
}

fn cast_string(value: Option<&Value>, path: &'static str) -> Result<Option<String>, StoreError> {
    match value {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(value)) => Ok(Some(value.clone())),
        Some(Value::Number(value)) => Ok(Some(value.to_string())),
        Some(Value::Bool(value)) => Ok(Some(value.to_string())),
        Some(value) => Err(StoreError::Cast {
            value: value.to_string(),
            path,
        }),
    }
}

/// Parses a path id the same way for every store
pub fn parse_contact_id(id: &str) -> Result<ObjectId, StoreError> {
    ObjectId::parse_str(id).or(Err(StoreError::InvalidId(id.to_string())))
}
