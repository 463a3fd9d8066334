use super::message::{MessageReply, reply};
use crate::models::contact::ContactFields;
use crate::store::ContactStore;
use axum::{
    Json,
    body::Bytes,
    extract::{Path, State},
    http::{HeaderMap, StatusCode, header::CONTENT_TYPE},
    response::IntoResponse,
};
use log::{error, trace};
use serde_json::{Map, Value};
use std::sync::Arc;

type Store = State<Arc<dyn ContactStore>>;

fn is_json(headers: &HeaderMap) -> bool {
    headers
        .get(CONTENT_TYPE)
        .and_then(|content_type| content_type.to_str().ok())
        .and_then(|content_type| content_type.split(';').next())
        .is_some_and(|mime| mime.trim().eq_ignore_ascii_case("application/json"))
}

/// A missing body, or one not sent as JSON, reads as `{}`
fn read_body(headers: &HeaderMap, body: &[u8]) -> Result<Value, MessageReply> {
    if !is_json(headers) || body.iter().all(u8::is_ascii_whitespace) {
        return Ok(Value::Object(Map::new()));
    }

    serde_json::from_slice(body).map_err(|error| {
        reply(
            StatusCode::BAD_REQUEST,
            format!("Failed to parse the request body as JSON: {error}"),
        )
    })
}

fn read_fields(headers: &HeaderMap, body: &[u8]) -> Result<ContactFields, MessageReply> {
    let body = read_body(headers, body)?;
    ContactFields::cast(&body).map_err(|error| reply(StatusCode::BAD_REQUEST, error))
}

pub(crate) async fn list(State(store): Store) -> impl IntoResponse {
    match store.list().await {
        Ok(contacts) => Ok(Json(contacts)),
        Err(error) => {
            error!("Could not list contacts: {error}");
            Err(reply(StatusCode::INTERNAL_SERVER_ERROR, error))
        }
    }
}

pub(crate) async fn create(
    State(store): Store,
    headers: HeaderMap,
    body: Bytes,
) -> impl IntoResponse {
    let fields = read_fields(&headers, &body)?;

    let contact = store.create(fields).await.map_err(|error| {
        error!("Could not create contact: {error}");
        reply(StatusCode::BAD_REQUEST, error)
    })?;

    trace!("Created contact {}", contact.id);
    Ok::<_, MessageReply>((StatusCode::CREATED, Json(contact)))
}

pub(crate) async fn update(
    State(store): Store,
    Path(id): Path<String>,
    headers: HeaderMap,
    body: Bytes,
) -> impl IntoResponse {
    let fields = read_fields(&headers, &body)?;

    store.update(&id, fields).await.map_err(|error| {
        error!("Could not update contact {id}: {error}");
        reply(StatusCode::BAD_REQUEST, error)
    })?;

    trace!("Updated contact {id}");
    Ok::<_, MessageReply>(reply(StatusCode::OK, "Contact updated successfully"))
}

pub(crate) async fn delete(State(store): Store, Path(id): Path<String>) -> impl IntoResponse {
    if let Err(error) = store.delete(&id).await {
        error!("Could not delete contact {id}: {error}");
        return Err(reply(StatusCode::BAD_REQUEST, error));
    }

    trace!("Deleted contact {id}");
    Ok(reply(StatusCode::OK, "Contact deleted successfully"))
}
