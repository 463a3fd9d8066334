use async_trait::async_trait;
use axum::{Router, http::HeaderValue};
use contacts_server::{
    errors::store_error::StoreError,
    http::{self, MessageBody},
    models::contact::{Contact, ContactFields},
    store::{ContactStore, InMemoryContactStore},
};
use reqwest::{Client, StatusCode};
use serde_json::{Value, json};
use std::{io, sync::Arc};
use tokio::net::TcpListener;

async fn spawn(app: Router) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(http::serve(listener, app));
    format!("http://{addr}/api/contacts")
}

async fn spawn_server() -> String {
    spawn(http::router(Arc::new(InMemoryContactStore::new()), None)).await
}

/// Store whose database is unreachable
struct OfflineStore;

fn offline() -> StoreError {
    StoreError::Database(
        io::Error::new(io::ErrorKind::ConnectionRefused, "store offline").into(),
    )
}

#[async_trait]
impl ContactStore for OfflineStore {
    async fn list(&self) -> Result<Vec<Contact>, StoreError> {
        Err(offline())
    }

    async fn create(&self, _fields: ContactFields) -> Result<Contact, StoreError> {
        Err(offline())
    }

    async fn update(&self, _id: &str, _fields: ContactFields) -> Result<(), StoreError> {
        Err(offline())
    }

    async fn delete(&self, _id: &str) -> Result<(), StoreError> {
        Err(offline())
    }
}

async fn list(client: &Client, url: &str) -> Vec<Contact> {
    let response = client.get(url).send().await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    response.json().await.unwrap()
}

async fn create(client: &Client, url: &str, body: Value) -> Contact {
    let response = client.post(url).json(&body).send().await.unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    response.json().await.unwrap()
}

#[tokio::test]
async fn create_then_list() {
    let url = spawn_server().await;
    let client = Client::new();

    assert!(list(&client, &url).await.is_empty());

    let created = create(
        &client,
        &url,
        json!({ "name": "Ann", "email": "ann@x.com", "phone": "5551234567" }),
    )
    .await;

    assert_eq!(created.id.len(), 24);
    assert_eq!(created.name.as_deref(), Some("Ann"));
    assert_eq!(created.email.as_deref(), Some("ann@x.com"));
    assert_eq!(created.phone.as_deref(), Some("5551234567"));
    assert_eq!(list(&client, &url).await, vec![created]);
}

#[tokio::test]
async fn created_contact_is_serialized_with_underscore_id() {
    let url = spawn_server().await;
    let client = Client::new();

    let body: Value = client
        .post(&url)
        .json(&json!({ "name": "Ann" }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert!(body["_id"].is_string());
    assert_eq!(body["name"], "Ann");
    assert!(body.get("email").is_none());
}

#[tokio::test]
async fn create_is_not_idempotent() {
    let url = spawn_server().await;
    let client = Client::new();
    let body = json!({ "name": "Ann", "email": "ann@x.com", "phone": "5551234567" });

    let first = create(&client, &url, body.clone()).await;
    let second = create(&client, &url, body).await;

    assert_ne!(first.id, second.id);
    assert_eq!(list(&client, &url).await.len(), 2);
}

#[tokio::test]
async fn create_does_not_validate_formats() {
    let url = spawn_server().await;
    let client = Client::new();

    let created = create(&client, &url, json!({ "email": "abc", "phone": 12345 })).await;

    assert_eq!(created.name, None);
    assert_eq!(created.email.as_deref(), Some("abc"));
    assert_eq!(created.phone.as_deref(), Some("12345"));
}

#[tokio::test]
async fn create_rejects_uncastable_fields() {
    let url = spawn_server().await;
    let client = Client::new();

    let response = client
        .post(&url)
        .json(&json!({ "name": { "first": "Ann" } }))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: MessageBody = response.json().await.unwrap();
    assert_eq!(
        body.message,
        "Cast to string failed for value \"{\"first\":\"Ann\"}\" at path \"name\""
    );
    assert!(list(&client, &url).await.is_empty());
}

#[tokio::test]
async fn malformed_json_is_a_client_error() {
    let url = spawn_server().await;
    let client = Client::new();

    let response = client
        .post(&url)
        .header("content-type", "application/json")
        .body("{\"name\": ")
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: MessageBody = response.json().await.unwrap();
    assert!(!body.message.is_empty());
}

#[tokio::test]
async fn update_is_idempotent() {
    let url = spawn_server().await;
    let client = Client::new();
    let created = create(
        &client,
        &url,
        json!({ "name": "Ann", "email": "ann@x.com", "phone": "5551234567" }),
    )
    .await;
    let changes = json!({ "name": "Ann Lee", "email": "lee@x.com", "phone": "5550000000" });

    for _ in 0..2 {
        let response = client
            .put(format!("{url}/{}", created.id))
            .json(&changes)
            .send()
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body: MessageBody = response.json().await.unwrap();
        assert_eq!(body.message, "Contact updated successfully");
    }

    let contacts = list(&client, &url).await;
    assert_eq!(contacts.len(), 1);
    assert_eq!(contacts[0].id, created.id);
    assert_eq!(contacts[0].name.as_deref(), Some("Ann Lee"));
    assert_eq!(contacts[0].email.as_deref(), Some("lee@x.com"));
    assert_eq!(contacts[0].phone.as_deref(), Some("5550000000"));
}

#[tokio::test]
async fn update_only_sets_supplied_fields() {
    let url = spawn_server().await;
    let client = Client::new();
    let created = create(
        &client,
        &url,
        json!({ "name": "Ann", "email": "ann@x.com", "phone": "5551234567" }),
    )
    .await;

    let response = client
        .put(format!("{url}/{}", created.id))
        .json(&json!({ "phone": "5559876543" }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let contacts = list(&client, &url).await;
    assert_eq!(contacts[0].name.as_deref(), Some("Ann"));
    assert_eq!(contacts[0].phone.as_deref(), Some("5559876543"));
}

#[tokio::test]
async fn delete_twice_is_a_no_op() {
    let url = spawn_server().await;
    let client = Client::new();
    let kept = create(&client, &url, json!({ "name": "Bob" })).await;
    let deleted = create(&client, &url, json!({ "name": "Ann" })).await;

    for _ in 0..2 {
        let response = client
            .delete(format!("{url}/{}", deleted.id))
            .send()
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body: MessageBody = response.json().await.unwrap();
        assert_eq!(body.message, "Contact deleted successfully");
    }

    assert_eq!(list(&client, &url).await, vec![kept]);
}

#[tokio::test]
async fn unknown_ids_succeed_without_changes() {
    let url = spawn_server().await;
    let client = Client::new();
    let created = create(&client, &url, json!({ "name": "Ann" })).await;
    let unknown = "0123456789abcdef01234567";

    let response = client
        .put(format!("{url}/{unknown}"))
        .json(&json!({ "name": "Bob" }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = client
        .delete(format!("{url}/{unknown}"))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    assert_eq!(list(&client, &url).await, vec![created]);
}

#[tokio::test]
async fn malformed_ids_are_client_errors() {
    let url = spawn_server().await;
    let client = Client::new();

    let response = client
        .put(format!("{url}/abc"))
        .json(&json!({ "name": "Bob" }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: MessageBody = response.json().await.unwrap();
    assert_eq!(
        body.message,
        "Cast to ObjectId failed for value \"abc\" (type string) at path \"_id\" for model \"contact_lists\""
    );

    let response = client.delete(format!("{url}/abc")).send().await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn any_origin_is_allowed_by_default() {
    let url = spawn_server().await;
    let client = Client::new();

    let response = client
        .get(&url)
        .header("origin", "http://localhost:3000")
        .send()
        .await
        .unwrap();

    assert_eq!(
        response.headers()["access-control-allow-origin"],
        "*"
    );
}

#[tokio::test]
async fn empty_bodies_are_empty_objects() {
    let url = spawn_server().await;
    let client = Client::new();

    let response = client.post(&url).send().await.unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let created: Contact = response.json().await.unwrap();
    assert_eq!(created.name, None);
    assert_eq!(created.email, None);
    assert_eq!(created.phone, None);

    let response = client
        .put(format!("{url}/{}", created.id))
        .header("content-type", "application/json")
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body: MessageBody = response.json().await.unwrap();
    assert_eq!(body.message, "Contact updated successfully");

    let response = client
        .put(format!("{url}/{}", created.id))
        .header("content-type", "text/plain")
        .body("name=Bob")
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    assert_eq!(list(&client, &url).await, vec![created]);
}

#[tokio::test]
async fn store_failures_pass_the_message_through() {
    let url = spawn(http::router(Arc::new(OfflineStore), None)).await;
    let client = Client::new();
    let id = "0123456789abcdef01234567";

    let responses = [
        (client.get(&url), StatusCode::INTERNAL_SERVER_ERROR),
        (
            client.post(&url).json(&json!({ "name": "Ann" })),
            StatusCode::BAD_REQUEST,
        ),
        (
            client.put(format!("{url}/{id}")).json(&json!({ "name": "Ann" })),
            StatusCode::BAD_REQUEST,
        ),
        (client.delete(format!("{url}/{id}")), StatusCode::BAD_REQUEST),
    ];

    for (request, status) in responses {
        let response = request.send().await.unwrap();
        assert_eq!(response.status(), status);
        let body: MessageBody = response.json().await.unwrap();
        assert!(body.message.contains("store offline"), "{}", body.message);
    }
}

#[tokio::test]
async fn frontend_url_restricts_origins() {
    let app = http::router(
        Arc::new(InMemoryContactStore::new()),
        Some(HeaderValue::from_static("http://localhost:3000")),
    );
    let url = spawn(app).await;
    let client = Client::new();

    let response = client
        .get(&url)
        .header("origin", "http://localhost:3000")
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()["access-control-allow-origin"],
        "http://localhost:3000"
    );

    let response = client
        .get(&url)
        .header("origin", "http://evil.example")
        .send()
        .await
        .unwrap();
    assert!(
        response
            .headers()
            .get("access-control-allow-origin")
            .is_none()
    );
}
