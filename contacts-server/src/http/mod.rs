use crate::store::ContactStore;
use axum::{
    Router,
    http::{HeaderValue, Method, header::CONTENT_TYPE},
    routing::{get, put},
};
use hyper::{Request, body::Incoming};
use hyper_util::{
    rt::{TokioExecutor, TokioIo},
    server,
};
use log::{error, info};
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_service::Service;

mod contacts;
mod message;

pub use message::MessageBody;

/// Builds the contact routes. Without a frontend URL any origin is allowed.
pub fn router(store: Arc<dyn ContactStore>, frontend_url: Option<HeaderValue>) -> Router {
    let cors = match frontend_url {
        Some(origin) => CorsLayer::new()
            .allow_origin(origin)
            .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
            .allow_headers([CONTENT_TYPE]),
        None => CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any),
    };

    Router::new()
        .route("/api/contacts", get(contacts::list).post(contacts::create))
        .route(
            "/api/contacts/{id}",
            put(contacts::update).delete(contacts::delete),
        )
        .layer(cors)
        .with_state(store)
}

/// Binds `0.0.0.0:port` and serves the API on it
pub async fn listen(port: u16, app: Router) {
    let listener = TcpListener::bind(("0.0.0.0", port))
        .await
        .expect("Could not bind HTTP server");

    info!("Server running on port {port}");
    serve(listener, app).await
}

/// Serves the API with hyper on an already bound listener, one task per connection
pub async fn serve(listener: TcpListener, app: Router) {
    loop {
        let (socket, _remote_addr) = match listener.accept().await {
            Ok(l) => l,
            Err(error) => {
                error!("Could not get socket from accepted HTTP connection: {error}");
                continue;
            }
        };

        let tower_service = app.clone();
        tokio::spawn(async move {
            let socket = TokioIo::new(socket);
            let hyper_service = hyper::service::service_fn(move |request: Request<Incoming>| {
                tower_service.clone().call(request)
            });

            let builder = server::conn::auto::Builder::new(TokioExecutor::new());
            if let Err(err) = builder
                .serve_connection_with_upgrades(socket, hyper_service)
                .await
            {
                error!("Failed to serve connection: {err:#}");
            }
        });
    }
}
