//! Local GBFS servers for tests.

use axum::http::StatusCode;
use axum::{Json, Router, routing::get};
use serde_json::Value;

/// Serve a router on an ephemeral localhost port, returning its base URL.
pub(crate) async fn serve(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{addr}")
}

/// A router serving fixed status and information documents.
pub(crate) fn feed_router(status: Value, information: Value) -> Router {
    Router::new()
        .route(
            "/station_status.json",
            get(move || {
                let body = status.clone();
                async move { Json(body) }
            }),
        )
        .route(
            "/station_information.json",
            get(move || {
                let body = information.clone();
                async move { Json(body) }
            }),
        )
}

/// A router that answers both feeds with the given error status.
pub(crate) fn failing_feed_router(status: u16) -> Router {
    let code = StatusCode::from_u16(status).unwrap();
    Router::new()
        .route("/station_status.json", get(move || async move { code }))
        .route("/station_information.json", get(move || async move { code }))
}
