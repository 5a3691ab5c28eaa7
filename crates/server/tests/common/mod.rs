//! Shared mock Fabric backend for integration tests.

use axum::extract::Path;
use axum::routing::get;
use axum::{Json, Router};
use serde_json::json;

pub async fn spawn_backend(app: Router) -> anyhow::Result<String> {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    Ok(format!("http://{addr}"))
}

/// A well-behaved backend: two patterns, each with a prompt derived from its
/// name.
pub fn fabric_backend() -> Router {
    Router::new()
        .route(
            "/patterns/names",
            get(|| async { Json(json!(["summarize", "extract_wisdom"])) }),
        )
        .route(
            "/patterns/{name}",
            get(|Path(name): Path<String>| async move {
                Json(json!({"Name": name, "Pattern": format!("You are {name}.")}))
            }),
        )
}
