use axum::response::Json;
use serde_json::{Value, json};

/// Health check endpoint
///
/// Returns `{"status": "OK"}`; used by load balancers and container probes.
pub async fn health_check() -> Json<Value> {
    Json(json!({ "status": "OK" }))
}
