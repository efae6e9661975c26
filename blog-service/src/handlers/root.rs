use axum::Json;
use serde_json::{json, Value};

pub async fn root() -> Json<Value> {
    Json(json!({ "message": "OctoVinyl API is running" }))
}

pub async fn hello() -> Json<Value> {
    Json(json!({ "message": "Hello from OctoVinyl backend!" }))
}
