pub mod diagnostics;
pub mod products;

use axum::Json;
use serde_json::{json, Value};

use crate::schema::{self, SchemaDocument};

pub async fn root() -> Json<Value> {
    Json(json!({ "message": "Hello from the catalog service!" }))
}

pub async fn hello() -> Json<Value> {
    Json(json!({ "message": "Hello from the backend API!" }))
}

pub async fn schema() -> Json<SchemaDocument> {
    Json(schema::schema_document())
}
