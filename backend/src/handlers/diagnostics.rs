use axum::{extract::State, Json};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::{config::Config, db::StorageHandle, AppState};

const MAX_COLLECTIONS: usize = 10;
const MAX_ERROR_CHARS: usize = 50;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiagnosticReport {
    pub backend: String,
    pub database: String,
    pub database_url: String,
    pub database_name: String,
    pub connection_status: String,
    pub collections: Vec<String>,
    pub checked_at: String,
}

/// `GET /test`. Always answers 200; every failure ends up in a status string.
pub async fn test_database(State(state): State<AppState>) -> Json<DiagnosticReport> {
    Json(diagnose(&state.storage, &state.config).await)
}

pub async fn diagnose(storage: &StorageHandle, config: &Config) -> DiagnosticReport {
    let mut report = DiagnosticReport {
        backend: "✅ Running".to_string(),
        database: "⚠️  Available but not initialized".to_string(),
        database_url: presence(config.database_url.is_some()),
        database_name: presence(config.database_name.is_some()),
        connection_status: "Not Connected".to_string(),
        collections: Vec::new(),
        checked_at: Utc::now().to_rfc3339(),
    };

    let Some(store) = storage else {
        return report;
    };

    report.connection_status = "Connected".to_string();
    match store.collection_names().await {
        Ok(names) => {
            report.collections = names.into_iter().take(MAX_COLLECTIONS).collect();
            report.database = "✅ Connected & Working".to_string();
        }
        Err(e) => {
            warn!(error = %e, "Diagnostics could not list collections");
            report.database = format!("⚠️  Connected but Error: {}", truncate(&e.to_string()));
        }
    }
    report
}

fn presence(set: bool) -> String {
    let flag = if set { "✅ Set" } else { "❌ Not Set" };
    flag.to_string()
}

fn truncate(message: &str) -> String {
    message.chars().take(MAX_ERROR_CHARS).collect()
}
