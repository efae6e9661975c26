use crate::dtos::{DiagnosticsReport, Probe};
use crate::services::DocumentStore;
use crate::startup::AppState;
use axum::{extract::State, Json};

/// Liveness and store report. Always 200: failures are reported as data.
///
/// `database_url` and `database_name` reflect the configuration loaded at
/// startup, not the current process environment.
pub async fn test_database(State(state): State<AppState>) -> Json<DiagnosticsReport> {
    let collections = probe_collections(state.store.as_deref()).await;
    let database = &state.config.database;

    Json(DiagnosticsReport::compose(
        collections,
        database.url.is_some(),
        database.name.is_some(),
    ))
}

async fn probe_collections(store: Option<&dyn DocumentStore>) -> Probe<Vec<String>> {
    let Some(store) = store else {
        return Probe::Unavailable;
    };

    match store.list_collection_names().await {
        Ok(names) => Probe::Ok(names),
        Err(e) => {
            tracing::warn!(
                database = %store.database_name(),
                "Diagnostics could not list collections: {}",
                e
            );
            Probe::Error(e.to_string())
        }
    }
}
