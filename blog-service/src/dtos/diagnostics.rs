use serde::{Deserialize, Serialize};

/// Most collection names reported by the diagnostics endpoint.
pub const MAX_REPORTED_COLLECTIONS: usize = 10;

/// Longest error excerpt embedded in a status string.
const MAX_ERROR_CHARS: usize = 50;

/// Outcome of one diagnostic sub-check.
#[derive(Debug, Clone, PartialEq)]
pub enum Probe<T> {
    Ok(T),
    Unavailable,
    Error(String),
}

/// Overall store state as shown in the `database` field.
#[derive(Debug, Clone, PartialEq)]
pub enum DatabaseStatus {
    NotAvailable,
    NotInitialized,
    Working,
    ConnectedWithError(String),
}

impl DatabaseStatus {
    pub fn label(&self) -> String {
        match self {
            DatabaseStatus::NotAvailable => "❌ Not Available".to_string(),
            DatabaseStatus::NotInitialized => "⚠️  Available but not initialized".to_string(),
            DatabaseStatus::Working => "✅ Connected & Working".to_string(),
            DatabaseStatus::ConnectedWithError(msg) => {
                format!("⚠️  Connected but Error: {}", truncate(msg))
            }
        }
    }
}

impl<T> From<&Probe<T>> for DatabaseStatus {
    fn from(probe: &Probe<T>) -> Self {
        match probe {
            Probe::Ok(_) => DatabaseStatus::Working,
            Probe::Unavailable => DatabaseStatus::NotInitialized,
            Probe::Error(msg) => DatabaseStatus::ConnectedWithError(msg.clone()),
        }
    }
}

fn set_label(is_set: bool) -> String {
    let label = if is_set { "✅ Set" } else { "❌ Not Set" };
    label.to_string()
}

fn truncate(msg: &str) -> String {
    msg.chars().take(MAX_ERROR_CHARS).collect()
}

/// Body of `GET /test`. Every field starts at its "not available" sentinel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiagnosticsReport {
    pub backend: String,
    pub database: String,
    pub database_url: Option<String>,
    pub database_name: Option<String>,
    pub connection_status: String,
    pub collections: Vec<String>,
}

impl Default for DiagnosticsReport {
    fn default() -> Self {
        Self {
            backend: "✅ Running".to_string(),
            database: DatabaseStatus::NotAvailable.label(),
            database_url: None,
            database_name: None,
            connection_status: "Not Connected".to_string(),
            collections: Vec::new(),
        }
    }
}

impl DiagnosticsReport {
    /// Compose the report from the collection probe and configuration presence.
    pub fn compose(
        collections: Probe<Vec<String>>,
        url_configured: bool,
        name_configured: bool,
    ) -> Self {
        let mut report = Self {
            database: DatabaseStatus::from(&collections).label(),
            database_url: Some(set_label(url_configured)),
            database_name: Some(set_label(name_configured)),
            ..Self::default()
        };

        if !matches!(collections, Probe::Unavailable) {
            report.connection_status = "Connected".to_string();
        }

        if let Probe::Ok(names) = collections {
            report.collections = names.into_iter().take(MAX_REPORTED_COLLECTIONS).collect();
        }

        report
    }
}
