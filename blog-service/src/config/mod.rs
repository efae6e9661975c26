use serde::Deserialize;
use service_core::config as core_config;
use service_core::error::AppError;
use std::env;

/// Scheme selecting the process-local store instead of MongoDB.
pub const MEMORY_URL_SCHEME: &str = "memory://";

#[derive(Debug, Clone, Deserialize)]
pub struct BlogConfig {
    #[serde(flatten)]
    pub common: core_config::Config,
    pub database: DatabaseConfig,
}

/// Store connection settings. Both are optional: a missing value leaves the
/// service running without a store, which the diagnostics endpoint reports.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DatabaseConfig {
    pub url: Option<String>,
    pub name: Option<String>,
}

impl DatabaseConfig {
    pub fn from_env() -> Self {
        Self {
            url: optional_env("DATABASE_URL"),
            name: optional_env("DATABASE_NAME"),
        }
    }

    pub fn is_memory(&self) -> bool {
        self.url
            .as_deref()
            .is_some_and(|url| url.starts_with(MEMORY_URL_SCHEME))
    }
}

impl BlogConfig {
    pub fn load() -> Result<Self, AppError> {
        // Handles .env, the configuration file and PORT / APP__PORT.
        let common = core_config::Config::load()?;

        Ok(BlogConfig {
            common,
            database: DatabaseConfig::from_env(),
        })
    }
}

fn optional_env(key: &str) -> Option<String> {
    env::var(key).ok().filter(|val| !val.trim().is_empty())
}
