use crate::error::AppError;
use config::{Config as Cfg, File};
use serde::Deserialize;

/// Listener port used when neither `PORT` nor `APP__PORT` is set.
pub const DEFAULT_PORT: u16 = 8000;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_port() -> u16 {
    DEFAULT_PORT
}

impl Config {
    /// Layered load: optional `configuration` file, then `APP__*` variables,
    /// then a bare `PORT` which always wins.
    pub fn load() -> Result<Self, AppError> {
        dotenvy::dotenv().ok();

        let port = std::env::var("PORT").ok().filter(|p| !p.trim().is_empty());

        let config = Cfg::builder()
            .add_source(File::with_name("configuration").required(false))
            .add_source(config::Environment::with_prefix("APP").separator("__"))
            .set_override_option("port", port)?
            .build()?;

        Ok(config.try_deserialize()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_port_falls_back_to_default() {
        let config: Config = Cfg::builder()
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();
        assert_eq!(config.port, DEFAULT_PORT);
    }

    #[test]
    fn string_port_override_is_parsed() {
        let config: Config = Cfg::builder()
            .set_override("port", "9100")
            .unwrap()
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();
        assert_eq!(config.port, 9100);
    }
}
