use std::sync::Arc;

use anyhow::Result;
use config::{Config, Environment, File};
use sea_orm::Database;
use serde::Deserialize;
use tracing::{debug, info};

use crate::schemas::AppState;

pub const DEFAULT_DATABASE_URL: &str = "sqlite://tutordesk.db?mode=rwc";
pub const DEFAULT_BIND_ADDRESS: &str = "0.0.0.0:3000";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Resolved server settings.
///
/// Sources, lowest priority first: built-in defaults, an optional
/// `tutordesk.toml` in the working directory, `TUTORDESK_*` environment
/// variables (e.g. `TUTORDESK_DATABASE_URL`), then command line flags.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct AppConfig {
    pub database_url: String,
    pub bind_address: String,
    pub request_timeout_secs: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            database_url: DEFAULT_DATABASE_URL.to_string(),
            bind_address: DEFAULT_BIND_ADDRESS.to_string(),
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
        }
    }
}

impl AppConfig {
    pub fn load() -> Result<Self> {
        Self::load_from("tutordesk")
    }

    /// Loads `<file_stem>.toml` (if present) layered under the environment.
    pub fn load_from(file_stem: &str) -> Result<Self> {
        let config = Config::builder()
            .set_default("database_url", DEFAULT_DATABASE_URL)?
            .set_default("bind_address", DEFAULT_BIND_ADDRESS)?
            .set_default("request_timeout_secs", DEFAULT_REQUEST_TIMEOUT_SECS as i64)?
            .add_source(File::with_name(file_stem).required(false))
            .add_source(Environment::with_prefix("TUTORDESK"))
            .build()?;

        let loaded: AppConfig = config.try_deserialize()?;
        debug!(?loaded, "Configuration loaded");
        Ok(loaded)
    }

    /// Applies command line overrides on top of the loaded values.
    pub fn with_overrides(
        mut self,
        database_url: Option<String>,
        bind_address: Option<String>,
        request_timeout_secs: Option<u64>,
    ) -> Self {
        if let Some(url) = database_url {
            self.database_url = url;
        }
        if let Some(address) = bind_address {
            self.bind_address = address;
        }
        if let Some(secs) = request_timeout_secs {
            self.request_timeout_secs = secs;
        }
        self
    }
}

/// Connect to the database and build the shared handler state.
pub async fn initialize_app_state(config: AppConfig) -> Result<AppState> {
    info!("Connecting to database: {}", config.database_url);
    let db = Database::connect(&config.database_url).await?;

    Ok(AppState {
        db,
        config: Arc::new(config),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_without_file() {
        let config = AppConfig::load_from("does-not-exist").unwrap();
        assert_eq!(config.request_timeout_secs, DEFAULT_REQUEST_TIMEOUT_SECS);
        assert!(!config.bind_address.is_empty());
    }

    #[test]
    fn test_cli_overrides_win() {
        let config = AppConfig::default().with_overrides(
            Some("sqlite::memory:".to_string()),
            None,
            Some(5),
        );
        assert_eq!(config.database_url, "sqlite::memory:");
        assert_eq!(config.bind_address, DEFAULT_BIND_ADDRESS);
        assert_eq!(config.request_timeout_secs, 5);
    }
}
