use std::env;
use std::path::PathBuf;

use thiserror::Error;
use tracing::info;

use crate::analytics::AnalyticsConfig;
use crate::database::DatabaseInfo;

pub mod cors;
pub mod security;

pub use cors::create_cors_layer;
pub use security::create_security_headers_layer;

const DEFAULT_PORT: u16 = 3001;
const DEFAULT_DATABASE_NAME: &str = "devevent";
const DEFAULT_PUBLIC_DIR: &str = "public";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Please define the MONGODB_URI environment variable inside .env")]
    MissingMongoUri,

    #[error("Invalid PORT value '{0}'")]
    InvalidPort(String),

    #[error("Unknown DEVEVENT_DATABASE backend '{0}', expected 'mongodb' or 'reference'")]
    UnknownBackend(String),
}

#[derive(Debug, Clone)]
pub struct Config {
    pub database: DatabaseInfo,
    pub port: u16,
    pub production: bool,
    pub cors_allowed_origins: Option<String>,
    pub analytics: AnalyticsConfig,
    /// Directory holding stylesheets, icons and poster images
    pub public_dir: PathBuf,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build the configuration from an arbitrary variable source.
    ///
    /// Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let backend = var("DEVEVENT_DATABASE").unwrap_or_else(|| "mongodb".to_string());
        let database = match backend.to_lowercase().as_str() {
            "mongodb" => DatabaseInfo::MongoDb {
                uri: var("MONGODB_URI").ok_or(ConfigError::MissingMongoUri)?,
                database_name: var("MONGODB_DATABASE")
                    .unwrap_or_else(|| DEFAULT_DATABASE_NAME.to_string()),
            },
            "reference" => DatabaseInfo::Reference,
            _ => return Err(ConfigError::UnknownBackend(backend)),
        };

        let port = match var("PORT") {
            Some(raw) => raw
                .trim()
                .parse::<u16>()
                .map_err(|_| ConfigError::InvalidPort(raw))?,
            None => {
                info!("PORT not set, using default: {}", DEFAULT_PORT);
                DEFAULT_PORT
            }
        };

        let production = var("RUST_ENV")
            .map(|v| v.to_lowercase() == "production")
            .unwrap_or(false);

        Ok(Self {
            database,
            port,
            production,
            cors_allowed_origins: var("CORS_ALLOWED_ORIGINS"),
            analytics: AnalyticsConfig::new(
                var("NEXT_PUBLIC_POSTHOG_KEY"),
                var("NEXT_PUBLIC_POSTHOG_HOST"),
            ),
            public_dir: var("PUBLIC_DIR")
                .unwrap_or_else(|| DEFAULT_PUBLIC_DIR.to_string())
                .into(),
        })
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn config(vars: &[(&str, &str)]) -> Result<Config, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_missing_mongodb_uri_is_fatal() {
        assert_eq!(config(&[]).unwrap_err(), ConfigError::MissingMongoUri);
        assert_eq!(
            config(&[("MONGODB_URI", "  ")]).unwrap_err(),
            ConfigError::MissingMongoUri
        );
    }

    #[test]
    fn test_defaults() {
        let config = config(&[("MONGODB_URI", "mongodb://localhost:27017")]).unwrap();
        assert_eq!(config.port, DEFAULT_PORT);
        assert!(!config.production);
        assert!(config.cors_allowed_origins.is_none());
        assert!(!config.analytics.is_enabled());
        assert_eq!(config.public_dir, PathBuf::from("public"));
        match config.database {
            DatabaseInfo::MongoDb { uri, database_name } => {
                assert_eq!(uri, "mongodb://localhost:27017");
                assert_eq!(database_name, DEFAULT_DATABASE_NAME);
            }
            DatabaseInfo::Reference => panic!("expected MongoDB"),
        }
    }

    #[test]
    fn test_reference_backend_needs_no_uri() {
        let config = config(&[("DEVEVENT_DATABASE", "reference"), ("PORT", "8080")]).unwrap();
        assert!(matches!(config.database, DatabaseInfo::Reference));
        assert_eq!(config.port, 8080);
    }

    #[test]
    fn test_invalid_values() {
        assert_eq!(
            config(&[("MONGODB_URI", "mongodb://db"), ("PORT", "http")]).unwrap_err(),
            ConfigError::InvalidPort("http".to_string())
        );
        assert_eq!(
            config(&[("DEVEVENT_DATABASE", "postgres")]).unwrap_err(),
            ConfigError::UnknownBackend("postgres".to_string())
        );
    }

    #[test]
    fn test_production_and_analytics() {
        let config = config(&[
            ("MONGODB_URI", "mongodb://db"),
            ("RUST_ENV", "Production"),
            ("NEXT_PUBLIC_POSTHOG_KEY", "phc_test"),
        ])
        .unwrap();
        assert!(config.production);
        assert!(config.analytics.is_enabled());
        assert_eq!(config.analytics.host, "/ingest");
    }
}
