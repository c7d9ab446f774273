use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use thiserror::Error;
use url::Url;

use crate::application::services::chunker::DEFAULT_MAX_CHUNK_LENGTH;
use crate::infrastructure::messaging::broadcast_publisher::DEFAULT_EVENT_BUFFER;

pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 250 * 1024 * 1024;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid value for {key}: {message}")]
    InvalidValue { key: &'static str, message: String },
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub server_port: u16,
    // unset: in-memory store
    pub database_url: Option<String>,
    pub upload_dir: PathBuf,
    pub embed_api_url: String,
    pub ocr_api_url: String,
    pub chunk_max_length: usize,
    pub embedding_dimension: Option<usize>,
    // unset: any origin
    pub cors_origin: Option<String>,
    pub max_upload_bytes: usize,
    pub mark_failed_on_error: bool,
    pub event_buffer: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server_port: 3000,
            database_url: None,
            upload_dir: PathBuf::from("./uploads"),
            embed_api_url: "http://localhost:4002/embed".to_string(),
            ocr_api_url: "http://localhost:4001/ocr".to_string(),
            chunk_max_length: DEFAULT_MAX_CHUNK_LENGTH,
            embedding_dimension: None,
            cors_origin: None,
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
            mark_failed_on_error: false,
            event_buffer: DEFAULT_EVENT_BUFFER,
        }
    }
}

impl AppConfig {
    /// Load `.env` if present, then read the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenv::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        // Blank values count as unset
        let var = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let config = Self {
            server_port: parse_or(&var, "SERVER_PORT", defaults.server_port)?,
            database_url: var("DATABASE_URL"),
            upload_dir: var("UPLOAD_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.upload_dir),
            embed_api_url: url_or(&var, "EMBED_API_URL", defaults.embed_api_url)?,
            ocr_api_url: url_or(&var, "OCR_API_URL", defaults.ocr_api_url)?,
            chunk_max_length: parse_or(&var, "CHUNK_MAX_LENGTH", defaults.chunk_max_length)?,
            embedding_dimension: var("EMBEDDING_DIMENSION")
                .map(|raw| parse_value("EMBEDDING_DIMENSION", &raw))
                .transpose()?,
            cors_origin: var("CORS_ORIGIN"),
            max_upload_bytes: parse_or(&var, "MAX_UPLOAD_BYTES", defaults.max_upload_bytes)?,
            mark_failed_on_error: parse_or(
                &var,
                "MARK_FAILED_ON_ERROR",
                defaults.mark_failed_on_error,
            )?,
            event_buffer: parse_or(&var, "EVENT_BUFFER", defaults.event_buffer)?,
        };

        // Zero would make every paragraph oversized
        if config.chunk_max_length == 0 {
            return Err(ConfigError::InvalidValue {
                key: "CHUNK_MAX_LENGTH",
                message: "must be greater than zero".to_string(),
            });
        }

        Ok(config)
    }

    pub fn pages_dir(&self) -> PathBuf {
        self.upload_dir.join("pages")
    }
}

fn parse_value<T>(key: &'static str, raw: &str) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    raw.trim()
        .parse::<T>()
        .map_err(|e| ConfigError::InvalidValue {
            key,
            message: format!("{:?}: {}", raw, e),
        })
}

fn parse_or<T, F>(var: &F, key: &'static str, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
    F: Fn(&str) -> Option<String>,
{
    match var(key) {
        Some(raw) => parse_value(key, &raw),
        None => Ok(default),
    }
}

fn url_or<F>(var: &F, key: &'static str, default: String) -> Result<String, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let raw = var(key).unwrap_or(default);
    Url::parse(&raw).map_err(|e| ConfigError::InvalidValue {
        key,
        message: format!("{:?}: {}", raw, e),
    })?;
    Ok(raw)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> Result<AppConfig, ConfigError> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_apply_when_unset() {
        let config = config_from(&[]).unwrap();

        assert_eq!(config.server_port, 3000);
        assert_eq!(config.database_url, None);
        assert_eq!(config.upload_dir, PathBuf::from("./uploads"));
        assert_eq!(config.embed_api_url, "http://localhost:4002/embed");
        assert_eq!(config.ocr_api_url, "http://localhost:4001/ocr");
        assert_eq!(config.chunk_max_length, 500);
        assert_eq!(config.max_upload_bytes, 250 * 1024 * 1024);
        assert!(!config.mark_failed_on_error);
        assert_eq!(config.pages_dir(), PathBuf::from("./uploads/pages"));
    }

    #[test]
    fn overrides_are_parsed() {
        let config = config_from(&[
            ("SERVER_PORT", "8080"),
            ("DATABASE_URL", "postgres://u:p@localhost/docs"),
            ("CHUNK_MAX_LENGTH", "120"),
            ("EMBEDDING_DIMENSION", "384"),
            ("MARK_FAILED_ON_ERROR", "true"),
            ("CORS_ORIGIN", "http://localhost:5173"),
        ])
        .unwrap();

        assert_eq!(config.server_port, 8080);
        assert_eq!(
            config.database_url.as_deref(),
            Some("postgres://u:p@localhost/docs")
        );
        assert_eq!(config.chunk_max_length, 120);
        assert_eq!(config.embedding_dimension, Some(384));
        assert!(config.mark_failed_on_error);
        assert_eq!(config.cors_origin.as_deref(), Some("http://localhost:5173"));
    }

    #[test]
    fn blank_values_count_as_unset() {
        let config = config_from(&[("DATABASE_URL", "  "), ("SERVER_PORT", "")]).unwrap();

        assert_eq!(config.database_url, None);
        assert_eq!(config.server_port, 3000);
    }

    #[test]
    fn invalid_values_name_their_key() {
        let port = config_from(&[("SERVER_PORT", "eighty")]).unwrap_err();
        let url = config_from(&[("EMBED_API_URL", "not a url")]).unwrap_err();
        let zero = config_from(&[("CHUNK_MAX_LENGTH", "0")]).unwrap_err();

        assert!(port.to_string().contains("SERVER_PORT"));
        assert!(url.to_string().contains("EMBED_API_URL"));
        assert!(zero.to_string().contains("CHUNK_MAX_LENGTH"));
    }
}
