/// Configuration management for Post Service
///
/// Everything is read from environment variables (optionally seeded from a `.env`
/// file by `main`) with development-friendly defaults.
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Application settings
    pub app: AppConfig,
    /// CORS configuration
    pub cors: CorsConfig,
    /// Persistent store configuration
    pub store: StoreConfig,
    /// Logging configuration
    pub log: LogConfig,
}

/// Application settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Application environment (development, staging, production)
    pub env: String,
    /// Server host to bind to
    pub host: String,
    /// Server port to bind to
    pub port: u16,
    /// Number of HTTP worker threads
    pub workers: usize,
}

/// CORS configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorsConfig {
    /// Comma-separated list of allowed origins, or `*`
    pub allowed_origins: String,
}

/// Persistent store configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    /// JSON file holding the ordered post sequence
    pub path: PathBuf,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Text,
    Json,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogConfig {
    pub format: LogFormat,
}

impl CorsConfig {
    /// Origins to allow; `None` means any origin.
    pub fn origins(&self) -> Option<Vec<&str>> {
        let origins: Vec<&str> = self
            .allowed_origins
            .split(',')
            .map(str::trim)
            .filter(|o| !o.is_empty())
            .collect();

        if origins.is_empty() || origins.contains(&"*") {
            None
        } else {
            Some(origins)
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, String> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, String>
    where
        F: Fn(&str) -> Option<String>,
    {
        let app_env = lookup("APP_ENV").unwrap_or_else(|| "development".to_string());

        let port = match lookup("POST_SERVICE_PORT") {
            Some(raw) => raw
                .parse()
                .map_err(|e| format!("Failed to parse POST_SERVICE_PORT='{}': {}", raw, e))?,
            None => 8080,
        };

        let workers = match lookup("HTTP_WORKERS") {
            Some(raw) => match raw.parse::<usize>() {
                Ok(0) => return Err("HTTP_WORKERS must be at least 1".to_string()),
                Ok(n) => n,
                Err(e) => return Err(format!("Failed to parse HTTP_WORKERS='{}': {}", raw, e)),
            },
            None => 2,
        };

        let store_path = lookup("POST_STORE_PATH").unwrap_or_else(|| "data/posts.json".to_string());
        if store_path.trim().is_empty() {
            return Err("POST_STORE_PATH must not be empty".to_string());
        }

        let format = match lookup("LOG_FORMAT").as_deref() {
            None | Some("text") => LogFormat::Text,
            Some("json") => LogFormat::Json,
            Some(other) => return Err(format!("Unsupported LOG_FORMAT '{}'", other)),
        };

        Ok(Config {
            app: AppConfig {
                env: app_env,
                host: lookup("POST_SERVICE_HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
                port,
                workers,
            },
            cors: CorsConfig {
                allowed_origins: lookup("CORS_ALLOWED_ORIGINS").unwrap_or_else(|| "*".to_string()),
            },
            store: StoreConfig {
                path: PathBuf::from(store_path),
            },
            log: LogConfig { format },
        })
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.app.host, self.app.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(vars: &[(&str, &str)]) -> Result<Config, String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = load(&[]).unwrap();
        assert_eq!(config.app.env, "development");
        assert_eq!(config.bind_address(), "0.0.0.0:8080");
        assert_eq!(config.app.workers, 2);
        assert_eq!(config.store.path, PathBuf::from("data/posts.json"));
        assert_eq!(config.cors.origins(), None);
        assert_eq!(config.log.format, LogFormat::Text);
    }

    #[test]
    fn test_overrides() {
        let config = load(&[
            ("POST_SERVICE_HOST", "127.0.0.1"),
            ("POST_SERVICE_PORT", "9090"),
            ("POST_STORE_PATH", "/var/lib/posts.json"),
            ("CORS_ALLOWED_ORIGINS", "http://a.test, http://b.test"),
            ("LOG_FORMAT", "json"),
        ])
        .unwrap();
        assert_eq!(config.bind_address(), "127.0.0.1:9090");
        assert_eq!(config.store.path, PathBuf::from("/var/lib/posts.json"));
        assert_eq!(
            config.cors.origins(),
            Some(vec!["http://a.test", "http://b.test"])
        );
        assert_eq!(config.log.format, LogFormat::Json);
    }

    #[test]
    fn test_invalid_values_are_rejected() {
        assert!(load(&[("POST_SERVICE_PORT", "eighty")]).is_err());
        assert!(load(&[("HTTP_WORKERS", "0")]).is_err());
        assert!(load(&[("POST_STORE_PATH", " ")]).is_err());
        assert!(load(&[("LOG_FORMAT", "xml")]).is_err());
    }
}
