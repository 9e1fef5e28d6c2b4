//! Application configuration module
//!
//! Handles loading and validating configuration from environment variables.

use serde::Deserialize;
use std::net::Ipv4Addr;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
#[allow(dead_code)]
pub enum ConfigError {
    #[error("Failed to load environment variables: {0}")]
    EnvLoad(#[from] dotenvy::Error),

    #[error("Missing required environment variable: {0}")]
    MissingVar(String),

    #[error("Invalid configuration value: {0}")]
    InvalidValue(String),
}

/// Server configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: Ipv4Addr,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: Ipv4Addr::new(0, 0, 0, 0), // Bind to 0.0.0.0 for container deploys
            port: 5000,
        }
    }
}

/// Storage backend selection
///
/// The presence of MONGODB_URI selects database mode; without it the
/// server runs standalone against the seeded local inventory file.
#[derive(Debug, Clone)]
pub enum StorageConfig {
    Mongo { uri: String, database: String },
    Local { path: PathBuf },
}

/// CORS configuration
#[derive(Debug, Clone, Deserialize)]
pub struct CorsConfig {
    pub allowed_origins: Vec<String>,
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            allowed_origins: vec!["http://localhost:3000".to_string()],
        }
    }
}

/// SMTP relay configuration
#[derive(Debug, Clone)]
pub struct EmailConfig {
    pub host: String,
    pub port: u16,
    /// true = implicit TLS (port 465 style), false = STARTTLS
    pub secure: bool,
    pub user: Option<String>,
    pub password: Option<String>,
    pub from: Option<String>,
}

impl Default for EmailConfig {
    fn default() -> Self {
        Self {
            host: "smtp.gmail.com".to_string(),
            port: 587,
            secure: false,
            user: None,
            password: None,
            from: None,
        }
    }
}

impl EmailConfig {
    /// Sender address: EMAIL_FROM, falling back to EMAIL_USER.
    pub fn from_address(&self) -> Option<&str> {
        self.from.as_deref().or(self.user.as_deref())
    }
}

/// Complete application settings
#[derive(Debug, Clone)]
pub struct Settings {
    pub server: ServerConfig,
    pub storage: StorageConfig,
    pub cors: CorsConfig,
    pub email: EmailConfig,
}

impl Settings {
    /// Load settings from environment variables
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if it exists (ignore errors if file not found)
        let _ = dotenvy::dotenv();

        let server = ServerConfig {
            host: std::env::var("HOST")
                .ok()
                .and_then(|h| h.parse().ok())
                .unwrap_or_else(|| ServerConfig::default().host),
            port: std::env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or_else(|| ServerConfig::default().port),
        };

        let storage = Self::storage_from(
            std::env::var("MONGODB_URI").ok(),
            std::env::var("MONGODB_DB").ok(),
            std::env::var("INVENTORY_FILE").ok(),
        );

        let cors = CorsConfig {
            allowed_origins: Self::parse_origins(
                std::env::var("ALLOWED_ORIGINS").ok(),
                std::env::var("FRONTEND_URL").ok(),
            ),
        };

        let email = EmailConfig {
            host: std::env::var("EMAIL_HOST")
                .unwrap_or_else(|_| EmailConfig::default().host),
            port: std::env::var("EMAIL_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or_else(|| EmailConfig::default().port),
            secure: std::env::var("EMAIL_SECURE")
                .map(|s| s == "true")
                .unwrap_or(false),
            user: std::env::var("EMAIL_USER").ok(),
            password: std::env::var("EMAIL_PASS").ok(),
            from: std::env::var("EMAIL_FROM").ok(),
        };

        Ok(Self {
            server,
            storage,
            cors,
            email,
        })
    }

    /// Pick the storage backend from the relevant environment values
    fn storage_from(
        uri: Option<String>,
        database: Option<String>,
        inventory_file: Option<String>,
    ) -> StorageConfig {
        match uri {
            Some(uri) if !uri.trim().is_empty() => StorageConfig::Mongo {
                uri,
                database: database.unwrap_or_else(|| "dealership".to_string()),
            },
            _ => StorageConfig::Local {
                path: PathBuf::from(
                    inventory_file.unwrap_or_else(|| "inventory.json".to_string()),
                ),
            },
        }
    }

    /// Allowed CORS origins: ALLOWED_ORIGINS comma list, then FRONTEND_URL,
    /// then the default dev origin.
    fn parse_origins(origins: Option<String>, frontend_url: Option<String>) -> Vec<String> {
        if let Some(list) = origins {
            let parsed: Vec<String> = list
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect();
            if !parsed.is_empty() {
                return parsed;
            }
        }
        if let Some(url) = frontend_url {
            if !url.trim().is_empty() {
                return vec![url.trim().to_string()];
            }
        }
        CorsConfig::default().allowed_origins
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_default_server_config() {
        let config = ServerConfig::default();
        assert_eq!(config.host, Ipv4Addr::new(0, 0, 0, 0));
        assert_eq!(config.port, 5000);
    }

    #[test]
    fn test_default_email_config() {
        let config = EmailConfig::default();
        assert_eq!(config.host, "smtp.gmail.com");
        assert_eq!(config.port, 587);
        assert!(!config.secure);
        assert_eq!(config.from_address(), None);
    }

    #[test]
    fn test_from_address_falls_back_to_user() {
        let config = EmailConfig {
            user: Some("sales@dealer.test".to_string()),
            ..EmailConfig::default()
        };
        assert_eq!(config.from_address(), Some("sales@dealer.test"));

        let config = EmailConfig {
            user: Some("sales@dealer.test".to_string()),
            from: Some("noreply@dealer.test".to_string()),
            ..EmailConfig::default()
        };
        assert_eq!(config.from_address(), Some("noreply@dealer.test"));
    }

    #[test]
    fn test_storage_prefers_mongo_when_uri_present() {
        let storage = Settings::storage_from(
            Some("mongodb://localhost:27017".to_string()),
            None,
            None,
        );
        match storage {
            StorageConfig::Mongo { uri, database } => {
                assert_eq!(uri, "mongodb://localhost:27017");
                assert_eq!(database, "dealership");
            }
            StorageConfig::Local { .. } => panic!("expected mongo storage"),
        }
    }

    #[test]
    fn test_storage_falls_back_to_local_inventory() {
        let storage = Settings::storage_from(None, None, None);
        match storage {
            StorageConfig::Local { path } => {
                assert_eq!(path, PathBuf::from("inventory.json"));
            }
            StorageConfig::Mongo { .. } => panic!("expected local storage"),
        }
    }

    #[test]
    fn test_parse_origins() {
        let origins = Settings::parse_origins(
            Some("http://a.test, http://b.test".to_string()),
            Some("http://c.test".to_string()),
        );
        assert_eq!(origins, vec!["http://a.test", "http://b.test"]);

        let origins = Settings::parse_origins(None, Some("http://c.test".to_string()));
        assert_eq!(origins, vec!["http://c.test"]);

        let origins = Settings::parse_origins(None, None);
        assert_eq!(origins, vec!["http://localhost:3000"]);
    }
}
