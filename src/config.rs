//! Configuration management for the inventory server

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::env;

use crate::models::enums::UserRole;

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

/// A sign-in account known to the local auth provider
#[derive(Debug, Deserialize, Clone)]
pub struct AccountConfig {
    pub email: String,
    pub name: String,
    #[serde(default = "default_role")]
    pub role: UserRole,
    /// Argon2 PHC string
    pub password_hash: String,
}

fn default_role() -> UserRole {
    UserRole::User
}

#[derive(Debug, Deserialize, Clone)]
pub struct AuthConfig {
    pub jwt_secret: String,
    pub jwt_expiration_hours: u64,
    #[serde(default)]
    pub accounts: Vec<AccountConfig>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ListingConfig {
    /// Records fetched per page by list views
    pub page_size: usize,
}

#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    pub level: String,
    pub format: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub auth: AuthConfig,
    #[serde(default)]
    pub listing: ListingConfig,
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from files and environment variables
    pub fn load() -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let config = Config::builder()
            // Start with default configuration
            .add_source(File::with_name("config/default"))
            // Layer on the environment-specific file
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            // Add environment variables (with prefix INVENTARIO_)
            .add_source(
                Environment::with_prefix("INVENTARIO")
                    .separator("__")
                    .try_parsing(true),
            )
            // Override JWT secret from JWT_SECRET env var if present
            .set_override_option("auth.jwt_secret", env::var("JWT_SECRET").ok())?
            .build()?;

        config.try_deserialize()
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
        }
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: "change-this-secret-in-production".to_string(),
            jwt_expiration_hours: 24,
            accounts: Vec::new(),
        }
    }
}

impl Default for ListingConfig {
    fn default() -> Self {
        Self { page_size: 20 }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            auth: AuthConfig::default(),
            listing: ListingConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}
