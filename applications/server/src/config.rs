/// Server configuration
use crate::error::{Result, ServerError};
use serde::{Deserialize, Serialize};
use soundcheck_storage::PoolSettings;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Lowest and highest work factor bcrypt accepts
pub const BCRYPT_COST_RANGE: std::ops::RangeInclusive<u32> = 4..=31;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default)]
    pub server: ServerSettings,

    #[serde(default)]
    pub storage: StorageSettings,

    #[serde(default)]
    pub auth: AuthSettings,

    #[serde(default)]
    pub cors: CorsSettings,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    /// Path every API route is mounted under
    #[serde(default = "default_api_prefix")]
    pub api_prefix: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StorageSettings {
    /// Required; startup fails when it is empty
    #[serde(default)]
    pub database_url: String,

    #[serde(default = "default_max_connections")]
    pub max_connections: u32,

    #[serde(default = "default_min_connections")]
    pub min_connections: u32,

    #[serde(default = "default_idle_timeout_secs")]
    pub idle_timeout_secs: u64,

    #[serde(default = "default_acquire_timeout_secs")]
    pub acquire_timeout_secs: u64,

    /// Budget for a single storage call
    #[serde(default = "default_query_timeout_secs")]
    pub query_timeout_secs: u64,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AuthSettings {
    #[serde(default = "default_bcrypt_cost")]
    pub bcrypt_cost: u32,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CorsSettings {
    /// Empty means any origin
    #[serde(default = "default_allowed_origins")]
    pub allowed_origins: Vec<String>,
}

impl ServerConfig {
    /// Load configuration from file and environment
    ///
    /// `path` overrides the default `config.toml` lookup. Environment
    /// variables prefixed with `SOUNDCHECK_` win over the file, using `__`
    /// between nested keys (`SOUNDCHECK_STORAGE__DATABASE_URL`). A plain
    /// `DATABASE_URL` is used when nothing else sets the connection string.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut settings = config::Config::builder();

        if let Ok(url) = std::env::var("DATABASE_URL") {
            settings = settings
                .set_default("storage.database_url", url)
                .map_err(|e| ServerError::Config(e.to_string()))?;
        }

        match path {
            Some(path) => {
                settings = settings.add_source(config::File::from(path.to_path_buf()));
            }
            None => {
                let config_path = PathBuf::from("config.toml");
                if config_path.exists() {
                    settings = settings.add_source(config::File::from(config_path));
                }
            }
        }

        settings = settings.add_source(
            config::Environment::with_prefix("SOUNDCHECK")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let config = settings
            .build()
            .map_err(|e| ServerError::Config(e.to_string()))?;

        config
            .try_deserialize()
            .map_err(|e| ServerError::Config(e.to_string()))
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.storage.database_url.trim().is_empty() {
            return Err(ServerError::Config(
                "database URL is required (set SOUNDCHECK_STORAGE__DATABASE_URL or DATABASE_URL)"
                    .to_string(),
            ));
        }

        if self.storage.max_connections == 0 {
            return Err(ServerError::Config(
                "storage.max_connections must be at least 1".to_string(),
            ));
        }

        if self.storage.min_connections > self.storage.max_connections {
            return Err(ServerError::Config(format!(
                "storage.min_connections ({}) exceeds storage.max_connections ({})",
                self.storage.min_connections, self.storage.max_connections
            )));
        }

        if self.storage.query_timeout_secs == 0 {
            return Err(ServerError::Config(
                "storage.query_timeout_secs must be at least 1".to_string(),
            ));
        }

        if !BCRYPT_COST_RANGE.contains(&self.auth.bcrypt_cost) {
            return Err(ServerError::Config(format!(
                "auth.bcrypt_cost must be between {} and {}, got {}",
                BCRYPT_COST_RANGE.start(),
                BCRYPT_COST_RANGE.end(),
                self.auth.bcrypt_cost
            )));
        }

        if !self.server.api_prefix.starts_with('/') {
            return Err(ServerError::Config(format!(
                "server.api_prefix must start with '/', got {:?}",
                self.server.api_prefix
            )));
        }

        Ok(())
    }

    pub fn pool_settings(&self) -> PoolSettings {
        PoolSettings {
            max_connections: self.storage.max_connections,
            min_connections: self.storage.min_connections,
            idle_timeout: Duration::from_secs(self.storage.idle_timeout_secs),
            acquire_timeout: Duration::from_secs(self.storage.acquire_timeout_secs),
            ..PoolSettings::default()
        }
    }

    pub fn query_timeout(&self) -> Duration {
        Duration::from_secs(self.storage.query_timeout_secs)
    }
}

// Default values
fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_api_prefix() -> String {
    "/api/v1".to_string()
}

fn default_max_connections() -> u32 {
    25
}

fn default_min_connections() -> u32 {
    10
}

fn default_idle_timeout_secs() -> u64 {
    300
}

fn default_acquire_timeout_secs() -> u64 {
    30
}

fn default_query_timeout_secs() -> u64 {
    10
}

fn default_bcrypt_cost() -> u32 {
    14
}

fn default_allowed_origins() -> Vec<String> {
    vec!["http://localhost:3000".to_string()]
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            api_prefix: default_api_prefix(),
        }
    }
}

impl Default for StorageSettings {
    fn default() -> Self {
        Self {
            database_url: String::new(),
            max_connections: default_max_connections(),
            min_connections: default_min_connections(),
            idle_timeout_secs: default_idle_timeout_secs(),
            acquire_timeout_secs: default_acquire_timeout_secs(),
            query_timeout_secs: default_query_timeout_secs(),
        }
    }
}

impl Default for AuthSettings {
    fn default() -> Self {
        Self {
            bcrypt_cost: default_bcrypt_cost(),
        }
    }
}

impl Default for CorsSettings {
    fn default() -> Self {
        Self {
            allowed_origins: default_allowed_origins(),
        }
    }
}
