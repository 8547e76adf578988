use anyhow::{Context, Result};
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};
use std::net::{IpAddr, SocketAddr};
use url::Url;
use validator::{Validate, ValidationError};

#[derive(Debug, Deserialize, Validate)]
pub struct Settings {
    #[validate]
    pub server: ServerSettings,
    #[validate]
    pub database: DatabaseSettings,
    #[validate]
    pub collections: CollectionSettings,
}

#[derive(Debug, Serialize, Deserialize, Clone, Validate)]
pub struct ServerSettings {
    #[validate(custom = "validate_ip_addr")]
    #[serde(default = "default_bind_address")]
    pub bind_address: String,
    #[validate(range(min = 1))]
    #[serde(default = "default_port")]
    pub port: u16,
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    #[default]
    Mongo,
    Memory,
}

#[derive(Debug, Deserialize, Validate)]
#[validate(schema(function = "validate_database"))]
pub struct DatabaseSettings {
    #[serde(rename = "db_backend", default)]
    pub backend: StoreBackend,
    pub cluster_url: Option<Secret<String>>,
    #[validate(length(min = 1))]
    #[serde(default = "default_db_name")]
    pub db_name: String,
    #[validate(range(min = 1, max = 300))]
    #[serde(rename = "db_connect_timeout_seconds", default = "default_connect_timeout")]
    pub connect_timeout_seconds: u64,
}

#[derive(Debug, Serialize, Deserialize, Clone, Validate)]
pub struct CollectionSettings {
    #[validate(length(min = 1))]
    #[serde(default = "default_user_collection")]
    pub user_collection: String,
    #[validate(length(min = 1))]
    #[serde(default = "default_organization_collection")]
    pub organization_collection: String,
}

fn default_bind_address() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_db_name() -> String {
    "zurichat".to_string()
}

fn default_connect_timeout() -> u64 {
    10
}

fn default_user_collection() -> String {
    "users".to_string()
}

fn default_organization_collection() -> String {
    "organizations".to_string()
}

impl Default for CollectionSettings {
    fn default() -> Self {
        Self {
            user_collection: default_user_collection(),
            organization_collection: default_organization_collection(),
        }
    }
}

impl Settings {
    /// Load configuration from environment variables, reading a `.env` file first if present.
    ///
    /// Server settings use the `SERVER_` prefix (`SERVER_PORT=5001`); database and
    /// collection settings are unprefixed (`CLUSTER_URL`, `DB_NAME`, `USER_COLLECTION`).
    pub fn load() -> Result<Self> {
        dotenv::dotenv().ok();

        let settings = Settings {
            server: envy::prefixed("SERVER_")
                .from_env()
                .context("Invalid server settings")?,
            database: envy::from_env().context("Invalid database settings")?,
            collections: envy::from_env().context("Invalid collection settings")?,
        };

        settings
            .validate_all()
            .context("Configuration validation failed")?;

        Ok(settings)
    }

    /// Settings for a process backed by the in-memory store
    pub fn in_memory() -> Self {
        Settings {
            server: ServerSettings {
                bind_address: default_bind_address(),
                port: default_port(),
            },
            database: DatabaseSettings {
                backend: StoreBackend::Memory,
                cluster_url: None,
                db_name: default_db_name(),
                connect_timeout_seconds: default_connect_timeout(),
            },
            collections: CollectionSettings::default(),
        }
    }

    pub fn validate_all(&self) -> Result<(), validator::ValidationErrors> {
        self.validate()?;
        self.server.validate()?;
        self.database.validate()?;
        self.collections.validate()?;
        Ok(())
    }
}

impl ServerSettings {
    pub fn address(&self) -> Result<SocketAddr> {
        let ip: IpAddr = self
            .bind_address
            .parse()
            .with_context(|| format!("Invalid bind address '{}'", self.bind_address))?;
        Ok(SocketAddr::new(ip, self.port))
    }
}

fn validate_ip_addr(addr: &str) -> Result<(), ValidationError> {
    addr.parse::<IpAddr>()
        .map(|_| ())
        .map_err(|_| ValidationError::new("invalid_bind_address"))
}

fn validate_database(database: &DatabaseSettings) -> Result<(), ValidationError> {
    match (&database.backend, &database.cluster_url) {
        (StoreBackend::Memory, _) => Ok(()),
        (StoreBackend::Mongo, None) => Err(ValidationError::new("missing_cluster_url")),
        (StoreBackend::Mongo, Some(url)) => {
            let parsed = Url::parse(url.expose_secret())
                .map_err(|_| ValidationError::new("invalid_cluster_url"))?;
            match parsed.scheme() {
                "mongodb" | "mongodb+srv" => Ok(()),
                _ => Err(ValidationError::new("unsupported_cluster_scheme")),
            }
        }
    }
}
