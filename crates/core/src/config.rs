//! Configuration management
//!
//! Handles loading and saving the bucketit configuration file, which holds
//! the S3 endpoint and credentials. The file is stored in TOML format at
//! ~/.config/bucketit/config.toml (platform equivalent via `dirs`).

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Current configuration schema version
pub const SCHEMA_VERSION: u32 = 1;

/// Connection details and defaults for one S3-compatible endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Schema version for forward-compatibility checks
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// S3 endpoint URL (e.g. "http://localhost:9000")
    pub endpoint_url: String,

    /// Access key ID
    pub access_key: String,

    /// Secret access key
    pub secret_key: String,

    /// AWS region sent with requests; most S3-compatible servers ignore it
    #[serde(default = "default_region")]
    pub region: String,

    /// Bucket used when `put` is invoked without `--bucket`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_bucket: Option<String>,
}

fn default_schema_version() -> u32 {
    SCHEMA_VERSION
}

fn default_region() -> String {
    "us-east-1".to_string()
}

impl Config {
    /// Create a config from required fields
    pub fn new(
        endpoint_url: impl Into<String>,
        access_key: impl Into<String>,
        secret_key: impl Into<String>,
        default_bucket: Option<String>,
    ) -> Self {
        Self {
            schema_version: SCHEMA_VERSION,
            endpoint_url: endpoint_url.into(),
            access_key: access_key.into(),
            secret_key: secret_key.into(),
            region: default_region(),
            default_bucket,
        }
    }

    /// Validate endpoint and credentials
    ///
    /// Called after loading and before any client is constructed, so that
    /// bad configuration surfaces before the first upload attempt.
    pub fn validate(&self) -> Result<()> {
        if self.endpoint_url.is_empty() {
            return Err(Error::Config("endpoint_url is empty".into()));
        }
        let parsed = url::Url::parse(&self.endpoint_url)?;
        if parsed.scheme() != "http" && parsed.scheme() != "https" {
            return Err(Error::Config(format!(
                "endpoint_url must be http or https, got '{}'",
                parsed.scheme()
            )));
        }
        if self.access_key.is_empty() {
            return Err(Error::Config("access_key is empty".into()));
        }
        if self.secret_key.is_empty() {
            return Err(Error::Config("secret_key is empty".into()));
        }
        if let Some(bucket) = &self.default_bucket {
            if bucket.is_empty() {
                return Err(Error::Config("default_bucket is set but empty".into()));
            }
        }
        Ok(())
    }
}

/// Configuration manager handles loading and saving the config file
#[derive(Debug)]
pub struct ConfigManager {
    config_path: PathBuf,
}

impl ConfigManager {
    /// Create a new ConfigManager with the default config path
    ///
    /// The BUCKETIT_CONFIG environment variable overrides the default
    /// location; tests and scripted setups rely on it.
    pub fn new() -> Result<Self> {
        if let Ok(path) = std::env::var("BUCKETIT_CONFIG") {
            return Ok(Self {
                config_path: PathBuf::from(path),
            });
        }

        let config_dir = dirs::config_dir()
            .ok_or_else(|| Error::Config("Could not determine config directory".into()))?;
        let config_path = config_dir.join("bucketit").join("config.toml");
        Ok(Self { config_path })
    }

    /// Create a ConfigManager with a custom path (useful for testing)
    pub fn with_path(path: PathBuf) -> Self {
        Self { config_path: path }
    }

    /// Get the configuration file path
    pub fn config_path(&self) -> &PathBuf {
        &self.config_path
    }

    /// Check whether a configuration file exists on disk
    pub fn exists(&self) -> bool {
        self.config_path.exists()
    }

    /// Load and validate configuration from disk
    ///
    /// A missing file is an error: bucketit cannot do anything without
    /// credentials, so the user is pointed at `bucketit config init`.
    pub fn load(&self) -> Result<Config> {
        if !self.config_path.exists() {
            return Err(Error::Config(format!(
                "No configuration found at {}. Run 'bucketit config init' to create one.",
                self.config_path.display()
            )));
        }

        let content = std::fs::read_to_string(&self.config_path)?;
        let config: Config = toml::from_str(&content)?;

        if config.schema_version > SCHEMA_VERSION {
            return Err(Error::Config(format!(
                "Configuration file version {} is newer than supported version {}. Please upgrade bucketit.",
                config.schema_version, SCHEMA_VERSION
            )));
        }

        config.validate()?;
        Ok(config)
    }

    /// Save configuration to disk
    ///
    /// Creates parent directories if they don't exist. The file holds a
    /// secret key, so permissions are set to 600 on Unix.
    pub fn save(&self, config: &Config) -> Result<()> {
        if let Some(parent) = self.config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(config)?;
        std::fs::write(&self.config_path, content)?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let permissions = std::fs::Permissions::from_mode(0o600);
            std::fs::set_permissions(&self.config_path, permissions)?;
        }

        Ok(())
    }
}
