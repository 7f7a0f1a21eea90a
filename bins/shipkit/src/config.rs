//! Configuration file loading
//!
//! Looks for `.shipkit.toml`, `shipkit.toml` or `.config/shipkit.toml` in the
//! working directory unless `--config` names a file.

use serde::{Deserialize, Serialize};
use shipkit_rates::DeliveryAccuracy;
use shipkit_telemetry::TelemetryConfig;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Default environment variable holding the webhook secret
pub const DEFAULT_SECRET_ENV: &str = "SHIPKIT_WEBHOOK_SECRET";

const CANDIDATES: [&str; 3] = [".shipkit.toml", "shipkit.toml", ".config/shipkit.toml"];

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("No webhook secret: pass --secret, set {env}, or set [webhook] secret in the config file")]
    MissingSecret { env: String },
}

/// Root configuration schema
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConfigSchema {
    #[serde(default)]
    pub webhook: WebhookConfig,

    #[serde(default)]
    pub rates: RatesConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Webhook verification settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WebhookConfig {
    /// Shared secret; prefer `secret_env` outside local development
    #[serde(default)]
    pub secret: Option<String>,

    /// Environment variable consulted for the secret
    #[serde(default = "default_secret_env")]
    pub secret_env: String,
}

impl Default for WebhookConfig {
    fn default() -> Self {
        Self {
            secret: None,
            secret_env: default_secret_env(),
        }
    }
}

fn default_secret_env() -> String {
    DEFAULT_SECRET_ENV.to_string()
}

/// Rate selection defaults
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RatesConfig {
    #[serde(default = "default_delivery_accuracy")]
    pub delivery_accuracy: DeliveryAccuracy,

    #[serde(default)]
    pub max_delivery_days: Option<i64>,
}

impl Default for RatesConfig {
    fn default() -> Self {
        Self {
            delivery_accuracy: default_delivery_accuracy(),
            max_delivery_days: None,
        }
    }
}

fn default_delivery_accuracy() -> DeliveryAccuracy {
    DeliveryAccuracy::Percentile90
}

/// Logging settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default)]
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}

fn default_log_level() -> String {
    "warn".to_string()
}

/// Configuration wrapper
#[derive(Debug, Clone, Default)]
pub struct Config {
    pub schema: ConfigSchema,
    pub path: Option<PathBuf>,
}

impl Config {
    /// Load configuration from a file path or use defaults
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let config_path = path.map(Path::to_path_buf).or_else(find_config_file);

        let schema = match config_path {
            Some(ref p) => load_config_file(p)?,
            None => ConfigSchema::default(),
        };

        Ok(Self {
            schema,
            path: config_path,
        })
    }

    /// Resolve the webhook secret: flag, then environment, then file
    pub fn webhook_secret(&self, flag: Option<&str>) -> Result<String, ConfigError> {
        self.webhook_secret_with(flag, |name| std::env::var(name).ok())
    }

    fn webhook_secret_with(
        &self,
        flag: Option<&str>,
        env: impl Fn(&str) -> Option<String>,
    ) -> Result<String, ConfigError> {
        let webhook = &self.schema.webhook;

        flag.map(str::to_string)
            .or_else(|| env(&webhook.secret_env))
            .or_else(|| webhook.secret.clone())
            .ok_or_else(|| ConfigError::MissingSecret {
                env: webhook.secret_env.clone(),
            })
    }

    /// Logging settings for the telemetry crate
    pub fn telemetry(&self, verbose: bool) -> TelemetryConfig {
        let config = TelemetryConfig {
            log_level: self.schema.logging.level.clone(),
            json: self.schema.logging.json,
            ..TelemetryConfig::default()
        };

        if verbose { config.verbose() } else { config }
    }
}

/// Find configuration file in standard locations
fn find_config_file() -> Option<PathBuf> {
    CANDIDATES
        .iter()
        .map(PathBuf::from)
        .find(|candidate| candidate.exists())
}

/// Load and parse a TOML configuration file
fn load_config_file(path: &Path) -> Result<ConfigSchema, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    toml::from_str(&content).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}
