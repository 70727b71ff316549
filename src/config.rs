use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::constants;
use crate::error::{InsightsError, Result};

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    pub output_dir: PathBuf,
    pub log_dir: PathBuf,
    pub generator: GeneratorConfig,
    pub store: StoreConfig,
    pub server: ServerConfig,
    pub pipeline: PipelineConfig,
    pub metrics: MetricsConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    pub count: usize,
    pub seed: Option<u64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StoreKind {
    Memory,
    JsonFile,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    pub kind: StoreKind,
    pub path: PathBuf,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub port: u16,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Year used for company age; current UTC year when unset
    pub reference_year: Option<i32>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct MetricsConfig {
    /// Prometheus exporter port; exporter disabled when unset
    pub port: Option<u16>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from(constants::DEFAULT_OUTPUT_DIR),
            log_dir: PathBuf::from(constants::DEFAULT_LOG_DIR),
            generator: GeneratorConfig::default(),
            store: StoreConfig::default(),
            server: ServerConfig::default(),
            pipeline: PipelineConfig::default(),
            metrics: MetricsConfig::default(),
        }
    }
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            count: constants::DEFAULT_COMPANY_COUNT,
            seed: None,
        }
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            kind: StoreKind::JsonFile,
            path: PathBuf::from(constants::DEFAULT_STORE_PATH),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: constants::DEFAULT_SERVER_PORT,
        }
    }
}

impl Config {
    /// Load configuration from a TOML file, falling back to defaults when the
    /// file does not exist, then apply environment overrides.
    pub fn load(path: &Path) -> Result<Self> {
        let mut config = if path.exists() {
            let content = fs::read_to_string(path).map_err(|e| {
                InsightsError::Config(format!(
                    "Failed to read config file '{}': {}",
                    path.display(),
                    e
                ))
            })?;
            info!("Loaded configuration from {}", path.display());
            Self::from_toml_str(&content)?
        } else {
            debug!("No config file at {}, using defaults", path.display());
            Self::default()
        };

        config.apply_env_overrides(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Apply overrides from a variable lookup (the process environment in
    /// production).
    pub fn apply_env_overrides<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(dir) = lookup(constants::ENV_OUTPUT_DIR) {
            self.output_dir = PathBuf::from(dir);
        }
        if let Some(path) = lookup(constants::ENV_STORE_PATH) {
            self.store.path = PathBuf::from(path);
        }
        if let Some(port) = lookup(constants::ENV_PORT) {
            self.server.port = port.trim().parse().map_err(|_| {
                InsightsError::Config(format!(
                    "{} must be a port number, got '{}'",
                    constants::ENV_PORT,
                    port
                ))
            })?;
        }
        if let Some(port) = lookup(constants::ENV_METRICS_PORT) {
            let port = port.trim().parse().map_err(|_| {
                InsightsError::Config(format!(
                    "{} must be a port number, got '{}'",
                    constants::ENV_METRICS_PORT,
                    port
                ))
            })?;
            self.metrics.port = Some(port);
        }
        Ok(())
    }
}
