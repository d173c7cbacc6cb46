//! Loads `config.toml`.

use std::path::{Path, PathBuf};

use spark_core::SparkError;
use spark_core::config::AppConfig;
use spark_core::error::Result;

use crate::paths::{ServiceType, SparkPaths};

/// Reads application configuration from disk.
#[derive(Debug, Clone)]
pub struct ConfigService {
    path: PathBuf,
}

impl ConfigService {
    pub fn new(paths: &SparkPaths) -> Result<Self> {
        let path = paths
            .get_path(ServiceType::Config)
            .map_err(|e| SparkError::config(format!("Failed to get config path: {e}")))?;
        Ok(Self { path })
    }

    pub fn with_path(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Loads the config. A missing file yields the defaults.
    pub async fn load(&self) -> Result<AppConfig> {
        match tokio::fs::read_to_string(&self.path).await {
            Ok(content) => {
                let config: AppConfig = toml::from_str(&content)?;
                tracing::debug!(path = %self.path.display(), "Loaded config");
                Ok(config)
            }
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                tracing::info!(path = %self.path.display(), "No config file, using defaults");
                Ok(AppConfig::default())
            }
            Err(err) => Err(err.into()),
        }
    }
}
