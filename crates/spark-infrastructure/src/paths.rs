//! Path management for spark configuration files.
//!
//! ```text
//! ~/.config/spark/             # Config directory
//! ├── config.toml              # Application configuration
//! ├── secret.json              # API keys
//! └── logs/                    # Application logs
//!     └── spark.log.YYYY-MM-DD
//! ```

use std::path::{Path, PathBuf};

/// Errors that can occur during path resolution.
#[derive(Debug)]
pub enum PathError {
    /// Config directory could not be determined.
    ConfigDirNotFound,
}

impl std::fmt::Display for PathError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PathError::ConfigDirNotFound => write!(f, "Cannot find config directory"),
        }
    }
}

impl std::error::Error for PathError {}

/// Files managed under the config directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServiceType {
    Config,
    Secret,
    Logs,
}

/// Resolves spark paths, optionally rooted at an explicit base directory.
#[derive(Debug, Clone)]
pub struct SparkPaths {
    base: Option<PathBuf>,
}

impl SparkPaths {
    /// `base` overrides the platform config directory (used by `--config-dir`
    /// and tests).
    pub fn new(base: Option<&Path>) -> Self {
        Self {
            base: base.map(Path::to_path_buf),
        }
    }

    /// Returns the spark configuration directory.
    pub fn config_dir(&self) -> Result<PathBuf, PathError> {
        if let Some(base) = &self.base {
            return Ok(base.clone());
        }
        dirs::config_dir()
            .map(|dir| dir.join("spark"))
            .ok_or(PathError::ConfigDirNotFound)
    }

    /// Returns the path for a managed file or directory.
    pub fn get_path(&self, service: ServiceType) -> Result<PathBuf, PathError> {
        let dir = self.config_dir()?;
        Ok(match service {
            ServiceType::Config => dir.join("config.toml"),
            ServiceType::Secret => dir.join("secret.json"),
            ServiceType::Logs => dir.join("logs"),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_override() {
        let paths = SparkPaths::new(Some(Path::new("/tmp/spark-test")));
        assert_eq!(
            paths.get_path(ServiceType::Config).unwrap(),
            PathBuf::from("/tmp/spark-test/config.toml")
        );
        assert_eq!(
            paths.get_path(ServiceType::Secret).unwrap(),
            PathBuf::from("/tmp/spark-test/secret.json")
        );
        assert_eq!(
            paths.get_path(ServiceType::Logs).unwrap(),
            PathBuf::from("/tmp/spark-test/logs")
        );
    }
}
