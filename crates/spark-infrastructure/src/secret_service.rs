//! Secret service implementation.
//!
//! The Gemini API key is read once at startup from the environment
//! (`GEMINI_API_KEY`, then `API_KEY`) or, failing that, from `secret.json`.

use std::path::{Path, PathBuf};

use spark_core::SparkError;
use spark_core::config::SecretConfig;
use spark_core::error::Result;

use crate::paths::{ServiceType, SparkPaths};

/// Environment variables checked for the API key, in priority order.
pub const API_KEY_ENV_VARS: [&str; 2] = ["GEMINI_API_KEY", "API_KEY"];

/// Loads the API credential.
///
/// Secrets are never logged; only their source is.
#[derive(Debug, Clone)]
pub struct SecretServiceImpl {
    path: PathBuf,
}

impl SecretServiceImpl {
    pub fn new(paths: &SparkPaths) -> Result<Self> {
        let path = paths
            .get_path(ServiceType::Secret)
            .map_err(|e| SparkError::config(format!("Failed to get secret path: {e}")))?;
        Ok(Self { path })
    }

    pub fn with_path(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Loads `secret.json`. A missing file yields an empty config.
    pub async fn load_secrets(&self) -> Result<SecretConfig> {
        match tokio::fs::read_to_string(&self.path).await {
            Ok(content) => Ok(serde_json::from_str(&content)?),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(SecretConfig::default()),
            Err(err) => Err(err.into()),
        }
    }

    /// Resolves the Gemini API key from the process environment or the file.
    pub async fn resolve_gemini_api_key(&self) -> Result<Option<String>> {
        self.resolve_gemini_api_key_with(|name| std::env::var(name).ok())
            .await
    }

    /// Same as [`Self::resolve_gemini_api_key`] with an injectable
    /// environment lookup.
    pub async fn resolve_gemini_api_key_with<F>(&self, lookup: F) -> Result<Option<String>>
    where
        F: Fn(&str) -> Option<String>,
    {
        for name in API_KEY_ENV_VARS {
            if let Some(value) = lookup(name).filter(|v| !v.trim().is_empty()) {
                tracing::info!(source = name, "Using Gemini API key from environment");
                return Ok(Some(value));
            }
        }

        let key = self
            .load_secrets()
            .await?
            .gemini
            .map(|gemini| gemini.api_key)
            .filter(|key| !key.trim().is_empty());
        if key.is_some() {
            tracing::info!(path = %self.path.display(), "Using Gemini API key from secret file");
        }
        Ok(key)
    }
}
