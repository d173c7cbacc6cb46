//! Configuration DTOs for `config.toml` and `secret.json`.

use serde::{Deserialize, Serialize};

/// Model used when the config does not name one.
pub const DEFAULT_GEMINI_MODEL: &str = "gemini-3-flash-preview";

/// Root of `config.toml`.
#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct AppConfig {
    #[serde(default)]
    pub gemini: GeminiSettings,
    #[serde(default)]
    pub debug: DebugSettings,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct GeminiSettings {
    #[serde(default = "default_model")]
    pub model: String,
}

impl Default for GeminiSettings {
    fn default() -> Self {
        Self {
            model: default_model(),
        }
    }
}

fn default_model() -> String {
    DEFAULT_GEMINI_MODEL.to_string()
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct DebugSettings {
    /// `tracing` filter directive used when `RUST_LOG` is unset.
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for DebugSettings {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Root of `secret.json`.
#[derive(Deserialize, Serialize, Debug, Clone, Default)]
pub struct SecretConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gemini: Option<GeminiSecret>,
}

#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct GeminiSecret {
    pub api_key: String,
}
