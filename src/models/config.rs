use crate::assets::AssetLoader;
use oric_hires::codec::DEFAULT_LABEL;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Application configuration loaded from config.yaml
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// External picture converter
    #[serde(default)]
    pub converter: ConverterConfig,

    /// Parent directory for scratch files (system temp dir if unset)
    #[serde(default)]
    pub temp_dir: Option<PathBuf>,

    /// Label given to new pictures
    #[serde(default = "default_label")]
    pub default_label: String,
}

fn default_label() -> String {
    DEFAULT_LABEL.to_string()
}

/// How to run the PictConv-compatible converter
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct ConverterConfig {
    /// Executable name or path
    #[serde(default = "default_converter_path")]
    pub path: PathBuf,

    /// Wall-clock limit for one conversion
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Extra arguments inserted before the standard hires options
    #[serde(default)]
    pub extra_args: Vec<String>,
}

fn default_converter_path() -> PathBuf {
    PathBuf::from("pictconv")
}

fn default_timeout_secs() -> u64 {
    60
}

impl ConverterConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for ConverterConfig {
    fn default() -> Self {
        Self {
            path: default_converter_path(),
            timeout_secs: default_timeout_secs(),
            extra_args: Vec::new(),
        }
    }
}

impl AppConfig {
    /// Load configuration from AssetLoader (embedded or external)
    pub fn load_from_assets(loader: &AssetLoader) -> Self {
        match loader.read_config_string() {
            Ok(content) => match serde_yaml::from_str(&content) {
                Ok(config) => {
                    let config: Self = config;
                    tracing::info!(
                        converter = %config.converter.path.display(),
                        timeout_secs = config.converter.timeout_secs,
                        "Loaded configuration"
                    );
                    config
                }
                Err(e) => {
                    tracing::warn!(%e, "Failed to parse config, using defaults");
                    Self::default()
                }
            },
            Err(e) => {
                tracing::warn!(%e, "Failed to read config, using defaults");
                Self::default()
            }
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            converter: ConverterConfig::default(),
            temp_dir: None,
            default_label: default_label(),
        }
    }
}
