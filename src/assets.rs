//! Config loading with an embedded fallback
//!
//! - If `CONFIG_FILE` is NOT set: use the embedded default (no filesystem access)
//! - If `CONFIG_FILE` IS set and the file is missing: seed it with the embedded default
//! - If `CONFIG_FILE` IS set and the file exists: read it from the filesystem

use rust_embed::RustEmbed;
use std::borrow::Cow;
use std::fs;
use std::io;
use std::path::PathBuf;

/// Embedded default config
#[derive(RustEmbed)]
#[folder = "."]
#[include = "config.yaml"]
struct EmbeddedConfig;

const CONFIG_NAME: &str = "config.yaml";

/// Report of init (extraction) operations
#[derive(Debug, Default)]
pub struct InitReport {
    pub written: Vec<String>,
    pub skipped: Vec<String>,
}

/// Config loader with optional filesystem override
pub struct AssetLoader {
    /// External config file path (from CONFIG_FILE env var)
    config_file: Option<PathBuf>,
}

impl AssetLoader {
    /// Create a new asset loader
    ///
    /// `config_file` should be `Some` only if `CONFIG_FILE` was set.
    pub fn new(config_file: Option<PathBuf>) -> Self {
        Self { config_file }
    }

    /// Loader configured from the `CONFIG_FILE` env var
    pub fn from_env() -> Self {
        Self::new(std::env::var("CONFIG_FILE").ok().map(PathBuf::from))
    }

    /// Read the config file
    ///
    /// If an external path is configured and exists, uses that.
    /// Otherwise falls back to embedded config.
    pub fn read_config(&self) -> io::Result<Cow<'static, [u8]>> {
        if let Some(ref path) = self.config_file {
            if path.exists() {
                tracing::trace!(path = %path.display(), "Loading config from filesystem");
                return Ok(Cow::Owned(fs::read(path)?));
            }
        }

        EmbeddedConfig::get(CONFIG_NAME)
            .map(|f| {
                tracing::trace!("Loading config from embedded assets");
                f.data
            })
            .ok_or_else(|| {
                io::Error::new(io::ErrorKind::NotFound, "Embedded config.yaml not found")
            })
    }

    /// Read config as a UTF-8 string
    pub fn read_config_string(&self) -> io::Result<String> {
        let bytes = self.read_config()?;
        String::from_utf8(bytes.into_owned())
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
    }

    /// Seed a configured but missing config file with the embedded default
    ///
    /// Returns `true` if a file was written.
    pub fn seed_if_configured(&self) -> io::Result<bool> {
        let Some(ref path) = self.config_file else {
            return Ok(false);
        };
        if path.exists() {
            return Ok(false);
        }
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        match EmbeddedConfig::get(CONFIG_NAME) {
            Some(data) => {
                fs::write(path, &*data.data)?;
                tracing::info!(path = %path.display(), "Seeded config file with embedded default");
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Extract the embedded config to the filesystem (init command)
    ///
    /// Writes to the configured path, or `./config.yaml` if none is set.
    pub fn init(&self, force: bool) -> io::Result<InitReport> {
        let mut report = InitReport::default();
        let path = self
            .config_file
            .clone()
            .unwrap_or_else(|| PathBuf::from("./config.yaml"));

        if !force && path.exists() {
            report.skipped.push(path.display().to_string());
            return Ok(report);
        }
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        if let Some(data) = EmbeddedConfig::get(CONFIG_NAME) {
            fs::write(&path, &*data.data)?;
            report.written.push(path.display().to_string());
        }

        Ok(report)
    }

    /// List embedded assets (for display)
    pub fn list_embedded() -> Vec<String> {
        EmbeddedConfig::iter().map(|s| s.to_string()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_embedded_config_present() {
        let loader = AssetLoader::new(None);
        let text = loader.read_config_string().unwrap();
        assert!(text.contains("converter:"));
        assert_eq!(AssetLoader::list_embedded(), vec!["config.yaml".to_string()]);
    }

    #[test]
    fn test_external_config_wins() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        fs::write(&path, "default_label: _Ext\n").unwrap();

        let loader = AssetLoader::new(Some(path));
        assert_eq!(loader.read_config_string().unwrap(), "default_label: _Ext\n");
    }

    #[test]
    fn test_missing_external_config_falls_back_and_seeds() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.yaml");

        let loader = AssetLoader::new(Some(path.clone()));
        assert!(loader.read_config_string().unwrap().contains("converter:"));
        assert!(loader.seed_if_configured().unwrap());
        assert!(path.exists());
        assert!(!loader.seed_if_configured().unwrap());
    }

    #[test]
    fn test_init_respects_force() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        fs::write(&path, "# mine\n").unwrap();

        let loader = AssetLoader::new(Some(path.clone()));
        let report = loader.init(false).unwrap();
        assert_eq!(report.skipped.len(), 1);
        assert_eq!(fs::read_to_string(&path).unwrap(), "# mine\n");

        let report = loader.init(true).unwrap();
        assert_eq!(report.written.len(), 1);
        assert!(fs::read_to_string(&path).unwrap().contains("converter:"));
    }
}
