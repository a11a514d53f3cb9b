//! Service configuration.
//! Reads affinity.toml from the current directory or the path in AFFINITY_CONFIG,
//! then applies AFFINITY_* environment overrides.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{AffinityError, Result};

pub const CONFIG_ENV: &str = "AFFINITY_CONFIG";
pub const DEFAULT_CONFIG_FILE: &str = "affinity.toml";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Pre-trained model artifact (JSON).
    #[serde(default = "default_model_path")]
    pub model_path: PathBuf,
    #[serde(default = "default_bind_address")]
    pub bind_address: String,
    /// Directory served under `/static`.
    #[serde(default = "default_static_dir")]
    pub static_dir: PathBuf,
    /// Refuse to start when the model cannot be loaded.
    #[serde(default)]
    pub require_model: bool,
}

fn default_model_path()   -> PathBuf { PathBuf::from("model/qsar_model.pkl") }
fn default_bind_address() -> String  { "127.0.0.1:5000".to_string() }
fn default_static_dir()   -> PathBuf { PathBuf::from("static") }

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            model_path: default_model_path(),
            bind_address: default_bind_address(),
            static_dir: default_static_dir(),
            require_model: false,
        }
    }
}

impl AppConfig {
    /// Load from the process environment.
    ///
    /// An explicit `path` (or `AFFINITY_CONFIG`) must exist; the default
    /// `affinity.toml` is optional.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        Self::load_with(path, |key| std::env::var(key).ok())
    }

    /// Same as [`AppConfig::load`] with an injectable environment lookup.
    pub fn load_with(path: Option<&Path>, env: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let explicit = path.map(Path::to_path_buf).or_else(|| env(CONFIG_ENV).map(PathBuf::from));
        let mut config = match explicit {
            Some(path) => Self::from_file(&path)?,
            None if Path::new(DEFAULT_CONFIG_FILE).exists() => Self::from_file(Path::new(DEFAULT_CONFIG_FILE))?,
            None => Self::default(),
        };
        config.apply_env(env)?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        debug!("Reading configuration from {}", path.display());
        let content = std::fs::read_to_string(path)
            .map_err(|source| AffinityError::Io { path: path.to_path_buf(), source })?;
        toml::from_str(&content).map_err(|source| AffinityError::Toml { path: path.to_path_buf(), source })
    }

    /// Override fields from `AFFINITY_MODEL_PATH`, `AFFINITY_BIND`,
    /// `AFFINITY_STATIC_DIR` and `AFFINITY_REQUIRE_MODEL`.
    pub fn apply_env(&mut self, env: impl Fn(&str) -> Option<String>) -> Result<()> {
        if let Some(v) = env("AFFINITY_MODEL_PATH") {
            self.model_path = PathBuf::from(v);
        }
        if let Some(v) = env("AFFINITY_BIND") {
            self.bind_address = v;
        }
        if let Some(v) = env("AFFINITY_STATIC_DIR") {
            self.static_dir = PathBuf::from(v);
        }
        if let Some(v) = env("AFFINITY_REQUIRE_MODEL") {
            self.require_model = parse_bool(&v)
                .ok_or_else(|| AffinityError::Config(format!("AFFINITY_REQUIRE_MODEL: expected a boolean, got {v:?}")))?;
        }
        Ok(())
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::io::Write;

    use super::*;

    fn env_of(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.model_path, PathBuf::from("model/qsar_model.pkl"));
        assert_eq!(config.bind_address, "127.0.0.1:5000");
        assert!(!config.require_model);
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "bind_address = \"0.0.0.0:8080\"").unwrap();
        let config = AppConfig::load_with(Some(file.path()), env_of(&[])).unwrap();
        assert_eq!(config.bind_address, "0.0.0.0:8080");
        assert_eq!(config.static_dir, PathBuf::from("static"));
    }

    #[test]
    fn test_env_overrides_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "model_path = \"from_file.pkl\"\nrequire_model = false").unwrap();
        let path = file.path().to_string_lossy().to_string();
        let env = env_of(&[
            ("AFFINITY_CONFIG", path.as_str()),
            ("AFFINITY_MODEL_PATH", "from_env.pkl"),
            ("AFFINITY_REQUIRE_MODEL", "yes"),
        ]);
        let config = AppConfig::load_with(None, env).unwrap();
        assert_eq!(config.model_path, PathBuf::from("from_env.pkl"));
        assert!(config.require_model);
    }

    #[test]
    fn test_missing_explicit_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.toml");
        assert!(matches!(
            AppConfig::load_with(Some(missing.as_path()), env_of(&[])),
            Err(AffinityError::Io { .. })
        ));
    }

    #[test]
    fn test_bad_toml_and_bad_bool() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "bind_address = ").unwrap();
        assert!(matches!(AppConfig::from_file(file.path()), Err(AffinityError::Toml { .. })));

        let mut config = AppConfig::default();
        assert!(config.apply_env(env_of(&[("AFFINITY_REQUIRE_MODEL", "maybe")])).is_err());
    }
}
