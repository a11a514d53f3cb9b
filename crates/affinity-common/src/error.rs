use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AffinityError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Cannot read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("TOML parse error in {path}: {source}")]
    Toml {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

pub type Result<T> = std::result::Result<T, AffinityError>;
