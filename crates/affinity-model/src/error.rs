use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("cannot read model artifact {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Corrupt pickle, or a class whose module is not importable.
    #[error("cannot unpickle model artifact: {0}")]
    Unpickle(String),

    #[error("model expects {actual} features, descriptors provide {expected}")]
    FeatureWidth { expected: usize, actual: usize },

    #[error("invalid model artifact: {0}")]
    InvalidArtifact(String),

    #[error("input has {actual} columns, model expects {expected}")]
    ShapeMismatch { expected: usize, actual: usize },

    #[error("model produced a non-finite prediction")]
    NonFinite,

    #[error("inference failed: {0}")]
    Inference(String),
}

pub type Result<T> = std::result::Result<T, ModelError>;
