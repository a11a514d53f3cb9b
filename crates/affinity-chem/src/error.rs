//! Error types for the structure toolkit.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, ChemError>;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum ChemError {
    /// RDKit could not build a molecule from the input.
    #[error("invalid SMILES {0:?}")]
    InvalidSmiles(String),

    #[error("descriptor vector has {actual} values, expected {expected}")]
    DescriptorWidth { expected: usize, actual: usize },

    #[error("descriptor value {value} at position {position} is not a fingerprint bit")]
    DescriptorValue { position: usize, value: u8 },

    /// Python or RDKit raised, or the toolkit is not importable.
    #[error("RDKit error: {0}")]
    Toolkit(String),
}

impl ChemError {
    pub fn is_invalid_smiles(&self) -> bool {
        matches!(self, ChemError::InvalidSmiles(_))
    }
}

impl From<pyo3::PyErr> for ChemError {
    fn from(err: pyo3::PyErr) -> Self {
        ChemError::Toolkit(err.to_string())
    }
}
