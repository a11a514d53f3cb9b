//! Fixed-width descriptor vectors fed to the affinity model.

use serde::Serialize;

use crate::error::{ChemError, Result};
use crate::rdkit::RdkitToolkit;
use crate::toolkit::ChemToolkit;

/// Morgan radius used when the model was trained. Changing it silently invalidates predictions.
pub const DESCRIPTOR_RADIUS: u32 = 3;
/// Model input width (`fpSize`).
pub const DESCRIPTOR_LENGTH: usize = 1024;

/// Morgan fingerprint bits as an ordered vector of 0/1 values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Descriptors(Vec<u8>);

impl Descriptors {
    /// Accepts exactly [`DESCRIPTOR_LENGTH`] values, each 0 or 1.
    pub fn from_bits(bits: Vec<u8>) -> Result<Self> {
        if bits.len() != DESCRIPTOR_LENGTH {
            return Err(ChemError::DescriptorWidth { expected: DESCRIPTOR_LENGTH, actual: bits.len() });
        }
        if let Some((position, &value)) = bits.iter().enumerate().find(|(_, &b)| b > 1) {
            return Err(ChemError::DescriptorValue { position, value });
        }
        Ok(Self(bits))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.0
    }

    pub fn count_ones(&self) -> usize {
        self.0.iter().filter(|&&b| b == 1).count()
    }

    /// One model input row.
    pub fn to_features(&self) -> Vec<f64> {
        self.0.iter().map(|&b| b as f64).collect()
    }
}

/// Parse `smiles` with RDKit and compute its descriptor vector.
pub fn calculate_descriptors(smiles: &str) -> Result<Descriptors> {
    RdkitToolkit::init()?.descriptors(smiles)
}
