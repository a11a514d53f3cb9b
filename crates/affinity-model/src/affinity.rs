//! pKi to Ki conversion.

use serde::{Deserialize, Serialize};

use crate::error::{ModelError, Result};

/// Ki in nM from pKi: `10^(9 - pKi)`.
pub fn ki_from_pki(pki: f64) -> f64 {
    10f64.powf(9.0 - pki)
}

/// Response body of a successful prediction.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Affinity {
    #[serde(rename = "pKi")]
    pub pki: f64,
    #[serde(rename = "Ki")]
    pub ki: f64,
}

impl Affinity {
    /// Fails when either value is not representable in JSON.
    pub fn from_pki(pki: f64) -> Result<Self> {
        let ki = ki_from_pki(pki);
        if !pki.is_finite() || !ki.is_finite() {
            return Err(ModelError::NonFinite);
        }
        Ok(Self { pki, ki })
    }
}
