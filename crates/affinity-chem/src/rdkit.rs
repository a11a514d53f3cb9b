//! RDKit backend through an embedded Python interpreter.
//!
//! The bridge script in `python/rdkit_bridge.py` is compiled into the binary
//! and loaded once per process. Calls take the GIL, so RDKit work is
//! serialised across request threads.

use std::ffi::CString;
use std::sync::OnceLock;

use pyo3::prelude::*;
use pyo3::types::{PyBytes, PyModule};
use tracing::{debug, info};

use crate::depict::DepictOptions;
use crate::descriptors::{Descriptors, DESCRIPTOR_LENGTH, DESCRIPTOR_RADIUS};
use crate::error::{ChemError, Result};
use crate::toolkit::ChemToolkit;

static BRIDGE: OnceLock<Py<PyModule>> = OnceLock::new();

fn bridge(py: Python<'_>) -> PyResult<Bound<'_, PyModule>> {
    if let Some(module) = BRIDGE.get() {
        return Ok(module.bind(py).clone());
    }
    let code = CString::new(include_str!("../python/rdkit_bridge.py"))?;
    let module = PyModule::from_code(py, code.as_c_str(), c"rdkit_bridge.py", c"affinity_rdkit_bridge")?;
    // A concurrent first call may have won the race; both modules are equivalent.
    let _ = BRIDGE.set(module.clone().unbind());
    Ok(module)
}

/// Handle to the RDKit bridge. Cheap to clone.
#[derive(Debug, Clone)]
pub struct RdkitToolkit {
    version: String,
}

impl RdkitToolkit {
    /// Start Python if needed and import RDKit.
    pub fn init() -> Result<Self> {
        let version = Python::attach(|py| -> PyResult<String> {
            bridge(py)?.getattr("version")?.call0()?.extract()
        })?;
        info!("RDKit {} ready", version);
        Ok(Self { version })
    }

    pub fn version(&self) -> &str {
        &self.version
    }
}

impl ChemToolkit for RdkitToolkit {
    fn name(&self) -> String {
        format!("RDKit {}", self.version)
    }

    fn descriptors(&self, smiles: &str) -> Result<Descriptors> {
        let bits = Python::attach(|py| -> PyResult<Option<Vec<u8>>> {
            bridge(py)?
                .getattr("descriptors")?
                .call1((smiles, DESCRIPTOR_RADIUS, DESCRIPTOR_LENGTH))?
                .extract()
        })?;
        match bits {
            Some(bits) => Descriptors::from_bits(bits),
            None => {
                debug!(smiles, "RDKit rejected SMILES");
                Err(ChemError::InvalidSmiles(smiles.to_string()))
            }
        }
    }

    fn render_png(&self, smiles: &str, opts: &DepictOptions) -> Result<Vec<u8>> {
        let png = Python::attach(|py| -> PyResult<Option<Vec<u8>>> {
            let image = bridge(py)?
                .getattr("render_png")?
                .call1((smiles, opts.width, opts.height))?;
            if image.is_none() {
                return Ok(None);
            }
            Ok(Some(image.downcast::<PyBytes>()?.as_bytes().to_vec()))
        })?;
        png.ok_or_else(|| ChemError::InvalidSmiles(smiles.to_string()))
    }
}

/// RDKit for tests, or `None` when this interpreter cannot import it.
#[cfg(test)]
pub(crate) fn test_toolkit() -> Option<RdkitToolkit> {
    match RdkitToolkit::init() {
        Ok(toolkit) => Some(toolkit),
        Err(e) => {
            eprintln!("RDKit unavailable, skipping: {e}");
            None
        }
    }
}
