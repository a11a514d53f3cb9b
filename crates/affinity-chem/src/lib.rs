//! Affinity Chem - structure handling for the affinity service.
//!
//! Parsing, Morgan fingerprints and depiction are delegated to RDKit, reached
//! through an embedded Python interpreter. The service talks to it through
//! the [`ChemToolkit`] trait so handlers can be exercised without RDKit.

pub mod depict;
pub mod descriptors;
pub mod error;
pub mod rdkit;
pub mod toolkit;

pub use depict::{render_smiles, DepictOptions};
pub use descriptors::{calculate_descriptors, Descriptors, DESCRIPTOR_LENGTH, DESCRIPTOR_RADIUS};
pub use error::{ChemError, Result};
pub use rdkit::RdkitToolkit;
pub use toolkit::ChemToolkit;
