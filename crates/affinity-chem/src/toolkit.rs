use crate::depict::DepictOptions;
use crate::descriptors::Descriptors;
use crate::error::Result;

/// Cheminformatics backend used by the service.
///
/// Both operations return [`ChemError::InvalidSmiles`](crate::ChemError::InvalidSmiles)
/// when the input does not parse; every other error is a toolkit failure.
pub trait ChemToolkit: Send + Sync {
    /// Human-readable backend name and version, e.g. `RDKit 2024.03.5`.
    fn name(&self) -> String;

    /// Morgan fingerprint (radius 3, 1024 bits) of `smiles`.
    fn descriptors(&self, smiles: &str) -> Result<Descriptors>;

    /// 2D depiction of `smiles` as PNG bytes.
    fn render_png(&self, smiles: &str, opts: &DepictOptions) -> Result<Vec<u8>>;
}
