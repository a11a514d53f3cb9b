//! Raster depiction of a molecule as a PNG.

use crate::error::Result;
use crate::rdkit::RdkitToolkit;
use crate::toolkit::ChemToolkit;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DepictOptions {
    pub width: u32,
    pub height: u32,
}

impl Default for DepictOptions {
    fn default() -> Self {
        Self { width: 300, height: 300 }
    }
}

/// Parse `smiles` with RDKit and render it at the default 300×300.
pub fn render_smiles(smiles: &str) -> Result<Vec<u8>> {
    RdkitToolkit::init()?.render_png(smiles, &DepictOptions::default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rdkit::test_toolkit;

    fn decode(png: &[u8]) -> image::DynamicImage {
        image::load_from_memory_with_format(png, image::ImageFormat::Png).unwrap()
    }

    #[test]
    fn test_default_size() {
        assert_eq!(DepictOptions::default(), DepictOptions { width: 300, height: 300 });
    }

    #[test]
    fn test_renders_300px_png() {
        let Some(rdkit) = test_toolkit() else { return };
        for smiles in ["CCO", "c1ccccc1", "CN1C=NC2=C1C(=O)N(C(=O)N2C)C", "[Na+].[Cl-]"] {
            let png = rdkit.render_png(smiles, &DepictOptions::default()).unwrap();
            assert_eq!(&png[..8], b"\x89PNG\r\n\x1a\n");
            let img = decode(&png);
            assert_eq!((img.width(), img.height()), (300, 300), "{smiles}");
        }
    }

    #[test]
    fn test_custom_size() {
        let Some(rdkit) = test_toolkit() else { return };
        let png = rdkit.render_png("CCO", &DepictOptions { width: 120, height: 80 }).unwrap();
        let img = decode(&png);
        assert_eq!((img.width(), img.height()), (120, 80));
    }

    #[test]
    fn test_render_smiles_rejects_bad_input() {
        if test_toolkit().is_none() {
            return;
        }
        assert!(render_smiles("C(C").unwrap_err().is_invalid_smiles());
    }

    mod never_panics {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #![proptest_config(ProptestConfig::with_cases(32))]

            #[test]
            fn prop_render_total_on_arbitrary_input(input in any::<String>()) {
                let Some(rdkit) = test_toolkit() else { return Ok(()) };
                let _ = rdkit.render_png(&input, &DepictOptions::default());
            }
        }
    }
}
