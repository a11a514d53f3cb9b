//! affinity-web: HTTP front end for the pKi predictor.
//! Provides:
//!   - Landing page with the prediction form
//!   - `POST /predict` (SMILES → pKi / Ki)
//!   - `POST /render` (SMILES → base64 PNG)
//!   - `GET /health`
//!   - CSV descriptor export shared with the `featurize` binary

pub mod error;
pub mod featurize;
pub mod handlers;
pub mod router;
pub mod state;
