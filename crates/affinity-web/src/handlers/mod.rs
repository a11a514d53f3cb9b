//! HTTP handlers for all web routes.

use serde::Deserialize;

pub mod health;
pub mod index;
pub mod predict;
pub mod render;

/// Body accepted by `/predict` and `/render`.
///
/// `smiles` is optional here so that a missing field reaches the handler
/// and gets the route's own error message.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SmilesRequest {
    #[serde(default)]
    pub smiles: Option<String>,
}
