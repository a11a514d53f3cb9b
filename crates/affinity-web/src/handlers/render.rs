//! `POST /render`: SMILES → 300×300 PNG, base64-encoded.

use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde::{Deserialize, Serialize};
use tracing::debug;

use affinity_chem::DepictOptions;

use crate::error::ApiError;
use crate::handlers::SmilesRequest;
use crate::state::SharedState;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderResponse {
    /// Base64 (standard alphabet, padded) PNG bytes.
    pub image: String,
}

pub async fn render(
    State(state): State<SharedState>,
    payload: Result<Json<SmilesRequest>, JsonRejection>,
) -> Result<Json<RenderResponse>, ApiError> {
    let smiles = match payload {
        Ok(Json(SmilesRequest { smiles: Some(smiles) })) if !smiles.is_empty() => smiles,
        Ok(_) => return Err(ApiError::MissingRenderSmiles),
        Err(rejection) => {
            debug!("Rejected /render body: {}", rejection);
            return Err(ApiError::MissingRenderSmiles);
        }
    };

    let image = tokio::task::spawn_blocking(move || render_blocking(&state, &smiles))
        .await
        .map_err(|e| ApiError::Rendering(e.to_string()))??;

    Ok(Json(RenderResponse { image }))
}

fn render_blocking(state: &SharedState, smiles: &str) -> Result<String, ApiError> {
    let png = state.chem.render_png(smiles, &DepictOptions::default()).map_err(|e| {
        debug!(smiles, "Depiction failed: {}", e);
        if e.is_invalid_smiles() {
            ApiError::InvalidRenderSmiles
        } else {
            ApiError::Rendering(e.to_string())
        }
    })?;
    Ok(STANDARD.encode(png))
}
