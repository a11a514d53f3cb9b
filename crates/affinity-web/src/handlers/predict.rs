//! `POST /predict`: SMILES → Morgan fingerprint → pKi and Ki.

use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use tracing::debug;

use affinity_model::Affinity;

use crate::error::ApiError;
use crate::handlers::SmilesRequest;
use crate::state::{ModelStatus, SharedState};

pub async fn predict(
    State(state): State<SharedState>,
    payload: Result<Json<SmilesRequest>, JsonRejection>,
) -> Result<Json<Affinity>, ApiError> {
    let smiles = match payload {
        Ok(Json(SmilesRequest { smiles: Some(smiles) })) => smiles,
        Ok(_) => return Err(ApiError::MissingPredictSmiles),
        Err(rejection) => {
            debug!("Rejected /predict body: {}", rejection);
            return Err(ApiError::MissingPredictSmiles);
        }
    };

    // Fingerprinting and inference are CPU-bound
    let affinity = tokio::task::spawn_blocking(move || predict_blocking(&state, &smiles))
        .await
        .map_err(|e| ApiError::Prediction(e.to_string()))??;

    Ok(Json(affinity))
}

fn predict_blocking(state: &SharedState, smiles: &str) -> Result<Affinity, ApiError> {
    let descriptors = state.chem.descriptors(smiles).map_err(|e| {
        debug!(smiles, "Descriptor calculation failed: {}", e);
        if e.is_invalid_smiles() {
            ApiError::InvalidPredictSmiles
        } else {
            ApiError::Prediction(e.to_string())
        }
    })?;

    let model = match &state.model {
        ModelStatus::Loaded { model, .. } => model,
        ModelStatus::Unavailable(reason) => return Err(ApiError::ModelUnavailable(reason.clone())),
    };

    let pki = model
        .predict_one(descriptors.to_features())
        .map_err(|e| ApiError::Prediction(e.to_string()))?;
    let affinity = Affinity::from_pki(pki).map_err(|e| ApiError::Prediction(e.to_string()))?;
    debug!(smiles, pki = affinity.pki, ki = affinity.ki, "Prediction complete");
    Ok(affinity)
}
