//! Liveness and model status.

use axum::{extract::State, Json};
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::state::{ModelStatus, SharedState};

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    /// Cheminformatics backend, e.g. `RDKit 2024.03.5`.
    pub toolkit: String,
    pub model_loaded: bool,
    pub n_features: Option<usize>,
    pub model_kind: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sha256: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub loaded_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model_error: Option<String>,
    pub uptime_secs: i64,
}

pub async fn health(State(state): State<SharedState>) -> Json<HealthResponse> {
    let uptime_secs = (Utc::now() - state.started_at).num_seconds();
    let toolkit = state.chem.name();
    let response = match &state.model {
        ModelStatus::Loaded { model, info } => HealthResponse {
            status: "ok",
            toolkit,
            model_loaded: true,
            n_features: Some(model.n_features()),
            model_kind: Some(model.kind().to_string()),
            sha256: info.as_ref().map(|i| i.sha256.clone()),
            loaded_at: info.as_ref().map(|i| i.loaded_at),
            model_error: None,
            uptime_secs,
        },
        ModelStatus::Unavailable(reason) => HealthResponse {
            status: "degraded",
            toolkit,
            model_loaded: false,
            n_features: None,
            model_kind: None,
            sha256: None,
            loaded_at: None,
            model_error: Some(reason.clone()),
            uptime_secs,
        },
    };
    Json(response)
}
