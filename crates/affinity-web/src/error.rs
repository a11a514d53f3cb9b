//! JSON error envelope returned by the API handlers.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;
use tracing::{debug, error};

#[derive(Debug, Error)]
pub enum ApiError {
    /// `/predict` body without a usable `smiles` field.
    #[error("Lack of SMILES Data")]
    MissingPredictSmiles,

    #[error("Invalid SMILES Strings")]
    InvalidPredictSmiles,

    /// `/render` body without a non-empty `smiles` field.
    #[error("No SMILES provided")]
    MissingRenderSmiles,

    #[error("Invalid SMILES string")]
    InvalidRenderSmiles,

    #[error("Model unavailable: {0}")]
    ModelUnavailable(String),

    #[error("Prediction Error：{0}")]
    Prediction(String),

    #[error("Rendering Error: {0}")]
    Rendering(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::MissingPredictSmiles
            | ApiError::InvalidPredictSmiles
            | ApiError::MissingRenderSmiles
            | ApiError::InvalidRenderSmiles => StatusCode::BAD_REQUEST,
            ApiError::ModelUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            ApiError::Prediction(_) | ApiError::Rendering(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!("{}", self);
        } else {
            debug!("{}", self);
        }
        (status, Json(serde_json::json!({ "error": self.to_string() }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(ApiError::MissingPredictSmiles.status(), StatusCode::BAD_REQUEST);
        assert_eq!(ApiError::ModelUnavailable("x".into()).status(), StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(ApiError::Rendering("x".into()).status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_prediction_message_uses_fullwidth_colon() {
        assert_eq!(ApiError::Prediction("boom".into()).to_string(), "Prediction Error：boom");
    }
}
