//! Pickled scikit-learn estimator and its loader.
//!
//! Unpickling runs arbitrary Python code: only load artifacts from a trusted
//! location. The estimator's Python dependencies (scikit-learn, numpy) must be
//! importable by the embedded interpreter.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use pyo3::prelude::*;
use pyo3::types::PyBytes;
use serde::Serialize;
use sha2::{Digest, Sha256};
use tracing::{debug, info};

use crate::error::{ModelError, Result};
use crate::model::{AffinityModel, FeatureMatrix};

/// Any Python object with a scikit-learn style `predict(X)`.
#[derive(Debug)]
pub struct PickledModel {
    estimator: Py<PyAny>,
    kind: String,
    n_features: usize,
}

impl PickledModel {
    /// Wrap an estimator, checking `predict` exists and that `n_features_in_`,
    /// when the estimator declares it, equals `expected_features`.
    pub fn from_estimator(estimator: &Bound<'_, PyAny>, expected_features: usize) -> Result<Self> {
        let invalid = |e: PyErr| ModelError::InvalidArtifact(e.to_string());

        if !estimator.hasattr("predict").map_err(invalid)? {
            return Err(ModelError::InvalidArtifact("object has no predict method".into()));
        }
        let kind: String = estimator
            .getattr("__class__")
            .and_then(|class| class.getattr("__name__"))
            .and_then(|name| name.extract())
            .map_err(invalid)?;

        if estimator.hasattr("n_features_in_").map_err(invalid)? {
            let declared: usize = estimator
                .getattr("n_features_in_")
                .and_then(|n| n.extract())
                .map_err(invalid)?;
            if declared != expected_features {
                return Err(ModelError::FeatureWidth { expected: expected_features, actual: declared });
            }
        }

        Ok(Self { estimator: estimator.clone().unbind(), kind, n_features: expected_features })
    }
}

impl AffinityModel for PickledModel {
    fn n_features(&self) -> usize {
        self.n_features
    }

    fn kind(&self) -> &str {
        &self.kind
    }

    fn predict(&self, features: &FeatureMatrix) -> Result<Vec<f64>> {
        if features.cols() != self.n_features {
            return Err(ModelError::ShapeMismatch { expected: self.n_features, actual: features.cols() });
        }
        let rows: Vec<Vec<f64>> = features.rows().map(<[f64]>::to_vec).collect();

        let predictions = Python::attach(|py| -> PyResult<Vec<f64>> {
            let output = self.estimator.bind(py).call_method1("predict", (rows,))?;
            // numpy arrays come back as Python floats through tolist()
            if output.hasattr("tolist")? {
                output.call_method0("tolist")?.extract()
            } else {
                output.extract()
            }
        })
        .map_err(|e| ModelError::Inference(e.to_string()))?;

        if predictions.len() != features.n_rows() {
            return Err(ModelError::Inference(format!(
                "{} predictions for {} rows",
                predictions.len(),
                features.n_rows()
            )));
        }
        if predictions.iter().any(|y| !y.is_finite()) {
            return Err(ModelError::NonFinite);
        }
        Ok(predictions)
    }
}

/// Metadata reported alongside a loaded model.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ModelInfo {
    /// Estimator class name, e.g. `RandomForestRegressor`.
    pub kind: String,
    pub n_features: usize,
    pub path: PathBuf,
    /// Hex SHA-256 of the artifact bytes.
    pub sha256: String,
    pub loaded_at: DateTime<Utc>,
}

/// An estimator together with where it came from.
#[derive(Debug)]
pub struct LoadedModel {
    model: PickledModel,
    info: ModelInfo,
}

impl LoadedModel {
    pub fn info(&self) -> &ModelInfo {
        &self.info
    }
}

impl AffinityModel for LoadedModel {
    fn n_features(&self) -> usize {
        self.model.n_features()
    }

    fn kind(&self) -> &str {
        self.model.kind()
    }

    fn predict(&self, features: &FeatureMatrix) -> Result<Vec<f64>> {
        self.model.predict(features)
    }
}

/// Read, hash and unpickle the artifact at `path`.
pub fn load(path: impl AsRef<Path>, expected_features: usize) -> Result<LoadedModel> {
    let path = path.as_ref();
    debug!("Reading model artifact from {}", path.display());
    let bytes = std::fs::read(path).map_err(|source| ModelError::Io { path: path.to_path_buf(), source })?;

    let mut hasher = Sha256::new();
    hasher.update(&bytes);
    let sha256 = format!("{:x}", hasher.finalize());

    let model = Python::attach(|py| -> Result<PickledModel> {
        let estimator = py
            .import("pickle")
            .and_then(|pickle| pickle.call_method1("loads", (PyBytes::new(py, &bytes),)))
            .map_err(|e| ModelError::Unpickle(e.to_string()))?;
        PickledModel::from_estimator(&estimator, expected_features)
    })?;

    let info = ModelInfo {
        kind: model.kind().to_string(),
        n_features: model.n_features(),
        path: path.to_path_buf(),
        sha256,
        loaded_at: Utc::now(),
    };
    info!(kind = %info.kind, n_features = info.n_features, sha256 = %info.sha256, "Model loaded from {}", path.display());
    Ok(LoadedModel { model, info })
}
