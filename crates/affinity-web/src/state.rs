//! Shared application state for the web server.

use std::sync::Arc;

use affinity_chem::{ChemToolkit, DESCRIPTOR_LENGTH};
use affinity_common::AppConfig;
use affinity_model::{AffinityModel, ModelInfo};
use chrono::{DateTime, Utc};
use tracing::warn;

/// Outcome of the startup model load.
#[derive(Clone)]
pub enum ModelStatus {
    Loaded {
        model: Arc<dyn AffinityModel>,
        /// Artifact metadata; absent for models injected in-process.
        info: Option<ModelInfo>,
    },
    Unavailable(String),
}

impl ModelStatus {
    pub fn is_loaded(&self) -> bool {
        matches!(self, ModelStatus::Loaded { .. })
    }
}

/// Shared state injected into every Axum handler. Immutable after startup.
#[derive(Clone)]
pub struct AppState {
    pub config: AppConfig,
    /// Parses, fingerprints and draws SMILES.
    pub chem: Arc<dyn ChemToolkit>,
    pub model: ModelStatus,
    pub started_at: DateTime<Utc>,
}

impl AppState {
    /// Load the model named by `config`.
    ///
    /// A load failure leaves the service up with predictions disabled,
    /// unless `require_model` is set.
    pub fn from_config(config: AppConfig, chem: Arc<dyn ChemToolkit>) -> anyhow::Result<Self> {
        let model = match affinity_model::load(&config.model_path, DESCRIPTOR_LENGTH) {
            Ok(loaded) => {
                let info = loaded.info().clone();
                ModelStatus::Loaded { model: Arc::new(loaded), info: Some(info) }
            }
            Err(e) if config.require_model => {
                return Err(anyhow::anyhow!("model required but failed to load: {e}"));
            }
            Err(e) => {
                warn!("Model load failed, /predict will answer 503: {}", e);
                ModelStatus::Unavailable(e.to_string())
            }
        };
        Ok(Self { config, chem, model, started_at: Utc::now() })
    }

    pub fn with_model(config: AppConfig, chem: Arc<dyn ChemToolkit>, model: Arc<dyn AffinityModel>) -> Self {
        Self {
            config,
            chem,
            model: ModelStatus::Loaded { model, info: None },
            started_at: Utc::now(),
        }
    }

    pub fn without_model(config: AppConfig, chem: Arc<dyn ChemToolkit>, reason: impl Into<String>) -> Self {
        Self {
            config,
            chem,
            model: ModelStatus::Unavailable(reason.into()),
            started_at: Utc::now(),
        }
    }
}

pub type SharedState = Arc<AppState>;

#[cfg(test)]
mod tests {
    use affinity_chem::{ChemError, DepictOptions, Descriptors};

    use super::*;

    struct NoChem;

    impl ChemToolkit for NoChem {
        fn name(&self) -> String {
            "none".into()
        }

        fn descriptors(&self, smiles: &str) -> affinity_chem::Result<Descriptors> {
            Err(ChemError::InvalidSmiles(smiles.into()))
        }

        fn render_png(&self, smiles: &str, _opts: &DepictOptions) -> affinity_chem::Result<Vec<u8>> {
            Err(ChemError::InvalidSmiles(smiles.into()))
        }
    }

    #[test]
    fn test_missing_model_is_unavailable() {
        let dir = tempfile::tempdir().unwrap();
        let config = AppConfig { model_path: dir.path().join("absent.pkl"), ..AppConfig::default() };
        let state = AppState::from_config(config, Arc::new(NoChem)).unwrap();
        assert!(!state.model.is_loaded());
    }

    #[test]
    fn test_required_model_fails_startup() {
        let dir = tempfile::tempdir().unwrap();
        let config = AppConfig {
            model_path: dir.path().join("absent.pkl"),
            require_model: true,
            ..AppConfig::default()
        };
        assert!(AppState::from_config(config, Arc::new(NoChem)).is_err());
    }
}
