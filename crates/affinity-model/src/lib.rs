//! affinity-model: the pre-trained pKi regressor.
//!
//! The model is the scikit-learn estimator pickled by the training pipeline.
//! It is unpickled once at startup through an embedded Python interpreter and
//! shared read-only behind `Arc<dyn AffinityModel>`.

pub mod affinity;
pub mod artifact;
pub mod error;
pub mod model;

pub use affinity::{ki_from_pki, Affinity};
pub use artifact::{load, LoadedModel, ModelInfo, PickledModel};
pub use error::{ModelError, Result};
pub use model::{AffinityModel, FeatureMatrix};
