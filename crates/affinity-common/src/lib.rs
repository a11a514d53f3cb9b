//! affinity-common: configuration and error types shared by the affinity crates.

pub mod config;
pub mod error;

pub use config::AppConfig;
pub use error::{AffinityError, Result};
