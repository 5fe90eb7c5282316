//! Error types for stucco_atelier_hmr.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum HmrError {
    /// The compiled module could not be parsed
    #[error("Failed to parse {id}: {message}")]
    Parse { id: String, message: String },

    #[error("Invalid HMR options: {0}")]
    Options(#[from] serde_json::Error),
}
