//! Error types for stucco_atelier_macros.

use thiserror::Error;

/// Errors that can occur while resolving macros.
///
/// Malformed macro calls are never errors; they are left untouched.
#[derive(Debug, Error)]
pub enum MacroError {
    /// The source could not be parsed
    #[error("Failed to parse {filename}: {message}")]
    Parse { filename: String, message: String },

    /// The macro options could not be read
    #[error("Invalid macro options: {0}")]
    Options(#[from] serde_json::Error),
}
