//! Error types for scenario loading, validation and export

use thiserror::Error;

/// Errors surfaced before or around a projection run.
///
/// Degenerate metrics (undefined WACC, LCOE, IRR) are not errors; they are
/// carried as `None` on the projection result.
#[derive(Debug, Error)]
pub enum FeasibilityError {
    #[error("Invalid input: {field} - {reason}")]
    InvalidInput { field: String, reason: String },

    #[error("Unknown scenario parameter: {0}")]
    UnknownParameter(String),

    #[error("Cannot parse value '{value}' for {field}")]
    Parse { field: String, value: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Csv(#[from] csv::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl FeasibilityError {
    pub fn invalid(field: &str, reason: impl Into<String>) -> Self {
        FeasibilityError::InvalidInput {
            field: field.to_string(),
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, FeasibilityError>;
