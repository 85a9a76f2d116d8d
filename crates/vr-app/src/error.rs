//! Error types for the vr-app service layer.

use std::path::PathBuf;

/// Application error type that wraps errors from the backend crates
/// and provides a unified error interface for both CLI and GUI.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Scenario error: {0}")]
    Scenario(String),

    #[error("Failed to read scenario file: {path}")]
    ScenarioFileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Scenario validation failed: {0}")]
    Validation(String),

    #[error("Scenario compilation failed: {message}")]
    Compile { message: String },

    #[error("Simulation error: {0}")]
    Simulation(String),

    #[error("Results error: {0}")]
    Results(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for vr-app operations.
pub type AppResult<T> = Result<T, AppError>;

// Conversions from backend error types
impl From<vr_project::ProjectError> for AppError {
    fn from(err: vr_project::ProjectError) -> Self {
        match err {
            vr_project::ProjectError::Validation(e) => AppError::Validation(e.to_string()),
            other => AppError::Scenario(other.to_string()),
        }
    }
}

impl From<vr_project::ValidationError> for AppError {
    fn from(err: vr_project::ValidationError) -> Self {
        AppError::Validation(err.to_string())
    }
}

impl From<vr_disturbance::DisturbanceError> for AppError {
    fn from(err: vr_disturbance::DisturbanceError) -> Self {
        AppError::Compile {
            message: err.to_string(),
        }
    }
}

impl From<vr_sim::SimError> for AppError {
    fn from(err: vr_sim::SimError) -> Self {
        AppError::Simulation(err.to_string())
    }
}

impl From<vr_results::ResultsError> for AppError {
    fn from(err: vr_results::ResultsError) -> Self {
        AppError::Results(err.to_string())
    }
}
