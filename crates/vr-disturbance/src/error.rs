//! Error types for disturbance sources.

use thiserror::Error;

/// Result type for disturbance operations.
pub type DisturbanceResult<T> = Result<T, DisturbanceError>;

/// Errors raised while building or sampling disturbances.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DisturbanceError {
    /// Invalid parameter passed to a disturbance constructor.
    #[error("Invalid argument: {what}")]
    InvalidArg { what: &'static str },

    /// A disturbance produced NaN or an infinite delta.
    #[error("Disturbance '{label}' produced a non-finite value at t={t}: {value}")]
    NonFinite { label: String, t: f64, value: f64 },
}

impl From<vr_core::VrError> for DisturbanceError {
    fn from(e: vr_core::VrError) -> Self {
        match e {
            vr_core::VrError::NonFinite { what, .. }
            | vr_core::VrError::InvalidArg { what }
            | vr_core::VrError::Invariant { what } => DisturbanceError::InvalidArg { what },
        }
    }
}
