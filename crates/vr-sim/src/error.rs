//! Error types for simulation operations.

use thiserror::Error;

/// Errors encountered while configuring or running a simulation.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SimError {
    #[error("Invalid configuration: {what}")]
    InvalidConfiguration { what: &'static str },

    #[error("Disturbance '{label}' produced a non-finite value at t={t}: {value}")]
    Disturbance { label: String, t: f64, value: f64 },

    #[error("Backend error: {message}")]
    Backend { message: String },
}

pub type SimResult<T> = Result<T, SimError>;

impl From<vr_core::VrError> for SimError {
    fn from(e: vr_core::VrError) -> Self {
        match e {
            vr_core::VrError::NonFinite { what, .. } | vr_core::VrError::InvalidArg { what } => {
                SimError::InvalidConfiguration { what }
            }
            other => SimError::Backend {
                message: other.to_string(),
            },
        }
    }
}

impl From<vr_disturbance::DisturbanceError> for SimError {
    fn from(e: vr_disturbance::DisturbanceError) -> Self {
        match e {
            vr_disturbance::DisturbanceError::NonFinite { label, t, value } => {
                SimError::Disturbance { label, t, value }
            }
            other => SimError::Backend {
                message: other.to_string(),
            },
        }
    }
}
