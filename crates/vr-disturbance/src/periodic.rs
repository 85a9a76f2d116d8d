//! Periodic (sinusoidal) disturbance.

use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

use crate::error::{DisturbanceError, DisturbanceResult};
use crate::source::Disturbance;

/// `amplitude * sin(2*pi*t/period + phase)`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sinusoid {
    /// Peak voltage delta.
    pub amplitude: f64,
    /// Period in seconds, must be positive.
    pub period: f64,
    /// Phase offset in radians.
    pub phase: f64,
}

impl Sinusoid {
    pub fn new(amplitude: f64, period: f64) -> DisturbanceResult<Self> {
        vr_core::ensure_finite(amplitude, "amplitude must be finite")?;
        if !(period.is_finite() && period > 0.0) {
            return Err(DisturbanceError::InvalidArg {
                what: "period must be positive",
            });
        }
        Ok(Self {
            amplitude,
            period,
            phase: 0.0,
        })
    }

    pub fn with_phase(mut self, phase: f64) -> Self {
        self.phase = phase;
        self
    }

    pub fn value_at(&self, t: f64) -> f64 {
        self.amplitude * (2.0 * PI * t / self.period + self.phase).sin()
    }
}

impl Disturbance for Sinusoid {
    fn sample(&mut self, t: f64) -> f64 {
        self.value_at(t)
    }

    fn label(&self) -> &str {
        "sinusoid"
    }
}
