//! Rectangular pulse and constant offset disturbances.

use serde::{Deserialize, Serialize};

use crate::error::{DisturbanceError, DisturbanceResult};
use crate::source::Disturbance;

/// `magnitude` while `start <= t <= end`, zero otherwise. Both edges are inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Pulse {
    pub magnitude: f64,
    pub start: f64,
    pub end: f64,
}

impl Pulse {
    pub fn new(magnitude: f64, start: f64, end: f64) -> DisturbanceResult<Self> {
        vr_core::ensure_finite(magnitude, "magnitude must be finite")?;
        vr_core::ensure_finite(start, "pulse start must be finite")?;
        vr_core::ensure_finite(end, "pulse end must be finite")?;
        if start > end {
            return Err(DisturbanceError::InvalidArg {
                what: "pulse start must not be after end",
            });
        }
        Ok(Self {
            magnitude,
            start,
            end,
        })
    }

    pub fn is_active(&self, t: f64) -> bool {
        self.start <= t && t <= self.end
    }

    pub fn value_at(&self, t: f64) -> f64 {
        if self.is_active(t) { self.magnitude } else { 0.0 }
    }
}

impl Disturbance for Pulse {
    fn sample(&mut self, t: f64) -> f64 {
        self.value_at(t)
    }

    fn label(&self) -> &str {
        "pulse"
    }
}

/// Fixed offset added every step.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Constant {
    pub value: f64,
}

impl Constant {
    pub fn new(value: f64) -> DisturbanceResult<Self> {
        vr_core::ensure_finite(value, "constant value must be finite")?;
        Ok(Self { value })
    }
}

impl Disturbance for Constant {
    fn sample(&mut self, _t: f64) -> f64 {
        self.value
    }

    fn label(&self) -> &str {
        "constant"
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn pulse_is_zero_outside_window(
            magnitude in -100.0_f64..100.0,
            start in 0.0_f64..50.0,
            width in 0.0_f64..50.0,
            t in -10.0_f64..150.0,
        ) {
            let end = start + width;
            let mut p = Pulse::new(magnitude, start, end).unwrap();
            let value = p.sample(t);
            if t < start || t > end {
                prop_assert_eq!(value, 0.0);
            } else {
                prop_assert_eq!(value, magnitude);
            }
        }

        #[test]
        fn constant_never_varies(value in -1.0e6_f64..1.0e6, t in 0.0_f64..1.0e4) {
            let mut c = Constant::new(value).unwrap();
            prop_assert_eq!(c.sample(t), value);
        }
    }
}
