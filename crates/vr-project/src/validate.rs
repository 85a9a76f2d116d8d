//! Scenario validation logic.

use crate::schema::{DisturbanceDef, RegulatorDef, Scenario};

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("Invalid value: {field} = {value} ({reason})")]
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Unsupported version: {version}")]
    UnsupportedVersion { version: u32 },

    #[error("Scenario name must not be empty")]
    EmptyName,
}

pub fn validate_scenario(scenario: &Scenario) -> Result<(), ValidationError> {
    if scenario.version == 0 || scenario.version > crate::schema::LATEST_VERSION {
        return Err(ValidationError::UnsupportedVersion {
            version: scenario.version,
        });
    }
    if scenario.name.trim().is_empty() {
        return Err(ValidationError::EmptyName);
    }

    validate_regulator(&scenario.regulator)?;

    for (index, disturbance) in scenario.disturbances.iter().enumerate() {
        validate_disturbance(index, disturbance)?;
    }

    Ok(())
}

fn invalid(field: impl Into<String>, value: f64, reason: &str) -> ValidationError {
    ValidationError::InvalidValue {
        field: field.into(),
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

fn require_finite(field: &str, value: f64) -> Result<(), ValidationError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(invalid(field, value, "must be finite"))
    }
}

fn require_non_negative(field: &str, value: f64) -> Result<(), ValidationError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(invalid(field, value, "must be non-negative and finite"))
    }
}

fn require_positive(field: &str, value: f64) -> Result<(), ValidationError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(invalid(field, value, "must be positive and finite"))
    }
}

fn validate_regulator(reg: &RegulatorDef) -> Result<(), ValidationError> {
    require_finite("regulator.v_min", reg.v_min)?;
    require_finite("regulator.v_max", reg.v_max)?;
    if reg.v_min >= reg.v_max {
        return Err(invalid(
            "regulator.v_min",
            reg.v_min,
            &format!("must be less than v_max ({})", reg.v_max),
        ));
    }
    require_non_negative("regulator.a", reg.a)?;
    require_non_negative("regulator.b", reg.b)?;
    require_non_negative("regulator.c", reg.c)?;
    require_non_negative("regulator.d", reg.d)?;
    require_positive("regulator.dt", reg.dt)?;
    require_positive("regulator.t_end", reg.t_end)?;
    Ok(())
}

fn validate_disturbance(index: usize, def: &DisturbanceDef) -> Result<(), ValidationError> {
    let field = |name: &str| format!("disturbances[{}] ({}) {}", index, def.kind(), name);

    match def {
        DisturbanceDef::Noise { std_dev, .. } => require_non_negative(&field("std_dev"), *std_dev),
        DisturbanceDef::Sinusoid {
            amplitude,
            period_s,
            phase_rad,
        } => {
            require_finite(&field("amplitude"), *amplitude)?;
            require_positive(&field("period_s"), *period_s)?;
            require_finite(&field("phase_rad"), *phase_rad)
        }
        DisturbanceDef::Pulse {
            magnitude,
            start_s,
            end_s,
        } => {
            require_finite(&field("magnitude"), *magnitude)?;
            require_finite(&field("start_s"), *start_s)?;
            require_finite(&field("end_s"), *end_s)?;
            if start_s > end_s {
                return Err(invalid(
                    field("start_s"),
                    *start_s,
                    &format!("must not be after end_s ({})", end_s),
                ));
            }
            Ok(())
        }
        DisturbanceDef::Constant { value } => require_finite(&field("value"), *value),
    }
}
