//! Scenario schema definitions.

use serde::{Deserialize, Serialize};

/// Newest scenario file version this crate reads and writes.
pub const LATEST_VERSION: u32 = 1;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Scenario {
    #[serde(default = "default_version")]
    pub version: u32,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub regulator: RegulatorDef,
    #[serde(default)]
    pub disturbances: Vec<DisturbanceDef>,
}

fn default_version() -> u32 {
    LATEST_VERSION
}

/// Regulator parameters. Any omitted field takes the reference default.
///
/// ```yaml
/// regulator:
///   v_min: 210.0
///   v_max: 230.0
///   dt: 0.01
/// ```
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct RegulatorDef {
    /// Lower decision boundary (V)
    pub v_min: f64,
    /// Upper decision boundary (V)
    pub v_max: f64,
    /// Normal-mode decay rate (1/s)
    pub a: f64,
    /// Normal-mode baseline drive (V/s)
    pub b: f64,
    /// Overvoltage correction rate (1/s)
    pub c: f64,
    /// Undervoltage correction rate (1/s)
    pub d: f64,
    /// Time step (s)
    pub dt: f64,
    /// Duration (s), exclusive end of the time grid
    pub t_end: f64,
}

impl Default for RegulatorDef {
    fn default() -> Self {
        Self {
            v_min: 210.0,
            v_max: 230.0,
            a: 0.05,
            b: 220.0,
            c: 0.2,
            d: 0.2,
            dt: 0.01,
            t_end: 100.0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type")]
pub enum DisturbanceDef {
    /// Zero-mean Gaussian noise.
    Noise {
        std_dev: f64,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        seed: Option<u64>,
    },
    /// `amplitude * sin(2*pi*t/period_s + phase_rad)`
    Sinusoid {
        amplitude: f64,
        period_s: f64,
        #[serde(default)]
        phase_rad: f64,
    },
    /// `magnitude` on the closed window `[start_s, end_s]`.
    Pulse {
        magnitude: f64,
        start_s: f64,
        end_s: f64,
    },
    Constant {
        value: f64,
    },
}

impl DisturbanceDef {
    pub fn kind(&self) -> &'static str {
        match self {
            DisturbanceDef::Noise { .. } => "Noise",
            DisturbanceDef::Sinusoid { .. } => "Sinusoid",
            DisturbanceDef::Pulse { .. } => "Pulse",
            DisturbanceDef::Constant { .. } => "Constant",
        }
    }
}

impl Scenario {
    /// Reference parameters, no disturbances.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            version: LATEST_VERSION,
            name: name.into(),
            description: None,
            regulator: RegulatorDef::default(),
            disturbances: Vec::new(),
        }
    }

    /// Reference parameters with noise (sigma 0.5 V), a 5 V sinusoid of
    /// period 50 s, and a +10 V pulse over [20 s, 40 s].
    pub fn reference(seed: Option<u64>) -> Self {
        Self {
            description: Some("Reference regulator with noise, periodic and pulse disturbances".to_string()),
            disturbances: vec![
                DisturbanceDef::Noise { std_dev: 0.5, seed },
                DisturbanceDef::Sinusoid {
                    amplitude: 5.0,
                    period_s: 50.0,
                    phase_rad: 0.0,
                },
                DisturbanceDef::Pulse {
                    magnitude: 10.0,
                    start_s: 20.0,
                    end_s: 40.0,
                },
            ],
            ..Self::new("reference")
        }
    }
}

/// Reference parameters, no disturbances.
pub fn default_scenario() -> Scenario {
    Scenario::new("defaults")
}

/// The reference scenario with its noise seeded at 42.
pub fn reference_scenario() -> Scenario {
    Scenario::reference(Some(42))
}
