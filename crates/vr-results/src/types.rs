//! Result data types.

use serde::{Deserialize, Serialize};
use vr_sim::{Mode, SimulationConfig, Trajectory, TrajectoryPoint};

/// One exported trajectory row.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrajectoryRecord {
    pub time_s: f64,
    pub voltage_v: f64,
    pub mode: Mode,
}

impl From<&TrajectoryPoint> for TrajectoryRecord {
    fn from(p: &TrajectoryPoint) -> Self {
        Self {
            time_s: p.t,
            voltage_v: p.voltage,
            mode: p.mode,
        }
    }
}

impl From<TrajectoryRecord> for TrajectoryPoint {
    fn from(r: TrajectoryRecord) -> Self {
        Self {
            t: r.time_s,
            voltage: r.voltage_v,
            mode: r.mode,
        }
    }
}

pub fn records_from(trajectory: &Trajectory) -> Vec<TrajectoryRecord> {
    trajectory.iter().map(TrajectoryRecord::from).collect()
}

/// Regulator parameters as recorded next to an exported run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RunParameters {
    pub v_min: f64,
    pub v_max: f64,
    pub a: f64,
    pub b: f64,
    pub c: f64,
    pub d: f64,
    pub dt_s: f64,
    pub t_end_s: f64,
}

impl From<&SimulationConfig> for RunParameters {
    fn from(cfg: &SimulationConfig) -> Self {
        Self {
            v_min: cfg.v_min(),
            v_max: cfg.v_max(),
            a: cfg.a(),
            b: cfg.b(),
            c: cfg.c(),
            d: cfg.d(),
            dt_s: cfg.dt(),
            t_end_s: cfg.t_end(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunManifest {
    pub scenario_name: String,
    pub parameters: RunParameters,
    pub steps: usize,
    /// Disturbance labels in summation order
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub disturbances: Vec<String>,
    /// Noise seed override, if the run used one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
    pub elapsed_s: f64,
}
