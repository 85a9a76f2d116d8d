//! Scenario loading, saving, validation, and introspection.

use std::path::Path;
use vr_project::ProjectError;
use vr_project::schema::{DisturbanceDef, Scenario};

use crate::error::{AppError, AppResult};

/// Summary of a scenario for listing.
#[derive(Debug, Clone)]
pub struct ScenarioSummary {
    pub name: String,
    pub band: (f64, f64),
    pub dt_s: f64,
    pub t_end_s: f64,
    pub steps: usize,
    pub disturbance_kinds: Vec<&'static str>,
    pub seeded: bool,
}

/// Load a scenario from a `.yaml`, `.yml` or `.json` file.
pub fn load_scenario(path: &Path) -> AppResult<Scenario> {
    vr_project::load(path).map_err(|e| match e {
        ProjectError::Io(source) => AppError::ScenarioFileRead {
            path: path.to_path_buf(),
            source,
        },
        other => other.into(),
    })
}

/// Save a scenario, format chosen by extension.
pub fn save_scenario(path: &Path, scenario: &Scenario) -> AppResult<()> {
    vr_project::save(path, scenario)?;
    Ok(())
}

pub fn validate_scenario(scenario: &Scenario) -> AppResult<()> {
    vr_project::validate_scenario(scenario)?;
    Ok(())
}

/// Render a scenario as YAML, e.g. for `defaults`.
pub fn scenario_yaml(scenario: &Scenario) -> AppResult<String> {
    Ok(vr_project::to_yaml_string(scenario)?)
}

pub fn summarize_scenario(scenario: &Scenario) -> ScenarioSummary {
    let reg = &scenario.regulator;
    let steps = if reg.dt > 0.0 && reg.t_end > 0.0 {
        (reg.t_end / reg.dt).ceil() as usize
    } else {
        0
    };
    ScenarioSummary {
        name: scenario.name.clone(),
        band: (reg.v_min, reg.v_max),
        dt_s: reg.dt,
        t_end_s: reg.t_end,
        steps,
        disturbance_kinds: scenario.disturbances.iter().map(DisturbanceDef::kind).collect(),
        seeded: scenario
            .disturbances
            .iter()
            .all(|d| !matches!(d, DisturbanceDef::Noise { seed: None, .. })),
    }
}
