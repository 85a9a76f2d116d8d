//! Scenario to runtime compilation: regulator config plus disturbance set.

use vr_disturbance::{Constant, DisturbanceSet, Pulse, Sinusoid, WhiteNoise};
use vr_project::schema::{DisturbanceDef, RegulatorDef, Scenario};
use vr_sim::SimulationConfig;

use crate::error::AppResult;
use crate::run_service::RunOverrides;

/// A scenario ready to simulate.
#[derive(Debug)]
pub struct CompiledScenario {
    pub name: String,
    pub config: SimulationConfig,
    pub disturbances: DisturbanceSet,
}

/// Build a validated config, applying `dt`/`t_end` overrides on top of the file.
pub fn compile_config(reg: &RegulatorDef, overrides: &RunOverrides) -> AppResult<SimulationConfig> {
    let config = SimulationConfig::builder()
        .band(reg.v_min, reg.v_max)
        .a(reg.a)
        .b(reg.b)
        .c(reg.c)
        .d(reg.d)
        .dt(overrides.dt_s.unwrap_or(reg.dt))
        .t_end(overrides.t_end_s.unwrap_or(reg.t_end))
        .build()?;
    Ok(config)
}

/// Instantiate disturbances in file order.
///
/// A seed override reseeds every noise source: the k-th `Noise` entry gets
/// `seed + k` so that several sources stay independent.
pub fn build_disturbances(
    defs: &[DisturbanceDef],
    seed_override: Option<u64>,
) -> AppResult<DisturbanceSet> {
    let mut set = DisturbanceSet::new();
    let mut noise_index = 0u64;

    for def in defs {
        match *def {
            DisturbanceDef::Noise { std_dev, seed } => {
                let seed = seed_override.map(|s| s.wrapping_add(noise_index)).or(seed);
                noise_index += 1;
                set.push(WhiteNoise::new(std_dev, seed)?);
            }
            DisturbanceDef::Sinusoid {
                amplitude,
                period_s,
                phase_rad,
            } => set.push(Sinusoid::new(amplitude, period_s)?.with_phase(phase_rad)),
            DisturbanceDef::Pulse {
                magnitude,
                start_s,
                end_s,
            } => set.push(Pulse::new(magnitude, start_s, end_s)?),
            DisturbanceDef::Constant { value } => set.push(Constant::new(value)?),
        }
    }

    Ok(set)
}

pub fn compile_scenario(scenario: &Scenario, overrides: &RunOverrides) -> AppResult<CompiledScenario> {
    vr_project::validate_scenario(scenario)?;
    Ok(CompiledScenario {
        name: scenario.name.clone(),
        config: compile_config(&scenario.regulator, overrides)?,
        disturbances: build_disturbances(&scenario.disturbances, overrides.seed)?,
    })
}
