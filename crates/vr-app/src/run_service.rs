//! Run execution and export service.

use std::path::Path;
use std::time::Instant;

use tracing::info;
use vr_core::Timer;
use vr_project::schema::Scenario;
use vr_results::{RunManifest, RunParameters, TrajectoryRecord};
use vr_sim::{SimProgress, Trajectory, simulate_with_progress};

use crate::error::{AppError, AppResult};
use crate::progress::{RunProgressEvent, RunStage};
use crate::scenario_compile;

/// Command-line style overrides applied on top of a scenario file.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RunOverrides {
    pub dt_s: Option<f64>,
    pub t_end_s: Option<f64>,
    /// Reseeds every noise source
    pub seed: Option<u64>,
}

/// Request to execute a run.
pub struct RunRequest<'a> {
    pub scenario: &'a Scenario,
    pub overrides: RunOverrides,
}

#[derive(Debug, Clone, Default)]
pub struct RunTimingSummary {
    pub compile_time_s: f64,
    pub simulate_time_s: f64,
    pub total_time_s: f64,
}

/// Response from a run execution.
#[derive(Debug, Clone)]
pub struct RunResponse {
    pub manifest: RunManifest,
    pub trajectory: Trajectory,
    pub timing: RunTimingSummary,
}

impl RunResponse {
    pub fn records(&self) -> Vec<TrajectoryRecord> {
        vr_results::records_from(&self.trajectory)
    }
}

fn emit_progress(
    progress_cb: &mut Option<&mut dyn FnMut(RunProgressEvent)>,
    stage: RunStage,
    started: Instant,
    message: Option<String>,
    sim: Option<SimProgress>,
) {
    if let Some(cb) = progress_cb.as_deref_mut() {
        let mut event = RunProgressEvent::stage(stage, started.elapsed().as_secs_f64(), message);
        event.sim = sim;
        cb(event);
    }
}

/// Execute a run.
pub fn run_scenario(request: &RunRequest) -> AppResult<RunResponse> {
    run_scenario_with_progress(request, None)
}

/// Execute a run and stream progress events.
pub fn run_scenario_with_progress(
    request: &RunRequest,
    mut progress_cb: Option<&mut dyn FnMut(RunProgressEvent)>,
) -> AppResult<RunResponse> {
    let started = Instant::now();
    let mut timing = RunTimingSummary::default();

    emit_progress(
        &mut progress_cb,
        RunStage::CompilingScenario,
        started,
        Some("Compiling scenario".to_string()),
        None,
    );

    let compile_timer = Timer::start("compile");
    let mut compiled = scenario_compile::compile_scenario(request.scenario, &request.overrides)?;
    timing.compile_time_s = compile_timer.stop();

    let config = compiled.config;
    let labels = compiled.disturbances.labels();
    info!(
        scenario = %compiled.name,
        dt = config.dt(),
        t_end = config.t_end(),
        disturbances = labels.len(),
        "run started"
    );

    emit_progress(
        &mut progress_cb,
        RunStage::Simulating,
        started,
        Some("Simulating".to_string()),
        None,
    );

    let sim_timer = Timer::start("simulate");
    let trajectory = {
        let mut on_step = |p: &SimProgress| {
            emit_progress(&mut progress_cb, RunStage::Simulating, started, None, Some(*p));
        };
        simulate_with_progress(&config, &mut compiled.disturbances, Some(&mut on_step))?
    };
    timing.simulate_time_s = sim_timer.stop();
    timing.total_time_s = started.elapsed().as_secs_f64();

    let manifest = RunManifest {
        scenario_name: compiled.name,
        parameters: RunParameters::from(&config),
        steps: trajectory.len(),
        disturbances: labels,
        seed: request.overrides.seed,
        elapsed_s: timing.total_time_s,
    };

    info!(
        steps = manifest.steps,
        final_voltage = trajectory.last().map(|p| p.voltage),
        elapsed_s = timing.total_time_s,
        "run finished"
    );

    emit_progress(
        &mut progress_cb,
        RunStage::Completed,
        started,
        Some("Run completed".to_string()),
        None,
    );

    Ok(RunResponse {
        manifest,
        trajectory,
        timing,
    })
}

/// Write a run by extension (`.csv` or `.jsonl`) with a manifest alongside.
pub fn export_run(response: &RunResponse, path: &Path) -> AppResult<()> {
    let records = response.records();
    match path.extension().and_then(|e| e.to_str()) {
        Some("csv") => vr_results::write_csv(path, &records)?,
        Some("jsonl") => vr_results::write_jsonl(path, &records)?,
        _ => {
            return Err(AppError::InvalidInput(format!(
                "Unsupported output format: {} (expected .csv or .jsonl)",
                path.display()
            )));
        }
    }
    let manifest_path = vr_results::manifest_path_for(path);
    vr_results::write_manifest(&manifest_path, &response.manifest)?;
    info!(
        path = %path.display(),
        manifest = %manifest_path.display(),
        records = records.len(),
        "run exported"
    );
    Ok(())
}

/// Load an exported run and its manifest, if one sits next to it.
pub fn load_run(path: &Path) -> AppResult<(Option<RunManifest>, Vec<TrajectoryRecord>)> {
    let records = match path.extension().and_then(|e| e.to_str()) {
        Some("csv") => vr_results::read_csv(path)?,
        Some("jsonl") => vr_results::read_jsonl(path)?,
        _ => {
            return Err(AppError::InvalidInput(format!(
                "Unsupported run file: {}",
                path.display()
            )));
        }
    };

    let manifest_path = vr_results::manifest_path_for(path);
    let manifest = if manifest_path.exists() {
        Some(vr_results::read_manifest(&manifest_path)?)
    } else {
        None
    };

    Ok((manifest, records))
}
