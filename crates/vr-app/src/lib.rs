//! Shared application service layer for the voltage regulator simulator.
//!
//! This crate provides a unified interface for both CLI and GUI frontends,
//! centralizing scenario handling, scenario compilation, run execution,
//! export, and result summaries.

pub mod error;
pub mod progress;
pub mod query;
pub mod run_service;
pub mod scenario_compile;
pub mod scenario_service;

// Re-export key types for convenience
pub use error::{AppError, AppResult};
pub use progress::{RunProgressEvent, RunStage};
pub use query::{
    ModeCounts, ModeTransition, RunSummary, extract_voltage_series, get_run_summary,
    mode_transitions,
};
pub use run_service::{
    RunOverrides, RunRequest, RunResponse, RunTimingSummary, export_run, load_run, run_scenario,
    run_scenario_with_progress,
};
pub use scenario_compile::{CompiledScenario, build_disturbances, compile_config, compile_scenario};
pub use scenario_service::{
    ScenarioSummary, load_scenario, save_scenario, scenario_yaml, summarize_scenario,
    validate_scenario,
};
