//! Query helpers for summarizing runs.

use vr_results::TrajectoryRecord;
use vr_sim::Mode;

use crate::error::{AppError, AppResult};

/// Steps spent in each mode.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ModeCounts {
    pub normal: usize,
    pub overvoltage: usize,
    pub undervoltage: usize,
}

impl ModeCounts {
    fn add(&mut self, mode: Mode) {
        match mode {
            Mode::Normal => self.normal += 1,
            Mode::Overvoltage => self.overvoltage += 1,
            Mode::Undervoltage => self.undervoltage += 1,
        }
    }

    pub fn get(&self, mode: Mode) -> usize {
        match mode {
            Mode::Normal => self.normal,
            Mode::Overvoltage => self.overvoltage,
            Mode::Undervoltage => self.undervoltage,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ModeTransition {
    pub time_s: f64,
    /// Voltage of the first record in the new mode
    pub voltage_v: f64,
    pub from: Mode,
    pub to: Mode,
}

/// Summary of a run's time range, voltage envelope and mode history.
#[derive(Debug, Clone)]
pub struct RunSummary {
    pub time_range: (f64, f64),
    pub record_count: usize,
    pub voltage_range: (f64, f64),
    pub final_voltage: f64,
    pub final_mode: Mode,
    pub mode_counts: ModeCounts,
    /// Number of times the run entered Overvoltage or Undervoltage
    pub excursions: usize,
    pub transitions: usize,
}

impl RunSummary {
    /// Fraction of steps spent in Normal.
    pub fn in_band_fraction(&self) -> f64 {
        self.mode_counts.normal as f64 / self.record_count as f64
    }
}

/// Mode changes between consecutive records. The run is taken to start in
/// Normal, so a first record outside Normal counts as a transition.
pub fn mode_transitions(records: &[TrajectoryRecord]) -> Vec<ModeTransition> {
    let mut transitions = Vec::new();
    let mut prev = Mode::Normal;
    for r in records {
        if r.mode != prev {
            transitions.push(ModeTransition {
                time_s: r.time_s,
                voltage_v: r.voltage_v,
                from: prev,
                to: r.mode,
            });
            prev = r.mode;
        }
    }
    transitions
}

/// Get run summary from trajectory records.
pub fn get_run_summary(records: &[TrajectoryRecord]) -> AppResult<RunSummary> {
    let (Some(first), Some(last)) = (records.first(), records.last()) else {
        return Err(AppError::InvalidInput("No records in run".to_string()));
    };

    let mut mode_counts = ModeCounts::default();
    let mut v_lo = f64::INFINITY;
    let mut v_hi = f64::NEG_INFINITY;
    for r in records {
        mode_counts.add(r.mode);
        v_lo = v_lo.min(r.voltage_v);
        v_hi = v_hi.max(r.voltage_v);
    }

    let transitions = mode_transitions(records);
    let excursions = transitions.iter().filter(|t| t.to.is_excursion()).count();

    Ok(RunSummary {
        time_range: (first.time_s, last.time_s),
        record_count: records.len(),
        voltage_range: (v_lo, v_hi),
        final_voltage: last.voltage_v,
        final_mode: last.mode,
        mode_counts,
        excursions,
        transitions: transitions.len(),
    })
}

/// `(t, V)` pairs for plotting.
pub fn extract_voltage_series(records: &[TrajectoryRecord]) -> Vec<[f64; 2]> {
    records.iter().map(|r| [r.time_s, r.voltage_v]).collect()
}
