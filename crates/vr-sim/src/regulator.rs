//! Regulator state machine: voltage + mode, advanced one `dt` per step.
//!
//! Per step the disturbance is added to V, the law for the *current* mode
//! is applied with explicit Euler, and the transition guards are evaluated
//! on the post-update voltage:
//!
//! | Mode | dV/dt | Leaves when |
//! |---|---|---|
//! | Normal | `-a*V + b` | `V > V_max` (Overvoltage) or `V < V_min` (Undervoltage) |
//! | Overvoltage | `-c*(V - V_max)` | `V_min <= V <= V_max` |
//! | Undervoltage | `d*(V_min - V)` | `V_min <= V <= V_max` |
//!
//! A single large step may jump across the band entirely; guards are not
//! re-evaluated within a step.

use tracing::debug;

use crate::config::SimulationConfig;
use crate::mode::Mode;

/// Voltage at reset. Fixed, independent of the configured band.
pub const INITIAL_VOLTAGE: f64 = 220.0;

/// Snapshot of the regulator.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RegulatorState {
    pub voltage: f64,
    pub mode: Mode,
}

impl Default for RegulatorState {
    fn default() -> Self {
        Self {
            voltage: INITIAL_VOLTAGE,
            mode: Mode::Normal,
        }
    }
}

#[derive(Debug, Clone)]
pub struct RegulatorStateMachine {
    config: SimulationConfig,
    state: RegulatorState,
}

impl RegulatorStateMachine {
    /// New machine in the reset state.
    pub fn new(config: SimulationConfig) -> Self {
        Self {
            config,
            state: RegulatorState::default(),
        }
    }

    /// Resume from an arbitrary snapshot.
    pub fn from_state(config: SimulationConfig, state: RegulatorState) -> Self {
        Self { config, state }
    }

    pub fn reset(&mut self) {
        self.state = RegulatorState::default();
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    pub fn state(&self) -> RegulatorState {
        self.state
    }

    pub fn voltage(&self) -> f64 {
        self.state.voltage
    }

    pub fn mode(&self) -> Mode {
        self.state.mode
    }

    /// Right-hand side of the law active in `mode`, evaluated at `v`.
    pub fn derivative(&self, mode: Mode, v: f64) -> f64 {
        let cfg = &self.config;
        match mode {
            Mode::Normal => -cfg.a() * v + cfg.b(),
            Mode::Overvoltage => -cfg.c() * (v - cfg.v_max()),
            Mode::Undervoltage => cfg.d() * (cfg.v_min() - v),
        }
    }

    /// Mode that follows `mode` once the step has produced voltage `v`.
    pub fn next_mode(&self, mode: Mode, v: f64) -> Mode {
        let cfg = &self.config;
        match mode {
            Mode::Normal => {
                if v > cfg.v_max() {
                    Mode::Overvoltage
                } else if v < cfg.v_min() {
                    Mode::Undervoltage
                } else {
                    Mode::Normal
                }
            }
            Mode::Overvoltage | Mode::Undervoltage => {
                if cfg.in_band(v) {
                    Mode::Normal
                } else {
                    mode
                }
            }
        }
    }

    /// Add `disturbance`, advance one `dt` under the current mode, apply guards.
    ///
    /// Inputs are not checked for NaN/Inf here.
    pub fn step(&mut self, disturbance: f64) -> (f64, Mode) {
        let mode = self.state.mode;
        let v = self.state.voltage + disturbance;
        let v_next = v + self.derivative(mode, v) * self.config.dt();
        let mode_next = self.next_mode(mode, v_next);

        if mode_next != mode {
            debug!(from = %mode, to = %mode_next, voltage = v_next, "mode transition");
        }

        self.state = RegulatorState {
            voltage: v_next,
            mode: mode_next,
        };
        (v_next, mode_next)
    }
}
