//! Hybrid voltage-regulator simulation.
//!
//! Provides:
//! - Three-mode regulator state machine (Normal / Overvoltage / Undervoltage)
//! - Fixed-step explicit update per mode with post-update transition guards
//! - Half-open fixed time grid and the run loop that drives it
//! - Disturbance injection ahead of every step

pub mod config;
pub mod error;
pub mod grid;
pub mod mode;
pub mod regulator;
pub mod sim;

pub use config::{SimulationConfig, SimulationConfigBuilder};
pub use error::{SimError, SimResult};
pub use grid::TimeGrid;
pub use mode::Mode;
pub use regulator::{INITIAL_VOLTAGE, RegulatorState, RegulatorStateMachine};
pub use sim::{
    SimProgress, Simulation, Trajectory, TrajectoryPoint, simulate, simulate_with_progress,
};
