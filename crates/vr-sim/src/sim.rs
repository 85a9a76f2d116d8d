//! Simulation driver and trajectory recording.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use vr_disturbance::{Disturbance, DisturbanceSet};

use crate::config::SimulationConfig;
use crate::error::SimResult;
use crate::grid::TimeGrid;
use crate::mode::Mode;
use crate::regulator::RegulatorStateMachine;

/// One recorded step: grid time and the post-step voltage and mode.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrajectoryPoint {
    /// Grid time (seconds)
    pub t: f64,
    /// Voltage after the step at `t`
    pub voltage: f64,
    /// Mode after the step at `t`
    pub mode: Mode,
}

/// Ordered record of a single run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Trajectory {
    points: Vec<TrajectoryPoint>,
}

impl Trajectory {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            points: Vec::with_capacity(capacity),
        }
    }

    pub fn push(&mut self, point: TrajectoryPoint) {
        self.points.push(point);
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn points(&self) -> &[TrajectoryPoint] {
        &self.points
    }

    pub fn iter(&self) -> std::slice::Iter<'_, TrajectoryPoint> {
        self.points.iter()
    }

    pub fn last(&self) -> Option<&TrajectoryPoint> {
        self.points.last()
    }

    pub fn times(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.t).collect()
    }

    pub fn voltages(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.voltage).collect()
    }

    pub fn modes(&self) -> Vec<Mode> {
        self.points.iter().map(|p| p.mode).collect()
    }

    /// `(t, voltage)` pairs, the shape a line chart consumes.
    pub fn series(&self) -> Vec<[f64; 2]> {
        self.points.iter().map(|p| [p.t, p.voltage]).collect()
    }

    pub fn clear(&mut self) {
        self.points.clear();
    }
}

impl<'a> IntoIterator for &'a Trajectory {
    type Item = &'a TrajectoryPoint;
    type IntoIter = std::slice::Iter<'a, TrajectoryPoint>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.iter()
    }
}

impl From<Vec<TrajectoryPoint>> for Trajectory {
    fn from(points: Vec<TrajectoryPoint>) -> Self {
        Self { points }
    }
}

/// Progress snapshot handed to the progress callback.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimProgress {
    /// Zero-based index of the step just completed
    pub step: usize,
    /// Total grid points
    pub steps: usize,
    pub t: f64,
    pub t_end: f64,
    pub fraction_complete: f64,
    pub voltage: f64,
    pub mode: Mode,
}

/// Run one simulation from the reset state over the config's time grid.
pub fn simulate(
    config: &SimulationConfig,
    disturbances: &mut DisturbanceSet,
) -> SimResult<Trajectory> {
    simulate_with_progress(config, disturbances, None)
}

/// [`simulate`] with a callback invoked about every 1% of the grid and on the last step.
pub fn simulate_with_progress(
    config: &SimulationConfig,
    disturbances: &mut DisturbanceSet,
    progress: Option<&mut dyn FnMut(&SimProgress)>,
) -> SimResult<Trajectory> {
    let mut machine = RegulatorStateMachine::new(*config);
    drive(&mut machine, disturbances, progress)
}

fn drive(
    machine: &mut RegulatorStateMachine,
    disturbances: &mut DisturbanceSet,
    mut progress: Option<&mut dyn FnMut(&SimProgress)>,
) -> SimResult<Trajectory> {
    let config = *machine.config();
    config.validate()?;
    let grid = TimeGrid::new(config.dt(), config.t_end())?;

    if config.max_rate_dt() >= 1.0 {
        warn!(
            rate_dt = config.max_rate_dt(),
            "rate * dt >= 1: a single step may overshoot the band"
        );
    }

    machine.reset();
    let steps = grid.len();
    let report_every = (steps / 100).max(1);
    let mut trajectory = Trajectory::with_capacity(steps);

    debug!(steps, dt = grid.dt(), t_end = grid.t_end(), disturbances = disturbances.len(), "simulation start");

    for (i, t) in grid.iter().enumerate() {
        let delta = disturbances.sample_all(t)?;
        let (voltage, mode) = machine.step(delta);
        trajectory.push(TrajectoryPoint { t, voltage, mode });

        if let Some(cb) = progress.as_deref_mut()
            && (i % report_every == 0 || i + 1 == steps)
        {
            cb(&SimProgress {
                step: i,
                steps,
                t,
                t_end: grid.t_end(),
                fraction_complete: (i + 1) as f64 / steps as f64,
                voltage,
                mode,
            });
        }
    }

    debug!(
        steps,
        final_voltage = machine.voltage(),
        final_mode = %machine.mode(),
        "simulation complete"
    );
    Ok(trajectory)
}

/// Owned driver: config, state machine, disturbances and the last trajectory.
///
/// Each [`run`](Simulation::run) resets the machine and replaces the
/// trajectory. Stochastic disturbances are not reseeded between runs.
#[derive(Debug)]
pub struct Simulation {
    machine: RegulatorStateMachine,
    disturbances: DisturbanceSet,
    trajectory: Trajectory,
}

impl Simulation {
    pub fn new(config: SimulationConfig) -> Self {
        Self::with_disturbances(config, DisturbanceSet::new())
    }

    pub fn with_disturbances(config: SimulationConfig, disturbances: DisturbanceSet) -> Self {
        Self {
            machine: RegulatorStateMachine::new(config),
            disturbances,
            trajectory: Trajectory::default(),
        }
    }

    pub fn add_disturbance<D>(&mut self, disturbance: D)
    where
        D: Disturbance + 'static,
    {
        self.disturbances.push(disturbance);
    }

    pub fn config(&self) -> &SimulationConfig {
        self.machine.config()
    }

    pub fn machine(&self) -> &RegulatorStateMachine {
        &self.machine
    }

    pub fn disturbances(&self) -> &DisturbanceSet {
        &self.disturbances
    }

    pub fn trajectory(&self) -> &Trajectory {
        &self.trajectory
    }

    /// Back to V = 220, Normal, empty trajectory.
    pub fn reset(&mut self) {
        self.machine.reset();
        self.trajectory.clear();
    }

    pub fn run(&mut self) -> SimResult<&Trajectory> {
        self.run_with_progress(None)
    }

    pub fn run_with_progress(
        &mut self,
        progress: Option<&mut dyn FnMut(&SimProgress)>,
    ) -> SimResult<&Trajectory> {
        self.reset();
        self.trajectory = drive(&mut self.machine, &mut self.disturbances, progress)?;
        Ok(&self.trajectory)
    }

    pub fn into_trajectory(self) -> Trajectory {
        self.trajectory
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vr_disturbance::labeled;

    fn short_config() -> SimulationConfig {
        SimulationConfig::builder().t_end(1.0).build().unwrap()
    }

    #[test]
    fn trajectory_has_one_point_per_grid_time() {
        let traj = simulate(&short_config(), &mut DisturbanceSet::new()).unwrap();
        assert_eq!(traj.len(), 100);
        assert_eq!(traj.points()[0].t, 0.0);
        assert_eq!(traj.points()[0].voltage, 222.09);
    }

    #[test]
    fn progress_reaches_completion() {
        let mut events = Vec::new();
        let mut cb = |p: &SimProgress| events.push(*p);
        simulate_with_progress(&short_config(), &mut DisturbanceSet::new(), Some(&mut cb))
            .unwrap();
        let last = events.last().unwrap();
        assert_eq!(last.step, 99);
        assert_eq!(last.steps, 100);
        assert_eq!(last.fraction_complete, 1.0);
        assert!(events.windows(2).all(|w| w[0].step < w[1].step));
    }

    #[test]
    fn failing_disturbance_stops_run() {
        let mut set = DisturbanceSet::new()
            .with(labeled("spike", |t: f64| if t >= 0.5 { f64::INFINITY } else { 0.0 }));
        let err = simulate(&short_config(), &mut set).unwrap_err();
        match err {
            crate::SimError::Disturbance { label, t, value } => {
                assert_eq!(label, "spike");
                assert!(t >= 0.5);
                assert!(value.is_infinite());
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn rerun_replaces_trajectory() {
        let mut sim = Simulation::new(short_config());
        let first = sim.run().unwrap().clone();
        let second = sim.run().unwrap().clone();
        assert_eq!(first, second);
        assert_eq!(sim.trajectory().len(), 100);

        sim.reset();
        assert!(sim.trajectory().is_empty());
        assert_eq!(sim.machine().voltage(), 220.0);
    }
}
