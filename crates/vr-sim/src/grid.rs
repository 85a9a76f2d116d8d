//! Half-open fixed time grid `{0, dt, 2*dt, ...} < t_end`.

use crate::error::{SimError, SimResult};

/// Upper bound on grid length; longer grids are treated as a misconfiguration.
pub const MAX_GRID_STEPS: usize = 100_000_000;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeGrid {
    dt: f64,
    t_end: f64,
    len: usize,
}

impl TimeGrid {
    pub fn new(dt: f64, t_end: f64) -> SimResult<Self> {
        vr_core::ensure_positive(dt, "dt must be positive")?;
        vr_core::ensure_positive(t_end, "t_end must be positive")?;

        let steps = (t_end / dt).ceil();
        if steps > MAX_GRID_STEPS as f64 {
            return Err(SimError::InvalidConfiguration {
                what: "time grid exceeds the maximum number of steps",
            });
        }

        Ok(Self {
            dt,
            t_end,
            len: steps as usize,
        })
    }

    /// Number of grid points, `ceil(t_end / dt)`.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn dt(&self) -> f64 {
        self.dt
    }

    pub fn t_end(&self) -> f64 {
        self.t_end
    }

    /// Time of grid point `i`, computed as `i * dt` so error does not accumulate.
    pub fn t(&self, i: usize) -> f64 {
        i as f64 * self.dt
    }

    pub fn iter(&self) -> impl Iterator<Item = f64> {
        let dt = self.dt;
        (0..self.len).map(move |i| i as f64 * dt)
    }
}
