//! Regulator and run-length configuration.

use serde::Serialize;

use crate::error::{SimError, SimResult};

pub const DEFAULT_V_MIN: f64 = 210.0;
pub const DEFAULT_V_MAX: f64 = 230.0;
pub const DEFAULT_A: f64 = 0.05;
pub const DEFAULT_B: f64 = 220.0;
pub const DEFAULT_C: f64 = 0.2;
pub const DEFAULT_D: f64 = 0.2;
pub const DEFAULT_DT: f64 = 0.01;
pub const DEFAULT_T_END: f64 = 100.0;

/// Immutable, validated simulation parameters.
///
/// Built through [`SimulationConfig::builder`] or [`Default`]; every
/// instance satisfies `v_min < v_max`, `dt > 0`, `t_end > 0`, and
/// non-negative finite `a`, `b`, `c`, `d`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SimulationConfig {
    v_min: f64,
    v_max: f64,
    a: f64,
    b: f64,
    c: f64,
    d: f64,
    dt: f64,
    t_end: f64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            v_min: DEFAULT_V_MIN,
            v_max: DEFAULT_V_MAX,
            a: DEFAULT_A,
            b: DEFAULT_B,
            c: DEFAULT_C,
            d: DEFAULT_D,
            dt: DEFAULT_DT,
            t_end: DEFAULT_T_END,
        }
    }
}

impl SimulationConfig {
    pub fn builder() -> SimulationConfigBuilder {
        SimulationConfigBuilder::default()
    }

    /// Lower decision boundary (V).
    pub fn v_min(&self) -> f64 {
        self.v_min
    }

    /// Upper decision boundary (V).
    pub fn v_max(&self) -> f64 {
        self.v_max
    }

    /// Normal-mode decay rate (1/s).
    pub fn a(&self) -> f64 {
        self.a
    }

    /// Normal-mode baseline drive (V/s).
    pub fn b(&self) -> f64 {
        self.b
    }

    /// Overvoltage correction rate (1/s).
    pub fn c(&self) -> f64 {
        self.c
    }

    /// Undervoltage correction rate (1/s).
    pub fn d(&self) -> f64 {
        self.d
    }

    /// Fixed time step (s).
    pub fn dt(&self) -> f64 {
        self.dt
    }

    /// Total simulated duration T (s), exclusive upper bound of the grid.
    pub fn t_end(&self) -> f64 {
        self.t_end
    }

    /// Fixed point of the Normal law, `b / a`. `None` when `a == 0`.
    pub fn normal_equilibrium(&self) -> Option<f64> {
        if self.a > 0.0 {
            Some(self.b / self.a)
        } else {
            None
        }
    }

    /// Largest `rate * dt` across the three laws.
    ///
    /// At or above 1.0 a single step can overshoot a guard region.
    pub fn max_rate_dt(&self) -> f64 {
        self.a.max(self.c).max(self.d) * self.dt
    }

    /// Whether `v` lies inside the closed band `[v_min, v_max]`.
    pub fn in_band(&self, v: f64) -> bool {
        self.v_min <= v && v <= self.v_max
    }

    pub fn validate(&self) -> SimResult<()> {
        vr_core::ensure_finite(self.v_min, "v_min must be finite")?;
        vr_core::ensure_finite(self.v_max, "v_max must be finite")?;
        if self.v_min >= self.v_max {
            return Err(SimError::InvalidConfiguration {
                what: "v_min must be less than v_max",
            });
        }
        vr_core::ensure_non_negative(self.a, "a must be finite and non-negative")?;
        vr_core::ensure_non_negative(self.b, "b must be finite and non-negative")?;
        vr_core::ensure_non_negative(self.c, "c must be finite and non-negative")?;
        vr_core::ensure_non_negative(self.d, "d must be finite and non-negative")?;
        vr_core::ensure_positive(self.dt, "dt must be positive")?;
        vr_core::ensure_positive(self.t_end, "t_end must be positive")?;
        Ok(())
    }
}

/// Unvalidated parameter set; [`build`](SimulationConfigBuilder::build) checks it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimulationConfigBuilder {
    raw: SimulationConfig,
}

impl Default for SimulationConfigBuilder {
    fn default() -> Self {
        Self {
            raw: SimulationConfig::default(),
        }
    }
}

impl SimulationConfigBuilder {
    pub fn v_min(mut self, v_min: f64) -> Self {
        self.raw.v_min = v_min;
        self
    }

    pub fn v_max(mut self, v_max: f64) -> Self {
        self.raw.v_max = v_max;
        self
    }

    pub fn band(self, v_min: f64, v_max: f64) -> Self {
        self.v_min(v_min).v_max(v_max)
    }

    pub fn a(mut self, a: f64) -> Self {
        self.raw.a = a;
        self
    }

    pub fn b(mut self, b: f64) -> Self {
        self.raw.b = b;
        self
    }

    pub fn c(mut self, c: f64) -> Self {
        self.raw.c = c;
        self
    }

    pub fn d(mut self, d: f64) -> Self {
        self.raw.d = d;
        self
    }

    pub fn dt(mut self, dt: f64) -> Self {
        self.raw.dt = dt;
        self
    }

    pub fn t_end(mut self, t_end: f64) -> Self {
        self.raw.t_end = t_end;
        self
    }

    pub fn build(self) -> SimResult<SimulationConfig> {
        self.raw.validate()?;
        Ok(self.raw)
    }
}

impl From<SimulationConfig> for SimulationConfigBuilder {
    fn from(raw: SimulationConfig) -> Self {
        Self { raw }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_reference_values() {
        let cfg = SimulationConfig::default();
        assert_eq!(cfg.v_min(), 210.0);
        assert_eq!(cfg.v_max(), 230.0);
        assert_eq!(cfg.a(), 0.05);
        assert_eq!(cfg.b(), 220.0);
        assert_eq!(cfg.c(), 0.2);
        assert_eq!(cfg.d(), 0.2);
        assert_eq!(cfg.dt(), 0.01);
        assert_eq!(cfg.t_end(), 100.0);
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn builder_without_changes_equals_default() {
        assert_eq!(
            SimulationConfig::builder().build().unwrap(),
            SimulationConfig::default()
        );
    }

    #[test]
    fn inverted_band_rejected() {
        let err = SimulationConfig::builder().band(230.0, 210.0).build().unwrap_err();
        assert_eq!(
            err,
            SimError::InvalidConfiguration {
                what: "v_min must be less than v_max"
            }
        );
        assert!(SimulationConfig::builder().band(220.0, 220.0).build().is_err());
    }

    #[test]
    fn non_positive_timing_rejected() {
        assert!(SimulationConfig::builder().dt(0.0).build().is_err());
        assert!(SimulationConfig::builder().dt(-0.01).build().is_err());
        assert!(SimulationConfig::builder().t_end(0.0).build().is_err());
        assert!(SimulationConfig::builder().t_end(-5.0).build().is_err());
    }

    #[test]
    fn negative_or_non_finite_rates_rejected() {
        assert!(SimulationConfig::builder().a(-0.1).build().is_err());
        assert!(SimulationConfig::builder().c(f64::NAN).build().is_err());
        assert!(SimulationConfig::builder().d(f64::INFINITY).build().is_err());
        assert!(SimulationConfig::builder().v_max(f64::NAN).build().is_err());
        assert!(SimulationConfig::builder().a(0.0).build().is_ok());
    }

    #[test]
    fn equilibrium_and_rate_dt() {
        let cfg = SimulationConfig::default();
        assert!((cfg.normal_equilibrium().unwrap() - 4400.0).abs() < 1e-9);
        assert!((cfg.max_rate_dt() - 0.002).abs() < 1e-15);

        let no_decay = SimulationConfig::builder().a(0.0).build().unwrap();
        assert_eq!(no_decay.normal_equilibrium(), None);
    }

    #[test]
    fn band_is_closed() {
        let cfg = SimulationConfig::default();
        assert!(cfg.in_band(210.0));
        assert!(cfg.in_band(230.0));
        assert!(!cfg.in_band(230.000_001));
        assert!(!cfg.in_band(f64::NAN));
    }
}
