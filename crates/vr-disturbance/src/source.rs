//! The disturbance trait and the ordered set the driver samples from.

use crate::error::{DisturbanceError, DisturbanceResult};

/// Additive voltage perturbation as a function of simulated time.
///
/// Deterministic sources ignore their `&mut self`; stochastic sources keep
/// their RNG in it so a seeded source replays the same sequence.
pub trait Disturbance {
    /// Voltage delta to add before the regulator steps at time `t` (seconds).
    fn sample(&mut self, t: f64) -> f64;

    /// Human-readable name, used in logs and error messages.
    fn label(&self) -> &str {
        "closure"
    }
}

impl<F> Disturbance for F
where
    F: FnMut(f64) -> f64,
{
    fn sample(&mut self, t: f64) -> f64 {
        self(t)
    }
}

/// A closure paired with a label.
pub struct Labeled<F> {
    label: String,
    f: F,
}

/// Attach a label to a closure so errors can name it.
pub fn labeled<F>(label: impl Into<String>, f: F) -> Labeled<F>
where
    F: FnMut(f64) -> f64,
{
    Labeled {
        label: label.into(),
        f,
    }
}

impl<F> Disturbance for Labeled<F>
where
    F: FnMut(f64) -> f64,
{
    fn sample(&mut self, t: f64) -> f64 {
        (self.f)(t)
    }

    fn label(&self) -> &str {
        &self.label
    }
}

/// Ordered collection of disturbances, summed at each sample time.
#[derive(Default)]
pub struct DisturbanceSet {
    sources: Vec<Box<dyn Disturbance>>,
}

impl DisturbanceSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a disturbance. Order only affects float summation order.
    pub fn push<D>(&mut self, disturbance: D)
    where
        D: Disturbance + 'static,
    {
        self.sources.push(Box::new(disturbance));
    }

    pub fn push_boxed(&mut self, disturbance: Box<dyn Disturbance>) {
        self.sources.push(disturbance);
    }

    /// Builder-style `push`.
    pub fn with<D>(mut self, disturbance: D) -> Self
    where
        D: Disturbance + 'static,
    {
        self.push(disturbance);
        self
    }

    pub fn len(&self) -> usize {
        self.sources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }

    pub fn labels(&self) -> Vec<String> {
        self.sources.iter().map(|d| d.label().to_string()).collect()
    }

    /// Sum of all disturbances at time `t`.
    ///
    /// An empty set yields exactly `0.0`. Fails on the first non-finite
    /// sample, or when the finite samples overflow the sum.
    pub fn sample_all(&mut self, t: f64) -> DisturbanceResult<f64> {
        let mut total = 0.0;
        for source in self.sources.iter_mut() {
            let value = source.sample(t);
            if !value.is_finite() {
                return Err(DisturbanceError::NonFinite {
                    label: source.label().to_string(),
                    t,
                    value,
                });
            }
            total += value;
        }
        if !total.is_finite() {
            return Err(DisturbanceError::NonFinite {
                label: "sum".to_string(),
                t,
                value: total,
            });
        }
        Ok(total)
    }
}

impl From<Vec<Box<dyn Disturbance>>> for DisturbanceSet {
    fn from(sources: Vec<Box<dyn Disturbance>>) -> Self {
        Self { sources }
    }
}

impl std::fmt::Debug for DisturbanceSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DisturbanceSet")
            .field("labels", &self.labels())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_set_samples_zero() {
        let mut set = DisturbanceSet::new();
        assert!(set.is_empty());
        assert_eq!(set.sample_all(3.0).unwrap(), 0.0);
    }

    #[test]
    fn closures_are_summed() {
        let mut set = DisturbanceSet::new()
            .with(|_t: f64| 1.5)
            .with(|t: f64| 2.0 * t);
        assert_eq!(set.len(), 2);
        assert_eq!(set.sample_all(0.0).unwrap(), 1.5);
        assert_eq!(set.sample_all(2.0).unwrap(), 5.5);
    }

    #[test]
    fn stateful_closure_keeps_state() {
        let mut calls = 0u32;
        let mut set = DisturbanceSet::new().with(move |_t: f64| {
            calls += 1;
            calls as f64
        });
        assert_eq!(set.sample_all(0.0).unwrap(), 1.0);
        assert_eq!(set.sample_all(0.0).unwrap(), 2.0);
    }

    #[test]
    fn non_finite_sample_is_reported_with_label() {
        let mut set = DisturbanceSet::new()
            .with(|_t: f64| 1.0)
            .with(labeled("broken", |_t: f64| f64::NAN));
        let err = set.sample_all(0.5).unwrap_err();
        match err {
            DisturbanceError::NonFinite { label, t, value } => {
                assert_eq!(label, "broken");
                assert_eq!(t, 0.5);
                assert!(value.is_nan());
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn overflowing_sum_is_rejected() {
        let mut set = DisturbanceSet::new()
            .with(|_t: f64| f64::MAX)
            .with(|_t: f64| f64::MAX);
        let err = set.sample_all(0.0).unwrap_err();
        assert!(matches!(err, DisturbanceError::NonFinite { ref label, .. } if label == "sum"));
    }

    #[test]
    fn labels_follow_registration_order() {
        let set = DisturbanceSet::new()
            .with(labeled("first", |_t: f64| 0.0))
            .with(|_t: f64| 0.0);
        assert_eq!(set.labels(), vec!["first".to_string(), "closure".to_string()]);
    }
}
