//! External voltage disturbances for the regulator simulation.
//!
//! A disturbance maps simulated time to an additive voltage delta. The
//! driver samples every registered disturbance at each grid time, sums the
//! samples, and hands the sum to the regulator before it steps.
//!
//! # Sources
//!
//! - Any `FnMut(f64) -> f64` closure
//! - [`WhiteNoise`]: zero-mean Gaussian noise, optionally seeded
//! - [`Sinusoid`]: periodic term `A * sin(2*pi*t/P + phi)`
//! - [`Pulse`]: rectangular pulse on a closed time window
//! - [`Constant`]: fixed offset applied every step

pub mod error;
pub mod noise;
pub mod periodic;
pub mod pulse;
pub mod source;

pub use error::{DisturbanceError, DisturbanceResult};
pub use noise::WhiteNoise;
pub use periodic::Sinusoid;
pub use pulse::{Constant, Pulse};
pub use source::{Disturbance, DisturbanceSet, Labeled, labeled};
