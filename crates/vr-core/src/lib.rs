//! vr-core: shared foundation for voltreg.
//!
//! Contains:
//! - numeric (Real + tolerances + float helpers)
//! - error (shared error types)
//! - timing (wall-clock timers for run reporting)

pub mod error;
pub mod numeric;
pub mod timing;

pub use error::{VrError, VrResult};
pub use numeric::*;
pub use timing::Timer;
