//! Wall-clock timing for run reporting.

use std::time::Instant;

/// A simple timer that measures elapsed wall time.
pub struct Timer {
    label: &'static str,
    start: Instant,
}

impl Timer {
    /// Create and start a new timer with the given label.
    pub fn start(label: &'static str) -> Self {
        Self {
            label,
            start: Instant::now(),
        }
    }

    pub fn label(&self) -> &'static str {
        self.label
    }

    /// Seconds since `start`, without stopping.
    pub fn elapsed_s(&self) -> f64 {
        self.start.elapsed().as_secs_f64()
    }

    /// Stop the timer and return elapsed time in seconds.
    pub fn stop(self) -> f64 {
        self.elapsed_s()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timer_reports_non_negative_elapsed() {
        let timer = Timer::start("noop");
        assert_eq!(timer.label(), "noop");
        assert!(timer.stop() >= 0.0);
    }
}
