//! Discrete operating regime of the regulator.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Which control law is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Mode {
    /// Voltage relaxes under `dV/dt = -a*V + b`.
    #[default]
    Normal,
    /// Voltage is pulled back toward `V_max` at rate `c`.
    Overvoltage,
    /// Voltage is pulled back toward `V_min` at rate `d`.
    Undervoltage,
}

impl Mode {
    pub const ALL: [Mode; 3] = [Mode::Normal, Mode::Overvoltage, Mode::Undervoltage];

    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::Normal => "Normal",
            Mode::Overvoltage => "Overvoltage",
            Mode::Undervoltage => "Undervoltage",
        }
    }

    /// True outside Normal.
    pub fn is_excursion(&self) -> bool {
        !matches!(self, Mode::Normal)
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
