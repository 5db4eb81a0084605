//! Protective Devices
//!
//! Miniature circuit breaker (MCB) data: standard rated currents and the
//! instantaneous-trip multiple of each tripping characteristic.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::CalcError;

/// Standard rated currents In of overcurrent protective devices (A)
pub const NOMINAL_CURRENTS_A: [f64; 10] = [6.0, 10.0, 13.0, 16.0, 20.0, 25.0, 32.0, 40.0, 50.0, 63.0];

/// MCB tripping characteristic per EN 60898
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Characteristic {
    /// Residential circuits: Ia = 5 × In
    #[default]
    B,
    /// General/industrial circuits: Ia = 10 × In
    C,
    /// Motors and transformers with high inrush: Ia = 20 × In
    D,
}

impl Characteristic {
    /// All characteristics for UI selection
    pub const ALL: [Characteristic; 3] = [Characteristic::B, Characteristic::C, Characteristic::D];

    /// Multiple of In guaranteeing instantaneous (magnetic) tripping
    pub fn trip_multiplier(&self) -> f64 {
        match self {
            Characteristic::B => 5.0,
            Characteristic::C => 10.0,
            Characteristic::D => 20.0,
        }
    }

    /// Disconnection time in the magnetic-trip zone (5 ≤ Isc/In < 10), seconds.
    ///
    /// Part of a coarse step approximation of the time-current curve, not a
    /// manufacturer curve.
    pub fn magnetic_zone_time_s(&self) -> f64 {
        match self {
            Characteristic::B => 0.1,
            Characteristic::C => 0.2,
            Characteristic::D => 0.4,
        }
    }

    /// Display name for UI
    pub fn display_name(&self) -> &'static str {
        match self {
            Characteristic::B => "B (5×In) - residential",
            Characteristic::C => "C (10×In) - industrial",
            Characteristic::D => "D (20×In) - motors, transformers",
        }
    }
}

impl std::fmt::Display for Characteristic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let letter = match self {
            Characteristic::B => "B",
            Characteristic::C => "C",
            Characteristic::D => "D",
        };
        write!(f, "{}", letter)
    }
}

impl FromStr for Characteristic {
    type Err = CalcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "B" => Ok(Characteristic::B),
            "C" => Ok(Characteristic::C),
            "D" => Ok(Characteristic::D),
            other => Err(CalcError::invalid_input("characteristic", other, "Expected B, C or D")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trip_multipliers() {
        assert_eq!(Characteristic::B.trip_multiplier(), 5.0);
        assert_eq!(Characteristic::C.trip_multiplier(), 10.0);
        assert_eq!(Characteristic::D.trip_multiplier(), 20.0);
    }

    #[test]
    fn test_nominal_currents_sorted() {
        assert!(NOMINAL_CURRENTS_A.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_display_is_letter() {
        assert_eq!(Characteristic::C.to_string(), "C");
        assert_eq!("d".parse::<Characteristic>().unwrap(), Characteristic::D);
    }
}
