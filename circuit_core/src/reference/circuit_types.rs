//! Circuit Types
//!
//! Circuit purpose, supply phase arrangement, and the data keyed on them:
//! permissible voltage drop, typical power factor, and a suggested starting
//! configuration.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::CalcError;
use crate::reference::protection::Characteristic;

/// Purpose of a final or distribution circuit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum CircuitType {
    Lighting,
    #[default]
    Sockets,
    Motor,
    /// Main supply line from the service connection to the distribution board
    Wlz,
    Other,
}

impl CircuitType {
    /// All circuit types for UI selection
    pub const ALL: [CircuitType; 5] = [
        CircuitType::Lighting,
        CircuitType::Sockets,
        CircuitType::Motor,
        CircuitType::Wlz,
        CircuitType::Other,
    ];

    /// Permissible voltage drop in percent
    pub fn voltage_drop_limit_percent(&self) -> f64 {
        match self {
            CircuitType::Lighting => 3.0,
            CircuitType::Sockets => 5.0,
            CircuitType::Motor => 5.0,
            CircuitType::Wlz => 1.0,
            CircuitType::Other => 5.0,
        }
    }

    /// Permissible voltage drop as a fraction (0.03 = 3 %)
    pub fn voltage_drop_limit(&self) -> f64 {
        self.voltage_drop_limit_percent() / 100.0
    }

    /// Typical starting configuration for this circuit type, where one exists
    pub fn suggestion(&self) -> Option<CircuitSuggestion> {
        match self {
            CircuitType::Lighting => Some(CircuitSuggestion {
                cross_section_mm2: 1.5,
                nominal_current_a: 10.0,
                characteristic: Characteristic::B,
                reason: "Standard lighting circuit",
            }),
            CircuitType::Sockets => Some(CircuitSuggestion {
                cross_section_mm2: 2.5,
                nominal_current_a: 16.0,
                characteristic: Characteristic::B,
                reason: "Standard socket-outlet circuit",
            }),
            CircuitType::Other => Some(CircuitSuggestion {
                cross_section_mm2: 2.5,
                nominal_current_a: 16.0,
                characteristic: Characteristic::C,
                reason: "General-purpose circuit",
            }),
            CircuitType::Motor | CircuitType::Wlz => None,
        }
    }

    /// Display name for UI
    pub fn display_name(&self) -> &'static str {
        match self {
            CircuitType::Lighting => "Lighting",
            CircuitType::Sockets => "Sockets",
            CircuitType::Motor => "Motor",
            CircuitType::Wlz => "Main supply line (WLZ)",
            CircuitType::Other => "Other",
        }
    }
}

impl std::fmt::Display for CircuitType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

impl FromStr for CircuitType {
    type Err = CalcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "lighting" => Ok(CircuitType::Lighting),
            "sockets" => Ok(CircuitType::Sockets),
            "motor" => Ok(CircuitType::Motor),
            "wlz" => Ok(CircuitType::Wlz),
            "other" => Ok(CircuitType::Other),
            other => Err(CalcError::invalid_input(
                "type",
                other,
                "Expected lighting, sockets, motor, wlz or other",
            )),
        }
    }
}

/// Suggested cable and protective device for a circuit type
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CircuitSuggestion {
    pub cross_section_mm2: f64,
    pub nominal_current_a: f64,
    pub characteristic: Characteristic,
    pub reason: &'static str,
}

/// Supply phase arrangement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum PhaseType {
    /// 230 V single-phase (L + N)
    #[default]
    Single,
    /// 400 V three-phase (L1 + L2 + L3 + N)
    Three,
}

impl PhaseType {
    /// Number of cores of the usual cable for this arrangement (with PE)
    pub fn core_count(&self) -> u8 {
        match self {
            PhaseType::Single => 3,
            PhaseType::Three => 5,
        }
    }

    /// Pole count suffix used in device designations ("B16/3P")
    pub fn pole_suffix(&self) -> &'static str {
        match self {
            PhaseType::Single => "",
            PhaseType::Three => "/3P",
        }
    }
}

impl std::fmt::Display for PhaseType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PhaseType::Single => write!(f, "single-phase"),
            PhaseType::Three => write!(f, "three-phase"),
        }
    }
}

impl FromStr for PhaseType {
    type Err = CalcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "single" | "1" | "1p" => Ok(PhaseType::Single),
            "three" | "3" | "3p" => Ok(PhaseType::Three),
            other => Err(CalcError::invalid_input("phase_type", other, "Expected single or three")),
        }
    }
}

/// Typical power factors by load kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PowerFactorPreset {
    Lighting,
    Heating,
    Motors,
    Mixed,
}

impl PowerFactorPreset {
    /// All presets for UI selection
    pub const ALL: [PowerFactorPreset; 4] = [
        PowerFactorPreset::Lighting,
        PowerFactorPreset::Heating,
        PowerFactorPreset::Motors,
        PowerFactorPreset::Mixed,
    ];

    /// cos φ
    pub fn power_factor(&self) -> f64 {
        match self {
            PowerFactorPreset::Lighting => 1.0,
            PowerFactorPreset::Heating => 1.0,
            PowerFactorPreset::Motors => 0.8,
            PowerFactorPreset::Mixed => 0.85,
        }
    }

    /// Display name for UI
    pub fn display_name(&self) -> &'static str {
        match self {
            PowerFactorPreset::Lighting => "Lighting (1.00)",
            PowerFactorPreset::Heating => "Heating (1.00)",
            PowerFactorPreset::Motors => "Motors (0.80)",
            PowerFactorPreset::Mixed => "Mixed (0.85)",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_voltage_drop_limits() {
        assert_eq!(CircuitType::Lighting.voltage_drop_limit(), 0.03);
        assert_eq!(CircuitType::Wlz.voltage_drop_limit(), 0.01);
        assert!((CircuitType::Sockets.voltage_drop_limit_percent() - 5.0).abs() < 1e-9);
    }

    #[test]
    fn test_suggestions() {
        let lighting = CircuitType::Lighting.suggestion().unwrap();
        assert_eq!(lighting.cross_section_mm2, 1.5);
        assert_eq!(lighting.nominal_current_a, 10.0);
        assert!(CircuitType::Motor.suggestion().is_none());
    }

    #[test]
    fn test_serialization_names() {
        assert_eq!(serde_json::to_string(&CircuitType::Wlz).unwrap(), "\"wlz\"");
        assert_eq!(serde_json::to_string(&PhaseType::Three).unwrap(), "\"three\"");
    }

    #[test]
    fn test_presets_in_range() {
        for preset in PowerFactorPreset::ALL {
            let pf = preset.power_factor();
            assert!(pf > 0.0 && pf <= 1.0);
        }
    }
}
