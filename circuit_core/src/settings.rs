//! # Design Settings
//!
//! Supply parameters and method choices shared by every circuit in a
//! register. Stored in the register file and loadable on their own from a
//! JSON file.
//!
//! ## Example
//!
//! ```rust
//! use circuit_core::settings::DesignSettings;
//! use circuit_core::calculations::VoltageDropMethod;
//! use circuit_core::reference::ConductorTemperature;
//!
//! let settings = DesignSettings::default()
//!     .with_power_factor_three(0.85)
//!     .with_voltage_drop_method(VoltageDropMethod::Conductivity(ConductorTemperature::Operating70C));
//! assert!(settings.validate().is_ok());
//! ```

use serde::{Deserialize, Serialize};

use crate::calculations::load_current::{is_valid_power_factor, DEFAULT_POWER_FACTOR_SINGLE, DEFAULT_POWER_FACTOR_THREE};
use crate::calculations::{is_positive, VoltageDropMethod};
use crate::errors::{CalcError, CalcResult};
use crate::reference::{PhaseType, LINE_VOLTAGE_V, PHASE_VOLTAGE_V};

/// Settings applied when evaluating circuits
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DesignSettings {
    /// Phase-to-earth voltage U0 (V)
    pub phase_voltage_v: f64,
    /// Line-to-line voltage (V)
    pub line_voltage_v: f64,
    /// Power factor assumed for single-phase loads when none is given
    pub power_factor_single: f64,
    /// Power factor assumed for three-phase loads when none is given
    pub power_factor_three: f64,
    /// Conductor constant used for voltage drop
    pub voltage_drop_method: VoltageDropMethod,
}

impl Default for DesignSettings {
    fn default() -> Self {
        Self {
            phase_voltage_v: PHASE_VOLTAGE_V,
            line_voltage_v: LINE_VOLTAGE_V,
            power_factor_single: DEFAULT_POWER_FACTOR_SINGLE,
            power_factor_three: DEFAULT_POWER_FACTOR_THREE,
            voltage_drop_method: VoltageDropMethod::default(),
        }
    }
}

impl DesignSettings {
    pub fn with_phase_voltage(mut self, phase_voltage_v: f64) -> Self {
        self.phase_voltage_v = phase_voltage_v;
        self
    }

    pub fn with_line_voltage(mut self, line_voltage_v: f64) -> Self {
        self.line_voltage_v = line_voltage_v;
        self
    }

    pub fn with_power_factor_single(mut self, power_factor: f64) -> Self {
        self.power_factor_single = power_factor;
        self
    }

    pub fn with_power_factor_three(mut self, power_factor: f64) -> Self {
        self.power_factor_three = power_factor;
        self
    }

    pub fn with_voltage_drop_method(mut self, method: VoltageDropMethod) -> Self {
        self.voltage_drop_method = method;
        self
    }

    /// Supply voltage for a phase arrangement: U0 for single-phase, line
    /// voltage for three-phase.
    pub fn supply_voltage(&self, phase: PhaseType) -> f64 {
        match phase {
            PhaseType::Single => self.phase_voltage_v,
            PhaseType::Three => self.line_voltage_v,
        }
    }

    /// Power factor assumed for a phase arrangement
    pub fn default_power_factor(&self, phase: PhaseType) -> f64 {
        match phase {
            PhaseType::Single => self.power_factor_single,
            PhaseType::Three => self.power_factor_three,
        }
    }

    /// Reject settings that would make every calculation return a sentinel.
    pub fn validate(&self) -> CalcResult<()> {
        for (field, value) in [("phase_voltage_v", self.phase_voltage_v), ("line_voltage_v", self.line_voltage_v)] {
            if !is_positive(value) {
                return Err(CalcError::invalid_input(field, value.to_string(), "Voltage must be positive"));
            }
        }
        for (field, value) in [
            ("power_factor_single", self.power_factor_single),
            ("power_factor_three", self.power_factor_three),
        ] {
            if !is_valid_power_factor(value) {
                return Err(CalcError::invalid_input(
                    field,
                    value.to_string(),
                    "Power factor must lie in (0, 1]",
                ));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reference::ConductorTemperature;

    #[test]
    fn test_defaults() {
        let settings = DesignSettings::default();
        assert_eq!(settings.supply_voltage(PhaseType::Single), 230.0);
        assert_eq!(settings.supply_voltage(PhaseType::Three), 400.0);
        assert_eq!(settings.default_power_factor(PhaseType::Single), 1.0);
        assert_eq!(settings.default_power_factor(PhaseType::Three), 0.93);
        assert_eq!(settings.voltage_drop_method, VoltageDropMethod::Resistivity);
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_validation() {
        let err = DesignSettings::default().with_power_factor_single(1.2).validate().unwrap_err();
        assert_eq!(err.error_code(), "INVALID_INPUT");

        assert!(DesignSettings::default().with_line_voltage(0.0).validate().is_err());
        assert!(DesignSettings::default().with_phase_voltage(f64::NAN).validate().is_err());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let settings: DesignSettings = serde_json::from_str(r#"{"line_voltage_v": 415.0}"#).unwrap();
        assert_eq!(settings.line_voltage_v, 415.0);
        assert_eq!(settings.phase_voltage_v, 230.0);
        assert_eq!(settings.power_factor_three, 0.93);
    }

    #[test]
    fn test_roundtrip() {
        let settings = DesignSettings::default()
            .with_voltage_drop_method(VoltageDropMethod::Conductivity(ConductorTemperature::Operating70C));
        let json = serde_json::to_string(&settings).unwrap();
        let back: DesignSettings = serde_json::from_str(&json).unwrap();
        assert_eq!(back, settings);
    }
}
