//! # Voltage Drop Calculator
//!
//! Percentage voltage drop along a cable run:
//!
//! ```text
//! single-phase:  ΔU% = 2 × IB × ρ × L × cos φ / (S × U) × 100
//! three-phase:   ΔU% = √3 × IB × ρ × L × cos φ / (S × U) × 100
//! ```
//!
//! The single-phase form counts the return conductor; a balanced three-phase
//! load carries no neutral current. The conductivity forms take γ = 1/ρ
//! directly, so a check can be done at the 70 °C operating temperature
//! where the conductor resistance is highest.
//!
//! Results are rounded to 0.01 %. Any zero or negative input, or a power
//! factor outside (0, 1], gives 0.0.

use serde::{Deserialize, Serialize};

use super::load_current::is_valid_power_factor;
use super::{is_positive, round2};
use crate::reference::{CircuitType, Conductor, ConductorTemperature, PhaseType};

fn inputs_valid(values: &[f64], power_factor: f64) -> bool {
    if !values.iter().all(|&v| is_positive(v)) {
        tracing::debug!(?values, "voltage drop inputs must be positive");
        return false;
    }
    if !is_valid_power_factor(power_factor) {
        tracing::warn!(power_factor, "power factor must lie in (0, 1]");
        return false;
    }
    true
}

/// Single-phase voltage drop from resistivity ρ (Ω·mm²/m), in %.
pub fn voltage_drop_single_phase(
    current_a: f64,
    length_m: f64,
    cross_section_mm2: f64,
    voltage_v: f64,
    power_factor: f64,
    resistivity: f64,
) -> f64 {
    if !inputs_valid(&[current_a, length_m, cross_section_mm2, voltage_v, resistivity], power_factor) {
        return 0.0;
    }
    let drop_v = 2.0 * current_a * resistivity * length_m * power_factor / cross_section_mm2;
    round2(drop_v / voltage_v * 100.0)
}

/// Three-phase voltage drop from resistivity ρ (Ω·mm²/m), in %.
pub fn voltage_drop_three_phase(
    current_a: f64,
    length_m: f64,
    cross_section_mm2: f64,
    voltage_v: f64,
    power_factor: f64,
    resistivity: f64,
) -> f64 {
    if !inputs_valid(&[current_a, length_m, cross_section_mm2, voltage_v, resistivity], power_factor) {
        return 0.0;
    }
    let drop_v = 3f64.sqrt() * current_a * resistivity * length_m * power_factor / cross_section_mm2;
    round2(drop_v / voltage_v * 100.0)
}

/// Single-phase voltage drop from conductivity γ (m/(Ω·mm²)), in %.
pub fn voltage_drop_single_phase_conductivity(
    current_a: f64,
    length_m: f64,
    cross_section_mm2: f64,
    voltage_v: f64,
    power_factor: f64,
    conductivity: f64,
) -> f64 {
    if !is_positive(conductivity) {
        return 0.0;
    }
    voltage_drop_single_phase(current_a, length_m, cross_section_mm2, voltage_v, power_factor, 1.0 / conductivity)
}

/// Three-phase voltage drop from conductivity γ (m/(Ω·mm²)), in %.
pub fn voltage_drop_three_phase_conductivity(
    current_a: f64,
    length_m: f64,
    cross_section_mm2: f64,
    voltage_v: f64,
    power_factor: f64,
    conductivity: f64,
) -> f64 {
    if !is_positive(conductivity) {
        return 0.0;
    }
    voltage_drop_three_phase(current_a, length_m, cross_section_mm2, voltage_v, power_factor, 1.0 / conductivity)
}

/// Which conductor constant a voltage-drop check uses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(tag = "basis", content = "temperature")]
pub enum VoltageDropMethod {
    /// Resistivity ρ at 20 °C
    #[default]
    Resistivity,
    /// Conductivity γ at the given conductor temperature
    Conductivity(ConductorTemperature),
}

impl VoltageDropMethod {
    /// Human-readable basis for reports
    pub fn display_name(&self) -> &'static str {
        match self {
            VoltageDropMethod::Resistivity => "resistivity ρ (20 °C)",
            VoltageDropMethod::Conductivity(ConductorTemperature::Ambient20C) => "conductivity γ (20 °C)",
            VoltageDropMethod::Conductivity(ConductorTemperature::Operating70C) => "conductivity γ (70 °C)",
        }
    }
}

/// Voltage drop for a phase arrangement using the configured method.
#[allow(clippy::too_many_arguments)]
pub fn voltage_drop(
    method: VoltageDropMethod,
    phase: PhaseType,
    material: Conductor,
    current_a: f64,
    length_m: f64,
    cross_section_mm2: f64,
    voltage_v: f64,
    power_factor: f64,
) -> f64 {
    match (method, phase) {
        (VoltageDropMethod::Resistivity, PhaseType::Single) => voltage_drop_single_phase(
            current_a,
            length_m,
            cross_section_mm2,
            voltage_v,
            power_factor,
            material.resistivity(),
        ),
        (VoltageDropMethod::Resistivity, PhaseType::Three) => voltage_drop_three_phase(
            current_a,
            length_m,
            cross_section_mm2,
            voltage_v,
            power_factor,
            material.resistivity(),
        ),
        (VoltageDropMethod::Conductivity(temp), PhaseType::Single) => voltage_drop_single_phase_conductivity(
            current_a,
            length_m,
            cross_section_mm2,
            voltage_v,
            power_factor,
            material.conductivity(temp),
        ),
        (VoltageDropMethod::Conductivity(temp), PhaseType::Three) => voltage_drop_three_phase_conductivity(
            current_a,
            length_m,
            cross_section_mm2,
            voltage_v,
            power_factor,
            material.conductivity(temp),
        ),
    }
}

/// Voltage drop verdict against the limit for a circuit type
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VoltageDropCheck {
    pub drop_percent: f64,
    pub limit_percent: f64,
    pub is_valid: bool,
}

impl VoltageDropCheck {
    /// Remaining headroom below the limit (percentage points)
    pub fn margin_percent(&self) -> f64 {
        self.limit_percent - self.drop_percent
    }
}

/// Compare a voltage drop against the limit for its circuit type.
pub fn check_voltage_drop(drop_percent: f64, circuit_type: CircuitType) -> VoltageDropCheck {
    let limit_percent = circuit_type.voltage_drop_limit_percent();
    VoltageDropCheck {
        drop_percent,
        limit_percent,
        is_valid: drop_percent <= limit_percent,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_phase() {
        // 2 × 16 × 0.0175 × 20 × 1.0 / 2.5 = 4.48 V → 1.95 %
        let du = voltage_drop_single_phase(16.0, 20.0, 2.5, 230.0, 1.0, 0.0175);
        assert!((du - 1.95).abs() < 1e-9);
    }

    #[test]
    fn test_three_phase() {
        // √3 × 20 × 0.0175 × 50 × 0.9 / 4 = 6.82 V → 1.70 %
        let du = voltage_drop_three_phase(20.0, 50.0, 4.0, 400.0, 0.9, 0.0175);
        assert!((du - 1.70).abs() < 1e-9);
    }

    #[test]
    fn test_conductivity_matches_resistivity() {
        let by_gamma = voltage_drop_single_phase_conductivity(16.0, 20.0, 2.5, 230.0, 1.0, 50.0);
        let by_rho = voltage_drop_single_phase(16.0, 20.0, 2.5, 230.0, 1.0, 0.02);
        assert_eq!(by_gamma, by_rho);
    }

    #[test]
    fn test_operating_temperature_is_worse() {
        let cold = voltage_drop(
            VoltageDropMethod::Conductivity(ConductorTemperature::Ambient20C),
            PhaseType::Single,
            Conductor::Copper,
            16.0,
            30.0,
            2.5,
            230.0,
            1.0,
        );
        let hot = voltage_drop(
            VoltageDropMethod::Conductivity(ConductorTemperature::Operating70C),
            PhaseType::Single,
            Conductor::Copper,
            16.0,
            30.0,
            2.5,
            230.0,
            1.0,
        );
        assert!(hot > cold);
    }

    #[test]
    fn test_guards() {
        assert_eq!(voltage_drop_single_phase(0.0, 20.0, 2.5, 230.0, 1.0, 0.0175), 0.0);
        assert_eq!(voltage_drop_single_phase(16.0, -5.0, 2.5, 230.0, 1.0, 0.0175), 0.0);
        assert_eq!(voltage_drop_three_phase(16.0, 20.0, 0.0, 400.0, 1.0, 0.0175), 0.0);
        assert_eq!(voltage_drop_three_phase(16.0, 20.0, 2.5, 0.0, 1.0, 0.0175), 0.0);
        assert_eq!(voltage_drop_single_phase_conductivity(16.0, 20.0, 2.5, 230.0, 1.0, 0.0), 0.0);
    }

    #[test]
    fn test_power_factor_out_of_range_rejected() {
        assert_eq!(voltage_drop_single_phase(10.0, 20.0, 2.5, 230.0, 1.5, 0.0175), 0.0);
        assert_eq!(voltage_drop_single_phase(10.0, 20.0, 2.5, 230.0, 0.0, 0.0175), 0.0);
        assert_eq!(voltage_drop_three_phase(10.0, 20.0, 2.5, 400.0, 1.01, 0.0175), 0.0);
        assert_eq!(voltage_drop_three_phase_conductivity(10.0, 20.0, 2.5, 400.0, f64::NAN, 56.0), 0.0);
    }

    #[test]
    fn test_check_against_limit() {
        let check = check_voltage_drop(2.5, CircuitType::Lighting);
        assert!(check.is_valid);
        assert!((check.margin_percent() - 0.5).abs() < 1e-9);

        assert!(!check_voltage_drop(3.5, CircuitType::Lighting).is_valid);
        assert!(check_voltage_drop(3.5, CircuitType::Sockets).is_valid);
        assert!(!check_voltage_drop(1.2, CircuitType::Wlz).is_valid);
    }

    #[test]
    fn test_method_serialization() {
        let json = serde_json::to_string(&VoltageDropMethod::Conductivity(ConductorTemperature::Operating70C)).unwrap();
        let back: VoltageDropMethod = serde_json::from_str(&json).unwrap();
        assert_eq!(back, VoltageDropMethod::Conductivity(ConductorTemperature::Operating70C));
    }
}
