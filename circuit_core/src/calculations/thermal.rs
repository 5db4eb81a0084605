//! # Thermal Withstand Calculator
//!
//! Short-circuit current at the end of the circuit, an estimate of the
//! MCB disconnection time, and the adiabatic withstand check
//!
//! ```text
//! S ≥ Isc × √t / k
//! ```
//!
//! ## Disconnection time
//!
//! [`estimate_disconnection_time`] is a coarse step approximation of an MCB
//! time-current curve, keyed on the ratio Isc / In. It is not a precision
//! model; manufacturer curves should replace it where accuracy matters.
//! The breakpoints below are kept stable because thermal verdicts depend on
//! them:
//!
//! | Isc / In | t (s)                          |
//! |----------|--------------------------------|
//! | ≥ 100    | 0.01                           |
//! | ≥ 50     | 0.02                           |
//! | ≥ 20     | 0.04                           |
//! | ≥ 10     | 0.1                            |
//! | ≥ 5      | B 0.1, C 0.2, D 0.4 (magnetic) |
//! | < 5      | 5.0 (thermal zone)             |

use serde::{Deserialize, Serialize};

use super::is_positive;
use crate::reference::Characteristic;

/// Disconnection time assumed in the thermal (overload) zone (s)
pub const THERMAL_ZONE_TIME_S: f64 = 5.0;

/// Prospective short-circuit current Isc = U0 / Zs (A).
///
/// Returns 0.0 for a non-positive Zs.
pub fn short_circuit_current(zs_ohm: f64, phase_voltage_v: f64) -> f64 {
    if !is_positive(zs_ohm) {
        return 0.0;
    }
    phase_voltage_v / zs_ohm
}

/// Estimated MCB disconnection time for a fault current (s).
///
/// Returns 0.0 when Isc or In is not positive.
pub fn estimate_disconnection_time(
    short_circuit_current_a: f64,
    nominal_current_a: f64,
    characteristic: Characteristic,
) -> f64 {
    if !is_positive(short_circuit_current_a) || !is_positive(nominal_current_a) {
        return 0.0;
    }

    let ratio = short_circuit_current_a / nominal_current_a;
    if ratio >= 100.0 {
        0.01
    } else if ratio >= 50.0 {
        0.02
    } else if ratio >= 20.0 {
        0.04
    } else if ratio >= 10.0 {
        0.1
    } else if ratio >= 5.0 {
        characteristic.magnetic_zone_time_s()
    } else {
        THERMAL_ZONE_TIME_S
    }
}

/// Adiabatic withstand verdict
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ThermalCheck {
    /// t ≤ max_time_s
    pub is_valid: bool,
    /// k²S² / Isc² (s)
    pub max_time_s: f64,
    /// Isc × √t / k (mm²)
    pub min_cross_section_mm2: f64,
    /// Isc² × t (A²s)
    pub energy_let_through_a2s: f64,
}

impl ThermalCheck {
    fn rejected() -> Self {
        Self {
            is_valid: false,
            max_time_s: 0.0,
            min_cross_section_mm2: 0.0,
            energy_let_through_a2s: 0.0,
        }
    }
}

/// Check that a cable of cross-section S survives Isc for t seconds.
///
/// Non-positive Isc, S or k, or a negative t, gives an invalid verdict with
/// zeroed figures.
pub fn check_thermal_withstand(
    short_circuit_current_a: f64,
    disconnection_time_s: f64,
    cross_section_mm2: f64,
    k: f64,
) -> ThermalCheck {
    let isc = short_circuit_current_a;
    let t = disconnection_time_s;
    if !is_positive(isc) || t.is_nan() || t < 0.0 || !is_positive(cross_section_mm2) || !is_positive(k) {
        tracing::debug!(isc, t, cross_section_mm2, k, "thermal withstand inputs out of range");
        return ThermalCheck::rejected();
    }

    let max_time_s = (k * k * cross_section_mm2 * cross_section_mm2) / (isc * isc);
    ThermalCheck {
        is_valid: t <= max_time_s,
        max_time_s,
        min_cross_section_mm2: isc * t.sqrt() / k,
        energy_let_through_a2s: isc * isc * t,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_circuit_current() {
        assert!((short_circuit_current(0.5, 230.0) - 460.0).abs() < 1e-9);
        assert_eq!(short_circuit_current(0.0, 230.0), 0.0);
        assert_eq!(short_circuit_current(-1.0, 230.0), 0.0);
    }

    #[test]
    fn test_disconnection_time_breakpoints() {
        let b = Characteristic::B;
        assert_eq!(estimate_disconnection_time(1600.0, 16.0, b), 0.01);
        assert_eq!(estimate_disconnection_time(800.0, 16.0, b), 0.02);
        assert_eq!(estimate_disconnection_time(320.0, 16.0, b), 0.04);
        assert_eq!(estimate_disconnection_time(160.0, 16.0, b), 0.1);
        assert_eq!(estimate_disconnection_time(40.0, 16.0, b), 5.0);
    }

    #[test]
    fn test_magnetic_zone_depends_on_characteristic() {
        // ratio 5
        assert_eq!(estimate_disconnection_time(80.0, 16.0, Characteristic::B), 0.1);
        assert_eq!(estimate_disconnection_time(80.0, 16.0, Characteristic::C), 0.2);
        assert_eq!(estimate_disconnection_time(80.0, 16.0, Characteristic::D), 0.4);
    }

    #[test]
    fn test_disconnection_time_sentinel() {
        assert_eq!(estimate_disconnection_time(0.0, 16.0, Characteristic::B), 0.0);
        assert_eq!(estimate_disconnection_time(500.0, 0.0, Characteristic::B), 0.0);
    }

    #[test]
    fn test_thermal_withstand() {
        // 2.5 mm² Cu/PVC at 1000 A: max t = 115² × 2.5² / 1000² = 0.08265625 s
        let check = check_thermal_withstand(1000.0, 0.04, 2.5, 115.0);
        assert!(check.is_valid);
        assert!((check.max_time_s - 0.08265625).abs() < 1e-12);
        assert!((check.energy_let_through_a2s - 40_000.0).abs() < 1e-6);
        // 1000 × √0.04 / 115 = 1.739 mm²
        assert!((check.min_cross_section_mm2 - 200.0 / 115.0).abs() < 1e-9);

        let check = check_thermal_withstand(1000.0, 0.1, 2.5, 115.0);
        assert!(!check.is_valid);
        assert!(check.min_cross_section_mm2 > 2.5);
    }

    #[test]
    fn test_thermal_withstand_rejects_bad_input() {
        assert_eq!(check_thermal_withstand(0.0, 0.1, 2.5, 115.0), ThermalCheck::rejected());
        assert_eq!(check_thermal_withstand(1000.0, -0.1, 2.5, 115.0), ThermalCheck::rejected());
        assert_eq!(check_thermal_withstand(1000.0, 0.1, 0.0, 115.0), ThermalCheck::rejected());
        assert_eq!(check_thermal_withstand(1000.0, 0.1, 2.5, 0.0), ThermalCheck::rejected());
    }
}
