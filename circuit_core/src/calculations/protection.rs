//! # Protection & Fault-Loop Checker
//!
//! Coordination between load, protective device, and cable, and the
//! automatic-disconnection (fault loop) condition.
//!
//! ```text
//! Golden rule:        IB ≤ In ≤ Iz            (IB > 0)
//! Overload:           IB ≤ In  and  I2 ≤ 1.45 × Iz,  I2 = 1.45 × In
//! Fault loop (SWZ):   Zs ≤ U0 / Ia,  Ia = In × multiplier(characteristic)
//! ```
//!
//! Each rule returns a verdict record rather than a bare flag so reports can
//! show which term failed. A failed rule is a normal outcome, not an error.

use serde::{Deserialize, Serialize};

use super::is_positive;
use crate::reference::{Characteristic, Conductor, NOMINAL_CURRENTS_A};

/// Conventional tripping current multiple for MCBs (I2 = 1.45 × In)
pub const CONVENTIONAL_TRIP_MULTIPLE: f64 = 1.45;

/// Instantaneous trip current Ia = In × multiplier(characteristic)
pub fn trip_current(nominal_current_a: f64, characteristic: Characteristic) -> f64 {
    nominal_current_a * characteristic.trip_multiplier()
}

/// Conventional tripping current I2 = 1.45 × In
pub fn conventional_tripping_current(nominal_current_a: f64) -> f64 {
    CONVENTIONAL_TRIP_MULTIPLE * nominal_current_a
}

/// Maximum permissible fault-loop impedance U0 / Ia (Ω).
///
/// Returns 0.0 when Ia is not positive.
pub fn max_fault_loop_impedance(phase_voltage_v: f64, trip_current_a: f64) -> f64 {
    if !is_positive(trip_current_a) {
        return 0.0;
    }
    phase_voltage_v / trip_current_a
}

/// SWZ condition Zs ≤ U0 / Ia.
///
/// False for a negative Zs or a non-positive Ia.
pub fn check_fault_loop(zs_ohm: f64, phase_voltage_v: f64, trip_current_a: f64) -> bool {
    if zs_ohm < 0.0 || !is_positive(trip_current_a) {
        return false;
    }
    zs_ohm <= phase_voltage_v / trip_current_a
}

/// Verdict of the golden rule IB ≤ In ≤ Iz
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GoldenRuleCheck {
    /// IB > 0 (a no-load circuit cannot be judged compliant)
    pub load_present: bool,
    /// IB ≤ In
    pub load_within_device: bool,
    /// In ≤ Iz
    pub device_within_cable: bool,
    /// All three terms hold
    pub is_valid: bool,
}

/// Check IB ≤ In ≤ Iz with IB > 0.
pub fn check_golden_rule(design_current_a: f64, nominal_current_a: f64, ampacity_a: f64) -> GoldenRuleCheck {
    let load_present = design_current_a > 0.0;
    let load_within_device = design_current_a <= nominal_current_a;
    let device_within_cable = nominal_current_a <= ampacity_a;
    GoldenRuleCheck {
        load_present,
        load_within_device,
        device_within_cable,
        is_valid: load_present && load_within_device && device_within_cable,
    }
}

/// Verdict of the overload-protection rule
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OverloadCheck {
    /// IB ≤ In
    pub condition1: bool,
    /// I2 ≤ 1.45 × Iz
    pub condition2: bool,
    /// Both conditions hold
    pub is_valid: bool,
    /// Conventional tripping current I2 = 1.45 × In (A)
    pub i2_a: f64,
    /// 1.45 × Iz (A)
    pub i2_limit_a: f64,
}

/// Check IB ≤ In and I2 ≤ 1.45 × Iz.
///
/// Condition 2 reduces to In ≤ Iz, but is evaluated in the 1.45 form so the
/// reported I2 trace matches the rule as written.
pub fn check_overload_protection(design_current_a: f64, nominal_current_a: f64, ampacity_a: f64) -> OverloadCheck {
    let i2_a = conventional_tripping_current(nominal_current_a);
    let i2_limit_a = CONVENTIONAL_TRIP_MULTIPLE * ampacity_a;
    let condition1 = design_current_a <= nominal_current_a;
    let condition2 = i2_a <= i2_limit_a;
    OverloadCheck {
        condition1,
        condition2,
        is_valid: condition1 && condition2,
        i2_a,
        i2_limit_a,
    }
}

/// Resistance of the phase + protective conductor loop of a cable,
/// 2 × ρ × L / S (Ω). Returns 0.0 for non-positive length or cross-section.
pub fn cable_loop_resistance(length_m: f64, cross_section_mm2: f64, material: Conductor) -> f64 {
    if !is_positive(length_m) || !(cross_section_mm2 > 0.0) {
        return 0.0;
    }
    2.0 * material.resistivity() * length_m / cross_section_mm2
}

/// Computed fault-loop impedance: source impedance plus cable loop
/// resistance (Ω).
pub fn computed_loop_impedance(
    source_impedance_ohm: f64,
    length_m: f64,
    cross_section_mm2: f64,
    material: Conductor,
) -> f64 {
    source_impedance_ohm.max(0.0) + cable_loop_resistance(length_m, cross_section_mm2, material)
}

/// Impedance to check: a positive measured value wins over the computed one.
/// `None` if neither is positive.
pub fn effective_loop_impedance(measured_ohm: Option<f64>, computed_ohm: f64) -> Option<f64> {
    match measured_ohm {
        Some(zs) if zs > 0.0 => Some(zs),
        _ if computed_ohm > 0.0 => Some(computed_ohm),
        _ => None,
    }
}

/// Smallest standard rated current In ≥ IB, if any.
pub fn select_nominal_current(design_current_a: f64) -> Option<f64> {
    if !is_positive(design_current_a) {
        return None;
    }
    NOMINAL_CURRENTS_A.iter().copied().find(|&i_n| i_n >= design_current_a)
}

/// Fault-loop verdict with its numeric trace
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FaultLoopCheck {
    /// Loop impedance checked (Ω)
    pub zs_ohm: f64,
    /// Trip current Ia (A)
    pub ia_a: f64,
    /// U0 / Ia (Ω)
    pub max_zs_ohm: f64,
    /// Zs ≤ U0 / Ia
    pub is_valid: bool,
}

/// Build the fault-loop verdict for a device and a loop impedance.
pub fn fault_loop(
    zs_ohm: f64,
    phase_voltage_v: f64,
    nominal_current_a: f64,
    characteristic: Characteristic,
) -> FaultLoopCheck {
    let ia_a = trip_current(nominal_current_a, characteristic);
    FaultLoopCheck {
        zs_ohm,
        ia_a,
        max_zs_ohm: max_fault_loop_impedance(phase_voltage_v, ia_a),
        is_valid: check_fault_loop(zs_ohm, phase_voltage_v, ia_a),
    }
}
