//! # Load Current Calculator
//!
//! Design current IB from active power:
//!
//! ```text
//! single-phase:  IB = P / (U × cos φ)
//! three-phase:   IB = P / (√3 × U × cos φ)
//! ```
//!
//! Results are rounded to 0.01 A. Invalid input (non-positive power or
//! voltage, power factor outside (0, 1]) is rejected with a result of 0.0,
//! never clamped.

use super::{is_positive, round2};
use crate::reference::{PhaseType, LINE_VOLTAGE_V, PHASE_VOLTAGE_V};

/// Default power factor for single-phase circuits
pub const DEFAULT_POWER_FACTOR_SINGLE: f64 = 1.0;

/// Default power factor for three-phase circuits
pub const DEFAULT_POWER_FACTOR_THREE: f64 = 0.93;

/// Whether a power factor lies in (0, 1]
pub fn is_valid_power_factor(power_factor: f64) -> bool {
    power_factor > 0.0 && power_factor <= 1.0
}

fn inputs_valid(power_kw: f64, voltage_v: f64, power_factor: f64) -> bool {
    if !is_positive(power_kw) || !is_positive(voltage_v) {
        return false;
    }
    if !is_valid_power_factor(power_factor) {
        tracing::warn!(power_factor, "power factor must lie in (0, 1]");
        return false;
    }
    true
}

/// Single-phase design current IB (A).
///
/// Returns 0.0 for invalid input.
pub fn current_single_phase(power_kw: f64, voltage_v: f64, power_factor: f64) -> f64 {
    if !inputs_valid(power_kw, voltage_v, power_factor) {
        return 0.0;
    }
    let power_w = power_kw * 1000.0;
    round2(power_w / (voltage_v * power_factor))
}

/// Three-phase design current IB (A); `voltage_v` is the line-to-line voltage.
///
/// Returns 0.0 for invalid input.
pub fn current_three_phase(power_kw: f64, voltage_v: f64, power_factor: f64) -> f64 {
    if !inputs_valid(power_kw, voltage_v, power_factor) {
        return 0.0;
    }
    let power_w = power_kw * 1000.0;
    round2(power_w / (3f64.sqrt() * voltage_v * power_factor))
}

/// Design current for the given phase arrangement.
pub fn design_current(phase: PhaseType, power_kw: f64, voltage_v: f64, power_factor: f64) -> f64 {
    match phase {
        PhaseType::Single => current_single_phase(power_kw, voltage_v, power_factor),
        PhaseType::Three => current_three_phase(power_kw, voltage_v, power_factor),
    }
}

/// Nominal supply voltage used for a phase arrangement (V)
pub fn nominal_voltage(phase: PhaseType) -> f64 {
    match phase {
        PhaseType::Single => PHASE_VOLTAGE_V,
        PhaseType::Three => LINE_VOLTAGE_V,
    }
}

/// Default power factor for a phase arrangement
pub fn default_power_factor(phase: PhaseType) -> f64 {
    match phase {
        PhaseType::Single => DEFAULT_POWER_FACTOR_SINGLE,
        PhaseType::Three => DEFAULT_POWER_FACTOR_THREE,
    }
}

/// Active power P = U × I × cos φ (W)
pub fn active_power(voltage_v: f64, current_a: f64, power_factor: f64) -> f64 {
    voltage_v * current_a * power_factor
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_phase_scenario() {
        // 3.5 kW, cos φ = 0.8
        let ib = current_single_phase(3.5, 230.0, 0.8);
        assert!((ib - 19.02).abs() < 0.01);
    }

    #[test]
    fn test_three_phase_scenario() {
        // 11 kW, cos φ = 0.85
        let ib = current_three_phase(11.0, 400.0, 0.85);
        assert!((ib - 18.68).abs() < 0.01);
    }

    #[test]
    fn test_default_power_factors() {
        let ib = current_single_phase(2.3, 230.0, DEFAULT_POWER_FACTOR_SINGLE);
        assert!((ib - 10.0).abs() < 0.01);

        let ib = current_three_phase(6.45, 400.0, DEFAULT_POWER_FACTOR_THREE);
        assert!((ib - 10.0).abs() < 0.1);
    }

    #[test]
    fn test_power_factor_rejected_not_clamped() {
        assert_eq!(current_single_phase(3.5, 230.0, 0.0), 0.0);
        assert_eq!(current_single_phase(3.5, 230.0, 1.5), 0.0);
        assert_eq!(current_three_phase(3.5, 400.0, -0.5), 0.0);
        assert_eq!(current_three_phase(3.5, 400.0, 1.01), 0.0);
    }

    #[test]
    fn test_non_positive_power_or_voltage() {
        assert_eq!(current_single_phase(0.0, 230.0, 1.0), 0.0);
        assert_eq!(current_single_phase(-2.0, 230.0, 1.0), 0.0);
        assert_eq!(current_three_phase(5.0, 0.0, 0.9), 0.0);
        assert_eq!(current_single_phase(f64::NAN, 230.0, 1.0), 0.0);
    }

    #[test]
    fn test_rounding_to_two_decimals() {
        let ib = current_single_phase(3.333, 230.0, 0.777);
        assert!(((ib * 100.0).round() - ib * 100.0).abs() < 1e-6);
    }

    #[test]
    fn test_monotonic_in_power_and_power_factor() {
        let powers = [0.5, 1.0, 2.2, 3.5, 7.5, 11.0, 22.0];
        for pair in powers.windows(2) {
            assert!(current_single_phase(pair[1], 230.0, 0.9) > current_single_phase(pair[0], 230.0, 0.9));
            assert!(current_three_phase(pair[1], 400.0, 0.9) > current_three_phase(pair[0], 400.0, 0.9));
        }

        let factors = [0.5, 0.7, 0.8, 0.93, 1.0];
        for pair in factors.windows(2) {
            assert!(current_single_phase(5.0, 230.0, pair[1]) < current_single_phase(5.0, 230.0, pair[0]));
            assert!(current_three_phase(5.0, 400.0, pair[1]) < current_three_phase(5.0, 400.0, pair[0]));
        }
    }

    #[test]
    fn test_design_current_dispatch() {
        assert_eq!(
            design_current(PhaseType::Single, 3.5, 230.0, 0.8),
            current_single_phase(3.5, 230.0, 0.8)
        );
        assert_eq!(
            design_current(PhaseType::Three, 11.0, 400.0, 0.85),
            current_three_phase(11.0, 400.0, 0.85)
        );
        assert_eq!(nominal_voltage(PhaseType::Three), 400.0);
        assert_eq!(default_power_factor(PhaseType::Three), 0.93);
    }

    #[test]
    fn test_active_power() {
        assert!((active_power(230.0, 10.0, 0.9) - 2070.0).abs() < 1e-9);
    }
}
