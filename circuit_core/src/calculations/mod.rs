//! # Circuit Calculations
//!
//! The validation chain for one circuit, bottom-up:
//!
//! - [`load_current`] - design current IB from power
//! - [`ampacity`] - base ampacity Idd and corrected ampacity Iz
//! - [`protection`] - golden rule, overload protection, fault loop (SWZ)
//! - [`thermal`] - short-circuit current, disconnection time, adiabatic withstand
//! - [`voltage_drop`] - ΔU% and its limit check
//! - [`design`] - the whole chain over one explicit input struct
//!
//! Every function here is pure. Invalid numeric input yields a sentinel
//! (0.0, `None`, or a verdict with `is_valid == false`); nothing panics and
//! nothing returns an error.

pub mod ampacity;
pub mod design;
pub mod load_current;
pub mod protection;
pub mod thermal;
pub mod voltage_drop;

pub use ampacity::{resolve_ampacity, resolve_dynamic_ampacity, select_cross_section, AmpacityResult};
pub use design::{evaluate, CircuitEvaluation, CircuitInput, FailedCheck, LoadSpec};
pub use load_current::{current_single_phase, current_three_phase, design_current};
pub use protection::{
    check_fault_loop, check_golden_rule, check_overload_protection, max_fault_loop_impedance, select_nominal_current,
    trip_current, FaultLoopCheck, GoldenRuleCheck, OverloadCheck,
};
pub use thermal::{check_thermal_withstand, estimate_disconnection_time, short_circuit_current, ThermalCheck};
pub use voltage_drop::{check_voltage_drop, VoltageDropCheck, VoltageDropMethod};

/// Finite and strictly positive; NaN and infinities are rejected
pub fn is_positive(value: f64) -> bool {
    value.is_finite() && value > 0.0
}

/// Round to two decimal places
pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
