//! # Circuit Evaluation
//!
//! Runs the full validation chain for one circuit over an explicit input
//! struct:
//!
//! ```text
//! load ─► IB ─► In (given or selected)
//!                │
//!   S (given or selected) ─► Idd ─► Iz
//!                │
//!   golden rule, overload, fault loop (Zs), thermal withstand, ΔU%
//! ```
//!
//! Missing optional data (no cable length, no Zs) simply leaves the
//! dependent checks out of the evaluation; it is not a failure. A failed
//! check is recorded in [`CircuitEvaluation::failures`].
//!
//! ## Example
//!
//! ```rust
//! use circuit_core::calculations::design::{evaluate, CircuitInput, LoadSpec};
//! use circuit_core::settings::DesignSettings;
//!
//! let input = CircuitInput::new("Kitchen sockets", LoadSpec::Power(3.5))
//!     .with_power_factor(0.8)
//!     .with_cross_section(2.5)
//!     .with_length(20.0);
//!
//! let evaluation = evaluate(&input, &DesignSettings::default());
//! assert_eq!(evaluation.design_current_a, 19.02);
//! assert_eq!(evaluation.nominal_current_a, Some(20.0));
//! assert!(evaluation.passes());
//! ```

use serde::{Deserialize, Serialize};

use super::ampacity::{resolve, select_cross_section, AmpacityResult};
use super::load_current::{design_current, is_valid_power_factor};
use super::protection::{
    check_golden_rule, check_overload_protection, computed_loop_impedance, effective_loop_impedance, fault_loop,
    select_nominal_current, FaultLoopCheck, GoldenRuleCheck, OverloadCheck,
};
use super::{is_positive, round2};
use super::thermal::{check_thermal_withstand, estimate_disconnection_time, short_circuit_current, ThermalCheck};
use super::voltage_drop::{check_voltage_drop, voltage_drop, VoltageDropCheck};
use crate::correction_factors::{InstallationConditions, BASE_AMBIENT_TEMPERATURE_C};
use crate::errors::{CalcError, CalcResult};
use crate::reference::{
    k_coefficient, norm_ref, Characteristic, CircuitType, Conductor, InstallationMethod, Insulation, PhaseType,
};
use crate::settings::DesignSettings;

/// How the load of a circuit is specified
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "lowercase")]
pub enum LoadSpec {
    /// Design current IB in amperes
    Current(f64),
    /// Active power in kilowatts
    Power(f64),
}

impl LoadSpec {
    /// Power in kW, when the load was given as power
    pub fn power_kw(&self) -> Option<f64> {
        match self {
            LoadSpec::Power(kw) => Some(*kw),
            LoadSpec::Current(_) => None,
        }
    }
}

/// Everything needed to evaluate one circuit.
///
/// `nominal_current_a` and `cross_section_mm2` may be left out; they are
/// then selected as the smallest standard value that satisfies the
/// coordination rules.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CircuitInput {
    /// User label (e.g., "Kitchen sockets")
    pub name: String,
    pub circuit_type: CircuitType,
    pub phase: PhaseType,
    pub load: LoadSpec,
    /// cos φ; the phase default from the settings when absent
    pub power_factor: Option<f64>,
    /// Rated current In of the MCB (A)
    pub nominal_current_a: Option<f64>,
    pub characteristic: Characteristic,
    /// Conductor cross-section (mm²)
    pub cross_section_mm2: Option<f64>,
    pub material: Conductor,
    pub insulation: Insulation,
    pub installation_method: InstallationMethod,
    /// Ambient temperature (°C)
    pub ambient_temperature_c: f64,
    /// Circuits in the bundle, including this one
    pub circuits_in_bundle: u32,
    /// One-way cable length (m)
    pub length_m: Option<f64>,
    /// Measured fault-loop impedance (Ω); wins over the computed value
    pub zs_measured_ohm: Option<f64>,
    /// Source impedance up to the origin of the circuit (Ω)
    pub zs_source_ohm: Option<f64>,
}

impl CircuitInput {
    /// Input with reference installation conditions and nothing sized yet.
    pub fn new(name: impl Into<String>, load: LoadSpec) -> Self {
        Self {
            name: name.into(),
            circuit_type: CircuitType::default(),
            phase: PhaseType::default(),
            load,
            power_factor: None,
            nominal_current_a: None,
            characteristic: Characteristic::default(),
            cross_section_mm2: None,
            material: Conductor::default(),
            insulation: Insulation::default(),
            installation_method: InstallationMethod::default(),
            ambient_temperature_c: BASE_AMBIENT_TEMPERATURE_C,
            circuits_in_bundle: 1,
            length_m: None,
            zs_measured_ohm: None,
            zs_source_ohm: None,
        }
    }

    pub fn with_circuit_type(mut self, circuit_type: CircuitType) -> Self {
        self.circuit_type = circuit_type;
        self
    }

    pub fn with_phase(mut self, phase: PhaseType) -> Self {
        self.phase = phase;
        self
    }

    pub fn with_power_factor(mut self, power_factor: f64) -> Self {
        self.power_factor = Some(power_factor);
        self
    }

    pub fn with_protection(mut self, nominal_current_a: f64, characteristic: Characteristic) -> Self {
        self.nominal_current_a = Some(nominal_current_a);
        self.characteristic = characteristic;
        self
    }

    pub fn with_characteristic(mut self, characteristic: Characteristic) -> Self {
        self.characteristic = characteristic;
        self
    }

    pub fn with_cross_section(mut self, cross_section_mm2: f64) -> Self {
        self.cross_section_mm2 = Some(cross_section_mm2);
        self
    }

    pub fn with_material(mut self, material: Conductor) -> Self {
        self.material = material;
        self
    }

    pub fn with_insulation(mut self, insulation: Insulation) -> Self {
        self.insulation = insulation;
        self
    }

    pub fn with_installation_method(mut self, method: InstallationMethod) -> Self {
        self.installation_method = method;
        self
    }

    pub fn with_ambient_temperature(mut self, ambient_temperature_c: f64) -> Self {
        self.ambient_temperature_c = ambient_temperature_c;
        self
    }

    pub fn with_circuits_in_bundle(mut self, circuits_in_bundle: u32) -> Self {
        self.circuits_in_bundle = circuits_in_bundle;
        self
    }

    pub fn with_length(mut self, length_m: f64) -> Self {
        self.length_m = Some(length_m);
        self
    }

    pub fn with_measured_zs(mut self, zs_ohm: f64) -> Self {
        self.zs_measured_ohm = Some(zs_ohm);
        self
    }

    pub fn with_source_impedance(mut self, zs_ohm: f64) -> Self {
        self.zs_source_ohm = Some(zs_ohm);
        self
    }

    /// Apply the suggested cable and device for the circuit type, if any.
    pub fn with_type_suggestion(mut self) -> Self {
        if let Some(suggestion) = self.circuit_type.suggestion() {
            self.cross_section_mm2 = Some(suggestion.cross_section_mm2);
            self.nominal_current_a = Some(suggestion.nominal_current_a);
            self.characteristic = suggestion.characteristic;
        }
        self
    }

    /// Installation conditions for the correction factors
    pub fn conditions(&self) -> InstallationConditions {
        InstallationConditions::new()
            .with_ambient_temperature(self.ambient_temperature_c)
            .with_circuits_in_bundle(self.circuits_in_bundle)
            .with_insulation(self.insulation)
    }

    /// Strict validation for front ends that want to reject bad input
    /// instead of rendering sentinels.
    pub fn validate(&self) -> CalcResult<()> {
        let (field, value) = match self.load {
            LoadSpec::Current(a) => ("design_current_a", a),
            LoadSpec::Power(kw) => ("power_kw", kw),
        };
        if !is_positive(value) {
            return Err(CalcError::invalid_input(field, value.to_string(), "Load must be positive"));
        }
        if let Some(pf) = self.power_factor {
            if !is_valid_power_factor(pf) {
                return Err(CalcError::invalid_input(
                    "power_factor",
                    pf.to_string(),
                    "Power factor must lie in (0, 1]",
                ));
            }
        }
        if let Some(i_n) = self.nominal_current_a {
            if !is_positive(i_n) {
                return Err(CalcError::invalid_input(
                    "nominal_current_a",
                    i_n.to_string(),
                    "Rated current must be positive",
                ));
            }
        }
        if let Some(s) = self.cross_section_mm2 {
            if !is_positive(s) {
                return Err(CalcError::invalid_input(
                    "cross_section_mm2",
                    s.to_string(),
                    "Cross-section must be positive",
                ));
            }
        }
        if !self.ambient_temperature_c.is_finite() {
            return Err(CalcError::invalid_input(
                "ambient_temperature_c",
                self.ambient_temperature_c.to_string(),
                "Ambient temperature must be a number",
            ));
        }
        for (field, value) in [
            ("length_m", self.length_m),
            ("zs_measured_ohm", self.zs_measured_ohm),
            ("zs_source_ohm", self.zs_source_ohm),
        ] {
            if let Some(v) = value {
                if v < 0.0 || !v.is_finite() {
                    return Err(CalcError::invalid_input(field, v.to_string(), "Value cannot be negative"));
                }
            }
        }
        Ok(())
    }
}

/// Short-circuit figures behind the thermal verdict
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ShortCircuitAssessment {
    /// Isc = U0 / Zs (A)
    pub short_circuit_current_a: f64,
    /// Estimated disconnection time (s)
    pub disconnection_time_s: f64,
    /// k-coefficient used
    pub k: f64,
    pub thermal: ThermalCheck,
}

/// A check that did not pass, or could not be made
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FailedCheck {
    /// IB is zero or could not be computed
    NoLoad,
    /// cos φ outside (0, 1]; no voltage-drop check was made
    PowerFactorRejected,
    /// No standard rated current covers IB
    NominalCurrentUnresolved,
    /// No ampacity for the cross-section, or no cross-section large enough
    AmpacityUnresolved,
    GoldenRule,
    OverloadProtection,
    FaultLoop,
    ThermalWithstand,
    VoltageDrop,
}

impl FailedCheck {
    pub fn description(&self) -> &'static str {
        match self {
            FailedCheck::NoLoad => "design current is zero",
            FailedCheck::PowerFactorRejected => "power factor outside (0, 1]",
            FailedCheck::NominalCurrentUnresolved => "no standard rated current covers the load",
            FailedCheck::AmpacityUnresolved => "ampacity unknown for this cable",
            FailedCheck::GoldenRule => "IB ≤ In ≤ Iz violated",
            FailedCheck::OverloadProtection => "overload protection conditions violated",
            FailedCheck::FaultLoop => "fault-loop impedance too high (SWZ)",
            FailedCheck::ThermalWithstand => "cable does not withstand the short circuit",
            FailedCheck::VoltageDrop => "voltage drop exceeds the limit",
        }
    }
}

impl std::fmt::Display for FailedCheck {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.description())
    }
}

/// Outcome of [`evaluate`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CircuitEvaluation {
    pub circuit_type: CircuitType,
    pub phase: PhaseType,
    /// IB (A)
    pub design_current_a: f64,
    /// cos φ actually used
    pub power_factor: f64,
    /// U0 or line voltage, by phase (V)
    pub supply_voltage_v: f64,
    /// In, given or selected (A)
    pub nominal_current_a: Option<f64>,
    pub characteristic: Characteristic,
    /// S, given or selected (mm²)
    pub cross_section_mm2: Option<f64>,
    pub material: Conductor,
    pub ampacity: Option<AmpacityResult>,
    pub golden_rule: Option<GoldenRuleCheck>,
    pub overload: Option<OverloadCheck>,
    /// Present when a Zs is known
    pub fault_loop: Option<FaultLoopCheck>,
    pub short_circuit: Option<ShortCircuitAssessment>,
    /// Present when the cable length is known
    pub voltage_drop: Option<VoltageDropCheck>,
}

impl CircuitEvaluation {
    /// Corrected ampacity Iz, if resolved
    pub fn iz_a(&self) -> Option<f64> {
        self.ampacity.map(|a| a.iz_a)
    }

    /// Checks that failed or could not be made, in evaluation order
    pub fn failures(&self) -> Vec<FailedCheck> {
        let mut failures = Vec::new();
        if !is_positive(self.design_current_a) {
            failures.push(FailedCheck::NoLoad);
        }
        if !is_valid_power_factor(self.power_factor) {
            failures.push(FailedCheck::PowerFactorRejected);
        }
        if self.nominal_current_a.is_none() {
            failures.push(FailedCheck::NominalCurrentUnresolved);
        }
        if self.ampacity.is_none() {
            failures.push(FailedCheck::AmpacityUnresolved);
        }
        if matches!(self.golden_rule, Some(check) if !check.is_valid) {
            failures.push(FailedCheck::GoldenRule);
        }
        if matches!(self.overload, Some(check) if !check.is_valid) {
            failures.push(FailedCheck::OverloadProtection);
        }
        if matches!(self.fault_loop, Some(check) if !check.is_valid) {
            failures.push(FailedCheck::FaultLoop);
        }
        if matches!(self.short_circuit, Some(sc) if !sc.thermal.is_valid) {
            failures.push(FailedCheck::ThermalWithstand);
        }
        if matches!(self.voltage_drop, Some(check) if !check.is_valid) {
            failures.push(FailedCheck::VoltageDrop);
        }
        failures
    }

    /// Whether every check that could be made passed
    pub fn passes(&self) -> bool {
        self.failures().is_empty()
    }

    /// Plain-text report
    pub fn format_report(&self) -> String {
        let mut lines = vec![
            format!("Circuit: {} ({}, {})", self.circuit_type, self.phase, self.material),
            "------------------------------------------------".to_string(),
            format!(
                "IB = {:.2} A   (U = {:.0} V, cos φ = {:.2})",
                self.design_current_a, self.supply_voltage_v, self.power_factor
            ),
        ];

        match self.nominal_current_a {
            Some(i_n) => lines.push(format!("In = {:.0} A   ({}{:.0})", i_n, self.characteristic, i_n)),
            None => lines.push("In = unresolved".to_string()),
        }

        match (self.cross_section_mm2, self.ampacity) {
            (Some(s), Some(a)) => lines.push(format!(
                "S  = {} mm²   Idd = {:.1} A, k_temp = {:.3}, k_group = {:.2}, Iz = {:.2} A   {}",
                s,
                a.idd_a,
                a.k_temp,
                a.k_group,
                a.iz_a,
                norm_ref::AMPACITY
            )),
            (Some(s), None) => lines.push(format!("S  = {} mm²   Iz = unknown (no table entry)", s)),
            (None, _) => lines.push("S  = unresolved".to_string()),
        }

        if let Some(check) = self.golden_rule {
            lines.push(format!("Golden rule IB ≤ In ≤ Iz: {}", verdict(check.is_valid)));
        }
        if let Some(check) = self.overload {
            lines.push(format!(
                "Overload: I2 = {:.2} A ≤ 1.45·Iz = {:.2} A: {}   {}",
                check.i2_a,
                check.i2_limit_a,
                verdict(check.is_valid),
                norm_ref::OVERLOAD
            ));
        }
        if let Some(check) = self.fault_loop {
            lines.push(format!(
                "Fault loop: Zs = {:.3} Ω ≤ {:.3} Ω (Ia = {:.0} A): {}   {}",
                check.zs_ohm,
                check.max_zs_ohm,
                check.ia_a,
                verdict(check.is_valid),
                norm_ref::FAULT_LOOP
            ));
        }
        if let Some(sc) = self.short_circuit {
            lines.push(format!(
                "Thermal: Isc = {:.0} A, t = {} s, S_min = {:.2} mm²: {}   {}",
                sc.short_circuit_current_a,
                sc.disconnection_time_s,
                sc.thermal.min_cross_section_mm2,
                verdict(sc.thermal.is_valid),
                norm_ref::THERMAL
            ));
        }
        if let Some(check) = self.voltage_drop {
            lines.push(format!(
                "Voltage drop: {:.2} % ≤ {:.1} %: {}   {}",
                check.drop_percent,
                check.limit_percent,
                verdict(check.is_valid),
                norm_ref::VOLTAGE_DROP
            ));
        }

        let failures = self.failures();
        if failures.is_empty() {
            lines.push("Result: PASS".to_string());
        } else {
            lines.push("Result: FAIL".to_string());
            for failure in failures {
                lines.push(format!("  - {}", failure));
            }
        }
        lines.join("\n")
    }
}

fn verdict(ok: bool) -> &'static str {
    if ok {
        "OK"
    } else {
        "FAIL"
    }
}

/// Evaluate one circuit.
///
/// Never fails: unresolved quantities show up as `None` fields and as
/// entries in [`CircuitEvaluation::failures`].
pub fn evaluate(input: &CircuitInput, settings: &DesignSettings) -> CircuitEvaluation {
    let phase = input.phase;
    let voltage_v = settings.supply_voltage(phase);
    let power_factor = input
        .power_factor
        .unwrap_or_else(|| settings.default_power_factor(phase));

    let design_current_a = match input.load {
        LoadSpec::Current(a) if is_positive(a) => round2(a),
        LoadSpec::Current(_) => 0.0,
        LoadSpec::Power(kw) => design_current(phase, kw, voltage_v, power_factor),
    };

    // A given rating is never replaced; a non-positive one stays unresolved.
    let nominal_current_a = match input.nominal_current_a {
        Some(i_n) if is_positive(i_n) => Some(i_n),
        Some(_) => None,
        None => select_nominal_current(design_current_a),
    };

    let conditions = input.conditions();
    let cross_section_mm2 = input.cross_section_mm2.or_else(|| {
        nominal_current_a
            .and_then(|i_n| select_cross_section(i_n, input.installation_method, input.material, &conditions))
    });
    let ampacity = cross_section_mm2
        .and_then(|s| resolve(s, input.installation_method, input.material, &conditions));

    let (golden_rule, overload) = match (nominal_current_a, ampacity) {
        (Some(i_n), Some(a)) => (
            Some(check_golden_rule(design_current_a, i_n, a.iz_a)),
            Some(check_overload_protection(design_current_a, i_n, a.iz_a)),
        ),
        _ => (None, None),
    };

    let computed_zs = match (cross_section_mm2, input.zs_source_ohm, input.length_m) {
        (Some(s), source, Some(length)) => {
            computed_loop_impedance(source.unwrap_or(0.0), length, s, input.material)
        }
        (_, Some(source), _) => source,
        _ => 0.0,
    };
    let zs_ohm = effective_loop_impedance(input.zs_measured_ohm, computed_zs);

    let fault_loop_check = match (zs_ohm, nominal_current_a) {
        (Some(zs), Some(i_n)) => Some(fault_loop(zs, settings.phase_voltage_v, i_n, input.characteristic)),
        _ => None,
    };

    let short_circuit = match (zs_ohm, nominal_current_a, cross_section_mm2) {
        (Some(zs), Some(i_n), Some(s)) => {
            let isc = short_circuit_current(zs, settings.phase_voltage_v);
            let t = estimate_disconnection_time(isc, i_n, input.characteristic);
            let k = k_coefficient(input.material, input.insulation);
            Some(ShortCircuitAssessment {
                short_circuit_current_a: isc,
                disconnection_time_s: t,
                k,
                thermal: check_thermal_withstand(isc, t, s, k),
            })
        }
        _ => None,
    };

    let voltage_drop_check = match (input.length_m, cross_section_mm2) {
        (Some(length), Some(s)) if length > 0.0 && is_valid_power_factor(power_factor) => {
            let drop = voltage_drop(
                settings.voltage_drop_method,
                phase,
                input.material,
                design_current_a,
                length,
                s,
                voltage_v,
                power_factor,
            );
            Some(check_voltage_drop(drop, input.circuit_type))
        }
        _ => None,
    };

    tracing::debug!(
        name = %input.name,
        ib = design_current_a,
        i_n = ?nominal_current_a,
        s = ?cross_section_mm2,
        iz = ?ampacity.map(|a| a.iz_a),
        "circuit evaluated"
    );

    CircuitEvaluation {
        circuit_type: input.circuit_type,
        phase,
        design_current_a,
        power_factor,
        supply_voltage_v: voltage_v,
        nominal_current_a,
        characteristic: input.characteristic,
        cross_section_mm2,
        material: input.material,
        ampacity,
        golden_rule,
        overload,
        fault_loop: fault_loop_check,
        short_circuit,
        voltage_drop: voltage_drop_check,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings() -> DesignSettings {
        DesignSettings::default()
    }

    #[test]
    fn test_sizes_from_power() {
        let input = CircuitInput::new("Kitchen", LoadSpec::Power(3.5)).with_power_factor(0.8);
        let eval = evaluate(&input, &settings());

        assert_eq!(eval.design_current_a, 19.02);
        assert_eq!(eval.nominal_current_a, Some(20.0));
        // C table copper: 1.5 → 19 A is too small for 20 A
        assert_eq!(eval.cross_section_mm2, Some(2.5));
        assert_eq!(eval.iz_a(), Some(26.0));
        assert!(eval.golden_rule.unwrap().is_valid);
        assert!(eval.fault_loop.is_none());
        assert!(eval.voltage_drop.is_none());
        assert!(eval.passes());
    }

    #[test]
    fn test_given_values_are_checked_not_replaced() {
        let input = CircuitInput::new("Undersized", LoadSpec::Current(18.0))
            .with_protection(20.0, Characteristic::B)
            .with_cross_section(1.5)
            .with_installation_method(InstallationMethod::A1);
        let eval = evaluate(&input, &settings());

        assert_eq!(eval.cross_section_mm2, Some(1.5));
        assert_eq!(eval.iz_a(), Some(13.5));
        let failures = eval.failures();
        assert!(failures.contains(&FailedCheck::GoldenRule));
        assert!(failures.contains(&FailedCheck::OverloadProtection));
        assert!(!eval.passes());
    }

    #[test]
    fn test_power_factor_out_of_range_skips_voltage_drop() {
        let input = CircuitInput::new("Sockets", LoadSpec::Current(10.0))
            .with_power_factor(1.5)
            .with_cross_section(2.5)
            .with_length(20.0);
        let eval = evaluate(&input, &settings());

        assert!(eval.voltage_drop.is_none());
        assert!(eval.failures().contains(&FailedCheck::PowerFactorRejected));
        assert!(!eval.passes());
    }

    #[test]
    fn test_power_factor_zero_with_power_load() {
        let input = CircuitInput::new("Heater", LoadSpec::Power(2.0))
            .with_power_factor(0.0)
            .with_length(10.0);
        let eval = evaluate(&input, &settings());

        assert_eq!(eval.design_current_a, 0.0);
        let failures = eval.failures();
        assert!(failures.contains(&FailedCheck::NoLoad));
        assert!(failures.contains(&FailedCheck::PowerFactorRejected));
    }

    #[test]
    fn test_zero_rated_current_is_not_replaced() {
        let input = CircuitInput::new("Sockets", LoadSpec::Current(10.0)).with_protection(0.0, Characteristic::B);
        let eval = evaluate(&input, &settings());

        assert_eq!(eval.nominal_current_a, None);
        assert!(eval.failures().contains(&FailedCheck::NominalCurrentUnresolved));

        let omitted = evaluate(&CircuitInput::new("Sockets", LoadSpec::Current(10.0)), &settings());
        assert_eq!(omitted.nominal_current_a, Some(10.0));
    }

    #[test]
    fn test_zero_load_fails() {
        let input = CircuitInput::new("Empty", LoadSpec::Power(0.0));
        let eval = evaluate(&input, &settings());
        assert_eq!(eval.design_current_a, 0.0);
        assert!(eval.failures().contains(&FailedCheck::NoLoad));
        assert!(eval.failures().contains(&FailedCheck::NominalCurrentUnresolved));
    }

    #[test]
    fn test_untabulated_cross_section() {
        let input = CircuitInput::new("Odd cable", LoadSpec::Current(10.0))
            .with_protection(16.0, Characteristic::B)
            .with_cross_section(3.0);
        let eval = evaluate(&input, &settings());
        assert!(eval.ampacity.is_none());
        assert!(eval.golden_rule.is_none());
        assert_eq!(eval.failures(), vec![FailedCheck::AmpacityUnresolved]);
    }

    #[test]
    fn test_measured_zs_wins() {
        let input = CircuitInput::new("Sockets", LoadSpec::Current(10.0))
            .with_protection(16.0, Characteristic::B)
            .with_cross_section(2.5)
            .with_length(25.0)
            .with_source_impedance(0.4)
            .with_measured_zs(3.2);
        let eval = evaluate(&input, &settings());
        let check = eval.fault_loop.unwrap();
        assert_eq!(check.zs_ohm, 3.2);
        assert!(!check.is_valid);
        assert!(eval.failures().contains(&FailedCheck::FaultLoop));
    }

    #[test]
    fn test_computed_zs_and_thermal() {
        // Zs = 0.4 + 2 × 0.0175 × 25 / 2.5 = 0.75 Ω
        let input = CircuitInput::new("Sockets", LoadSpec::Current(10.0))
            .with_protection(16.0, Characteristic::B)
            .with_cross_section(2.5)
            .with_length(25.0)
            .with_source_impedance(0.4);
        let eval = evaluate(&input, &settings());

        let check = eval.fault_loop.unwrap();
        assert!((check.zs_ohm - 0.75).abs() < 1e-9);
        assert!(check.is_valid);

        // Isc = 230 / 0.75 ≈ 306.7 A, ratio ≈ 19.2 → 0.1 s
        let sc = eval.short_circuit.unwrap();
        assert!((sc.short_circuit_current_a - 306.666_666).abs() < 1e-3);
        assert_eq!(sc.disconnection_time_s, 0.1);
        assert_eq!(sc.k, 115.0);
        assert!(sc.thermal.is_valid);

        let vd = eval.voltage_drop.unwrap();
        assert!(vd.is_valid);
        assert!(eval.passes());
    }

    #[test]
    fn test_voltage_drop_limit_by_type() {
        // 2 × 10 × 0.0175 × 60 / 1.5 = 14 V → 6.09 %
        let input = CircuitInput::new("Long lighting run", LoadSpec::Current(10.0))
            .with_circuit_type(CircuitType::Lighting)
            .with_protection(10.0, Characteristic::B)
            .with_cross_section(1.5)
            .with_length(60.0);
        let eval = evaluate(&input, &settings());
        let vd = eval.voltage_drop.unwrap();
        assert!((vd.drop_percent - 6.09).abs() < 1e-9);
        assert_eq!(vd.limit_percent, 3.0);
        assert_eq!(eval.failures(), vec![FailedCheck::VoltageDrop]);
    }

    #[test]
    fn test_three_phase_uses_line_voltage_and_default_pf() {
        let input = CircuitInput::new("Motor", LoadSpec::Power(11.0)).with_phase(PhaseType::Three);
        let eval = evaluate(&input, &settings());
        assert_eq!(eval.supply_voltage_v, 400.0);
        assert_eq!(eval.power_factor, 0.93);
        assert!((eval.design_current_a - 17.07).abs() < 0.01);
    }

    #[test]
    fn test_type_suggestion() {
        let input = CircuitInput::new("Lights", LoadSpec::Current(6.0))
            .with_circuit_type(CircuitType::Lighting)
            .with_type_suggestion();
        assert_eq!(input.cross_section_mm2, Some(1.5));
        assert_eq!(input.nominal_current_a, Some(10.0));
    }

    #[test]
    fn test_validate() {
        assert!(CircuitInput::new("ok", LoadSpec::Power(2.0)).validate().is_ok());
        assert!(CircuitInput::new("bad", LoadSpec::Power(-2.0)).validate().is_err());
        assert!(CircuitInput::new("bad", LoadSpec::Current(10.0))
            .with_power_factor(1.5)
            .validate()
            .is_err());
        assert!(CircuitInput::new("bad", LoadSpec::Current(10.0))
            .with_length(-1.0)
            .validate()
            .is_err());
    }

    #[test]
    fn test_report_lists_failures() {
        let input = CircuitInput::new("Undersized", LoadSpec::Current(18.0))
            .with_protection(20.0, Characteristic::B)
            .with_cross_section(1.5)
            .with_installation_method(InstallationMethod::A1);
        let report = evaluate(&input, &settings()).format_report();
        assert!(report.contains("Result: FAIL"));
        assert!(report.contains(FailedCheck::GoldenRule.description()));
        assert!(report.contains(norm_ref::OVERLOAD));
    }
}
