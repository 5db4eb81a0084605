//! # Circuit Record
//!
//! The persisted, flat record of a committed circuit. Every numeric field
//! is derived by [`evaluate`](crate::calculations::design::evaluate); a
//! record is never recomputed after creation.
//!
//! ## JSON Example
//!
//! ```json
//! {
//!   "id": "5f0c1f9e-3c1e-4b8a-9d4f-0d6a2b7c9e11",
//!   "name": "Kitchen sockets",
//!   "type": "sockets",
//!   "IB": 19.02,
//!   "In": 20.0,
//!   "characteristic": "B",
//!   "crossSectionMm2": 2.5,
//!   "material": "copper",
//!   "Iz": 26.0,
//!   "phaseType": "single",
//!   "powerKW": 3.5,
//!   "powerFactor": 0.8,
//!   "length": 20.0,
//!   "Zs": 0.28,
//!   "voltageDropPercent": 1.85,
//!   "installationMethod": "C",
//!   "ambientTemperature": 30.0,
//!   "numberOfCircuitsInBundle": 1,
//!   "insulationType": "PVC",
//!   "Idd": 26.0,
//!   "goldenRuleValid": true,
//!   "swzValid": true,
//!   "overloadProtectionValid": true
//! }
//! ```
//!
//! Older records that only carry `crossSection` and `voltageDrop` are
//! accepted on import; fields they lack take their defaults.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::calculations::design::{CircuitEvaluation, CircuitInput, LoadSpec};
use crate::calculations::is_positive;
use crate::calculations::load_current::is_valid_power_factor;
use crate::correction_factors::BASE_AMBIENT_TEMPERATURE_C;
use crate::errors::{CalcError, CalcResult};
use crate::reference::{Characteristic, CircuitType, Conductor, InstallationMethod, Insulation, PhaseType};

fn default_ambient_temperature() -> f64 {
    BASE_AMBIENT_TEMPERATURE_C
}

fn default_circuits_in_bundle() -> u32 {
    1
}

/// A committed circuit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Circuit {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub circuit_type: CircuitType,
    #[serde(rename = "IB")]
    pub ib: f64,
    #[serde(rename = "In")]
    pub i_n: f64,
    pub characteristic: Characteristic,
    #[serde(alias = "crossSection")]
    pub cross_section_mm2: f64,
    pub material: Conductor,
    #[serde(rename = "Iz")]
    pub iz: f64,
    #[serde(default)]
    pub phase_type: PhaseType,
    #[serde(rename = "powerKW", default, skip_serializing_if = "Option::is_none")]
    pub power_kw: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub power_factor: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub length: Option<f64>,
    #[serde(rename = "Zs", default, skip_serializing_if = "Option::is_none")]
    pub zs: Option<f64>,
    #[serde(alias = "voltageDrop", default, skip_serializing_if = "Option::is_none")]
    pub voltage_drop_percent: Option<f64>,
    #[serde(default)]
    pub installation_method: InstallationMethod,
    #[serde(default = "default_ambient_temperature")]
    pub ambient_temperature: f64,
    #[serde(default = "default_circuits_in_bundle")]
    pub number_of_circuits_in_bundle: u32,
    #[serde(default)]
    pub insulation_type: Insulation,
    #[serde(rename = "Idd", default)]
    pub idd: f64,
    #[serde(default)]
    pub golden_rule_valid: bool,
    /// Absent when no fault-loop impedance was available
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub swz_valid: Option<bool>,
    #[serde(default)]
    pub overload_protection_valid: bool,
}

impl Circuit {
    /// Build the record for a committed form.
    ///
    /// Refuses an empty name, a power factor outside (0, 1], a zero design
    /// current, an unresolved or non-positive rated current, or an
    /// unresolved ampacity. A record that fails a check is still accepted;
    /// its verdict fields say so.
    pub fn from_evaluation(input: &CircuitInput, evaluation: &CircuitEvaluation) -> CalcResult<Self> {
        let name = input.name.trim();
        if name.is_empty() {
            return Err(CalcError::missing_field("name"));
        }
        if !is_valid_power_factor(evaluation.power_factor) {
            return Err(CalcError::invalid_input(
                "powerFactor",
                evaluation.power_factor.to_string(),
                "Power factor must lie in (0, 1]",
            ));
        }
        if !is_positive(evaluation.design_current_a) {
            return Err(CalcError::invalid_input(
                "IB",
                evaluation.design_current_a.to_string(),
                "Design current must be positive",
            ));
        }
        let i_n = match evaluation.nominal_current_a {
            Some(i_n) if i_n > 0.0 => i_n,
            _ => return Err(CalcError::missing_field("In")),
        };
        let cross_section_mm2 = evaluation
            .cross_section_mm2
            .ok_or_else(|| CalcError::missing_field("crossSectionMm2"))?;
        let ampacity = evaluation.ampacity.ok_or_else(|| {
            CalcError::reference_not_found(
                format!("ampacity {}", input.installation_method.table().name()),
                format!("{} mm² {}", cross_section_mm2, input.material.symbol()),
            )
        })?;

        let power_kw = match input.load {
            LoadSpec::Power(kw) => Some(kw),
            LoadSpec::Current(_) => None,
        };
        let power_factor = if power_kw.is_some() || input.power_factor.is_some() {
            Some(evaluation.power_factor)
        } else {
            None
        };

        Ok(Circuit {
            id: Uuid::new_v4().to_string(),
            name: name.to_string(),
            circuit_type: input.circuit_type,
            ib: evaluation.design_current_a,
            i_n,
            characteristic: evaluation.characteristic,
            cross_section_mm2,
            material: input.material,
            iz: ampacity.iz_a,
            phase_type: input.phase,
            power_kw,
            power_factor,
            length: input.length_m.filter(|&l| l > 0.0),
            zs: evaluation.fault_loop.map(|f| f.zs_ohm),
            voltage_drop_percent: evaluation.voltage_drop.map(|v| v.drop_percent),
            installation_method: input.installation_method,
            ambient_temperature: input.ambient_temperature_c,
            number_of_circuits_in_bundle: input.circuits_in_bundle,
            insulation_type: input.insulation,
            idd: ampacity.idd_a,
            golden_rule_valid: evaluation.golden_rule.map(|g| g.is_valid).unwrap_or(false),
            swz_valid: evaluation.fault_loop.map(|f| f.is_valid),
            overload_protection_valid: evaluation.overload.map(|o| o.is_valid).unwrap_or(false),
        })
    }

    /// All verdicts that were made passed
    pub fn is_compliant(&self) -> bool {
        self.golden_rule_valid && self.overload_protection_valid && self.swz_valid.unwrap_or(true)
    }

    /// Device designation, e.g. "B16" or "C20/3P"
    pub fn device_label(&self) -> String {
        format!("{}{}{}", self.characteristic, self.i_n, self.phase_type.pole_suffix())
    }
}
