//! Conductor Materials and Insulation
//!
//! Electrical constants of conductor materials and the adiabatic
//! short-circuit coefficient k for each material/insulation pair.
//!
//! All values are provisional reference data and must be verified against
//! the applicable edition of the standard before production use.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::CalcError;

/// Conductor material
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Conductor {
    /// Copper (Cu)
    #[default]
    Copper,
    /// Aluminium (Al)
    Aluminum,
}

impl Conductor {
    /// All conductor variants for UI selection
    pub const ALL: [Conductor; 2] = [Conductor::Copper, Conductor::Aluminum];

    /// Resistivity ρ at 20 °C in Ω·mm²/m
    pub fn resistivity(&self) -> f64 {
        match self {
            Conductor::Copper => 0.0175,
            Conductor::Aluminum => 0.0283,
        }
    }

    /// Conductivity γ in m/(Ω·mm²) at the given conductor temperature
    pub fn conductivity(&self, temperature: ConductorTemperature) -> f64 {
        match (self, temperature) {
            (Conductor::Copper, ConductorTemperature::Ambient20C) => 56.0,
            (Conductor::Copper, ConductorTemperature::Operating70C) => 46.0,
            (Conductor::Aluminum, ConductorTemperature::Ambient20C) => 35.0,
            (Conductor::Aluminum, ConductorTemperature::Operating70C) => 29.0,
        }
    }

    /// Chemical symbol used in cable designations
    pub fn symbol(&self) -> &'static str {
        match self {
            Conductor::Copper => "Cu",
            Conductor::Aluminum => "Al",
        }
    }

    /// Display name for UI
    pub fn display_name(&self) -> &'static str {
        match self {
            Conductor::Copper => "Copper (Cu)",
            Conductor::Aluminum => "Aluminium (Al)",
        }
    }
}

impl std::fmt::Display for Conductor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

impl FromStr for Conductor {
    type Err = CalcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "copper" | "cu" => Ok(Conductor::Copper),
            "aluminum" | "aluminium" | "al" => Ok(Conductor::Aluminum),
            other => Err(CalcError::invalid_input(
                "material",
                other,
                "Expected copper or aluminum",
            )),
        }
    }
}

/// Insulation type of the cable
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Insulation {
    /// PVC, 70 °C maximum conductor temperature
    #[default]
    #[serde(rename = "PVC")]
    Pvc,
    /// XLPE/EPR, 90 °C maximum conductor temperature
    #[serde(rename = "XLPE")]
    Xlpe,
}

impl Insulation {
    /// All insulation variants for UI selection
    pub const ALL: [Insulation; 2] = [Insulation::Pvc, Insulation::Xlpe];

    /// Maximum permissible conductor temperature in continuous service (°C)
    pub fn max_conductor_temperature_c(&self) -> f64 {
        match self {
            Insulation::Pvc => 70.0,
            Insulation::Xlpe => 90.0,
        }
    }

    /// Display name for UI
    pub fn display_name(&self) -> &'static str {
        match self {
            Insulation::Pvc => "PVC (70°C)",
            Insulation::Xlpe => "XLPE/EPR (90°C)",
        }
    }
}

impl std::fmt::Display for Insulation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

impl FromStr for Insulation {
    type Err = CalcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "PVC" => Ok(Insulation::Pvc),
            "XLPE" | "EPR" => Ok(Insulation::Xlpe),
            other => Err(CalcError::invalid_input(
                "insulation",
                other,
                "Expected PVC or XLPE",
            )),
        }
    }
}

/// Conductor temperature at which conductivity is taken.
///
/// Worst-case voltage-drop checks use the operating temperature, where the
/// conductor resistance is highest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum ConductorTemperature {
    /// Installation temperature, 20 °C
    #[default]
    Ambient20C,
    /// Thermal operating temperature of a PVC cable, 70 °C
    Operating70C,
}

/// Adiabatic short-circuit coefficient k for a material/insulation pair
/// (A·√s/mm²), used in S ≥ I·√t / k.
pub fn k_coefficient(material: Conductor, insulation: Insulation) -> f64 {
    match (material, insulation) {
        (Conductor::Copper, Insulation::Pvc) => 115.0,
        (Conductor::Copper, Insulation::Xlpe) => 143.0,
        (Conductor::Aluminum, Insulation::Pvc) => 76.0,
        (Conductor::Aluminum, Insulation::Xlpe) => 94.0,
    }
}

/// Default k-coefficient (copper, PVC)
pub const K_DEFAULT: f64 = 115.0;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_k_coefficients() {
        assert_eq!(k_coefficient(Conductor::Copper, Insulation::Pvc), K_DEFAULT);
        assert_eq!(k_coefficient(Conductor::Copper, Insulation::Xlpe), 143.0);
        assert_eq!(k_coefficient(Conductor::Aluminum, Insulation::Pvc), 76.0);
        assert_eq!(k_coefficient(Conductor::Aluminum, Insulation::Xlpe), 94.0);
    }

    #[test]
    fn test_operating_temperature_lowers_conductivity() {
        for material in Conductor::ALL {
            assert!(
                material.conductivity(ConductorTemperature::Operating70C)
                    < material.conductivity(ConductorTemperature::Ambient20C)
            );
        }
    }

    #[test]
    fn test_parse_names() {
        assert_eq!("Cu".parse::<Conductor>().unwrap(), Conductor::Copper);
        assert_eq!("aluminium".parse::<Conductor>().unwrap(), Conductor::Aluminum);
        assert_eq!("xlpe".parse::<Insulation>().unwrap(), Insulation::Xlpe);
        assert!("steel".parse::<Conductor>().is_err());
    }

    #[test]
    fn test_serialization_names() {
        assert_eq!(serde_json::to_string(&Conductor::Aluminum).unwrap(), "\"aluminum\"");
        assert_eq!(serde_json::to_string(&Insulation::Pvc).unwrap(), "\"PVC\"");
        let parsed: Insulation = serde_json::from_str("\"XLPE\"").unwrap();
        assert_eq!(parsed, Insulation::Xlpe);
    }
}
