//! # Ampacity Resolver
//!
//! Resolves the permissible continuous current of a cable from its
//! cross-section, installation method, material, and installation
//! conditions.
//!
//! A cross-section that is not tabulated for the method yields `None`
//! ("insufficient data"), never an approximation and never zero.
//!
//! ## Example
//!
//! ```rust
//! use circuit_core::calculations::ampacity::{resolve_ampacity, resolve_dynamic_ampacity};
//! use circuit_core::reference::{Conductor, InstallationMethod, Insulation};
//!
//! let idd = resolve_ampacity(2.5, InstallationMethod::C, Conductor::Copper);
//! assert_eq!(idd, Some(26.0));
//!
//! // 40°C ambient, 3 circuits in the bundle
//! let iz = resolve_dynamic_ampacity(2.5, InstallationMethod::C, Conductor::Copper, 40.0, 3, Insulation::Pvc);
//! assert_eq!(iz, Some(15.83));
//! ```

use serde::{Deserialize, Serialize};

use super::round2;
use crate::correction_factors::{grouping_factor, temperature_factor, InstallationConditions};
use crate::reference::{Conductor, InstallationMethod, Insulation, CROSS_SECTIONS_MM2};

/// Base ampacity Idd for (cross-section, installation method, material).
///
/// Returns `None` when the method's table has no row with exactly this
/// cross-section, or when the material column is not tabulated.
pub fn resolve_ampacity(cross_section_mm2: f64, method: InstallationMethod, material: Conductor) -> Option<f64> {
    let table = method.table();
    let idd = table
        .entry(cross_section_mm2)
        .and_then(|entry| entry.ampacity(material));

    if idd.is_none() {
        tracing::debug!(
            cross_section_mm2,
            table = table.name(),
            material = material.symbol(),
            "no ampacity entry"
        );
    }
    idd
}

/// Corrected ampacity Iz = round(Idd × k_temp × k_group, 2).
///
/// Propagates `None` from [`resolve_ampacity`].
pub fn resolve_dynamic_ampacity(
    cross_section_mm2: f64,
    method: InstallationMethod,
    material: Conductor,
    ambient_temperature_c: f64,
    circuits_in_bundle: u32,
    insulation: Insulation,
) -> Option<f64> {
    let idd = resolve_ampacity(cross_section_mm2, method, material)?;
    let k_temp = temperature_factor(insulation, ambient_temperature_c);
    let k_group = grouping_factor(circuits_in_bundle);
    Some(round2(idd * k_temp * k_group))
}

/// Full ampacity breakdown for reporting.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AmpacityResult {
    /// Base ampacity from the table (A)
    pub idd_a: f64,
    /// Ambient temperature factor
    pub k_temp: f64,
    /// Grouping factor
    pub k_group: f64,
    /// Corrected ampacity, rounded to 0.01 A
    pub iz_a: f64,
}

/// Resolve Idd and Iz together, keeping the applied factors.
pub fn resolve(
    cross_section_mm2: f64,
    method: InstallationMethod,
    material: Conductor,
    conditions: &InstallationConditions,
) -> Option<AmpacityResult> {
    let idd = resolve_ampacity(cross_section_mm2, method, material)?;
    let k_temp = conditions.k_temp();
    let k_group = conditions.k_group();
    Some(AmpacityResult {
        idd_a: idd,
        k_temp,
        k_group,
        iz_a: round2(idd * k_temp * k_group),
    })
}

/// Smallest canonical cross-section whose corrected ampacity is at least
/// `nominal_current_a`, or `None` if even the largest one is too small.
pub fn select_cross_section(
    nominal_current_a: f64,
    method: InstallationMethod,
    material: Conductor,
    conditions: &InstallationConditions,
) -> Option<f64> {
    if nominal_current_a <= 0.0 {
        return None;
    }
    CROSS_SECTIONS_MM2.iter().copied().find(|&s| {
        resolve(s, method, material, conditions)
            .map(|r| r.iz_a >= nominal_current_a)
            .unwrap_or(false)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reference::AmpacityTable;

    #[test]
    fn test_resolve_by_method() {
        assert_eq!(resolve_ampacity(2.5, InstallationMethod::A1, Conductor::Copper), Some(18.0));
        assert_eq!(resolve_ampacity(2.5, InstallationMethod::A2, Conductor::Copper), Some(18.0));
        assert_eq!(resolve_ampacity(16.0, InstallationMethod::B2, Conductor::Aluminum), Some(53.0));
        assert_eq!(resolve_ampacity(120.0, InstallationMethod::E, Conductor::Copper), Some(269.0));
    }

    #[test]
    fn test_untabulated_cross_section_is_not_found() {
        assert_eq!(resolve_ampacity(3.0, InstallationMethod::C, Conductor::Copper), None);
        assert_eq!(resolve_ampacity(150.0, InstallationMethod::C, Conductor::Copper), None);
        assert_eq!(
            resolve_dynamic_ampacity(3.0, InstallationMethod::C, Conductor::Copper, 30.0, 1, Insulation::Pvc),
            None
        );
    }

    #[test]
    fn test_base_conditions_return_raw_table_value() {
        for method in InstallationMethod::ALL {
            for entry in method.table().entries() {
                let iz = resolve_dynamic_ampacity(
                    entry.cross_section_mm2,
                    method,
                    Conductor::Copper,
                    30.0,
                    1,
                    Insulation::Pvc,
                );
                assert_eq!(iz, Some(entry.ampacity_copper_a));
            }
        }
    }

    #[test]
    fn test_corrected_ampacity() {
        // 26 × 0.87 × 0.70 = 15.834 → 15.83
        let iz = resolve_dynamic_ampacity(2.5, InstallationMethod::C, Conductor::Copper, 40.0, 3, Insulation::Pvc);
        assert_eq!(iz, Some(15.83));

        // XLPE at 40°C: 26 × 0.91 = 23.66
        let iz = resolve_dynamic_ampacity(2.5, InstallationMethod::C, Conductor::Copper, 40.0, 1, Insulation::Xlpe);
        assert_eq!(iz, Some(23.66));
    }

    #[test]
    fn test_resolve_breakdown() {
        let conditions = InstallationConditions::new().with_circuits_in_bundle(2);
        let result = resolve(4.0, InstallationMethod::B1, Conductor::Copper, &conditions).unwrap();
        assert_eq!(result.idd_a, 28.0);
        assert_eq!(result.k_group, 0.80);
        assert_eq!(result.iz_a, 22.4);
    }

    #[test]
    fn test_select_cross_section() {
        let conditions = InstallationConditions::new();
        // C table copper: 1.5 → 19 A, 2.5 → 26 A
        assert_eq!(select_cross_section(16.0, InstallationMethod::C, Conductor::Copper, &conditions), Some(1.5));
        assert_eq!(select_cross_section(20.0, InstallationMethod::C, Conductor::Copper, &conditions), Some(2.5));
        assert_eq!(select_cross_section(400.0, InstallationMethod::C, Conductor::Copper, &conditions), None);
        assert_eq!(select_cross_section(0.0, InstallationMethod::C, Conductor::Copper, &conditions), None);
    }

    #[test]
    fn test_every_table_resolves_every_canonical_section() {
        for table in AmpacityTable::ALL {
            for s in CROSS_SECTIONS_MM2 {
                assert!(table.entry(s).is_some());
            }
        }
    }
}
