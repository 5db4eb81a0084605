//! # Ampacity Correction Factors
//!
//! Correction factors applied to the tabulated base ampacity Idd to obtain
//! the permissible continuous current of an installed cable:
//!
//! ```text
//! Iz = Idd × k_temp × k_group
//! ```
//!
//! ## Factor Summary
//!
//! | Factor  | Description             | Key                     | Lookup            |
//! |---------|-------------------------|-------------------------|-------------------|
//! | k_temp  | Ambient temperature     | °C, by insulation type  | Linear, clamped   |
//! | k_group | Grouping of circuits    | circuits in the bundle  | Step to lower key |
//!
//! The two factors deliberately use different lookup strategies. Temperature
//! is interpolated between sampled points; grouping takes the factor of the
//! next-lower sampled bundle size. Do not unify them.
//!
//! ## Reference
//!
//! PN-HD 60364-5-52, Tables B.52.14 and B.52.17. Example values only.

use serde::{Deserialize, Serialize};

use crate::reference::conductors::Insulation;
use crate::reference::norm_ref;

/// Reference ambient temperature of the ampacity tables (°C)
pub const BASE_AMBIENT_TEMPERATURE_C: f64 = 30.0;

/// One sampled point of a temperature correction curve
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TemperaturePoint {
    pub temperature_c: f64,
    pub factor: f64,
}

/// One sampled point of the grouping correction table
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GroupingPoint {
    pub circuits: u32,
    pub factor: f64,
}

const fn t(temperature_c: f64, factor: f64) -> TemperaturePoint {
    TemperaturePoint { temperature_c, factor }
}

const fn g(circuits: u32, factor: f64) -> GroupingPoint {
    GroupingPoint { circuits, factor }
}

/// Ambient temperature correction for PVC insulation (70 °C conductor)
pub const TEMPERATURE_CORRECTION_PVC: [TemperaturePoint; 11] = [
    t(10.0, 1.22),
    t(15.0, 1.17),
    t(20.0, 1.12),
    t(25.0, 1.06),
    t(30.0, 1.00),
    t(35.0, 0.94),
    t(40.0, 0.87),
    t(45.0, 0.79),
    t(50.0, 0.71),
    t(55.0, 0.61),
    t(60.0, 0.50),
];

/// Ambient temperature correction for XLPE/EPR insulation (90 °C conductor)
pub const TEMPERATURE_CORRECTION_XLPE: [TemperaturePoint; 15] = [
    t(10.0, 1.15),
    t(15.0, 1.12),
    t(20.0, 1.08),
    t(25.0, 1.04),
    t(30.0, 1.00),
    t(35.0, 0.96),
    t(40.0, 0.91),
    t(45.0, 0.87),
    t(50.0, 0.82),
    t(55.0, 0.76),
    t(60.0, 0.71),
    t(65.0, 0.65),
    t(70.0, 0.58),
    t(75.0, 0.50),
    t(80.0, 0.41),
];

/// Grouping correction for circuits bundled together.
///
/// 7 circuits is not sampled; [`grouping_factor`] steps 7 down to the
/// factor for 6. Do not add a row for 7.
pub const GROUPING_CORRECTION: [GroupingPoint; 14] = [
    g(1, 1.00),
    g(2, 0.80),
    g(3, 0.70),
    g(4, 0.65),
    g(5, 0.60),
    g(6, 0.57),
    g(8, 0.52),
    g(9, 0.50),
    g(10, 0.48),
    g(12, 0.45),
    g(14, 0.43),
    g(16, 0.41),
    g(18, 0.40),
    g(20, 0.38),
];

/// Temperature correction curve for an insulation type
pub fn temperature_table(insulation: Insulation) -> &'static [TemperaturePoint] {
    match insulation {
        Insulation::Pvc => &TEMPERATURE_CORRECTION_PVC,
        Insulation::Xlpe => &TEMPERATURE_CORRECTION_XLPE,
    }
}

/// Ambient temperature factor k_temp.
///
/// Exact sample if the temperature is tabulated, linear interpolation
/// between the bracketing samples otherwise, and the nearest extreme sample
/// outside the tabulated range (no extrapolation).
pub fn temperature_factor(insulation: Insulation, ambient_temperature_c: f64) -> f64 {
    if !ambient_temperature_c.is_finite() {
        tracing::warn!(ambient_temperature_c, "non-finite ambient temperature, using k_temp = 1.0");
        return 1.0;
    }
    interpolate_clamped(temperature_table(insulation), ambient_temperature_c)
}

fn interpolate_clamped(points: &[TemperaturePoint], temperature_c: f64) -> f64 {
    let (first, last) = match (points.first(), points.last()) {
        (Some(first), Some(last)) => (first, last),
        _ => return 1.0,
    };

    if let Some(point) = points.iter().find(|p| p.temperature_c == temperature_c) {
        return point.factor;
    }
    if temperature_c <= first.temperature_c {
        return first.factor;
    }
    if temperature_c >= last.temperature_c {
        return last.factor;
    }

    for pair in points.windows(2) {
        let (lo, hi) = (pair[0], pair[1]);
        if temperature_c >= lo.temperature_c && temperature_c <= hi.temperature_c {
            let ratio = (temperature_c - lo.temperature_c) / (hi.temperature_c - lo.temperature_c);
            return lo.factor + ratio * (hi.factor - lo.factor);
        }
    }

    1.0
}

/// Grouping factor k_group.
///
/// Exact sample if the bundle size is tabulated; otherwise the factor of the
/// next-lower tabulated size (a step function, never interpolated). Sizes
/// above the largest key use the largest key's factor. A bundle smaller than
/// the smallest key (i.e. zero circuits) gives 1.0.
pub fn grouping_factor(circuits_in_bundle: u32) -> f64 {
    GROUPING_CORRECTION
        .iter()
        .rev()
        .find(|p| p.circuits <= circuits_in_bundle)
        .map(|p| p.factor)
        .unwrap_or(1.0)
}

/// Installation conditions feeding the correction factors.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct InstallationConditions {
    /// Ambient temperature (°C)
    pub ambient_temperature_c: f64,
    /// Number of circuits in the bundle, including this one
    pub circuits_in_bundle: u32,
    /// Insulation type (selects the temperature curve)
    pub insulation: Insulation,
}

impl Default for InstallationConditions {
    fn default() -> Self {
        Self {
            ambient_temperature_c: BASE_AMBIENT_TEMPERATURE_C,
            circuits_in_bundle: 1,
            insulation: Insulation::Pvc,
        }
    }
}

impl InstallationConditions {
    /// Reference conditions (30 °C, single circuit, PVC)
    pub fn new() -> Self {
        Self::default()
    }

    /// Set ambient temperature
    pub fn with_ambient_temperature(mut self, ambient_temperature_c: f64) -> Self {
        self.ambient_temperature_c = ambient_temperature_c;
        self
    }

    /// Set bundle size
    pub fn with_circuits_in_bundle(mut self, circuits_in_bundle: u32) -> Self {
        self.circuits_in_bundle = circuits_in_bundle;
        self
    }

    /// Set insulation type
    pub fn with_insulation(mut self, insulation: Insulation) -> Self {
        self.insulation = insulation;
        self
    }

    /// Get k_temp
    pub fn k_temp(&self) -> f64 {
        temperature_factor(self.insulation, self.ambient_temperature_c)
    }

    /// Get k_group
    pub fn k_group(&self) -> f64 {
        grouping_factor(self.circuits_in_bundle)
    }

    /// Combined factor k_temp × k_group
    pub fn net_factor(&self) -> f64 {
        self.k_temp() * self.k_group()
    }

    /// Summary of the applied factors for reporting
    pub fn summary(&self) -> CorrectionSummary {
        CorrectionSummary {
            ambient_temperature_c: self.ambient_temperature_c,
            circuits_in_bundle: self.circuits_in_bundle,
            insulation: self.insulation,
            k_temp: self.k_temp(),
            k_group: self.k_group(),
            net_factor: self.net_factor(),
        }
    }
}

/// Applied correction factors, for reports
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CorrectionSummary {
    pub ambient_temperature_c: f64,
    pub circuits_in_bundle: u32,
    pub insulation: Insulation,
    pub k_temp: f64,
    pub k_group: f64,
    pub net_factor: f64,
}

impl CorrectionSummary {
    /// Format as a multi-line string for reports
    pub fn format_report(&self) -> String {
        format!(
            "Correction factors ({}, {:.1}°C, {} circuit(s))\n\
             ------------------------------------------------\n\
             k_temp  (Ambient temperature) = {:.3}   {}\n\
             k_group (Grouping)            = {:.3}   {}\n\
             Net factor                    = {:.3}",
            self.insulation,
            self.ambient_temperature_c,
            self.circuits_in_bundle,
            self.k_temp,
            norm_ref::K_TEMP,
            self.k_group,
            norm_ref::K_GROUP,
            self.net_factor,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_conditions_are_unity() {
        assert_eq!(temperature_factor(Insulation::Pvc, 30.0), 1.0);
        assert_eq!(temperature_factor(Insulation::Xlpe, 30.0), 1.0);
        assert_eq!(grouping_factor(1), 1.0);
        assert_eq!(InstallationConditions::default().net_factor(), 1.0);
    }

    #[test]
    fn test_exact_temperature_samples() {
        assert_eq!(temperature_factor(Insulation::Pvc, 40.0), 0.87);
        assert_eq!(temperature_factor(Insulation::Xlpe, 70.0), 0.58);
    }

    #[test]
    fn test_temperature_interpolation() {
        // Halfway between 30°C (1.00) and 35°C (0.94)
        let k = temperature_factor(Insulation::Pvc, 32.5);
        assert!((k - 0.97).abs() < 1e-9);

        // 42°C: 0.87 + 0.4 × (0.79 - 0.87) = 0.838
        let k = temperature_factor(Insulation::Pvc, 42.0);
        assert!((k - 0.838).abs() < 1e-9);
    }

    #[test]
    fn test_temperature_clamps_outside_range() {
        assert_eq!(temperature_factor(Insulation::Pvc, -5.0), 1.22);
        assert_eq!(temperature_factor(Insulation::Pvc, 75.0), 0.50);
        assert_eq!(temperature_factor(Insulation::Xlpe, 5.0), 1.15);
        assert_eq!(temperature_factor(Insulation::Xlpe, 95.0), 0.41);
    }

    #[test]
    fn test_xlpe_tolerates_heat_better() {
        for temp in [35.0, 40.0, 45.0, 50.0, 55.0, 60.0] {
            assert!(temperature_factor(Insulation::Xlpe, temp) > temperature_factor(Insulation::Pvc, temp));
        }
    }

    #[test]
    fn test_grouping_is_step_function() {
        // 7 is not tabulated: take the factor for 6, not a value between 6 and 8
        assert_eq!(grouping_factor(7), grouping_factor(6));
        assert_eq!(grouping_factor(7), 0.57);
        assert!(GROUPING_CORRECTION.iter().all(|p| p.circuits != 7));
        assert_eq!(grouping_factor(11), 0.48);
        assert_eq!(grouping_factor(13), 0.45);
    }

    #[test]
    fn test_grouping_bounds() {
        assert_eq!(grouping_factor(0), 1.0);
        assert_eq!(grouping_factor(20), 0.38);
        assert_eq!(grouping_factor(45), 0.38);
    }

    #[test]
    fn test_factors_in_range() {
        for p in TEMPERATURE_CORRECTION_PVC.iter().chain(TEMPERATURE_CORRECTION_XLPE.iter()) {
            assert!(p.factor > 0.0 && p.factor <= 1.3);
        }
        for p in GROUPING_CORRECTION.iter() {
            assert!(p.factor > 0.0 && p.factor <= 1.3);
        }
    }

    #[test]
    fn test_summary_report() {
        let summary = InstallationConditions::new()
            .with_ambient_temperature(40.0)
            .with_circuits_in_bundle(3)
            .summary();
        assert!((summary.net_factor - 0.87 * 0.70).abs() < 1e-9);
        assert!(summary.format_report().contains(norm_ref::K_GROUP));
    }
}
