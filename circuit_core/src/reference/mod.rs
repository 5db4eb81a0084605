//! # Reference Data
//!
//! Static, read-only lookup data for low-voltage circuit design:
//!
//! - [`ampacity`] - base ampacity tables and installation methods
//! - [`conductors`] - conductor materials, insulation, ρ, γ and k
//! - [`protection`] - MCB rated currents and tripping characteristics
//! - [`circuit_types`] - circuit purpose, phase arrangement, voltage-drop limits
//!
//! Correction-factor tables live in [`crate::correction_factors`].
//!
//! Every value here is example reference data, to be verified against the
//! applicable standard before production use.

pub mod ampacity;
pub mod circuit_types;
pub mod conductors;
pub mod protection;

pub use ampacity::{AmpacityTable, CableAmpacityEntry, InstallationMethod, CROSS_SECTIONS_MM2};
pub use circuit_types::{CircuitSuggestion, CircuitType, PhaseType, PowerFactorPreset};
pub use conductors::{k_coefficient, Conductor, ConductorTemperature, Insulation, K_DEFAULT};
pub use protection::{Characteristic, NOMINAL_CURRENTS_A};

/// Nominal phase-to-earth voltage U0 of a 230/400 V system (V)
pub const PHASE_VOLTAGE_V: f64 = 230.0;

/// Nominal line-to-line voltage of a 230/400 V system (V)
pub const LINE_VOLTAGE_V: f64 = 400.0;

/// Normative clause references for traceable reports.
pub mod norm_ref {
    /// Current-carrying capacity tables
    pub const AMPACITY: &str = "PN-HD 60364-5-52 Annex B";
    /// Ambient temperature correction
    pub const K_TEMP: &str = "PN-HD 60364-5-52 Table B.52.14";
    /// Grouping correction
    pub const K_GROUP: &str = "PN-HD 60364-5-52 Table B.52.17";
    /// Coordination IB ≤ In ≤ Iz and I2 ≤ 1.45 Iz
    pub const OVERLOAD: &str = "PN-HD 60364-4-43 433.1";
    /// Automatic disconnection Zs × Ia ≤ U0
    pub const FAULT_LOOP: &str = "PN-HD 60364-4-41 411.4.4";
    /// Adiabatic short-circuit withstand
    pub const THERMAL: &str = "PN-HD 60364-4-43 434.5.2";
    /// Voltage drop in consumers' installations
    pub const VOLTAGE_DROP: &str = "PN-HD 60364-5-52 525";
}
