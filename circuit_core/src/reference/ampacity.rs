//! Cable Ampacity Tables
//!
//! Base continuous current-carrying capacity (Idd) of PVC-insulated cables
//! at 30 °C ambient, one circuit, by installation-method group.
//!
//! ## Installation Methods
//!
//! | Method | Description                                  | Table |
//! |--------|----------------------------------------------|-------|
//! | A1     | Insulated conductors in conduit, insulated wall | A1 |
//! | A2     | Multi-core cable in conduit, insulated wall  | A1    |
//! | B1     | Insulated conductors in conduit on a wall    | B2    |
//! | B2     | Multi-core cable in conduit on a wall        | B2    |
//! | C      | Cable clipped direct to a wall               | C     |
//! | D      | Cable in ducts in the ground                 | C     |
//! | E      | Multi-core cable in free air                 | C     |
//!
//! Example values only; verify against PN-HD 60364-5-52 Annex B before use.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::CalcError;
use crate::reference::conductors::Conductor;

/// Canonical cross-section domain shared by all ampacity tables (mm²)
pub const CROSS_SECTIONS_MM2: [f64; 12] = [
    1.5, 2.5, 4.0, 6.0, 10.0, 16.0, 25.0, 35.0, 50.0, 70.0, 95.0, 120.0,
];

/// One row of an ampacity table
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CableAmpacityEntry {
    /// Nominal cross-section (mm²)
    pub cross_section_mm2: f64,
    /// Ampacity of the copper conductor (A)
    pub ampacity_copper_a: f64,
    /// Ampacity of the aluminium conductor (A), where tabulated
    pub ampacity_aluminum_a: Option<f64>,
}

impl CableAmpacityEntry {
    const fn new(cross_section_mm2: f64, copper: f64, aluminum: f64) -> Self {
        Self {
            cross_section_mm2,
            ampacity_copper_a: copper,
            ampacity_aluminum_a: Some(aluminum),
        }
    }

    /// Material-specific column of this row
    pub fn ampacity(&self, material: Conductor) -> Option<f64> {
        match material {
            Conductor::Copper => Some(self.ampacity_copper_a),
            Conductor::Aluminum => self.ampacity_aluminum_a,
        }
    }
}

/// Method group A1
pub const AMPACITY_A1: [CableAmpacityEntry; 12] = [
    CableAmpacityEntry::new(1.5, 13.5, 10.5),
    CableAmpacityEntry::new(2.5, 18.0, 14.0),
    CableAmpacityEntry::new(4.0, 24.0, 19.0),
    CableAmpacityEntry::new(6.0, 31.0, 24.0),
    CableAmpacityEntry::new(10.0, 42.0, 33.0),
    CableAmpacityEntry::new(16.0, 56.0, 43.0),
    CableAmpacityEntry::new(25.0, 73.0, 57.0),
    CableAmpacityEntry::new(35.0, 89.0, 70.0),
    CableAmpacityEntry::new(50.0, 110.0, 86.0),
    CableAmpacityEntry::new(70.0, 139.0, 109.0),
    CableAmpacityEntry::new(95.0, 167.0, 131.0),
    CableAmpacityEntry::new(120.0, 192.0, 151.0),
];

/// Method group B2
pub const AMPACITY_B2: [CableAmpacityEntry; 12] = [
    CableAmpacityEntry::new(1.5, 15.5, 12.0),
    CableAmpacityEntry::new(2.5, 21.0, 16.0),
    CableAmpacityEntry::new(4.0, 28.0, 22.0),
    CableAmpacityEntry::new(6.0, 36.0, 28.0),
    CableAmpacityEntry::new(10.0, 50.0, 39.0),
    CableAmpacityEntry::new(16.0, 68.0, 53.0),
    CableAmpacityEntry::new(25.0, 89.0, 69.0),
    CableAmpacityEntry::new(35.0, 110.0, 85.0),
    CableAmpacityEntry::new(50.0, 134.0, 104.0),
    CableAmpacityEntry::new(70.0, 171.0, 133.0),
    CableAmpacityEntry::new(95.0, 207.0, 161.0),
    CableAmpacityEntry::new(120.0, 239.0, 186.0),
];

/// Method group C
pub const AMPACITY_C: [CableAmpacityEntry; 12] = [
    CableAmpacityEntry::new(1.5, 19.0, 15.0),
    CableAmpacityEntry::new(2.5, 26.0, 20.0),
    CableAmpacityEntry::new(4.0, 34.0, 27.0),
    CableAmpacityEntry::new(6.0, 43.0, 34.0),
    CableAmpacityEntry::new(10.0, 59.0, 46.0),
    CableAmpacityEntry::new(16.0, 79.0, 62.0),
    CableAmpacityEntry::new(25.0, 103.0, 81.0),
    CableAmpacityEntry::new(35.0, 126.0, 99.0),
    CableAmpacityEntry::new(50.0, 153.0, 121.0),
    CableAmpacityEntry::new(70.0, 192.0, 151.0),
    CableAmpacityEntry::new(95.0, 232.0, 183.0),
    CableAmpacityEntry::new(120.0, 269.0, 212.0),
];

/// Named ampacity table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AmpacityTable {
    A1,
    B2,
    C,
}

impl AmpacityTable {
    /// All tables, in display order
    pub const ALL: [AmpacityTable; 3] = [AmpacityTable::A1, AmpacityTable::B2, AmpacityTable::C];

    /// Rows of this table
    pub fn entries(&self) -> &'static [CableAmpacityEntry] {
        match self {
            AmpacityTable::A1 => &AMPACITY_A1,
            AmpacityTable::B2 => &AMPACITY_B2,
            AmpacityTable::C => &AMPACITY_C,
        }
    }

    /// Row with exactly the given cross-section
    pub fn entry(&self, cross_section_mm2: f64) -> Option<&'static CableAmpacityEntry> {
        self.entries()
            .iter()
            .find(|e| e.cross_section_mm2 == cross_section_mm2)
    }

    /// Table name for reports
    pub fn name(&self) -> &'static str {
        match self {
            AmpacityTable::A1 => "A1",
            AmpacityTable::B2 => "B2",
            AmpacityTable::C => "C",
        }
    }
}

/// Installation method reference per PN-HD 60364-5-52 Table B.52.1
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum InstallationMethod {
    A1,
    A2,
    B1,
    B2,
    #[default]
    C,
    D,
    E,
}

impl InstallationMethod {
    /// All installation methods for UI selection
    pub const ALL: [InstallationMethod; 7] = [
        InstallationMethod::A1,
        InstallationMethod::A2,
        InstallationMethod::B1,
        InstallationMethod::B2,
        InstallationMethod::C,
        InstallationMethod::D,
        InstallationMethod::E,
    ];

    /// Ampacity table this method reads from (several methods share a table)
    pub fn table(&self) -> AmpacityTable {
        match self {
            InstallationMethod::A1 | InstallationMethod::A2 => AmpacityTable::A1,
            InstallationMethod::B1 | InstallationMethod::B2 => AmpacityTable::B2,
            InstallationMethod::C | InstallationMethod::D | InstallationMethod::E => AmpacityTable::C,
        }
    }

    /// Short code as written on drawings
    pub fn code(&self) -> &'static str {
        match self {
            InstallationMethod::A1 => "A1",
            InstallationMethod::A2 => "A2",
            InstallationMethod::B1 => "B1",
            InstallationMethod::B2 => "B2",
            InstallationMethod::C => "C",
            InstallationMethod::D => "D",
            InstallationMethod::E => "E",
        }
    }

    /// Display name for UI
    pub fn display_name(&self) -> &'static str {
        match self {
            InstallationMethod::A1 => "A1 - conductors in conduit in insulated wall",
            InstallationMethod::A2 => "A2 - multi-core cable in conduit in insulated wall",
            InstallationMethod::B1 => "B1 - conductors in conduit on wall",
            InstallationMethod::B2 => "B2 - multi-core cable in conduit on wall",
            InstallationMethod::C => "C - cable clipped direct",
            InstallationMethod::D => "D - cable in ground",
            InstallationMethod::E => "E - cable in free air",
        }
    }
}

impl std::fmt::Display for InstallationMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl FromStr for InstallationMethod {
    type Err = CalcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        InstallationMethod::ALL
            .into_iter()
            .find(|m| m.code().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| {
                CalcError::invalid_input("installation_method", s, "Expected one of A1, A2, B1, B2, C, D, E")
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tables_share_cross_section_domain() {
        for table in AmpacityTable::ALL {
            let sections: Vec<f64> = table.entries().iter().map(|e| e.cross_section_mm2).collect();
            assert_eq!(sections, CROSS_SECTIONS_MM2.to_vec());
        }
    }

    #[test]
    fn test_ampacity_increases_with_cross_section() {
        for table in AmpacityTable::ALL {
            for pair in table.entries().windows(2) {
                assert!(pair[1].ampacity_copper_a > pair[0].ampacity_copper_a);
                assert!(pair[1].ampacity_aluminum_a > pair[0].ampacity_aluminum_a);
            }
        }
    }

    #[test]
    fn test_method_aliasing() {
        assert_eq!(InstallationMethod::A2.table(), AmpacityTable::A1);
        assert_eq!(InstallationMethod::B1.table(), AmpacityTable::B2);
        assert_eq!(InstallationMethod::E.table(), AmpacityTable::C);
    }

    #[test]
    fn test_exact_entry_lookup() {
        let entry = AmpacityTable::C.entry(2.5).unwrap();
        assert_eq!(entry.ampacity(Conductor::Copper), Some(26.0));
        assert_eq!(entry.ampacity(Conductor::Aluminum), Some(20.0));
        assert!(AmpacityTable::C.entry(3.0).is_none());
    }

    #[test]
    fn test_parse_method() {
        assert_eq!("b2".parse::<InstallationMethod>().unwrap(), InstallationMethod::B2);
        assert!("F".parse::<InstallationMethod>().is_err());
    }
}
