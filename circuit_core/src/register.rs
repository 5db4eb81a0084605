//! # Circuit Register
//!
//! The ordered list of committed circuits for one installation, with its
//! metadata and design settings. Registers serialize to `.json` files.
//!
//! ## Structure
//!
//! ```text
//! CircuitRegister
//! ├── meta: RegisterMetadata (version, author, installation, timestamps)
//! ├── settings: DesignSettings (voltages, default cos φ, ΔU method)
//! └── circuits: Vec<Circuit> (in commit order)
//! ```
//!
//! Circuits are only appended, removed, or replaced wholesale; a stored
//! record is never edited in place.
//!
//! ## Example
//!
//! ```rust
//! use circuit_core::calculations::design::{evaluate, CircuitInput, LoadSpec};
//! use circuit_core::circuit::Circuit;
//! use circuit_core::register::CircuitRegister;
//!
//! let mut register = CircuitRegister::new("Jan Kowalski", "Flat 12");
//! let input = CircuitInput::new("Bathroom", LoadSpec::Current(8.0));
//! let evaluation = evaluate(&input, &register.settings);
//! let circuit = Circuit::from_evaluation(&input, &evaluation).unwrap();
//!
//! let id = register.add(circuit);
//! assert_eq!(register.len(), 1);
//! assert!(register.get(&id).is_some());
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::circuit::Circuit;
use crate::errors::{CalcError, CalcResult};
use crate::settings::DesignSettings;

/// Current schema version for register files
pub const SCHEMA_VERSION: &str = "0.1.0";

/// Root register container
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CircuitRegister {
    pub meta: RegisterMetadata,
    #[serde(default)]
    pub settings: DesignSettings,
    /// Committed circuits, oldest first
    #[serde(default)]
    pub circuits: Vec<Circuit>,
}

impl CircuitRegister {
    /// Create an empty register.
    pub fn new(author: impl Into<String>, installation: impl Into<String>) -> Self {
        let now = Utc::now();
        CircuitRegister {
            meta: RegisterMetadata {
                version: SCHEMA_VERSION.to_string(),
                author: author.into(),
                installation: installation.into(),
                created: now,
                modified: now,
            },
            settings: DesignSettings::default(),
            circuits: Vec::new(),
        }
    }

    /// Append a circuit; returns its id.
    pub fn add(&mut self, circuit: Circuit) -> String {
        let id = circuit.id.clone();
        self.circuits.push(circuit);
        self.touch();
        id
    }

    /// Remove a circuit by id, keeping the order of the rest.
    pub fn remove(&mut self, id: &str) -> Option<Circuit> {
        let index = self.circuits.iter().position(|c| c.id == id)?;
        let circuit = self.circuits.remove(index);
        self.touch();
        Some(circuit)
    }

    pub fn get(&self, id: &str) -> Option<&Circuit> {
        self.circuits.iter().find(|c| c.id == id)
    }

    /// Remove every circuit
    pub fn clear(&mut self) {
        self.circuits.clear();
        self.touch();
    }

    /// Replace the whole list (import)
    pub fn replace(&mut self, circuits: Vec<Circuit>) {
        self.circuits = circuits;
        self.touch();
    }

    pub fn len(&self) -> usize {
        self.circuits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.circuits.is_empty()
    }

    /// Circuits with at least one failed verdict
    pub fn non_compliant(&self) -> impl Iterator<Item = &Circuit> {
        self.circuits.iter().filter(|c| !c.is_compliant())
    }

    /// Update the modified timestamp.
    pub fn touch(&mut self) {
        self.meta.modified = Utc::now();
    }

    /// Export the bare circuit list as pretty JSON.
    pub fn export_circuits_json(&self) -> CalcResult<String> {
        Ok(serde_json::to_string_pretty(&self.circuits)?)
    }

    /// Replace the circuit list with one parsed from a bare JSON array.
    ///
    /// On a parse error the register is left untouched. Returns the number
    /// of imported circuits.
    pub fn import_circuits_json(&mut self, json: &str) -> CalcResult<usize> {
        let circuits = parse_circuits_json(json)?;
        let count = circuits.len();
        self.replace(circuits);
        Ok(count)
    }
}

impl Default for CircuitRegister {
    fn default() -> Self {
        CircuitRegister::new("", "")
    }
}

/// Parse a bare JSON array of circuits.
pub fn parse_circuits_json(json: &str) -> CalcResult<Vec<Circuit>> {
    serde_json::from_str(json).map_err(|e| CalcError::serialization(format!("Invalid circuit list: {}", e)))
}

/// Register metadata stored in the file header.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterMetadata {
    /// Schema version (for migration compatibility)
    pub version: String,

    /// Designer responsible for the installation
    pub author: String,

    /// Installation name or address
    pub installation: String,

    pub created: DateTime<Utc>,
    pub modified: DateTime<Utc>,
}
