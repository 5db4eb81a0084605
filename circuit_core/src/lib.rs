//! # circuit_core - Low-Voltage Circuit Validation Engine
//!
//! `circuit_core` sizes and validates final circuits of a 230/400 V
//! installation: design current, corrected cable ampacity, protective
//! device coordination, fault-loop disconnection, short-circuit thermal
//! withstand, and voltage drop. All inputs and outputs are
//! JSON-serializable.
//!
//! ## Design Philosophy
//!
//! - **Stateless**: pure functions over explicit inputs, no shared caches
//! - **Failure as data**: invalid numbers give sentinels (0.0, `None`,
//!   `is_valid == false`), never panics; `CalcError` only at the edges
//! - **Traceable**: verdicts carry their numeric trace and norm references
//!
//! ## Quick Start
//!
//! ```rust
//! use circuit_core::calculations::design::{evaluate, CircuitInput, LoadSpec};
//! use circuit_core::settings::DesignSettings;
//!
//! let input = CircuitInput::new("Living room", LoadSpec::Power(2.3));
//! let evaluation = evaluate(&input, &DesignSettings::default());
//! assert_eq!(evaluation.design_current_a, 10.0);
//! assert!(evaluation.passes());
//! ```
//!
//! ## Modules
//!
//! - [`reference`] - ampacity tables, materials, devices, circuit types
//! - [`correction_factors`] - temperature and grouping correction
//! - [`calculations`] - the validation chain
//! - [`circuit`] - the persisted circuit record
//! - [`register`] - ordered circuit register with metadata and settings
//! - [`settings`] - design settings
//! - [`file_io`] - atomic register saves and version-checked loads
//! - [`errors`] - structured error types

pub mod calculations;
pub mod circuit;
pub mod correction_factors;
pub mod errors;
pub mod file_io;
pub mod reference;
pub mod register;
pub mod settings;

pub use circuit::Circuit;
pub use errors::{CalcError, CalcResult};
pub use file_io::{load_register, save_register};
pub use register::{CircuitRegister, RegisterMetadata};
pub use settings::DesignSettings;
