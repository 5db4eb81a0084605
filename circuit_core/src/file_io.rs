//! # File I/O Module
//!
//! Register and settings files:
//! - **Atomic saves**: write to .tmp, sync, rename, so an interrupted save
//!   never leaves a truncated register behind
//! - **Version validation**: refuse files written by a newer schema
//!
//! ## Example
//!
//! ```rust,no_run
//! use circuit_core::file_io::{load_register, save_register};
//! use circuit_core::register::CircuitRegister;
//! use std::path::Path;
//!
//! let register = CircuitRegister::new("Designer", "House");
//! let path = Path::new("house.json");
//! save_register(&register, path)?;
//! let loaded = load_register(path)?;
//! # Ok::<(), circuit_core::errors::CalcError>(())
//! ```

use std::fs::{self, File};
use std::io::Write;
use std::path::Path;

use crate::errors::{CalcError, CalcResult};
use crate::register::{CircuitRegister, SCHEMA_VERSION};
use crate::settings::DesignSettings;

/// Save a register with atomic write semantics.
///
/// 1. Serialize to JSON
/// 2. Write to `<path>.tmp`
/// 3. fsync
/// 4. Rename over the target
pub fn save_register(register: &CircuitRegister, path: &Path) -> CalcResult<()> {
    let json = serde_json::to_string_pretty(register)?;
    write_atomic(path, json.as_bytes())?;
    tracing::debug!(path = %path.display(), circuits = register.len(), "register saved");
    Ok(())
}

/// Load a register file.
///
/// # Returns
///
/// * `Err(CalcError::FileError)` - I/O error
/// * `Err(CalcError::SerializationError)` - invalid JSON
/// * `Err(CalcError::VersionMismatch)` - incompatible schema version
pub fn load_register(path: &Path) -> CalcResult<CircuitRegister> {
    let contents = read_to_string(path)?;
    let register: CircuitRegister = serde_json::from_str(&contents)
        .map_err(|e| CalcError::serialization(format!("Invalid JSON in {}: {}", path.display(), e)))?;
    validate_version(&register.meta.version)?;
    Ok(register)
}

/// Load a register, or start an empty one if the file does not exist yet.
pub fn load_or_create_register(path: &Path) -> CalcResult<CircuitRegister> {
    if path.exists() {
        load_register(path)
    } else {
        tracing::info!(path = %path.display(), "register file not found, starting a new one");
        Ok(CircuitRegister::default())
    }
}

/// Load design settings from a JSON file and validate them.
///
/// Missing keys take their default values.
pub fn load_settings(path: &Path) -> CalcResult<DesignSettings> {
    let contents = read_to_string(path)?;
    let settings: DesignSettings = serde_json::from_str(&contents)
        .map_err(|e| CalcError::serialization(format!("Invalid JSON in {}: {}", path.display(), e)))?;
    settings.validate()?;
    Ok(settings)
}

/// Write raw bytes atomically (temp file, sync, rename).
pub fn write_atomic(path: &Path, bytes: &[u8]) -> CalcResult<()> {
    let tmp_path = tmp_path_for(path);

    let mut tmp_file = File::create(&tmp_path)
        .map_err(|e| CalcError::file_error("create temp file", tmp_path.display().to_string(), e.to_string()))?;
    tmp_file
        .write_all(bytes)
        .map_err(|e| CalcError::file_error("write temp file", tmp_path.display().to_string(), e.to_string()))?;
    tmp_file
        .sync_all()
        .map_err(|e| CalcError::file_error("sync temp file", tmp_path.display().to_string(), e.to_string()))?;

    fs::rename(&tmp_path, path).map_err(|e| {
        let _ = fs::remove_file(&tmp_path);
        CalcError::file_error("rename to final", path.display().to_string(), e.to_string())
    })
}

fn read_to_string(path: &Path) -> CalcResult<String> {
    fs::read_to_string(path).map_err(|e| CalcError::file_error("read", path.display().to_string(), e.to_string()))
}

fn tmp_path_for(path: &Path) -> std::path::PathBuf {
    let extension = path
        .extension()
        .map(|e| format!("{}.tmp", e.to_string_lossy()))
        .unwrap_or_else(|| "tmp".to_string());
    path.with_extension(extension)
}

/// Validate that a file version is compatible with the current schema.
///
/// The major version must match; while on 0.x, a newer minor version is
/// refused as well.
fn validate_version(file_version: &str) -> CalcResult<()> {
    let mismatch = || CalcError::VersionMismatch {
        file_version: file_version.to_string(),
        expected_version: SCHEMA_VERSION.to_string(),
    };

    let parse = |v: &str| -> Vec<u32> { v.split('.').filter_map(|p| p.parse().ok()).collect() };
    let file_parts = parse(file_version);
    let current_parts = parse(SCHEMA_VERSION);

    let (file_major, current_major) = match (file_parts.first(), current_parts.first()) {
        (Some(f), Some(c)) => (*f, *c),
        _ => return Err(mismatch()),
    };
    if file_major != current_major {
        return Err(mismatch());
    }
    if current_major == 0 {
        if let (Some(file_minor), Some(current_minor)) = (file_parts.get(1), current_parts.get(1)) {
            if file_minor > current_minor {
                return Err(mismatch());
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculations::design::{evaluate, CircuitInput, LoadSpec};
    use crate::circuit::Circuit;
    use tempfile::tempdir;

    fn sample_register() -> CircuitRegister {
        let mut register = CircuitRegister::new("Designer", "House");
        let input = CircuitInput::new("Sockets", LoadSpec::Power(2.3)).with_length(12.0);
        let evaluation = evaluate(&input, &register.settings);
        register.add(Circuit::from_evaluation(&input, &evaluation).unwrap());
        register
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("house.json");

        let register = sample_register();
        save_register(&register, &path).unwrap();

        let loaded = load_register(&path).unwrap();
        assert_eq!(loaded.meta.author, "Designer");
        assert_eq!(loaded.circuits, register.circuits);
    }

    #[test]
    fn test_atomic_save_creates_no_tmp_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("house.json");
        save_register(&sample_register(), &path).unwrap();

        assert!(path.exists());
        assert!(!dir.path().join("house.json.tmp").exists());
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempdir().unwrap();
        let err = load_register(&dir.path().join("nope.json")).unwrap_err();
        assert_eq!(err.error_code(), "FILE_ERROR");

        let register = load_or_create_register(&dir.path().join("nope.json")).unwrap();
        assert!(register.is_empty());
    }

    #[test]
    fn test_load_invalid_json() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("broken.json");
        fs::write(&path, "{ not json").unwrap();
        assert_eq!(load_register(&path).unwrap_err().error_code(), "SERIALIZATION_ERROR");
    }

    #[test]
    fn test_newer_file_refused() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("future.json");
        let mut register = sample_register();
        register.meta.version = "0.9.0".to_string();
        save_register(&register, &path).unwrap();
        assert_eq!(load_register(&path).unwrap_err().error_code(), "VERSION_MISMATCH");
    }

    #[test]
    fn test_version_validation() {
        assert!(validate_version(SCHEMA_VERSION).is_ok());
        assert!(validate_version("0.1.7").is_ok());
        assert!(validate_version("0.0.3").is_ok());
        assert!(validate_version("1.0.0").is_err());
        assert!(validate_version("0.2.0").is_err());
        assert!(validate_version("garbage").is_err());
    }

    #[test]
    fn test_load_settings() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("settings.json");
        fs::write(&path, r#"{"power_factor_three": 0.85}"#).unwrap();
        let settings = load_settings(&path).unwrap();
        assert_eq!(settings.power_factor_three, 0.85);
        assert_eq!(settings.phase_voltage_v, 230.0);

        fs::write(&path, r#"{"power_factor_three": 1.4}"#).unwrap();
        assert_eq!(load_settings(&path).unwrap_err().error_code(), "INVALID_INPUT");
    }
}
