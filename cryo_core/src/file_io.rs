//! # File I/O Module
//!
//! Reading system description files and writing generated reports:
//! - **Version validation**: The schema version in `meta.version` must be
//!   compatible with [`SCHEMA_VERSION`]
//! - **Atomic writes**: Write to `.tmp`, sync, rename, so an interrupted run
//!   never leaves a half-written report
//!
//! ## Example
//!
//! ```rust,no_run
//! use cryo_core::file_io::{load_system, write_atomic};
//! use std::path::Path;
//!
//! let system = load_system(Path::new("fill_line.json"))?;
//! let summary = system.material_summary()?;
//! write_atomic(Path::new("summary.txt"), &summary)?;
//! # Ok::<(), cryo_core::errors::CalcError>(())
//! ```

use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use semver::Version;
use tracing::{debug, info};

use crate::errors::{CalcError, CalcResult};
use crate::system::{PipingSystem, SCHEMA_VERSION};

/// Load a system description from a JSON file.
///
/// # Returns
///
/// * `Ok(PipingSystem)` - Successfully loaded
/// * `Err(CalcError::VersionMismatch)` - File version is incompatible
/// * `Err(CalcError::SerializationError)` - Invalid JSON
/// * `Err(CalcError::FileError)` - I/O error
pub fn load_system(path: &Path) -> CalcResult<PipingSystem> {
    let contents = fs::read_to_string(path)
        .map_err(|e| CalcError::file_error("read", path.display().to_string(), e.to_string()))?;

    let system = parse_system(&contents).map_err(|e| match e {
        CalcError::SerializationError { reason } => CalcError::SerializationError {
            reason: format!("Invalid JSON in {}: {}", path.display(), reason),
        },
        other => other,
    })?;

    info!(path = %path.display(), components = system.components.len(), "Loaded piping system");
    Ok(system)
}

/// Parse and version-check a system description.
pub fn parse_system(json: &str) -> CalcResult<PipingSystem> {
    let system: PipingSystem = serde_json::from_str(json).map_err(|e| CalcError::SerializationError {
        reason: e.to_string(),
    })?;
    validate_version(&system.meta.version)?;
    Ok(system)
}

/// Save a system description with atomic write semantics.
pub fn save_system(system: &PipingSystem, path: &Path) -> CalcResult<()> {
    let json = serde_json::to_string_pretty(system).map_err(|e| CalcError::SerializationError {
        reason: e.to_string(),
    })?;
    write_atomic(path, &json)
}

/// Write text to `path` atomically.
///
/// 1. Write to `<path>.tmp`
/// 2. Sync to disk (fsync)
/// 3. Rename over `path`
pub fn write_atomic(path: &Path, contents: &str) -> CalcResult<()> {
    let tmp_path = tmp_path_for(path);
    debug!(path = %tmp_path.display(), bytes = contents.len(), "Writing temp file");

    let mut tmp_file = File::create(&tmp_path).map_err(|e| {
        CalcError::file_error("create temp file", tmp_path.display().to_string(), e.to_string())
    })?;

    tmp_file.write_all(contents.as_bytes()).map_err(|e| {
        CalcError::file_error("write temp file", tmp_path.display().to_string(), e.to_string())
    })?;

    tmp_file.sync_all().map_err(|e| {
        CalcError::file_error("sync temp file", tmp_path.display().to_string(), e.to_string())
    })?;

    fs::rename(&tmp_path, path).map_err(|e| {
        let _ = fs::remove_file(&tmp_path);
        CalcError::file_error("rename to final", path.display().to_string(), e.to_string())
    })?;

    info!(path = %path.display(), "Wrote file");
    Ok(())
}

/// `report.tex` -> `report.tex.tmp`
fn tmp_path_for(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_owned();
    name.push(".tmp");
    PathBuf::from(name)
}

/// Validate that a file version is compatible with the current schema.
///
/// Major versions must match. While the schema is 0.x, a file with a newer
/// minor version is rejected as well.
fn validate_version(file_version: &str) -> CalcResult<()> {
    let mismatch = || CalcError::VersionMismatch {
        file_version: file_version.to_string(),
        expected_version: SCHEMA_VERSION.to_string(),
    };

    let file = Version::parse(file_version).map_err(|_| mismatch())?;
    let current = Version::parse(SCHEMA_VERSION).map_err(|e| CalcError::Internal {
        message: format!("Bad schema version {}: {}", SCHEMA_VERSION, e),
    })?;

    if file.major != current.major {
        return Err(mismatch());
    }
    if current.major == 0 && file.minor > current.minor {
        return Err(mismatch());
    }
    Ok(())
}
