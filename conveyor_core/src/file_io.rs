//! # File I/O
//!
//! Job file operations:
//! - **Atomic saves**: write to `.tmp`, fsync, rename over the target
//! - **Version validation**: refuse files written by an incompatible schema
//!
//! ## Example
//!
//! ```rust,no_run
//! use conveyor_core::file_io::{load_job, save_job};
//! use conveyor_core::job::Job;
//! use std::path::Path;
//!
//! let job = Job::new("Q-2291", "Midwest Machining");
//! save_job(&job, Path::new("q-2291.json"))?;
//! let loaded = load_job(Path::new("q-2291.json"))?;
//! # Ok::<(), conveyor_core::errors::CalcError>(())
//! ```

use std::fs::{self, File};
use std::io::Write;
use std::path::Path;

use semver::Version;

use crate::errors::{CalcError, CalcResult};
use crate::job::{Job, SCHEMA_VERSION};

/// Save a job with atomic write semantics.
///
/// 1. Serialize to JSON
/// 2. Write to a sibling `.tmp` file and fsync
/// 3. Rename over `path`
pub fn save_job(job: &Job, path: &Path) -> CalcResult<()> {
    let json = serde_json::to_string_pretty(job).map_err(|e| CalcError::SerializationError {
        reason: e.to_string(),
    })?;

    let mut tmp_name = path.as_os_str().to_owned();
    tmp_name.push(".tmp");
    let tmp_path = Path::new(&tmp_name);

    let tmp_display = tmp_path.display().to_string();
    let mut tmp_file = File::create(tmp_path).map_err(|e| {
        CalcError::file_error("create temp file", tmp_display.clone(), e.to_string())
    })?;

    tmp_file.write_all(json.as_bytes()).map_err(|e| {
        CalcError::file_error("write temp file", tmp_display.clone(), e.to_string())
    })?;

    tmp_file
        .sync_all()
        .map_err(|e| CalcError::file_error("sync temp file", tmp_display, e.to_string()))?;

    fs::rename(tmp_path, path).map_err(|e| {
        let _ = fs::remove_file(tmp_path);
        CalcError::file_error("rename to final", path.display().to_string(), e.to_string())
    })?;

    Ok(())
}

/// Load a job and check its schema version.
///
/// # Errors
///
/// * `CalcError::FileError` - I/O failure
/// * `CalcError::SerializationError` - invalid JSON
/// * `CalcError::VersionMismatch` - written by an incompatible schema
pub fn load_job(path: &Path) -> CalcResult<Job> {
    let contents = fs::read_to_string(path)
        .map_err(|e| CalcError::file_error("read", path.display().to_string(), e.to_string()))?;

    let job: Job = serde_json::from_str(&contents).map_err(|e| CalcError::SerializationError {
        reason: format!("Invalid JSON in {}: {}", path.display(), e),
    })?;

    validate_version(&job.meta.version)?;

    Ok(job)
}

/// Check a file version against [`SCHEMA_VERSION`].
///
/// Major versions must match. While the schema is 0.x, a newer minor is
/// also rejected.
pub fn validate_version(file_version: &str) -> CalcResult<()> {
    let mismatch = || CalcError::VersionMismatch {
        file_version: file_version.to_string(),
        expected_version: SCHEMA_VERSION.to_string(),
    };

    let file = Version::parse(file_version).map_err(|_| mismatch())?;
    let current = Version::parse(SCHEMA_VERSION).map_err(|_| mismatch())?;

    if file.major != current.major {
        return Err(mismatch());
    }
    if current.major == 0 && file.minor > current.minor {
        return Err(mismatch());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::style_b_input;

    #[test]
    fn test_save_and_load_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("job.json");

        let mut job = Job::new("Q-001", "Test Customer");
        let id = job.add_conveyor(style_b_input());
        save_job(&job, &path).unwrap();

        let loaded = load_job(&path).unwrap();
        assert_eq!(loaded.meta.job_id, "Q-001");
        assert_eq!(loaded.meta.customer, "Test Customer");
        assert_eq!(loaded.get_conveyor(&id), job.get_conveyor(&id));
    }

    #[test]
    fn test_save_leaves_no_temp_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("job.json");
        save_job(&Job::new("Q-002", "C"), &path).unwrap();

        assert!(path.exists());
        assert!(!dir.path().join("job.json.tmp").exists());
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_job(&dir.path().join("missing.json")).unwrap_err();
        assert_eq!(err.error_code(), "FILE_ERROR");
    }

    #[test]
    fn test_load_invalid_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.json");
        fs::write(&path, "{ not json").unwrap();
        let err = load_job(&path).unwrap_err();
        assert_eq!(err.error_code(), "SERIALIZATION_ERROR");
    }

    #[test]
    fn test_load_rejects_newer_schema() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("future.json");
        let mut job = Job::new("Q-003", "C");
        job.meta.version = "0.9.0".to_string();
        save_job(&job, &path).unwrap();

        let err = load_job(&path).unwrap_err();
        assert!(matches!(err, CalcError::VersionMismatch { .. }));
    }

    #[test]
    fn test_version_validation() {
        assert!(validate_version("0.1.0").is_ok());
        assert!(validate_version("0.1.7").is_ok());
        assert!(validate_version("0.0.3").is_ok());
        assert!(validate_version("0.2.0").is_err());
        assert!(validate_version("1.0.0").is_err());
        assert!(validate_version("garbage").is_err());
    }
}
