//! # Error Types
//!
//! Structured error types for conveyor_core.
//!
//! The calculation pipeline itself never fails: domain findings are reported
//! as [`crate::validation::ValidationMessage`] entries. `CalcError` covers the
//! two places where something can genuinely go wrong:
//!
//! - **Bar layout**: unknown catalog ids, family mismatches, over/underfill.
//!   These are collected into [`crate::bars::BarTemplate::errors`] rather than
//!   returned, so a partially laid-out bar can still be shown.
//! - **File I/O**: job and settings files read by the CLI.
//!
//! ## Example
//!
//! ```rust
//! use conveyor_core::errors::{CalcError, CalcResult};
//!
//! fn check_pitch(pitch_in: f64) -> CalcResult<()> {
//!     if pitch_in <= 0.0 {
//!         return Err(CalcError::invalid_input(
//!             "magnet_pitch_in",
//!             pitch_in.to_string(),
//!             "Pitch must be positive",
//!         ));
//!     }
//!     Ok(())
//! }
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for conveyor_core operations
pub type CalcResult<T> = Result<T, CalcError>;

/// Structured error type.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "details")]
pub enum CalcError {
    /// An input value is invalid (out of range, wrong type, etc.)
    #[error("Invalid input for '{field}': {value} - {reason}")]
    InvalidInput {
        field: String,
        value: String,
        reason: String,
    },

    /// A required field is missing
    #[error("Missing required field: {field}")]
    MissingField { field: String },

    /// Magnet id not present in the catalog
    #[error("Magnet not found in catalog: {magnet_id}")]
    MagnetNotFound { magnet_id: String },

    /// Magnet exists but is not usable on this bar family
    #[error("Magnet '{magnet_id}' not allowed in family '{family}': {reason}")]
    FamilyMismatch {
        magnet_id: String,
        family: String,
        reason: String,
    },

    /// Laid-out magnets run past the target length
    #[error("Bar overfilled: achieved {achieved_in:.3} in exceeds target {target_in:.3} in")]
    BarOverfilled { achieved_in: f64, target_in: f64 },

    /// Leftover space exceeds the fit tolerance
    #[error("Bar underfilled: {leftover_in:.3} in left over, tolerance {tolerance_in:.3} in")]
    BarUnderfilled { leftover_in: f64, tolerance_in: f64 },

    /// File I/O error
    #[error("File error: {operation} on '{path}' - {reason}")]
    FileError {
        operation: String,
        path: String,
        reason: String,
    },

    /// JSON serialization/deserialization error
    #[error("Serialization error: {reason}")]
    SerializationError { reason: String },

    /// Schema version mismatch
    #[error("Version mismatch: file version {file_version}, expected {expected_version}")]
    VersionMismatch {
        file_version: String,
        expected_version: String,
    },
}

impl CalcError {
    /// Create an InvalidInput error
    pub fn invalid_input(
        field: impl Into<String>,
        value: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        CalcError::InvalidInput {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create a MissingField error
    pub fn missing_field(field: impl Into<String>) -> Self {
        CalcError::MissingField {
            field: field.into(),
        }
    }

    /// Create a MagnetNotFound error
    pub fn magnet_not_found(magnet_id: impl Into<String>) -> Self {
        CalcError::MagnetNotFound {
            magnet_id: magnet_id.into(),
        }
    }

    /// Create a FamilyMismatch error
    pub fn family_mismatch(
        magnet_id: impl Into<String>,
        family: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        CalcError::FamilyMismatch {
            magnet_id: magnet_id.into(),
            family: family.into(),
            reason: reason.into(),
        }
    }

    /// Create a FileError
    pub fn file_error(
        operation: impl Into<String>,
        path: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        CalcError::FileError {
            operation: operation.into(),
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Get a short error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            CalcError::InvalidInput { .. } => "INVALID_INPUT",
            CalcError::MissingField { .. } => "MISSING_FIELD",
            CalcError::MagnetNotFound { .. } => "MAGNET_NOT_FOUND",
            CalcError::FamilyMismatch { .. } => "FAMILY_MISMATCH",
            CalcError::BarOverfilled { .. } => "BAR_OVERFILLED",
            CalcError::BarUnderfilled { .. } => "BAR_UNDERFILLED",
            CalcError::FileError { .. } => "FILE_ERROR",
            CalcError::SerializationError { .. } => "SERIALIZATION_ERROR",
            CalcError::VersionMismatch { .. } => "VERSION_MISMATCH",
        }
    }
}
