//! # Error Types
//!
//! Structured error types for cryo_core. Rule violations in the low stress
//! check are *not* errors (see [`crate::calculations::low_stress`]); the
//! variants here cover bad data, unknown component types and I/O.
//!
//! ## Example
//!
//! ```rust
//! use cryo_core::errors::{CalcError, CalcResult};
//!
//! fn validate_pressure(pressure_psi: f64) -> CalcResult<()> {
//!     if pressure_psi < 0.0 {
//!         return Err(CalcError::invalid_input(
//!             "pressure_psi",
//!             pressure_psi.to_string(),
//!             "Design pressure cannot be negative",
//!         ));
//!     }
//!     Ok(())
//! }
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for cryo_core operations
pub type CalcResult<T> = Result<T, CalcError>;

/// Structured error type for cryo_core operations.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "details")]
pub enum CalcError {
    /// An input value is invalid (out of range, unknown size, etc.)
    #[error("Invalid input for '{field}': {value} - {reason}")]
    InvalidInput {
        field: String,
        value: String,
        reason: String,
    },

    /// A required field is missing
    #[error("Missing required field: {field}")]
    MissingField { field: String },

    /// A material was asked for a property it does not define
    #[error("Material '{material}' has no {property} defined")]
    MissingProperty { material: String, property: String },

    /// Material not found in the catalog
    #[error("Material not found: {material_name}")]
    MaterialNotFound { material_name: String },

    /// Component type tag outside the supported set
    #[error("Unknown component type: {type_name}")]
    UnknownComponentType { type_name: String },

    /// Summarization was asked to describe an empty material set
    #[error("No materials to summarize")]
    NoMaterials,

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

    /// External program (PDF rasterizer) failed or could not be started
    #[error("External tool '{program}' failed: {reason}")]
    ExternalTool { program: String, reason: String },

    /// Generic internal error (should be rare)
    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl CalcError {
    /// Create an InvalidInput error
    pub fn invalid_input(field: impl Into<String>, value: impl Into<String>, reason: impl Into<String>) -> Self {
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

    /// Create a MissingProperty error
    pub fn missing_property(material: impl Into<String>, property: impl Into<String>) -> Self {
        CalcError::MissingProperty {
            material: material.into(),
            property: property.into(),
        }
    }

    /// Create a MaterialNotFound error
    pub fn material_not_found(material_name: impl Into<String>) -> Self {
        CalcError::MaterialNotFound {
            material_name: material_name.into(),
        }
    }

    /// Create an UnknownComponentType error
    pub fn unknown_component_type(type_name: impl Into<String>) -> Self {
        CalcError::UnknownComponentType {
            type_name: type_name.into(),
        }
    }

    /// Create a FileError
    pub fn file_error(operation: impl Into<String>, path: impl Into<String>, reason: impl Into<String>) -> Self {
        CalcError::FileError {
            operation: operation.into(),
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Create an ExternalTool error
    pub fn external_tool(program: impl Into<String>, reason: impl Into<String>) -> Self {
        CalcError::ExternalTool {
            program: program.into(),
            reason: reason.into(),
        }
    }

    /// Get a short error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            CalcError::InvalidInput { .. } => "INVALID_INPUT",
            CalcError::MissingField { .. } => "MISSING_FIELD",
            CalcError::MissingProperty { .. } => "MISSING_PROPERTY",
            CalcError::MaterialNotFound { .. } => "MATERIAL_NOT_FOUND",
            CalcError::UnknownComponentType { .. } => "UNKNOWN_COMPONENT_TYPE",
            CalcError::NoMaterials => "NO_MATERIALS",
            CalcError::FileError { .. } => "FILE_ERROR",
            CalcError::SerializationError { .. } => "SERIALIZATION_ERROR",
            CalcError::VersionMismatch { .. } => "VERSION_MISMATCH",
            CalcError::ExternalTool { .. } => "EXTERNAL_TOOL",
            CalcError::Internal { .. } => "INTERNAL_ERROR",
        }
    }
}
