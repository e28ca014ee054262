//! Compiler error types.
#![allow(unused_assignments)]

use std::path::PathBuf;
use miette::Diagnostic;
use thiserror::Error;

/// Errors that can occur while declaring or compiling a mod.
#[allow(unused_assignments)]
#[derive(Error, Diagnostic, Debug)]
pub enum ModError {
    // =========================================================================
    // Validation Errors
    // =========================================================================
    #[error("{element} field '{field}': {message}")]
    #[diagnostic(code(modgen::validation::invalid_field))]
    InvalidField {
        element: String,
        field: String,
        message: String,
    },

    #[error("Invalid {element} declaration: {message}")]
    #[diagnostic(
        code(modgen::validation::invalid_fields),
        help("Check field names and value types against the element type's fields.")
    )]
    InvalidFields {
        element: String,
        message: String,
    },

    #[error("{kind} has no event '{event}' (allowed: {allowed})")]
    #[diagnostic(code(modgen::validation::unknown_event))]
    UnknownEvent {
        kind: String,
        event: String,
        allowed: String,
    },

    #[error("Generator '{generator}' does not offer element type '{element_type}'")]
    #[diagnostic(
        code(modgen::validation::unsupported_element_type),
        help("Element types are defined per generator. Run `modgen generators` to see what is installed.")
    )]
    UnsupportedElementType {
        generator: String,
        element_type: String,
    },

    // =========================================================================
    // Registry Errors
    // =========================================================================
    #[error("Generator not found: {key}")]
    #[diagnostic(code(modgen::registry::not_found))]
    GeneratorNotFound {
        key: String,
    },

    #[error("Generator '{key}' is already registered")]
    #[diagnostic(
        code(modgen::registry::duplicate_key),
        help("Register with `replace = true` to overwrite an existing generator.")
    )]
    DuplicateGenerator {
        key: String,
    },

    #[error("Generator key must be a non-empty string")]
    #[diagnostic(code(modgen::registry::empty_key))]
    EmptyGeneratorKey,

    // =========================================================================
    // Resource Errors
    // =========================================================================
    #[error("{label} file does not exist: {}", path.display())]
    #[diagnostic(code(modgen::resource::missing_file))]
    MissingInputFile {
        label: String,
        path: PathBuf,
    },

    #[error("{label} payload is invalid: {message}")]
    #[diagnostic(
        code(modgen::resource::invalid_payload),
        help("Payload files must contain a single JSON object.")
    )]
    InvalidPayload {
        label: String,
        message: String,
    },

    #[error("Invalid declaration '{}': {message}", path.display())]
    #[diagnostic(code(modgen::resource::invalid_declaration))]
    InvalidDeclaration {
        path: PathBuf,
        message: String,
    },

    // =========================================================================
    // IO Errors
    // =========================================================================
    #[error("Filesystem error at '{}': {message}", path.display())]
    #[diagnostic(code(modgen::io::error))]
    IoError {
        path: PathBuf,
        message: String,
    },

    #[error("Failed to serialize JSON: {0}")]
    #[diagnostic(code(modgen::io::serialize))]
    Serialization(#[from] serde_json::Error),
}

impl ModError {
    /// Creates an IO error.
    pub fn io(path: impl Into<PathBuf>, message: impl ToString) -> Self {
        Self::IoError {
            path: path.into(),
            message: message.to_string(),
        }
    }

    /// Creates a field validation error.
    pub fn invalid_field(
        element: impl Into<String>,
        field: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::InvalidField {
            element: element.into(),
            field: field.into(),
            message: message.into(),
        }
    }

    /// Returns true for errors raised while declaring elements (never at compile time).
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::InvalidField { .. }
                | Self::InvalidFields { .. }
                | Self::UnknownEvent { .. }
                | Self::UnsupportedElementType { .. }
        )
    }
}
