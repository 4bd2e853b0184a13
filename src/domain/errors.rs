//! Domain error types
//!
//! This module defines the error hierarchy for gdpr-export.
//! Store and sink implementations map their own failures into these types so
//! that callers of the export never see third-party error types.

use thiserror::Error;

/// Main error type
///
/// This is the primary error type used throughout the crate. Every variant
/// aborts the export in progress: there is no partial-document recovery.
#[derive(Debug, Error)]
pub enum GdprError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Malformed entity registration
    #[error("Registration error: {0}")]
    Registration(#[from] RegistrationError),

    /// Field path or row shape errors found while projecting rows
    #[error("Projection error: {0}")]
    Projection(#[from] ProjectionError),

    /// Store capability failures
    #[error("Resolution error: {0}")]
    Resolution(#[from] ResolutionError),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Generic errors with context
    #[error("{0}")]
    Other(String),
}

/// Registration errors
///
/// Raised synchronously by [`crate::core::registry::Registry`] so that a
/// misconfigured entity is caught at setup time rather than at export time.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistrationError {
    /// The field aliasing the subject id was not declared
    #[error("the field aliasing user_id is not declared for '{entity}'")]
    MissingSubjectId { entity: String },

    /// A mapping was expected but something else was supplied
    #[error("'{option}' for '{entity}' must be a mapping")]
    NotAMapping { entity: String, option: String },

    /// An option is present but has the wrong shape or is not recognized
    #[error("invalid option '{option}' for '{entity}': {reason}")]
    InvalidOption {
        entity: String,
        option: String,
        reason: String,
    },

    /// The entity type name is blank
    #[error("entity type name cannot be empty")]
    EmptyEntityType,
}

/// Projection errors
///
/// Field paths are only checked against row shapes when rows exist, so these
/// surface at export time.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProjectionError {
    /// A field path has more than two segments (or none)
    #[error("field path '{path}' is made of {segments} words, expected 1 or 2")]
    InvalidFieldPath { path: String, segments: usize },

    /// The row has no field with this name
    #[error("entity '{entity}' has no field '{field}'")]
    UnknownField { entity: String, field: String },

    /// The row has no related row under this relation name
    #[error("entity '{entity}' has no related row '{relation}'")]
    UnknownRelation { entity: String, relation: String },
}

/// Failure reported by a store capability
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// The store holds no data for this entity type
    #[error("unknown entity '{0}'")]
    UnknownEntity(String),

    /// The relation name is not defined for the entity
    #[error("unknown relation '{0}'")]
    UnknownRelation(String),

    /// The store could not be reached
    #[error("connection failed: {0}")]
    Connection(String),

    /// The query could not be executed
    #[error("query failed: {0}")]
    QueryFailed(String),
}

/// A store failure while resolving one entity's rows
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("failed to resolve rows for '{entity}': {source}")]
pub struct ResolutionError {
    /// Display label of the entity being resolved
    pub entity: String,

    /// Underlying store failure
    #[source]
    pub source: StoreError,
}

impl ResolutionError {
    /// Creates a new resolution error
    pub fn new(entity: impl Into<String>, source: StoreError) -> Self {
        Self {
            entity: entity.into(),
            source,
        }
    }
}

// Conversion from std::io::Error
impl From<std::io::Error> for GdprError {
    fn from(err: std::io::Error) -> Self {
        GdprError::Io(err.to_string())
    }
}

// Conversion from serde_json::Error
impl From<serde_json::Error> for GdprError {
    fn from(err: serde_json::Error) -> Self {
        GdprError::Serialization(err.to_string())
    }
}

// Conversion from toml parse errors
impl From<toml::de::Error> for GdprError {
    fn from(err: toml::de::Error) -> Self {
        GdprError::Configuration(format!("TOML parse error: {err}"))
    }
}
