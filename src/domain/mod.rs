//! Domain models and types for gdpr-export.
//!
//! # Overview
//!
//! The domain layer provides:
//! - **Subject identifiers** ([`SubjectId`])
//! - **The row capability** ([`Row`]) every store result implements
//! - **Error types** ([`GdprError`], [`RegistrationError`], [`ProjectionError`], [`ResolutionError`])
//! - **Result type alias** ([`Result`])

pub mod errors;
pub mod ids;
pub mod result;
pub mod row;

// Re-export commonly used types for convenience
pub use errors::{GdprError, ProjectionError, RegistrationError, ResolutionError, StoreError};
pub use ids::SubjectId;
pub use result::Result;
pub use row::{cell_text, Row};
