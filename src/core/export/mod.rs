//! Export pipeline
//!
//! - [`resolver`] - Builds and runs the subject query of one entity
//! - [`projector`] - Field paths and row projection
//! - [`section`] - Sections, documents and the section grammar
//! - [`coordinator`] - Drives the pipeline over a registry
//! - [`summary`] - Export summary and reporting
//! - [`checksum`] - Digest of rendered documents

pub mod checksum;
pub mod coordinator;
pub mod projector;
pub mod resolver;
pub mod section;
pub mod summary;

pub use coordinator::{ExportArtifact, ExportCoordinator, ExportOptions, OutputFormat};
pub use projector::{project, FieldPath};
pub use resolver::resolve;
pub use section::{write_section, ExportDocument, Section, DESCRIPTION_LABEL};
pub use summary::ExportSummary;
