//! Core business logic for gdpr-export.
//!
//! # Modules
//!
//! - [`registry`] - Entity descriptors and the registry that orders them
//! - [`export`] - Query resolution, row projection, sections and the coordinator
//!
//! # Export Workflow
//!
//! 1. **Register**: each entity declares its fields, renames, relations and
//!    subject-id field, once, at setup time
//! 2. **Resolve**: for every registered entity, fetch the subject's rows
//! 3. **Project**: read the declared field paths of every row
//! 4. **Assemble**: one section per entity with rows, in registration order
//! 5. **Render**: CSV or JSON, optionally with a checksum
//!
//! # Example
//!
//! ```rust,no_run
//! use gdpr_export::adapters::store::JsonDataset;
//! use gdpr_export::core::export::{ExportCoordinator, ExportOptions};
//! use gdpr_export::core::registry::Registry;
//! use gdpr_export::domain::SubjectId;
//! use serde_json::json;
//! use std::sync::Arc;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let dataset = Arc::new(JsonDataset::from_file("data.json")?);
//!
//! let mut registry = Registry::new();
//! registry.collect(
//!     dataset.store("Account"),
//!     &["email"],
//!     &json!({"user_id": "owner_id"}),
//! )?;
//!
//! let coordinator = ExportCoordinator::new(Arc::new(registry), ExportOptions::default());
//! let artifact = coordinator.export_artifact(&SubjectId::from(42)).await?;
//!
//! println!("{}", artifact.content);
//! # Ok(())
//! # }
//! ```

pub mod export;
pub mod registry;
