// gdpr-export - Personal data export tool
// Copyright (c) 2025 gdpr-export Contributors
// Licensed under the MIT License

//! # gdpr-export - Declarative personal data export
//!
//! gdpr-export produces a single data subject's personal data as one
//! sectioned document. Applications declare, per entity type, which fields
//! hold personal data, how the subject is identified, which relations to
//! traverse and how columns are labelled. One export call then collects
//! every declared entity for a subject.
//!
//! ## Architecture
//!
//! - [`domain`] - Error hierarchy, `SubjectId`, the `Row` access trait
//! - [`core`] - Registry, resolver, projector, section writer, coordinator
//! - [`adapters`] - Store and sink capabilities with JSON/CSV implementations
//! - [`config`] - TOML configuration including `[[entities]]` declarations
//! - [`logging`] - Structured logging
//! - [`cli`] - Command-line interface
//!
//! ## Quick Start
//!
//! ```rust
//! use gdpr_export::adapters::store::JsonDataset;
//! use gdpr_export::core::export::{ExportCoordinator, ExportOptions};
//! use gdpr_export::core::registry::Registry;
//! use gdpr_export::domain::SubjectId;
//! use serde_json::json;
//! use std::sync::Arc;
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let dataset = Arc::new(JsonDataset::from_value(json!({
//!     "Account": {"rows": [{"owner_id": 42, "email": "a@x.com", "subscription_plan": "pro"}]},
//!     "Session": {"relations": ["device"], "rows": []}
//! }))?);
//!
//! let mut registry = Registry::new();
//! registry.collect(
//!     dataset.store("Account"),
//!     &["email"],
//!     &json!({"user_id": "owner_id", "renamed_fields": {"subscription_plan": "Plan"}}),
//! )?;
//! registry.collect(
//!     dataset.store("Session"),
//!     &["started_at"],
//!     &json!({"user_id": "owner_id", "joins": ["device"]}),
//! )?;
//!
//! let coordinator = ExportCoordinator::new(Arc::new(registry), ExportOptions::default());
//! let artifact = coordinator.export_artifact(&SubjectId::from(42)).await?;
//!
//! assert_eq!(
//!     artifact.content,
//!     "\"Account\"\n\"email\",\"Plan\"\n\"a@x.com\",\"pro\"\n\n"
//! );
//! # Ok(())
//! # }
//! ```
//!
//! ## Error Handling
//!
//! Every fallible operation returns [`domain::GdprError`] or one of the
//! narrower errors it wraps. An export either produces the whole document
//! or fails; no partial output is written.

pub mod adapters;
pub mod cli;
pub mod config;
pub mod core;
pub mod domain;
pub mod logging;
