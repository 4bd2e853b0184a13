//! CLI command implementations
//!
//! This module contains all CLI command implementations.

pub mod export;
pub mod init;
pub mod list;
pub mod validate;

use crate::adapters::store::JsonDataset;
use crate::config::GdprConfig;
use crate::core::registry::Registry;
use crate::domain::errors::RegistrationError;
use std::sync::Arc;

/// Builds the registry described by the `[[entities]]` tables
///
/// Every entity is bound to its table in `dataset`. Tables missing from the
/// dataset only fail when an export queries them.
pub fn build_registry(
    config: &GdprConfig,
    dataset: &Arc<JsonDataset>,
) -> Result<Registry, RegistrationError> {
    Registry::from_entity_configs(&config.entities, |entity| dataset.store(entity))
}
