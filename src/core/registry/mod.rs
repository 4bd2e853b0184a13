//! Entity registry
//!
//! The registry is the ordered list of entity descriptors an export walks.
//! It is populated during setup and then shared read-only, typically as an
//! `Arc<Registry>`, by every export. Registration order is section order.
//!
//! # Example
//!
//! ```rust
//! use gdpr_export::adapters::store::JsonDataset;
//! use gdpr_export::core::registry::Registry;
//! use serde_json::json;
//! use std::sync::Arc;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let dataset = Arc::new(JsonDataset::default());
//! let mut registry = Registry::new();
//!
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
//! assert_eq!(registry.len(), 2);
//! # Ok(())
//! # }
//! ```

pub mod descriptor;

pub use descriptor::{EntityDescriptor, EntityDescriptorBuilder, SUBJECT_ID_COLUMN};

use crate::adapters::store::EntityStore;
use crate::config::schema::EntityConfig;
use crate::domain::errors::RegistrationError;
use serde_json::Value;
use std::sync::Arc;

/// Append-only ordered list of entity descriptors
#[derive(Debug, Default, Clone)]
pub struct Registry {
    descriptors: Vec<EntityDescriptor>,
}

impl Registry {
    /// Creates an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a descriptor
    ///
    /// Registering the same entity type twice is allowed and produces two
    /// sections in every export.
    ///
    /// # Errors
    ///
    /// Returns [`RegistrationError::MissingSubjectId`] if the descriptor has
    /// no subject-id binding.
    pub fn register(&mut self, descriptor: EntityDescriptor) -> Result<(), RegistrationError> {
        descriptor.validate()?;

        tracing::debug!(
            entity = %descriptor.entity_type(),
            name = %descriptor.name(),
            columns = descriptor.output_columns().len(),
            relations = descriptor.relations().len(),
            position = self.descriptors.len(),
            "Registered entity for collection"
        );

        self.descriptors.push(descriptor);
        Ok(())
    }

    /// Builds a descriptor from a declarative field list and option record
    /// and registers it
    ///
    /// See [`EntityDescriptor::collect`] for the recognized options.
    pub fn collect<S: AsRef<str>>(
        &mut self,
        store: Arc<dyn EntityStore>,
        simple_fields: &[S],
        params: &Value,
    ) -> Result<(), RegistrationError> {
        let descriptor = EntityDescriptor::collect(store, simple_fields, params)?;
        self.register(descriptor)
    }

    /// Builds a registry from `[[entities]]` configuration tables
    ///
    /// `store_for` maps each configured entity type to its store capability.
    /// Entities are registered in configuration order; the first malformed
    /// entry aborts the whole registration.
    pub fn from_entity_configs<F>(
        entities: &[EntityConfig],
        mut store_for: F,
    ) -> Result<Self, RegistrationError>
    where
        F: FnMut(&str) -> Arc<dyn EntityStore>,
    {
        let mut registry = Self::new();
        for entity in entities {
            let store = store_for(&entity.entity);
            registry.collect(store, &entity.fields, &entity.params())?;
        }

        tracing::info!(entities = registry.len(), "Registry populated");
        Ok(registry)
    }

    /// All descriptors in registration order
    pub fn all(&self) -> &[EntityDescriptor] {
        &self.descriptors
    }

    /// Number of registered descriptors
    pub fn len(&self) -> usize {
        self.descriptors.len()
    }

    /// Whether nothing has been registered
    pub fn is_empty(&self) -> bool {
        self.descriptors.is_empty()
    }
}
