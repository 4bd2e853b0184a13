//! JSON dataset store
//!
//! A JSON file holding rows for several entity types:
//!
//! ```json
//! {
//!   "Account": { "rows": [ { "owner_id": 42, "email": "a@x.com" } ] },
//!   "Session": {
//!     "relations": ["device"],
//!     "rows": [ { "owner_id": 42, "device": { "model": "Pixel" } } ]
//!   }
//! }
//! ```
//!
//! Scalar members of a row are fields; object members are related rows.
//! A relation can only be traversed if the table declares it, and traversal
//! keeps only the rows that actually have a related row (inner join).

use super::traits::{EntityStore, SubjectQuery};
use crate::domain::errors::{GdprError, StoreError};
use crate::domain::row::{cell_text, Row};
use crate::domain::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

/// Rows and declared relations of one entity type
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct JsonTable {
    /// Relation names that may be traversed
    #[serde(default)]
    pub relations: Vec<String>,

    /// Row objects
    #[serde(default)]
    pub rows: Vec<Map<String, Value>>,
}

impl JsonTable {
    fn select(&self, query: &SubjectQuery) -> std::result::Result<Vec<Box<dyn Row>>, StoreError> {
        for relation in &query.joins {
            if !self.relations.contains(relation) {
                return Err(StoreError::UnknownRelation(relation.clone()));
            }
        }

        let subject = query.subject_id.as_str();
        let rows = self
            .rows
            .iter()
            .filter(|row| {
                row.get(&query.subject_field)
                    .is_some_and(|value| cell_text(value) == subject)
            })
            .filter(|row| {
                query
                    .joins
                    .iter()
                    .all(|relation| row.get(relation).is_some_and(Value::is_object))
            })
            .map(|row| Box::new(row.clone()) as Box<dyn Row>)
            .collect();

        Ok(rows)
    }
}

/// In-memory dataset loaded from a JSON document
#[derive(Debug, Clone, Default)]
pub struct JsonDataset {
    tables: HashMap<String, JsonTable>,
}

impl JsonDataset {
    /// Loads a dataset from a JSON file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not a dataset document.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|e| {
            GdprError::Io(format!(
                "Failed to read dataset file {}: {}",
                path.display(),
                e
            ))
        })?;
        let dataset = Self::from_json_str(&contents)?;

        tracing::debug!(
            path = %path.display(),
            tables = dataset.tables.len(),
            "Loaded JSON dataset"
        );

        Ok(dataset)
    }

    /// Parses a dataset from a JSON string
    pub fn from_json_str(contents: &str) -> Result<Self> {
        let tables: HashMap<String, JsonTable> = serde_json::from_str(contents)?;
        Ok(Self { tables })
    }

    /// Parses a dataset from an already decoded JSON value
    pub fn from_value(value: Value) -> Result<Self> {
        let tables: HashMap<String, JsonTable> = serde_json::from_value(value)?;
        Ok(Self { tables })
    }

    /// Adds or replaces the table of an entity type
    pub fn insert_table(&mut self, entity_type: impl Into<String>, table: JsonTable) {
        self.tables.insert(entity_type.into(), table);
    }

    /// Returns the table of an entity type, if present
    pub fn table(&self, entity_type: &str) -> Option<&JsonTable> {
        self.tables.get(entity_type)
    }

    /// Returns a store handle for one entity type
    ///
    /// The handle is created even if the dataset has no such table; querying
    /// it then fails with [`StoreError::UnknownEntity`].
    pub fn store(self: &Arc<Self>, entity_type: impl Into<String>) -> Arc<dyn EntityStore> {
        Arc::new(JsonEntityStore {
            dataset: Arc::clone(self),
            entity_type: entity_type.into(),
        })
    }
}

/// [`EntityStore`] over one table of a shared [`JsonDataset`]
struct JsonEntityStore {
    dataset: Arc<JsonDataset>,
    entity_type: String,
}

#[async_trait]
impl EntityStore for JsonEntityStore {
    fn entity_type(&self) -> &str {
        &self.entity_type
    }

    async fn query_by_subject(
        &self,
        query: &SubjectQuery,
    ) -> std::result::Result<Vec<Box<dyn Row>>, StoreError> {
        let table = self
            .dataset
            .table(&self.entity_type)
            .ok_or_else(|| StoreError::UnknownEntity(self.entity_type.clone()))?;

        table.select(query)
    }
}
