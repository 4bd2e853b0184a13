//! Store capability traits
//!
//! This module defines the capability each registered entity exposes to the
//! export engine: fetch the rows bound to a subject, optionally traversing
//! named relations.

use crate::domain::errors::StoreError;
use crate::domain::ids::SubjectId;
use crate::domain::row::Row;
use async_trait::async_trait;

/// A subject-scoped query against one entity type
///
/// Built by the query resolver: the subject filter first, then one
/// [`SubjectQuery::join`] per declared relation, in declaration order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubjectQuery {
    /// Field whose value must equal the subject id
    pub subject_field: String,

    /// Subject whose rows are requested
    pub subject_id: SubjectId,

    /// Relations to traverse, in order
    pub joins: Vec<String>,
}

impl SubjectQuery {
    /// Creates a query filtering `subject_field == subject_id`
    pub fn new(subject_field: impl Into<String>, subject_id: SubjectId) -> Self {
        Self {
            subject_field: subject_field.into(),
            subject_id,
            joins: Vec::new(),
        }
    }

    /// Adds a relation traversal after the ones already present
    pub fn join(mut self, relation: impl Into<String>) -> Self {
        self.joins.push(relation.into());
        self
    }
}

/// Store capability for one entity type
///
/// Implementations must return an empty vector, never an error, when no rows
/// match. Errors are reserved for queries the store cannot execute.
#[async_trait]
pub trait EntityStore: Send + Sync {
    /// Canonical type name of the entity this store serves
    fn entity_type(&self) -> &str;

    /// Fetch all rows matching the query
    ///
    /// # Errors
    ///
    /// Returns a [`StoreError`] if a relation is unknown, the entity does not
    /// exist in the store, or the store cannot be reached.
    async fn query_by_subject(
        &self,
        query: &SubjectQuery,
    ) -> std::result::Result<Vec<Box<dyn Row>>, StoreError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_subject_query_joins_keep_order() {
        let query = SubjectQuery::new("owner_id", SubjectId::from(42))
            .join("device")
            .join("vendor");

        assert_eq!(query.subject_field, "owner_id");
        assert_eq!(query.subject_id.as_str(), "42");
        assert_eq!(query.joins, vec!["device", "vendor"]);
    }
}
