//! Query resolution
//!
//! Turns a descriptor and a subject id into the rows to export: a subject
//! filter on the descriptor's subject-id field, followed by every declared
//! relation traversal in declaration order.

use crate::adapters::store::SubjectQuery;
use crate::core::registry::EntityDescriptor;
use crate::domain::errors::ResolutionError;
use crate::domain::ids::SubjectId;
use crate::domain::row::Row;

/// Builds the store query for a descriptor
///
/// Each relation is folded into the query after the previous ones, so nested
/// traversals see the joins they depend on.
pub fn build_query(descriptor: &EntityDescriptor, subject_id: &SubjectId) -> SubjectQuery {
    descriptor.relations().iter().fold(
        SubjectQuery::new(descriptor.subject_id_field(), subject_id.clone()),
        |query, relation| query.join(relation.as_str()),
    )
}

/// Fetches the rows of one entity for a subject
///
/// No matching rows is an empty vector, not an error.
///
/// # Errors
///
/// Returns a [`ResolutionError`] if the store reports a failure. Store
/// failures point at a registration or configuration defect and are not
/// retried.
pub async fn resolve(
    descriptor: &EntityDescriptor,
    subject_id: &SubjectId,
) -> Result<Vec<Box<dyn Row>>, ResolutionError> {
    let query = build_query(descriptor, subject_id);

    tracing::debug!(
        entity = %descriptor.entity_type(),
        subject_field = %query.subject_field,
        joins = ?query.joins,
        "Resolving rows"
    );

    let rows = descriptor
        .store()
        .query_by_subject(&query)
        .await
        .map_err(|source| {
            tracing::error!(
                entity = %descriptor.entity_type(),
                error = %source,
                "Store query failed"
            );
            ResolutionError::new(descriptor.name(), source)
        })?;

    tracing::debug!(
        entity = %descriptor.entity_type(),
        rows = rows.len(),
        "Resolved rows"
    );

    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::store::JsonDataset;
    use crate::domain::errors::StoreError;
    use serde_json::json;
    use std::sync::Arc;

    fn dataset() -> Arc<JsonDataset> {
        Arc::new(
            JsonDataset::from_value(json!({
                "Order": {
                    "relations": ["customer", "address"],
                    "rows": [
                        {"buyer_id": 1, "total": 10, "customer": {"name": "Ann"}, "address": {"city": "Oslo"}},
                        {"buyer_id": 1, "total": 20, "customer": {"name": "Ann"}},
                        {"buyer_id": 2, "total": 30, "customer": {"name": "Bob"}, "address": {"city": "Rome"}}
                    ]
                }
            }))
            .unwrap(),
        )
    }

    fn descriptor(dataset: &Arc<JsonDataset>, relations: &[&str]) -> EntityDescriptor {
        relations
            .iter()
            .fold(
                EntityDescriptor::builder(dataset.store("Order"))
                    .subject_id_field("buyer_id")
                    .field("total"),
                |builder, relation| builder.join(*relation),
            )
            .build()
            .unwrap()
    }

    #[test]
    fn test_build_query_keeps_relation_order() {
        let dataset = dataset();
        let query = build_query(
            &descriptor(&dataset, &["customer", "address"]),
            &SubjectId::from(1),
        );
        assert_eq!(query.subject_field, "buyer_id");
        assert_eq!(query.joins, vec!["customer", "address"]);
    }

    #[tokio::test]
    async fn test_resolve_without_relations() {
        let dataset = dataset();
        let rows = resolve(&descriptor(&dataset, &[]), &SubjectId::from(1))
            .await
            .unwrap();
        assert_eq!(rows.len(), 2);
    }

    #[tokio::test]
    async fn test_each_relation_narrows_rows() {
        let dataset = dataset();
        let rows = resolve(
            &descriptor(&dataset, &["customer", "address"]),
            &SubjectId::from(1),
        )
        .await
        .unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].read_field("total"), Some(json!(10)));
    }

    #[tokio::test]
    async fn test_no_rows_is_not_an_error() {
        let dataset = dataset();
        let rows = resolve(&descriptor(&dataset, &["customer"]), &SubjectId::from(99))
            .await
            .unwrap();
        assert!(rows.is_empty());
    }

    #[tokio::test]
    async fn test_store_failure_is_surfaced() {
        let dataset = dataset();
        let err = resolve(&descriptor(&dataset, &["warehouse"]), &SubjectId::from(1))
            .await
            .err().expect("expected error");
        assert_eq!(err.entity, "Order");
        assert_eq!(err.source, StoreError::UnknownRelation("warehouse".to_string()));
    }
}
