//! Entity descriptors
//!
//! An [`EntityDescriptor`] holds one entity's collection rules: which fields
//! to copy, which to rename, which relations to traverse, and the field that
//! binds rows to a subject. It also carries the entity's store handle, so the
//! export engine can treat every entity type the same way.

use crate::adapters::store::EntityStore;
use crate::domain::errors::RegistrationError;
use serde_json::{Map, Value};
use std::fmt;
use std::sync::Arc;

/// Output column label used when the subject-id column is included
pub const SUBJECT_ID_COLUMN: &str = "user_id";

/// Options recognized by [`EntityDescriptor::collect`]
const KNOWN_OPTIONS: [&str; 8] = [
    "user_id",
    "renamed_fields",
    "joins",
    "join",
    "table_name",
    "description",
    "desc",
    "include_user_id",
];

/// Collection rules for one entity type
#[derive(Clone)]
pub struct EntityDescriptor {
    entity_type: String,
    name: String,
    subject_id_field: String,
    simple_fields: Vec<String>,
    renamed_fields: Vec<(String, String)>,
    relations: Vec<String>,
    description: Option<String>,
    include_subject_id_column: bool,
    output_columns: Vec<String>,
    query_fields: Vec<String>,
    store: Arc<dyn EntityStore>,
}

impl EntityDescriptor {
    /// Starts a descriptor for the entity served by `store`
    pub fn builder(store: Arc<dyn EntityStore>) -> EntityDescriptorBuilder {
        EntityDescriptorBuilder::new(store)
    }

    /// Builds a descriptor from a declarative field list and option record
    ///
    /// `params` must be a JSON object recognizing `user_id` (required),
    /// `renamed_fields`, `joins`, `join`, `table_name`, `description` (or
    /// `desc`) and `include_user_id`. Object key order is kept, so renamed
    /// columns appear in declaration order.
    ///
    /// # Errors
    ///
    /// Returns a [`RegistrationError`] if `params` is not a mapping, if
    /// `user_id` is missing, or if any option has the wrong shape.
    ///
    /// # Examples
    ///
    /// ```
    /// use gdpr_export::adapters::store::JsonDataset;
    /// use gdpr_export::core::registry::EntityDescriptor;
    /// use serde_json::json;
    /// use std::sync::Arc;
    ///
    /// let dataset = Arc::new(JsonDataset::default());
    /// let descriptor = EntityDescriptor::collect(
    ///     dataset.store("Account"),
    ///     &["email"],
    ///     &json!({"user_id": "owner_id", "renamed_fields": {"subscription_plan": "Plan"}}),
    /// )
    /// .unwrap();
    ///
    /// assert_eq!(descriptor.output_columns(), ["email", "Plan"]);
    /// assert_eq!(descriptor.query_fields(), ["email", "subscription_plan"]);
    /// ```
    pub fn collect<S: AsRef<str>>(
        store: Arc<dyn EntityStore>,
        simple_fields: &[S],
        params: &Value,
    ) -> Result<Self, RegistrationError> {
        let entity = store.entity_type().to_string();
        let params = params
            .as_object()
            .ok_or_else(|| RegistrationError::NotAMapping {
                entity: entity.clone(),
                option: "params".to_string(),
            })?;

        if let Some(unknown) = params
            .keys()
            .find(|key| !KNOWN_OPTIONS.contains(&key.as_str()))
        {
            return Err(RegistrationError::InvalidOption {
                entity,
                option: unknown.clone(),
                reason: format!("expected one of: {}", KNOWN_OPTIONS.join(", ")),
            });
        }

        // A null or non-string binding declares no subject field at all
        let subject_id_field = match params.get("user_id").and_then(Value::as_str) {
            Some(field) => field.to_string(),
            None => return Err(RegistrationError::MissingSubjectId { entity }),
        };

        let mut builder = EntityDescriptor::builder(store)
            .subject_id_field(subject_id_field)
            .fields(simple_fields.iter().map(|f| f.as_ref().to_string()));

        if let Some(renamed) = params.get("renamed_fields") {
            let renamed = renamed
                .as_object()
                .ok_or_else(|| RegistrationError::NotAMapping {
                    entity: entity.clone(),
                    option: "renamed_fields".to_string(),
                })?;
            for (path, label) in renamed {
                builder = builder.rename(path.clone(), string_option(&entity, path, label)?);
            }
        }

        if let Some(joins) = params.get("joins") {
            for relation in relation_list(&entity, joins)? {
                builder = builder.join(relation);
            }
        }
        if let Some(join) = params.get("join") {
            builder = builder.join(string_option(&entity, "join", join)?);
        }

        if let Some(table_name) = params.get("table_name") {
            builder = builder.table_name(string_option(&entity, "table_name", table_name)?);
        }

        if let Some(description) = description_option(&entity, params)? {
            builder = builder.description(description);
        }

        if let Some(include) = params.get("include_user_id") {
            let include = include
                .as_bool()
                .ok_or_else(|| RegistrationError::InvalidOption {
                    entity: entity.clone(),
                    option: "include_user_id".to_string(),
                    reason: "must be a boolean".to_string(),
                })?;
            builder = builder.include_subject_id_column(include);
        }

        builder.build()
    }

    /// Canonical type name of the entity
    pub fn entity_type(&self) -> &str {
        &self.entity_type
    }

    /// Section label: `table_name` when given, the entity type otherwise
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Field binding rows to the subject
    pub fn subject_id_field(&self) -> &str {
        &self.subject_id_field
    }

    /// Fields copied through unchanged
    pub fn simple_fields(&self) -> &[String] {
        &self.simple_fields
    }

    /// Field path to output label pairs, in declaration order
    pub fn renamed_fields(&self) -> &[(String, String)] {
        &self.renamed_fields
    }

    /// Relations traversed when querying, in declaration order
    pub fn relations(&self) -> &[String] {
        &self.relations
    }

    /// Free-text comment attached to the section
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Whether the subject-id field is exported as the first column
    pub fn includes_subject_id_column(&self) -> bool {
        self.include_subject_id_column
    }

    /// Column header row
    pub fn output_columns(&self) -> &[String] {
        &self.output_columns
    }

    /// Field paths read for each data row, aligned with [`Self::output_columns`]
    pub fn query_fields(&self) -> &[String] {
        &self.query_fields
    }

    /// Store capability of the entity
    pub fn store(&self) -> &Arc<dyn EntityStore> {
        &self.store
    }

    /// Re-checks the invariants a registry relies on
    pub(crate) fn validate(&self) -> Result<(), RegistrationError> {
        if self.subject_id_field.trim().is_empty() {
            return Err(RegistrationError::MissingSubjectId {
                entity: self.entity_type.clone(),
            });
        }
        Ok(())
    }
}

impl fmt::Debug for EntityDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EntityDescriptor")
            .field("entity_type", &self.entity_type)
            .field("name", &self.name)
            .field("subject_id_field", &self.subject_id_field)
            .field("output_columns", &self.output_columns)
            .field("query_fields", &self.query_fields)
            .field("relations", &self.relations)
            .field("description", &self.description)
            .finish()
    }
}

/// Builder for [`EntityDescriptor`]
pub struct EntityDescriptorBuilder {
    store: Arc<dyn EntityStore>,
    table_name: Option<String>,
    subject_id_field: Option<String>,
    simple_fields: Vec<String>,
    renamed_fields: Vec<(String, String)>,
    relations: Vec<String>,
    description: Option<String>,
    include_subject_id_column: bool,
}

impl EntityDescriptorBuilder {
    fn new(store: Arc<dyn EntityStore>) -> Self {
        Self {
            store,
            table_name: None,
            subject_id_field: None,
            simple_fields: Vec::new(),
            renamed_fields: Vec::new(),
            relations: Vec::new(),
            description: None,
            include_subject_id_column: false,
        }
    }

    /// Sets the field binding rows to the subject (required)
    pub fn subject_id_field(mut self, field: impl Into<String>) -> Self {
        self.subject_id_field = Some(field.into());
        self
    }

    /// Appends one simple field
    pub fn field(mut self, field: impl Into<String>) -> Self {
        self.simple_fields.push(field.into());
        self
    }

    /// Appends several simple fields
    pub fn fields<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.simple_fields.extend(fields.into_iter().map(Into::into));
        self
    }

    /// Exports the value at `path` under the column `label`
    ///
    /// `path` is a field name or a `"relation field"` pair.
    pub fn rename(mut self, path: impl Into<String>, label: impl Into<String>) -> Self {
        self.renamed_fields.push((path.into(), label.into()));
        self
    }

    /// Appends a relation to traverse when querying
    pub fn join(mut self, relation: impl Into<String>) -> Self {
        self.relations.push(relation.into());
        self
    }

    /// Overrides the section label
    pub fn table_name(mut self, name: impl Into<String>) -> Self {
        self.table_name = Some(name.into());
        self
    }

    /// Attaches a description line to the section
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Exports the subject-id field as a leading `user_id` column
    pub fn include_subject_id_column(mut self, include: bool) -> Self {
        self.include_subject_id_column = include;
        self
    }

    /// Builds the descriptor and computes its column layout
    ///
    /// # Errors
    ///
    /// Returns [`RegistrationError::MissingSubjectId`] if no subject-id field
    /// was set, and [`RegistrationError::EmptyEntityType`] if the store has a
    /// blank entity type.
    pub fn build(self) -> Result<EntityDescriptor, RegistrationError> {
        let entity_type = self.store.entity_type().to_string();
        if entity_type.trim().is_empty() {
            return Err(RegistrationError::EmptyEntityType);
        }

        let subject_id_field = match self.subject_id_field {
            Some(field) if !field.trim().is_empty() => field,
            _ => {
                return Err(RegistrationError::MissingSubjectId {
                    entity: entity_type,
                })
            }
        };

        if let Some(blank) = self
            .simple_fields
            .iter()
            .chain(self.renamed_fields.iter().map(|(path, _)| path))
            .find(|field| field.trim().is_empty())
        {
            return Err(RegistrationError::InvalidOption {
                entity: entity_type,
                option: format!("'{blank}'"),
                reason: "field names cannot be blank".to_string(),
            });
        }

        let mut output_columns = Vec::new();
        let mut query_fields = Vec::new();

        if self.include_subject_id_column {
            output_columns.push(SUBJECT_ID_COLUMN.to_string());
            query_fields.push(subject_id_field.clone());
        }

        output_columns.extend(self.simple_fields.iter().cloned());
        query_fields.extend(self.simple_fields.iter().cloned());

        for (path, label) in &self.renamed_fields {
            output_columns.push(label.clone());
            query_fields.push(path.clone());
        }

        Ok(EntityDescriptor {
            name: self.table_name.unwrap_or_else(|| entity_type.clone()),
            entity_type,
            subject_id_field,
            simple_fields: self.simple_fields,
            renamed_fields: self.renamed_fields,
            relations: self.relations,
            description: self.description,
            include_subject_id_column: self.include_subject_id_column,
            output_columns,
            query_fields,
            store: self.store,
        })
    }
}

fn string_option(entity: &str, option: &str, value: &Value) -> Result<String, RegistrationError> {
    value
        .as_str()
        .map(str::to_string)
        .ok_or_else(|| RegistrationError::InvalidOption {
            entity: entity.to_string(),
            option: option.to_string(),
            reason: format!("expected a string, got {value}"),
        })
}

fn relation_list(entity: &str, value: &Value) -> Result<Vec<String>, RegistrationError> {
    match value {
        Value::String(relation) => Ok(vec![relation.clone()]),
        Value::Array(items) => items
            .iter()
            .map(|item| string_option(entity, "joins", item))
            .collect(),
        other => Err(RegistrationError::InvalidOption {
            entity: entity.to_string(),
            option: "joins".to_string(),
            reason: format!("expected a list of relation names, got {other}"),
        }),
    }
}

fn description_option(
    entity: &str,
    params: &Map<String, Value>,
) -> Result<Option<String>, RegistrationError> {
    match (params.get("description"), params.get("desc")) {
        (Some(_), Some(_)) => Err(RegistrationError::InvalidOption {
            entity: entity.to_string(),
            option: "desc".to_string(),
            reason: "'description' and 'desc' are aliases, give only one".to_string(),
        }),
        (Some(value), None) => string_option(entity, "description", value).map(Some),
        (None, Some(value)) => string_option(entity, "desc", value).map(Some),
        (None, None) => Ok(None),
    }
}
