//! Row projection
//!
//! Reads the cells of one data row. A field path is either a bare field name
//! or a `"relation field"` pair naming a field of a related row; anything
//! longer is a malformed declaration and is reported, never truncated.

use crate::domain::errors::ProjectionError;
use crate::domain::row::Row;
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

/// A parsed field path
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldPath {
    /// A field of the row itself
    Field(String),
    /// A field of the row reached through a named relation
    Related { relation: String, field: String },
}

impl FieldPath {
    /// Parses a whitespace-separated field path
    ///
    /// # Errors
    ///
    /// Returns [`ProjectionError::InvalidFieldPath`] for an empty path or one
    /// with more than two words.
    ///
    /// # Examples
    ///
    /// ```
    /// use gdpr_export::core::export::FieldPath;
    ///
    /// let path = FieldPath::parse("orders total").unwrap();
    /// assert_eq!(
    ///     path,
    ///     FieldPath::Related { relation: "orders".into(), field: "total".into() }
    /// );
    /// assert!(FieldPath::parse("a b c").is_err());
    /// ```
    pub fn parse(path: &str) -> Result<Self, ProjectionError> {
        let segments: Vec<&str> = path.split_whitespace().collect();
        match segments.as_slice() {
            [field] => Ok(FieldPath::Field((*field).to_string())),
            [relation, field] => Ok(FieldPath::Related {
                relation: (*relation).to_string(),
                field: (*field).to_string(),
            }),
            _ => Err(ProjectionError::InvalidFieldPath {
                path: path.to_string(),
                segments: segments.len(),
            }),
        }
    }
}

impl FromStr for FieldPath {
    type Err = ProjectionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldPath::Field(field) => write!(f, "{field}"),
            FieldPath::Related { relation, field } => write!(f, "{relation} {field}"),
        }
    }
}

/// Parses every path of a descriptor's field list, in order
pub fn parse_paths<S: AsRef<str>>(paths: &[S]) -> Result<Vec<FieldPath>, ProjectionError> {
    paths.iter().map(|p| FieldPath::parse(p.as_ref())).collect()
}

/// Reads the value at `path` from `row`
///
/// `entity` is only used to label errors.
///
/// # Errors
///
/// Returns [`ProjectionError::UnknownField`] or
/// [`ProjectionError::UnknownRelation`] when the row does not have the shape
/// the path expects.
pub fn project(row: &dyn Row, path: &FieldPath, entity: &str) -> Result<Value, ProjectionError> {
    match path {
        FieldPath::Field(field) => read(row, field, entity),
        FieldPath::Related { relation, field } => {
            let related =
                row.read_relation(relation)
                    .ok_or_else(|| ProjectionError::UnknownRelation {
                        entity: entity.to_string(),
                        relation: relation.clone(),
                    })?;
            read(related, field, entity)
        }
    }
}

/// Reads one data row: the values at `paths`, in order
pub fn project_row(
    row: &dyn Row,
    paths: &[FieldPath],
    entity: &str,
) -> Result<Vec<Value>, ProjectionError> {
    paths.iter().map(|path| project(row, path, entity)).collect()
}

fn read(row: &dyn Row, field: &str, entity: &str) -> Result<Value, ProjectionError> {
    row.read_field(field)
        .ok_or_else(|| ProjectionError::UnknownField {
            entity: entity.to_string(),
            field: field.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Map};
    use test_case::test_case;

    fn row(value: Value) -> Map<String, Value> {
        value.as_object().cloned().unwrap()
    }

    #[test_case("email", FieldPath::Field("email".into()) ; "bare field")]
    #[test_case("  email ", FieldPath::Field("email".into()) ; "surrounding whitespace")]
    #[test_case("orders total", FieldPath::Related { relation: "orders".into(), field: "total".into() } ; "related field")]
    #[test_case("orders   total", FieldPath::Related { relation: "orders".into(), field: "total".into() } ; "repeated spaces")]
    fn test_parse_valid(input: &str, expected: FieldPath) {
        assert_eq!(FieldPath::parse(input).unwrap(), expected);
    }

    #[test_case("a b c", 3 ; "three words")]
    #[test_case("a b c d", 4 ; "four words")]
    #[test_case("", 0 ; "empty")]
    #[test_case("   ", 0 ; "blank")]
    fn test_parse_invalid(input: &str, segments: usize) {
        assert_eq!(
            FieldPath::parse(input).unwrap_err(),
            ProjectionError::InvalidFieldPath {
                path: input.to_string(),
                segments
            }
        );
    }

    #[test]
    fn test_project_related_field() {
        let r = row(json!({"orders": {"total": 99.5}}));
        let path = FieldPath::parse("orders total").unwrap();
        assert_eq!(project(&r, &path, "Customer").unwrap(), json!(99.5));
    }

    #[test]
    fn test_project_null_field_is_a_value() {
        let r = row(json!({"nickname": null}));
        let path = FieldPath::parse("nickname").unwrap();
        assert_eq!(project(&r, &path, "Profile").unwrap(), Value::Null);
    }

    #[test]
    fn test_project_unknown_field() {
        let r = row(json!({"email": "a@x.com"}));
        let err = project(&r, &FieldPath::parse("phone").unwrap(), "Account").unwrap_err();
        assert_eq!(
            err,
            ProjectionError::UnknownField {
                entity: "Account".to_string(),
                field: "phone".to_string()
            }
        );
    }

    #[test]
    fn test_project_missing_relation() {
        let r = row(json!({"orders": null}));
        let err = project(&r, &FieldPath::parse("orders total").unwrap(), "Customer").unwrap_err();
        assert!(matches!(err, ProjectionError::UnknownRelation { .. }));
    }

    #[test]
    fn test_project_row_keeps_path_order() {
        let r = row(json!({"a": 1, "b": 2, "rel": {"c": 3}}));
        let paths = parse_paths(&["rel c", "b", "a"]).unwrap();
        assert_eq!(
            project_row(&r, &paths, "T").unwrap(),
            vec![json!(3), json!(2), json!(1)]
        );
    }

    #[test]
    fn test_display_normalizes_spacing() {
        let path = FieldPath::parse("orders   total").unwrap();
        assert_eq!(path.to_string(), "orders total");
    }
}
