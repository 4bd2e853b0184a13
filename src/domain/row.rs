//! Row capability
//!
//! The export engine never looks at the concrete shape of a store's rows. It
//! only needs to read a field by name and to follow a named relation to a
//! related row, which is all [`Row`] exposes.

use serde_json::{Map, Value};

/// Read access to one result row
///
/// Cell values are [`serde_json::Value`]s; sinks decide how to stringify them.
pub trait Row: Send + Sync {
    /// Reads a field by name
    ///
    /// Returns `None` when the row has no such field. A field that exists but
    /// holds no value is `Some(Value::Null)`.
    fn read_field(&self, name: &str) -> Option<Value>;

    /// Follows a named relation to the related row
    ///
    /// Returns `None` when the relation is unknown or has no related row.
    fn read_relation(&self, name: &str) -> Option<&dyn Row>;
}

/// JSON objects are rows: scalar members are fields, object members are relations.
impl Row for Map<String, Value> {
    fn read_field(&self, name: &str) -> Option<Value> {
        self.get(name).cloned()
    }

    fn read_relation(&self, name: &str) -> Option<&dyn Row> {
        self.get(name)
            .and_then(Value::as_object)
            .map(|related| related as &dyn Row)
    }
}

/// Renders a cell value as text
///
/// Strings are taken verbatim, `null` becomes the empty string, and any other
/// value uses its JSON representation.
pub fn cell_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn row(value: Value) -> Map<String, Value> {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn test_read_field() {
        let r = row(json!({"email": "a@x.com", "age": 30}));
        assert_eq!(r.read_field("email"), Some(json!("a@x.com")));
        assert_eq!(r.read_field("age"), Some(json!(30)));
        assert_eq!(r.read_field("missing"), None);
    }

    #[test]
    fn test_read_relation() {
        let r = row(json!({"orders": {"total": 12.5}, "note": "x"}));
        let related = r.read_relation("orders").unwrap();
        assert_eq!(related.read_field("total"), Some(json!(12.5)));
        assert!(r.read_relation("note").is_none());
        assert!(r.read_relation("missing").is_none());
    }

    #[test]
    fn test_cell_text() {
        assert_eq!(cell_text(&Value::Null), "");
        assert_eq!(cell_text(&json!("pro")), "pro");
        assert_eq!(cell_text(&json!(42)), "42");
        assert_eq!(cell_text(&json!(true)), "true");
        assert_eq!(cell_text(&json!(["a", 1])), "[\"a\",1]");
    }
}
