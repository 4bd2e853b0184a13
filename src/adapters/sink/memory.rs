//! In-memory sink

use super::traits::RowSink;
use crate::domain::row::cell_text;
use crate::domain::Result;
use serde_json::Value;

/// Sink that records every row as text cells
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemorySink {
    rows: Vec<Vec<String>>,
}

impl MemorySink {
    /// Creates an empty sink
    pub fn new() -> Self {
        Self::default()
    }

    /// Rows written so far
    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    /// Consumes the sink and returns the recorded rows
    pub fn into_rows(self) -> Vec<Vec<String>> {
        self.rows
    }
}

impl RowSink for MemorySink {
    fn write_row(&mut self, cells: &[Value]) -> Result<()> {
        self.rows.push(cells.iter().map(cell_text).collect());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_memory_sink_records_text() {
        let mut sink = MemorySink::new();
        sink.write_row(&[json!("email"), json!(3), Value::Null]).unwrap();
        sink.write_row(&[]).unwrap();

        assert_eq!(
            sink.into_rows(),
            vec![
                vec!["email".to_string(), "3".to_string(), String::new()],
                vec![]
            ]
        );
    }
}
