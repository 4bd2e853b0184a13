//! CSV sink
//!
//! Renders rows as comma-separated values terminated by `\n`. The quoting
//! policy is configurable: every cell quoted (the default, for spreadsheet
//! tools that mis-read unquoted identifiers) or only cells that need it.

use super::traits::RowSink;
use crate::domain::errors::GdprError;
use crate::domain::row::cell_text;
use crate::domain::Result;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::io::Write;
use std::str::FromStr;

/// When cells are wrapped in double quotes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuoteStyle {
    /// Quote every cell
    #[default]
    Always,
    /// Quote only cells containing a comma, quote, CR or LF
    Necessary,
}

impl fmt::Display for QuoteStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QuoteStyle::Always => write!(f, "always"),
            QuoteStyle::Necessary => write!(f, "necessary"),
        }
    }
}

impl FromStr for QuoteStyle {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "always" => Ok(QuoteStyle::Always),
            "necessary" => Ok(QuoteStyle::Necessary),
            _ => Err(format!(
                "Invalid quote style '{s}'. Must be one of: always, necessary"
            )),
        }
    }
}

/// Writer for CSV format
pub struct CsvSink<W: Write> {
    writer: W,
    quote_style: QuoteStyle,
    rows_written: usize,
}

impl<W: Write> CsvSink<W> {
    /// Creates a CSV sink over any writer
    pub fn new(writer: W, quote_style: QuoteStyle) -> Self {
        Self {
            writer,
            quote_style,
            rows_written: 0,
        }
    }

    /// Number of rows written, separator rows included
    pub fn rows_written(&self) -> usize {
        self.rows_written
    }

    /// Consumes the sink and returns the writer
    pub fn into_inner(self) -> W {
        self.writer
    }

    /// Escape one cell according to the quoting policy
    fn escape_cell(&self, value: &str) -> String {
        let needs_quotes = match self.quote_style {
            QuoteStyle::Always => true,
            QuoteStyle::Necessary => {
                value.contains(',')
                    || value.contains('"')
                    || value.contains('\n')
                    || value.contains('\r')
            }
        };

        if needs_quotes {
            // Wrap in quotes and escape internal quotes by doubling them
            format!("\"{}\"", value.replace('"', "\"\""))
        } else {
            value.to_string()
        }
    }
}

impl<W: Write> RowSink for CsvSink<W> {
    fn write_row(&mut self, cells: &[Value]) -> Result<()> {
        let line = cells
            .iter()
            .map(|cell| self.escape_cell(&cell_text(cell)))
            .collect::<Vec<_>>()
            .join(",");

        self.writer
            .write_all(line.as_bytes())
            .and_then(|_| self.writer.write_all(b"\n"))
            .map_err(|e| GdprError::Io(format!("Failed to write CSV row: {e}")))?;

        self.rows_written += 1;
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        self.writer
            .flush()
            .map_err(|e| GdprError::Io(format!("Failed to flush CSV output: {e}")))
    }
}

/// Renders rows to a CSV string in one go
pub fn render_rows(rows: &[Vec<Value>], quote_style: QuoteStyle) -> Result<String> {
    let mut sink = CsvSink::new(Vec::new(), quote_style);
    for row in rows {
        sink.write_row(row)?;
    }
    String::from_utf8(sink.into_inner()).map_err(|e| GdprError::Serialization(e.to_string()))
}
