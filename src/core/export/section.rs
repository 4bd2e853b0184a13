//! Export sections and documents
//!
//! A section is one entity's slice of the export. Its rows always follow the
//! same grammar, which consumers of the export rely on:
//!
//! ```text
//! <entity label>
//! Description:,<text>        (only when the entity has a description)
//! <column>,<column>,...
//! <value>,<value>,...        (one line per matching row)
//! <blank line>
//! ```
//!
//! Entities without matching rows produce no section at all.

use crate::adapters::sink::csv::CsvSink;
use crate::adapters::sink::{QuoteStyle, RowSink};
use crate::core::export::projector::{parse_paths, project_row};
use crate::core::registry::EntityDescriptor;
use crate::domain::errors::{GdprError, ProjectionError};
use crate::domain::ids::SubjectId;
use crate::domain::row::Row;
use crate::domain::Result;
use serde::Serialize;
use serde_json::Value;

/// First cell of the description row
pub const DESCRIPTION_LABEL: &str = "Description:";

/// One entity's rows, ready to render
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Section {
    /// Entity label
    pub label: String,

    /// Optional description line
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Column headers
    pub columns: Vec<String>,

    /// Data rows, aligned with `columns`
    pub rows: Vec<Vec<Value>>,
}

impl Section {
    /// Projects `rows` through the descriptor's field list
    ///
    /// Returns `Ok(None)` when there are no rows: empty sections are
    /// suppressed. Field paths are parsed before any row is read, so a
    /// malformed path fails the section as a whole.
    pub fn from_rows(
        descriptor: &EntityDescriptor,
        rows: &[Box<dyn Row>],
    ) -> std::result::Result<Option<Self>, ProjectionError> {
        if rows.is_empty() {
            return Ok(None);
        }

        let paths = parse_paths(descriptor.query_fields())?;
        let data = rows
            .iter()
            .map(|row| project_row(row.as_ref(), &paths, descriptor.name()))
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(Some(Self {
            label: descriptor.name().to_string(),
            description: descriptor.description().map(str::to_string),
            columns: descriptor.output_columns().to_vec(),
            rows: data,
        }))
    }

    /// Number of sink rows this section renders to
    pub fn line_count(&self) -> usize {
        3 + usize::from(self.description.is_some()) + self.rows.len()
    }

    /// Writes the section to a sink, separator row included
    pub fn render_into(&self, sink: &mut dyn RowSink) -> Result<()> {
        sink.write_row(&[Value::String(self.label.clone())])?;

        if let Some(description) = &self.description {
            sink.write_row(&[
                Value::String(DESCRIPTION_LABEL.to_string()),
                Value::String(description.clone()),
            ])?;
        }

        let header: Vec<Value> = self.columns.iter().cloned().map(Value::String).collect();
        sink.write_row(&header)?;

        for row in &self.rows {
            sink.write_row(row)?;
        }

        sink.write_row(&[])
    }
}

/// Renders one entity's rows straight into a sink
///
/// This is the streaming counterpart of [`ExportDocument::write_to`], for
/// callers that resolve and write one entity at a time. Unlike the
/// coordinator, which builds the whole document first, rows already written
/// for earlier entities stay in the sink if a later call fails.
///
/// Writes nothing and returns `false` when `rows` is empty.
pub fn write_section(
    sink: &mut dyn RowSink,
    descriptor: &EntityDescriptor,
    rows: &[Box<dyn Row>],
) -> Result<bool> {
    match Section::from_rows(descriptor, rows)? {
        Some(section) => {
            section.render_into(sink)?;
            Ok(true)
        }
        None => Ok(false),
    }
}

/// The complete export for one subject
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExportDocument {
    /// Subject the export was produced for
    pub subject_id: SubjectId,

    /// Sections in registration order
    pub sections: Vec<Section>,
}

impl ExportDocument {
    /// Creates a document with no sections
    pub fn new(subject_id: SubjectId) -> Self {
        Self {
            subject_id,
            sections: Vec::new(),
        }
    }

    /// Appends a section
    pub fn push(&mut self, section: Section) {
        self.sections.push(section);
    }

    /// Whether no entity had data for the subject
    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    /// Total number of data rows across sections
    pub fn row_count(&self) -> usize {
        self.sections.iter().map(|s| s.rows.len()).sum()
    }

    /// Writes every section to a sink and flushes it
    pub fn write_to(&self, sink: &mut dyn RowSink) -> Result<()> {
        for section in &self.sections {
            section.render_into(sink)?;
        }
        sink.finish()
    }

    /// Serializes the document as CSV
    pub fn to_csv(&self, quote_style: QuoteStyle) -> Result<String> {
        let mut sink = CsvSink::new(Vec::new(), quote_style);
        self.write_to(&mut sink)?;
        String::from_utf8(sink.into_inner()).map_err(|e| GdprError::Serialization(e.to_string()))
    }

    /// Serializes the document as pretty-printed JSON
    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
