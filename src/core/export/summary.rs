//! Export summary and reporting
//!
//! This module defines the record kept for each completed export.

use crate::domain::ids::SubjectId;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::time::Duration;

/// Summary of an export operation
#[derive(Debug, Clone, Serialize)]
pub struct ExportSummary {
    /// Subject the export was produced for
    pub subject_id: SubjectId,

    /// When the export started
    pub generated_at: DateTime<Utc>,

    /// Duration of the export
    #[serde(serialize_with = "serialize_duration_ms", rename = "duration_ms")]
    pub duration: Duration,

    /// Number of registered entities visited
    pub entities_total: usize,

    /// Number of sections in the document
    pub sections_written: usize,

    /// Number of data rows across all sections
    pub rows_written: usize,

    /// Labels of entities that had no rows for the subject
    pub entities_skipped: Vec<String>,

    /// SHA-256 of the rendered document, when requested
    #[serde(skip_serializing_if = "Option::is_none")]
    pub checksum: Option<String>,
}

impl ExportSummary {
    /// Create a new empty export summary
    pub fn new(subject_id: SubjectId) -> Self {
        Self {
            subject_id,
            generated_at: Utc::now(),
            duration: Duration::from_secs(0),
            entities_total: 0,
            sections_written: 0,
            rows_written: 0,
            entities_skipped: Vec::new(),
            checksum: None,
        }
    }

    /// Set the duration
    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    /// Record a written section
    pub fn add_section(&mut self, rows: usize) {
        self.sections_written += 1;
        self.rows_written += rows;
    }

    /// Record an entity without rows
    pub fn add_skipped(&mut self, label: impl Into<String>) {
        self.entities_skipped.push(label.into());
    }

    /// Whether the subject had no data in any entity
    pub fn is_empty(&self) -> bool {
        self.sections_written == 0
    }
}

fn serialize_duration_ms<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    serializer.serialize_u64(duration.as_millis() as u64)
}
