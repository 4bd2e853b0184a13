//! Export coordinator - main orchestrator for the export process
//!
//! Walks the registry in registration order, resolves each entity's rows for
//! the subject, and assembles the sections into one document. Any failure
//! aborts the export: a partial document is never returned.

use crate::adapters::sink::{QuoteStyle, RowSink};
use crate::config::schema::ExportConfig;
use crate::core::export::checksum::calculate_checksum_bytes;
use crate::core::export::resolver::resolve;
use crate::core::export::section::{ExportDocument, Section};
use crate::core::export::summary::ExportSummary;
use crate::core::registry::{EntityDescriptor, Registry};
use crate::domain::errors::GdprError;
use crate::domain::ids::SubjectId;
use crate::domain::row::Row;
use crate::domain::Result;
use crate::{log_export_complete, log_export_start, log_section_skipped};
use futures::future::try_join_all;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Instant;

/// Serialized form of an export document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Sectioned CSV
    #[default]
    Csv,
    /// The document structure as JSON
    Json,
}

impl OutputFormat {
    /// Conventional file extension
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Csv => "csv",
            OutputFormat::Json => "json",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for OutputFormat {
    type Err = GdprError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "csv" => Ok(OutputFormat::Csv),
            "json" => Ok(OutputFormat::Json),
            _ => Err(GdprError::Configuration(format!(
                "Invalid output format '{s}'. Must be one of: csv, json"
            ))),
        }
    }
}

/// Options controlling how an export runs and renders
#[derive(Debug, Clone, Default)]
pub struct ExportOptions {
    /// Resolve all entities concurrently instead of one after another
    pub parallel_resolution: bool,

    /// Serialized form
    pub output_format: OutputFormat,

    /// CSV quoting policy
    pub quote_style: QuoteStyle,

    /// Compute a SHA-256 of the rendered document
    pub include_checksum: bool,
}

impl ExportOptions {
    /// Create from the `[export]` configuration section
    pub fn from_config(config: &ExportConfig) -> Self {
        Self {
            parallel_resolution: config.parallel_resolution,
            output_format: config.output_format,
            quote_style: config.quote_style,
            include_checksum: config.include_checksum,
        }
    }
}

/// A rendered export together with its summary
#[derive(Debug, Clone)]
pub struct ExportArtifact {
    /// Structured document
    pub document: ExportDocument,

    /// Document rendered in the configured output format
    pub content: String,

    /// Counters, timing and checksum
    pub summary: ExportSummary,
}

/// Export coordinator
pub struct ExportCoordinator {
    registry: Arc<Registry>,
    options: ExportOptions,
}

impl ExportCoordinator {
    /// Create a new export coordinator over a populated registry
    pub fn new(registry: Arc<Registry>, options: ExportOptions) -> Self {
        Self { registry, options }
    }

    /// Registry this coordinator exports from
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Options in effect
    pub fn options(&self) -> &ExportOptions {
        &self.options
    }

    /// Builds the export document for a subject
    ///
    /// Sections appear in registration order; entities without rows are left
    /// out.
    ///
    /// # Errors
    ///
    /// Returns the first resolution or projection error encountered.
    pub async fn export(&self, subject_id: &SubjectId) -> Result<ExportDocument> {
        let (document, _) = self.build_document(subject_id).await?;
        Ok(document)
    }

    /// Builds, renders and summarizes the export for a subject
    pub async fn export_artifact(&self, subject_id: &SubjectId) -> Result<ExportArtifact> {
        let start_time = Instant::now();
        let (document, mut summary) = self.build_document(subject_id).await?;

        let content = self.render(&document)?;
        if self.options.include_checksum {
            summary.checksum = Some(calculate_checksum_bytes(content.as_bytes()));
        }

        let summary = summary.with_duration(start_time.elapsed());
        log_export_complete!(
            summary.sections_written,
            summary.rows_written,
            summary.duration
        );

        Ok(ExportArtifact {
            document,
            content,
            summary,
        })
    }

    /// Builds the export for a subject and writes it to a sink
    ///
    /// Nothing is written unless the whole document was built successfully.
    pub async fn export_to_sink(
        &self,
        subject_id: &SubjectId,
        sink: &mut dyn RowSink,
    ) -> Result<ExportSummary> {
        let start_time = Instant::now();
        let (document, summary) = self.build_document(subject_id).await?;
        document.write_to(sink)?;
        Ok(summary.with_duration(start_time.elapsed()))
    }

    /// Renders a document in the configured output format
    pub fn render(&self, document: &ExportDocument) -> Result<String> {
        match self.options.output_format {
            OutputFormat::Csv => document.to_csv(self.options.quote_style),
            OutputFormat::Json => document.to_json_pretty(),
        }
    }

    async fn build_document(
        &self,
        subject_id: &SubjectId,
    ) -> Result<(ExportDocument, ExportSummary)> {
        let descriptors = self.registry.all();
        log_export_start!(subject_id, descriptors.len());

        let mut summary = ExportSummary::new(subject_id.clone());
        summary.entities_total = descriptors.len();
        let mut document = ExportDocument::new(subject_id.clone());

        if self.options.parallel_resolution {
            tracing::debug!(
                entities = descriptors.len(),
                "Resolving entities concurrently"
            );
            let futures = descriptors
                .iter()
                .map(|descriptor| resolve(descriptor, subject_id));
            let resolved = try_join_all(futures).await?;

            for (descriptor, rows) in descriptors.iter().zip(resolved) {
                Self::collect_section(&mut document, &mut summary, descriptor, &rows)?;
            }
        } else {
            // One entity at a time: a failing entity stops the export before
            // any later entity is queried
            for descriptor in descriptors {
                let rows = resolve(descriptor, subject_id).await?;
                Self::collect_section(&mut document, &mut summary, descriptor, &rows)?;
            }
        }

        Ok((document, summary))
    }

    fn collect_section(
        document: &mut ExportDocument,
        summary: &mut ExportSummary,
        descriptor: &EntityDescriptor,
        rows: &[Box<dyn Row>],
    ) -> Result<()> {
        match Section::from_rows(descriptor, rows)? {
            Some(section) => {
                tracing::debug!(
                    entity = %descriptor.entity_type(),
                    name = %descriptor.name(),
                    rows = section.rows.len(),
                    "Section collected"
                );
                summary.add_section(section.rows.len());
                document.push(section);
            }
            None => {
                log_section_skipped!(descriptor.name());
                summary.add_skipped(descriptor.name());
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::store::JsonDataset;
    use crate::domain::errors::ProjectionError;
    use serde_json::json;

    fn registry() -> Arc<Registry> {
        let dataset = Arc::new(
            JsonDataset::from_value(json!({
                "Account": {
                    "rows": [
                        {"owner_id": 42, "email": "a@x.com", "subscription_plan": "pro"}
                    ]
                },
                "Session": {"relations": ["device"], "rows": []}
            }))
            .unwrap(),
        );

        let mut registry = Registry::new();
        registry
            .collect(
                dataset.store("Account"),
                &["email"],
                &json!({"user_id": "owner_id", "renamed_fields": {"subscription_plan": "Plan"}}),
            )
            .unwrap();
        registry
            .collect(
                dataset.store("Session"),
                &["started_at"],
                &json!({"user_id": "owner_id", "joins": ["device"]}),
            )
            .unwrap();
        Arc::new(registry)
    }

    #[tokio::test]
    async fn test_export_skips_empty_entities() {
        let coordinator = ExportCoordinator::new(registry(), ExportOptions::default());
        let document = coordinator.export(&SubjectId::from(42)).await.unwrap();

        assert_eq!(document.sections.len(), 1);
        assert_eq!(document.sections[0].label, "Account");
        assert_eq!(document.sections[0].columns, vec!["email", "Plan"]);
        assert_eq!(
            document.sections[0].rows,
            vec![vec![json!("a@x.com"), json!("pro")]]
        );
    }

    #[tokio::test]
    async fn test_export_artifact_summary_and_checksum() {
        let options = ExportOptions {
            include_checksum: true,
            ..ExportOptions::default()
        };
        let coordinator = ExportCoordinator::new(registry(), options);
        let artifact = coordinator
            .export_artifact(&SubjectId::from(42))
            .await
            .unwrap();

        assert_eq!(
            artifact.content,
            "\"Account\"\n\"email\",\"Plan\"\n\"a@x.com\",\"pro\"\n\n"
        );
        assert_eq!(artifact.summary.entities_total, 2);
        assert_eq!(artifact.summary.sections_written, 1);
        assert_eq!(artifact.summary.rows_written, 1);
        assert_eq!(artifact.summary.entities_skipped, vec!["Session"]);
        assert_eq!(
            artifact.summary.checksum.as_deref(),
            Some(calculate_checksum_bytes(artifact.content.as_bytes()).as_str())
        );
    }

    #[tokio::test]
    async fn test_json_output_format() {
        let options = ExportOptions {
            output_format: OutputFormat::Json,
            ..ExportOptions::default()
        };
        let coordinator = ExportCoordinator::new(registry(), options);
        let artifact = coordinator
            .export_artifact(&SubjectId::from(42))
            .await
            .unwrap();

        let value: serde_json::Value = serde_json::from_str(&artifact.content).unwrap();
        assert_eq!(value["sections"][0]["label"], "Account");
    }

    fn malformed_then_missing() -> Arc<Registry> {
        let dataset = Arc::new(
            JsonDataset::from_value(json!({
                "Account": {"rows": [{"owner_id": 42, "a": {"b": 1}}]}
            }))
            .unwrap(),
        );

        let mut registry = Registry::new();
        registry
            .collect(
                dataset.store("Account"),
                &[] as &[&str],
                &json!({"user_id": "owner_id", "renamed_fields": {"a b c": "Broken"}}),
            )
            .unwrap();
        registry
            .collect(dataset.store("Missing"), &["x"], &json!({"user_id": "owner_id"}))
            .unwrap();
        Arc::new(registry)
    }

    #[tokio::test]
    async fn test_first_failing_entity_stops_the_export() {
        let coordinator =
            ExportCoordinator::new(malformed_then_missing(), ExportOptions::default());
        let err = coordinator.export(&SubjectId::from(42)).await.unwrap_err();

        assert!(matches!(
            err,
            GdprError::Projection(ProjectionError::InvalidFieldPath { ref path, segments: 3 })
                if path == "a b c"
        ));
    }

    #[tokio::test]
    async fn test_parallel_resolution_reports_store_failure_first() {
        let options = ExportOptions {
            parallel_resolution: true,
            ..ExportOptions::default()
        };
        let coordinator = ExportCoordinator::new(malformed_then_missing(), options);
        let err = coordinator.export(&SubjectId::from(42)).await.unwrap_err();

        assert!(matches!(err, GdprError::Resolution(ref e) if e.entity == "Missing"));
    }

    #[test]
    fn test_output_format_from_str() {
        assert_eq!("CSV".parse::<OutputFormat>().unwrap(), OutputFormat::Csv);
        assert_eq!("json".parse::<OutputFormat>().unwrap(), OutputFormat::Json);
        assert!("xml".parse::<OutputFormat>().is_err());
    }
}
