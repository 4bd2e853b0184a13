//! Export command implementation
//!
//! This module implements the `export` command, which writes every
//! registered entity's data for one subject to a file or stdout.

use super::build_registry;
use crate::adapters::sink::QuoteStyle;
use crate::adapters::store::JsonDataset;
use crate::config::load_config;
use crate::core::export::{ExportCoordinator, ExportOptions, OutputFormat};
use crate::domain::ids::SubjectId;
use crate::log_error_with_context;
use clap::Args;
use std::io::Write;
use std::sync::Arc;

/// Arguments for the export command
#[derive(Args, Debug)]
pub struct ExportArgs {
    /// Identifier of the data subject
    #[arg(long, value_name = "ID")]
    pub subject_id: String,

    /// Write the export to this file instead of stdout
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<String>,

    /// Override output format (csv or json)
    #[arg(long, value_name = "FORMAT")]
    pub format: Option<String>,

    /// Override CSV quoting (always or necessary)
    #[arg(long, value_name = "STYLE")]
    pub quote: Option<String>,

    /// Resolve entities concurrently
    #[arg(long)]
    pub parallel: bool,
}

impl ExportArgs {
    /// Execute the export command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!("Starting export command");

        let mut config = match load_config(config_path) {
            Ok(c) => c,
            Err(e) => {
                log_error_with_context!(&e, "Failed to load configuration");
                eprintln!("Configuration error: {e}");
                return Ok(2); // Configuration error exit code
            }
        };

        // Apply CLI overrides
        if let Some(format) = &self.format {
            match format.parse::<OutputFormat>() {
                Ok(f) => {
                    tracing::info!(format = %format, "Overriding output format from CLI");
                    config.export.output_format = f;
                }
                Err(e) => {
                    eprintln!("{e}");
                    return Ok(2);
                }
            }
        }

        if let Some(quote) = &self.quote {
            match quote.parse::<QuoteStyle>() {
                Ok(q) => {
                    tracing::info!(quote = %quote, "Overriding quote style from CLI");
                    config.export.quote_style = q;
                }
                Err(e) => {
                    eprintln!("{e}");
                    return Ok(2);
                }
            }
        }

        if self.parallel {
            config.export.parallel_resolution = true;
        }

        let subject_id = match SubjectId::new(self.subject_id.as_str()) {
            Ok(id) => id,
            Err(e) => {
                eprintln!("Invalid subject id: {e}");
                return Ok(2);
            }
        };

        let dataset = match JsonDataset::from_file(&config.store.data_path) {
            Ok(d) => Arc::new(d),
            Err(e) => {
                log_error_with_context!(&e, "Failed to open dataset");
                eprintln!("Failed to open dataset: {e}");
                return Ok(5); // Fatal error exit code
            }
        };

        let registry = match build_registry(&config, &dataset) {
            Ok(r) => Arc::new(r),
            Err(e) => {
                log_error_with_context!(&e, "Entity registration failed");
                eprintln!("Registration error: {e}");
                return Ok(3); // Registration error exit code
            }
        };

        let coordinator =
            ExportCoordinator::new(registry, ExportOptions::from_config(&config.export));

        let artifact = match coordinator.export_artifact(&subject_id).await {
            Ok(a) => a,
            Err(e) => {
                log_error_with_context!(&e, "Export failed");
                eprintln!("Export failed: {e}");
                return Ok(5); // Fatal error exit code
            }
        };

        match &self.output {
            Some(path) => {
                std::fs::write(path, artifact.content.as_bytes())?;
                tracing::info!(path = %path, "Export written to file");
            }
            None => {
                let mut stdout = std::io::stdout().lock();
                stdout.write_all(artifact.content.as_bytes())?;
                stdout.flush()?;
            }
        }

        let summary = &artifact.summary;
        eprintln!();
        eprintln!("Export Summary:");
        eprintln!("  Subject: {}", summary.subject_id);
        eprintln!(
            "  Sections: {} of {} entities",
            summary.sections_written, summary.entities_total
        );
        eprintln!("  Rows: {}", summary.rows_written);
        if !summary.entities_skipped.is_empty() {
            eprintln!("  Without data: {}", summary.entities_skipped.join(", "));
        }
        if let Some(checksum) = &summary.checksum {
            eprintln!("  SHA-256: {checksum}");
        }
        eprintln!("  Duration: {}ms", summary.duration.as_millis());
        if summary.is_empty() {
            eprintln!("  No personal data found for this subject");
        }

        Ok(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::Path;

    fn write_fixture(dir: &Path, dataset: &str, entities: &str) -> String {
        fs::write(dir.join("data.json"), dataset).unwrap();
        let config_path = dir.join("gdpr-export.toml");
        fs::write(
            &config_path,
            format!("[store]\ndata_path = \"data.json\"\n\n{entities}"),
        )
        .unwrap();
        config_path.to_string_lossy().into_owned()
    }

    fn args(subject_id: &str, output: &Path) -> ExportArgs {
        ExportArgs {
            subject_id: subject_id.to_string(),
            output: Some(output.to_string_lossy().into_owned()),
            format: None,
            quote: None,
            parallel: false,
        }
    }

    const DATASET: &str = r#"{
        "Account": {"rows": [{"owner_id": 42, "email": "a@x.com", "subscription_plan": "pro"}]}
    }"#;

    const ENTITIES: &str = r#"
[[entities]]
entity = "Account"
fields = ["email"]
user_id = "owner_id"

[entities.renamed_fields]
subscription_plan = "Plan"
"#;

    #[tokio::test]
    async fn test_export_writes_output_file() {
        let dir = tempfile::tempdir().unwrap();
        let config = write_fixture(dir.path(), DATASET, ENTITIES);
        let output = dir.path().join("export.csv");

        let code = args("42", &output).execute(&config).await.unwrap();

        assert_eq!(code, 0);
        assert_eq!(
            fs::read_to_string(&output).unwrap(),
            "\"Account\"\n\"email\",\"Plan\"\n\"a@x.com\",\"pro\"\n\n"
        );
    }

    #[tokio::test]
    async fn test_missing_config_exits_with_config_code() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("export.csv");
        let missing = dir.path().join("missing.toml");

        let code = args("42", &output)
            .execute(&missing.to_string_lossy())
            .await
            .unwrap();
        assert_eq!(code, 2);
        assert!(!output.exists());
    }

    #[tokio::test]
    async fn test_registration_error_exit_code() {
        let dir = tempfile::tempdir().unwrap();
        let config = write_fixture(
            dir.path(),
            DATASET,
            "[[entities]]\nentity = \"Account\"\nfields = [\"email\"]\n",
        );
        let output = dir.path().join("export.csv");

        let code = args("42", &output).execute(&config).await.unwrap();
        assert_eq!(code, 3);
        assert!(!output.exists());
    }

    #[tokio::test]
    async fn test_resolution_failure_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let config = write_fixture(
            dir.path(),
            DATASET,
            &format!("{ENTITIES}\n[[entities]]\nentity = \"Missing\"\nuser_id = \"uid\"\n"),
        );
        let output = dir.path().join("export.csv");

        let code = args("42", &output).execute(&config).await.unwrap();
        assert_eq!(code, 5);
        assert!(!output.exists());
    }

    #[tokio::test]
    async fn test_invalid_format_override() {
        let dir = tempfile::tempdir().unwrap();
        let config = write_fixture(dir.path(), DATASET, ENTITIES);
        let output = dir.path().join("export.xml");

        let mut export = args("42", &output);
        export.format = Some("xml".to_string());
        assert_eq!(export.execute(&config).await.unwrap(), 2);
    }
}
