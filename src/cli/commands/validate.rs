//! Validate config command implementation
//!
//! This module implements the `validate-config` command. Besides loading and
//! validating the file, it runs entity registration so malformed
//! `[[entities]]` tables are reported before any export is attempted.

use super::build_registry;
use crate::adapters::store::JsonDataset;
use crate::config::load_config;
use clap::Args;
use std::path::Path;
use std::sync::Arc;

/// Arguments for the validate-config command
#[derive(Args, Debug)]
pub struct ValidateArgs {}

impl ValidateArgs {
    /// Execute the validate-config command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!(config_path = %config_path, "Validating configuration");

        println!("🔍 Validating configuration file: {config_path}");
        println!();

        let config = match load_config(config_path) {
            Ok(c) => {
                println!("✅ Configuration file loaded successfully");
                c
            }
            Err(e) => {
                println!("❌ Failed to load configuration file");
                println!("   Error: {e}");
                return Ok(2); // Configuration error exit code
            }
        };

        // Registration does not read the dataset, an empty one is enough
        let registry = match build_registry(&config, &Arc::new(JsonDataset::default())) {
            Ok(r) => {
                println!("✅ All {} entities registered", r.len());
                r
            }
            Err(e) => {
                println!("❌ Entity registration failed");
                println!("   Error: {e}");
                return Ok(3); // Registration error exit code
            }
        };

        if !Path::new(&config.store.data_path).exists() {
            println!("⚠️  Dataset file not found: {}", config.store.data_path);
        }

        println!();
        println!("Configuration Summary:");
        println!("  Log Level: {}", config.application.log_level);
        println!("  Dataset: {}", config.store.data_path);
        println!("  Output Format: {}", config.export.output_format);
        println!("  Quote Style: {}", config.export.quote_style);
        println!("  Parallel Resolution: {}", config.export.parallel_resolution);
        println!("  Include Checksum: {}", config.export.include_checksum);
        println!("  Entities: {}", registry.len());
        println!();

        Ok(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[tokio::test]
    async fn test_valid_config() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("gdpr-export.toml");
        fs::write(
            &path,
            "[store]\ndata_path = \"data.json\"\n\n[[entities]]\nentity = \"Account\"\nfields = [\"email\"]\nuser_id = \"owner_id\"\n",
        )
        .unwrap();

        let code = ValidateArgs {}
            .execute(&path.to_string_lossy())
            .await
            .unwrap();
        assert_eq!(code, 0);
    }

    #[tokio::test]
    async fn test_unknown_entity_option() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("gdpr-export.toml");
        fs::write(
            &path,
            "[store]\ndata_path = \"data.json\"\n\n[[entities]]\nentity = \"Account\"\nuser_id = \"owner_id\"\ncolour = \"blue\"\n",
        )
        .unwrap();

        let code = ValidateArgs {}
            .execute(&path.to_string_lossy())
            .await
            .unwrap();
        assert_eq!(code, 3);
    }

    #[tokio::test]
    async fn test_missing_file() {
        let code = ValidateArgs {}
            .execute("does-not-exist.toml")
            .await
            .unwrap();
        assert_eq!(code, 2);
    }
}
