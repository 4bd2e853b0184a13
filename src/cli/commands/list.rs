//! List entities command implementation
//!
//! Prints the configured entities in the order their sections appear in an
//! export.

use super::build_registry;
use crate::adapters::store::JsonDataset;
use crate::config::load_config;
use crate::core::registry::{EntityDescriptor, Registry};
use clap::Args;
use std::sync::Arc;

/// Arguments for the list-entities command
#[derive(Args, Debug)]
pub struct ListArgs {
    /// Also print the field path behind each column
    #[arg(long)]
    pub verbose: bool,
}

impl ListArgs {
    /// Execute the list-entities command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        let config = match load_config(config_path) {
            Ok(c) => c,
            Err(e) => {
                println!("❌ Failed to load configuration file");
                println!("   Error: {e}");
                return Ok(2);
            }
        };

        let registry = match build_registry(&config, &Arc::new(JsonDataset::default())) {
            Ok(r) => r,
            Err(e) => {
                println!("❌ Entity registration failed");
                println!("   Error: {e}");
                return Ok(3);
            }
        };

        print!("{}", self.render(&registry));
        Ok(0)
    }

    fn render(&self, registry: &Registry) -> String {
        if registry.is_empty() {
            return "No entities registered\n".to_string();
        }

        registry
            .all()
            .iter()
            .enumerate()
            .map(|(index, descriptor)| self.render_entry(index + 1, descriptor))
            .collect()
    }

    fn render_entry(&self, position: usize, descriptor: &EntityDescriptor) -> String {
        let mut out = format!("{position}. {}", descriptor.name());
        if descriptor.name() != descriptor.entity_type() {
            out.push_str(&format!(" ({})", descriptor.entity_type()));
        }
        out.push('\n');

        out.push_str(&format!("   subject field: {}\n", descriptor.subject_id_field()));
        if let Some(description) = descriptor.description() {
            out.push_str(&format!("   description: {description}\n"));
        }
        if !descriptor.relations().is_empty() {
            out.push_str(&format!("   joins: {}\n", descriptor.relations().join(", ")));
        }

        if self.verbose {
            out.push_str("   columns:\n");
            for (column, path) in descriptor
                .output_columns()
                .iter()
                .zip(descriptor.query_fields())
            {
                out.push_str(&format!("     {column} <- {path}\n"));
            }
        } else {
            out.push_str(&format!(
                "   columns: {}\n",
                descriptor.output_columns().join(", ")
            ));
        }

        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn registry() -> Registry {
        let dataset = Arc::new(JsonDataset::default());
        let mut registry = Registry::new();
        registry
            .collect(
                dataset.store("Account"),
                &["email"],
                &json!({"user_id": "owner_id", "table_name": "Accounts"}),
            )
            .unwrap();
        registry
            .collect(
                dataset.store("Session"),
                &["started_at"],
                &json!({
                    "user_id": "owner_id",
                    "joins": ["device"],
                    "renamed_fields": {"device model": "Device"}
                }),
            )
            .unwrap();
        registry
    }

    #[test]
    fn test_render_lists_in_registration_order() {
        let out = ListArgs { verbose: false }.render(&registry());
        let account = out.find("1. Accounts (Account)").unwrap();
        let session = out.find("2. Session").unwrap();
        assert!(account < session);
        assert!(out.contains("   joins: device\n"));
        assert!(out.contains("   columns: started_at, Device\n"));
    }

    #[test]
    fn test_render_verbose_shows_paths() {
        let out = ListArgs { verbose: true }.render(&registry());
        assert!(out.contains("     Device <- device model\n"));
    }

    #[test]
    fn test_render_empty_registry() {
        let out = ListArgs { verbose: false }.render(&Registry::new());
        assert_eq!(out, "No entities registered\n");
    }
}
