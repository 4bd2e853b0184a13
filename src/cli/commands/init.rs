//! Init command implementation
//!
//! This module implements the `init` command for generating a sample
//! configuration file.

use clap::Args;
use std::fs;
use std::path::Path;

/// Arguments for the init command
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Path where to create the configuration file
    #[arg(short, long, default_value = "gdpr-export.toml")]
    pub output: String,

    /// Overwrite existing file
    #[arg(long)]
    pub force: bool,
}

impl InitArgs {
    /// Execute the init command
    pub async fn execute(&self) -> anyhow::Result<i32> {
        tracing::info!(output = %self.output, "Initializing configuration file");

        println!("📝 Initializing gdpr-export configuration");
        println!();

        if Path::new(&self.output).exists() && !self.force {
            println!("❌ Configuration file already exists: {}", self.output);
            println!("   Use --force to overwrite");
            return Ok(2); // Configuration error exit code
        }

        match fs::write(&self.output, Self::sample_config()) {
            Ok(_) => {
                println!("✅ Configuration file created: {}", self.output);
                println!();
                println!("Next steps:");
                println!("  1. Point [store] data_path at your dataset file");
                println!("  2. Declare one [[entities]] table per entity holding personal data");
                println!("  3. Validate configuration: gdpr-export validate-config");
                println!("  4. Run export: gdpr-export export --subject-id <ID>");
                println!();
                Ok(0)
            }
            Err(e) => {
                println!("❌ Failed to write configuration file");
                println!("   Error: {e}");
                Ok(5) // Fatal error exit code
            }
        }
    }

    /// Sample configuration written by `init`
    pub fn sample_config() -> &'static str {
        r#"# gdpr-export configuration
# Declares which entities hold personal data and how they are exported.

[application]
log_level = "info"

[export]
output_format = "csv"         # csv | json
quote_style = "always"        # always | necessary
parallel_resolution = false
include_checksum = true

[store]
# JSON dataset: { "<Entity>": { "relations": [...], "rows": [...] } }
data_path = "dataset.json"

[logging]
local_enabled = false
local_path = "./logs"
local_rotation = "daily"      # daily | hourly | never

# One table per entity, in the order sections should appear.
# Options: user_id (required), renamed_fields, joins, join, table_name,
# description, include_user_id

[[entities]]
entity = "Account"
fields = ["email", "created_at"]
user_id = "owner_id"
description = "Login and billing details"

[entities.renamed_fields]
subscription_plan = "Plan"

[[entities]]
entity = "Session"
fields = ["started_at"]
user_id = "owner_id"
joins = ["device"]

[entities.renamed_fields]
"device model" = "Device"
"#
    }
}
