//! Configuration management for gdpr-export.
//!
//! This module provides TOML-based configuration loading, parsing, and validation.
//!
//! # Overview
//!
//! gdpr-export uses a TOML file with support for:
//! - Environment variable substitution (`${VAR_NAME}`)
//! - `GDPR_EXPORT_<SECTION>_<KEY>` overrides
//! - Default values for optional settings
//! - Declarative `[[entities]]` tables that populate the registry
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use gdpr_export::config::load_config;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = load_config("gdpr-export.toml")?;
//!
//! println!("Dataset: {}", config.store.data_path);
//! println!("Entities: {}", config.entities.len());
//! # Ok(())
//! # }
//! ```
//!
//! # Example Configuration
//!
//! ```toml
//! [application]
//! log_level = "info"
//!
//! [export]
//! output_format = "csv"
//! quote_style = "always"
//!
//! [store]
//! data_path = "${GDPR_DATA_DIR}/dataset.json"
//!
//! [[entities]]
//! entity = "Account"
//! fields = ["email", "created_at"]
//! user_id = "owner_id"
//! description = "Login and billing details"
//!
//! [entities.renamed_fields]
//! subscription_plan = "Plan"
//!
//! [[entities]]
//! entity = "Session"
//! fields = ["started_at"]
//! user_id = "owner_id"
//! joins = ["device"]
//!
//! [entities.renamed_fields]
//! "device model" = "Device"
//! ```

pub mod loader;
pub mod schema;

// Re-export commonly used types
pub use loader::{load_config, parse_config};
pub use schema::{
    ApplicationConfig, EntityConfig, ExportConfig, GdprConfig, LoggingConfig, StoreConfig,
};
