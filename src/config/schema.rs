//! Configuration schema types
//!
//! This module defines the configuration structure for gdpr-export.

use crate::adapters::sink::QuoteStyle;
use crate::core::export::OutputFormat;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Main configuration
///
/// This is the root configuration structure that maps to the TOML file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GdprConfig {
    /// Application-level settings
    #[serde(default)]
    pub application: ApplicationConfig,

    /// Export settings
    #[serde(default)]
    pub export: ExportConfig,

    /// Data store settings
    pub store: StoreConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Entities to collect, in export order
    #[serde(default)]
    pub entities: Vec<EntityConfig>,
}

impl GdprConfig {
    /// Validates the configuration
    ///
    /// Entity options are checked when the registry is built; this only
    /// checks what the registry cannot.
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid
    pub fn validate(&self) -> Result<(), String> {
        self.application.validate()?;
        self.store.validate()?;
        self.logging.validate()?;

        for (index, entity) in self.entities.iter().enumerate() {
            entity
                .validate()
                .map_err(|e| format!("entities[{index}]: {e}"))?;
        }

        Ok(())
    }
}

/// Application-level configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicationConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl ApplicationConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.log_level.as_str()) {
            return Err(format!(
                "Invalid log_level '{}'. Must be one of: {}",
                self.log_level,
                valid_levels.join(", ")
            ));
        }
        Ok(())
    }
}

impl Default for ApplicationConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

/// Export configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExportConfig {
    /// Output format (csv or json)
    #[serde(default)]
    pub output_format: OutputFormat,

    /// CSV quoting policy (always or necessary)
    #[serde(default)]
    pub quote_style: QuoteStyle,

    /// Resolve entities concurrently
    #[serde(default)]
    pub parallel_resolution: bool,

    /// Compute a SHA-256 checksum of the rendered document
    #[serde(default)]
    pub include_checksum: bool,
}

/// Data store configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Path of the JSON dataset file
    ///
    /// Relative paths are resolved against the configuration file's directory.
    pub data_path: String,
}

impl StoreConfig {
    fn validate(&self) -> Result<(), String> {
        if self.data_path.trim().is_empty() {
            return Err("store.data_path cannot be empty".to_string());
        }
        Ok(())
    }
}

/// One `[[entities]]` table
///
/// `entity` and `fields` are read here; every other key is kept, in
/// declaration order, as the registration option record.
///
/// ```toml
/// [[entities]]
/// entity = "Account"
/// fields = ["email"]
/// user_id = "owner_id"
/// description = "Account details"
///
/// [entities.renamed_fields]
/// subscription_plan = "Plan"
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntityConfig {
    /// Entity type name in the store
    pub entity: String,

    /// Fields exported unchanged
    #[serde(default)]
    pub fields: Vec<String>,

    /// Registration options (`user_id`, `renamed_fields`, `joins`, ...)
    #[serde(flatten)]
    pub options: Map<String, Value>,
}

impl EntityConfig {
    /// The option record handed to registration
    pub fn params(&self) -> Value {
        Value::Object(self.options.clone())
    }

    fn validate(&self) -> Result<(), String> {
        if self.entity.trim().is_empty() {
            return Err("entity cannot be empty".to_string());
        }
        Ok(())
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Enable local file logging
    #[serde(default)]
    pub local_enabled: bool,

    /// Local log directory
    #[serde(default = "default_local_path")]
    pub local_path: String,

    /// Log rotation strategy
    #[serde(default = "default_local_rotation")]
    pub local_rotation: String,
}

impl LoggingConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_rotations = ["daily", "hourly", "never"];
        if !valid_rotations.contains(&self.local_rotation.as_str()) {
            return Err(format!(
                "Invalid logging.local_rotation '{}'. Must be one of: {}",
                self.local_rotation,
                valid_rotations.join(", ")
            ));
        }

        if self.local_enabled && self.local_path.trim().is_empty() {
            return Err("logging.local_path cannot be empty when local logging is enabled".to_string());
        }

        Ok(())
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            local_enabled: false,
            local_path: default_local_path(),
            local_rotation: default_local_rotation(),
        }
    }
}

// Default value functions
fn default_log_level() -> String {
    "info".to_string()
}

fn default_local_path() -> String {
    "./logs".to_string()
}

fn default_local_rotation() -> String {
    "daily".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn minimal() -> GdprConfig {
        toml::from_str(
            r#"
[store]
data_path = "data.json"
"#,
        )
        .unwrap()
    }

    #[test]
    fn test_default_values() {
        let config = minimal();
        assert_eq!(config.application.log_level, "info");
        assert_eq!(config.export.output_format, OutputFormat::Csv);
        assert_eq!(config.export.quote_style, QuoteStyle::Always);
        assert!(!config.export.parallel_resolution);
        assert!(!config.export.include_checksum);
        assert!(!config.logging.local_enabled);
        assert!(config.entities.is_empty());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_application_config_validation() {
        let mut config = ApplicationConfig::default();
        assert!(config.validate().is_ok());

        config.log_level = "invalid".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_store_config_validation() {
        let config = StoreConfig {
            data_path: " ".to_string(),
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_logging_config_validation() {
        let mut config = LoggingConfig::default();
        assert!(config.validate().is_ok());

        config.local_rotation = "weekly".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_export_enums_parse() {
        let config: GdprConfig = toml::from_str(
            r#"
[export]
output_format = "json"
quote_style = "necessary"
parallel_resolution = true

[store]
data_path = "data.json"
"#,
        )
        .unwrap();
        assert_eq!(config.export.output_format, OutputFormat::Json);
        assert_eq!(config.export.quote_style, QuoteStyle::Necessary);
        assert!(config.export.parallel_resolution);
    }

    #[test]
    fn test_entity_options_keep_declaration_order() {
        let config: GdprConfig = toml::from_str(
            r#"
[store]
data_path = "data.json"

[[entities]]
entity = "Account"
fields = ["email"]
user_id = "owner_id"
table_name = "Accounts"

[entities.renamed_fields]
zeta = "Z"
alpha = "A"
"mid field" = "M"
"#,
        )
        .unwrap();

        let entity = &config.entities[0];
        assert_eq!(entity.entity, "Account");
        assert_eq!(entity.fields, vec!["email"]);

        let params = entity.params();
        assert_eq!(params["user_id"], "owner_id");
        let keys: Vec<&String> = params["renamed_fields"]
            .as_object()
            .unwrap()
            .keys()
            .collect();
        assert_eq!(keys, vec!["zeta", "alpha", "mid field"]);
    }

    #[test]
    fn test_blank_entity_is_invalid() {
        let config: GdprConfig = toml::from_str(
            r#"
[store]
data_path = "data.json"

[[entities]]
entity = ""
user_id = "owner_id"
"#,
        )
        .unwrap();
        let err = config.validate().unwrap_err();
        assert!(err.starts_with("entities[0]"));
    }
}
