//! Configuration loader with TOML parsing and environment variable overrides

use super::schema::GdprConfig;
use crate::domain::errors::GdprError;
use crate::domain::result::Result;
use regex::Regex;
use std::fs;
use std::path::Path;

/// Loads configuration from a TOML file
///
/// This function:
/// 1. Reads the TOML file
/// 2. Performs environment variable substitution (${VAR} syntax)
/// 3. Parses the TOML into GdprConfig
/// 4. Applies environment variable overrides (GDPR_EXPORT_* prefix)
/// 5. Resolves a relative `store.data_path` against the file's directory
/// 6. Validates the configuration
///
/// # Errors
///
/// Returns an error if:
/// - File cannot be read
/// - TOML parsing fails
/// - A referenced environment variable is not set
/// - Configuration validation fails
///
/// # Examples
///
/// ```no_run
/// use gdpr_export::config::loader::load_config;
///
/// let config = load_config("gdpr-export.toml").expect("Failed to load config");
/// ```
pub fn load_config(path: impl AsRef<Path>) -> Result<GdprConfig> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(GdprError::Configuration(format!(
            "Configuration file not found: {}",
            path.display()
        )));
    }

    let contents = fs::read_to_string(path).map_err(|e| {
        GdprError::Configuration(format!(
            "Failed to read configuration file {}: {}",
            path.display(),
            e
        ))
    })?;

    let mut config = parse_config(&contents)?;

    if let Some(base) = path.parent() {
        resolve_data_path(&mut config, base);
    }

    config.validate().map_err(|e| {
        GdprError::Configuration(format!("Configuration validation failed: {e}"))
    })?;

    Ok(config)
}

/// Parses configuration text without touching the filesystem
///
/// Substitution and overrides are applied; validation is not.
pub fn parse_config(contents: &str) -> Result<GdprConfig> {
    let contents = substitute_env_vars(contents)?;

    let mut config: GdprConfig = toml::from_str(&contents)
        .map_err(|e| GdprError::Configuration(format!("Failed to parse TOML: {e}")))?;

    apply_env_overrides(&mut config)?;
    Ok(config)
}

fn resolve_data_path(config: &mut GdprConfig, base: &Path) {
    let data_path = Path::new(&config.store.data_path);
    if data_path.is_relative() && !base.as_os_str().is_empty() {
        config.store.data_path = base.join(data_path).to_string_lossy().into_owned();
    }
}

/// Substitutes environment variables in the format ${VAR_NAME}
///
/// # Errors
///
/// Returns an error if a referenced environment variable is not set
fn substitute_env_vars(input: &str) -> Result<String> {
    let re = Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}")
        .map_err(|e| GdprError::Other(format!("Invalid substitution pattern: {e}")))?;
    let mut result = String::new();
    let mut missing_vars: Vec<String> = Vec::new();

    for line in input.lines() {
        // Comments keep their placeholders
        if line.trim_start().starts_with('#') {
            result.push_str(line);
            result.push('\n');
            continue;
        }

        let mut processed_line = line.to_string();
        for cap in re.captures_iter(line) {
            let var_name = &cap[1];
            match std::env::var(var_name) {
                Ok(value) => {
                    let placeholder = format!("${{{var_name}}}");
                    processed_line = processed_line.replace(&placeholder, &value);
                }
                Err(_) => {
                    if !missing_vars.iter().any(|v| v == var_name) {
                        missing_vars.push(var_name.to_string());
                    }
                }
            }
        }
        result.push_str(&processed_line);
        result.push('\n');
    }

    if !missing_vars.is_empty() {
        return Err(GdprError::Configuration(format!(
            "Missing required environment variables: {}",
            missing_vars.join(", ")
        )));
    }

    Ok(result)
}

/// Applies environment variable overrides using the GDPR_EXPORT_* prefix
///
/// Variables follow the pattern GDPR_EXPORT_<SECTION>_<KEY>, for example
/// GDPR_EXPORT_STORE_DATA_PATH or GDPR_EXPORT_EXPORT_QUOTE_STYLE.
fn apply_env_overrides(config: &mut GdprConfig) -> Result<()> {
    if let Ok(val) = std::env::var("GDPR_EXPORT_APPLICATION_LOG_LEVEL") {
        config.application.log_level = val;
    }

    if let Ok(val) = std::env::var("GDPR_EXPORT_EXPORT_OUTPUT_FORMAT") {
        config.export.output_format = val.parse()?;
    }
    if let Ok(val) = std::env::var("GDPR_EXPORT_EXPORT_QUOTE_STYLE") {
        config.export.quote_style = val.parse().map_err(GdprError::Configuration)?;
    }
    if let Ok(val) = std::env::var("GDPR_EXPORT_EXPORT_PARALLEL_RESOLUTION") {
        config.export.parallel_resolution =
            parse_bool_override("GDPR_EXPORT_EXPORT_PARALLEL_RESOLUTION", &val)?;
    }
    if let Ok(val) = std::env::var("GDPR_EXPORT_EXPORT_INCLUDE_CHECKSUM") {
        config.export.include_checksum =
            parse_bool_override("GDPR_EXPORT_EXPORT_INCLUDE_CHECKSUM", &val)?;
    }

    if let Ok(val) = std::env::var("GDPR_EXPORT_STORE_DATA_PATH") {
        config.store.data_path = val;
    }

    if let Ok(val) = std::env::var("GDPR_EXPORT_LOGGING_LOCAL_ENABLED") {
        config.logging.local_enabled =
            parse_bool_override("GDPR_EXPORT_LOGGING_LOCAL_ENABLED", &val)?;
    }
    if let Ok(val) = std::env::var("GDPR_EXPORT_LOGGING_LOCAL_PATH") {
        config.logging.local_path = val;
    }
    if let Ok(val) = std::env::var("GDPR_EXPORT_LOGGING_LOCAL_ROTATION") {
        config.logging.local_rotation = val;
    }

    Ok(())
}

fn parse_bool_override(name: &str, value: &str) -> Result<bool> {
    value.trim().parse::<bool>().map_err(|_| {
        GdprError::Configuration(format!(
            "Invalid value '{value}' for {name}. Must be true or false"
        ))
    })
}
