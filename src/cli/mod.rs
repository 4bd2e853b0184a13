//! CLI interface and argument parsing
//!
//! This module provides the command-line interface for gdpr-export using clap.

pub mod commands;

use crate::config::{load_config, LoggingConfig};
use clap::{Parser, Subcommand};

/// gdpr-export - Personal data export for a single data subject
#[derive(Parser, Debug)]
#[command(name = "gdpr-export")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(
        short,
        long,
        default_value = "gdpr-export.toml",
        env = "GDPR_EXPORT_CONFIG"
    )]
    pub config: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "GDPR_EXPORT_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Log level and logging settings for this invocation
    ///
    /// Taken from the configuration file, with `--log-level` winning over
    /// `application.log_level`. `init`, and any command whose configuration
    /// does not load, get console-only logging at the CLI level or `info`.
    pub fn logging_settings(&self) -> (String, LoggingConfig) {
        let config = match self.command {
            Commands::Init(_) => None,
            _ => load_config(&self.config).ok(),
        };

        match config {
            Some(config) => (
                self.log_level
                    .clone()
                    .unwrap_or(config.application.log_level),
                config.logging,
            ),
            None => (
                self.log_level.clone().unwrap_or_else(|| "info".to_string()),
                LoggingConfig::default(),
            ),
        }
    }
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Export every registered entity's data for one subject
    Export(commands::export::ExportArgs),

    /// Validate configuration file and entity registrations
    ValidateConfig(commands::validate::ValidateArgs),

    /// List registered entities in export order
    ListEntities(commands::list::ListArgs),

    /// Initialize a new configuration file
    Init(commands::init::InitArgs),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parse_export() {
        let cli = Cli::parse_from(["gdpr-export", "export", "--subject-id", "42"]);
        assert_eq!(cli.config, "gdpr-export.toml");
        match cli.command {
            Commands::Export(args) => assert_eq!(args.subject_id, "42"),
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_cli_export_requires_subject() {
        let result = Cli::try_parse_from(["gdpr-export", "export"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_cli_parse_with_config() {
        let cli = Cli::parse_from([
            "gdpr-export",
            "--config",
            "custom.toml",
            "export",
            "--subject-id",
            "7",
        ]);
        assert_eq!(cli.config, "custom.toml");
    }

    #[test]
    fn test_cli_parse_with_log_level() {
        let cli = Cli::parse_from(["gdpr-export", "--log-level", "debug", "list-entities"]);
        assert_eq!(cli.log_level, Some("debug".to_string()));
    }

    #[test]
    fn test_cli_parse_validate_config() {
        let cli = Cli::parse_from(["gdpr-export", "validate-config"]);
        assert!(matches!(cli.command, Commands::ValidateConfig(_)));
    }

    #[test]
    fn test_cli_parse_list_entities() {
        let cli = Cli::parse_from(["gdpr-export", "list-entities"]);
        assert!(matches!(cli.command, Commands::ListEntities(_)));
    }

    fn config_with_logging(dir: &std::path::Path) -> String {
        let path = dir.join("gdpr-export.toml");
        std::fs::write(
            &path,
            format!(
                "[application]\nlog_level = \"warn\"\n\n[store]\ndata_path = \"data.json\"\n\n\
                 [logging]\nlocal_enabled = true\nlocal_path = '{}'\nlocal_rotation = \"hourly\"\n",
                dir.join("logs").display()
            ),
        )
        .unwrap();
        path.to_string_lossy().into_owned()
    }

    #[test]
    fn test_logging_settings_follow_config() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_with_logging(dir.path());

        let cli = Cli::parse_from(["gdpr-export", "--config", config.as_str(), "list-entities"]);
        let (level, logging) = cli.logging_settings();
        assert_eq!(level, "warn");
        assert!(logging.local_enabled);
        assert_eq!(logging.local_rotation, "hourly");

        let cli = Cli::parse_from([
            "gdpr-export",
            "--config",
            config.as_str(),
            "--log-level",
            "debug",
            "validate-config",
        ]);
        assert_eq!(cli.logging_settings().0, "debug");
    }

    #[test]
    fn test_logging_settings_fall_back_to_console() {
        let cli = Cli::parse_from([
            "gdpr-export",
            "--config",
            "does-not-exist.toml",
            "list-entities",
        ]);
        let (level, logging) = cli.logging_settings();
        assert_eq!(level, "info");
        assert!(!logging.local_enabled);

        let dir = tempfile::tempdir().unwrap();
        let config = config_with_logging(dir.path());
        let cli = Cli::parse_from(["gdpr-export", "--config", config.as_str(), "init"]);
        assert!(!cli.logging_settings().1.local_enabled);
    }

    #[test]
    fn test_cli_parse_init() {
        let cli = Cli::parse_from(["gdpr-export", "init"]);
        assert!(matches!(cli.command, Commands::Init(_)));
    }
}
