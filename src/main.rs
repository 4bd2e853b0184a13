// gdpr-export - Personal data export tool
// Copyright (c) 2025 gdpr-export Contributors
// Licensed under the MIT License

use clap::Parser;
use gdpr_export::cli::{Cli, Commands};
use gdpr_export::logging::init_logging;
use std::process;

#[tokio::main]
async fn main() {
    // Load environment variables from .env file if present
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    // Console logging goes to stderr; stdout stays reserved for export output
    let (log_level, logging_config) = cli.logging_settings();
    let guard = match init_logging(&log_level, &logging_config) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Failed to initialize logging: {e}");
            process::exit(5);
        }
    };

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        "gdpr-export - Personal data export tool"
    );

    let exit_code = match execute_command(&cli).await {
        Ok(code) => code,
        Err(e) => {
            tracing::error!(error = %e, "Command execution failed");
            eprintln!("Error: {e}");
            5 // Fatal error exit code
        }
    };

    // process::exit skips destructors, flush logs first
    drop(guard);
    process::exit(exit_code);
}

/// Execute the CLI command
async fn execute_command(cli: &Cli) -> anyhow::Result<i32> {
    match &cli.command {
        Commands::Export(args) => args.execute(&cli.config).await,
        Commands::ValidateConfig(args) => args.execute(&cli.config).await,
        Commands::ListEntities(args) => args.execute(&cli.config).await,
        Commands::Init(args) => args.execute().await,
    }
}
