//! Logging and observability
//!
//! This module provides structured logging with support for:
//! - Configurable log levels
//! - Console output with `RUST_LOG` style filtering
//! - JSON-formatted local log files with rotation
//!
//! # Example
//!
//! ```no_run
//! use gdpr_export::logging::init_logging;
//! use gdpr_export::config::LoggingConfig;
//!
//! let config = LoggingConfig::default();
//! let _guard = init_logging("info", &config).expect("Failed to initialize logging");
//!
//! tracing::info!("Application started");
//! ```

pub mod structured;

// Re-export commonly used items
pub use structured::{init_logging, parse_log_level, LoggingGuard};

/// Log the start of an export
///
/// # Example
///
/// ```no_run
/// use gdpr_export::log_export_start;
/// use gdpr_export::domain::SubjectId;
///
/// let subject_id = SubjectId::from(42);
/// log_export_start!(&subject_id, 3);
/// ```
#[macro_export]
macro_rules! log_export_start {
    ($subject_id:expr, $entities:expr) => {
        tracing::info!(
            subject_id = %$subject_id,
            entities = $entities,
            "Starting export"
        );
    };
}

/// Log the completion of an export
///
/// # Example
///
/// ```no_run
/// use gdpr_export::log_export_complete;
/// use std::time::Duration;
///
/// log_export_complete!(2, 17, Duration::from_millis(40));
/// ```
#[macro_export]
macro_rules! log_export_complete {
    ($sections:expr, $rows:expr, $duration:expr) => {
        tracing::info!(
            sections = $sections,
            rows = $rows,
            duration_ms = $duration.as_millis(),
            "Export completed"
        );
    };
}

/// Log an entity left out of the export because it had no rows
#[macro_export]
macro_rules! log_section_skipped {
    ($entity:expr) => {
        tracing::debug!(entity = %$entity, "No rows for subject, section skipped");
    };
}

/// Log an error with context
///
/// # Example
///
/// ```no_run
/// use gdpr_export::log_error_with_context;
/// use gdpr_export::domain::GdprError;
///
/// let error = GdprError::Configuration("Invalid config".to_string());
/// log_error_with_context!(&error, "Failed to load configuration");
/// ```
#[macro_export]
macro_rules! log_error_with_context {
    ($error:expr, $context:expr) => {
        tracing::error!(
            error = %$error,
            context = $context,
            "Error occurred"
        );
    };
}
