//! External collaborators
//!
//! The export core only sees two capabilities: an [`store::EntityStore`] that
//! returns a subject's rows for one entity type, and a [`sink::RowSink`] that
//! accepts rendered rows. This module defines both and ships the JSON dataset
//! store and CSV/in-memory sinks.

pub mod sink;
pub mod store;
