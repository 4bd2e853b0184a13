//! Output sinks
//!
//! - [`traits`] - The [`RowSink`] trait sections are rendered into
//! - [`csv`] - CSV writer with a configurable quoting policy
//! - [`memory`] - Recording sink for inspection and tests

pub mod csv;
pub mod memory;
pub mod traits;

pub use csv::{CsvSink, QuoteStyle};
pub use memory::MemorySink;
pub use traits::RowSink;
