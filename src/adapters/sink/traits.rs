//! Output sink trait

use crate::domain::Result;
use serde_json::Value;

/// Destination for the rows of an export document
///
/// The sink owns the byte format (delimiter, quoting). An empty slice is the
/// blank separator row between sections.
pub trait RowSink {
    /// Writes one row of cells
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying writer fails.
    fn write_row(&mut self, cells: &[Value]) -> Result<()>;

    /// Flushes buffered output
    fn finish(&mut self) -> Result<()> {
        Ok(())
    }
}
