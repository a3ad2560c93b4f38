//! Error types for content-model operations

use thiserror::Error;

/// Errors raised by structural operations on blocks and sections
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ModelError {
    /// A table-only operation was applied to a different block kind
    #[error("operation requires a table block")]
    NotATable,

    /// A column index does not exist in the table
    #[error("column index {index} out of range for a table with {width} columns")]
    ColumnOutOfRange {
        /// The requested column index
        index: usize,
        /// Current number of columns
        width: usize,
    },

    /// Removing the only remaining column would leave an empty table
    #[error("a table must keep at least one column")]
    LastColumn,
}
