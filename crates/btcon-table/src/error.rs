//! Error types for table configuration.

use thiserror::Error;

/// Errors raised while configuring a table.
///
/// Rendering itself never fails: oversized cell content is truncated.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TableError {
    /// A fixed column width must be at least 1. Use `None` for auto width.
    #[error("invalid width {width} for column '{header}': fixed widths must be at least 1")]
    InvalidWidth { header: String, width: usize },

    /// A row index past the end of the table.
    #[error("row index {index} out of range for table with {len} rows")]
    RowOutOfRange { index: usize, len: usize },
}

/// Result type for table operations.
pub type Result<T> = std::result::Result<T, TableError>;
