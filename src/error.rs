//! Error types

use thiserror::Error;

/// Errors returned by the programmatic table API.
///
/// Rendering and key handling never fail; these only surface when a caller
/// refers to a column, filter, action or row that the table does not have.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// No column with this key is configured.
    #[error("unknown column `{0}`")]
    UnknownColumn(String),

    /// The column exists but was not declared sortable.
    #[error("column `{0}` is not sortable")]
    NotSortable(String),

    /// No filter with this key is configured.
    #[error("unknown filter `{0}`")]
    UnknownFilter(String),

    /// The value is not one of the filter's options.
    #[error("filter `{filter}` has no option `{value}`")]
    UnknownFilterOption {
        /// Filter key.
        filter: String,
        /// Rejected value.
        value: String,
    },

    /// No visible action with this id exists for the row.
    #[error("unknown action `{0}`")]
    UnknownAction(String),

    /// The page-local position does not hold a row.
    #[error("no row at page position {0}")]
    RowOutOfRange(usize),

    /// Copying to the system clipboard failed.
    #[error("clipboard: {0}")]
    Clipboard(String),
}

/// Result alias using the crate error.
pub type Result<T> = std::result::Result<T, Error>;
