//! Error types for the export pipeline.

use thiserror::Error;

/// Result type alias for export operations.
pub type Result<T> = std::result::Result<T, ExportError>;

/// Errors surfaced to the caller of an export.
///
/// Recoverable problems (a malformed chart descriptor, one block that fails
/// to rasterize, a background image that cannot be loaded) never reach this
/// type; they are logged and skipped inside the pipeline.
#[derive(Error, Debug)]
pub enum ExportError {
    /// The export was aborted through its [`CancelToken`](crate::cancel::CancelToken).
    #[error("export cancelled")]
    Cancelled,

    /// The export root is missing or has no size.
    #[error("export root is empty: {0}")]
    EmptyRoot(String),

    /// The output writer failed.
    #[error("rendering failed: {0}")]
    Render(String),

    /// A DOM snapshot could not be read.
    #[error("invalid DOM snapshot: {0}")]
    Snapshot(String),

    /// Filesystem error while reading inputs or writing outputs.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<serde_json::Error> for ExportError {
    fn from(err: serde_json::Error) -> Self {
        ExportError::Snapshot(err.to_string())
    }
}
