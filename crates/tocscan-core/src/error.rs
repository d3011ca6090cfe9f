//! Error types for article loading.

use std::io;
use std::path::PathBuf;

/// Result type alias for tocscan operations.
pub type Result<T> = std::result::Result<T, TocError>;

/// Errors that can occur while loading an article.
///
/// The inference engine itself never fails: an article without a discoverable
/// heading family yields an absent result, not an error.
#[derive(Debug, thiserror::Error)]
pub enum TocError {
    /// Standard I/O error
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// Input file is not valid UTF-8
    #[error("not valid UTF-8: {}", path.display())]
    NonUtf8 {
        /// Path of the offending file
        path: PathBuf,
    },
}
