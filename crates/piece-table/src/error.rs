//! Error type shared by every fallible document operation.

use std::path::PathBuf;

use thiserror::Error;

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors produced by the piece table.
///
/// Argument errors are detected before the document is touched, so a call
/// that returns one of them leaves content, undo stack and redo stack as
/// they were.
#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid argument: {0}")]
    /// Malformed call arguments.
    InvalidArgument(&'static str),

    #[error("offset {offset} with length {len} is out of range for a document of {doc_len} bytes")]
    /// An offset, or `offset + len`, lies beyond the end of the document.
    OutOfRange {
        /// Requested start offset.
        offset: usize,
        /// Requested length (0 for single-position lookups).
        len: usize,
        /// Document length at the time of the call.
        doc_len: usize,
    },

    #[error("invalid sub-piece range {start}..={end} for a piece of {piece_len} bytes")]
    /// Inclusive sub-piece bounds that do not fit inside the source piece.
    InvalidRange {
        /// Inclusive start within the piece.
        start: usize,
        /// Inclusive end within the piece.
        end: usize,
        /// Length of the piece being split.
        piece_len: usize,
    },

    #[error("I/O error on {}: {source}", .path.display())]
    /// Loading or saving the backing file failed.
    Resource {
        /// File being loaded or saved.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },
}

impl Error {
    pub(crate) fn out_of_range(offset: usize, len: usize, doc_len: usize) -> Self {
        Error::OutOfRange {
            offset,
            len,
            doc_len,
        }
    }
}
