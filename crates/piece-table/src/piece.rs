//! Pieces: `(store, offset, len)` references into one byte store.

use crate::error::{Error, Result};
use crate::store::StoreKind;

/// A contiguous span of one byte store.
///
/// Pieces are values; producing a sub-range always yields a new piece.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Piece {
    /// Store the bytes live in
    pub store: StoreKind,
    /// Start offset inside the store
    pub offset: usize,
    /// Length in bytes
    pub len: usize,
}

impl Piece {
    /// Create a new piece.
    pub fn new(store: StoreKind, offset: usize, len: usize) -> Self {
        Self { store, offset, len }
    }

    /// Sub-piece covering the inclusive local range `[start, end]`.
    ///
    /// ```rust
    /// use piece_table::{Piece, StoreKind};
    ///
    /// let piece = Piece::new(StoreKind::Add, 10, 6);
    /// let tail = piece.split(2, 5).unwrap();
    /// assert_eq!(tail, Piece::new(StoreKind::Add, 12, 4));
    /// ```
    pub fn split(&self, start: usize, end: usize) -> Result<Piece> {
        if end < start || end >= self.len {
            return Err(Error::InvalidRange {
                start,
                end,
                piece_len: self.len,
            });
        }
        Ok(Piece::new(self.store, self.offset + start, end - start + 1))
    }

    /// Exclusive end offset inside the store.
    pub fn end(&self) -> usize {
        self.offset + self.len
    }
}
