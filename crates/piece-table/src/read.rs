//! Read access: span traversal, serialization and point reads.
//!
//! Nothing here materializes the document unless asked to; `spans` and
//! `chunks` borrow straight from the stores.

use std::io::{self, Write};

use crate::document::Document;
use crate::error::{Error, Result};
use crate::piece::Piece;

impl Document {
    /// Live pieces in document order, as `(store, offset, len)` spans.
    pub fn spans(&self) -> impl Iterator<Item = Piece> + '_ {
        self.arena.iter(self.pieces).map(|(_, piece)| *piece)
    }

    /// Live content as borrowed byte chunks, one per piece.
    pub fn chunks(&self) -> impl Iterator<Item = &[u8]> + '_ {
        self.spans()
            .map(move |span| self.stores.read(span.store, span.offset, span.len))
    }

    /// Concatenate the whole document.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.len);
        for chunk in self.chunks() {
            out.extend_from_slice(chunk);
        }
        out
    }

    /// Stream the document to `out`, one chunk per piece.
    pub fn write_to<W: Write>(&self, mut out: W) -> io::Result<()> {
        for chunk in self.chunks() {
            out.write_all(chunk)?;
        }
        Ok(())
    }

    /// Copy `len` bytes starting at `offset`, touching only the pieces the
    /// range overlaps.
    pub fn read_range(&self, offset: usize, len: usize) -> Result<Vec<u8>> {
        match offset.checked_add(len) {
            Some(end) if end <= self.len => {}
            _ => return Err(Error::out_of_range(offset, len, self.len)),
        }

        let mut out = Vec::with_capacity(len);
        if len == 0 {
            return Ok(out);
        }

        let start = self.position(offset)?;
        let mut cursor = start.node;
        let mut local = start.offset;
        while out.len() < len {
            let piece = match self.arena.piece(cursor) {
                Some(piece) => *piece,
                None => panic!("range read ran into a sentinel"),
            };
            let take = (piece.len - local).min(len - out.len());
            out.extend_from_slice(self.stores.read(piece.store, piece.offset + local, take));
            local = 0;
            cursor = self.arena.expect_next(cursor);
        }
        Ok(out)
    }

    /// The byte at `offset`.
    pub fn byte_at(&self, offset: usize) -> Result<u8> {
        if offset >= self.len {
            return Err(Error::out_of_range(offset, 1, self.len));
        }
        let pos = self.position(offset)?;
        let piece = match self.arena.piece(pos.node) {
            Some(piece) => *piece,
            None => panic!("in-range offset {offset} resolved to a sentinel"),
        };
        Ok(self.stores.read(piece.store, piece.offset + pos.offset, 1)[0])
    }

    /// Decode the UTF-8 code point starting at `offset`.
    ///
    /// Returns the character and its width in bytes. A malformed or
    /// truncated sequence decodes to `U+FFFD` with width 1, so callers can
    /// always make progress.
    pub fn codepoint_at(&self, offset: usize) -> Result<(char, usize)> {
        let lead = self.byte_at(offset)?;
        let width = utf8_width(lead);
        if width == 0 || offset + width > self.len {
            return Ok((char::REPLACEMENT_CHARACTER, 1));
        }
        let bytes = self.read_range(offset, width)?;
        Ok(std::str::from_utf8(&bytes)
            .ok()
            .and_then(|s| s.chars().next())
            .map_or((char::REPLACEMENT_CHARACTER, 1), |c| (c, width)))
    }
}

/// Encoded length implied by a UTF-8 lead byte; 0 if it cannot start one.
fn utf8_width(lead: u8) -> usize {
    match lead {
        0x00..=0x7F => 1,
        0xC2..=0xDF => 2,
        0xE0..=0xEF => 3,
        0xF0..=0xF4 => 4,
        _ => 0,
    }
}
