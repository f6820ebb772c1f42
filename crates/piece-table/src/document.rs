//! The document: live piece list, edit engine and history.
//!
//! Every structural edit follows the same shape:
//!
//! 1. resolve the edit boundaries to [`Position`]s;
//! 2. describe the affected stretch of the live list as an *anchored* range
//!    bounded by its untouched neighbours;
//! 3. build a detached replacement range (split fragments of the boundary
//!    pieces plus, for inserts, the new Add piece);
//! 4. swap the two, which splices the replacement in and
//!    leaves the displaced pieces owned by the detached range;
//! 5. push both ranges onto the undo stack as one change.
//!
//! Undo and redo repeat step 4 on the stored pair.

use std::collections::HashSet;

use tracing::trace;

use crate::arena::{NodeId, PieceArena, PieceRange};
use crate::config::DocumentConfig;
use crate::error::{Error, Result};
use crate::history::{Change, History};
use crate::piece::Piece;
use crate::position::{self, Position};
use crate::store::{OriginalStore, StoreKind, Stores};

/// A byte-addressed text buffer backed by a piece table.
///
/// # Example
///
/// ```rust
/// use piece_table::Document;
///
/// let mut doc = Document::from_text("hello world");
/// doc.insert(5, b",").unwrap();
/// doc.delete(0, 6).unwrap();
/// assert_eq!(doc.to_bytes(), b" world");
///
/// doc.undo();
/// assert_eq!(doc.to_bytes(), b"hello, world");
/// doc.redo();
/// assert_eq!(doc.len(), 6);
/// ```
#[derive(Debug)]
pub struct Document {
    config: DocumentConfig,
    pub(crate) stores: Stores,
    pub(crate) arena: PieceArena,
    /// Live piece list; its sentinels never change identity.
    pub(crate) pieces: PieceRange,
    /// Sum of all live piece lengths.
    pub(crate) len: usize,
    history: History,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    /// Create an empty document.
    pub fn new() -> Self {
        Self::with_config(DocumentConfig::default())
    }

    /// Create an empty document with custom settings.
    pub fn with_config(config: DocumentConfig) -> Self {
        Self::from_store(OriginalStore::Empty, config)
    }

    /// Create a document whose Original store holds `bytes`.
    pub fn from_bytes(bytes: impl Into<Vec<u8>>) -> Self {
        Self::from_bytes_with_config(bytes, DocumentConfig::default())
    }

    /// [`Document::from_bytes`] with custom settings.
    pub fn from_bytes_with_config(bytes: impl Into<Vec<u8>>, config: DocumentConfig) -> Self {
        Self::from_store(OriginalStore::from(bytes.into()), config)
    }

    /// Create a document from UTF-8 text.
    pub fn from_text(text: &str) -> Self {
        Self::from_bytes(text.as_bytes())
    }

    /// Build the live list over an already loaded Original store: one piece
    /// spanning the whole store, or nothing if it is empty.
    pub(crate) fn from_store(original: OriginalStore, config: DocumentConfig) -> Self {
        let mut arena = PieceArena::new();
        let pieces = arena.new_range();
        let len = original.len();
        if len > 0 {
            let id = arena.alloc(Piece::new(StoreKind::Original, 0, len));
            arena.append_piece(pieces, id);
        }

        Self {
            config,
            stores: Stores::new(original, config.add_store_capacity),
            arena,
            pieces,
            len,
            history: History::new(config.undo_limit),
        }
    }
}

impl Document {
    /// Document length in bytes.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the document holds no bytes.
    pub fn is_empty(&self) -> bool {
        self.arena.is_empty(self.pieces)
    }

    /// Number of pieces in the live list.
    pub fn piece_count(&self) -> usize {
        self.arena.iter(self.pieces).count()
    }

    /// Bytes ever appended to the Add store (deleted text included).
    pub fn add_store_len(&self) -> usize {
        self.stores.add().len()
    }

    /// The backing stores.
    pub fn stores(&self) -> &Stores {
        &self.stores
    }

    /// Settings this document was created with.
    pub fn config(&self) -> &DocumentConfig {
        &self.config
    }

    /// Whether [`Document::undo`] would change anything.
    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    /// Whether [`Document::redo`] would change anything.
    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    /// Number of changes on the undo stack.
    pub fn undo_depth(&self) -> usize {
        self.history.undo_depth()
    }

    /// Number of changes on the redo stack.
    pub fn redo_depth(&self) -> usize {
        self.history.redo_depth()
    }

    /// Resolve a document offset. `offset == len()` yields the
    /// end-of-document position.
    pub fn position(&self, offset: usize) -> Result<Position> {
        if offset > self.len {
            return Err(Error::out_of_range(offset, 0, self.len));
        }
        position::find(&self.arena, self.first(), offset)
            .ok_or_else(|| Error::out_of_range(offset, 0, self.len))
    }

    fn first(&self) -> NodeId {
        self.arena.expect_next(self.pieces.head)
    }
}

impl Document {
    /// Insert `bytes` at `offset`.
    ///
    /// Empty `bytes` is a no-op. An `offset` past the end fails with
    /// [`Error::OutOfRange`] and leaves the document untouched.
    pub fn insert(&mut self, offset: usize, bytes: &[u8]) -> Result<()> {
        if bytes.is_empty() {
            return Ok(());
        }
        let pos = self.position(offset)?;

        if self.config.coalesce_appends
            && let Some(node) = self.coalescible(pos)
        {
            self.extend_piece(node, bytes);
            trace!(offset, len = bytes.len(), doc_len = self.len, "insert (coalesced)");
            return Ok(());
        }

        let add_offset = self.stores.add.append(bytes);
        let inserted = self
            .arena
            .alloc(Piece::new(StoreKind::Add, add_offset, bytes.len()));
        let replacement = self.arena.new_range();

        let splice = if pos.offset == 0 {
            // Piece boundary (or end of document): nothing is displaced.
            let prev = self.arena.expect_prev(pos.node);
            self.arena.append_piece(replacement, inserted);
            self.arena.anchored_range(prev, pos.node)
        } else {
            let piece_len = self.arena.piece_len(pos.node);
            let prefix = self.fragment(pos.node, 0, pos.offset - 1);
            let suffix = self.fragment(pos.node, pos.offset, piece_len - 1);
            self.arena.append_piece(replacement, prefix);
            self.arena.append_piece(replacement, inserted);
            self.arena.append_piece(replacement, suffix);
            let prev = self.arena.expect_prev(pos.node);
            let next = self.arena.expect_next(pos.node);
            self.arena.anchored_range(prev, next)
        };

        self.commit(splice, replacement);
        trace!(offset, len = bytes.len(), doc_len = self.len, "insert");
        Ok(())
    }

    /// Delete `len` bytes starting at `offset`.
    ///
    /// `len == 0` is a no-op. A span reaching past the end fails with
    /// [`Error::OutOfRange`] and leaves the document untouched.
    pub fn delete(&mut self, offset: usize, len: usize) -> Result<()> {
        if len == 0 {
            return Ok(());
        }
        match offset.checked_add(len) {
            Some(end) if end <= self.len => {}
            _ => return Err(Error::out_of_range(offset, len, self.len)),
        }

        let begin = self.position(offset)?;
        let end = match position::find(&self.arena, begin.node, begin.offset + len - 1) {
            Some(end) => end,
            None => panic!("delete end resolved past the document after validation"),
        };

        let prev = self.arena.expect_prev(begin.node);
        let next = self.arena.expect_next(end.node);
        let splice = self.arena.anchored_range(prev, next);
        let replacement = self.arena.new_range();

        if begin.offset != 0 {
            let prefix = self.fragment(begin.node, 0, begin.offset - 1);
            self.arena.append_piece(replacement, prefix);
        }
        let end_len = self.arena.piece_len(end.node);
        if end.offset != end_len - 1 {
            let suffix = self.fragment(end.node, end.offset + 1, end_len - 1);
            self.arena.append_piece(replacement, suffix);
        }

        self.commit(splice, replacement);
        trace!(offset, len, doc_len = self.len, "delete");
        Ok(())
    }

    /// Revert the most recent edit. Returns `false` if there was none.
    pub fn undo(&mut self) -> bool {
        let changed = self.history.undo(&mut self.arena, &mut self.len);
        if changed {
            trace!(doc_len = self.len, "undo");
        }
        changed
    }

    /// Reapply the most recently undone edit. Returns `false` if there was none.
    pub fn redo(&mut self) -> bool {
        let changed = self.history.redo(&mut self.arena, &mut self.len);
        if changed {
            trace!(doc_len = self.len, "redo");
        }
        changed
    }

    /// New piece for the inclusive sub-range of `node`. Bounds come from
    /// already validated positions, so a failure here means the structure
    /// itself is broken.
    fn fragment(&mut self, node: NodeId, start: usize, end: usize) -> NodeId {
        match self.arena.split(node, start, end) {
            Ok(id) => id,
            Err(err) => panic!("piece table invariant violated: {err}"),
        }
    }

    /// Swap `replacement` into the document at `splice` and record the change.
    fn commit(&mut self, splice: PieceRange, replacement: PieceRange) {
        let removed = self.range_len(splice);
        let inserted = self.range_len(replacement);

        self.arena.swap(splice, replacement);
        self.len = self.len - removed + inserted;

        self.history.record(
            Change::Splice {
                new: splice,
                old: replacement,
                new_len: inserted,
                old_len: removed,
            },
            &mut self.arena,
        );
    }

    fn range_len(&self, range: PieceRange) -> usize {
        self.arena.iter(range).map(|(_, piece)| piece.len).sum()
    }

    /// The piece ending right before `pos`, if it is the most recently
    /// appended Add piece and can simply grow.
    fn coalescible(&self, pos: Position) -> Option<NodeId> {
        if pos.offset != 0 {
            return None;
        }
        let prev = self.arena.expect_prev(pos.node);
        let piece = self.arena.piece(prev)?;
        (piece.store == StoreKind::Add && piece.end() == self.stores.add.len()).then_some(prev)
    }

    fn extend_piece(&mut self, node: NodeId, bytes: &[u8]) {
        self.stores.add.append(bytes);
        let piece = self.arena.piece_mut(node);
        let old_len = piece.len;
        piece.len += bytes.len();
        let new_len = piece.len;
        self.len += bytes.len();

        self.history.record(
            Change::Extend {
                node,
                new_len,
                old_len,
            },
            &mut self.arena,
        );
    }
}

impl Document {
    /// Walk the whole structure and panic on any broken invariant.
    ///
    /// Checked: link symmetry and sentinel discipline of the live list and
    /// of every detached range held by the history, piece bounds against the
    /// stores, the cached length against the sum of live pieces, and that
    /// every allocated node is owned by exactly one list.
    pub fn check_invariants(&self) {
        let mut owned = HashSet::new();

        assert_eq!(self.arena.prev(self.pieces.head), None, "live head has a predecessor");
        assert_eq!(self.arena.next(self.pieces.tail), None, "live tail has a successor");
        let live = self.walk(self.pieces, &mut owned);
        assert_eq!(live, self.len, "cached length differs from live pieces");

        for change in self.history.changes() {
            if let Some(range) = change.detached() {
                self.walk(range, &mut owned);
            }
        }

        assert_eq!(
            owned.len(),
            self.arena.allocated(),
            "allocated nodes not owned by any list"
        );
    }

    fn walk(&self, range: PieceRange, owned: &mut HashSet<NodeId>) -> usize {
        assert!(!range.anchored, "walked ranges must own their sentinels");
        assert!(self.arena.piece(range.head).is_none(), "head is not a sentinel");
        assert!(self.arena.piece(range.tail).is_none(), "tail is not a sentinel");
        assert!(owned.insert(range.head), "sentinel {:?} owned twice", range.head);

        let mut total = 0;
        let mut prev = range.head;
        let mut cursor = self.arena.expect_next(range.head);
        while cursor != range.tail {
            assert_eq!(self.arena.prev(cursor), Some(prev), "broken back-link at {cursor:?}");
            let piece = match self.arena.piece(cursor) {
                Some(piece) => piece,
                None => panic!("sentinel {cursor:?} inside a chain"),
            };
            assert!(piece.len > 0, "empty piece at {cursor:?}");
            let store_len = match piece.store {
                StoreKind::Original => self.stores.original().len(),
                StoreKind::Add => self.stores.add().len(),
            };
            assert!(piece.end() <= store_len, "piece {piece:?} exceeds its store");
            assert!(owned.insert(cursor), "piece node {cursor:?} owned twice");

            total += piece.len;
            prev = cursor;
            cursor = self.arena.expect_next(cursor);
        }
        assert_eq!(self.arena.prev(range.tail), Some(prev), "broken tail back-link");
        assert!(owned.insert(range.tail), "sentinel {:?} owned twice", range.tail);
        total
    }
}
