//! Undo/redo stacks of reversible changes.
//!
//! A change never copies text. A splice change pairs the range that was put
//! into the document with the range that was taken out; replaying it in
//! either direction is one [`PieceArena::swap`] followed by exchanging the
//! two roles inside the record.

use tracing::debug;

use crate::arena::{NodeId, PieceArena, PieceRange};

/// One reversible edit.
#[derive(Debug, Clone)]
pub enum Change {
    /// Structural edit recorded as a pair of piece ranges.
    ///
    /// `new` holds what the next replay of this change must take *out* of
    /// the document, `old` what it puts back *in*. One of them is anchored
    /// on the document's neighbours of the splice point; the other is a
    /// detached range that owns its pieces and sentinels.
    Splice {
        /// Range currently in effect
        new: PieceRange,
        /// Range the next replay restores
        old: PieceRange,
        /// Bytes held by `new`
        new_len: usize,
        /// Bytes held by `old`
        old_len: usize,
    },
    /// Coalesced append: the piece at `node` was grown in place.
    Extend {
        /// Piece that was extended
        node: NodeId,
        /// Length currently in effect
        new_len: usize,
        /// Length the next replay restores
        old_len: usize,
    },
}

impl Change {
    /// Replay the change against the document and flip its roles.
    fn apply(&mut self, arena: &mut PieceArena, doc_len: &mut usize) {
        match self {
            Change::Splice {
                new,
                old,
                new_len,
                old_len,
            } => {
                arena.swap(*new, *old);
                *doc_len = *doc_len - *new_len + *old_len;
                std::mem::swap(new, old);
                std::mem::swap(new_len, old_len);
            }
            Change::Extend {
                node,
                new_len,
                old_len,
            } => {
                arena.piece_mut(*node).len = *old_len;
                *doc_len = *doc_len - *new_len + *old_len;
                std::mem::swap(new_len, old_len);
            }
        }
    }

    /// The range owning pieces that are out of the document, if any.
    pub fn detached(&self) -> Option<PieceRange> {
        match self {
            Change::Splice { new, old, .. } => Some(if new.anchored { *old } else { *new }),
            Change::Extend { .. } => None,
        }
    }

    fn discard(self, arena: &mut PieceArena) {
        if let Some(range) = self.detached() {
            arena.release(range);
        }
    }
}

/// Undo and redo stacks; the top of each stack is its last element.
#[derive(Debug, Default)]
pub struct History {
    undo_stack: Vec<Change>,
    redo_stack: Vec<Change>,
    limit: Option<usize>,
}

impl History {
    /// Create empty stacks, keeping at most `limit` undoable changes.
    pub fn new(limit: Option<usize>) -> Self {
        Self {
            undo_stack: Vec::new(),
            redo_stack: Vec::new(),
            limit,
        }
    }

    /// Whether an undo is possible.
    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    /// Whether a redo is possible.
    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    /// Number of undoable changes.
    pub fn undo_depth(&self) -> usize {
        self.undo_stack.len()
    }

    /// Number of redoable changes.
    pub fn redo_depth(&self) -> usize {
        self.redo_stack.len()
    }

    /// All recorded changes, undo stack first.
    pub fn changes(&self) -> impl Iterator<Item = &Change> {
        self.undo_stack.iter().chain(self.redo_stack.iter())
    }

    /// Push a freshly applied change. Invalidates the redo stack.
    pub(crate) fn record(&mut self, change: Change, arena: &mut PieceArena) {
        self.clear_redo(arena);
        self.undo_stack.push(change);

        if let Some(limit) = self.limit {
            let excess = self.undo_stack.len().saturating_sub(limit);
            if excess > 0 {
                debug!(excess, limit, "dropping oldest undo entries");
                for change in self.undo_stack.drain(..excess) {
                    change.discard(arena);
                }
            }
        }
    }

    fn clear_redo(&mut self, arena: &mut PieceArena) {
        for change in self.redo_stack.drain(..) {
            change.discard(arena);
        }
    }

    /// Revert the most recent change. Returns `false` on an empty stack.
    pub(crate) fn undo(&mut self, arena: &mut PieceArena, doc_len: &mut usize) -> bool {
        let Some(mut change) = self.undo_stack.pop() else {
            return false;
        };
        change.apply(arena, doc_len);
        self.redo_stack.push(change);
        true
    }

    /// Reapply the most recently undone change. Returns `false` on an empty stack.
    pub(crate) fn redo(&mut self, arena: &mut PieceArena, doc_len: &mut usize) -> bool {
        let Some(mut change) = self.redo_stack.pop() else {
            return false;
        };
        change.apply(arena, doc_len);
        self.undo_stack.push(change);
        true
    }
}
