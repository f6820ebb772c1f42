//! Piece nodes and sentinel-bounded piece ranges.
//!
//! Every node lives in a [`PieceArena`] and is addressed by a [`NodeId`];
//! links are indices, not pointers. A [`PieceRange`] is a pair of boundary
//! nodes whose content is the chain strictly between them. The range is
//! empty iff `head.next == tail`.
//!
//! Two kinds of range exist:
//!
//! - *detached* ranges own their boundary pair: two content-free sentinel
//!   nodes allocated by `PieceArena::new_range`;
//! - *anchored* ranges borrow their boundaries from another list (the live
//!   document). They describe a splice point: "whatever sits between these
//!   two nodes".
//!
//! `PieceArena::swap` exchanges the content chains of two ranges and is the
//! only operation that moves pieces between lists. Everything that allocates,
//! relinks or releases nodes is crate-private, so a document's nodes can only
//! change owner through its own edit and history code.

use crate::error::Result;
use crate::piece::Piece;

/// Stable index of a node inside a [`PieceArena`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

#[derive(Debug, Clone)]
struct Node {
    /// `None` for sentinels.
    piece: Option<Piece>,
    prev: Option<NodeId>,
    next: Option<NodeId>,
}

/// A chain of pieces bounded by a `head`/`tail` node pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PieceRange {
    /// Boundary before the first content node
    pub head: NodeId,
    /// Boundary after the last content node
    pub tail: NodeId,
    /// `true` when the boundaries belong to another list
    pub anchored: bool,
}

/// Slab of piece nodes with a free list.
///
/// Only the read side is public. Nodes are allocated, relinked and released
/// by the document alone:
///
/// ```compile_fail
/// use piece_table::PieceArena;
///
/// let mut arena = PieceArena::new();
/// let range = arena.new_range();
/// arena.release(range);
/// ```
#[derive(Debug, Default)]
pub struct PieceArena {
    slots: Vec<Option<Node>>,
    free: Vec<NodeId>,
}

impl PieceArena {
    /// Create an empty arena.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of allocated (not released) nodes, sentinels included.
    pub fn allocated(&self) -> usize {
        self.slots.len() - self.free.len()
    }

    fn insert(&mut self, node: Node) -> NodeId {
        match self.free.pop() {
            Some(id) => {
                self.slots[id.0] = Some(node);
                id
            }
            None => {
                self.slots.push(Some(node));
                NodeId(self.slots.len() - 1)
            }
        }
    }

    fn node(&self, id: NodeId) -> &Node {
        match self.slots.get(id.0) {
            Some(Some(node)) => node,
            _ => panic!("piece node {id:?} is not allocated"),
        }
    }

    fn node_mut(&mut self, id: NodeId) -> &mut Node {
        match self.slots.get_mut(id.0) {
            Some(Some(node)) => node,
            _ => panic!("piece node {id:?} is not allocated"),
        }
    }

    /// Allocate an unlinked node for `piece`.
    pub(crate) fn alloc(&mut self, piece: Piece) -> NodeId {
        self.insert(Node {
            piece: Some(piece),
            prev: None,
            next: None,
        })
    }

    /// Allocate a fresh, empty detached range.
    pub(crate) fn new_range(&mut self) -> PieceRange {
        let head = self.insert(Node {
            piece: None,
            prev: None,
            next: None,
        });
        let tail = self.insert(Node {
            piece: None,
            prev: Some(head),
            next: None,
        });
        self.node_mut(head).next = Some(tail);
        PieceRange {
            head,
            tail,
            anchored: false,
        }
    }

    /// Describe the chain strictly between two nodes of an existing list.
    pub(crate) fn anchored_range(&self, head: NodeId, tail: NodeId) -> PieceRange {
        debug_assert!(self.is_allocated(head) && self.is_allocated(tail));
        PieceRange {
            head,
            tail,
            anchored: true,
        }
    }

    /// Whether `id` refers to a live slot.
    pub fn is_allocated(&self, id: NodeId) -> bool {
        matches!(self.slots.get(id.0), Some(Some(_)))
    }

    /// The piece stored at `id`, or `None` for a sentinel.
    pub fn piece(&self, id: NodeId) -> Option<&Piece> {
        self.node(id).piece.as_ref()
    }

    pub(crate) fn piece_mut(&mut self, id: NodeId) -> &mut Piece {
        match self.node_mut(id).piece.as_mut() {
            Some(piece) => piece,
            None => panic!("piece node {id:?} is a sentinel"),
        }
    }

    /// Length of the piece at `id`; sentinels have length 0.
    pub fn piece_len(&self, id: NodeId) -> usize {
        self.piece(id).map_or(0, |p| p.len)
    }

    /// Successor link.
    pub fn next(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).next
    }

    /// Predecessor link.
    pub fn prev(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).prev
    }

    pub(crate) fn expect_next(&self, id: NodeId) -> NodeId {
        match self.next(id) {
            Some(next) => next,
            None => panic!("piece chain ends unexpectedly after {id:?}"),
        }
    }

    pub(crate) fn expect_prev(&self, id: NodeId) -> NodeId {
        match self.prev(id) {
            Some(prev) => prev,
            None => panic!("piece chain starts unexpectedly before {id:?}"),
        }
    }

    /// Allocate a new node holding the inclusive sub-range `[start, end]` of
    /// the piece at `id`. The source node is left untouched.
    pub(crate) fn split(&mut self, id: NodeId, start: usize, end: usize) -> Result<NodeId> {
        let source = match self.piece(id) {
            Some(piece) => *piece,
            None => panic!("cannot split sentinel {id:?}"),
        };
        let piece = source.split(start, end)?;
        Ok(self.alloc(piece))
    }

    /// Link an unlinked node immediately before `range.tail`.
    pub(crate) fn append_piece(&mut self, range: PieceRange, id: NodeId) {
        let prev = self.expect_prev(range.tail);
        {
            let node = self.node_mut(id);
            debug_assert!(node.prev.is_none() && node.next.is_none(), "node already linked");
            node.prev = Some(prev);
            node.next = Some(range.tail);
        }
        self.node_mut(prev).next = Some(id);
        self.node_mut(range.tail).prev = Some(id);
    }

    /// Whether nothing sits between the range's boundaries.
    pub fn is_empty(&self, range: PieceRange) -> bool {
        self.next(range.head) == Some(range.tail)
    }

    fn chain(&self, range: PieceRange) -> Option<(NodeId, NodeId)> {
        if self.is_empty(range) {
            None
        } else {
            Some((self.expect_next(range.head), self.expect_prev(range.tail)))
        }
    }

    fn attach(&mut self, range: PieceRange, chain: Option<(NodeId, NodeId)>) {
        match chain {
            Some((first, last)) => {
                self.node_mut(range.head).next = Some(first);
                self.node_mut(first).prev = Some(range.head);
                self.node_mut(last).next = Some(range.tail);
                self.node_mut(range.tail).prev = Some(last);
            }
            None => {
                self.node_mut(range.head).next = Some(range.tail);
                self.node_mut(range.tail).prev = Some(range.head);
            }
        }
    }

    /// Exchange the content chains of `a` and `b`.
    ///
    /// Both chains are captured before any link is rewritten, so every
    /// combination of empty and non-empty operands works. Nothing is
    /// allocated or released.
    pub(crate) fn swap(&mut self, a: PieceRange, b: PieceRange) {
        let a_chain = self.chain(a);
        let b_chain = self.chain(b);
        self.attach(a, b_chain);
        self.attach(b, a_chain);
    }

    /// Release a detached range: its content chain and both sentinels.
    pub(crate) fn release(&mut self, range: PieceRange) {
        debug_assert!(!range.anchored, "anchored ranges do not own their nodes");
        let mut cursor = range.head;
        loop {
            let next = self.next(cursor);
            self.slots[cursor.0] = None;
            self.free.push(cursor);
            if cursor == range.tail {
                break;
            }
            cursor = match next {
                Some(next) => next,
                None => panic!("detached range {range:?} is not terminated by its tail"),
            };
        }
    }

    /// Iterate over the content of `range` in order.
    pub fn iter(&self, range: PieceRange) -> RangeIter<'_> {
        RangeIter {
            arena: self,
            cursor: self.next(range.head),
            tail: range.tail,
        }
    }
}

/// Iterator over the pieces of a [`PieceRange`].
#[derive(Debug)]
pub struct RangeIter<'a> {
    arena: &'a PieceArena,
    cursor: Option<NodeId>,
    tail: NodeId,
}

impl<'a> Iterator for RangeIter<'a> {
    type Item = (NodeId, &'a Piece);

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.cursor?;
        if id == self.tail {
            self.cursor = None;
            return None;
        }
        self.cursor = self.arena.next(id);
        let piece = match self.arena.piece(id) {
            Some(piece) => piece,
            None => panic!("sentinel {id:?} found inside a piece chain"),
        };
        Some((id, piece))
    }
}
