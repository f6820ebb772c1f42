//! Offset-to-piece resolution.

use crate::arena::{NodeId, PieceArena};

/// A byte position inside the piece chain.
///
/// `offset` is always strictly inside the piece at `node`, except for the
/// end-of-document position, which is `(tail sentinel, 0)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Position {
    /// Node holding the byte (or the tail sentinel at end of document)
    pub node: NodeId,
    /// Offset local to that node
    pub offset: usize,
}

/// Walk forward from `start`, consuming `offset` bytes.
///
/// Stops at the first piece whose length exceeds what is left of `offset`.
/// Reaching the tail sentinel with nothing left yields the end-of-document
/// position; reaching it with bytes still to consume yields `None`.
pub fn find(arena: &PieceArena, start: NodeId, offset: usize) -> Option<Position> {
    let mut cursor = start;
    let mut remaining = offset;
    loop {
        match arena.piece(cursor) {
            Some(piece) if remaining < piece.len => {
                return Some(Position {
                    node: cursor,
                    offset: remaining,
                });
            }
            Some(piece) => remaining -= piece.len,
            None => match arena.next(cursor) {
                // Tail sentinel.
                None if remaining == 0 => {
                    return Some(Position {
                        node: cursor,
                        offset: 0,
                    });
                }
                None => return None,
                // Head sentinel holds nothing; step past it.
                Some(_) => {}
            },
        }
        cursor = arena.expect_next(cursor);
    }
}
