#![warn(missing_docs)]
//! Piece Table - byte-oriented text buffer engine
//!
//! # Overview
//!
//! `piece-table` stores a document as a chain of *pieces*, each a
//! `(store, offset, len)` reference into one of two byte stores:
//!
//! - the **Original** store, the loaded source (read-only, usually a memory
//!   mapping of the file);
//! - the **Add** store, an append-only buffer holding every inserted byte.
//!
//! Edits never copy document text. Insert and delete split the pieces at the
//! edit boundaries, build a short replacement chain and swap it into the live
//! list. The displaced pieces are kept in the change record, so undo and redo
//! are the same swap played back.
//!
//! # Architecture Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │  Document (edit engine, read surface, I/O)  │  ← Public API
//! ├─────────────────────────────────────────────┤
//! │  History (undo / redo stacks of Changes)    │
//! ├─────────────────────────────────────────────┤
//! │  Position resolver                          │
//! ├─────────────────────────────────────────────┤
//! │  Piece arena & sentinel-bounded ranges      │  ← swap primitive
//! ├─────────────────────────────────────────────┤
//! │  Byte stores (Original + Add)               │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! # Quick Start
//!
//! ```rust
//! use piece_table::Document;
//!
//! let mut doc = Document::new();
//! doc.insert(0, b"ab").unwrap();
//! doc.insert(2, b"cd").unwrap();
//! doc.insert(1, b"XY").unwrap();
//! assert_eq!(doc.to_bytes(), b"aXYbcd");
//!
//! doc.undo();
//! assert_eq!(doc.to_bytes(), b"abcd");
//! ```
//!
//! Change records and the undo/redo stacks are internal; history is driven
//! only through [`Document::undo`] and [`Document::redo`]:
//!
//! ```compile_fail
//! use piece_table::history::History;
//! ```
//!
//! # Threading
//!
//! A [`Document`] is a plain single-writer value with no internal locking.
//! Share it across threads by wrapping it in a mutex.
//!
//! # Module Description
//!
//! - [`store`] - Original and Add byte stores
//! - [`piece`] - the piece value type and sub-piece splitting
//! - [`arena`] - node arena, piece ranges and the swap primitive
//! - [`position`] - offset to `(piece, local offset)` resolution
//! - `history` - reversible changes and the undo/redo stacks (internal)
//! - [`document`] - the edit engine
//! - [`config`] - document settings
//! - [`error`] - error type

pub mod arena;
pub mod config;
pub mod document;
pub mod error;
mod file;
mod history;
pub mod piece;
pub mod position;
mod read;
pub mod store;

pub use arena::{NodeId, PieceArena, PieceRange};
pub use config::DocumentConfig;
pub use document::Document;
pub use error::{Error, Result};
pub use piece::Piece;
pub use position::Position;
pub use store::{AddStore, OriginalStore, StoreKind, Stores};
