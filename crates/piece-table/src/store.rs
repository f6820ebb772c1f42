//! Byte stores backing every piece.
//!
//! The Original store holds the loaded source and is never written to. The
//! Add store only ever grows: deleting text does not reclaim its bytes, so
//! an offset handed out by [`AddStore::append`] stays valid for the life of
//! the document.

use memmap2::Mmap;

/// Which store a piece points into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StoreKind {
    /// Read-only original content
    Original,
    /// Append-only inserted content
    Add,
}

/// Read-only backing of the loaded source.
#[derive(Debug, Default)]
pub enum OriginalStore {
    /// No source (new document, or a zero-length file).
    #[default]
    Empty,
    /// Bytes handed in by the caller.
    Owned(Box<[u8]>),
    /// Read-only memory mapping of a file; unmapped when dropped.
    Mapped(Mmap),
}

impl OriginalStore {
    /// The whole store as a slice.
    pub fn as_bytes(&self) -> &[u8] {
        match self {
            OriginalStore::Empty => &[],
            OriginalStore::Owned(bytes) => &bytes[..],
            OriginalStore::Mapped(mmap) => &mmap[..],
        }
    }

    /// Length in bytes.
    pub fn len(&self) -> usize {
        self.as_bytes().len()
    }

    /// Whether the store holds no bytes.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl From<Vec<u8>> for OriginalStore {
    fn from(bytes: Vec<u8>) -> Self {
        if bytes.is_empty() {
            OriginalStore::Empty
        } else {
            OriginalStore::Owned(bytes.into_boxed_slice())
        }
    }
}

/// Append-only store for inserted bytes.
#[derive(Debug)]
pub struct AddStore {
    data: Vec<u8>,
}

impl AddStore {
    /// Create an empty store with room for `capacity` bytes.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            data: Vec::with_capacity(capacity.max(1)),
        }
    }

    /// Append `bytes` and return the offset they start at.
    ///
    /// When the bytes do not fit, capacity doubles until they do.
    pub fn append(&mut self, bytes: &[u8]) -> usize {
        let offset = self.data.len();
        let needed = offset + bytes.len();
        if needed > self.data.capacity() {
            let mut capacity = self.data.capacity().max(1);
            while capacity < needed {
                capacity *= 2;
            }
            self.data.reserve_exact(capacity - offset);
        }
        self.data.extend_from_slice(bytes);
        offset
    }

    /// Bytes written so far.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Whether nothing has been appended yet.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Currently reserved capacity.
    pub fn capacity(&self) -> usize {
        self.data.capacity()
    }

    /// The whole store as a slice.
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }
}

/// The Original/Add pair owned by a document.
#[derive(Debug)]
pub struct Stores {
    pub(crate) original: OriginalStore,
    pub(crate) add: AddStore,
}

impl Stores {
    pub(crate) fn new(original: OriginalStore, add_capacity: usize) -> Self {
        Self {
            original,
            add: AddStore::with_capacity(add_capacity),
        }
    }

    /// Borrow `len` bytes of `kind` starting at `offset`.
    ///
    /// Pieces are only ever built from ranges that were valid when they were
    /// created and neither store shrinks, so an out-of-bounds request here is
    /// a broken invariant and panics.
    pub fn read(&self, kind: StoreKind, offset: usize, len: usize) -> &[u8] {
        let bytes = match kind {
            StoreKind::Original => self.original.as_bytes(),
            StoreKind::Add => self.add.as_bytes(),
        };
        &bytes[offset..offset + len]
    }

    /// The original store.
    pub fn original(&self) -> &OriginalStore {
        &self.original
    }

    /// The add store.
    pub fn add(&self) -> &AddStore {
        &self.add
    }
}
