//! Tunables for a [`Document`](crate::Document).

/// Initial capacity of the Add Store, in bytes.
pub const DEFAULT_ADD_STORE_CAPACITY: usize = 1024;

/// Document configuration.
///
/// ```rust
/// use piece_table::{Document, DocumentConfig};
///
/// let config = DocumentConfig::default()
///     .with_add_store_capacity(64)
///     .with_undo_limit(Some(100));
/// let doc = Document::with_config(config);
/// assert!(doc.is_empty());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DocumentConfig {
    /// Initial Add Store capacity; the store doubles whenever an append
    /// would overflow it.
    pub add_store_capacity: usize,
    /// Extend the most recently appended Add piece in place when typing
    /// continues right after it, instead of splicing a new piece.
    pub coalesce_appends: bool,
    /// Maximum number of changes kept on the undo stack (`None` = unbounded).
    pub undo_limit: Option<usize>,
}

impl Default for DocumentConfig {
    fn default() -> Self {
        Self {
            add_store_capacity: DEFAULT_ADD_STORE_CAPACITY,
            coalesce_appends: true,
            undo_limit: None,
        }
    }
}

impl DocumentConfig {
    /// Set the initial Add Store capacity (clamped to at least one byte).
    pub fn with_add_store_capacity(mut self, capacity: usize) -> Self {
        self.add_store_capacity = capacity.max(1);
        self
    }

    /// Enable or disable append coalescing.
    pub fn with_coalesce_appends(mut self, enabled: bool) -> Self {
        self.coalesce_appends = enabled;
        self
    }

    /// Bound the undo stack. `Some(0)` keeps no history at all.
    pub fn with_undo_limit(mut self, limit: Option<usize>) -> Self {
        self.undo_limit = limit;
        self
    }
}
