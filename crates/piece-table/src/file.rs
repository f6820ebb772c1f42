//! Loading from and saving to the filesystem.

use std::fs::{self, File};
use std::io::BufWriter;
use std::path::Path;

use memmap2::Mmap;
use tempfile::NamedTempFile;
use tracing::debug;

use crate::config::DocumentConfig;
use crate::document::Document;
use crate::error::{Error, Result};
use crate::store::OriginalStore;

impl Document {
    /// Load `path` as the Original store of a new document.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        Self::open_with_config(path, DocumentConfig::default())
    }

    /// [`Document::open`] with custom settings.
    ///
    /// Non-empty files are memory-mapped read-only and stay mapped until the
    /// document is dropped. The file must not be modified by anyone else in
    /// the meantime.
    pub fn open_with_config(path: impl AsRef<Path>, config: DocumentConfig) -> Result<Self> {
        let path = path.as_ref();
        let resource = |source| Error::Resource {
            path: path.to_path_buf(),
            source,
        };

        let file = File::open(path).map_err(resource)?;
        let metadata = file.metadata().map_err(resource)?;
        if !metadata.is_file() {
            return Err(Error::InvalidArgument("path is not a regular file"));
        }
        let len = metadata.len();

        // Zero-length mappings are rejected on some platforms.
        let original = if len == 0 {
            OriginalStore::Empty
        } else {
            // SAFETY: the mapping is read-only and private to this document;
            // the caller guarantees the file is not truncated while mapped.
            let mmap = unsafe { Mmap::map(&file) }.map_err(resource)?;
            OriginalStore::Mapped(mmap)
        };

        debug!(path = %path.display(), bytes = original.len(), "loaded document");
        Ok(Self::from_store(original, config))
    }

    /// Write the current content to `path`, creating or replacing it.
    ///
    /// The bytes go to a temporary file in the destination directory, which
    /// is then renamed over `path`. The file this document was opened from
    /// is never truncated, so saving back to it keeps the Original store
    /// readable, and a failed save leaves the destination as it was.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let resource = |source| Error::Resource {
            path: path.to_path_buf(),
            source,
        };

        let dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        let tmp = NamedTempFile::new_in(dir).map_err(resource)?;
        if let Ok(existing) = fs::metadata(path) {
            tmp.as_file()
                .set_permissions(existing.permissions())
                .map_err(resource)?;
        }

        let mut out = BufWriter::new(tmp);
        self.write_to(&mut out).map_err(resource)?;
        let tmp = out.into_inner().map_err(|err| resource(err.into_error()))?;
        tmp.persist(path).map_err(|err| resource(err.error))?;

        debug!(path = %path.display(), bytes = self.len(), pieces = self.piece_count(), "saved document");
        Ok(())
    }
}
