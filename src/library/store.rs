//! On-disk catalog file, held under an exclusive lock while open.
//!
//! The file is read and rewritten in place through one handle. Writes are
//! not atomic: a crash between truncation and the end of the write leaves a
//! damaged catalog.

use std::fs::{File, OpenOptions};
use std::io::{Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};

use fs2::FileExt;
use tracing::debug;

use super::catalog::{Catalog, CatalogError};

/// Locked handle on a catalog file
#[derive(Debug)]
pub struct CatalogStore {
    path: PathBuf,
    file: File,
}

impl CatalogStore {
    /// Open an existing catalog file for read-write and lock it
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, CatalogError> {
        let path = path.into();
        let file = OpenOptions::new().read(true).write(true).open(&path)?;
        file.lock_exclusive()?;

        debug!(path = %path.display(), "Opened catalog");
        Ok(Self { path, file })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read and parse the whole file
    pub fn load(&mut self) -> Result<Catalog, CatalogError> {
        self.file.seek(SeekFrom::Start(0))?;
        let mut content = String::new();
        self.file.read_to_string(&mut content)?;
        Catalog::from_json(&content)
    }

    /// Overwrite the file with the catalog and truncate what is left over
    pub fn persist(&mut self, catalog: &Catalog) -> Result<(), CatalogError> {
        let content = catalog.to_pretty_json()?;

        self.file.seek(SeekFrom::Start(0))?;
        self.file.write_all(content.as_bytes())?;
        self.file.set_len(content.len() as u64)?;
        self.file.flush()?;

        debug!(path = %self.path.display(), bytes = content.len(), "Persisted catalog");
        Ok(())
    }
}

impl Drop for CatalogStore {
    fn drop(&mut self) {
        // Closing the handle releases the lock anyway
        let _ = FileExt::unlock(&self.file);
    }
}
