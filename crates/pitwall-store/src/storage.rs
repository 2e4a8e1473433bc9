//! File-based storage operations for collection documents

use std::path::{Path, PathBuf};

use tokio::fs as async_fs;
use tracing::debug;

use crate::error::StoreError;

/// Raw file access for collection documents
#[derive(Debug, Clone)]
pub struct FileStorage {
    atomic_writes: bool,
}

impl Default for FileStorage {
    fn default() -> Self {
        Self {
            atomic_writes: true,
        }
    }
}

impl FileStorage {
    /// Create a storage instance
    ///
    /// With `atomic_writes` a write goes to a sibling temp file which is then
    /// renamed over the target, so a crash leaves either the old or the new
    /// document. Without it the target is truncated and rewritten in place,
    /// and a crash mid-write can leave it empty or truncated.
    pub fn new(atomic_writes: bool) -> Self {
        Self { atomic_writes }
    }

    /// Whether writes go through a temp file and rename
    pub fn atomic_writes(&self) -> bool {
        self.atomic_writes
    }

    /// Create `dir` and any missing parents
    pub async fn ensure_dir(&self, dir: &Path) -> Result<(), StoreError> {
        async_fs::create_dir_all(dir)
            .await
            .map_err(|source| StoreError::DirectoryCreationFailed {
                path: dir.to_path_buf(),
                source,
            })
    }

    /// Read the whole file
    ///
    /// Returns `Ok(None)` if the file does not exist.
    pub async fn read(&self, path: &Path) -> Result<Option<Vec<u8>>, StoreError> {
        debug!(path = ?path, "Reading file");

        match async_fs::read(path).await {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = ?path, "File not found");
                Ok(None)
            }
            Err(source) => Err(StoreError::read_failed(path, source)),
        }
    }

    /// Replace the file content with `content`
    pub async fn write(&self, path: &Path, content: &[u8]) -> Result<(), StoreError> {
        if self.atomic_writes {
            self.write_atomic(path, content).await
        } else {
            self.write_in_place(path, content).await
        }
    }

    async fn write_atomic(&self, path: &Path, content: &[u8]) -> Result<(), StoreError> {
        debug!(path = ?path, "Writing file atomically");

        let temp_path = temp_path_for(path);

        async_fs::write(&temp_path, content)
            .await
            .map_err(|source| StoreError::write_failed(&temp_path, source))?;

        if let Err(source) = async_fs::rename(&temp_path, path).await {
            // cleanup is best effort
            let _removed = async_fs::remove_file(&temp_path).await;
            return Err(StoreError::write_failed(path, source));
        }

        debug!(path = ?path, "File written successfully");
        Ok(())
    }

    async fn write_in_place(&self, path: &Path, content: &[u8]) -> Result<(), StoreError> {
        debug!(path = ?path, "Rewriting file in place");

        async_fs::write(path, content)
            .await
            .map_err(|source| StoreError::write_failed(path, source))?;

        debug!(path = ?path, "File written successfully");
        Ok(())
    }
}

/// Temp file used by atomic writes: `teams.json` becomes `teams.json.tmp`
pub fn temp_path_for(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_os_string();
    name.push(".tmp");
    PathBuf::from(name)
}
