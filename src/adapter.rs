//! Durable key-value storage used to save and restore the note collection.
//!
//! The store only ever reads or writes whole blobs under a single key, so an
//! adapter needs nothing beyond `read` and `write`.
use std::{
    collections::HashMap,
    fs,
    io::Write,
    path::{Path, PathBuf},
    sync::Arc,
};

use async_trait::async_trait;
use log::{debug, error, trace};
use tempfile::NamedTempFile;
use tokio::sync::Mutex;

use crate::{NotesError, Result};

/// Asynchronous key-value persistence.
#[async_trait]
pub trait PersistenceAdapter: Send + Sync {
    /// Returns the blob stored under `key`, or `None` if nothing was stored.
    async fn read(&self, key: &str) -> Result<Option<String>>;

    /// Stores `blob` under `key`, replacing any previous value.
    async fn write(&self, key: &str, blob: &str) -> Result<()>;
}

/// Lets several stores, or a store and its caller, share one backend.
#[async_trait]
impl<T: PersistenceAdapter + ?Sized> PersistenceAdapter for Arc<T> {
    async fn read(&self, key: &str) -> Result<Option<String>> {
        (**self).read(key).await
    }

    async fn write(&self, key: &str, blob: &str) -> Result<()> {
        (**self).write(key, blob).await
    }
}

/// Keeps blobs in process memory. Nothing survives a restart.
#[derive(Debug, Default)]
pub struct MemoryAdapter {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryAdapter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-populates `key`, as if an earlier session had written it.
    pub fn with_entry(key: impl Into<String>, blob: impl Into<String>) -> Self {
        let mut entries = HashMap::new();
        entries.insert(key.into(), blob.into());
        Self {
            entries: Mutex::new(entries),
        }
    }

    /// Current blob under `key`.
    pub async fn get(&self, key: &str) -> Option<String> {
        self.entries.lock().await.get(key).cloned()
    }
}

#[async_trait]
impl PersistenceAdapter for MemoryAdapter {
    async fn read(&self, key: &str) -> Result<Option<String>> {
        Ok(self.get(key).await)
    }

    async fn write(&self, key: &str, blob: &str) -> Result<()> {
        self.entries
            .lock()
            .await
            .insert(key.to_string(), blob.to_string());
        Ok(())
    }
}

/// Stores each key as a JSON file under a root directory.
#[derive(Debug, Clone)]
pub struct FileAdapter {
    root: PathBuf,
}

impl FileAdapter {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// File backing `key`: `<root>/<sanitized key>.json`.
    pub fn path_for(&self, key: &str) -> PathBuf {
        let file_name: String = key
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.') {
                    c
                } else {
                    '_'
                }
            })
            .collect();
        self.root.join(format!("{}.json", file_name))
    }
}

#[async_trait]
impl PersistenceAdapter for FileAdapter {
    async fn read(&self, key: &str) -> Result<Option<String>> {
        let path = self.path_for(key);
        debug!("Reading blob for key {} from {}", key, path.display());

        match tokio::fs::read_to_string(&path).await {
            Ok(blob) => {
                trace!("Read {} bytes from {}", blob.len(), path.display());
                Ok(Some(blob))
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!("No blob stored at {}", path.display());
                Ok(None)
            }
            Err(e) => {
                error!("Failed to read {}: {}", path.display(), e);
                Err(NotesError::Io(e))
            }
        }
    }

    async fn write(&self, key: &str, blob: &str) -> Result<()> {
        let path = self.path_for(key);
        let root = self.root.clone();
        let blob = blob.to_string();

        tokio::task::spawn_blocking(move || write_atomically(&root, &path, &blob))
            .await
            .map_err(|e| NotesError::Persistence {
                message: format!("write task failed: {}", e),
            })?
    }
}

/// Writes through a temporary file in the same directory, then renames it
/// over the target so readers never observe a partial blob.
fn write_atomically(root: &Path, path: &Path, blob: &str) -> Result<()> {
    if !root.exists() {
        debug!("Creating storage directory: {}", root.display());
        fs::create_dir_all(root).map_err(|e| {
            error!("Failed to create directory {}: {}", root.display(), e);
            NotesError::DirectoryError {
                path: root.to_path_buf(),
            }
        })?;
    }

    let mut temp_file = NamedTempFile::new_in(root).map_err(|e| {
        error!("Failed to create temporary file: {}", e);
        NotesError::Io(e)
    })?;

    trace!("Writing {} bytes to temporary file", blob.len());
    temp_file.write_all(blob.as_bytes())?;
    temp_file.flush()?;

    temp_file.persist(path).map_err(|e| {
        error!("Failed to persist file {}: {}", path.display(), e.error);
        NotesError::Io(e.error)
    })?;

    debug!("Blob written to {}", path.display());
    Ok(())
}
