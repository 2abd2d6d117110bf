//! File-backed key-value store.
//!
//! One file per key under a data directory. Values are opaque strings;
//! callers layer their own JSON encoding on top.

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::fs;
use zirkl_core::{KeyValueStore, Result, ZirklError};

/// Key-value store persisting each key as a file under a directory.
///
/// The default directory is `~/.local/share/zirkl` (platform equivalent
/// via `dirs::data_dir`). Keys are sanitized into file names, so any
/// string key is accepted.
pub struct FileKeyValueStore {
    dir: PathBuf,
}

impl FileKeyValueStore {
    /// Creates a store rooted at the default data directory.
    pub fn new_default() -> Result<Self> {
        let base = dirs::data_dir()
            .ok_or_else(|| ZirklError::storage("Cannot find data directory"))?;
        Ok(Self::new(base.join("zirkl")))
    }

    /// Creates a store rooted at `dir`. The directory is created lazily on
    /// first write.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn path_for(&self, key: &str) -> PathBuf {
        // Keys may contain separators or other characters that are not
        // valid in file names.
        let sanitized: String = key
            .chars()
            .map(|c| if c.is_ascii_alphanumeric() || c == '-' || c == '_' { c } else { '_' })
            .collect();
        self.dir.join(format!("{}.json", sanitized))
    }

    async fn ensure_dir(&self) -> Result<()> {
        if !self.dir.exists() {
            fs::create_dir_all(&self.dir).await.map_err(|e| {
                ZirklError::storage(format!(
                    "Failed to create store directory {:?}: {}",
                    self.dir, e
                ))
            })?;
        }
        Ok(())
    }

    async fn remove_path(path: &Path) -> Result<()> {
        match fs::remove_file(path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(ZirklError::storage(format!(
                "Failed to remove {:?}: {}",
                path, e
            ))),
        }
    }
}

#[async_trait]
impl KeyValueStore for FileKeyValueStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        let path = self.path_for(key);
        match fs::read_to_string(&path).await {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(ZirklError::storage(format!(
                "Failed to read {:?}: {}",
                path, e
            ))),
        }
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        self.ensure_dir().await?;
        let path = self.path_for(key);
        fs::write(&path, value)
            .await
            .map_err(|e| ZirklError::storage(format!("Failed to write {:?}: {}", path, e)))
    }

    async fn remove(&self, key: &str) -> Result<()> {
        Self::remove_path(&self.path_for(key)).await
    }

    async fn multi_remove(&self, keys: &[&str]) -> Result<()> {
        for key in keys {
            Self::remove_path(&self.path_for(key)).await?;
        }
        Ok(())
    }
}
