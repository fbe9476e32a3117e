//! JSON file storage.
//!
//! The file holds a pretty-printed JSON array of blocks. Saves go to a
//! sibling `.tmp` file that is then renamed over the target, so a reader
//! never sees a half-written list.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use pico_core::Block;
use tokio::sync::Mutex;

use crate::{BlockStorage, Error, Result};

/// Default data file, relative to the working directory.
pub const DEFAULT_DATA_PATH: &str = "./data.json";

/// Stores blocks in a single JSON file.
#[derive(Debug)]
pub struct FileStorage {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl FileStorage {
    /// Opens the data file, creating it (and its parent directories) holding
    /// an empty array if it does not exist.
    pub async fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| Error::io_with_path(e, parent))?;
        }

        match tokio::fs::metadata(&path).await {
            Ok(_) => {}
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                log::info!("Creating empty data file at {}", path.display());
                tokio::fs::write(&path, b"[]")
                    .await
                    .map_err(|e| Error::io_with_path(e, &path))?;
            }
            Err(e) => return Err(Error::io_with_path(e, &path)),
        }

        Ok(Self {
            path,
            write_lock: Mutex::new(()),
        })
    }

    /// Path of the data file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_else(|| "data.json".into());
        name.push(".tmp");
        self.path.with_file_name(name)
    }

    async fn replace_with(&self, tmp: &Path, json: &[u8]) -> Result<()> {
        tokio::fs::write(tmp, json)
            .await
            .map_err(|e| Error::io_with_path(e, tmp))?;
        tokio::fs::rename(tmp, &self.path)
            .await
            .map_err(|e| Error::io_with_path(e, &self.path))
    }
}

async fn discard_temp(tmp: &Path) {
    match tokio::fs::remove_file(tmp).await {
        Ok(()) => {}
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
        Err(e) => log::warn!("Could not remove {}: {e}", tmp.display()),
    }
}

#[async_trait]
impl BlockStorage for FileStorage {
    async fn load(&self) -> Result<Vec<Block>> {
        let bytes = tokio::fs::read(&self.path)
            .await
            .map_err(|e| Error::io_with_path(e, &self.path))?;

        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(Vec::new());
        }

        serde_json::from_slice(&bytes).map_err(|source| Error::Corrupt {
            path: self.path.clone(),
            source,
        })
    }

    async fn save(&self, blocks: &[Block]) -> Result<()> {
        let json = serde_json::to_vec_pretty(blocks).map_err(pico_core::Error::from)?;

        let _guard = self.write_lock.lock().await;
        let tmp = self.temp_path();
        if let Err(e) = self.replace_with(&tmp, &json).await {
            discard_temp(&tmp).await;
            return Err(e);
        }

        log::debug!("Saved {} blocks to {}", blocks.len(), self.path.display());
        Ok(())
    }

    fn describe(&self) -> String {
        format!("file:{}", self.path.display())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_open_creates_empty_array() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("nested").join("data.json");

        let storage = FileStorage::open(&path).await.unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "[]");
        assert!(storage.load().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_open_keeps_existing_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("data.json");
        std::fs::write(&path, r#"[{"h":"kept","b":"yes"}]"#).unwrap();

        let storage = FileStorage::open(&path).await.unwrap();
        assert_eq!(storage.load().await.unwrap(), vec![Block::new("kept", "yes")]);
    }

    #[tokio::test]
    async fn test_save_then_reopen() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("data.json");
        let blocks = vec![Block::new("a", "1\n2"), Block::new("b", "")];

        {
            let storage = FileStorage::open(&path).await.unwrap();
            storage.save(&blocks).await.unwrap();
        }

        let storage = FileStorage::open(&path).await.unwrap();
        assert_eq!(storage.load().await.unwrap(), blocks);
        assert!(!storage.temp_path().exists());
    }

    #[tokio::test]
    async fn test_blank_file_loads_as_empty() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("data.json");
        std::fs::write(&path, "  \n").unwrap();

        let storage = FileStorage::open(&path).await.unwrap();
        assert!(storage.load().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_corrupt_file_reports_path() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("data.json");
        std::fs::write(&path, "{not json").unwrap();

        let storage = FileStorage::open(&path).await.unwrap();
        let err = storage.load().await.unwrap_err();
        assert!(matches!(err, Error::Corrupt { .. }));
        assert!(err.to_string().contains("data.json"));
    }

    #[tokio::test]
    async fn test_concurrent_saves_leave_valid_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let storage = std::sync::Arc::new(
            FileStorage::open(dir.path().join("data.json")).await.unwrap(),
        );

        let mut handles = Vec::new();
        for i in 0..8 {
            let storage = storage.clone();
            handles.push(tokio::spawn(async move {
                storage.save(&[Block::new(format!("{i}"), "")]).await
            }));
        }
        for handle in handles {
            handle.await.unwrap().unwrap();
        }

        let loaded = storage.load().await.unwrap();
        assert_eq!(loaded.len(), 1);
    }

    #[tokio::test]
    async fn test_failed_save_removes_temp_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("data.json");
        let storage = FileStorage::open(&path).await.unwrap();

        // A directory at the target path makes the rename fail.
        std::fs::remove_file(&path).unwrap();
        std::fs::create_dir(&path).unwrap();

        let err = storage.save(&[Block::new("lost", "")]).await.unwrap_err();
        assert!(matches!(err, Error::Io { .. }));
        assert!(!storage.temp_path().exists());
        assert!(path.is_dir());
    }

    #[test]
    fn test_temp_path_is_sibling() {
        let storage = FileStorage {
            path: PathBuf::from("/srv/pico/data.json"),
            write_lock: Mutex::new(()),
        };
        assert_eq!(storage.temp_path(), PathBuf::from("/srv/pico/data.json.tmp"));
        assert_eq!(storage.describe(), "file:/srv/pico/data.json");
    }
}
