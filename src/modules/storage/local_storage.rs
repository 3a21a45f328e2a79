use super::file_storage::{unique_file_name, FileStorage};
use crate::shared::errors::{AppError, AppResult};
use crate::{log_debug, log_warn};
use async_trait::async_trait;
use std::path::{Component, PathBuf};

/// Filesystem-backed storage served under a public base URL.
///
/// A file stored as `<root>/media/cover/x_1a2b3c4d.jpg` is referenced as
/// `<public_base_url>/media/cover/x_1a2b3c4d.jpg`.
pub struct LocalFileStorage {
    root: PathBuf,
    public_base_url: String,
}

impl LocalFileStorage {
    pub fn new(root: impl Into<PathBuf>, public_base_url: &str) -> Self {
        Self {
            root: root.into(),
            public_base_url: public_base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Relative path for one of our references; `None` for foreign or unsafe values
    fn relative_path(&self, reference: &str) -> Option<PathBuf> {
        let rest = reference
            .strip_prefix(&self.public_base_url)?
            .strip_prefix('/')?;
        let path = PathBuf::from(rest);
        let safe = path
            .components()
            .all(|component| matches!(component, Component::Normal(_)));
        (safe && !rest.is_empty()).then_some(path)
    }

    /// Read a stored file by its path relative to the storage root
    pub async fn read(&self, relative: &str) -> AppResult<Option<Vec<u8>>> {
        let path = PathBuf::from(relative);
        let safe = path
            .components()
            .all(|component| matches!(component, Component::Normal(_)));
        if !safe || relative.is_empty() {
            return Ok(None);
        }

        match tokio::fs::read(self.root.join(path)).await {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn clean_prefix(path_prefix: &str) -> AppResult<PathBuf> {
        let prefix = PathBuf::from(path_prefix.trim_matches('/'));
        if prefix
            .components()
            .any(|component| !matches!(component, Component::Normal(_)))
        {
            return Err(AppError::InvalidInput(format!(
                "Invalid storage prefix '{}'",
                path_prefix
            )));
        }
        Ok(prefix)
    }
}

#[async_trait]
impl FileStorage for LocalFileStorage {
    async fn store(
        &self,
        path_prefix: &str,
        file_name: &str,
        bytes: Vec<u8>,
        content_type: Option<String>,
    ) -> AppResult<String> {
        let prefix = Self::clean_prefix(path_prefix)?;
        let stored_name = unique_file_name(file_name, content_type.as_deref());

        let dir = self.root.join(&prefix);
        tokio::fs::create_dir_all(&dir).await.map_err(|e| {
            AppError::StorageError(format!("Failed to create {}: {}", dir.display(), e))
        })?;
        let target = dir.join(&stored_name);
        tokio::fs::write(&target, &bytes).await.map_err(|e| {
            AppError::StorageError(format!("Failed to write {}: {}", target.display(), e))
        })?;

        let relative = prefix.join(&stored_name);
        let reference = format!(
            "{}/{}",
            self.public_base_url,
            relative.to_string_lossy().replace('\\', "/")
        );
        log_debug!("Stored {} bytes as {}", bytes.len(), reference);
        Ok(reference)
    }

    async fn delete(&self, reference: &str) -> AppResult<bool> {
        let Some(relative) = self.relative_path(reference) else {
            log_warn!("Refusing to delete foreign reference {}", reference);
            return Ok(false);
        };

        match tokio::fs::remove_file(self.root.join(relative)).await {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }

    fn is_stored_reference(&self, value: &str) -> bool {
        self.relative_path(value).is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const BASE: &str = "http://localhost:8012/media";

    #[tokio::test]
    async fn stores_under_prefix_and_returns_public_reference() {
        let dir = TempDir::new().unwrap();
        let storage = LocalFileStorage::new(dir.path(), BASE);

        let reference = storage
            .store("media/cover", "cover.jpg", b"jpeg-bytes".to_vec(), None)
            .await
            .unwrap();

        assert!(reference.starts_with("http://localhost:8012/media/media/cover/cover_"));
        assert!(storage.is_stored_reference(&reference));

        let relative = reference.strip_prefix(&format!("{}/", BASE)).unwrap();
        let written = std::fs::read(dir.path().join(relative)).unwrap();
        assert_eq!(written, b"jpeg-bytes");
    }

    #[tokio::test]
    async fn delete_removes_our_files_only() {
        let dir = TempDir::new().unwrap();
        let storage = LocalFileStorage::new(dir.path(), BASE);
        let reference = storage
            .store("media/publisher", "logo.png", vec![1, 2, 3], None)
            .await
            .unwrap();

        assert!(storage.delete(&reference).await.unwrap());
        assert!(!storage.delete(&reference).await.unwrap());
        assert!(!storage
            .delete("https://image.aladin.co.kr/product/cover.jpg")
            .await
            .unwrap());
    }

    #[tokio::test]
    async fn reads_back_stored_files() {
        let dir = TempDir::new().unwrap();
        let storage = LocalFileStorage::new(dir.path(), BASE);
        let reference = storage
            .store("media/cover", "a.png", vec![9, 9], None)
            .await
            .unwrap();
        let relative = reference.strip_prefix(&format!("{}/", BASE)).unwrap();

        assert_eq!(storage.read(relative).await.unwrap(), Some(vec![9, 9]));
        assert_eq!(storage.read("../secret").await.unwrap(), None);
        assert_eq!(storage.read("media/cover/none.png").await.unwrap(), None);
    }

    #[test]
    fn rejects_traversal_references() {
        let storage = LocalFileStorage::new("/tmp/unused", BASE);
        assert!(!storage.is_stored_reference("http://localhost:8012/media/../etc/passwd"));
        assert!(!storage.is_stored_reference("http://localhost:8012/media/"));
        assert!(!storage.is_stored_reference("https://example.com/media/cover.jpg"));
    }

    #[tokio::test]
    async fn rejects_traversal_prefix() {
        let dir = TempDir::new().unwrap();
        let storage = LocalFileStorage::new(dir.path(), BASE);
        let err = storage
            .store("../outside", "x.jpg", vec![0], None)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::InvalidInput(_)));
    }
}
