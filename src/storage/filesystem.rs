use super::{key_segments, new_key, DocumentStore, StorageError};
use async_trait::async_trait;
use bytes::Bytes;
use std::{io::ErrorKind, path::PathBuf};
use tokio::{fs, io::AsyncWriteExt};
use uuid::Uuid;

/// Stores documents as plain files below `base_path`, one directory per key segment.
pub struct FilesystemStore {
    base_path: PathBuf,
}

impl FilesystemStore {
    pub async fn new(base_path: PathBuf) -> Result<Self, StorageError> {
        fs::create_dir_all(&base_path).await?;
        fs::create_dir_all(base_path.join(".tmp")).await?;

        Ok(Self { base_path })
    }

    fn path(&self, key: &str) -> Result<PathBuf, StorageError> {
        let mut path = self.base_path.clone();
        path.extend(key_segments(key)?);

        Ok(path)
    }

    fn temp_path(&self) -> PathBuf {
        self.base_path.join(".tmp").join(Uuid::new_v4().to_string())
    }
}

#[async_trait]
impl DocumentStore for FilesystemStore {
    async fn put(
        &self,
        collection: &str,
        file_name: &str,
        data: Bytes,
    ) -> Result<String, StorageError> {
        let key = new_key(collection, file_name);
        let path = self.path(&key)?;
        let temp_path = self.temp_path();

        let written = async {
            let mut file = fs::File::create(&temp_path).await?;
            file.write_all(&data).await?;
            file.flush().await?;
            drop(file);

            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent).await?;
            }

            fs::rename(&temp_path, &path).await
        }
        .await;

        if let Err(error) = written {
            let _ = fs::remove_file(&temp_path).await;
            return Err(error.into());
        }

        debug!(key = %key, size = data.len(), "stored document");

        Ok(key)
    }

    async fn get(&self, key: &str) -> Result<Vec<u8>, StorageError> {
        match fs::read(self.path(key)?).await {
            Ok(data) => Ok(data),
            Err(error) if error.kind() == ErrorKind::NotFound => Err(StorageError::NotFound),
            Err(error) => Err(error.into()),
        }
    }

    async fn delete(&self, key: &str) -> Result<bool, StorageError> {
        let path = self.path(key)?;

        match fs::remove_file(&path).await {
            Ok(()) => {}
            Err(error) if error.kind() == ErrorKind::NotFound => return Ok(false),
            Err(error) => return Err(error.into()),
        }

        // the per-document directory is empty now
        if let Some(parent) = path.parent() {
            let _ = fs::remove_dir(parent).await;
        }

        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn temp_store() -> (FilesystemStore, tempfile::TempDir) {
        let dir = tempfile::tempdir().unwrap();
        let store = FilesystemStore::new(dir.path().join("documents"))
            .await
            .unwrap();

        (store, dir)
    }

    #[tokio::test]
    async fn stored_document_can_be_read_back() {
        let (store, _dir) = temp_store().await;

        let key = store
            .put("lectures", "notes.pdf", Bytes::from_static(b"hello"))
            .await
            .unwrap();

        assert_eq!(store.get(&key).await.unwrap(), b"hello");
    }

    #[tokio::test]
    async fn same_file_name_gets_distinct_keys() {
        let (store, _dir) = temp_store().await;

        let first = store
            .put("lectures", "notes.pdf", Bytes::from_static(b"one"))
            .await
            .unwrap();
        let second = store
            .put("lectures", "notes.pdf", Bytes::from_static(b"two"))
            .await
            .unwrap();

        assert_ne!(first, second);
        assert_eq!(store.get(&first).await.unwrap(), b"one");
        assert_eq!(store.get(&second).await.unwrap(), b"two");
    }

    #[tokio::test]
    async fn deleted_document_is_gone() {
        let (store, _dir) = temp_store().await;

        let key = store
            .put("assignments", "task.txt", Bytes::from_static(b"task"))
            .await
            .unwrap();

        assert!(store.delete(&key).await.unwrap());
        assert!(!store.delete(&key).await.unwrap());
        assert!(matches!(store.get(&key).await, Err(StorageError::NotFound)));
    }

    #[tokio::test]
    async fn traversal_keys_are_rejected() {
        let (store, dir) = temp_store().await;
        std::fs::write(dir.path().join("secret"), b"secret").unwrap();

        assert!(matches!(
            store.get("../secret").await,
            Err(StorageError::InvalidKey(_))
        ));
    }
}
