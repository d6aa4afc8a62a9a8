//! Document storage for uploaded lecture, assignable and submission files.
//!
//! Documents are addressed by keys of the form `<collection>/<uuid>/<file name>`,
//! which are what the database stores in the `document` columns.

mod filesystem;

pub use filesystem::*;

use async_trait::async_trait;
use bytes::Bytes;
use uuid::Uuid;

#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("document not found")]
    NotFound,
    #[error("invalid document key: {0}")]
    InvalidKey(String),
    #[error("storage io error: {0}")]
    Io(#[from] std::io::Error),
}

#[async_trait]
pub trait DocumentStore: Send + Sync + 'static {
    /// Stores `data` under a fresh key in `collection` and returns the key.
    async fn put(&self, collection: &str, file_name: &str, data: Bytes)
        -> Result<String, StorageError>;

    async fn get(&self, key: &str) -> Result<Vec<u8>, StorageError>;

    /// Returns `false` if there was nothing to delete.
    async fn delete(&self, key: &str) -> Result<bool, StorageError>;
}

/// Builds a new key, keeping only the harmless characters of the uploaded file name.
pub fn new_key(collection: &str, file_name: &str) -> String {
    let base = file_name
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or_default();

    let mut sanitized: String = base
        .chars()
        .map(|c| match c {
            'a'..='z' | 'A'..='Z' | '0'..='9' | '.' | '-' | '_' => c,
            _ => '_',
        })
        .collect();

    if sanitized.is_empty() || sanitized.starts_with('.') {
        sanitized.insert_str(0, "document");
    }

    format!("{collection}/{}/{sanitized}", Uuid::new_v4())
}

/// Splits a key into its segments, rejecting anything that could escape the store.
pub fn key_segments(key: &str) -> Result<Vec<&str>, StorageError> {
    if key.is_empty() || key.starts_with('/') || key.contains('\\') {
        return Err(StorageError::InvalidKey(key.to_owned()));
    }

    let segments: Vec<&str> = key.split('/').collect();

    if segments
        .iter()
        .any(|segment| segment.is_empty() || *segment == "." || *segment == "..")
    {
        return Err(StorageError::InvalidKey(key.to_owned()));
    }

    Ok(segments)
}
