//! Image storage for report photos.
//!
//! Handlers talk to the [`BlobStore`] trait so the backend can be swapped
//! without touching the upload paths. The default backend writes to a local
//! directory served back under `/uploads`.

use std::path::PathBuf;

use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Abstraction over where uploaded images land.
#[async_trait]
pub trait BlobStore: Send + Sync {
    /// Persist the bytes and return a public URL for the stored object.
    async fn store(&self, bytes: Vec<u8>, suggested_name: &str) -> Result<String, StorageError>;
}

/// Stores uploads on the local filesystem under a flat directory.
pub struct LocalBlobStore {
    root: PathBuf,
    public_base_url: String,
}

impl LocalBlobStore {
    pub fn new(root: impl Into<PathBuf>, public_base_url: impl Into<String>) -> Self {
        LocalBlobStore {
            root: root.into(),
            public_base_url: public_base_url.into(),
        }
    }

    /// Keep only the extension of the client-supplied filename; the stored
    /// name is a fresh UUID so uploads can never collide or traverse paths.
    fn object_name(suggested_name: &str) -> String {
        let ext = std::path::Path::new(suggested_name)
            .extension()
            .and_then(|e| e.to_str())
            .filter(|e| e.chars().all(|c| c.is_ascii_alphanumeric()) && e.len() <= 8);
        match ext {
            Some(ext) => format!("{}.{}", Uuid::new_v4(), ext.to_ascii_lowercase()),
            None => Uuid::new_v4().to_string(),
        }
    }
}

#[async_trait]
impl BlobStore for LocalBlobStore {
    async fn store(&self, bytes: Vec<u8>, suggested_name: &str) -> Result<String, StorageError> {
        tokio::fs::create_dir_all(&self.root).await?;

        let name = Self::object_name(suggested_name);
        let path = self.root.join(&name);
        tokio::fs::write(&path, bytes).await?;

        tracing::debug!(path = %path.display(), "stored uploaded image");
        Ok(format!("{}/uploads/{name}", self.public_base_url))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn object_name_keeps_safe_extension() {
        let name = LocalBlobStore::object_name("photo.JPG");
        assert!(name.ends_with(".jpg"));
    }

    #[test]
    fn object_name_drops_suspicious_extension() {
        let name = LocalBlobStore::object_name("../../etc/passwd");
        assert!(!name.contains('/'));
        assert!(!name.contains(".."));
    }

    #[tokio::test]
    async fn store_writes_file_and_returns_url() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = LocalBlobStore::new(dir.path(), "http://localhost:3000");

        let url = store
            .store(b"fake image bytes".to_vec(), "leak.png")
            .await
            .expect("store should succeed");

        assert!(url.starts_with("http://localhost:3000/uploads/"));
        assert!(url.ends_with(".png"));

        let name = url.rsplit('/').next().expect("url has a file name");
        let written = std::fs::read(dir.path().join(name)).expect("file exists");
        assert_eq!(written, b"fake image bytes");
    }
}
