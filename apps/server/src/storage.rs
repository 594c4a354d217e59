//! # Object Storage
//!
//! Buckets of public objects addressed by relative path. The only bucket in
//! use is `logos`, holding the uploaded branding image.
//!
//! ```text
//!   upload("logo.png")  ──►  {storage_root}/logos/logo.png
//!   public_url("logo.png") ──► {public_base_url}/storage/logos/logo.png
//! ```
//!
//! The router serves `{storage_root}` under `/storage`, so every URL from
//! [`StorageBackend::public_url`] is immediately fetchable.

use std::path::{Component, Path, PathBuf};

use async_trait::async_trait;
use tracing::debug;

/// Bucket holding the branding logo.
pub const LOGO_BUCKET: &str = "logos";

#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("Invalid object path: {0}")]
    InvalidPath(String),

    #[error("The resource already exists")]
    AlreadyExists,

    #[error("Storage I/O failed: {0}")]
    Io(#[from] std::io::Error),
}

pub type StorageResult<T> = Result<T, StorageError>;

/// Backend-independent bucket interface.
#[async_trait]
pub trait StorageBackend: Send + Sync {
    /// Writes an object. Without `upsert`, an existing object is an error.
    async fn upload(&self, path: &str, data: &[u8], upsert: bool) -> StorageResult<()>;

    /// Removes objects. Missing objects are skipped.
    async fn remove(&self, paths: &[String]) -> StorageResult<()>;

    /// Public URL of an object (whether or not it exists).
    fn public_url(&self, path: &str) -> String;

    fn bucket(&self) -> &str;
}

/// A bucket stored as a directory on the local filesystem.
#[derive(Debug, Clone)]
pub struct LocalBucket {
    dir: PathBuf,
    bucket: String,
    public_base_url: String,
}

impl LocalBucket {
    pub fn new(storage_root: &Path, bucket: &str, public_base_url: &str) -> Self {
        LocalBucket {
            dir: storage_root.join(bucket),
            bucket: bucket.to_string(),
            public_base_url: public_base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Resolves `path` inside the bucket directory, rejecting escapes.
    fn resolve(&self, path: &str) -> StorageResult<PathBuf> {
        let relative = Path::new(path);
        let is_plain = !path.is_empty()
            && relative
                .components()
                .all(|c| matches!(c, Component::Normal(_)));

        if !is_plain {
            return Err(StorageError::InvalidPath(path.to_string()));
        }
        Ok(self.dir.join(relative))
    }
}

#[async_trait]
impl StorageBackend for LocalBucket {
    async fn upload(&self, path: &str, data: &[u8], upsert: bool) -> StorageResult<()> {
        let target = self.resolve(path)?;

        if !upsert && tokio::fs::try_exists(&target).await? {
            return Err(StorageError::AlreadyExists);
        }
        if let Some(parent) = target.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(&target, data).await?;

        debug!(bucket = %self.bucket, path = %path, bytes = data.len(), "Object uploaded");
        Ok(())
    }

    async fn remove(&self, paths: &[String]) -> StorageResult<()> {
        for path in paths {
            let target = self.resolve(path)?;
            match tokio::fs::remove_file(&target).await {
                Ok(()) => debug!(bucket = %self.bucket, path = %path, "Object removed"),
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
                Err(e) => return Err(e.into()),
            }
        }
        Ok(())
    }

    fn public_url(&self, path: &str) -> String {
        format!("{}/storage/{}/{}", self.public_base_url, self.bucket, path)
    }

    fn bucket(&self) -> &str {
        &self.bucket
    }
}
