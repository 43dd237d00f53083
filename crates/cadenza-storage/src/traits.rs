//! Storage abstraction trait
//!
//! This module defines the Storage trait that all storage backends must
//! implement.

use async_trait::async_trait;
use cadenza_core::{PipelineError, StorageBackend};
use thiserror::Error;

/// Storage operation errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("List failed: {0}")]
    ListFailed(String),

    #[error("Upload failed: {0}")]
    UploadFailed(String),

    #[error("Download failed: {0}")]
    DownloadFailed(String),

    #[error("Copy failed: {0}")]
    CopyFailed(String),

    #[error("Delete failed: {0}")]
    DeleteFailed(String),

    #[error("Object not found: {0}")]
    NotFound(String),

    #[error("Invalid storage key: {0}")]
    InvalidKey(String),

    #[error("Storage backend error: {0}")]
    BackendError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

impl From<StorageError> for PipelineError {
    fn from(err: StorageError) -> Self {
        PipelineError::StoreUnavailable(err.to_string())
    }
}

/// Storage abstraction trait
///
/// All storage backends (S3, local filesystem) must implement this trait.
/// This allows the relocator and the function handlers to work with any
/// backend without coupling to implementation details.
#[async_trait]
pub trait Storage: Send + Sync {
    /// List every key whose name starts with `prefix`, in backend listing
    /// order.
    ///
    /// The listing is complete: backends whose underlying API paginates
    /// must drain all pages before returning.
    async fn list(&self, prefix: &str) -> StorageResult<Vec<String>>;

    /// Write data to a storage key, overwriting any existing object.
    async fn upload(&self, key: &str, data: Vec<u8>) -> StorageResult<()>;

    /// Read an object by its storage key.
    async fn download(&self, key: &str) -> StorageResult<Vec<u8>>;

    /// Copy an object from one key to another within the same bucket,
    /// overwriting any existing object at `to_key`.
    async fn copy(&self, from_key: &str, to_key: &str) -> StorageResult<()>;

    /// Delete an object by its storage key.
    ///
    /// Deleting a key that does not exist is a success, so a relocation
    /// retried after a copy-succeeded/delete-failed state converges.
    async fn delete(&self, key: &str) -> StorageResult<()>;

    /// Check if an object exists
    async fn exists(&self, key: &str) -> StorageResult<bool>;

    /// Get the storage backend type
    fn backend_type(&self) -> StorageBackend;
}
