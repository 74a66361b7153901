use bytes::Bytes;

use crate::domain::ArtifactPath;

/// Append-only persistence for per-request audit artifacts. Writes are
/// best-effort from the dispatcher's point of view; reads exist for tests
/// and for serving response audio.
#[async_trait::async_trait]
pub trait ArtifactStore: Send + Sync {
    async fn put(&self, path: &ArtifactPath, data: Bytes) -> Result<(), ArtifactStoreError>;

    async fn fetch(&self, path: &ArtifactPath) -> Result<Vec<u8>, ArtifactStoreError>;
}

#[derive(Debug, thiserror::Error)]
pub enum ArtifactStoreError {
    #[error("write failed: {0}")]
    WriteFailed(String),
    #[error("artifact not found: {0}")]
    NotFound(String),
    #[error("read failed: {0}")]
    ReadFailed(String),
}
