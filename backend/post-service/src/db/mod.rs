/// Persistent store for the ordered post sequence
///
/// The store only knows two operations: read the whole sequence and replace the whole
/// sequence. It does no locking of its own; `PostCollection` serializes access.
use async_trait::async_trait;
use post_common::Post;
use thiserror::Error;

pub mod json_store;
pub mod memory_store;

pub use json_store::JsonFileStore;
pub use memory_store::MemoryStore;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("I/O failure: {0}")]
    Io(#[from] std::io::Error),

    #[error("persisted posts are unreadable: {0}")]
    Corrupt(#[from] serde_json::Error),
}

#[async_trait]
pub trait PostStore: Send + Sync {
    /// Full ordered sequence. Empty when nothing has been stored yet.
    async fn read_all(&self) -> Result<Vec<Post>, StoreError>;

    /// Atomically replace the stored sequence.
    async fn write_all(&self, posts: &[Post]) -> Result<(), StoreError>;

    /// Human-readable location, used in logs.
    fn location(&self) -> String;
}
