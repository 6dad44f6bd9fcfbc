/// In-memory store, used for ephemeral runs and tests
use super::{PostStore, StoreError};
use async_trait::async_trait;
use post_common::Post;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::RwLock;

#[derive(Debug, Default)]
pub struct MemoryStore {
    posts: RwLock<Vec<Post>>,
    fail_reads: AtomicBool,
    fail_writes: AtomicBool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_posts(posts: Vec<Post>) -> Self {
        Self {
            posts: RwLock::new(posts),
            ..Self::default()
        }
    }

    /// Make subsequent reads fail with an I/O error.
    pub fn set_fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::SeqCst);
    }

    /// Make subsequent writes fail with an I/O error, leaving the stored sequence as is.
    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }
}

#[async_trait]
impl PostStore for MemoryStore {
    async fn read_all(&self) -> Result<Vec<Post>, StoreError> {
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(std::io::Error::other("injected read failure").into());
        }
        Ok(self.posts.read().await.clone())
    }

    async fn write_all(&self, posts: &[Post]) -> Result<(), StoreError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(std::io::Error::other("injected write failure").into());
        }
        *self.posts.write().await = posts.to_vec();
        Ok(())
    }

    fn location(&self) -> String {
        "memory".to_string()
    }
}
