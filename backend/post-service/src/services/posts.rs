/// Post collection service - CRUD and reorder over the persisted sequence
use crate::db::PostStore;
use crate::error::{AppError, Result};
use crate::metrics::record_operation;
use crate::services::ordering::OrderingPolicy;
use post_common::{NewPost, Post, PostPatch};
use std::collections::HashSet;
use std::sync::Arc;
use tokio::sync::Mutex;
use uuid::Uuid;
use validator::Validate;

/// Every mutation is a full read-modify-write of the store. All of them, and reads,
/// run under `guard` so two requests never interleave their spans.
pub struct PostCollection {
    store: Arc<dyn PostStore>,
    policy: OrderingPolicy,
    guard: Mutex<()>,
}

impl PostCollection {
    pub fn new(store: Arc<dyn PostStore>) -> Self {
        Self::with_policy(store, OrderingPolicy::default())
    }

    pub fn with_policy(store: Arc<dyn PostStore>, policy: OrderingPolicy) -> Self {
        Self {
            store,
            policy,
            guard: Mutex::new(()),
        }
    }

    pub fn policy(&self) -> OrderingPolicy {
        self.policy
    }

    pub fn store_location(&self) -> String {
        self.store.location()
    }

    /// Current ordered sequence
    pub async fn list(&self) -> Result<Vec<Post>> {
        let _guard = self.guard.lock().await;
        let result = self.store.read_all().await.map_err(AppError::from);
        record_operation("list", &result);
        result
    }

    /// Get a post by ID
    pub async fn get(&self, id: &str) -> Result<Post> {
        let _guard = self.guard.lock().await;
        let result = self
            .store
            .read_all()
            .await
            .map_err(AppError::from)
            .and_then(|posts| {
                posts
                    .into_iter()
                    .find(|p| p.id == id)
                    .ok_or(AppError::NotFound)
            });
        record_operation("get", &result);
        result
    }

    /// Create a new post with a fresh id, placed per the ordering policy
    pub async fn create(&self, new_post: NewPost) -> Result<Post> {
        let result = self.create_locked(new_post).await;
        record_operation("create", &result);
        result
    }

    async fn create_locked(&self, new_post: NewPost) -> Result<Post> {
        let draft = new_post.normalized();
        draft.validate()?;

        let _guard = self.guard.lock().await;
        let mut posts = self.store.read_all().await?;

        let taken: HashSet<&str> = posts.iter().map(|p| p.id.as_str()).collect();
        let id = fresh_id(&taken);
        let post = draft.into_post(id);

        self.policy.insert(&mut posts, post.clone());
        self.store.write_all(&posts).await?;

        tracing::info!(post_id = %post.id, total = posts.len(), "post created");
        Ok(post)
    }

    /// Merge supplied fields onto an existing post; position and id never change
    pub async fn update(&self, id: &str, patch: PostPatch) -> Result<Post> {
        let result = self.update_locked(id, patch).await;
        record_operation("update", &result);
        result
    }

    async fn update_locked(&self, id: &str, patch: PostPatch) -> Result<Post> {
        if let Some(forged) = patch.id.as_deref().filter(|forged| *forged != id) {
            tracing::debug!(post_id = %id, payload_id = %forged, "ignoring id in update payload");
        }
        let patch = patch.normalized();
        patch.validate()?;

        let _guard = self.guard.lock().await;
        let mut posts = self.store.read_all().await?;
        let index = posts
            .iter()
            .position(|p| p.id == id)
            .ok_or(AppError::NotFound)?;

        let merged = patch.apply_to(&posts[index]);
        posts[index] = merged.clone();
        self.store.write_all(&posts).await?;

        tracing::info!(post_id = %id, position = index, "post updated");
        Ok(merged)
    }

    /// Remove a post and return it
    pub async fn delete(&self, id: &str) -> Result<Post> {
        let result = self.delete_locked(id).await;
        record_operation("delete", &result);
        result
    }

    async fn delete_locked(&self, id: &str) -> Result<Post> {
        let _guard = self.guard.lock().await;
        let mut posts = self.store.read_all().await?;
        let index = posts
            .iter()
            .position(|p| p.id == id)
            .ok_or(AppError::NotFound)?;

        let removed = posts.remove(index);
        self.store.write_all(&posts).await?;

        tracing::info!(post_id = %id, total = posts.len(), "post deleted");
        Ok(removed)
    }

    /// Replace the stored sequence with the caller's snapshot.
    ///
    /// The snapshot is only checked for shape (required fields non-blank, unique ids) and
    /// is stored exactly as received. It is not compared against what is stored, so a
    /// stale snapshot overwrites concurrent creates and deletes.
    pub async fn reorder(&self, snapshot: Vec<Post>) -> Result<Vec<Post>> {
        let result = self.reorder_locked(snapshot).await;
        record_operation("reorder", &result);
        result
    }

    async fn reorder_locked(&self, snapshot: Vec<Post>) -> Result<Vec<Post>> {
        let snapshot = validate_snapshot(snapshot)?;

        let _guard = self.guard.lock().await;
        let current = self.store.read_all().await?;
        let before = current.len();
        let posts = self.policy.reorder(current, snapshot);
        self.store.write_all(&posts).await?;

        if before != posts.len() {
            tracing::warn!(
                stored = before,
                submitted = posts.len(),
                "reorder snapshot changed collection membership"
            );
        }
        tracing::info!(total = posts.len(), "posts reordered");
        Ok(posts)
    }

    /// Whether the store can currently be read
    pub async fn check_ready(&self) -> Result<usize> {
        let _guard = self.guard.lock().await;
        Ok(self.store.read_all().await?.len())
    }
}

fn fresh_id(taken: &HashSet<&str>) -> String {
    loop {
        let candidate = Uuid::new_v4().to_string();
        if !taken.contains(candidate.as_str()) {
            return candidate;
        }
    }
}

fn validate_snapshot(snapshot: Vec<Post>) -> Result<Vec<Post>> {
    let mut seen = HashSet::with_capacity(snapshot.len());
    snapshot
        .into_iter()
        .map(|post| {
            post.normalized().validate()?;
            if !seen.insert(post.id.clone()) {
                return Err(AppError::MalformedRequest(format!(
                    "duplicate post id in reorder: {}",
                    post.id
                )));
            }
            Ok(post)
        })
        .collect()
}
