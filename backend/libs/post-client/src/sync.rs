//! Sync client - local cache of the ordered collection
//!
//! Create, update and delete await the service and then re-fetch the list. A drag
//! updates the cache first and pushes the new order in a background task; when that
//! push fails the client re-fetches and adopts whatever order the service returns.
//!
//! Requests are never cancelled. A response that arrives while the view is mounted is
//! applied even if the cache changed in the meantime; after `unmount` it is dropped.
//!
//! Drag pushes are not serialized either. Two quick drags send two independent
//! `PUT /posts` requests; if they reach the service out of order, both succeed, the
//! service keeps the older order, and the cache keeps showing the newer one until the
//! next fetch.

use std::sync::Arc;

use post_common::Post;
use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn};

use crate::api::{HttpPostsApi, PostsApi};
use crate::config::ClientConfig;
use crate::error::{ClientError, Result};
use crate::state::{move_post, ClientState, Draft, Editor, Phase, ViewSnapshot};

#[derive(Clone)]
pub struct SyncClient {
    api: Arc<dyn PostsApi>,
    state: Arc<RwLock<ClientState>>,
}

impl SyncClient {
    pub fn new(api: Arc<dyn PostsApi>) -> Self {
        Self {
            api,
            state: Arc::new(RwLock::new(ClientState::default())),
        }
    }

    pub fn http(config: ClientConfig) -> Self {
        Self::new(Arc::new(HttpPostsApi::new(config)))
    }

    pub async fn snapshot(&self) -> ViewSnapshot {
        self.state.read().await.snapshot()
    }

    /// Shown under an error message.
    pub fn error_hint(&self) -> String {
        format!("Make sure the backend is running on {}", self.api.base_url())
    }

    // ------------------------------------------------------------------
    // Loading
    // ------------------------------------------------------------------

    /// Enter `Loading` and fetch the list. On failure nothing is cached.
    pub async fn mount(&self) -> Result<()> {
        {
            let mut state = self.state.write().await;
            state.mounted = true;
            state.phase = Phase::Loading;
            state.posts.clear();
            state.refreshing = false;
            state.pending_write = false;
            state.editor = None;
        }
        self.fetch(true).await
    }

    /// Stop applying responses to the cache. In-flight requests still run.
    pub async fn unmount(&self) {
        self.state.write().await.mounted = false;
    }

    /// Re-fetch the list, keeping any cached posts visible meanwhile.
    pub async fn refresh(&self) -> Result<()> {
        {
            let mut state = self.state.write().await;
            if !state.mounted {
                return Err(ClientError::NotReady);
            }
            if state.phase == Phase::Ready || !state.posts.is_empty() {
                state.refreshing = true;
            } else {
                state.phase = Phase::Loading;
            }
        }
        self.fetch(false).await
    }

    async fn fetch(&self, initial: bool) -> Result<()> {
        let result = self.api.list().await;

        let mut state = self.state.write().await;
        if !state.mounted {
            debug!("dropping list response after unmount");
            return result.map(|_| ());
        }
        state.refreshing = false;

        match result {
            Ok(posts) => {
                debug!(count = posts.len(), "posts fetched");
                state.posts = posts;
                state.phase = Phase::Ready;
                Ok(())
            }
            Err(e) => {
                error!(error = %e, "Error fetching posts");
                if initial {
                    state.posts.clear();
                }
                state.phase = Phase::Error {
                    message: e.to_string(),
                };
                Err(e)
            }
        }
    }

    // ------------------------------------------------------------------
    // Pessimistic writes
    // ------------------------------------------------------------------

    pub async fn create(&self, draft: &Draft) -> Result<Post> {
        let draft = draft.trimmed()?;
        self.begin_write().await;
        let result = self.api.create(&draft.to_new_post()).await;
        self.finish_write("create", result).await
    }

    pub async fn update(&self, id: &str, draft: &Draft) -> Result<Post> {
        let draft = draft.trimmed()?;
        self.begin_write().await;
        let result = self.api.update(id, &draft.to_patch()).await;
        self.finish_write("update", result).await
    }

    pub async fn delete(&self, id: &str) -> Result<Post> {
        self.begin_write().await;
        let result = self.api.delete(id).await;
        self.finish_write("delete", result).await
    }

    async fn begin_write(&self) {
        self.state.write().await.pending_write = true;
    }

    /// On success resync from the service before clearing `pending_write`.
    /// On failure surface the error and leave the cache alone.
    async fn finish_write<T>(&self, operation: &'static str, result: Result<T>) -> Result<T> {
        match result {
            Ok(value) => {
                if let Err(e) = self.fetch(false).await {
                    warn!(operation, error = %e, "write succeeded but resync failed");
                }
                self.state.write().await.pending_write = false;
                Ok(value)
            }
            Err(e) => {
                error!(operation, error = %e, "Error saving post");
                let mut state = self.state.write().await;
                state.pending_write = false;
                if state.mounted {
                    state.phase = Phase::Error {
                        message: e.to_string(),
                    };
                }
                Err(e)
            }
        }
    }

    // ------------------------------------------------------------------
    // Edit surface
    // ------------------------------------------------------------------

    /// Open a blank surface for a new post.
    pub async fn open_create(&self) -> Result<()> {
        let mut state = self.state.write().await;
        if state.phase != Phase::Ready {
            return Err(ClientError::NotReady);
        }
        state.editor = Some(Editor::for_create());
        Ok(())
    }

    /// Open the surface for a cached post, pre-filled with its author and body.
    pub async fn open_editor(&self, id: &str) -> Result<Editor> {
        let mut state = self.state.write().await;
        if state.phase != Phase::Ready {
            return Err(ClientError::NotReady);
        }
        let post = state
            .posts
            .iter()
            .find(|p| p.id == id)
            .ok_or_else(|| ClientError::UnknownPost(id.to_string()))?;
        let editor = Editor::for_post(post);
        state.editor = Some(editor.clone());
        Ok(editor)
    }

    pub async fn close_editor(&self) {
        self.state.write().await.editor = None;
    }

    /// Submit the surface: update when it shows an existing post, create otherwise.
    /// A blank draft keeps the surface open; any submitted save closes it.
    pub async fn save_editor(&self, draft: &Draft) -> Result<Post> {
        let draft = draft.trimmed()?;
        let target = {
            let mut state = self.state.write().await;
            let editor = state.editor.take().ok_or(ClientError::EditorClosed)?;
            editor.target
        };
        match target {
            Some(id) => self.update(&id, &draft).await,
            None => self.create(&draft).await,
        }
    }

    /// Delete the post shown on the surface and close it.
    pub async fn delete_from_editor(&self) -> Result<Post> {
        let id = {
            let mut state = self.state.write().await;
            let target = match &state.editor {
                None => return Err(ClientError::EditorClosed),
                Some(editor) => editor.target.clone(),
            };
            let id = target.ok_or(ClientError::NoPostSelected)?;
            state.editor = None;
            id
        };
        self.delete(&id).await
    }

    // ------------------------------------------------------------------
    // Optimistic reorder
    // ------------------------------------------------------------------

    /// Drag-handle release: move the post at `from` to `to`.
    ///
    /// The cache changes before this returns. The returned task pushes the full order to
    /// the service; it resolves to the push error if the service rejected it (after the
    /// cache has been reconciled). `None` when the post was dropped where it started.
    pub async fn drag(&self, from: usize, to: usize) -> Result<Option<JoinHandle<Result<()>>>> {
        let order = {
            let mut state = self.state.write().await;
            if state.editor.is_some() {
                return Err(ClientError::DragDisabled);
            }
            if state.phase != Phase::Ready {
                return Err(ClientError::NotReady);
            }
            move_post(&mut state.posts, from, to)?;
            if from == to {
                return Ok(None);
            }
            state.posts.clone()
        };

        info!(from, to, count = order.len(), "posts reordered locally");
        let client = self.clone();
        Ok(Some(tokio::spawn(
            async move { client.push_order(order).await },
        )))
    }

    async fn push_order(&self, order: Vec<Post>) -> Result<()> {
        match self.api.reorder(&order).await {
            Ok(_) => {
                debug!(count = order.len(), "posts order saved");
                Ok(())
            }
            Err(e) => {
                error!(error = %e, "Error saving posts order");
                if let Err(reconcile) = self.fetch(false).await {
                    warn!(error = %reconcile, "reconciliation after failed reorder also failed");
                }
                Err(e)
            }
        }
    }
}
