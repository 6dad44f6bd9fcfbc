//! HTTP transport for the posts API
//!
//! `PostsApi` is the seam the sync client talks through; `HttpPostsApi` is the
//! reqwest-backed implementation. No timeout is configured beyond reqwest's defaults.

use async_trait::async_trait;
use post_common::{
    ErrorBody, NewPost, Post, PostEnvelope, PostMessage, PostPatch, PostsEnvelope, PostsMessage,
};
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::config::ClientConfig;
use crate::error::{ClientError, Result};

#[async_trait]
pub trait PostsApi: Send + Sync {
    /// GET /posts
    async fn list(&self) -> Result<Vec<Post>>;

    /// GET /posts/{id}; `None` when the service has no such post
    async fn get(&self, id: &str) -> Result<Option<Post>>;

    /// POST /posts
    async fn create(&self, post: &NewPost) -> Result<Post>;

    /// PUT /posts/{id}
    async fn update(&self, id: &str, patch: &PostPatch) -> Result<Post>;

    /// DELETE /posts/{id}
    async fn delete(&self, id: &str) -> Result<Post>;

    /// PUT /posts with the full ordered sequence
    async fn reorder(&self, posts: &[Post]) -> Result<Vec<Post>>;

    /// Service origin, used in user-facing hints
    fn base_url(&self) -> String;
}

/// Posts API client over HTTP + JSON
pub struct HttpPostsApi {
    client: Client,
    config: ClientConfig,
}

impl HttpPostsApi {
    pub fn new(config: ClientConfig) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }

    pub fn with_client(client: Client, config: ClientConfig) -> Self {
        Self { client, config }
    }

    async fn decode<T: DeserializeOwned>(response: Response) -> Result<T> {
        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            let detail = serde_json::from_str::<ErrorBody>(&text)
                .map(|body| body.message)
                .unwrap_or(text);
            return Err(ClientError::Status {
                status: status.as_u16(),
                detail,
            });
        }

        response
            .json::<T>()
            .await
            .map_err(|e| ClientError::Decode(e.to_string()))
    }
}

fn transport(err: reqwest::Error) -> ClientError {
    ClientError::Transport(err.to_string())
}

#[async_trait]
impl PostsApi for HttpPostsApi {
    async fn list(&self) -> Result<Vec<Post>> {
        let url = self.config.posts_url();
        debug!(%url, "GET posts");
        let response = self.client.get(&url).send().await.map_err(transport)?;
        let envelope: PostsEnvelope = Self::decode(response).await?;
        Ok(envelope.posts)
    }

    async fn get(&self, id: &str) -> Result<Option<Post>> {
        let url = self.config.post_url(id);
        debug!(%url, "GET post");
        let response = self.client.get(&url).send().await.map_err(transport)?;
        let envelope: PostEnvelope = Self::decode(response).await?;
        Ok(envelope.post)
    }

    async fn create(&self, post: &NewPost) -> Result<Post> {
        let url = self.config.posts_url();
        debug!(%url, "POST post");
        let response = self
            .client
            .post(&url)
            .json(post)
            .send()
            .await
            .map_err(transport)?;
        let message: PostMessage = Self::decode(response).await?;
        Ok(message.post)
    }

    async fn update(&self, id: &str, patch: &PostPatch) -> Result<Post> {
        let url = self.config.post_url(id);
        debug!(%url, "PUT post");
        let response = self
            .client
            .put(&url)
            .json(patch)
            .send()
            .await
            .map_err(transport)?;
        let message: PostMessage = Self::decode(response).await?;
        Ok(message.post)
    }

    async fn delete(&self, id: &str) -> Result<Post> {
        let url = self.config.post_url(id);
        debug!(%url, "DELETE post");
        let response = self.client.delete(&url).send().await.map_err(transport)?;
        let message: PostMessage = Self::decode(response).await?;
        Ok(message.post)
    }

    async fn reorder(&self, posts: &[Post]) -> Result<Vec<Post>> {
        let url = self.config.posts_url();
        debug!(%url, count = posts.len(), "PUT posts order");
        let response = self
            .client
            .put(&url)
            .json(posts)
            .send()
            .await
            .map_err(transport)?;
        let message: PostsMessage = Self::decode(response).await?;
        Ok(message.posts)
    }

    fn base_url(&self) -> String {
        self.config.base_url.clone()
    }
}
