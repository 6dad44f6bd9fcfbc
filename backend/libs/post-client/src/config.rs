//! Client configuration

/// Where the sync client finds the posts service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Service origin without the `/posts` suffix, e.g. `http://localhost:8080`
    pub base_url: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new("http://localhost:8080")
    }
}

impl ClientConfig {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim().trim_end_matches('/').to_string(),
        }
    }

    /// Read `POSTS_API_URL`, falling back to localhost.
    pub fn from_env() -> Self {
        match std::env::var("POSTS_API_URL") {
            Ok(url) if !url.trim().is_empty() => Self::new(&url),
            _ => Self::default(),
        }
    }

    pub fn posts_url(&self) -> String {
        format!("{}/posts", self.base_url)
    }

    pub fn post_url(&self, id: &str) -> String {
        format!("{}/posts/{}", self.base_url, urlencoding::encode(id))
    }
}
