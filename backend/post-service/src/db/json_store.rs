/// JSON file store - the whole sequence lives in one file as a JSON array
use super::{PostStore, StoreError};
use crate::metrics::STORE_WRITE_DURATION_SECONDS;
use async_trait::async_trait;
use post_common::Post;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tempfile::NamedTempFile;

#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl PostStore for JsonFileStore {
    async fn read_all(&self) -> Result<Vec<Post>, StoreError> {
        let bytes = match tokio::fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %self.path.display(), "no stored posts yet");
                return Ok(Vec::new());
            }
            Err(err) => return Err(err.into()),
        };

        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(Vec::new());
        }

        Ok(serde_json::from_slice(&bytes)?)
    }

    async fn write_all(&self, posts: &[Post]) -> Result<(), StoreError> {
        let payload = serde_json::to_vec_pretty(posts)?;
        let path = self.path.clone();
        let start = Instant::now();

        tokio::task::spawn_blocking(move || replace_file(&path, &payload))
            .await
            .map_err(|e| std::io::Error::other(format!("store writer panicked: {e}")))??;

        STORE_WRITE_DURATION_SECONDS.observe(start.elapsed().as_secs_f64());
        tracing::debug!(path = %self.path.display(), count = posts.len(), "posts persisted");
        Ok(())
    }

    fn location(&self) -> String {
        self.path.display().to_string()
    }
}

/// Write to a sibling temp file, fsync, then rename over `path`.
/// Readers see either the old sequence or the new one, never a prefix.
fn replace_file(path: &Path, payload: &[u8]) -> Result<(), StoreError> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };
    std::fs::create_dir_all(&dir)?;

    let mut tmp = NamedTempFile::new_in(&dir)?;
    tmp.write_all(payload)?;
    tmp.as_file().sync_all()?;
    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn post(id: &str, author: &str) -> Post {
        Post {
            id: id.to_string(),
            author: author.to_string(),
            body: format!("body of {id}"),
            title: None,
        }
    }

    #[tokio::test]
    async fn test_missing_file_reads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().join("posts.json"));
        assert!(store.read_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_blank_file_reads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("posts.json");
        std::fs::write(&path, "  \n").unwrap();
        let store = JsonFileStore::new(path);
        assert!(store.read_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_write_then_read_preserves_order_and_content() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().join("posts.json"));
        let mut titled = post("b", "Bob");
        titled.title = Some("Greeting".to_string());
        let sequence = vec![post("c", "Carol"), titled, post("a", "Alice")];

        store.write_all(&sequence).await.unwrap();

        assert_eq!(store.read_all().await.unwrap(), sequence);
    }

    #[tokio::test]
    async fn test_write_replaces_previous_sequence() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().join("posts.json"));
        store
            .write_all(&[post("a", "Alice"), post("b", "Bob")])
            .await
            .unwrap();
        store.write_all(&[post("z", "Zed")]).await.unwrap();

        assert_eq!(store.read_all().await.unwrap(), vec![post("z", "Zed")]);
    }

    #[tokio::test]
    async fn test_sequence_survives_a_new_store_instance() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("posts.json");
        JsonFileStore::new(&path)
            .write_all(&[post("a", "Alice")])
            .await
            .unwrap();

        let reopened = JsonFileStore::new(&path);
        assert_eq!(reopened.read_all().await.unwrap(), vec![post("a", "Alice")]);
    }

    #[tokio::test]
    async fn test_persisted_layout_is_a_bare_array() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("posts.json");
        JsonFileStore::new(&path)
            .write_all(&[post("a", "Alice")])
            .await
            .unwrap();

        let raw: serde_json::Value =
            serde_json::from_slice(&std::fs::read(&path).unwrap()).unwrap();
        assert_eq!(
            raw,
            serde_json::json!([{"id": "a", "author": "Alice", "body": "body of a"}])
        );
    }

    #[tokio::test]
    async fn test_corrupt_file_is_a_storage_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("posts.json");
        std::fs::write(&path, "{\"posts\": oops").unwrap();

        let err = JsonFileStore::new(path).read_all().await.unwrap_err();
        assert!(matches!(err, StoreError::Corrupt(_)));
    }

    #[tokio::test]
    async fn test_unwritable_location_is_a_storage_error() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("not-a-dir");
        std::fs::write(&blocker, "file").unwrap();

        let store = JsonFileStore::new(blocker.join("posts.json"));
        let err = store.write_all(&[post("a", "Alice")]).await.unwrap_err();
        assert!(matches!(err, StoreError::Io(_)));
    }
}
