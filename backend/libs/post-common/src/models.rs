//! Shared data models for the posts API
//!
//! Request payloads are strict: unknown fields are rejected at deserialization and
//! required text fields are checked with `validator` after trimming.
//! An `id` carried inside a create or update payload is tolerated but never trusted.

use serde::{Deserialize, Serialize};
use validator::Validate;

// ============================================================================
// RESPONSE MESSAGES
// ============================================================================

pub const MSG_CREATED: &str = "Stored new post.";
pub const MSG_UPDATED: &str = "Post updated.";
pub const MSG_DELETED: &str = "Post deleted.";
pub const MSG_REORDERED: &str = "Posts order updated.";
pub const MSG_NOT_FOUND: &str = "Post not found";

// ============================================================================
// POST
// ============================================================================

/// A short text record. Its position in the collection is its order.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct Post {
    #[validate(length(min = 1, message = "id must not be empty"))]
    pub id: String,
    #[validate(length(min = 1, message = "author must not be empty"))]
    pub author: String,
    #[validate(length(min = 1, message = "body must not be empty"))]
    pub body: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

impl Post {
    /// Copy of this post with every field trimmed.
    pub fn normalized(&self) -> Self {
        Self {
            id: self.id.trim().to_string(),
            author: self.author.trim().to_string(),
            body: self.body.trim().to_string(),
            title: self.title.as_deref().map(|t| t.trim().to_string()),
        }
    }
}

/// Payload for `POST /posts`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct NewPost {
    /// Ignored; the service always assigns a fresh id.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[validate(length(min = 1, message = "author must not be empty"))]
    pub author: String,
    #[validate(length(min = 1, message = "body must not be empty"))]
    pub body: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

impl NewPost {
    pub fn new(author: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            id: None,
            author: author.into(),
            body: body.into(),
            title: None,
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn normalized(&self) -> Self {
        Self {
            id: None,
            author: self.author.trim().to_string(),
            body: self.body.trim().to_string(),
            title: self.title.as_deref().map(|t| t.trim().to_string()),
        }
    }

    /// Materialize the payload as a post carrying `id`.
    pub fn into_post(self, id: String) -> Post {
        Post {
            id,
            author: self.author,
            body: self.body,
            title: self.title,
        }
    }
}

/// Payload for `PUT /posts/{id}`. Absent fields keep their stored value.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct PostPatch {
    /// Ignored; the path id always wins.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 1, message = "author must not be empty"))]
    pub author: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 1, message = "body must not be empty"))]
    pub body: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

impl PostPatch {
    pub fn normalized(&self) -> Self {
        Self {
            id: None,
            author: self.author.as_deref().map(|a| a.trim().to_string()),
            body: self.body.as_deref().map(|b| b.trim().to_string()),
            title: self.title.as_deref().map(|t| t.trim().to_string()),
        }
    }

    /// Merge the supplied fields onto `existing`, keeping the existing id.
    pub fn apply_to(&self, existing: &Post) -> Post {
        Post {
            id: existing.id.clone(),
            author: self
                .author
                .clone()
                .unwrap_or_else(|| existing.author.clone()),
            body: self.body.clone().unwrap_or_else(|| existing.body.clone()),
            title: self.title.clone().or_else(|| existing.title.clone()),
        }
    }
}

// ============================================================================
// RESPONSE ENVELOPES
// ============================================================================

/// `GET /posts`
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostsEnvelope {
    #[serde(default)]
    pub posts: Vec<Post>,
}

/// `GET /posts/{id}`; `post` is omitted when the id is unknown.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostEnvelope {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub post: Option<Post>,
}

/// Create, update and delete responses.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostMessage {
    pub message: String,
    pub post: Post,
}

/// Reorder response.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostsMessage {
    pub message: String,
    pub posts: Vec<Post>,
}

/// Body of every non-2xx response.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn post(id: &str) -> Post {
        Post {
            id: id.to_string(),
            author: "Alice".to_string(),
            body: "Hello".to_string(),
            title: None,
        }
    }

    #[test]
    fn test_post_omits_absent_title() {
        let json = serde_json::to_value(post("1")).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"id": "1", "author": "Alice", "body": "Hello"})
        );
    }

    #[test]
    fn test_new_post_rejects_unknown_fields() {
        let result = serde_json::from_str::<NewPost>(
            r#"{"author":"Alice","body":"Hello","rank":3}"#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_new_post_requires_author_and_body() {
        assert!(serde_json::from_str::<NewPost>(r#"{"author":"Alice"}"#).is_err());
        assert!(serde_json::from_str::<NewPost>(r#"{"body":"Hello"}"#).is_err());
    }

    #[test]
    fn test_new_post_tolerates_id() {
        let parsed: NewPost =
            serde_json::from_str(r#"{"id":"x","author":"Alice","body":"Hello"}"#).unwrap();
        assert_eq!(parsed.id.as_deref(), Some("x"));
        assert_eq!(parsed.normalized().id, None);
    }

    #[test]
    fn test_blank_fields_fail_validation_after_trim() {
        let draft = NewPost::new("   ", "Hello").normalized();
        assert!(draft.validate().is_err());

        let patch = PostPatch {
            body: Some("\n\t".to_string()),
            ..Default::default()
        }
        .normalized();
        assert!(patch.validate().is_err());
    }

    #[test]
    fn test_whitespace_id_fails_validation_after_trim() {
        let mut blank = post("x");
        blank.id = " \t".to_string();
        assert!(blank.validate().is_ok());
        assert!(blank.normalized().validate().is_err());
    }

    #[test]
    fn test_empty_patch_is_valid() {
        assert!(PostPatch::default().validate().is_ok());
    }

    #[test]
    fn test_patch_keeps_existing_id() {
        let existing = post("real");
        let patch = PostPatch {
            id: Some("forged".to_string()),
            author: Some("Bob".to_string()),
            ..Default::default()
        };
        let merged = patch.apply_to(&existing);
        assert_eq!(merged.id, "real");
        assert_eq!(merged.author, "Bob");
        assert_eq!(merged.body, "Hello");
    }

    #[test]
    fn test_post_envelope_omits_missing_post() {
        let json = serde_json::to_string(&PostEnvelope { post: None }).unwrap();
        assert_eq!(json, "{}");
    }
}
