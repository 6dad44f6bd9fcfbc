//! View state held by the sync client
//!
//! Rendering is somebody else's job; this module only tracks what a list screen needs
//! to know: which phase it is in, the cached posts, and whether an edit surface is open.

use post_common::{NewPost, Post, PostPatch};

use crate::error::{ClientError, Result};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Phase {
    /// Initial fetch in flight, nothing to show yet
    Loading,
    Ready,
    Error { message: String },
}

/// Author/body as typed into the edit surface
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Draft {
    pub author: String,
    pub body: String,
}

impl Draft {
    pub fn new(author: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            author: author.into(),
            body: body.into(),
        }
    }

    /// Save is enabled only when both fields have content after trimming.
    pub fn can_save(&self) -> bool {
        !self.author.trim().is_empty() && !self.body.trim().is_empty()
    }

    /// Trimmed copy, or `InvalidDraft` when a field is blank.
    pub fn trimmed(&self) -> Result<Draft> {
        let author = self.author.trim();
        let body = self.body.trim();
        if author.is_empty() {
            return Err(ClientError::InvalidDraft("author must not be empty".into()));
        }
        if body.is_empty() {
            return Err(ClientError::InvalidDraft("body must not be empty".into()));
        }
        Ok(Draft::new(author, body))
    }

    pub(crate) fn to_new_post(&self) -> NewPost {
        NewPost::new(self.author.clone(), self.body.clone())
    }

    pub(crate) fn to_patch(&self) -> PostPatch {
        PostPatch {
            author: Some(self.author.clone()),
            body: Some(self.body.clone()),
            ..Default::default()
        }
    }
}

/// An open edit surface. `target` is `None` when creating.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Editor {
    pub target: Option<String>,
    pub draft: Draft,
}

impl Editor {
    pub fn for_create() -> Self {
        Self {
            target: None,
            draft: Draft::default(),
        }
    }

    pub fn for_post(post: &Post) -> Self {
        Self {
            target: Some(post.id.clone()),
            draft: Draft::new(post.author.clone(), post.body.clone()),
        }
    }

    pub fn is_create(&self) -> bool {
        self.target.is_none()
    }
}

/// Point-in-time copy of the client state for rendering and assertions
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewSnapshot {
    pub phase: Phase,
    pub posts: Vec<Post>,
    pub pending_write: bool,
    pub refreshing: bool,
    pub editor: Option<Editor>,
}

impl ViewSnapshot {
    pub fn is_ready(&self) -> bool {
        self.phase == Phase::Ready
    }

    /// The "create new post" affordance is shown whenever the list is ready.
    pub fn can_create(&self) -> bool {
        self.is_ready()
    }

    /// Drag handles are live only while ready and no edit surface is open.
    pub fn can_drag(&self) -> bool {
        self.is_ready() && self.editor.is_none()
    }

    /// Ready with nothing to show ("No posts available").
    pub fn is_empty(&self) -> bool {
        self.is_ready() && self.posts.is_empty()
    }

    pub fn error_message(&self) -> Option<&str> {
        match &self.phase {
            Phase::Error { message } => Some(message),
            _ => None,
        }
    }

    pub fn ids(&self) -> Vec<&str> {
        self.posts.iter().map(|p| p.id.as_str()).collect()
    }
}

#[derive(Debug)]
pub(crate) struct ClientState {
    pub phase: Phase,
    pub posts: Vec<Post>,
    pub pending_write: bool,
    pub refreshing: bool,
    pub editor: Option<Editor>,
    pub mounted: bool,
}

impl Default for ClientState {
    fn default() -> Self {
        Self {
            phase: Phase::Loading,
            posts: Vec::new(),
            pending_write: false,
            refreshing: false,
            editor: None,
            mounted: false,
        }
    }
}

impl ClientState {
    pub fn snapshot(&self) -> ViewSnapshot {
        ViewSnapshot {
            phase: self.phase.clone(),
            posts: self.posts.clone(),
            pending_write: self.pending_write,
            refreshing: self.refreshing,
            editor: self.editor.clone(),
        }
    }
}

/// Move the element at `from` so it ends up at index `to`, shifting the rest.
pub fn move_post(posts: &mut Vec<Post>, from: usize, to: usize) -> Result<()> {
    let len = posts.len();
    if from >= len {
        return Err(ClientError::OutOfRange { index: from, len });
    }
    if to >= len {
        return Err(ClientError::OutOfRange { index: to, len });
    }
    let post = posts.remove(from);
    posts.insert(to, post);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn post(id: &str) -> Post {
        Post {
            id: id.to_string(),
            author: format!("author {id}"),
            body: format!("body {id}"),
            title: None,
        }
    }

    fn ids(posts: &[Post]) -> Vec<&str> {
        posts.iter().map(|p| p.id.as_str()).collect()
    }

    #[test]
    fn test_move_last_to_front() {
        let mut posts = vec![post("p1"), post("p2"), post("p3")];
        move_post(&mut posts, 2, 0).unwrap();
        assert_eq!(ids(&posts), vec!["p3", "p1", "p2"]);
    }

    #[test]
    fn test_move_front_to_middle() {
        let mut posts = vec![post("p1"), post("p2"), post("p3")];
        move_post(&mut posts, 0, 1).unwrap();
        assert_eq!(ids(&posts), vec!["p2", "p1", "p3"]);
    }

    #[test]
    fn test_move_out_of_range() {
        let mut posts = vec![post("p1")];
        assert_eq!(
            move_post(&mut posts, 0, 3),
            Err(ClientError::OutOfRange { index: 3, len: 1 })
        );
        assert_eq!(ids(&posts), vec!["p1"]);
    }

    #[test]
    fn test_draft_guard() {
        assert!(!Draft::new("  ", "body").can_save());
        assert!(!Draft::new("Alice", "\n").can_save());
        assert!(Draft::new("Alice", "Hello").can_save());

        let trimmed = Draft::new("  Alice ", " Hello ").trimmed().unwrap();
        assert_eq!(trimmed, Draft::new("Alice", "Hello"));
        assert!(matches!(
            Draft::new("", "Hello").trimmed(),
            Err(ClientError::InvalidDraft(_))
        ));
    }

    #[test]
    fn test_editor_prefills_from_post() {
        let editor = Editor::for_post(&post("p1"));
        assert_eq!(editor.target.as_deref(), Some("p1"));
        assert_eq!(editor.draft, Draft::new("author p1", "body p1"));
        assert!(Editor::for_create().is_create());
    }

    #[test]
    fn test_snapshot_affordances() {
        let mut state = ClientState {
            phase: Phase::Ready,
            ..Default::default()
        };
        assert!(state.snapshot().can_create());
        assert!(state.snapshot().can_drag());
        assert!(state.snapshot().is_empty());

        state.editor = Some(Editor::for_create());
        assert!(!state.snapshot().can_drag());

        state.phase = Phase::Loading;
        assert!(!state.snapshot().can_create());
    }
}
