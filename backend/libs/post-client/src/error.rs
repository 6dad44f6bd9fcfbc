//! Client-side errors
//!
//! Network failures are turned into view state by `SyncClient`; they never escape as
//! panics or unhandled task failures.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, ClientError>;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ClientError {
    /// The service answered with a non-2xx status
    #[error("HTTP error! status: {status}{}", detail_suffix(.detail))]
    Status { status: u16, detail: String },

    /// The request never produced a response
    #[error("Network request failed: {0}")]
    Transport(String),

    /// The response body did not match the expected shape
    #[error("Unexpected response: {0}")]
    Decode(String),

    /// Form guard: author or body empty after trimming
    #[error("Invalid post: {0}")]
    InvalidDraft(String),

    #[error("Post {0} is not in the local list")]
    UnknownPost(String),

    #[error("Reordering is disabled while a post is being edited")]
    DragDisabled,

    #[error("Posts are not loaded")]
    NotReady,

    #[error("No edit surface is open")]
    EditorClosed,

    #[error("The edit surface is not showing an existing post")]
    NoPostSelected,

    #[error("Drag index {index} is out of range for {len} posts")]
    OutOfRange { index: usize, len: usize },
}

fn detail_suffix(detail: &str) -> String {
    if detail.is_empty() {
        String::new()
    } else {
        format!(" ({detail})")
    }
}

impl ClientError {
    /// Failures observed on the wire, as opposed to local guard rejections.
    pub fn is_network(&self) -> bool {
        matches!(
            self,
            Self::Status { .. } | Self::Transport(_) | Self::Decode(_)
        )
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}
