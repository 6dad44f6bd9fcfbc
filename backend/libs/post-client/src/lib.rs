//! Postboard Sync Client
//!
//! Per-device cache of the ordered post collection. Create, update and delete are
//! pessimistic (await the service, then re-fetch); drag reordering is optimistic and
//! reconciles by re-fetching when the service rejects it.

pub mod api;
pub mod config;
pub mod error;
pub mod state;
pub mod sync;

pub use api::{HttpPostsApi, PostsApi};
pub use config::ClientConfig;
pub use error::{ClientError, Result};
pub use state::{Draft, Editor, Phase, ViewSnapshot};
pub use sync::SyncClient;
