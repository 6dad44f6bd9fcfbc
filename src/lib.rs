//! Postboard
//!
//! Umbrella crate for the ordered posts system. Re-exports the workspace crates so the
//! cross-crate flow tests under `tests/` can reach every layer through one dependency.
//!
//! - `post_common`: wire types shared by the service and the client
//! - `post_service`: HTTP collection service and its persistent store
//! - `post_client`: per-device sync client with optimistic reordering
pub use post_client;
pub use post_common;
pub use post_service;
