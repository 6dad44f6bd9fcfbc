//! Postboard Common Library
//!
//! Wire types shared by the post service and its sync clients.
//! Both sides serialize through these structs so the JSON shapes cannot drift apart.

pub mod models;

pub use models::{
    ErrorBody, NewPost, Post, PostEnvelope, PostMessage, PostPatch, PostsEnvelope, PostsMessage,
};
