/// Business logic layer for post-service
///
/// - `posts`: CRUD and reorder over the persisted sequence
/// - `ordering`: where new posts land and how reorders apply
pub mod ordering;
pub mod posts;

pub use ordering::{InsertPosition, OrderingPolicy, ReorderMode};
pub use posts::PostCollection;
