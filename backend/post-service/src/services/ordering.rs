/// Ordering policy - the sequence position is the only notion of order
use post_common::Post;

/// Where `create` places a new post.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InsertPosition {
    /// Newest first.
    #[default]
    Front,
    Back,
}

/// How `reorder` combines the caller's snapshot with the stored sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReorderMode {
    /// The snapshot becomes the stored sequence verbatim, membership and content included.
    /// A stale snapshot drops posts created after it was taken and resurrects posts
    /// deleted after it was taken (last writer wins).
    #[default]
    ReplaceWholesale,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct OrderingPolicy {
    pub insert: InsertPosition,
    pub reorder: ReorderMode,
}

impl OrderingPolicy {
    pub fn new(insert: InsertPosition, reorder: ReorderMode) -> Self {
        Self { insert, reorder }
    }

    /// Place a freshly created post into `posts`.
    pub fn insert(&self, posts: &mut Vec<Post>, post: Post) {
        match self.insert {
            InsertPosition::Front => posts.insert(0, post),
            InsertPosition::Back => posts.push(post),
        }
    }

    /// Sequence to persist for a reorder request.
    pub fn reorder(&self, _current: Vec<Post>, snapshot: Vec<Post>) -> Vec<Post> {
        match self.reorder {
            ReorderMode::ReplaceWholesale => snapshot,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn post(id: &str) -> Post {
        Post {
            id: id.to_string(),
            author: "Alice".to_string(),
            body: id.to_string(),
            title: None,
        }
    }

    fn ids(posts: &[Post]) -> Vec<&str> {
        posts.iter().map(|p| p.id.as_str()).collect()
    }

    #[test]
    fn test_default_policy_is_newest_first_and_wholesale() {
        let policy = OrderingPolicy::default();
        assert_eq!(policy.insert, InsertPosition::Front);
        assert_eq!(policy.reorder, ReorderMode::ReplaceWholesale);
    }

    #[test]
    fn test_front_insert_prepends() {
        let mut posts = vec![post("a"), post("b")];
        OrderingPolicy::default().insert(&mut posts, post("new"));
        assert_eq!(ids(&posts), vec!["new", "a", "b"]);
    }

    #[test]
    fn test_back_insert_appends() {
        let policy = OrderingPolicy::new(InsertPosition::Back, ReorderMode::ReplaceWholesale);
        let mut posts = vec![post("a")];
        policy.insert(&mut posts, post("new"));
        assert_eq!(ids(&posts), vec!["a", "new"]);
    }

    #[test]
    fn test_wholesale_reorder_ignores_current_membership() {
        let current = vec![post("a"), post("b"), post("fresh")];
        let snapshot = vec![post("b"), post("a"), post("gone")];
        let result = OrderingPolicy::default().reorder(current, snapshot.clone());
        assert_eq!(result, snapshot);
    }
}
