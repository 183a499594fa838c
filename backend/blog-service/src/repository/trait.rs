use uuid::Uuid;

use crate::error::Result;
use crate::models::{Comment, Group, Post, PostDraft, PostFilter, User};

/// Storage seam for the blog: users and groups are read-only here, posts,
/// comments and follow edges are written one row at a time.
#[async_trait::async_trait]
pub trait BlogRepository: Send + Sync {
    async fn find_user_by_username(&self, username: &str) -> Result<Option<User>>;

    async fn find_group_by_slug(&self, slug: &str) -> Result<Option<Group>>;

    async fn find_group_by_id(&self, group_id: i64) -> Result<Option<Group>>;

    /// All groups, ordered by title, for form choices
    async fn list_groups(&self) -> Result<Vec<Group>>;

    async fn count_posts(&self, filter: PostFilter) -> Result<usize>;

    /// Posts matching `filter`, newest first
    async fn list_posts(&self, filter: PostFilter, limit: usize, offset: usize)
        -> Result<Vec<Post>>;

    async fn find_post(&self, post_id: i64) -> Result<Option<Post>>;

    /// Insert a post authored by `author_id`; the publication date is assigned by the store.
    async fn create_post(&self, author_id: Uuid, draft: &PostDraft) -> Result<Post>;

    /// Overwrite text, group and image; the publication date is kept.
    /// Returns `None` when the post no longer exists.
    async fn update_post(&self, post_id: i64, draft: &PostDraft) -> Result<Option<Post>>;

    /// Comments of a post in insertion order
    async fn list_comments(&self, post_id: i64) -> Result<Vec<Comment>>;

    async fn create_comment(&self, post_id: i64, author_id: Uuid, text: &str) -> Result<Comment>;

    async fn is_following(&self, user_id: Uuid, author_id: Uuid) -> Result<bool>;

    /// Idempotent create; returns true if a new edge was inserted.
    async fn create_follow(&self, user_id: Uuid, author_id: Uuid) -> Result<bool>;

    /// Idempotent delete; returns true if an edge was removed.
    async fn delete_follow(&self, user_id: Uuid, author_id: Uuid) -> Result<bool>;

    async fn health_check(&self) -> Result<()> {
        Ok(())
    }
}
