/// Business logic layer for blog-service
///
/// - Post service: listings, detail, create and author-only edit
/// - Comment service: comment submission on existing posts
/// - Follow service: the follow/unfollow social graph
pub mod comments;
pub mod follow;
pub mod posts;

pub use comments::{CommentOutcome, CommentService};
pub use follow::{FollowOutcome, FollowService};
pub use posts::{EditAccess, EditOutcome, FormOutcome, PostDetail, PostService, ProfilePage};
