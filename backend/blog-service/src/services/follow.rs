/// Follow service - directed user -> author edges
use std::sync::Arc;

use crate::error::{AppError, Result};
use crate::metrics::record_write;
use crate::middleware::CurrentUser;
use crate::models::User;
use crate::repository::BlogRepository;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FollowOutcome {
    Created,
    AlreadyFollowing,
    /// Users cannot follow themselves; nothing is written
    SelfFollow,
}

#[derive(Clone)]
pub struct FollowService {
    repo: Arc<dyn BlogRepository>,
}

impl FollowService {
    pub fn new(repo: Arc<dyn BlogRepository>) -> Self {
        Self { repo }
    }

    async fn find_author(&self, username: &str) -> Result<User> {
        self.repo
            .find_user_by_username(username)
            .await?
            .ok_or_else(|| AppError::not_found(format!("user '{}'", username)))
    }

    /// Get-or-create the edge `follower -> username`.
    pub async fn follow(
        &self,
        follower: &CurrentUser,
        username: &str,
    ) -> Result<(User, FollowOutcome)> {
        let author = self.find_author(username).await?;

        if author.id == follower.id {
            tracing::debug!(user = %follower.username, "ignoring self-follow");
            return Ok((author, FollowOutcome::SelfFollow));
        }

        let outcome = if self.repo.create_follow(follower.id, author.id).await? {
            record_write("follow_created");
            tracing::info!(user = %follower.username, author = %author.username, "follow created");
            FollowOutcome::Created
        } else {
            FollowOutcome::AlreadyFollowing
        };

        Ok((author, outcome))
    }

    /// Remove the edge if present; returns whether one was removed.
    pub async fn unfollow(&self, follower: &CurrentUser, username: &str) -> Result<(User, bool)> {
        let author = self.find_author(username).await?;

        let removed = self.repo.delete_follow(follower.id, author.id).await?;
        if removed {
            record_write("follow_deleted");
            tracing::info!(user = %follower.username, author = %author.username, "follow removed");
        }

        Ok((author, removed))
    }
}
