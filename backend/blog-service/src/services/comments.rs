/// Comment service - comment submission on existing posts
use std::sync::Arc;

use crate::error::{AppError, Result};
use crate::forms::{CommentForm, FormErrors};
use crate::metrics::record_write;
use crate::middleware::CurrentUser;
use crate::models::Comment;
use crate::repository::BlogRepository;

#[derive(Debug)]
pub enum CommentOutcome {
    Created(Comment),
    /// Invalid input; nothing was stored
    Rejected(FormErrors),
}

pub struct CommentService {
    repo: Arc<dyn BlogRepository>,
}

impl CommentService {
    pub fn new(repo: Arc<dyn BlogRepository>) -> Self {
        Self { repo }
    }

    pub async fn add_comment(
        &self,
        post_id: i64,
        author: &CurrentUser,
        form: CommentForm,
    ) -> Result<CommentOutcome> {
        if self.repo.find_post(post_id).await?.is_none() {
            return Err(AppError::not_found(format!("post {}", post_id)));
        }

        let text = match form.normalized().clean() {
            Ok(text) => text,
            Err(errors) => return Ok(CommentOutcome::Rejected(errors)),
        };

        let comment = self.repo.create_comment(post_id, author.id, &text).await?;
        record_write("comment_created");
        tracing::info!(post_id, comment_id = comment.id, author = %author.username, "comment created");

        Ok(CommentOutcome::Created(comment))
    }
}
