use actix_web::{web, HttpResponse};

use super::{form_or_default, post_url, redirect};
use crate::error::Result;
use crate::forms::CommentForm;
use crate::middleware::CurrentUser;
use crate::services::CommentOutcome;
use crate::AppState;

/// Add a comment and go back to the post.
///
/// Invalid comments are dropped; the redirect happens either way.
pub async fn add_comment(
    user: CurrentUser,
    state: web::Data<AppState>,
    post_id: web::Path<i64>,
    form: Option<web::Form<CommentForm>>,
) -> Result<HttpResponse> {
    let post_id = post_id.into_inner();

    if let CommentOutcome::Rejected(errors) = state
        .comments()
        .add_comment(post_id, &user, form_or_default(form))
        .await?
    {
        tracing::warn!(post_id, user = %user.username, ?errors, "comment rejected");
    }

    Ok(redirect(post_url(post_id)))
}
