/// Profile handlers - author page and follow/unfollow actions
use actix_web::{web, HttpResponse};

use super::{profile_url, redirect};
use crate::error::Result;
use crate::middleware::CurrentUser;
use crate::pagination::PageQuery;
use crate::AppState;

pub async fn profile(
    state: web::Data<AppState>,
    username: web::Path<String>,
    query: web::Query<PageQuery>,
    viewer: Option<CurrentUser>,
) -> Result<HttpResponse> {
    let page = state
        .posts()
        .profile_page(&username, viewer.as_ref(), query.requested())
        .await?;

    Ok(HttpResponse::Ok().json(page))
}

pub async fn profile_follow(
    user: CurrentUser,
    state: web::Data<AppState>,
    username: web::Path<String>,
) -> Result<HttpResponse> {
    let (author, outcome) = state.follows().follow(&user, &username).await?;
    tracing::debug!(user = %user.username, author = %author.username, ?outcome, "follow requested");

    Ok(redirect(profile_url(&author.username)))
}

pub async fn profile_unfollow(
    user: CurrentUser,
    state: web::Data<AppState>,
    username: web::Path<String>,
) -> Result<HttpResponse> {
    let (author, _removed) = state.follows().unfollow(&user, &username).await?;

    Ok(redirect(profile_url(&author.username)))
}
