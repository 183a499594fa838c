/// Post handlers - index listing, detail, create and edit
use actix_web::{http::header::ContentType, web, HttpResponse};
use serde::Serialize;

use super::{form_or_default, post_url, profile_url, redirect};
use crate::cache::PageCache;
use crate::error::Result;
use crate::forms::{CommentForm, FormErrors, PostForm};
use crate::middleware::CurrentUser;
use crate::models::{Group, PostFilter};
use crate::pagination::PageQuery;
use crate::services::{EditAccess, EditOutcome, FormOutcome};
use crate::AppState;

/// Context of the create/edit page.
#[derive(Debug, Serialize)]
pub struct PostFormPage {
    pub is_edit: bool,
    pub post_id: Option<i64>,
    pub form: PostForm,
    pub errors: FormErrors,
    pub groups: Vec<Group>,
}

async fn render_form(
    state: &AppState,
    post_id: Option<i64>,
    form: PostForm,
    errors: FormErrors,
) -> Result<HttpResponse> {
    let groups = state.posts().group_choices().await?;
    Ok(HttpResponse::Ok().json(PostFormPage {
        is_edit: post_id.is_some(),
        post_id,
        form,
        errors,
        groups,
    }))
}

/// Latest posts across the site.
///
/// The rendered body is cached per clamped page number for the configured TTL,
/// so new posts show up only once the entry expires or the cache is cleared.
pub async fn index(
    state: web::Data<AppState>,
    query: web::Query<PageQuery>,
) -> Result<HttpResponse> {
    let posts = state.posts();
    let window = posts.page_window(PostFilter::All, query.requested()).await?;
    let key = PageCache::index_key(window.number);

    if let Some(body) = state.page_cache.get(&key) {
        return Ok(HttpResponse::Ok()
            .content_type(ContentType::json())
            .body(body));
    }

    let page = posts.fetch_page(PostFilter::All, window).await?;
    let body = serde_json::to_vec(&serde_json::json!({
        "title": "Latest updates",
        "page": page,
    }))?;
    let body = web::Bytes::from(body);
    state.page_cache.put(key, body.clone());

    Ok(HttpResponse::Ok()
        .content_type(ContentType::json())
        .body(body))
}

pub async fn post_detail(
    state: web::Data<AppState>,
    post_id: web::Path<i64>,
    viewer: Option<CurrentUser>,
) -> Result<HttpResponse> {
    let detail = state.posts().post_detail(post_id.into_inner()).await?;
    let can_edit = viewer
        .as_ref()
        .map(|user| detail.post.is_authored_by(user.id))
        .unwrap_or(false);

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "post": detail.post,
        "posts_count": detail.posts_count,
        "comments": detail.comments,
        "comment_form": CommentForm::default(),
        "can_edit": can_edit,
    })))
}

pub async fn post_create_form(
    user: CurrentUser,
    state: web::Data<AppState>,
) -> Result<HttpResponse> {
    tracing::debug!(user = %user.username, "rendering create form");
    render_form(&state, None, PostForm::default(), FormErrors::default()).await
}

pub async fn post_create(
    user: CurrentUser,
    state: web::Data<AppState>,
    form: Option<web::Form<PostForm>>,
) -> Result<HttpResponse> {
    let submitted = form_or_default(form).normalized();

    match state.posts().create_post(&user, submitted.clone()).await? {
        FormOutcome::Saved(_) => Ok(redirect(profile_url(&user.username))),
        FormOutcome::Invalid(errors) => {
            tracing::debug!(user = %user.username, ?errors, "create form rejected");
            render_form(&state, None, submitted, errors).await
        }
    }
}

/// Edit form; non-authors are sent back to the post.
pub async fn post_edit_form(
    user: CurrentUser,
    state: web::Data<AppState>,
    post_id: web::Path<i64>,
) -> Result<HttpResponse> {
    let post_id = post_id.into_inner();

    match state.posts().edit_access(post_id, &user).await? {
        EditAccess::NotAuthor(_) => Ok(redirect(post_url(post_id))),
        EditAccess::Allowed(post) => {
            let form = PostForm::from_values(&post.text, post.group_id, post.image.as_deref());
            render_form(&state, Some(post_id), form, FormErrors::default()).await
        }
    }
}

pub async fn post_edit(
    user: CurrentUser,
    state: web::Data<AppState>,
    post_id: web::Path<i64>,
    form: Option<web::Form<PostForm>>,
) -> Result<HttpResponse> {
    let post_id = post_id.into_inner();
    let submitted = form_or_default(form).normalized();

    match state
        .posts()
        .edit_post(post_id, &user, submitted.clone())
        .await?
    {
        EditOutcome::Saved(_) | EditOutcome::NotAuthor(_) => Ok(redirect(post_url(post_id))),
        EditOutcome::Invalid { errors, .. } => {
            render_form(&state, Some(post_id), submitted, errors).await
        }
    }
}
