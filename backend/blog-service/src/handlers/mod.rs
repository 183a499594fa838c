/// HTTP handlers for blog-service
///
/// Every page is rendered as a JSON document; successful form submissions
/// answer with `302 Found` like a classic form-driven site.
pub mod about;
pub mod admin;
pub mod comments;
pub mod feed;
pub mod groups;
pub mod health;
pub mod posts;
pub mod profile;

use actix_web::{http::header, web, HttpResponse};

use crate::error::AppError;

pub use health::{health_check, not_found};

/// Register every route of the service.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(
        // `/posts/abc/` is an unknown page, not a bad request
        web::PathConfig::default()
            .error_handler(|err, _req| AppError::not_found(err.to_string()).into()),
    )
    .route("/", web::get().to(posts::index))
    .route("/group/{slug}/", web::get().to(groups::group_posts))
    .route("/profile/{username}/", web::get().to(profile::profile))
    .route(
        "/profile/{username}/follow/",
        web::post().to(profile::profile_follow),
    )
    .route(
        "/profile/{username}/unfollow/",
        web::post().to(profile::profile_unfollow),
    )
    .route("/posts/{post_id}/", web::get().to(posts::post_detail))
    .service(
        web::resource("/posts/{post_id}/edit/")
            .route(web::get().to(posts::post_edit_form))
            .route(web::post().to(posts::post_edit)),
    )
    .route(
        "/posts/{post_id}/comment/",
        web::post().to(comments::add_comment),
    )
    .service(
        web::resource("/create/")
            .route(web::get().to(posts::post_create_form))
            .route(web::post().to(posts::post_create)),
    )
    .route("/follow/", web::get().to(feed::follow_index))
    .route("/about/author/", web::get().to(about::author))
    .route("/about/tech/", web::get().to(about::tech))
    .route("/admin/cache/clear/", web::post().to(admin::clear_cache))
    .route("/health", web::get().to(health_check))
    .route("/metrics", web::get().to(crate::metrics::serve_metrics));
}

/// A missing or non-urlencoded body binds as an empty form, so field
/// validation decides the outcome instead of a 415.
pub(crate) fn form_or_default<T: Default>(form: Option<web::Form<T>>) -> T {
    form.map(web::Form::into_inner).unwrap_or_default()
}

pub(crate) fn redirect(location: impl AsRef<str>) -> HttpResponse {
    HttpResponse::Found()
        .insert_header((header::LOCATION, location.as_ref()))
        .finish()
}

pub fn profile_url(username: &str) -> String {
    format!("/profile/{}/", urlencoding::encode(username))
}

pub fn post_url(post_id: i64) -> String {
    format!("/posts/{}/", post_id)
}
