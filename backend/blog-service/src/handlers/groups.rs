use actix_web::{web, HttpResponse};

use crate::error::Result;
use crate::pagination::PageQuery;
use crate::AppState;

/// Posts of one group, newest first.
pub async fn group_posts(
    state: web::Data<AppState>,
    slug: web::Path<String>,
    query: web::Query<PageQuery>,
) -> Result<HttpResponse> {
    let (group, page) = state
        .posts()
        .group_page(&slug, query.requested())
        .await?;

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "group": group,
        "page": page,
    })))
}
