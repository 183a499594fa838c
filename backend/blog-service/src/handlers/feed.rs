use actix_web::{web, HttpResponse};

use crate::error::Result;
use crate::middleware::CurrentUser;
use crate::pagination::PageQuery;
use crate::AppState;

/// Posts by every author the current user follows.
pub async fn follow_index(
    user: CurrentUser,
    state: web::Data<AppState>,
    query: web::Query<PageQuery>,
) -> Result<HttpResponse> {
    let page = state
        .posts()
        .follow_feed(user.id, query.requested())
        .await?;

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "page": page,
    })))
}
