use actix_web::{web, HttpRequest, HttpResponse};

use crate::error::{AppError, Result};
use crate::AppState;

pub const ADMIN_TOKEN_HEADER: &str = "X-Admin-Token";

/// Drop every cached page so the next request renders fresh content.
pub async fn clear_cache(req: HttpRequest, state: web::Data<AppState>) -> Result<HttpResponse> {
    let supplied = req
        .headers()
        .get(ADMIN_TOKEN_HEADER)
        .and_then(|value| value.to_str().ok());

    match (state.config.cache.admin_token.as_deref(), supplied) {
        (Some(expected), Some(supplied)) if expected == supplied => {}
        (None, _) => {
            return Err(AppError::Forbidden(
                "cache administration is disabled".to_string(),
            ))
        }
        _ => return Err(AppError::Forbidden("invalid admin token".to_string())),
    }

    let cleared = state.page_cache.clear();
    tracing::info!(cleared, "index cache cleared");

    Ok(HttpResponse::Ok().json(serde_json::json!({ "cleared": cleared })))
}
