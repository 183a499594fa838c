use actix_web::{web, HttpRequest, HttpResponse};

use crate::error::{AppError, Result};
use crate::AppState;

pub async fn health_check(state: web::Data<AppState>) -> HttpResponse {
    match state.repo.health_check().await {
        Ok(()) => HttpResponse::Ok().json(serde_json::json!({
            "status": "ok",
            "service": "blog-service",
            "version": env!("CARGO_PKG_VERSION"),
        })),
        Err(e) => {
            tracing::warn!(error = %e, "health check failed");
            HttpResponse::ServiceUnavailable().json(serde_json::json!({
                "status": "unhealthy",
                "service": "blog-service",
            }))
        }
    }
}

/// Fallback for unknown routes.
pub async fn not_found(req: HttpRequest) -> Result<HttpResponse> {
    tracing::debug!(path = %req.path(), "no route matched");
    Err(AppError::not_found(format!("page {}", req.path())))
}
