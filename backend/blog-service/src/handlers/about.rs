//! Static pages.

use actix_web::HttpResponse;

pub async fn author() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "title": "About the author",
        "text": "A small blogging platform: posts, groups, comments and follows.",
    }))
}

pub async fn tech() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "title": "Technologies",
        "stack": ["actix-web", "sqlx", "PostgreSQL", "tracing", "prometheus"],
        "service_version": env!("CARGO_PKG_VERSION"),
    }))
}
