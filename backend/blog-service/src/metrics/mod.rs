//! Prometheus metrics for blog-service.
//!
//! Collectors live in the default registry; `/metrics` renders them.

use actix_web::HttpResponse;
use lazy_static::lazy_static;
use prometheus::{register_int_counter_vec, Encoder, IntCounterVec, TextEncoder};

lazy_static! {
    /// Index render cache events (hit/miss/expired/clear).
    pub static ref PAGE_CACHE_EVENTS: IntCounterVec = register_int_counter_vec!(
        "blog_page_cache_events_total",
        "Index page cache events segmented by outcome",
        &["event"]
    )
    .expect("failed to register blog_page_cache_events_total");

    /// Successful writes segmented by kind (post_created, post_updated, ...).
    pub static ref CONTENT_WRITES_TOTAL: IntCounterVec = register_int_counter_vec!(
        "blog_content_writes_total",
        "Content writes segmented by kind",
        &["kind"]
    )
    .expect("failed to register blog_content_writes_total");
}

pub fn record_write(kind: &str) {
    CONTENT_WRITES_TOTAL.with_label_values(&[kind]).inc();
}

/// Actix handler that renders Prometheus metrics in text format.
pub async fn serve_metrics() -> HttpResponse {
    let encoder = TextEncoder::new();
    let metric_families = prometheus::gather();

    let mut buffer = Vec::new();
    if let Err(err) = encoder.encode(&metric_families, &mut buffer) {
        return HttpResponse::InternalServerError().body(err.to_string());
    }

    HttpResponse::Ok()
        .content_type(encoder.format_type())
        .body(buffer)
}
