use actix_web::HttpResponse;
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};

static REQUEST_COUNT: AtomicU64 = AtomicU64::new(0);
static ERROR_COUNT: AtomicU64 = AtomicU64::new(0);
static REGISTRATIONS_CREATED: AtomicU64 = AtomicU64::new(0);
static REGISTRATIONS_DUPLICATE: AtomicU64 = AtomicU64::new(0);
static REGISTRATIONS_FAILED: AtomicU64 = AtomicU64::new(0);

pub fn increment_request_count() {
    REQUEST_COUNT.fetch_add(1, Ordering::Relaxed);
}

pub fn increment_error_count() {
    ERROR_COUNT.fetch_add(1, Ordering::Relaxed);
}

pub fn increment_registrations_created() {
    REGISTRATIONS_CREATED.fetch_add(1, Ordering::Relaxed);
}

pub fn increment_registrations_duplicate() {
    REGISTRATIONS_DUPLICATE.fetch_add(1, Ordering::Relaxed);
}

pub fn increment_registrations_failed() {
    REGISTRATIONS_FAILED.fetch_add(1, Ordering::Relaxed);
}

#[derive(Serialize, Deserialize, utoipa::ToSchema)]
pub struct MetricsResponse {
    pub http_requests_total: u64,
    pub http_errors_total: u64,
    pub registrations_created_total: u64,
    pub registrations_duplicate_total: u64,
    pub registrations_failed_total: u64,
}

pub fn snapshot() -> MetricsResponse {
    MetricsResponse {
        http_requests_total: REQUEST_COUNT.load(Ordering::Relaxed),
        http_errors_total: ERROR_COUNT.load(Ordering::Relaxed),
        registrations_created_total: REGISTRATIONS_CREATED.load(Ordering::Relaxed),
        registrations_duplicate_total: REGISTRATIONS_DUPLICATE.load(Ordering::Relaxed),
        registrations_failed_total: REGISTRATIONS_FAILED.load(Ordering::Relaxed),
    }
}

#[utoipa::path(
    get,
    path = "/metrics",
    tag = "Health",
    responses(
        (status = 200, description = "Prometheus text exposition", body = String, content_type = "text/plain")
    )
)]
pub async fn get_metrics() -> HttpResponse {
    let m = snapshot();

    let metrics = format!(
        "# HELP http_requests_total Total number of HTTP requests\n\
         # TYPE http_requests_total counter\n\
         http_requests_total {}\n\
         \n\
         # HELP http_errors_total Total number of HTTP responses with status >= 400\n\
         # TYPE http_errors_total counter\n\
         http_errors_total {}\n\
         \n\
         # HELP registrations_total Registration attempts by outcome\n\
         # TYPE registrations_total counter\n\
         registrations_total{{outcome=\"created\"}} {}\n\
         registrations_total{{outcome=\"duplicate\"}} {}\n\
         registrations_total{{outcome=\"failed\"}} {}\n",
        m.http_requests_total,
        m.http_errors_total,
        m.registrations_created_total,
        m.registrations_duplicate_total,
        m.registrations_failed_total,
    );

    HttpResponse::Ok()
        .content_type("text/plain; version=0.0.4")
        .body(metrics)
}
