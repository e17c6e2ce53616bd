use actix_web::HttpResponse;
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};

static SUBMISSIONS_RECEIVED: AtomicU64 = AtomicU64::new(0);
static REQUEST_TRANSITIONS: AtomicU64 = AtomicU64::new(0);
static TOKENS_CLAIMED: AtomicU64 = AtomicU64::new(0);

pub fn increment_submissions_received() {
    SUBMISSIONS_RECEIVED.fetch_add(1, Ordering::Relaxed);
}

pub fn increment_request_transitions() {
    REQUEST_TRANSITIONS.fetch_add(1, Ordering::Relaxed);
}

pub fn increment_tokens_claimed() {
    TOKENS_CLAIMED.fetch_add(1, Ordering::Relaxed);
}

#[derive(Serialize, Deserialize, utoipa::ToSchema)]
pub struct MetricsResponse {
    pub submissions_received_total: u64,
    pub request_transitions_total: u64,
    pub tokens_claimed_total: u64,
}

#[utoipa::path(
    get,
    path = "/metrics",
    tag = "Health",
    responses(
        (status = 200, description = "System metrics", body = MetricsResponse)
    )
)]
pub async fn get_metrics() -> HttpResponse {
    let submissions = SUBMISSIONS_RECEIVED.load(Ordering::Relaxed);
    let transitions = REQUEST_TRANSITIONS.load(Ordering::Relaxed);
    let tokens = TOKENS_CLAIMED.load(Ordering::Relaxed);

    let metrics = format!(
        "# HELP submissions_received_total Total public form submissions accepted\n\
         # TYPE submissions_received_total counter\n\
         submissions_received_total {}\n\
         \n\
         # HELP request_transitions_total Total mentor-request status transitions\n\
         # TYPE request_transitions_total counter\n\
         request_transitions_total {}\n\
         \n\
         # HELP tokens_claimed_total Total emailed action tokens claimed\n\
         # TYPE tokens_claimed_total counter\n\
         tokens_claimed_total {}\n",
        submissions, transitions, tokens
    );

    HttpResponse::Ok()
        .content_type("text/plain; version=0.0.4")
        .body(metrics)
}
