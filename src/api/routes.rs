use axum::{
    routing::{get, patch, post},
    Router,
};
use std::sync::Arc;

use crate::api::handlers::{
    admin::admin_sync,
    dashboard::{get_daily_aggregates, get_dashboard_metrics},
    reviews::{approve_review, disapprove_review, get_approved_reviews, get_reviews},
    AppState,
};

pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/reviews", get(get_reviews))
        .route("/api/reviews/approved", get(get_approved_reviews))
        .route("/api/review/approve/:id", patch(approve_review))
        .route("/api/review/disapprove/:id", patch(disapprove_review))
        .route("/api/dashboard/metrics", get(get_dashboard_metrics))
        .route("/api/dashboard/aggregates", get(get_daily_aggregates))
        .route("/api/admin/sync", post(admin_sync))
        .with_state(state)
}
