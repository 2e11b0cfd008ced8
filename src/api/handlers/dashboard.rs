use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
};
use chrono::Utc;
use std::sync::Arc;

use crate::aggregation::{metrics, normalize};
use crate::api::models::{AggregatesResponse, DashboardMetricsResponse};
use crate::database;

use super::AppState;

/// All five dashboard views, recomputed from the live collection on every
/// call. Approval toggles are picked up by simply re-reading the table.
pub async fn get_dashboard_metrics(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let mut conn = match state.pool.get() {
        Ok(conn) => conn,
        Err(_) => return (StatusCode::INTERNAL_SERVER_ERROR, "DB Connection Error").into_response(),
    };

    let reviews = match database::reviews::list_all(&mut conn) {
        Ok(reviews) => reviews,
        Err(e) => {
            return (StatusCode::INTERNAL_SERVER_ERROR, format!("Query Error: {}", e))
                .into_response()
        }
    };

    let settings = &state.config.metrics;

    Json(DashboardMetricsResponse {
        summary: metrics::summary(&reviews, Utc::now()),
        categories: metrics::category_breakdown(&reviews, &settings.categories),
        properties: metrics::property_comparison(&reviews),
        distribution: metrics::rating_distribution(&reviews),
        monthly_trends: metrics::monthly_trends(
            &reviews,
            &settings.categories,
            settings.monthly_window,
        ),
    })
    .into_response()
}

/// Normalizer output: one bucket per (listing, type, source, day)
pub async fn get_daily_aggregates(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let mut conn = match state.pool.get() {
        Ok(conn) => conn,
        Err(_) => return (StatusCode::INTERNAL_SERVER_ERROR, "DB Connection Error").into_response(),
    };

    let reviews = match database::reviews::list_all(&mut conn) {
        Ok(reviews) => reviews,
        Err(e) => {
            return (StatusCode::INTERNAL_SERVER_ERROR, format!("Query Error: {}", e))
                .into_response()
        }
    };

    let items = normalize(&reviews);
    let total = items.len();

    Json(AggregatesResponse { items, total }).into_response()
}
