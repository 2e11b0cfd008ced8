use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use std::sync::Arc;

use crate::aggregation::{filter_reviews, RatingBand, ReviewFilter, StatusFilter};
use crate::api::models::{ReviewItem, ReviewListResponse};
use crate::database;

use super::{AppState, ReviewParams};

pub async fn get_reviews(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ReviewParams>,
) -> impl IntoResponse {
    let page = params.page.unwrap_or(1).max(1);
    let page_size = params.page_size.unwrap_or(10).clamp(1, 100);

    let status = match params.status.as_deref() {
        Some("approved") => StatusFilter::Approved,
        Some("pending") => StatusFilter::Pending,
        _ => StatusFilter::All,
    };

    let band = match params.band.as_deref() {
        Some("excellent") => Some(RatingBand::Excellent),
        Some("good") => Some(RatingBand::Good),
        Some("average") => Some(RatingBand::Average),
        Some("poor") => Some(RatingBand::Poor),
        _ => None,
    };

    let filter = ReviewFilter {
        search: params.search.filter(|s| !s.is_empty()),
        listing_name: params.listing.filter(|s| !s.is_empty() && s.as_str() != "all"),
        status,
        band,
    };

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

    let filtered = filter_reviews(&reviews, &filter);
    let total = filtered.len();

    let items: Vec<ReviewItem> = filtered
        .into_iter()
        .skip(page_offset(page, page_size))
        .take(page_size)
        .map(ReviewItem::from)
        .collect();

    Json(ReviewListResponse {
        items,
        total,
        page,
        page_size,
    })
    .into_response()
}

// Saturating so an absurd client-supplied page lands past the end
// instead of overflowing.
fn page_offset(page: usize, page_size: usize) -> usize {
    page.saturating_sub(1).saturating_mul(page_size)
}

pub async fn get_approved_reviews(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let mut conn = match state.pool.get() {
        Ok(conn) => conn,
        Err(_) => return (StatusCode::INTERNAL_SERVER_ERROR, "DB Connection Error").into_response(),
    };

    match database::reviews::list_approved(&mut conn) {
        Ok(reviews) => {
            let items: Vec<ReviewItem> = reviews.iter().map(ReviewItem::from).collect();
            Json(items).into_response()
        }
        Err(e) => (StatusCode::INTERNAL_SERVER_ERROR, format!("Query Error: {}", e)).into_response(),
    }
}

pub async fn approve_review(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> impl IntoResponse {
    set_approval(state, id, true).await
}

pub async fn disapprove_review(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> impl IntoResponse {
    set_approval(state, id, false).await
}

async fn set_approval(state: Arc<AppState>, id: i64, approved: bool) -> axum::response::Response {
    let mut conn = match state.pool.get() {
        Ok(conn) => conn,
        Err(_) => return (StatusCode::INTERNAL_SERVER_ERROR, "DB Connection Error").into_response(),
    };

    match database::reviews::set_approval(&mut conn, id, approved) {
        Ok(true) => {}
        Ok(false) => return StatusCode::NOT_FOUND.into_response(),
        Err(e) => {
            return (StatusCode::INTERNAL_SERVER_ERROR, format!("Update Error: {}", e))
                .into_response()
        }
    }

    match database::reviews::find_by_id(&mut conn, id) {
        Ok(Some(review)) => Json(ReviewItem::from(&review)).into_response(),
        Ok(None) => StatusCode::NOT_FOUND.into_response(),
        Err(e) => (StatusCode::INTERNAL_SERVER_ERROR, format!("Query Error: {}", e)).into_response(),
    }
}

#[cfg(test)]
mod tests {
    use super::page_offset;

    #[test]
    fn page_offset_saturates_on_huge_pages() {
        assert_eq!(page_offset(1, 10), 0);
        assert_eq!(page_offset(3, 25), 50);
        assert_eq!(page_offset(usize::MAX, 100), usize::MAX);
        assert_eq!(page_offset(usize::MAX, usize::MAX), usize::MAX);
    }
}
