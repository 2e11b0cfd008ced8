use serde::Serialize;

use crate::aggregation::metrics::{
    CategoryAverage, DistributionSlice, MonthlyTrendPoint, PropertyPerformance, SummaryMetrics,
};
use crate::aggregation::NormalizedAggregate;
use crate::domain::{CategoryScore, Review};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewItem {
    pub id: i64,
    #[serde(rename = "type")]
    pub review_type: String,
    pub status: String,
    pub rating: Option<f64>,
    pub effective_rating: Option<f64>,
    pub public_review: String,
    pub category_scores: Vec<CategoryScore>,
    pub submitted_at: String,
    pub guest_name: String,
    pub listing_name: String,
    pub property: String,
    pub is_approved: bool,
}

impl From<&Review> for ReviewItem {
    fn from(review: &Review) -> Self {
        Self {
            id: review.id,
            review_type: review.review_type.clone(),
            status: review.status.clone(),
            rating: review.rating,
            effective_rating: review.effective_rating(),
            public_review: review.public_review.clone(),
            category_scores: review.category_scores.clone(),
            submitted_at: review.submitted_at.to_rfc3339(),
            guest_name: review.guest_name.clone(),
            listing_name: review.listing_name.clone(),
            property: review.property_name().to_string(),
            is_approved: review.is_approved,
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewListResponse {
    pub items: Vec<ReviewItem>,
    pub total: usize,
    pub page: usize,
    pub page_size: usize,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardMetricsResponse {
    pub summary: SummaryMetrics,
    pub categories: Vec<CategoryAverage>,
    pub properties: Vec<PropertyPerformance>,
    pub distribution: Vec<DistributionSlice>,
    pub monthly_trends: Vec<MonthlyTrendPoint>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AggregatesResponse {
    pub items: Vec<NormalizedAggregate>,
    pub total: usize,
}
