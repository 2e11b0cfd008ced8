use chrono::{DateTime, Utc};

use crate::domain::CategoryScore;

/// Review payload ready for insertion, already converted from a provider
/// record. The surrogate id is assigned by the database.
#[derive(Debug, Clone)]
pub struct NewReview {
    pub source: String,
    pub source_id: String,
    pub review_type: String,
    pub status: String,
    pub rating: Option<f64>,
    pub public_review: String,
    pub guest_name: String,
    pub listing_name: String,
    pub submitted_at: DateTime<Utc>,
    pub category_scores: Vec<CategoryScore>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum UpsertOutcome {
    Inserted(i64),
    Updated(i64),
}

impl UpsertOutcome {
    pub fn review_id(&self) -> i64 {
        match self {
            UpsertOutcome::Inserted(id) | UpsertOutcome::Updated(id) => *id,
        }
    }
}
