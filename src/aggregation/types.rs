use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Daily summary bucket keyed by (listing, review type, source, calendar day)
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NormalizedAggregate {
    pub listing_name: String,
    pub review_type: String,
    pub source: String,
    pub date: NaiveDate,
    pub total_reviews: usize,
    pub ratings: Vec<f64>,
    pub avg_rating: f64,
}

/// Qualitative label for an average rating on the 0-10 scale
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    Good,
    Warning,
    Poor,
}

impl Tier {
    pub fn from_average(avg: f64) -> Self {
        if avg >= 8.0 {
            Tier::Good
        } else if avg >= 6.0 {
            Tier::Warning
        } else {
            Tier::Poor
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Tier::Good => "good",
            Tier::Warning => "warning",
            Tier::Poor => "poor",
        }
    }
}

/// Fixed rating bands used by the distribution chart
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RatingBand {
    Excellent, // 9-10
    Good,      // 7-8
    Average,   // 5-6
    Poor,      // 0-4
}

impl RatingBand {
    pub const ALL: [RatingBand; 4] = [
        RatingBand::Excellent,
        RatingBand::Good,
        RatingBand::Average,
        RatingBand::Poor,
    ];

    pub fn from_rating(rating: f64) -> Self {
        if rating >= 9.0 {
            RatingBand::Excellent
        } else if rating >= 7.0 {
            RatingBand::Good
        } else if rating >= 5.0 {
            RatingBand::Average
        } else {
            RatingBand::Poor
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            RatingBand::Excellent => "excellent",
            RatingBand::Good => "good",
            RatingBand::Average => "average",
            RatingBand::Poor => "poor",
        }
    }
}
