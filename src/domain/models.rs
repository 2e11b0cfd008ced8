use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

/// A named sub-rating attached to a review (e.g. "cleanliness": 9.0)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryScore {
    pub category: String,
    pub rating: f64,
}

/// Guest review, deduplicated by (source, source_id)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    pub id: i64,
    #[serde(rename = "type")]
    pub review_type: String,
    pub status: String,
    pub rating: Option<f64>,
    pub public_review: String,
    pub category_scores: Vec<CategoryScore>,
    pub submitted_at: DateTime<Utc>,
    pub guest_name: String,
    pub listing_name: String,
    pub source: String,
    pub source_id: String,
    pub is_approved: bool,
}

impl Review {
    /// Single scalar score for this review: the explicit overall rating when
    /// present, otherwise the mean of the category sub-scores. None when the
    /// review carries neither, so callers can keep NaN out of their averages.
    pub fn effective_rating(&self) -> Option<f64> {
        if let Some(rating) = self.rating {
            return Some(rating);
        }

        if self.category_scores.is_empty() {
            return None;
        }

        let sum: f64 = self.category_scores.iter().map(|c| c.rating).sum();
        Some(sum / self.category_scores.len() as f64)
    }

    /// Display name of the listing: the portion before " - " when the
    /// conventional "<name> - <code>" format is used.
    pub fn property_name(&self) -> &str {
        self.listing_name
            .split(" - ")
            .next()
            .unwrap_or(&self.listing_name)
    }
}

// --- Provider API Response Structures ---

/// Envelope returned by the provider's /reviews endpoint
#[derive(Debug, Deserialize, Serialize)]
pub struct ProviderReviewsResponse {
    pub status: String,
    pub result: Vec<ProviderReview>,
    #[serde(default)]
    pub count: Option<usize>,
    #[serde(default)]
    pub offset: Option<usize>,
}

/// Raw review record as the provider ships it
#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderReview {
    pub id: i64,
    #[serde(rename = "type")]
    pub review_type: String,
    #[serde(default = "default_status")]
    pub status: String,
    pub rating: Option<f64>,
    #[serde(default)]
    pub public_review: String,
    #[serde(rename = "reviewCategory", default)]
    pub review_category: Vec<CategoryScore>,
    pub submitted_at: String,
    pub guest_name: String,
    pub listing_name: String,
}

fn default_status() -> String {
    "published".to_string()
}

impl ProviderReview {
    /// Parse the provider's "%Y-%m-%d %H:%M:%S" timestamp, treated as UTC.
    /// A few provider endpoints emit ISO-8601 instead, so accept that too.
    pub fn parse_submitted_at(&self) -> anyhow::Result<DateTime<Utc>> {
        if let Ok(dt) = NaiveDateTime::parse_from_str(&self.submitted_at, "%Y-%m-%d %H:%M:%S") {
            return Ok(dt.and_utc());
        }

        if let Ok(dt) = DateTime::parse_from_rfc3339(&self.submitted_at) {
            return Ok(dt.with_timezone(&Utc));
        }

        if let Ok(dt) = NaiveDateTime::parse_from_str(&self.submitted_at, "%Y-%m-%dT%H:%M:%S") {
            return Ok(dt.and_utc());
        }

        anyhow::bail!("Failed to parse submittedAt: {}", self.submitted_at)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn review(rating: Option<f64>, scores: &[(&str, f64)]) -> Review {
        Review {
            id: 1,
            review_type: "guest-to-host".to_string(),
            status: "published".to_string(),
            rating,
            public_review: String::new(),
            category_scores: scores
                .iter()
                .map(|(category, rating)| CategoryScore {
                    category: category.to_string(),
                    rating: *rating,
                })
                .collect(),
            submitted_at: Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap(),
            guest_name: "Ada".to_string(),
            listing_name: "2B N1 A - 29 Shoreditch Heights".to_string(),
            source: "hostaway".to_string(),
            source_id: "7453".to_string(),
            is_approved: false,
        }
    }

    #[test]
    fn effective_rating_prefers_overall_rating() {
        let r = review(Some(8.0), &[("cleanliness", 2.0)]);
        assert_eq!(r.effective_rating(), Some(8.0));
    }

    #[test]
    fn effective_rating_falls_back_to_category_mean() {
        let r = review(None, &[("cleanliness", 9.0), ("communication", 7.0)]);
        assert_eq!(r.effective_rating(), Some(8.0));
    }

    #[test]
    fn effective_rating_keeps_explicit_zero() {
        let r = review(Some(0.0), &[("cleanliness", 9.0)]);
        assert_eq!(r.effective_rating(), Some(0.0));
    }

    #[test]
    fn effective_rating_is_none_without_any_scores() {
        let r = review(None, &[]);
        assert_eq!(r.effective_rating(), None);
    }

    #[test]
    fn property_name_strips_internal_code() {
        let r = review(Some(8.0), &[]);
        assert_eq!(r.property_name(), "2B N1 A");

        let mut plain = review(Some(8.0), &[]);
        plain.listing_name = "Soho Loft".to_string();
        assert_eq!(plain.property_name(), "Soho Loft");
    }

    #[test]
    fn provider_review_deserializes_from_payload() {
        let json = r#"{
            "id": 7453,
            "type": "host-to-guest",
            "status": "published",
            "rating": null,
            "publicReview": "Shane and family are wonderful!",
            "reviewCategory": [
                {"category": "cleanliness", "rating": 10},
                {"category": "communication", "rating": 10},
                {"category": "respect_house_rules", "rating": 10}
            ],
            "submittedAt": "2020-08-21 22:45:14",
            "guestName": "Shane Finkelstein",
            "listingName": "2B N1 A - 29 Shoreditch Heights"
        }"#;

        let review: ProviderReview = serde_json::from_str(json).unwrap();
        assert_eq!(review.id, 7453);
        assert_eq!(review.review_category.len(), 3);
        assert_eq!(review.rating, None);

        let submitted = review.parse_submitted_at().unwrap();
        assert_eq!(
            submitted,
            Utc.with_ymd_and_hms(2020, 8, 21, 22, 45, 14).unwrap()
        );
    }

    #[test]
    fn provider_timestamp_accepts_iso_8601() {
        let mut review: ProviderReview = serde_json::from_str(
            r#"{"id": 1, "type": "guest-to-host", "rating": 9,
                "submittedAt": "2024-01-01T10:30:00", "guestName": "A",
                "listingName": "B"}"#,
        )
        .unwrap();
        assert!(review.parse_submitted_at().is_ok());

        review.submitted_at = "not a date".to_string();
        assert!(review.parse_submitted_at().is_err());
    }
}
