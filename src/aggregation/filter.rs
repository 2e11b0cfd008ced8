use serde::{Deserialize, Serialize};

use crate::domain::Review;

use super::types::RatingBand;

/// Approval-status facet of the reviews table
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusFilter {
    #[default]
    All,
    Approved,
    Pending,
}

/// Explicit, serializable filter configuration for the reviews table.
/// Every field is optional; an empty filter selects everything.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewFilter {
    pub search: Option<String>,
    pub listing_name: Option<String>,
    #[serde(default)]
    pub status: StatusFilter,
    pub band: Option<RatingBand>,
}

impl ReviewFilter {
    pub fn matches(&self, review: &Review) -> bool {
        if let Some(search) = &self.search {
            let needle = search.to_lowercase();
            let in_text = review.public_review.to_lowercase().contains(&needle)
                || review.guest_name.to_lowercase().contains(&needle);
            if !in_text {
                return false;
            }
        }

        if let Some(listing) = &self.listing_name {
            if review.listing_name != *listing {
                return false;
            }
        }

        match self.status {
            StatusFilter::All => {}
            StatusFilter::Approved if !review.is_approved => return false,
            StatusFilter::Pending if review.is_approved => return false,
            _ => {}
        }

        if let Some(band) = self.band {
            match review.effective_rating() {
                Some(rating) => {
                    if RatingBand::from_rating(rating) != band {
                        return false;
                    }
                }
                // a band filter can never match a review without a rating
                None => return false,
            }
        }

        true
    }
}

/// Apply a filter over the collection, preserving input order.
pub fn filter_reviews<'a>(reviews: &'a [Review], filter: &ReviewFilter) -> Vec<&'a Review> {
    reviews.iter().filter(|r| filter.matches(r)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn review(guest: &str, text: &str, rating: f64, approved: bool) -> Review {
        Review {
            id: 0,
            review_type: "guest-to-host".to_string(),
            status: "published".to_string(),
            rating: Some(rating),
            public_review: text.to_string(),
            category_scores: Vec::new(),
            submitted_at: Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap(),
            guest_name: guest.to_string(),
            listing_name: "Flat 1 - X9".to_string(),
            source: "hostaway".to_string(),
            source_id: "1".to_string(),
            is_approved: approved,
        }
    }

    #[test]
    fn empty_filter_selects_everything() {
        let reviews = vec![review("Ada", "great", 9.0, true), review("Bob", "ok", 5.0, false)];
        assert_eq!(filter_reviews(&reviews, &ReviewFilter::default()).len(), 2);
    }

    #[test]
    fn search_matches_text_or_guest_case_insensitively() {
        let reviews = vec![review("Ada Lovelace", "Great stay", 9.0, true)];
        let filter = ReviewFilter {
            search: Some("lovelace".to_string()),
            ..Default::default()
        };
        assert_eq!(filter_reviews(&reviews, &filter).len(), 1);

        let filter = ReviewFilter {
            search: Some("GREAT".to_string()),
            ..Default::default()
        };
        assert_eq!(filter_reviews(&reviews, &filter).len(), 1);

        let filter = ReviewFilter {
            search: Some("terrible".to_string()),
            ..Default::default()
        };
        assert!(filter_reviews(&reviews, &filter).is_empty());
    }

    #[test]
    fn status_filter_splits_approved_and_pending() {
        let reviews = vec![review("Ada", "a", 9.0, true), review("Bob", "b", 5.0, false)];

        let approved = ReviewFilter {
            status: StatusFilter::Approved,
            ..Default::default()
        };
        assert_eq!(filter_reviews(&reviews, &approved)[0].guest_name, "Ada");

        let pending = ReviewFilter {
            status: StatusFilter::Pending,
            ..Default::default()
        };
        assert_eq!(filter_reviews(&reviews, &pending)[0].guest_name, "Bob");
    }

    #[test]
    fn band_filter_uses_effective_rating() {
        let mut unrated = review("Cal", "c", 0.0, false);
        unrated.rating = None;
        let reviews = vec![review("Ada", "a", 9.5, true), review("Bob", "b", 7.5, false), unrated];

        let filter = ReviewFilter {
            band: Some(RatingBand::Excellent),
            ..Default::default()
        };
        let hits = filter_reviews(&reviews, &filter);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].guest_name, "Ada");
    }
}
