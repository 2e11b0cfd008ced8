use std::collections::BTreeMap;

use chrono::{DateTime, Datelike, Duration, Utc};
use serde::Serialize;

use crate::domain::Review;

use super::types::{RatingBand, Tier};

/// Headline dashboard figures plus the 30/60-day review-volume trend
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryMetrics {
    pub total_reviews: usize,
    pub approved_reviews: usize,
    pub approval_rate: f64,
    pub avg_rating: f64,
    pub recent_reviews: usize,
    pub trend_pct: f64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryAverage {
    pub category: String,
    pub avg_rating: f64,
    pub tier: Tier,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyPerformance {
    pub property: String,
    pub avg_rating: f64,
    pub total_reviews: usize,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DistributionSlice {
    pub band: RatingBand,
    pub count: usize,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyTrendPoint {
    /// "YYYY-MM"
    pub month: String,
    pub avg_rating: f64,
    pub categories: Vec<MonthlyCategoryAverage>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyCategoryAverage {
    pub category: String,
    pub avg_rating: f64,
}

/// Counts, approval rate, average effective rating and the period-over-period
/// volume trend. `now` is injected so the 30/60-day windows are testable.
pub fn summary(reviews: &[Review], now: DateTime<Utc>) -> SummaryMetrics {
    let total_reviews = reviews.len();
    let approved_reviews = reviews.iter().filter(|r| r.is_approved).count();

    let approval_rate = if total_reviews == 0 {
        0.0
    } else {
        approved_reviews as f64 / total_reviews as f64 * 100.0
    };

    let ratings: Vec<f64> = reviews.iter().filter_map(|r| r.effective_rating()).collect();
    let avg_rating = mean(&ratings);

    let thirty_days_ago = now - Duration::days(30);
    let sixty_days_ago = now - Duration::days(60);

    let recent_reviews = reviews
        .iter()
        .filter(|r| r.submitted_at >= thirty_days_ago)
        .count();
    let previous_reviews = reviews
        .iter()
        .filter(|r| r.submitted_at >= sixty_days_ago && r.submitted_at < thirty_days_ago)
        .count();

    let trend_pct =
        (recent_reviews as f64 - previous_reviews as f64) / previous_reviews.max(1) as f64 * 100.0;

    SummaryMetrics {
        total_reviews,
        approved_reviews,
        approval_rate,
        avg_rating,
        recent_reviews,
        trend_pct,
    }
}

/// Average sub-score per known category name, with a good/warning/poor tier.
/// Categories nothing matched average to 0.
pub fn category_breakdown(reviews: &[Review], categories: &[String]) -> Vec<CategoryAverage> {
    categories
        .iter()
        .map(|category| {
            let ratings: Vec<f64> = reviews
                .iter()
                .flat_map(|r| &r.category_scores)
                .filter(|c| c.category == *category)
                .map(|c| c.rating)
                .collect();

            let avg_rating = round_to(mean(&ratings), 2);
            CategoryAverage {
                category: category.clone(),
                avg_rating,
                tier: Tier::from_average(avg_rating),
            }
        })
        .collect()
}

/// Mean effective rating and review count per listing, best listing first.
/// The full listingName is the grouping key; the display name drops the
/// internal code after " - ".
pub fn property_comparison(reviews: &[Review]) -> Vec<PropertyPerformance> {
    struct Group {
        property: String,
        ratings: Vec<f64>,
        total_reviews: usize,
    }

    let mut index: BTreeMap<String, Group> = BTreeMap::new();

    for review in reviews {
        let group = index
            .entry(review.listing_name.clone())
            .or_insert_with(|| Group {
                property: review.property_name().to_string(),
                ratings: Vec::new(),
                total_reviews: 0,
            });

        if let Some(rating) = review.effective_rating() {
            group.ratings.push(rating);
        }
        group.total_reviews += 1;
    }

    let mut performances: Vec<PropertyPerformance> = index
        .into_values()
        .map(|group| PropertyPerformance {
            property: group.property,
            avg_rating: round_to(mean(&group.ratings), 2),
            total_reviews: group.total_reviews,
        })
        .collect();

    performances.sort_by(|a, b| b.avg_rating.total_cmp(&a.avg_rating));
    performances
}

/// Bucket every rated review into one of the four fixed bands; empty bands
/// are omitted.
pub fn rating_distribution(reviews: &[Review]) -> Vec<DistributionSlice> {
    let ratings: Vec<f64> = reviews.iter().filter_map(|r| r.effective_rating()).collect();

    RatingBand::ALL
        .iter()
        .map(|&band| DistributionSlice {
            band,
            count: ratings
                .iter()
                .filter(|&&r| RatingBand::from_rating(r) == band)
                .count(),
        })
        .filter(|slice| slice.count > 0)
        .collect()
}

/// Per-month mean effective rating plus per-category means, chronological,
/// truncated to the most recent `window` months.
pub fn monthly_trends(
    reviews: &[Review],
    categories: &[String],
    window: usize,
) -> Vec<MonthlyTrendPoint> {
    struct MonthBucket {
        ratings: Vec<f64>,
        category_ratings: Vec<Vec<f64>>,
    }

    let mut months: BTreeMap<(i32, u32), MonthBucket> = BTreeMap::new();

    for review in reviews {
        let key = (review.submitted_at.year(), review.submitted_at.month());
        let bucket = months.entry(key).or_insert_with(|| MonthBucket {
            ratings: Vec::new(),
            category_ratings: vec![Vec::new(); categories.len()],
        });

        if let Some(rating) = review.effective_rating() {
            bucket.ratings.push(rating);
        }

        for score in &review.category_scores {
            if let Some(idx) = categories.iter().position(|c| *c == score.category) {
                bucket.category_ratings[idx].push(score.rating);
            }
        }
    }

    let mut points: Vec<MonthlyTrendPoint> = months
        .into_iter()
        .map(|((year, month), bucket)| MonthlyTrendPoint {
            month: format!("{:04}-{:02}", year, month),
            avg_rating: round_to(mean(&bucket.ratings), 1),
            categories: categories
                .iter()
                .zip(&bucket.category_ratings)
                .map(|(category, ratings)| MonthlyCategoryAverage {
                    category: category.clone(),
                    avg_rating: round_to(mean(ratings), 1),
                })
                .collect(),
        })
        .collect();

    // BTreeMap iteration is already chronological; keep only the tail
    if points.len() > window {
        points.drain(..points.len() - window);
    }
    points
}

fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}
