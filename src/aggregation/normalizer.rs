use std::collections::HashMap;

use crate::domain::Review;

use super::types::NormalizedAggregate;

/// Collapses raw reviews into one aggregate per (listing, type, source,
/// calendar day), keeping a running arithmetic mean per bucket.
///
/// Output order is the insertion order of each key's first occurrence.
/// Reviews without any rating signal (no overall rating, no category scores)
/// are skipped so every bucket holds `total_reviews == ratings.len()`.
pub fn normalize(reviews: &[Review]) -> Vec<NormalizedAggregate> {
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut aggregates: Vec<NormalizedAggregate> = Vec::new();

    for review in reviews {
        let Some(rating) = review.effective_rating() else {
            continue;
        };

        let date = review.submitted_at.date_naive();
        let key = format!(
            "{}|{}|{}|{}",
            review.listing_name, review.review_type, review.source, date
        );

        match index.get(&key) {
            Some(&idx) => {
                let aggregate = &mut aggregates[idx];
                aggregate.ratings.push(rating);
                aggregate.total_reviews += 1;
                aggregate.avg_rating = mean(&aggregate.ratings);
            }
            None => {
                index.insert(key, aggregates.len());
                aggregates.push(NormalizedAggregate {
                    listing_name: review.listing_name.clone(),
                    review_type: review.review_type.clone(),
                    source: review.source.clone(),
                    date,
                    total_reviews: 1,
                    ratings: vec![rating],
                    avg_rating: rating,
                });
            }
        }
    }

    aggregates
}

fn mean(ratings: &[f64]) -> f64 {
    if ratings.is_empty() {
        return 0.0;
    }
    ratings.iter().sum::<f64>() / ratings.len() as f64
}
