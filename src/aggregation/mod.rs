pub mod filter;
pub mod metrics;
pub mod normalizer;
pub mod types;

pub use filter::{filter_reviews, ReviewFilter, StatusFilter};
pub use normalizer::normalize;
pub use types::{NormalizedAggregate, RatingBand, Tier};
