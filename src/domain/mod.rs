pub mod models;

pub use models::{CategoryScore, ProviderReview, ProviderReviewsResponse, Review};
