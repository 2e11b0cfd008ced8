use anyhow::{Context, Result};
use log::info;

use crate::api::HostawayClient;
use crate::cache::Cache;
use crate::config::settings::AppConfig;
use crate::database::{self, NewReview, UpsertOutcome};
use crate::domain::ProviderReview;

pub struct IngestionService {
    config: AppConfig,
    cache: Cache,
    client: HostawayClient,
}

impl IngestionService {
    pub fn new(config: AppConfig) -> Result<Self> {
        let client = HostawayClient::new(config.provider.clone())?;
        Ok(Self {
            config,
            cache: Cache::new("cache")?,
            client,
        })
    }

    pub async fn run(&mut self) -> Result<()> {
        info!("=== Starting Review Sync ===\n");

        // Step 1: Fetch reviews from the provider
        let provider_reviews = self.client.fetch_reviews(&self.cache).await?;
        info!("  → Fetched {} reviews from provider\n", provider_reviews.len());

        // Step 2: Convert to storable records (timestamps must parse here)
        let new_reviews = self.convert_reviews(&provider_reviews)?;
        info!("  → Converted {} reviews\n", new_reviews.len());

        // Step 3: Upsert into the database, deduplicated by (source, sourceId)
        let (inserted, updated) = self.store_reviews(&new_reviews)?;
        info!("  → Stored reviews: {} new, {} updated\n", inserted, updated);

        info!("=== Sync Complete ===");
        Ok(())
    }

    fn convert_reviews(&self, provider_reviews: &[ProviderReview]) -> Result<Vec<NewReview>> {
        provider_reviews
            .iter()
            .map(|review| self.convert_review(review))
            .collect()
    }

    fn convert_review(&self, review: &ProviderReview) -> Result<NewReview> {
        let submitted_at = review
            .parse_submitted_at()
            .with_context(|| format!("Invalid review {} from provider", review.id))?;

        Ok(NewReview {
            source: self.config.provider.source.to_string(),
            source_id: review.id.to_string(),
            review_type: review.review_type.clone(),
            status: review.status.clone(),
            rating: review.rating,
            public_review: review.public_review.clone(),
            guest_name: review.guest_name.clone(),
            listing_name: review.listing_name.clone(),
            submitted_at,
            category_scores: review.review_category.clone(),
        })
    }

    fn store_reviews(&self, new_reviews: &[NewReview]) -> Result<(usize, usize)> {
        let pool = database::create_pool()?;
        let mut conn = database::get_connection(&pool)?;
        database::setup::init_database(&mut conn)?;

        let mut inserted = 0;
        let mut updated = 0;
        for review in new_reviews {
            match database::reviews::upsert_review(&mut conn, review)? {
                UpsertOutcome::Inserted(_) => inserted += 1,
                UpsertOutcome::Updated(_) => updated += 1,
            }
        }

        Ok((inserted, updated))
    }
}
