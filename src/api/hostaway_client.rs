use anyhow::{Context, Result};
use chrono::{DateTime, Duration, Utc};
use log::{info, warn};
use serde::Deserialize;
use serde_json::Value;

use crate::cache::Cache;
use crate::config::settings::ProviderSettings;
use crate::domain::{ProviderReview, ProviderReviewsResponse};
use crate::http::RateLimitedClient;

const RAW_CACHE_KEY: &str = "hostaway_reviews";
// Refresh slightly before the provider expires the token.
const TOKEN_EXPIRY_MARGIN_SECS: i64 = 10;

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    expires_in: i64,
}

struct CachedToken {
    token: String,
    expires_at: DateTime<Utc>,
}

impl CachedToken {
    fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }
}

/// Hostaway-style review provider client with client-credentials auth and
/// an in-process token cache.
pub struct HostawayClient {
    client: RateLimitedClient,
    settings: ProviderSettings,
    token: Option<CachedToken>,
}

impl HostawayClient {
    pub fn new(settings: ProviderSettings) -> Result<Self> {
        let client = RateLimitedClient::new(
            settings.user_agent,
            settings.timeout_secs,
            settings.rate_limit_ms,
        )?;

        Ok(Self {
            client,
            settings,
            token: None,
        })
    }

    /// Fetch all reviews from the provider. The raw payload is archived to
    /// the cache; when the provider is unreachable the last archived payload
    /// is served instead.
    pub async fn fetch_reviews(&mut self, cache: &Cache) -> Result<Vec<ProviderReview>> {
        let value = match self.fetch_reviews_raw().await {
            Ok(value) => {
                if let Err(e) = cache.save_raw(RAW_CACHE_KEY, &value) {
                    warn!("Failed to archive provider payload: {:?}", e);
                }
                value
            }
            Err(e) => {
                warn!("Provider fetch failed, trying cached payload: {:?}", e);
                cache
                    .load_raw(RAW_CACHE_KEY)?
                    .ok_or_else(|| e.context("No cached provider payload available"))?
            }
        };

        let response: ProviderReviewsResponse = serde_json::from_value(value)
            .context("Failed to map provider payload to ProviderReviewsResponse")?;

        if response.status != "success" {
            anyhow::bail!("Provider returned status: {}", response.status);
        }

        info!("Fetched {} reviews from provider", response.result.len());
        Ok(response.result)
    }

    async fn fetch_reviews_raw(&mut self) -> Result<Value> {
        let url = format!("{}/reviews", self.settings.api_url);
        let token = self.bearer_token().await?;

        let mut response = self.client.get(&url, Some(&token)).await?;

        // Expired or revoked token: re-authenticate once and retry
        if response.status() == reqwest::StatusCode::UNAUTHORIZED {
            warn!("Token rejected, re-authenticating");
            self.token = None;
            let token = self.bearer_token().await?;
            response = self.client.get(&url, Some(&token)).await?;
        }

        if !response.status().is_success() {
            anyhow::bail!("Provider API returned status: {}", response.status());
        }

        let text = response.text().await?;
        serde_json::from_str(&text).context("Failed to parse provider response as JSON")
    }

    async fn bearer_token(&mut self) -> Result<String> {
        let now = Utc::now();
        if let Some(cached) = &self.token {
            if !cached.is_expired(now) {
                return Ok(cached.token.clone());
            }
        }

        self.authenticate(now).await?;
        Ok(self.token.as_ref().map(|t| t.token.clone()).unwrap_or_default())
    }

    async fn authenticate(&mut self, now: DateTime<Utc>) -> Result<()> {
        let url = format!("{}/auth/token", self.settings.api_url);
        info!("Authenticating with provider at {}", url);

        let form = [
            ("client_id", self.settings.client_id.as_str()),
            ("client_secret", self.settings.client_secret.as_str()),
            ("grant_type", "client_credentials"),
            ("scope", "general"),
        ];

        let response = self.client.post_form(&url, &form).await?;
        if !response.status().is_success() {
            anyhow::bail!("Provider auth returned status: {}", response.status());
        }

        let token: TokenResponse = response
            .json()
            .await
            .context("Failed to parse provider token response")?;

        let lifetime = Duration::seconds((token.expires_in - TOKEN_EXPIRY_MARGIN_SECS).max(0));
        self.token = Some(CachedToken {
            token: token.access_token,
            expires_at: now + lifetime,
        });

        Ok(())
    }
}
