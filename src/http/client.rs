use std::time::Duration;

use anyhow::{Context, Result};
use reqwest::Client;
use tokio::time::sleep;

/// HTTP client with built-in request pacing to stay under the provider's
/// rate limit.
pub struct RateLimitedClient {
    client: Client,
    delay: Duration,
    request_count: usize,
}

impl RateLimitedClient {
    pub fn new(user_agent: &str, timeout_secs: u64, rate_limit_ms: u64) -> Result<Self> {
        let client = Self::build_client(user_agent, timeout_secs)?;

        Ok(Self {
            client,
            delay: Duration::from_millis(rate_limit_ms),
            request_count: 0,
        })
    }

    pub async fn get(&mut self, url: &str, bearer: Option<&str>) -> Result<reqwest::Response> {
        self.pace().await;

        let mut request = self.client.get(url);
        if let Some(token) = bearer {
            request = request.bearer_auth(token);
        }

        request.send().await.context("Failed to send GET request")
    }

    pub async fn post_form(
        &mut self,
        url: &str,
        form: &[(&str, &str)],
    ) -> Result<reqwest::Response> {
        self.pace().await;

        self.client
            .post(url)
            .form(form)
            .send()
            .await
            .context("Failed to send POST request")
    }

    fn build_client(user_agent: &str, timeout_secs: u64) -> Result<Client> {
        Client::builder()
            .user_agent(user_agent)
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .context("Failed to build HTTP client")
    }

    async fn pace(&mut self) {
        if self.request_count > 0 {
            sleep(self.delay).await;
        }
        self.request_count += 1;
    }
}
