#[derive(Debug, Clone)]
pub struct MetricsSettings {
    pub categories: Vec<String>,
    pub monthly_window: usize,
}

impl Default for MetricsSettings {
    fn default() -> Self {
        Self {
            categories: vec![
                "cleanliness".to_string(),
                "communication".to_string(),
                "respect_house_rules".to_string(),
            ],
            monthly_window: 12,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ProviderSettings {
    pub api_url: String,
    pub client_id: String,
    pub client_secret: String,
    pub source: &'static str,
    pub user_agent: &'static str,
    pub timeout_secs: u64,
    pub rate_limit_ms: u64,
}

impl Default for ProviderSettings {
    fn default() -> Self {
        Self {
            api_url: env_or("THIRD_PARTY_API_URL", "http://localhost:8000"),
            client_id: env_or("THIRD_PARTY_CLIENT_ID", ""),
            client_secret: env_or("THIRD_PARTY_CLIENT_SECRET", ""),
            source: "hostaway",
            user_agent: "FlexReviews/1.0",
            timeout_secs: 30,
            rate_limit_ms: 100, // 10 req/sec
        }
    }
}

#[derive(Debug, Clone)]
pub struct AdminSettings {
    /// Bearer token guarding the sync endpoint. None (unset or empty
    /// ADMIN_TOKEN) disables admin-triggered sync entirely.
    pub token: Option<String>,
}

impl Default for AdminSettings {
    fn default() -> Self {
        Self {
            token: std::env::var("ADMIN_TOKEN").ok().filter(|t| !t.is_empty()),
        }
    }
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

#[derive(Debug, Clone, Default)]
pub struct AppConfig {
    pub metrics: MetricsSettings,
    pub provider: ProviderSettings,
    pub admin: AdminSettings,
}

impl AppConfig {
    pub fn new() -> Self {
        Self::default()
    }
}

// Passed explicitly (Dependency Injection) rather than held in globals.
