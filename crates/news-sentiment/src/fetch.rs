use async_trait::async_trait;
use dashboard_core::{DashboardError, NewsSource};
use reqwest::Client;
use std::time::Duration;

use crate::extract::extract_headlines;

const BASE_URL: &str = "https://news.google.com";
const USER_AGENT: &str = "Mozilla/5.0 (X11; Linux x86_64) equity-dash/0.1";

/// Fetches the RSS search feed for a keyword and extracts candidate
/// headline texts. Errors are reported as `Network`; the engine above
/// turns them into the fail-soft placeholder.
#[derive(Clone)]
pub struct GoogleNewsClient {
    client: Client,
    base_url: String,
}

impl GoogleNewsClient {
    pub fn new() -> Self {
        let timeout_secs: u64 = std::env::var("DASH_HTTP_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(30);

        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .unwrap_or_else(|_| Client::new());

        Self {
            client,
            base_url: BASE_URL.to_string(),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    async fn fetch_body(&self, keyword: &str) -> Result<String, DashboardError> {
        let query: String = keyword.split_whitespace().collect::<Vec<_>>().join("+");
        let url = format!("{}/rss/search?q={}", self.base_url, query);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| DashboardError::Network(e.to_string()))?;

        if !response.status().is_success() {
            return Err(DashboardError::Network(format!(
                "HTTP {} from news feed",
                response.status()
            )));
        }

        response
            .text()
            .await
            .map_err(|e| DashboardError::Network(e.to_string()))
    }
}

impl Default for GoogleNewsClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl NewsSource for GoogleNewsClient {
    async fn headlines(&self, keyword: &str) -> Result<Vec<String>, DashboardError> {
        let body = self.fetch_body(keyword).await?;
        Ok(extract_headlines(&body))
    }
}
