//! Finnhub company-news client

use async_trait::async_trait;
use reqwest::Client;

use crate::config::StockConfig;
use crate::error::{Result, StockError};
use crate::news::{NewsProvider, NewsQuery, RawNewsArticle};

const PROVIDER: &str = "Finnhub";
const DATASET: &str = "news";
const TOKEN_HEADER: &str = "X-Finnhub-Token";

/// Finnhub client for the company-news endpoint
///
/// The API key is not stored on the client; it is supplied with every
/// request so that a key rotated after startup is picked up.
#[derive(Debug, Clone)]
pub struct FinnhubClient {
    client: Client,
    base_url: String,
}

impl FinnhubClient {
    /// Create a client using the base URL and timeout from `config`
    pub fn new(config: &StockConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| StockError::Config(format!("Failed to build Finnhub HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: config.finnhub_base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Full URL of the company-news endpoint
    pub fn company_news_url(&self) -> String {
        format!("{}/company-news", self.base_url)
    }
}

#[async_trait]
impl NewsProvider for FinnhubClient {
    fn name(&self) -> &str {
        PROVIDER
    }

    /// Get company news for the query window
    async fn company_news(
        &self,
        query: &NewsQuery,
        credential: &str,
    ) -> Result<Vec<RawNewsArticle>> {
        let url = self.company_news_url();
        let params = [
            ("symbol", query.symbol.clone()),
            ("from", query.from_param()),
            ("to", query.to_param()),
        ];

        let response = self
            .client
            .get(&url)
            .header(TOKEN_HEADER, credential)
            .query(&params)
            .send()
            .await
            .map_err(|e| {
                tracing::warn!("Finnhub request failed: {e}");
                StockError::fetch(PROVIDER, DATASET, e)
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            tracing::warn!(%status, "Finnhub API error");
            return Err(StockError::fetch(
                PROVIDER,
                DATASET,
                format!("HTTP {status}: {}", body.trim()),
            ));
        }

        response
            .json::<Vec<RawNewsArticle>>()
            .await
            .map_err(|e| StockError::fetch(PROVIDER, DATASET, format!("invalid response body: {e}")))
    }
}
