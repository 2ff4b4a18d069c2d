//! Tool for fetching recent company news

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{Value, json};
use std::sync::Arc;
use toolkit_core::{Result as ToolResult, Tool};

use crate::config::StockConfig;
use crate::error::Result;
use crate::news::{NewsAggregator, NewsProvider};

/// Tool returning deduplicated company news from the last week
pub struct StockNewsTool {
    provider: Arc<dyn NewsProvider>,
    config: Arc<StockConfig>,
}

#[derive(Debug, Deserialize)]
struct NewsParams {
    #[serde(alias = "symbol", alias = "ticker")]
    stock_symbol: String,
    #[serde(default)]
    finnhub_key: Option<String>,
    #[serde(default)]
    target_count: Option<usize>,
}

impl StockNewsTool {
    /// Create a new news tool
    pub fn new(provider: Arc<dyn NewsProvider>, config: Arc<StockConfig>) -> Self {
        Self { provider, config }
    }

    async fn fetch_news(&self, params: NewsParams) -> Result<Value> {
        // Resolved per call so a key exported after startup is used
        let credential = self.config.resolve_finnhub_key(params.finnhub_key.as_deref());
        let target_count = params
            .target_count
            .unwrap_or(self.config.default_news_count);

        let news = NewsAggregator::new(self.provider.as_ref())
            .with_lookback_days(self.config.news_lookback_days)
            .fetch(&params.stock_symbol, credential.as_deref(), target_count)
            .await?;

        Ok(json!(news))
    }
}

#[async_trait]
impl Tool for StockNewsTool {
    async fn execute(&self, params: Value) -> ToolResult<Value> {
        let params: NewsParams = serde_json::from_value(params)
            .map_err(|e| toolkit_core::Error::InvalidParameters(e.to_string()))?;

        Ok(self.fetch_news(params).await?)
    }

    fn name(&self) -> &'static str {
        "get_stock_news"
    }

    fn description(&self) -> &'static str {
        "Fetch news about a stock from Finnhub for the past week. \
         Returns a list of {source, content} entries with duplicates removed."
    }

    fn input_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "stock_symbol": {
                    "type": "string",
                    "description": "Stock ticker symbol (e.g., 'AAPL', 'TSLA')"
                },
                "finnhub_key": {
                    "type": "string",
                    "description": "Finnhub API key; defaults to the FINNHUB_API_KEY environment variable"
                },
                "target_count": {
                    "type": "integer",
                    "description": "Target number of news items to return",
                    "minimum": 1,
                    "default": self.config.default_news_count
                }
            },
            "required": ["stock_symbol"]
        })
    }
}
