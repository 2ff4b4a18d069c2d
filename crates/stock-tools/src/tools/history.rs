//! Tool for fetching stock price history

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{Value, json};
use std::sync::Arc;
use toolkit_core::{Result as ToolResult, Tool};

use crate::config::StockConfig;
use crate::error::Result;
use crate::market::{self, Interval, MarketDataProvider, Period};

/// Tool returning price history as a column-major table
pub struct StockHistoryTool {
    provider: Arc<dyn MarketDataProvider>,
    config: Arc<StockConfig>,
}

#[derive(Debug, Deserialize)]
struct HistoryParams {
    #[serde(alias = "symbol")]
    ticker: String,
    #[serde(default)]
    period: Option<String>,
    #[serde(default)]
    interval: Option<String>,
}

impl StockHistoryTool {
    /// Create a new stock history tool
    pub fn new(provider: Arc<dyn MarketDataProvider>, config: Arc<StockConfig>) -> Self {
        Self { provider, config }
    }

    async fn fetch_history(&self, params: HistoryParams) -> Result<Value> {
        let period = match params.period.as_deref() {
            Some(period) => period.parse::<Period>()?,
            None => self.config.default_period,
        };
        let interval = match params.interval.as_deref() {
            Some(interval) => interval.parse::<Interval>()?,
            None => self.config.default_interval,
        };

        let history =
            market::price_history(self.provider.as_ref(), &params.ticker, period, interval)
                .await?;
        Ok(json!(history))
    }
}

#[async_trait]
impl Tool for StockHistoryTool {
    async fn execute(&self, params: Value) -> ToolResult<Value> {
        let params: HistoryParams = serde_json::from_value(params)
            .map_err(|e| toolkit_core::Error::InvalidParameters(e.to_string()))?;

        Ok(self.fetch_history(params).await?)
    }

    fn name(&self) -> &'static str {
        "get_stock_history"
    }

    fn description(&self) -> &'static str {
        "Fetch historical stock data for a ticker symbol. \
         Returns Open, High, Low, Close, Adj Close, Volume, Dividends and \
         Stock Splits columns keyed by timestamp."
    }

    fn input_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "ticker": {
                    "type": "string",
                    "description": "Stock ticker symbol (e.g., 'AAPL', 'MSFT')"
                },
                "period": {
                    "type": "string",
                    "description": "Period over which to fetch data",
                    "enum": Period::ALL.iter().map(|p| p.as_str()).collect::<Vec<_>>(),
                    "default": self.config.default_period.as_str()
                },
                "interval": {
                    "type": "string",
                    "description": "Data sampling interval",
                    "enum": Interval::ALL.iter().map(|i| i.as_str()).collect::<Vec<_>>(),
                    "default": self.config.default_interval.as_str()
                }
            },
            "required": ["ticker"]
        })
    }
}
