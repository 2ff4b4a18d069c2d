//! Tool for fetching company information

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{Value, json};
use std::sync::Arc;
use toolkit_core::{Result as ToolResult, Tool};

use crate::market::{self, MarketDataProvider};

/// Tool returning the provider's descriptive info for a ticker
pub struct StockInfoTool {
    provider: Arc<dyn MarketDataProvider>,
}

#[derive(Debug, Deserialize)]
struct InfoParams {
    #[serde(alias = "symbol")]
    ticker: String,
}

impl StockInfoTool {
    /// Create a new stock info tool
    pub fn new(provider: Arc<dyn MarketDataProvider>) -> Self {
        Self { provider }
    }
}

#[async_trait]
impl Tool for StockInfoTool {
    async fn execute(&self, params: Value) -> ToolResult<Value> {
        let params: InfoParams = serde_json::from_value(params)
            .map_err(|e| toolkit_core::Error::InvalidParameters(e.to_string()))?;

        let info = market::company_info(self.provider.as_ref(), &params.ticker).await?;
        Ok(Value::Object(info))
    }

    fn name(&self) -> &'static str {
        "get_stock_info"
    }

    fn description(&self) -> &'static str {
        "Fetch general information about a stock, as reported by the market data provider."
    }

    fn input_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "ticker": {
                    "type": "string",
                    "description": "Stock ticker symbol"
                }
            },
            "required": ["ticker"]
        })
    }
}
