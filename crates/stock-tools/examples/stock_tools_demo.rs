//! Call each stock tool once and print what comes back
//!
//! # Usage
//!
//! ```bash
//! export FINNHUB_API_KEY="your-key"   # or put it in .env
//! cargo run -p stock-tools --example stock_tools_demo -- AAPL
//! ```

use serde_json::json;
use std::sync::Arc;
use stock_tools::{StockConfig, register_stock_tools};
use toolkit_core::ToolRegistry;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    toolkit_utils::load_dotenv();
    toolkit_utils::init_tracing_with("warn,stock_tools=info", toolkit_utils::LogFormat::from_env());

    let symbol = std::env::args().nth(1).unwrap_or_else(|| "AAPL".to_string());

    let registry = ToolRegistry::new();
    register_stock_tools(&registry, Arc::new(StockConfig::default()))?;

    let calls = [
        ("get_stock_history", json!({"ticker": symbol, "period": "3mo", "interval": "1wk"})),
        ("get_stock_info", json!({"ticker": symbol})),
        ("get_stock_news", json!({"stock_symbol": symbol, "target_count": 5})),
    ];

    for (name, params) in calls {
        let Some(tool) = registry.get(name) else {
            anyhow::bail!("tool {name} is not registered");
        };
        let output = tool.invoke(params).await;
        println!("=== {name}\n{}\n", serde_json::to_string_pretty(&output)?);
    }

    Ok(())
}
