//! Stock data tools for agent frameworks

pub mod history;
pub mod info;
pub mod news;

pub use history::StockHistoryTool;
pub use info::StockInfoTool;
pub use news::StockNewsTool;

use std::sync::Arc;
use toolkit_core::{Tool, ToolRegistry};

use crate::api::{FinnhubClient, YahooFinanceClient};
use crate::config::StockConfig;
use crate::error::Result;

/// Build the history, info and news tools backed by the live providers
pub fn stock_tools(config: Arc<StockConfig>) -> Result<Vec<Arc<dyn Tool>>> {
    config.validate()?;

    let yahoo = Arc::new(YahooFinanceClient::new());
    let finnhub = Arc::new(FinnhubClient::new(&config)?);

    let tools: Vec<Arc<dyn Tool>> = vec![
        Arc::new(StockHistoryTool::new(yahoo.clone(), Arc::clone(&config))),
        Arc::new(StockInfoTool::new(yahoo)),
        Arc::new(StockNewsTool::new(finnhub, config)),
    ];
    Ok(tools)
}

/// Register the stock tools on `registry`
pub fn register_stock_tools(registry: &ToolRegistry, config: Arc<StockConfig>) -> Result<()> {
    for tool in stock_tools(config)? {
        registry.register(tool);
    }
    Ok(())
}
