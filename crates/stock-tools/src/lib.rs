//! Stock market data tools for agent frameworks
//!
//! This crate exposes three callable tools:
//!
//! - `get_stock_history`: price history with dividends and splits from Yahoo Finance
//! - `get_stock_info`: descriptive company info from Yahoo Finance
//! - `get_stock_news`: last week's company news from Finnhub, deduplicated
//!
//! The logic behind them lives in [`market`] and [`news`] and talks to
//! providers through the [`MarketDataProvider`] and [`NewsProvider`] traits,
//! so it can run against test doubles.
//!
//! # Example
//!
//! ```rust,ignore
//! use stock_tools::{StockConfig, stock_tools};
//! use serde_json::json;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let tools = stock_tools(Arc::new(StockConfig::default()))?;
//!     for tool in &tools {
//!         let output = tool.invoke(json!({"ticker": "AAPL", "stock_symbol": "AAPL"})).await;
//!         println!("{}: {output}", tool.name());
//!     }
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod config;
pub mod error;
pub mod market;
pub mod news;
pub mod tools;

pub use api::{FinnhubClient, YahooFinanceClient};
pub use config::StockConfig;
pub use error::{Result, StockError};
pub use market::{Interval, MarketDataProvider, Period, PriceBar, PriceHistory};
pub use news::{NewsAggregator, NewsItem, NewsProvider, NewsQuery, RawNewsArticle};
pub use tools::{
    StockHistoryTool, StockInfoTool, StockNewsTool, register_stock_tools, stock_tools,
};
