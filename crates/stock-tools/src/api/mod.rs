//! API clients for stock data providers

pub mod finnhub;
pub mod yahoo;

pub use finnhub::FinnhubClient;
pub use yahoo::YahooFinanceClient;
