//! Yahoo Finance API client

use async_trait::async_trait;
use chrono::DateTime;
use serde_json::{Map, Value};
use yahoo_finance_api as yahoo;

use crate::error::{Result, StockError};
use crate::market::{Interval, MarketDataProvider, Period, PriceBar};

const PROVIDER: &str = "Yahoo Finance";

// Merge order for quote-summary modules; earlier modules win on key clashes
const SUMMARY_MODULES: [&str; 5] = [
    "quoteType",
    "assetProfile",
    "summaryDetail",
    "defaultKeyStatistics",
    "financialData",
];

/// Yahoo Finance API client
///
/// A fresh connector is built per call; the connector takes care of the
/// cookie and crumb that the quote-summary endpoint needs.
#[derive(Debug, Clone, Default)]
pub struct YahooFinanceClient {}

impl YahooFinanceClient {
    /// Create a new Yahoo Finance client
    pub fn new() -> Self {
        Self {}
    }
}

fn is_not_found(code: Option<&str>) -> bool {
    code.is_some_and(|code| code.eq_ignore_ascii_case("Not Found"))
}

/// Index of the bar whose period contains `date`
fn bar_index(bars: &[PriceBar], date: i64) -> Option<usize> {
    if bars.is_empty() {
        return None;
    }
    let idx = bars.partition_point(|bar| bar.timestamp.timestamp() <= date);
    Some(idx.saturating_sub(1))
}

/// Turn a chart response into bars, with dividend and split events folded in
///
/// A response with no bars is an empty history, not an error.
fn bars_from_response(response: &yahoo::YResponse) -> Result<Vec<PriceBar>> {
    let quotes = match response.quotes() {
        Ok(quotes) => quotes,
        Err(yahoo::YahooError::NoQuotes | yahoo::YahooError::NoResult) => return Ok(Vec::new()),
        Err(e) => return Err(StockError::fetch(PROVIDER, "price history", e)),
    };

    let mut bars: Vec<PriceBar> = quotes
        .iter()
        .filter_map(|q| {
            let timestamp = DateTime::from_timestamp(q.timestamp, 0)?;
            Some(PriceBar {
                timestamp,
                open: q.open,
                high: q.high,
                low: q.low,
                close: q.close,
                volume: q.volume,
                adjclose: q.adjclose,
                dividends: 0.0,
                stock_splits: 0.0,
            })
        })
        .collect();
    bars.sort_by_key(|bar| bar.timestamp);

    let dividends = response
        .dividends()
        .map_err(|e| StockError::fetch(PROVIDER, "price history", e))?;
    for dividend in dividends {
        if let Some(idx) = bar_index(&bars, dividend.date) {
            bars[idx].dividends += dividend.amount;
        }
    }

    let splits = response
        .splits()
        .map_err(|e| StockError::fetch(PROVIDER, "price history", e))?;
    for split in splits.into_iter().filter(|s| s.denominator > 0.0) {
        let ratio = split.numerator / split.denominator;
        if let Some(idx) = bar_index(&bars, split.date) {
            let bar = &mut bars[idx];
            bar.stock_splits = if bar.stock_splits > 0.0 {
                bar.stock_splits * ratio
            } else {
                ratio
            };
        }
    }

    Ok(bars)
}

/// Flatten the quote-summary modules into one info object
fn info_from_summary(symbol: &str, summary: yahoo::YQuoteSummary) -> Result<Map<String, Value>> {
    if let Some(error) = summary.finance.and_then(|finance| finance.error) {
        return Err(StockError::fetch(
            PROVIDER,
            "company info",
            error.description.or(error.code).unwrap_or_default(),
        ));
    }

    let Some(quote_summary) = summary.quote_summary else {
        return Err(StockError::no_data("company info", symbol));
    };

    if let Some(error) = quote_summary.error {
        if is_not_found(error.code.as_deref()) {
            return Err(StockError::no_data("company info", symbol));
        }
        return Err(StockError::fetch(
            PROVIDER,
            "company info",
            error.description.or(error.code).unwrap_or_default(),
        ));
    }

    let Some(data) = quote_summary.result.into_iter().flatten().next() else {
        return Err(StockError::no_data("company info", symbol));
    };

    let modules = match serde_json::to_value(data) {
        Ok(Value::Object(modules)) => modules,
        Ok(_) => Map::new(),
        Err(e) => return Err(StockError::fetch(PROVIDER, "company info", e)),
    };

    let mut info = Map::new();
    for module in SUMMARY_MODULES {
        if let Some(Value::Object(fields)) = modules.get(module) {
            for (key, value) in fields {
                if !value.is_null() {
                    info.entry(key.clone()).or_insert_with(|| value.clone());
                }
            }
        }
    }

    if info.is_empty() {
        return Err(StockError::no_data("company info", symbol));
    }
    Ok(info)
}

#[async_trait]
impl MarketDataProvider for YahooFinanceClient {
    /// Get historical bars for a symbol over a provider range
    async fn price_bars(
        &self,
        symbol: &str,
        period: Period,
        interval: Interval,
    ) -> Result<Vec<PriceBar>> {
        let provider = yahoo::YahooConnector::new()
            .map_err(|e| StockError::fetch(PROVIDER, "price history", e))?;

        let response = match provider
            .get_quote_range(symbol, interval.as_str(), period.as_str())
            .await
        {
            Ok(response) => response,
            Err(yahoo::YahooError::ApiError(error)) if is_not_found(error.code.as_deref()) => {
                return Err(StockError::no_data("price history", symbol));
            },
            Err(e) => {
                tracing::warn!("Yahoo Finance chart request failed: {e}");
                return Err(StockError::fetch(PROVIDER, "price history", e));
            },
        };

        bars_from_response(&response)
    }

    /// Get company information from the quote-summary modules
    async fn company_info(&self, symbol: &str) -> Result<Map<String, Value>> {
        tracing::debug!("Fetching company info for {symbol}");

        let mut provider = yahoo::YahooConnector::new()
            .map_err(|e| StockError::fetch(PROVIDER, "company info", e))?;

        let summary = provider.get_ticker_info(symbol).await.map_err(|e| {
            tracing::warn!("Yahoo Finance quote summary failed: {e}");
            StockError::fetch(PROVIDER, "company info", e)
        })?;

        info_from_summary(symbol, summary)
    }
}
