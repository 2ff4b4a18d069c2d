//! Price history and company info passthroughs
//!
//! These operations forward to a [`MarketDataProvider`] and only reshape what
//! comes back: bars become a column-major price table, and company info is
//! handed through untouched.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use crate::error::{Result, StockError};

/// Lookback period accepted by the market-data provider
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Period {
    #[serde(rename = "1d")]
    OneDay,
    #[serde(rename = "5d")]
    FiveDays,
    #[serde(rename = "1mo")]
    OneMonth,
    #[serde(rename = "3mo")]
    ThreeMonths,
    #[serde(rename = "6mo")]
    SixMonths,
    #[serde(rename = "1y")]
    OneYear,
    #[serde(rename = "2y")]
    TwoYears,
    #[serde(rename = "5y")]
    FiveYears,
    #[serde(rename = "10y")]
    TenYears,
    #[serde(rename = "ytd")]
    YearToDate,
    #[serde(rename = "max")]
    Max,
}

impl Period {
    /// Every accepted period, in provider order
    pub const ALL: [Period; 11] = [
        Period::OneDay,
        Period::FiveDays,
        Period::OneMonth,
        Period::ThreeMonths,
        Period::SixMonths,
        Period::OneYear,
        Period::TwoYears,
        Period::FiveYears,
        Period::TenYears,
        Period::YearToDate,
        Period::Max,
    ];

    /// Provider spelling of the period
    pub fn as_str(self) -> &'static str {
        match self {
            Period::OneDay => "1d",
            Period::FiveDays => "5d",
            Period::OneMonth => "1mo",
            Period::ThreeMonths => "3mo",
            Period::SixMonths => "6mo",
            Period::OneYear => "1y",
            Period::TwoYears => "2y",
            Period::FiveYears => "5y",
            Period::TenYears => "10y",
            Period::YearToDate => "ytd",
            Period::Max => "max",
        }
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Period {
    type Err = StockError;

    fn from_str(s: &str) -> Result<Self> {
        Period::ALL
            .into_iter()
            .find(|p| p.as_str() == s)
            .ok_or_else(|| StockError::InvalidParameter(format!("unsupported period '{s}'")))
    }
}

/// Bar interval accepted by the market-data provider
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Interval {
    #[serde(rename = "1m")]
    OneMinute,
    #[serde(rename = "2m")]
    TwoMinutes,
    #[serde(rename = "5m")]
    FiveMinutes,
    #[serde(rename = "15m")]
    FifteenMinutes,
    #[serde(rename = "30m")]
    ThirtyMinutes,
    #[serde(rename = "60m")]
    SixtyMinutes,
    #[serde(rename = "90m")]
    NinetyMinutes,
    #[serde(rename = "1h")]
    OneHour,
    #[serde(rename = "1d")]
    OneDay,
    #[serde(rename = "5d")]
    FiveDays,
    #[serde(rename = "1wk")]
    OneWeek,
    #[serde(rename = "1mo")]
    OneMonth,
    #[serde(rename = "3mo")]
    ThreeMonths,
}

impl Interval {
    /// Every accepted interval, in provider order
    pub const ALL: [Interval; 13] = [
        Interval::OneMinute,
        Interval::TwoMinutes,
        Interval::FiveMinutes,
        Interval::FifteenMinutes,
        Interval::ThirtyMinutes,
        Interval::SixtyMinutes,
        Interval::NinetyMinutes,
        Interval::OneHour,
        Interval::OneDay,
        Interval::FiveDays,
        Interval::OneWeek,
        Interval::OneMonth,
        Interval::ThreeMonths,
    ];

    /// Provider spelling of the interval
    pub fn as_str(self) -> &'static str {
        match self {
            Interval::OneMinute => "1m",
            Interval::TwoMinutes => "2m",
            Interval::FiveMinutes => "5m",
            Interval::FifteenMinutes => "15m",
            Interval::ThirtyMinutes => "30m",
            Interval::SixtyMinutes => "60m",
            Interval::NinetyMinutes => "90m",
            Interval::OneHour => "1h",
            Interval::OneDay => "1d",
            Interval::FiveDays => "5d",
            Interval::OneWeek => "1wk",
            Interval::OneMonth => "1mo",
            Interval::ThreeMonths => "3mo",
        }
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Interval {
    type Err = StockError;

    fn from_str(s: &str) -> Result<Self> {
        Interval::ALL
            .into_iter()
            .find(|i| i.as_str() == s)
            .ok_or_else(|| StockError::InvalidParameter(format!("unsupported interval '{s}'")))
    }
}

/// One OHLCV bar plus the corporate actions that fell inside it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceBar {
    pub timestamp: DateTime<Utc>,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: u64,
    pub adjclose: f64,
    /// Cash dividend per share paid in this bar, 0 when none
    pub dividends: f64,
    /// Split ratio effective in this bar (4.0 for a 4:1 split), 0 when none
    pub stock_splits: f64,
}

/// Column-major price table keyed by RFC 3339 timestamp
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PriceHistory {
    #[serde(rename = "Open")]
    pub open: BTreeMap<String, f64>,
    #[serde(rename = "High")]
    pub high: BTreeMap<String, f64>,
    #[serde(rename = "Low")]
    pub low: BTreeMap<String, f64>,
    #[serde(rename = "Close")]
    pub close: BTreeMap<String, f64>,
    #[serde(rename = "Adj Close")]
    pub adj_close: BTreeMap<String, f64>,
    #[serde(rename = "Volume")]
    pub volume: BTreeMap<String, u64>,
    #[serde(rename = "Dividends")]
    pub dividends: BTreeMap<String, f64>,
    #[serde(rename = "Stock Splits")]
    pub stock_splits: BTreeMap<String, f64>,
}

impl PriceHistory {
    /// Number of rows in the table
    pub fn len(&self) -> usize {
        self.close.len()
    }

    /// Whether the table has no rows
    pub fn is_empty(&self) -> bool {
        self.close.is_empty()
    }
}

impl FromIterator<PriceBar> for PriceHistory {
    fn from_iter<I: IntoIterator<Item = PriceBar>>(bars: I) -> Self {
        let mut history = PriceHistory::default();
        for bar in bars {
            let key = bar.timestamp.to_rfc3339();
            history.open.insert(key.clone(), bar.open);
            history.high.insert(key.clone(), bar.high);
            history.low.insert(key.clone(), bar.low);
            history.close.insert(key.clone(), bar.close);
            history.adj_close.insert(key.clone(), bar.adjclose);
            history.volume.insert(key.clone(), bar.volume);
            history.dividends.insert(key.clone(), bar.dividends);
            history.stock_splits.insert(key, bar.stock_splits);
        }
        history
    }
}

/// Source of price bars and descriptive company info
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MarketDataProvider: Send + Sync {
    /// Historical bars for `symbol` over `period`, sampled at `interval`
    async fn price_bars(
        &self,
        symbol: &str,
        period: Period,
        interval: Interval,
    ) -> Result<Vec<PriceBar>>;

    /// Provider-defined descriptive info for `symbol`
    async fn company_info(&self, symbol: &str) -> Result<Map<String, Value>>;
}

fn normalize_ticker(ticker: &str) -> Result<String> {
    let ticker = ticker.trim().to_uppercase();
    if ticker.is_empty() {
        return Err(StockError::InvalidParameter("ticker must not be empty".to_string()));
    }
    Ok(ticker)
}

/// Fetch price history as a column-major table
pub async fn price_history(
    provider: &dyn MarketDataProvider,
    ticker: &str,
    period: Period,
    interval: Interval,
) -> Result<PriceHistory> {
    let ticker = normalize_ticker(ticker)?;
    let bars = provider.price_bars(&ticker, period, interval).await?;
    tracing::debug!(%ticker, %period, %interval, bars = bars.len(), "Fetched price history");
    Ok(bars.into_iter().collect())
}

/// Fetch only the closing prices, keyed by timestamp
///
/// Unlike [`price_history`], an empty history is an error here.
pub async fn closing_prices(
    provider: &dyn MarketDataProvider,
    ticker: &str,
    period: Period,
    interval: Interval,
) -> Result<BTreeMap<String, f64>> {
    let history = price_history(provider, ticker, period, interval).await?;
    if history.is_empty() {
        return Err(StockError::no_data(
            "historical data",
            normalize_ticker(ticker)?,
        ));
    }
    Ok(history.close)
}

/// Fetch the provider's descriptive info for a ticker, unmodified
pub async fn company_info(
    provider: &dyn MarketDataProvider,
    ticker: &str,
) -> Result<Map<String, Value>> {
    let ticker = normalize_ticker(ticker)?;
    provider.company_info(&ticker).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use mockall::predicate::eq;
    use serde_json::json;

    fn bar(day: u32, close: f64) -> PriceBar {
        PriceBar {
            timestamp: Utc.with_ymd_and_hms(2024, 3, day, 14, 30, 0).unwrap(),
            open: close - 1.0,
            high: close + 2.0,
            low: close - 2.0,
            close,
            volume: 1_000 * u64::from(day),
            adjclose: close,
            dividends: 0.0,
            stock_splits: 0.0,
        }
    }

    #[test]
    fn test_period_parsing() {
        for period in Period::ALL {
            assert_eq!(period.as_str().parse::<Period>().unwrap(), period);
        }
        assert!("4mo".parse::<Period>().is_err());
        assert!("".parse::<Period>().is_err());
    }

    #[test]
    fn test_interval_parsing() {
        for interval in Interval::ALL {
            assert_eq!(interval.as_str().parse::<Interval>().unwrap(), interval);
        }
        let err = "1y".parse::<Interval>().unwrap_err();
        assert_eq!(err.kind(), "invalid_parameter");
    }

    #[test]
    fn test_period_serde_uses_provider_spelling() {
        assert_eq!(serde_json::to_value(Period::YearToDate).unwrap(), json!("ytd"));
        let interval: Interval = serde_json::from_value(json!("1wk")).unwrap();
        assert_eq!(interval, Interval::OneWeek);
    }

    #[test]
    fn test_history_is_column_major() {
        let history: PriceHistory = vec![bar(1, 10.0), bar(4, 12.5)].into_iter().collect();
        let value = serde_json::to_value(&history).unwrap();

        let columns: Vec<_> = value.as_object().unwrap().keys().cloned().collect();
        for column in [
            "Open",
            "High",
            "Low",
            "Close",
            "Adj Close",
            "Volume",
            "Dividends",
            "Stock Splits",
        ] {
            assert!(columns.contains(&column.to_string()), "missing {column}");
        }
        assert_eq!(columns.len(), 8);
        assert_eq!(value["Close"]["2024-03-01T14:30:00+00:00"], json!(10.0));
        assert_eq!(value["Volume"]["2024-03-04T14:30:00+00:00"], json!(4000));
        assert_eq!(history.len(), 2);
    }

    #[test]
    fn test_history_carries_corporate_actions() {
        let mut paid = bar(1, 100.0);
        paid.adjclose = 99.5;
        paid.dividends = 0.25;
        let mut split = bar(4, 25.0);
        split.stock_splits = 4.0;

        let history: PriceHistory = [paid, split].into_iter().collect();
        let value = serde_json::to_value(&history).unwrap();
        assert_eq!(value["Adj Close"]["2024-03-01T14:30:00+00:00"], json!(99.5));
        assert_eq!(value["Dividends"]["2024-03-01T14:30:00+00:00"], json!(0.25));
        assert_eq!(value["Dividends"]["2024-03-04T14:30:00+00:00"], json!(0.0));
        assert_eq!(value["Stock Splits"]["2024-03-04T14:30:00+00:00"], json!(4.0));
        assert_eq!(value["Stock Splits"]["2024-03-01T14:30:00+00:00"], json!(0.0));
    }

    #[tokio::test]
    async fn test_price_history_uppercases_ticker() {
        let mut provider = MockMarketDataProvider::new();
        provider
            .expect_price_bars()
            .with(eq("MSFT"), eq(Period::OneMonth), eq(Interval::OneDay))
            .times(1)
            .returning(|_, _, _| Ok(vec![bar(1, 400.0)]));

        let history = price_history(&provider, "msft", Period::OneMonth, Interval::OneDay)
            .await
            .unwrap();
        assert_eq!(history.close.values().copied().collect::<Vec<_>>(), vec![400.0]);
    }

    #[tokio::test]
    async fn test_closing_prices_empty_history_is_no_data() {
        let mut provider = MockMarketDataProvider::new();
        provider
            .expect_price_bars()
            .returning(|_, _, _| Ok(Vec::new()));

        let err = closing_prices(&provider, "aapl", Period::OneYear, Interval::OneMonth)
            .await
            .unwrap_err();
        assert_eq!(err.kind(), "no_data");
        assert!(err.to_string().contains("No historical data found for AAPL"));
    }

    #[tokio::test]
    async fn test_closing_prices_returns_close_column() {
        let mut provider = MockMarketDataProvider::new();
        provider
            .expect_price_bars()
            .returning(|_, _, _| Ok(vec![bar(1, 10.0), bar(2, 11.0)]));

        let closes = closing_prices(&provider, "aapl", Period::OneYear, Interval::OneMonth)
            .await
            .unwrap();
        assert_eq!(closes.len(), 2);
        assert_eq!(closes["2024-03-02T14:30:00+00:00"], 11.0);
    }

    #[tokio::test]
    async fn test_empty_ticker_is_rejected_before_fetch() {
        let mut provider = MockMarketDataProvider::new();
        provider.expect_company_info().times(0);

        let err = company_info(&provider, "   ").await.unwrap_err();
        assert_eq!(err.kind(), "invalid_parameter");
    }

    #[tokio::test]
    async fn test_company_info_is_passed_through() {
        let mut provider = MockMarketDataProvider::new();
        provider
            .expect_company_info()
            .with(eq("AAPL"))
            .returning(|_| {
                let info = json!({"longName": "Apple Inc.", "currency": "USD"});
                Ok(info.as_object().cloned().unwrap_or_default())
            });

        let info = company_info(&provider, "aapl").await.unwrap();
        assert_eq!(info["longName"], "Apple Inc.");
        assert_eq!(info.len(), 2);
    }
}
