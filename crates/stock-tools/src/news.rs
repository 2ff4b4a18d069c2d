//! Company news aggregation
//!
//! Fetches a trailing window of company news from a [`NewsProvider`], flattens
//! each article into a [`NewsItem`], drops repeated content and caps the
//! result at the requested count.

use async_trait::async_trait;
use chrono::{Days, Local, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::error::{Result, StockError};

/// Default number of news items returned per call
pub const DEFAULT_TARGET_COUNT: usize = 100;

/// Default length of the news window, in days
pub const DEFAULT_LOOKBACK_DAYS: u64 = 7;

/// Normalized news record handed back to callers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewsItem {
    pub source: String,
    pub content: String,
}

/// News article as returned by the provider
///
/// Only the fields that end up in a [`NewsItem`] are decoded; anything else
/// the provider sends (ids, timestamps, image links) is ignored whatever its
/// type. Every field is optional since providers routinely omit some.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RawNewsArticle {
    pub headline: Option<String>,
    pub summary: Option<String>,
    pub source: Option<String>,
}

impl RawNewsArticle {
    /// Flatten into a [`NewsItem`], using `default_source` when the article has none
    pub fn normalize(self, default_source: &str) -> NewsItem {
        let content = format!(
            "{}. {}",
            self.headline.unwrap_or_default(),
            self.summary.unwrap_or_default()
        );
        NewsItem {
            source: self.source.unwrap_or_else(|| default_source.to_string()),
            content,
        }
    }
}

/// One company-news request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewsQuery {
    /// Uppercased ticker
    pub symbol: String,
    pub from: NaiveDate,
    pub to: NaiveDate,
    pub target_count: usize,
}

impl NewsQuery {
    /// Build a query covering `lookback_days` days up to and including `today`
    pub fn trailing(
        symbol: &str,
        today: NaiveDate,
        lookback_days: u64,
        target_count: usize,
    ) -> Result<Self> {
        let symbol = symbol.trim().to_uppercase();
        if symbol.is_empty() {
            return Err(StockError::InvalidParameter(
                "stock symbol must not be empty".to_string(),
            ));
        }
        if target_count == 0 {
            return Err(StockError::InvalidParameter(
                "target_count must be greater than 0".to_string(),
            ));
        }
        let from = today.checked_sub_days(Days::new(lookback_days)).ok_or_else(|| {
            StockError::InvalidParameter(format!("lookback of {lookback_days} days is out of range"))
        })?;

        Ok(Self {
            symbol,
            from,
            to: today,
            target_count,
        })
    }

    /// Window start as `YYYY-MM-DD`
    pub fn from_param(&self) -> String {
        self.from.format("%Y-%m-%d").to_string()
    }

    /// Window end as `YYYY-MM-DD`
    pub fn to_param(&self) -> String {
        self.to.format("%Y-%m-%d").to_string()
    }
}

/// Source of raw company news
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait NewsProvider: Send + Sync {
    /// Provider name, used as the source of articles that carry none
    fn name(&self) -> &str;

    /// Fetch raw articles for the query window, authenticating with `credential`
    async fn company_news(&self, query: &NewsQuery, credential: &str)
    -> Result<Vec<RawNewsArticle>>;
}

/// Keep the first item for each distinct content, then cap at `target_count`
pub fn dedup_news(items: Vec<NewsItem>, target_count: usize) -> Vec<NewsItem> {
    let mut seen = HashSet::with_capacity(items.len());
    let mut unique: Vec<NewsItem> = items
        .into_iter()
        .filter(|item| seen.insert(item.content.clone()))
        .collect();
    unique.truncate(target_count);
    unique
}

/// Fetches, normalizes and deduplicates company news
pub struct NewsAggregator<'a> {
    provider: &'a dyn NewsProvider,
    lookback_days: u64,
}

impl<'a> NewsAggregator<'a> {
    /// Create an aggregator over `provider` with the default 7-day window
    pub fn new(provider: &'a dyn NewsProvider) -> Self {
        Self {
            provider,
            lookback_days: DEFAULT_LOOKBACK_DAYS,
        }
    }

    /// Override the window length
    pub fn with_lookback_days(mut self, days: u64) -> Self {
        self.lookback_days = days;
        self
    }

    /// Fetch news for `symbol` over the window ending today
    pub async fn fetch(
        &self,
        symbol: &str,
        credential: Option<&str>,
        target_count: usize,
    ) -> Result<Vec<NewsItem>> {
        self.fetch_as_of(symbol, credential, target_count, Local::now().date_naive())
            .await
    }

    /// Fetch news for `symbol` over the window ending on `today`
    pub async fn fetch_as_of(
        &self,
        symbol: &str,
        credential: Option<&str>,
        target_count: usize,
        today: NaiveDate,
    ) -> Result<Vec<NewsItem>> {
        let credential = credential
            .map(str::trim)
            .filter(|key| !key.is_empty())
            .ok_or(StockError::MissingCredential {
                provider: "Finnhub",
                dataset: "stock news",
            })?;

        let query = NewsQuery::trailing(symbol, today, self.lookback_days, target_count)?;
        tracing::debug!(
            symbol = %query.symbol,
            from = %query.from,
            to = %query.to,
            "Fetching company news from {}",
            self.provider.name()
        );

        let articles = self.provider.company_news(&query, credential).await?;
        let fetched = articles.len();

        let items: Vec<NewsItem> = articles
            .into_iter()
            .take(query.target_count)
            .map(|article| article.normalize(self.provider.name()))
            .collect();

        if items.is_empty() {
            return Err(StockError::no_data("news", query.symbol));
        }

        let unique = dedup_news(items, query.target_count);
        tracing::info!(
            symbol = %query.symbol,
            fetched,
            returned = unique.len(),
            "Aggregated company news"
        );
        Ok(unique)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn article(headline: &str, summary: &str) -> RawNewsArticle {
        RawNewsArticle {
            headline: Some(headline.to_string()),
            summary: Some(summary.to_string()),
            ..Default::default()
        }
    }

    fn item(content: &str) -> NewsItem {
        NewsItem {
            source: "Finnhub".to_string(),
            content: content.to_string(),
        }
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 10).unwrap()
    }

    fn provider_returning(articles: Vec<RawNewsArticle>) -> MockNewsProvider {
        let mut provider = MockNewsProvider::new();
        provider.expect_name().return_const("Finnhub".to_string());
        provider
            .expect_company_news()
            .times(1)
            .returning(move |_, _| Ok(articles.clone()));
        provider
    }

    #[test]
    fn test_normalize_missing_fields_become_empty() {
        let item = RawNewsArticle::default().normalize("Finnhub");
        assert_eq!(item.content, ". ");
        assert_eq!(item.source, "Finnhub");

        let item = RawNewsArticle {
            headline: Some("Only headline".to_string()),
            source: Some("Reuters".to_string()),
            ..Default::default()
        }
        .normalize("Finnhub");
        assert_eq!(item.content, "Only headline. ");
        assert_eq!(item.source, "Reuters");
    }

    #[test]
    fn test_raw_article_tolerates_nulls_and_missing_fields() {
        let raw: RawNewsArticle = serde_json::from_str(
            r#"{"headline": "Apple rallies", "summary": null, "datetime": 1710000000}"#,
        )
        .unwrap();
        assert_eq!(raw.summary, None);
        assert_eq!(raw.normalize("Finnhub").content, "Apple rallies. ");
    }

    #[test]
    fn test_raw_article_ignores_unused_fields_of_any_type() {
        let raw: Vec<RawNewsArticle> = serde_json::from_str(
            r#"[{
                "id": "abc-123",
                "datetime": 1.71e9,
                "related": ["AAPL", "MSFT"],
                "image": null,
                "category": 7,
                "headline": "Apple rallies",
                "summary": "Shares rose.",
                "source": "Reuters"
            }]"#,
        )
        .unwrap();
        let item = raw.into_iter().next().unwrap().normalize("Finnhub");
        assert_eq!(item.content, "Apple rallies. Shares rose.");
        assert_eq!(item.source, "Reuters");
    }

    #[test]
    fn test_dedup_preserves_first_seen_order() {
        let items = vec![item("A"), item("B"), item("A"), item("C")];
        let unique = dedup_news(items, 10);
        let contents: Vec<_> = unique.iter().map(|i| i.content.as_str()).collect();
        assert_eq!(contents, vec!["A", "B", "C"]);
    }

    #[test]
    fn test_dedup_keeps_first_source_for_duplicate_content() {
        let mut second = item("A");
        second.source = "Reuters".to_string();
        let unique = dedup_news(vec![item("A"), second], 10);
        assert_eq!(unique, vec![item("A")]);
    }

    #[test]
    fn test_query_window_is_seven_days() {
        let query = NewsQuery::trailing("aapl", today(), 7, 100).unwrap();
        assert_eq!(query.symbol, "AAPL");
        assert_eq!(query.from_param(), "2024-03-03");
        assert_eq!(query.to_param(), "2024-03-10");
    }

    #[test]
    fn test_query_rejects_empty_symbol_and_zero_count() {
        assert!(NewsQuery::trailing("  ", today(), 7, 10).is_err());
        assert!(NewsQuery::trailing("AAPL", today(), 7, 0).is_err());
    }

    #[tokio::test]
    async fn test_scenario_duplicate_articles_collapse() {
        let mut provider = MockNewsProvider::new();
        provider.expect_name().return_const("Finnhub".to_string());
        provider
            .expect_company_news()
            .withf(|query, credential| {
                query.symbol == "AAPL"
                    && query.from_param() == "2024-03-03"
                    && query.to_param() == "2024-03-10"
                    && credential == "secret"
            })
            .times(1)
            .returning(|_, _| Ok(vec![article("X", "y"), article("X", "y")]));

        let news = NewsAggregator::new(&provider)
            .fetch_as_of("aapl", Some("secret"), 10, today())
            .await
            .unwrap();

        assert_eq!(
            news,
            vec![NewsItem {
                source: "Finnhub".to_string(),
                content: "X. y".to_string(),
            }]
        );
    }

    #[tokio::test]
    async fn test_truncates_to_target_count() {
        let provider = provider_returning(
            (1..=5)
                .map(|i| article(&format!("H{i}"), "s"))
                .collect(),
        );

        let news = NewsAggregator::new(&provider)
            .fetch_as_of("TSLA", Some("key"), 2, today())
            .await
            .unwrap();

        let contents: Vec<_> = news.iter().map(|i| i.content.as_str()).collect();
        assert_eq!(contents, vec!["H1. s", "H2. s"]);
    }

    #[tokio::test]
    async fn test_missing_credential_makes_no_call() {
        let mut provider = MockNewsProvider::new();
        provider.expect_name().return_const("Finnhub".to_string());
        provider.expect_company_news().times(0);

        let aggregator = NewsAggregator::new(&provider);
        for credential in [None, Some(""), Some("   ")] {
            let err = aggregator
                .fetch_as_of("AAPL", credential, 10, today())
                .await
                .unwrap_err();
            assert_eq!(err.kind(), "missing_credential");
        }
    }

    #[tokio::test]
    async fn test_empty_upstream_is_no_data() {
        let provider = provider_returning(Vec::new());

        let err = NewsAggregator::new(&provider)
            .fetch_as_of("AAPL", Some("key"), 10, today())
            .await
            .unwrap_err();

        assert_eq!(err.kind(), "no_data");
        assert!(err.to_string().contains("No news found"));
    }

    #[tokio::test]
    async fn test_fetch_error_is_propagated() {
        let mut provider = MockNewsProvider::new();
        provider.expect_name().return_const("Finnhub".to_string());
        provider
            .expect_company_news()
            .returning(|_, _| Err(StockError::fetch("Finnhub", "news", "503 Service Unavailable")));

        let err = NewsAggregator::new(&provider)
            .fetch_as_of("AAPL", Some("key"), 10, today())
            .await
            .unwrap_err();

        assert_eq!(err.kind(), "fetch_error");
        assert!(err.to_string().contains("503 Service Unavailable"));
    }

    #[tokio::test]
    async fn test_custom_lookback_window() {
        let mut provider = MockNewsProvider::new();
        provider.expect_name().return_const("Finnhub".to_string());
        provider
            .expect_company_news()
            .withf(|query, _| query.from_param() == "2024-03-09")
            .returning(|_, _| Ok(vec![article("a", "b")]));

        let news = NewsAggregator::new(&provider)
            .with_lookback_days(1)
            .fetch_as_of("AAPL", Some("key"), 10, today())
            .await
            .unwrap();
        assert_eq!(news.len(), 1);
    }
}
