//! Configuration for stock data tools

use crate::error::{Result, StockError};
use crate::market::{Interval, Period};
use crate::news::{DEFAULT_LOOKBACK_DAYS, DEFAULT_TARGET_COUNT};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Environment variable holding the default Finnhub API key
pub const FINNHUB_API_KEY_ENV: &str = "FINNHUB_API_KEY";

/// Configuration for stock data tools
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StockConfig {
    /// Finnhub REST base URL
    pub finnhub_base_url: String,

    /// Request timeout duration
    pub request_timeout: Duration,

    /// Length of the news window ending today
    pub news_lookback_days: u64,

    /// News items returned when the caller does not say
    pub default_news_count: usize,

    /// Price history period used when the caller does not say
    pub default_period: Period,

    /// Price history interval used when the caller does not say
    pub default_interval: Interval,

    /// Finnhub API key pinned on the config (optional)
    ///
    /// When unset, the key is read from the environment on every call.
    pub finnhub_api_key: Option<String>,

    /// Environment variable consulted for the Finnhub key
    pub finnhub_api_key_env: String,
}

impl Default for StockConfig {
    fn default() -> Self {
        Self {
            finnhub_base_url: "https://finnhub.io/api/v1".to_string(),
            request_timeout: Duration::from_secs(10),
            news_lookback_days: DEFAULT_LOOKBACK_DAYS,
            default_news_count: DEFAULT_TARGET_COUNT,
            default_period: Period::OneYear,
            default_interval: Interval::OneMonth,
            finnhub_api_key: None,
            finnhub_api_key_env: FINNHUB_API_KEY_ENV.to_string(),
        }
    }
}

impl StockConfig {
    /// Create a new configuration builder
    pub fn builder() -> StockConfigBuilder {
        StockConfigBuilder::default()
    }

    /// Resolve the Finnhub key for one call
    ///
    /// An explicit non-blank key wins, then the key pinned on the config,
    /// then the environment variable as it is right now.
    pub fn resolve_finnhub_key(&self, explicit: Option<&str>) -> Option<String> {
        explicit
            .map(str::trim)
            .filter(|key| !key.is_empty())
            .map(str::to_string)
            .or_else(|| {
                self.finnhub_api_key
                    .as_deref()
                    .map(str::trim)
                    .filter(|key| !key.is_empty())
                    .map(str::to_string)
            })
            .or_else(|| toolkit_utils::non_empty_var(&self.finnhub_api_key_env))
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.request_timeout.is_zero() {
            return Err(StockError::Config(
                "request_timeout must be greater than 0".to_string(),
            ));
        }

        if self.news_lookback_days == 0 {
            return Err(StockError::Config(
                "news_lookback_days must be greater than 0".to_string(),
            ));
        }

        if self.default_news_count == 0 {
            return Err(StockError::Config(
                "default_news_count must be greater than 0".to_string(),
            ));
        }

        if !self.finnhub_base_url.starts_with("http://")
            && !self.finnhub_base_url.starts_with("https://")
        {
            return Err(StockError::Config(
                "finnhub_base_url must be an http(s) URL".to_string(),
            ));
        }

        Ok(())
    }
}

/// Builder for StockConfig
#[derive(Debug, Default)]
pub struct StockConfigBuilder {
    finnhub_base_url: Option<String>,
    request_timeout: Option<Duration>,
    news_lookback_days: Option<u64>,
    default_news_count: Option<usize>,
    default_period: Option<Period>,
    default_interval: Option<Interval>,
    finnhub_api_key: Option<String>,
    finnhub_api_key_env: Option<String>,
}

impl StockConfigBuilder {
    /// Set the Finnhub base URL
    pub fn finnhub_base_url(mut self, url: impl Into<String>) -> Self {
        self.finnhub_base_url = Some(url.into());
        self
    }

    /// Set request timeout
    pub fn request_timeout(mut self, duration: Duration) -> Self {
        self.request_timeout = Some(duration);
        self
    }

    /// Set the news window length
    pub fn news_lookback_days(mut self, days: u64) -> Self {
        self.news_lookback_days = Some(days);
        self
    }

    /// Set the default news count
    pub fn default_news_count(mut self, count: usize) -> Self {
        self.default_news_count = Some(count);
        self
    }

    /// Set the default price history period
    pub fn default_period(mut self, period: Period) -> Self {
        self.default_period = Some(period);
        self
    }

    /// Set the default price history interval
    pub fn default_interval(mut self, interval: Interval) -> Self {
        self.default_interval = Some(interval);
        self
    }

    /// Pin a Finnhub API key
    pub fn finnhub_api_key(mut self, key: impl Into<String>) -> Self {
        self.finnhub_api_key = Some(key.into());
        self
    }

    /// Read the Finnhub key from a different environment variable
    pub fn finnhub_api_key_env(mut self, name: impl Into<String>) -> Self {
        self.finnhub_api_key_env = Some(name.into());
        self
    }

    /// Build the configuration
    pub fn build(self) -> Result<StockConfig> {
        let defaults = StockConfig::default();

        let config = StockConfig {
            finnhub_base_url: self.finnhub_base_url.unwrap_or(defaults.finnhub_base_url),
            request_timeout: self.request_timeout.unwrap_or(defaults.request_timeout),
            news_lookback_days: self.news_lookback_days.unwrap_or(defaults.news_lookback_days),
            default_news_count: self.default_news_count.unwrap_or(defaults.default_news_count),
            default_period: self.default_period.unwrap_or(defaults.default_period),
            default_interval: self.default_interval.unwrap_or(defaults.default_interval),
            finnhub_api_key: self.finnhub_api_key,
            finnhub_api_key_env: self
                .finnhub_api_key_env
                .unwrap_or(defaults.finnhub_api_key_env),
        };

        config.validate()?;
        Ok(config)
    }
}
