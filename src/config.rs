use serde::Deserialize;
use std::path::Path;

/// Environment variable holding the OpenWeather API key.
pub const API_KEY_ENV: &str = "OPENWEATHER_API_KEY";

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Page heading
    #[serde(default = "default_title")]
    pub title: String,
    #[serde(default = "default_listen_addr")]
    pub listen_addr: String,
    /// Per-request timeout for every upstream call, in seconds
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
    #[serde(default)]
    pub weather: WeatherConfig,
    #[serde(default)]
    pub news: NewsConfig,
    #[serde(default)]
    pub crypto: CryptoConfig,
    #[serde(default)]
    pub stocks: StocksConfig,
}

fn default_title() -> String {
    "Public API Dashboard".to_string()
}

fn default_listen_addr() -> String {
    "0.0.0.0:3000".to_string()
}

fn default_request_timeout() -> u64 {
    5
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum WeatherProvider {
    /// api.openweathermap.org, needs an API key
    OpenWeather,
    /// api.open-meteo.com, keyless
    OpenMeteo,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct WeatherConfig {
    pub provider: WeatherProvider,
    pub city: String,
    pub country: String,
    pub latitude: f64,
    pub longitude: f64,
    pub api_key: Option<String>,
    pub openweather_url: String,
    pub open_meteo_url: String,
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            provider: WeatherProvider::OpenMeteo,
            city: "Ottawa".to_string(),
            country: "CA".to_string(),
            latitude: 45.4215,
            longitude: -75.6972,
            api_key: None,
            openweather_url: "https://api.openweathermap.org".to_string(),
            open_meteo_url: "https://api.open-meteo.com".to_string(),
        }
    }
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum NewsSource {
    /// Front page of the Hacker News search API
    HackerNews,
    /// The configured syndication feeds, in order
    Feeds,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct NewsConfig {
    pub source: NewsSource,
    /// Maximum number of headlines shown
    pub limit: usize,
    pub hn_search_url: String,
    pub feeds: Vec<FeedConfig>,
}

impl Default for NewsConfig {
    fn default() -> Self {
        Self {
            source: NewsSource::Feeds,
            limit: 5,
            hn_search_url: "https://hn.algolia.com".to_string(),
            feeds: vec![
                FeedConfig {
                    name: "BBC World".to_string(),
                    url: "https://feeds.bbci.co.uk/news/world/rss.xml".to_string(),
                },
                FeedConfig {
                    name: "CBC Top Stories".to_string(),
                    url: "https://www.cbc.ca/webfeed/rss/rss-topstories".to_string(),
                },
                FeedConfig {
                    name: "Hacker News".to_string(),
                    url: "https://news.ycombinator.com/rss".to_string(),
                },
            ],
        }
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct FeedConfig {
    pub name: String,
    pub url: String,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct CryptoConfig {
    /// Size of the market-cap ranking
    pub top_n: usize,
    pub vs_currency: String,
    pub coingecko_url: String,
}

impl Default for CryptoConfig {
    fn default() -> Self {
        Self {
            top_n: 5,
            vs_currency: "usd".to_string(),
            coingecko_url: "https://api.coingecko.com".to_string(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct StocksConfig {
    pub symbols: Vec<String>,
    pub quote_url: String,
}

impl Default for StocksConfig {
    fn default() -> Self {
        Self {
            symbols: ["AAPL", "MSFT", "GOOGL", "AMZN", "TSLA"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            quote_url: "https://query1.finance.yahoo.com".to_string(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            title: default_title(),
            listen_addr: default_listen_addr(),
            request_timeout_secs: default_request_timeout(),
            weather: WeatherConfig::default(),
            news: NewsConfig::default(),
            crypto: CryptoConfig::default(),
            stocks: StocksConfig::default(),
        }
    }
}

impl Config {
    pub fn load<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Parse config from a TOML string (useful for testing)
    pub fn from_str(content: &str) -> anyhow::Result<Self> {
        let config: Config = toml::from_str(content)?;
        Ok(config)
    }

    /// Fill the weather API key from the environment unless the file set one.
    pub fn with_env_overrides(self) -> Self {
        self.with_api_key(std::env::var(API_KEY_ENV).ok())
    }

    fn with_api_key(mut self, key: Option<String>) -> Self {
        let configured = self
            .weather
            .api_key
            .as_deref()
            .is_some_and(|k| !k.trim().is_empty());
        if !configured {
            self.weather.api_key = key.filter(|k| !k.trim().is_empty());
        }
        self
    }
}
