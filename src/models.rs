use serde::Serialize;

/// Current conditions for the configured city.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeatherRecord {
    pub city: String,
    /// Degrees Celsius, rounded for display
    pub temperature: i64,
    pub feels_like: Option<i64>,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewsItem {
    pub title: String,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CryptoRecord {
    pub name: String,
    pub symbol: String,
    /// Price in USD
    pub price: f64,
    /// Signed percentage change over the last 24 hours
    pub change_24h: f64,
}

impl CryptoRecord {
    pub fn is_up(&self) -> bool {
        self.change_24h >= 0.0
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StockRecord {
    pub name: String,
    pub symbol: String,
    pub price: f64,
    pub change_24h: f64,
}

impl StockRecord {
    pub fn new(name: &str, symbol: &str, price: f64, change_24h: f64) -> Self {
        Self {
            name: name.to_string(),
            symbol: symbol.to_string(),
            price,
            change_24h,
        }
    }

    pub fn is_up(&self) -> bool {
        self.change_24h >= 0.0
    }

    /// Static quotes shown when the live quote source is unavailable.
    pub fn fallback() -> Vec<StockRecord> {
        vec![
            StockRecord::new("Apple Inc.", "AAPL", 189.84, 0.62),
            StockRecord::new("Microsoft Corporation", "MSFT", 415.26, -0.35),
            StockRecord::new("Alphabet Inc.", "GOOGL", 172.63, 1.14),
            StockRecord::new("Amazon.com, Inc.", "AMZN", 183.54, -0.48),
            StockRecord::new("Tesla, Inc.", "TSLA", 177.29, 2.07),
        ]
    }
}

/// Everything the dashboard template needs for one page render.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct DashboardContext {
    pub weather: Option<WeatherRecord>,
    pub news: Vec<NewsItem>,
    pub crypto: Option<Vec<CryptoRecord>>,
    pub stocks: Vec<StockRecord>,
}
