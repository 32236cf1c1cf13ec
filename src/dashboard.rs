use reqwest::Client;
use tracing::info;

use crate::config::Config;
use crate::fetcher::{CryptoFetcher, NewsFetcher, StocksFetcher, WeatherFetcher};
use crate::models::{DashboardContext, StockRecord};

/// Owns one fetcher per upstream and assembles the page context.
pub struct Dashboard {
    weather: WeatherFetcher,
    news: NewsFetcher,
    crypto: CryptoFetcher,
    stocks: StocksFetcher,
}

impl Dashboard {
    pub fn new(client: Client, config: &Config) -> Self {
        Self::with_stock_fallback(client, config, StockRecord::fallback())
    }

    pub fn with_stock_fallback(
        client: Client,
        config: &Config,
        stock_fallback: Vec<StockRecord>,
    ) -> Self {
        Self {
            weather: WeatherFetcher::new(client.clone(), config.weather.clone()),
            news: NewsFetcher::new(client.clone(), config.news.clone()),
            crypto: CryptoFetcher::new(client.clone(), config.crypto.clone()),
            stocks: StocksFetcher::new(client, config.stocks.clone(), stock_fallback),
        }
    }

    /// Fetch every section, one upstream at a time.
    pub async fn assemble(&self) -> DashboardContext {
        let weather = self.weather.fetch().await;
        let news = self.news.fetch().await;
        let crypto = self.crypto.fetch().await;
        let stocks = self.stocks.fetch().await;

        info!(
            "Dashboard assembled: weather={}, news={}, crypto={}, stocks={}",
            weather.is_some(),
            news.len(),
            crypto.as_ref().map_or(0, Vec::len),
            stocks.len()
        );

        DashboardContext {
            weather,
            news,
            crypto,
            stocks,
        }
    }
}
