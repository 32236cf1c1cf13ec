use reqwest::Client;
use serde::Deserialize;
use tracing::{info, warn};

use crate::config::CryptoConfig;
use crate::error::Result;
use crate::models::CryptoRecord;

use super::{first_non_empty, get_json};

/// One row of the CoinGecko `/coins/markets` ranking.
#[derive(Debug, Deserialize)]
struct MarketEntry {
    name: Option<String>,
    symbol: Option<String>,
    current_price: Option<f64>,
    price_change_percentage_24h: Option<f64>,
}

impl From<MarketEntry> for CryptoRecord {
    fn from(entry: MarketEntry) -> Self {
        let symbol = entry.symbol.unwrap_or_default().trim().to_uppercase();
        let name = first_non_empty([entry.name.as_deref(), Some(symbol.as_str())])
            .unwrap_or_default();

        CryptoRecord {
            name,
            symbol,
            price: entry.current_price.unwrap_or(0.0),
            change_24h: entry.price_change_percentage_24h.unwrap_or(0.0),
        }
    }
}

pub struct CryptoFetcher {
    client: Client,
    config: CryptoConfig,
}

impl CryptoFetcher {
    pub fn new(client: Client, config: CryptoConfig) -> Self {
        Self { client, config }
    }

    /// Top coins by market capitalisation, largest first.
    pub async fn fetch(&self) -> Option<Vec<CryptoRecord>> {
        match self.try_fetch().await {
            Ok(records) => {
                info!("Fetched {} crypto prices", records.len());
                Some(records)
            }
            Err(e) => {
                warn!("Failed to fetch crypto prices: {}", e);
                None
            }
        }
    }

    async fn try_fetch(&self) -> Result<Vec<CryptoRecord>> {
        let url = format!(
            "{}/api/v3/coins/markets",
            self.config.coingecko_url.trim_end_matches('/')
        );
        let request = self.client.get(url).query(&[
            ("vs_currency", self.config.vs_currency.clone()),
            ("order", "market_cap_desc".to_string()),
            ("per_page", self.config.top_n.to_string()),
            ("page", "1".to_string()),
            ("sparkline", "false".to_string()),
        ]);

        let entries: Vec<MarketEntry> = get_json(request).await?;
        Ok(entries
            .into_iter()
            .take(self.config.top_n)
            .map(CryptoRecord::from)
            .collect())
    }
}
