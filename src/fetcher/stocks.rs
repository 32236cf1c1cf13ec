use reqwest::Client;
use serde::Deserialize;
use tracing::{info, warn};

use crate::config::StocksConfig;
use crate::error::{FetchError, Result};
use crate::models::StockRecord;

use super::{first_non_empty, get_json};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct QuoteEnvelope {
    quote_response: Option<QuoteResponse>,
}

#[derive(Debug, Deserialize)]
struct QuoteResponse {
    #[serde(default)]
    result: Vec<Quote>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Quote {
    symbol: Option<String>,
    short_name: Option<String>,
    long_name: Option<String>,
    regular_market_price: Option<f64>,
    regular_market_change_percent: Option<f64>,
}

impl From<Quote> for StockRecord {
    fn from(quote: Quote) -> Self {
        let symbol = quote.symbol.unwrap_or_default();
        let name = first_non_empty([
            quote.short_name.as_deref(),
            quote.long_name.as_deref(),
            Some(symbol.as_str()),
        ])
        .unwrap_or_default();

        StockRecord {
            name,
            symbol,
            price: quote.regular_market_price.unwrap_or(0.0),
            change_24h: quote.regular_market_change_percent.unwrap_or(0.0),
        }
    }
}

pub struct StocksFetcher {
    client: Client,
    config: StocksConfig,
    fallback: Vec<StockRecord>,
}

impl StocksFetcher {
    /// `fallback` is returned verbatim whenever live quotes are unavailable.
    pub fn new(client: Client, config: StocksConfig, fallback: Vec<StockRecord>) -> Self {
        Self {
            client,
            config,
            fallback,
        }
    }

    /// Live quotes, or the fallback list so the panel is never blank.
    pub async fn fetch(&self) -> Vec<StockRecord> {
        match self.try_fetch().await {
            Ok(records) => {
                info!("Fetched {} stock quotes", records.len());
                records
            }
            Err(e) => {
                warn!("Stock quotes unavailable, using fallback data: {}", e);
                self.fallback.clone()
            }
        }
    }

    async fn try_fetch(&self) -> Result<Vec<StockRecord>> {
        if self.config.symbols.is_empty() {
            return Err(FetchError::Payload("no ticker symbols configured".to_string()));
        }

        let url = format!(
            "{}/v7/finance/quote",
            self.config.quote_url.trim_end_matches('/')
        );
        let symbols = self.config.symbols.join(",");
        let request = self.client.get(url).query(&[("symbols", symbols.as_str())]);

        let envelope: QuoteEnvelope = get_json(request).await?;
        let quotes = envelope
            .quote_response
            .map(|r| r.result)
            .unwrap_or_default();

        if quotes.is_empty() {
            return Err(FetchError::Payload("empty quote result".to_string()));
        }

        Ok(quotes.into_iter().map(StockRecord::from).collect())
    }
}
