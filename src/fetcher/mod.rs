//! Upstream fetchers.
//!
//! Each fetcher issues plain GET requests against one kind of upstream and
//! reshapes the payload into flat records. Failures never leave a fetcher:
//! they are logged and replaced by that fetcher's "no data" result.

pub mod crypto;
pub mod news;
pub mod stocks;
pub mod weather;

use std::time::Duration;

use axum::body::Bytes;
use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::error::{FetchError, Result};

pub use crypto::CryptoFetcher;
pub use news::NewsFetcher;
pub use stocks::StocksFetcher;
pub use weather::WeatherFetcher;

const USER_AGENT: &str = "ApiDashboard/1.0 (+public API dashboard)";

/// Build the HTTP client shared by all fetchers.
pub fn build_client(timeout: Duration) -> Result<Client> {
    let client = Client::builder()
        .timeout(timeout)
        .user_agent(USER_AGENT)
        .build()?;
    Ok(client)
}

/// Return the first candidate that is present and not blank.
pub fn first_non_empty<'a, I>(candidates: I) -> Option<String>
where
    I: IntoIterator<Item = Option<&'a str>>,
{
    candidates
        .into_iter()
        .flatten()
        .map(str::trim)
        .find(|c| !c.is_empty())
        .map(str::to_string)
}

/// Send the request and return the body of a 2xx response.
async fn get_bytes(request: RequestBuilder) -> Result<Bytes> {
    let response = request.send().await?;
    let status = response.status();
    // The query string may carry credentials, so only the path is logged
    debug!(
        "Upstream {}{} returned {}",
        response.url().host_str().unwrap_or_default(),
        response.url().path(),
        status
    );

    if !status.is_success() {
        return Err(FetchError::Status(status));
    }

    Ok(response.bytes().await?)
}

/// Send the request and decode a 2xx JSON body into `T`.
async fn get_json<T: DeserializeOwned>(request: RequestBuilder) -> Result<T> {
    let bytes = get_bytes(request).await?;
    Ok(serde_json::from_slice(&bytes)?)
}
