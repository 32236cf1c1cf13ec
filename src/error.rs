use reqwest::StatusCode;
use thiserror::Error;

/// Why a single upstream fetch produced no data.
///
/// Fetchers never hand this to their callers; it is logged and turned into
/// the fetcher's empty result.
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("request failed: {0}")]
    Http(reqwest::Error),

    #[error("upstream returned {0}")]
    Status(StatusCode),

    #[error("feed parse error: {0}")]
    Feed(#[from] feed_rs::parser::ParseFeedError),

    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("unexpected payload: {0}")]
    Payload(String),
}

// Request URLs can carry credentials in the query string, so they are
// dropped before the error is ever displayed.
impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        FetchError::Http(err.without_url())
    }
}

pub type Result<T> = std::result::Result<T, FetchError>;
