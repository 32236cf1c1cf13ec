use feed_rs::parser;
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, info, warn};

use crate::config::{FeedConfig, NewsConfig, NewsSource};
use crate::error::Result;
use crate::models::NewsItem;

use super::{first_non_empty, get_bytes, get_json};

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    hits: Vec<SearchHit>,
}

#[derive(Debug, Deserialize)]
struct SearchHit {
    title: Option<String>,
    story_title: Option<String>,
    url: Option<String>,
    story_url: Option<String>,
}

impl SearchHit {
    fn into_item(self) -> Option<NewsItem> {
        let title = first_non_empty([self.title.as_deref(), self.story_title.as_deref()])?;
        let url = first_non_empty([self.url.as_deref(), self.story_url.as_deref()])?;
        Some(NewsItem { title, url })
    }
}

pub struct NewsFetcher {
    client: Client,
    config: NewsConfig,
}

impl NewsFetcher {
    pub fn new(client: Client, config: NewsConfig) -> Self {
        Self { client, config }
    }

    /// Up to `limit` headlines. Failed sources only shorten the list.
    pub async fn fetch(&self) -> Vec<NewsItem> {
        let limit = self.config.limit;
        if limit == 0 {
            return Vec::new();
        }

        let items = match self.config.source {
            NewsSource::HackerNews => match self.fetch_front_page(limit).await {
                Ok(items) => items,
                Err(e) => {
                    warn!("Failed to fetch Hacker News front page: {}", e);
                    Vec::new()
                }
            },
            NewsSource::Feeds => self.fetch_feeds(limit).await,
        };

        info!("Collected {} headlines", items.len());
        items
    }

    async fn fetch_front_page(&self, limit: usize) -> Result<Vec<NewsItem>> {
        let url = format!(
            "{}/api/v1/search",
            self.config.hn_search_url.trim_end_matches('/')
        );
        let request = self.client.get(url).query(&[
            ("tags", "front_page".to_string()),
            ("hitsPerPage", limit.to_string()),
        ]);

        let data: SearchResponse = get_json(request).await?;
        Ok(data
            .hits
            .into_iter()
            .filter_map(SearchHit::into_item)
            .take(limit)
            .collect())
    }

    async fn fetch_feeds(&self, limit: usize) -> Vec<NewsItem> {
        let mut items = Vec::new();

        for feed in &self.config.feeds {
            if items.len() >= limit {
                break;
            }

            match self.fetch_feed(feed).await {
                Ok(entries) => {
                    debug!("Feed '{}' yielded {} items", feed.name, entries.len());
                    items.extend(entries);
                }
                Err(e) => warn!("Skipping feed '{}' ({}): {}", feed.name, feed.url, e),
            }
        }

        items.truncate(limit);
        items
    }

    async fn fetch_feed(&self, feed: &FeedConfig) -> Result<Vec<NewsItem>> {
        let bytes = get_bytes(self.client.get(&feed.url)).await?;
        let parsed = parser::parse(&bytes[..])?;
        Ok(parsed.entries.iter().filter_map(entry_to_item).collect())
    }
}

/// Title and first link of a feed entry; entries lacking either are dropped.
pub fn entry_to_item(entry: &feed_rs::model::Entry) -> Option<NewsItem> {
    let title = first_non_empty([entry.title.as_ref().map(|t| t.content.as_str())])?;
    let url = first_non_empty([entry.links.first().map(|l| l.href.as_str())])?;
    Some(NewsItem { title, url })
}
