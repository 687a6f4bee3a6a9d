//! News feed client
//!
//! The news RSS feed is consumed through the rss2json conversion API, which
//! returns the feed as a JSON array of items. The dashboard shows only the
//! first few items; a bad publish date on one item degrades that item's date
//! to unknown instead of dropping the item or failing the feed.

use chrono::{NaiveDateTime, Utc};
use reqwest::Client;

use super::{NewsFeed, NewsItem, FETCH_TIMEOUT};
use crate::cache::{fetch_cached, CacheManager, FetchError};

/// rss2json endpoint wrapping the eso-hub news feed
const NEWS_FEED_URL: &str =
    "https://api.rss2json.com/v1/api.json?rss_url=https://eso-hub.com/en/news/feed.rss";

/// Cache key for news feed data
const NEWS_CACHE_KEY: &str = "news_feed";

/// Time-to-live for news feed cache entries
const NEWS_TTL: std::time::Duration = std::time::Duration::from_secs(24 * 60 * 60);

/// Maximum number of news items shown on the dashboard
const MAX_NEWS_ITEMS: usize = 3;

/// Publish timestamp format used by the feed
const PUB_DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// rss2json response envelope
#[derive(Debug, serde::Deserialize)]
struct FeedEnvelope {
    items: Vec<FeedItem>,
}

/// A raw feed item as served by rss2json
#[derive(Debug, serde::Deserialize)]
struct FeedItem {
    #[serde(default)]
    title: String,
    #[serde(default)]
    link: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    thumbnail: String,
    #[serde(default, rename = "pubDate")]
    pub_date: String,
}

/// Client for fetching the news feed
#[derive(Debug, Clone)]
pub struct NewsClient {
    /// HTTP client for making requests
    client: Client,
    /// Cache manager for persisting responses
    cache: Option<CacheManager>,
    /// Feed URL (allows override for testing)
    feed_url: String,
}

impl Default for NewsClient {
    fn default() -> Self {
        Self::new()
    }
}

impl NewsClient {
    /// Creates a new NewsClient with default configuration
    pub fn new() -> Self {
        Self {
            client: Client::new(),
            cache: CacheManager::new(),
            feed_url: NEWS_FEED_URL.to_string(),
        }
    }

    /// Creates a new NewsClient with the given cache manager, or none
    pub fn with_cache(cache: Option<CacheManager>) -> Self {
        Self {
            client: Client::new(),
            cache,
            feed_url: NEWS_FEED_URL.to_string(),
        }
    }

    /// Creates a new NewsClient with a custom feed URL (for testing)
    #[cfg(test)]
    pub fn with_feed_url(feed_url: String) -> Self {
        Self {
            client: Client::new(),
            cache: None,
            feed_url,
        }
    }

    /// Fetches the latest news items
    ///
    /// Served from cache when a fresh entry exists; otherwise one GET against
    /// the feed endpoint, cached for a day.
    pub async fn fetch_news(&self) -> Result<NewsFeed, FetchError> {
        fetch_cached(self.cache.as_ref(), NEWS_CACHE_KEY, NEWS_TTL, || {
            self.fetch_from_feed()
        })
        .await
    }

    /// Fetches and decodes the feed endpoint
    async fn fetch_from_feed(&self) -> Result<NewsFeed, FetchError> {
        let response = self
            .client
            .get(&self.feed_url)
            .timeout(FETCH_TIMEOUT)
            .send()
            .await?;
        let text = response.text().await?;

        parse_feed(&text)
    }
}

/// Decodes the feed envelope and keeps the first few items in feed order
fn parse_feed(text: &str) -> Result<NewsFeed, FetchError> {
    let envelope: FeedEnvelope = serde_json::from_str(text)?;

    let items = envelope
        .items
        .into_iter()
        .take(MAX_NEWS_ITEMS)
        .map(|item| NewsItem {
            published: NaiveDateTime::parse_from_str(&item.pub_date, PUB_DATE_FORMAT).ok(),
            title: item.title,
            link: item.link,
            description: item.description,
            thumbnail: item.thumbnail,
        })
        .collect();

    Ok(NewsFeed {
        items,
        fetched_at: Utc::now(),
    })
}
