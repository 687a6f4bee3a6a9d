//! Server status client for the community status page
//!
//! The status page has no API; each megaserver region is a block identified
//! by element id, with the status text inside a `<b>` tag. The region list
//! and their selectors live in one table so adding a region is a table row,
//! not another branch.

use chrono::Utc;
use reqwest::Client;
use scraper::{Html, Selector};

use super::{Region, RegionState, RegionStatus, ServerStatus, FETCH_TIMEOUT};
use crate::cache::{fetch_cached, CacheManager, FetchError};

/// URL of the community server status page
const STATUS_PAGE_URL: &str = "https://esoserverstatus.net/";

/// Cache key for server status data
const STATUS_CACHE_KEY: &str = "server_status";

/// Time-to-live for server status cache entries
const STATUS_TTL: std::time::Duration = std::time::Duration::from_secs(5 * 60);

/// Selector table mapping each region to its block on the status page
const REGION_SELECTORS: &[(Region, &str)] = &[
    (Region::PcEu, "#PC-EU"),
    (Region::PcNa, "#PC-NA"),
    (Region::PcPts, "#PC-PTS"),
    (Region::XboxEu, "#XBOX-EU"),
    (Region::XboxNa, "#XBOX-NA"),
    (Region::Ps4Na, "#PS4-NA"),
    (Region::Ps4Eu, "#PS4-EU"),
];

/// Client for fetching megaserver status
#[derive(Debug, Clone)]
pub struct StatusClient {
    /// HTTP client for making requests
    client: Client,
    /// Cache manager for persisting responses
    cache: Option<CacheManager>,
    /// URL of the status page (allows override for testing)
    page_url: String,
}

impl Default for StatusClient {
    fn default() -> Self {
        Self::new()
    }
}

impl StatusClient {
    /// Creates a new StatusClient with default configuration
    pub fn new() -> Self {
        Self {
            client: Client::new(),
            cache: CacheManager::new(),
            page_url: STATUS_PAGE_URL.to_string(),
        }
    }

    /// Creates a new StatusClient with the given cache manager, or none
    pub fn with_cache(cache: Option<CacheManager>) -> Self {
        Self {
            client: Client::new(),
            cache,
            page_url: STATUS_PAGE_URL.to_string(),
        }
    }

    /// Creates a new StatusClient with a custom page URL (for testing)
    #[cfg(test)]
    pub fn with_page_url(page_url: String) -> Self {
        Self {
            client: Client::new(),
            cache: None,
            page_url,
        }
    }

    /// Fetches the status of every megaserver region
    ///
    /// Served from cache when a fresh entry exists; otherwise one GET against
    /// the status page, cached for five minutes.
    pub async fn fetch_server_status(&self) -> Result<ServerStatus, FetchError> {
        fetch_cached(self.cache.as_ref(), STATUS_CACHE_KEY, STATUS_TTL, || {
            self.fetch_from_page()
        })
        .await
    }

    /// Fetches and scrapes the status page
    async fn fetch_from_page(&self) -> Result<ServerStatus, FetchError> {
        let response = self
            .client
            .get(&self.page_url)
            .timeout(FETCH_TIMEOUT)
            .send()
            .await?;
        let html = response.text().await?;

        parse_server_status(&html)
    }
}

/// Extracts every region's status from the status page
///
/// A region whose block or `<b>` text is missing fails the whole scrape:
/// that means the page changed shape, not that the server is down.
fn parse_server_status(html: &str) -> Result<ServerStatus, FetchError> {
    let document = Html::parse_document(html);
    let mut regions = Vec::with_capacity(REGION_SELECTORS.len());

    for (region, block_selector) in REGION_SELECTORS {
        let selector_str = format!("{} b", block_selector);
        let selector = Selector::parse(&selector_str)
            .map_err(|e| FetchError::Parse(format!("invalid selector '{}': {}", selector_str, e)))?;

        let status_text = document
            .select(&selector)
            .next()
            .map(|el| el.text().collect::<String>().trim().to_string())
            .ok_or_else(|| {
                FetchError::Parse(format!("missing status block '{}'", block_selector))
            })?;

        regions.push(RegionStatus {
            region: *region,
            state: RegionState::from_text(&status_text),
            status_text,
        });
    }

    Ok(ServerStatus {
        regions,
        fetched_at: Utc::now(),
    })
}
