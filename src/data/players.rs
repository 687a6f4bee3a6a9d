//! Player count clients for the Steam Web API and Steam Charts
//!
//! Two sources cover the player figures on the dashboard: the Steam Web API
//! reports the live in-game count as JSON, and the Steam Charts page carries
//! the 24-hour and all-time peaks, which are only available by scraping.

use chrono::Utc;
use reqwest::Client;
use scraper::{Html, Selector};

use super::{PlayerPeaks, FETCH_TIMEOUT};
use crate::cache::{fetch_cached, CacheManager, FetchError};

/// Steam application id for The Elder Scrolls Online
const STEAM_APP_ID: u32 = 306130;

/// Base URL for the Steam Web API
const STEAM_API_BASE_URL: &str = "https://api.steampowered.com";

/// Steam Charts page for the game
const STEAM_CHARTS_URL: &str = "https://steamcharts.com/app/306130";

/// Cache key for the live player count
const CURRENT_PLAYERS_CACHE_KEY: &str = "current_players";

/// Cache key for the scraped peak figures
const PLAYER_PEAKS_CACHE_KEY: &str = "player_peaks";

/// Time-to-live for player count cache entries
const PLAYER_COUNT_TTL: std::time::Duration = std::time::Duration::from_secs(3 * 60);

/// Selector for the headline figures on the Steam Charts page. The matches
/// appear in page order: current players, 24-hour peak, all-time peak.
const PLAYER_NUM_SELECTOR: &str = "#app-heading .num";

/// Envelope around the Steam player count response
#[derive(Debug, serde::Deserialize)]
struct SteamPlayersEnvelope {
    response: SteamPlayersBody,
}

/// Body of the Steam player count response
#[derive(Debug, serde::Deserialize)]
struct SteamPlayersBody {
    player_count: u64,
}

/// Client for fetching player counts
#[derive(Debug, Clone)]
pub struct PlayersClient {
    /// HTTP client for making requests
    client: Client,
    /// Cache manager for persisting responses
    cache: Option<CacheManager>,
    /// Base URL for the Steam Web API (allows override for testing)
    api_base_url: String,
    /// URL of the Steam Charts page (allows override for testing)
    charts_url: String,
}

impl Default for PlayersClient {
    fn default() -> Self {
        Self::new()
    }
}

impl PlayersClient {
    /// Creates a new PlayersClient with default configuration
    pub fn new() -> Self {
        Self {
            client: Client::new(),
            cache: CacheManager::new(),
            api_base_url: STEAM_API_BASE_URL.to_string(),
            charts_url: STEAM_CHARTS_URL.to_string(),
        }
    }

    /// Creates a new PlayersClient with the given cache manager, or none
    pub fn with_cache(cache: Option<CacheManager>) -> Self {
        Self {
            client: Client::new(),
            cache,
            api_base_url: STEAM_API_BASE_URL.to_string(),
            charts_url: STEAM_CHARTS_URL.to_string(),
        }
    }

    /// Creates a new PlayersClient with custom URLs (for testing)
    #[cfg(test)]
    pub fn with_base_urls(api_base_url: String, charts_url: String) -> Self {
        Self {
            client: Client::new(),
            cache: None,
            api_base_url,
            charts_url,
        }
    }

    /// Fetches the live in-game player count
    ///
    /// Served from cache when a fresh entry exists; otherwise one GET against
    /// the Steam Web API, cached for three minutes.
    pub async fn fetch_current_players(&self) -> Result<u64, FetchError> {
        fetch_cached(
            self.cache.as_ref(),
            CURRENT_PLAYERS_CACHE_KEY,
            PLAYER_COUNT_TTL,
            || self.fetch_current_from_api(),
        )
        .await
    }

    /// Fetches the current/24h/all-time peak figures from Steam Charts
    pub async fn fetch_player_peaks(&self) -> Result<PlayerPeaks, FetchError> {
        fetch_cached(
            self.cache.as_ref(),
            PLAYER_PEAKS_CACHE_KEY,
            PLAYER_COUNT_TTL,
            || self.fetch_peaks_from_charts(),
        )
        .await
    }

    /// Fetches the player count directly from the Steam Web API
    async fn fetch_current_from_api(&self) -> Result<u64, FetchError> {
        let url = format!(
            "{}/ISteamUserStats/GetNumberOfCurrentPlayers/v1/?appid={}",
            self.api_base_url, STEAM_APP_ID
        );

        let response = self
            .client
            .get(&url)
            .timeout(FETCH_TIMEOUT)
            .send()
            .await?;
        let text = response.text().await?;

        parse_current_players(&text)
    }

    /// Fetches and scrapes the Steam Charts page
    async fn fetch_peaks_from_charts(&self) -> Result<PlayerPeaks, FetchError> {
        let response = self
            .client
            .get(&self.charts_url)
            .timeout(FETCH_TIMEOUT)
            .send()
            .await?;
        let html = response.text().await?;

        parse_player_peaks(&html)
    }
}

/// Parses the Steam Web API player count envelope
fn parse_current_players(text: &str) -> Result<u64, FetchError> {
    let envelope: SteamPlayersEnvelope = serde_json::from_str(text)?;
    Ok(envelope.response.player_count)
}

/// Extracts the three headline player figures from the Steam Charts page
///
/// Fewer than three matches means the page no longer has the expected
/// structure, which is a parse failure rather than an empty result.
fn parse_player_peaks(html: &str) -> Result<PlayerPeaks, FetchError> {
    let document = Html::parse_document(html);
    let selector = Selector::parse(PLAYER_NUM_SELECTOR)
        .map_err(|e| FetchError::Parse(format!("invalid selector '{}': {}", PLAYER_NUM_SELECTOR, e)))?;

    let figures: Vec<String> = document
        .select(&selector)
        .map(|el| el.text().collect::<String>().trim().to_string())
        .collect();

    if figures.len() < 3 {
        return Err(FetchError::Parse(format!(
            "expected 3 player figures under '{}', found {}",
            PLAYER_NUM_SELECTOR,
            figures.len()
        )));
    }

    Ok(PlayerPeaks {
        current: figures[0].clone(),
        peak_24h: figures[1].clone(),
        peak_all_time: figures[2].clone(),
        fetched_at: Utc::now(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Sample valid Steam Web API response
    const VALID_STEAM_RESPONSE: &str = r#"{
        "response": {
            "player_count": 15234,
            "result": 1
        }
    }"#;

    /// Sample Steam Charts page fragment with the three headline figures
    const VALID_CHARTS_HTML: &str = r#"
        <html><body>
        <div id="app-heading">
            <h1>The Elder Scrolls Online</h1>
            <div class="app-stat"><span class="num">15,234</span><br>playing now</div>
            <div class="app-stat"><span class="num"> 21,050 </span><br>24-hour peak</div>
            <div class="app-stat"><span class="num">49,618</span><br>all-time peak</div>
        </div>
        </body></html>
    "#;

    #[test]
    fn test_parse_current_players_valid_response() {
        let count = parse_current_players(VALID_STEAM_RESPONSE).expect("Failed to parse");
        assert_eq!(count, 15234);
    }

    #[test]
    fn test_parse_current_players_malformed_json() {
        let result = parse_current_players("{ broken json <");
        assert!(matches!(result, Err(FetchError::Decode(_))));
    }

    #[test]
    fn test_parse_current_players_missing_field() {
        let result = parse_current_players(r#"{"response": {}}"#);
        assert!(matches!(result, Err(FetchError::Decode(_))));
    }

    #[test]
    fn test_parse_player_peaks_valid_page() {
        let peaks = parse_player_peaks(VALID_CHARTS_HTML).expect("Failed to parse");

        assert_eq!(peaks.current, "15,234");
        assert_eq!(peaks.peak_24h, "21,050", "Figure text should be trimmed");
        assert_eq!(peaks.peak_all_time, "49,618");
    }

    #[test]
    fn test_parse_player_peaks_missing_selector_is_failure() {
        let html = "<html><body><h1>Some other page</h1></body></html>";

        let result = parse_player_peaks(html);

        match result {
            Err(FetchError::Parse(msg)) => {
                assert!(msg.contains("#app-heading .num"), "Error should name the selector: {}", msg);
            }
            other => panic!("Expected Parse error, got {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn test_parse_player_peaks_too_few_figures_is_failure() {
        let html = r#"
            <div id="app-heading">
                <div class="app-stat"><span class="num">100</span></div>
                <div class="app-stat"><span class="num">200</span></div>
            </div>
        "#;

        let result = parse_player_peaks(html);
        assert!(matches!(result, Err(FetchError::Parse(_))));
    }

    #[test]
    fn test_players_client_default_urls() {
        let client = PlayersClient::default();
        assert_eq!(client.api_base_url, STEAM_API_BASE_URL);
        assert_eq!(client.charts_url, STEAM_CHARTS_URL);
    }
}
