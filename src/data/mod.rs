//! Core data models for the ESO status dashboard
//!
//! This module contains the data types used throughout the application for
//! representing server status, player counts, and news items, plus the HTTP
//! conventions shared by all upstream clients.

pub mod news;
pub mod players;
pub mod status;

pub use news::NewsClient;
pub use players::PlayersClient;
pub use status::StatusClient;

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Timeout applied to every upstream HTTP request
pub(crate) const FETCH_TIMEOUT: Duration = Duration::from_secs(10);

/// A megaserver region whose status is reported on the status page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Region {
    PcEu,
    PcNa,
    PcPts,
    XboxEu,
    XboxNa,
    Ps4Na,
    Ps4Eu,
}

impl Region {
    /// Human-readable label matching the status page naming
    pub fn label(&self) -> &'static str {
        match self {
            Region::PcEu => "PC-EU",
            Region::PcNa => "PC-NA",
            Region::PcPts => "PC-PTS",
            Region::XboxEu => "XBOX-EU",
            Region::XboxNa => "XBOX-NA",
            Region::Ps4Na => "PS4-NA",
            Region::Ps4Eu => "PS4-EU",
        }
    }

    /// The platform this region's megaserver runs on
    pub fn platform(&self) -> Platform {
        match self {
            Region::PcEu | Region::PcNa | Region::PcPts => Platform::Pc,
            Region::XboxEu | Region::XboxNa => Platform::Xbox,
            Region::Ps4Na | Region::Ps4Eu => Platform::PlayStation,
        }
    }
}

/// Reported state of a megaserver region
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RegionState {
    /// Status page reports the region up
    Online,
    /// Status page reports the region down (a legitimate payload, not a fetch failure)
    Offline,
    /// Status page reported something else (maintenance notice, unusual wording)
    Unknown,
}

impl RegionState {
    /// Derives the state from the status page's text for a region
    pub fn from_text(text: &str) -> Self {
        match text.trim() {
            "Online" => RegionState::Online,
            "Offline" => RegionState::Offline,
            _ => RegionState::Unknown,
        }
    }
}

/// Status of a single megaserver region
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegionStatus {
    /// The region this status is for
    pub region: Region,
    /// State derived from the status text
    pub state: RegionState,
    /// Raw status text as shown on the status page
    pub status_text: String,
}

/// Status of all megaserver regions, in status page order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerStatus {
    /// Per-region statuses
    pub regions: Vec<RegionStatus>,
    /// When this data was fetched
    pub fetched_at: DateTime<Utc>,
}

/// Player count figures from the Steam Charts page
///
/// Figures are kept as display strings exactly as scraped (the page formats
/// them with separators).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerPeaks {
    /// Players in game right now
    pub current: String,
    /// Peak over the last 24 hours
    pub peak_24h: String,
    /// All-time peak
    pub peak_all_time: String,
    /// When this data was fetched
    pub fetched_at: DateTime<Utc>,
}

/// A single news item from the feed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewsItem {
    /// Article title
    pub title: String,
    /// Link to the full article
    pub link: String,
    /// Short description or teaser
    pub description: String,
    /// Thumbnail image URL
    pub thumbnail: String,
    /// Publish timestamp; `None` when the feed's date failed to parse
    pub published: Option<NaiveDateTime>,
}

/// The truncated news feed shown on the dashboard
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewsFeed {
    /// The first few feed items, in feed order
    pub items: Vec<NewsItem>,
    /// When this data was fetched
    pub fetched_at: DateTime<Utc>,
}

/// Platform families used to filter the server status panel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    Pc,
    Xbox,
    PlayStation,
}

impl Platform {
    /// Parses a platform name from CLI input, accepting common aliases
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "pc" => Some(Platform::Pc),
            "xbox" => Some(Platform::Xbox),
            "ps" | "ps4" | "ps5" | "playstation" => Some(Platform::PlayStation),
            _ => None,
        }
    }

    /// Human-readable label
    pub fn label(&self) -> &'static str {
        match self {
            Platform::Pc => "PC",
            Platform::Xbox => "Xbox",
            Platform::PlayStation => "PlayStation",
        }
    }
}

/// Everything the dashboard renders, each panel independently optional
///
/// A `None` means that source failed to load; the UI renders a fallback for
/// it instead of a fake value.
#[derive(Debug, Clone, Default)]
pub struct DashboardData {
    /// Live player count from the Steam Web API
    pub current_players: Option<u64>,
    /// Peak figures from Steam Charts
    pub peaks: Option<PlayerPeaks>,
    /// Per-region server status
    pub server_status: Option<ServerStatus>,
    /// Latest news items
    pub news: Option<NewsFeed>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_region_labels_match_status_page_ids() {
        assert_eq!(Region::PcEu.label(), "PC-EU");
        assert_eq!(Region::PcNa.label(), "PC-NA");
        assert_eq!(Region::PcPts.label(), "PC-PTS");
        assert_eq!(Region::XboxEu.label(), "XBOX-EU");
        assert_eq!(Region::XboxNa.label(), "XBOX-NA");
        assert_eq!(Region::Ps4Na.label(), "PS4-NA");
        assert_eq!(Region::Ps4Eu.label(), "PS4-EU");
    }

    #[test]
    fn test_region_platform_mapping() {
        assert_eq!(Region::PcEu.platform(), Platform::Pc);
        assert_eq!(Region::PcNa.platform(), Platform::Pc);
        assert_eq!(Region::PcPts.platform(), Platform::Pc);
        assert_eq!(Region::XboxEu.platform(), Platform::Xbox);
        assert_eq!(Region::XboxNa.platform(), Platform::Xbox);
        assert_eq!(Region::Ps4Na.platform(), Platform::PlayStation);
        assert_eq!(Region::Ps4Eu.platform(), Platform::PlayStation);
    }

    #[test]
    fn test_region_state_from_text() {
        assert_eq!(RegionState::from_text("Online"), RegionState::Online);
        assert_eq!(RegionState::from_text(" Online "), RegionState::Online);
        assert_eq!(RegionState::from_text("Offline"), RegionState::Offline);
        assert_eq!(RegionState::from_text("Maintenance"), RegionState::Unknown);
        assert_eq!(RegionState::from_text(""), RegionState::Unknown);
    }

    #[test]
    fn test_platform_from_str_aliases() {
        assert_eq!(Platform::from_str("pc"), Some(Platform::Pc));
        assert_eq!(Platform::from_str("PC"), Some(Platform::Pc));
        assert_eq!(Platform::from_str("xbox"), Some(Platform::Xbox));
        assert_eq!(Platform::from_str("ps"), Some(Platform::PlayStation));
        assert_eq!(Platform::from_str("ps4"), Some(Platform::PlayStation));
        assert_eq!(Platform::from_str("ps5"), Some(Platform::PlayStation));
        assert_eq!(Platform::from_str("playstation"), Some(Platform::PlayStation));
        assert_eq!(Platform::from_str("wii"), None);
    }

    #[test]
    fn test_server_status_serialization_roundtrip() {
        let status = ServerStatus {
            regions: vec![
                RegionStatus {
                    region: Region::PcEu,
                    state: RegionState::Online,
                    status_text: "Online".to_string(),
                },
                RegionStatus {
                    region: Region::Ps4Na,
                    state: RegionState::Offline,
                    status_text: "Offline".to_string(),
                },
            ],
            fetched_at: Utc::now(),
        };

        let json = serde_json::to_string(&status).expect("Failed to serialize ServerStatus");
        let deserialized: ServerStatus =
            serde_json::from_str(&json).expect("Failed to deserialize ServerStatus");

        assert_eq!(deserialized, status);
    }

    #[test]
    fn test_news_item_serialization_roundtrip() {
        let item = NewsItem {
            title: "Update 44 Released".to_string(),
            link: "https://example.com/update-44".to_string(),
            description: "The latest update is live.".to_string(),
            thumbnail: "https://example.com/thumb.jpg".to_string(),
            published: NaiveDateTime::parse_from_str("2025-03-10 14:00:00", "%Y-%m-%d %H:%M:%S")
                .ok(),
        };

        let json = serde_json::to_string(&item).expect("Failed to serialize NewsItem");
        let deserialized: NewsItem =
            serde_json::from_str(&json).expect("Failed to deserialize NewsItem");

        assert_eq!(deserialized, item);
    }

    #[test]
    fn test_news_item_unknown_date_survives_roundtrip() {
        let item = NewsItem {
            title: "Untitled".to_string(),
            link: String::new(),
            description: String::new(),
            thumbnail: String::new(),
            published: None,
        };

        let json = serde_json::to_string(&item).expect("Failed to serialize NewsItem");
        let deserialized: NewsItem =
            serde_json::from_str(&json).expect("Failed to deserialize NewsItem");

        assert!(deserialized.published.is_none());
    }

    #[test]
    fn test_dashboard_data_default_is_all_unavailable() {
        let data = DashboardData::default();
        assert!(data.current_players.is_none());
        assert!(data.peaks.is_none());
        assert!(data.server_status.is_none());
        assert!(data.news.is_none());
    }
}
