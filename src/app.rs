//! Application state management for the ESO status dashboard
//!
//! This module contains the main application state, handling keyboard input,
//! data loading, and the refresh cadence for the dashboard view.

use chrono::{DateTime, Local};
use crossterm::event::{KeyCode, KeyEvent};

use crate::cache::CacheManager;
use crate::cli::StartupConfig;
use crate::data::{
    DashboardData, NewsClient, Platform, PlayersClient, Region, StatusClient,
};

/// How long dashboard data may sit before the event loop reloads it.
/// Matches the shortest cache TTL, so a reload only hits the network for
/// sources whose cache entries actually expired.
const AUTO_REFRESH_SECS: i64 = 180;

/// Application state enum representing the current view
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppState {
    /// Initial loading state while fetching data
    Loading,
    /// The dashboard view
    Dashboard,
}

/// Main application struct managing state and data
pub struct App {
    /// Current application state/view
    pub state: AppState,
    /// Data shown on the dashboard
    pub data: DashboardData,
    /// Flag indicating the application should quit
    pub should_quit: bool,
    /// Flag to show help overlay
    pub show_help: bool,
    /// Platform the status panel is filtered to, if any
    pub platform_filter: Option<Platform>,
    /// Timestamp of last data refresh
    pub last_refresh: Option<DateTime<Local>>,
    /// Flag indicating a refresh has been requested
    pub refresh_requested: bool,
    /// Player counts client
    players_client: PlayersClient,
    /// Server status client
    status_client: StatusClient,
    /// News feed client
    news_client: NewsClient,
}

impl App {
    /// Creates a new App instance from the startup configuration
    ///
    /// With `no_cache` set, clients are built without a cache manager and
    /// every load goes to the network.
    pub fn new(config: StartupConfig) -> Self {
        let cache = if config.no_cache {
            None
        } else {
            CacheManager::new()
        };

        Self {
            state: AppState::Loading,
            data: DashboardData::default(),
            should_quit: false,
            show_help: false,
            platform_filter: config.platform_filter,
            last_refresh: None,
            refresh_requested: false,
            players_client: PlayersClient::with_cache(cache.clone()),
            status_client: StatusClient::with_cache(cache.clone()),
            news_client: NewsClient::with_cache(cache),
        }
    }

    /// Creates a new App instance with custom clients (for testing)
    #[cfg(test)]
    pub fn with_clients(
        players_client: PlayersClient,
        status_client: StatusClient,
        news_client: NewsClient,
    ) -> Self {
        Self {
            state: AppState::Loading,
            data: DashboardData::default(),
            should_quit: false,
            show_help: false,
            platform_filter: None,
            last_refresh: None,
            refresh_requested: false,
            players_client,
            status_client,
            news_client,
        }
    }

    /// Loads all dashboard data concurrently
    ///
    /// The four sources are fetched at once; each failure degrades its panel
    /// to a fallback rendering instead of aborting the others. Transitions to
    /// the Dashboard state when complete.
    pub async fn load_all_data(&mut self) {
        let (current_players, peaks, server_status, news) = futures::join!(
            self.players_client.fetch_current_players(),
            self.players_client.fetch_player_peaks(),
            self.status_client.fetch_server_status(),
            self.news_client.fetch_news(),
        );

        self.data = DashboardData {
            current_players: current_players.ok(),
            peaks: peaks.ok(),
            server_status: server_status.ok(),
            news: news.ok(),
        };

        // Record refresh time
        self.last_refresh = Some(Local::now());
        self.state = AppState::Dashboard;
    }

    /// Whether the data is old enough for the event loop to reload it
    pub fn needs_refresh(&self) -> bool {
        match self.last_refresh {
            Some(last) => {
                (Local::now() - last) >= chrono::Duration::seconds(AUTO_REFRESH_SECS)
            }
            // Initial load is driven by the Loading state, not by age
            None => false,
        }
    }

    /// Whether a region passes the current platform filter
    pub fn region_visible(&self, region: Region) -> bool {
        match self.platform_filter {
            Some(platform) => region.platform() == platform,
            None => true,
        }
    }

    /// Cycles the platform filter: all -> PC -> Xbox -> PlayStation -> all
    fn cycle_platform_filter(&mut self) {
        self.platform_filter = match self.platform_filter {
            None => Some(Platform::Pc),
            Some(Platform::Pc) => Some(Platform::Xbox),
            Some(Platform::Xbox) => Some(Platform::PlayStation),
            Some(Platform::PlayStation) => None,
        };
    }

    /// Handles keyboard input and updates state accordingly
    ///
    /// # Arguments
    /// * `key_event` - The keyboard event to handle
    ///
    /// # Key Bindings
    /// - `q` or `Esc`: Quit the application
    /// - `r`: Refresh dashboard data
    /// - `p`: Cycle the platform filter
    /// - `?`: Toggle the help overlay
    pub fn handle_key(&mut self, key_event: KeyEvent) {
        // Handle help overlay - intercepts all keys when shown
        if self.show_help {
            match key_event.code {
                KeyCode::Esc | KeyCode::Char('?') | KeyCode::Char('q') => {
                    self.show_help = false;
                }
                _ => {} // Ignore other keys when help is shown
            }
            return;
        }

        match self.state {
            AppState::Loading => {
                // Only quit is allowed during loading
                if key_event.code == KeyCode::Char('q') {
                    self.should_quit = true;
                }
            }
            AppState::Dashboard => match key_event.code {
                KeyCode::Char('q') | KeyCode::Esc => {
                    self.should_quit = true;
                }
                KeyCode::Char('r') => {
                    self.refresh_requested = true;
                }
                KeyCode::Char('p') => {
                    self.cycle_platform_filter();
                }
                KeyCode::Char('?') => {
                    self.show_help = true;
                }
                _ => {}
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyEventKind, KeyEventState, KeyModifiers};

    fn test_app() -> App {
        App::with_clients(
            PlayersClient::with_cache(None),
            StatusClient::with_cache(None),
            NewsClient::with_cache(None),
        )
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent {
            code,
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        }
    }

    #[test]
    fn test_new_app_starts_loading() {
        let app = test_app();
        assert_eq!(app.state, AppState::Loading);
        assert!(!app.should_quit);
        assert!(app.last_refresh.is_none());
    }

    #[test]
    fn test_quit_from_dashboard() {
        let mut app = test_app();
        app.state = AppState::Dashboard;

        app.handle_key(key(KeyCode::Char('q')));
        assert!(app.should_quit);
    }

    #[test]
    fn test_quit_with_escape_from_dashboard() {
        let mut app = test_app();
        app.state = AppState::Dashboard;

        app.handle_key(key(KeyCode::Esc));
        assert!(app.should_quit);
    }

    #[test]
    fn test_quit_allowed_while_loading() {
        let mut app = test_app();

        app.handle_key(key(KeyCode::Char('q')));
        assert!(app.should_quit);
    }

    #[test]
    fn test_other_keys_ignored_while_loading() {
        let mut app = test_app();

        app.handle_key(key(KeyCode::Char('r')));
        assert!(!app.refresh_requested);
        assert!(!app.should_quit);
    }

    #[test]
    fn test_refresh_key_sets_flag() {
        let mut app = test_app();
        app.state = AppState::Dashboard;

        app.handle_key(key(KeyCode::Char('r')));
        assert!(app.refresh_requested);
    }

    #[test]
    fn test_help_toggle() {
        let mut app = test_app();
        app.state = AppState::Dashboard;

        app.handle_key(key(KeyCode::Char('?')));
        assert!(app.show_help);

        // While help is shown, other keys are swallowed
        app.handle_key(key(KeyCode::Char('r')));
        assert!(!app.refresh_requested);
        assert!(app.show_help);

        app.handle_key(key(KeyCode::Esc));
        assert!(!app.show_help);
    }

    #[test]
    fn test_platform_filter_cycles_through_all() {
        let mut app = test_app();
        app.state = AppState::Dashboard;

        assert!(app.platform_filter.is_none());

        app.handle_key(key(KeyCode::Char('p')));
        assert_eq!(app.platform_filter, Some(Platform::Pc));

        app.handle_key(key(KeyCode::Char('p')));
        assert_eq!(app.platform_filter, Some(Platform::Xbox));

        app.handle_key(key(KeyCode::Char('p')));
        assert_eq!(app.platform_filter, Some(Platform::PlayStation));

        app.handle_key(key(KeyCode::Char('p')));
        assert!(app.platform_filter.is_none());
    }

    #[test]
    fn test_region_visible_without_filter() {
        let app = test_app();
        assert!(app.region_visible(Region::PcEu));
        assert!(app.region_visible(Region::Ps4Na));
    }

    #[test]
    fn test_region_visible_with_filter() {
        let mut app = test_app();
        app.platform_filter = Some(Platform::Xbox);

        assert!(app.region_visible(Region::XboxEu));
        assert!(app.region_visible(Region::XboxNa));
        assert!(!app.region_visible(Region::PcEu));
        assert!(!app.region_visible(Region::Ps4Eu));
    }

    #[test]
    fn test_needs_refresh_before_first_load() {
        let app = test_app();
        assert!(!app.needs_refresh(), "Initial load is driven by state, not age");
    }

    #[test]
    fn test_needs_refresh_with_fresh_data() {
        let mut app = test_app();
        app.last_refresh = Some(Local::now());
        assert!(!app.needs_refresh());
    }

    #[test]
    fn test_needs_refresh_with_stale_data() {
        let mut app = test_app();
        app.last_refresh = Some(Local::now() - chrono::Duration::seconds(AUTO_REFRESH_SECS + 1));
        assert!(app.needs_refresh());
    }
}
