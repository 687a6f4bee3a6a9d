//! Command-line interface parsing for the ESO status dashboard
//!
//! This module handles parsing of CLI arguments using clap, including the
//! --platform filter for the server status panel and the --no-cache switch.

use clap::Parser;
use thiserror::Error;

use crate::data::Platform;

/// Error types for CLI argument parsing
#[derive(Debug, Error)]
pub enum CliError {
    /// The specified platform name is not recognized
    #[error("Invalid platform: '{0}'. Valid platforms: pc, xbox, ps")]
    InvalidPlatform(String),
}

/// ESO status dashboard - server health, player counts, and news
#[derive(Parser, Debug)]
#[command(name = "esodash")]
#[command(about = "Elder Scrolls Online live status dashboard")]
#[command(version)]
pub struct Cli {
    /// Show only one platform's megaservers in the status panel
    ///
    /// Examples:
    ///   esodash --platform pc    # PC megaservers only
    ///   esodash --platform ps    # PlayStation megaservers only
    ///
    /// Valid platforms: pc, xbox, ps
    #[arg(long, value_name = "PLATFORM")]
    pub platform: Option<String>,

    /// Skip the on-disk cache and fetch fresh data from every source
    #[arg(long)]
    pub no_cache: bool,
}

/// Configuration derived from CLI arguments for application startup
#[derive(Debug, Clone, Default)]
pub struct StartupConfig {
    /// Platform to filter the status panel to (if specified)
    pub platform_filter: Option<Platform>,
    /// Whether to bypass the on-disk cache
    pub no_cache: bool,
}

/// Parses a platform string argument into a Platform enum.
///
/// # Arguments
/// * `s` - The platform string from CLI
///
/// # Returns
/// * `Ok(Platform)` if the string matches a valid platform
/// * `Err(CliError::InvalidPlatform)` if the string doesn't match
pub fn parse_platform_arg(s: &str) -> Result<Platform, CliError> {
    Platform::from_str(s).ok_or_else(|| CliError::InvalidPlatform(s.to_string()))
}

impl StartupConfig {
    /// Creates a StartupConfig from parsed CLI arguments.
    ///
    /// # Arguments
    /// * `cli` - The parsed CLI struct
    ///
    /// # Returns
    /// * `Ok(StartupConfig)` with appropriate settings
    /// * `Err(CliError)` if an invalid platform was specified
    pub fn from_cli(cli: &Cli) -> Result<Self, CliError> {
        let platform_filter = match &cli.platform {
            None => None,
            Some(platform_str) => Some(parse_platform_arg(platform_str)?),
        };

        Ok(StartupConfig {
            platform_filter,
            no_cache: cli.no_cache,
        })
    }
}
