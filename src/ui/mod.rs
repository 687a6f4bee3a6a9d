//! UI rendering module for the ESO status dashboard
//!
//! This module contains all the rendering logic for the terminal user
//! interface, using the ratatui library for TUI components.

pub mod dashboard;
pub mod help_overlay;
pub mod news_feed;

pub use dashboard::render as render_dashboard;
pub use help_overlay::render as render_help_overlay;
