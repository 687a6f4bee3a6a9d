//! Dashboard screen rendering
//!
//! Renders the main dashboard view: per-region server status on the left,
//! player count tiles and the news feed on the right. Panels whose data
//! failed to load render a placeholder instead of a fake value.

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::app::App;
use crate::data::RegionState;
use crate::ui::news_feed;

/// Color for a region state, mirroring the status page's traffic lights
fn state_color(state: &RegionState) -> Color {
    match state {
        RegionState::Online => Color::Green,
        RegionState::Offline => Color::Yellow,
        RegionState::Unknown => Color::Red,
    }
}

/// Indicator dot for a region state
fn state_icon(state: &RegionState) -> &'static str {
    match state {
        RegionState::Online => "\u{25CF}",  // ●
        RegionState::Offline => "\u{25CB}", // ○
        RegionState::Unknown => "\u{25C6}", // ◆
    }
}

/// Formats an integer count with thousands separators (e.g., 15234 -> "15,234")
fn format_count(count: u64) -> String {
    let digits = count.to_string();
    let mut formatted = String::with_capacity(digits.len() + digits.len() / 3);

    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            formatted.push(',');
        }
        formatted.push(c);
    }

    formatted
}

/// Renders the dashboard view
pub fn render(frame: &mut Frame, app: &App) {
    let area = frame.area();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(10),   // Body
            Constraint::Length(1), // Footer
        ])
        .split(area);

    render_header(frame, chunks[0], app);
    render_body(frame, chunks[1], app);
    render_footer(frame, chunks[2]);
}

/// Renders the title bar with refresh time and active filter
fn render_header(frame: &mut Frame, area: Rect, app: &App) {
    let mut spans = vec![Span::styled(
        " ESO Status Dashboard ",
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
    )];

    if let Some(platform) = app.platform_filter {
        spans.push(Span::styled(
            format!("[{}] ", platform.label()),
            Style::default().fg(Color::Magenta),
        ));
    }

    if let Some(last_refresh) = app.last_refresh {
        spans.push(Span::styled(
            format!("updated {}", last_refresh.format("%H:%M:%S")),
            Style::default().fg(Color::DarkGray),
        ));
    }

    let header = Paragraph::new(Line::from(spans))
        .block(Block::default().borders(Borders::ALL))
        .alignment(Alignment::Left);

    frame.render_widget(header, area);
}

/// Renders the status / players / news panels
fn render_body(frame: &mut Frame, area: Rect, app: &App) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
        .split(area);

    render_server_status(frame, columns[0], app);

    let right = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(7), Constraint::Min(5)])
        .split(columns[1]);

    render_player_counts(frame, right[0], app);
    news_feed::render(frame, right[1], app);
}

/// Renders the per-region server status list
fn render_server_status(frame: &mut Frame, area: Rect, app: &App) {
    let block = Block::default().title(" Megaservers ").borders(Borders::ALL);

    let lines: Vec<Line> = match &app.data.server_status {
        Some(status) => status
            .regions
            .iter()
            .filter(|r| app.region_visible(r.region))
            .map(|r| {
                let color = state_color(&r.state);
                Line::from(vec![
                    Span::styled(format!(" {} ", state_icon(&r.state)), Style::default().fg(color)),
                    Span::raw(format!("{}: ", r.region.label())),
                    Span::styled(r.status_text.clone(), Style::default().fg(color)),
                ])
            })
            .collect(),
        None => vec![Line::from(Span::styled(
            " Server status unavailable",
            Style::default().fg(Color::DarkGray),
        ))],
    };

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

/// Renders the player count tiles
fn render_player_counts(frame: &mut Frame, area: Rect, app: &App) {
    let block = Block::default().title(" Players ").borders(Borders::ALL);

    let live_line = match app.data.current_players {
        Some(count) => Line::from(vec![
            Span::raw(" Playing now:    "),
            Span::styled(
                format_count(count),
                Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::BOLD),
            ),
        ]),
        None => Line::from(Span::styled(
            " Live count unavailable",
            Style::default().fg(Color::DarkGray),
        )),
    };

    let mut lines = vec![live_line];

    match &app.data.peaks {
        Some(peaks) => {
            lines.push(Line::from(format!(" 24-hour peak:   {}", peaks.peak_24h)));
            lines.push(Line::from(format!(" All-time peak:  {}", peaks.peak_all_time)));
        }
        None => {
            lines.push(Line::from(Span::styled(
                " Peak figures unavailable",
                Style::default().fg(Color::DarkGray),
            )));
        }
    }

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

/// Renders the key hint footer
fn render_footer(frame: &mut Frame, area: Rect) {
    let footer = Paragraph::new(Line::from(Span::styled(
        " q quit | r refresh | p platform | ? help",
        Style::default().fg(Color::DarkGray),
    )));

    frame.render_widget(footer, area);
}
