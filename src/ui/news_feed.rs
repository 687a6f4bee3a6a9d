//! News feed panel rendering
//!
//! Renders the latest news items with title, publish date, and teaser text.
//! An item whose publish date failed to parse is shown with an unknown date
//! rather than hidden.

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use chrono::NaiveDateTime;

use crate::app::App;

/// Formats a publish timestamp for display
fn format_pub_date(published: Option<NaiveDateTime>) -> String {
    match published {
        Some(date) => format!("Published on {}", date.format("%Y-%m-%d")),
        None => "Publish date unknown".to_string(),
    }
}

/// Renders the news panel into the given area
pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let block = Block::default().title(" News ").borders(Borders::ALL);

    let lines: Vec<Line> = match &app.data.news {
        Some(feed) if !feed.items.is_empty() => {
            let mut lines = Vec::new();
            for item in &feed.items {
                lines.push(Line::from(Span::styled(
                    format!(" {}", item.title),
                    Style::default()
                        .fg(Color::Cyan)
                        .add_modifier(Modifier::BOLD),
                )));
                lines.push(Line::from(Span::styled(
                    format!(" {}", format_pub_date(item.published)),
                    Style::default().fg(Color::DarkGray),
                )));
                lines.push(Line::from(format!(" {}", item.description)));
                lines.push(Line::from(""));
            }
            lines
        }
        Some(_) => vec![Line::from(Span::styled(
            " No news items",
            Style::default().fg(Color::DarkGray),
        ))],
        None => vec![Line::from(Span::styled(
            " News unavailable",
            Style::default().fg(Color::DarkGray),
        ))],
    };

    let paragraph = Paragraph::new(lines).block(block).wrap(Wrap { trim: false });

    frame.render_widget(paragraph, area);
}
