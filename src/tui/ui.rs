//! Browse screen rendering

use super::browser::{BrowseState, Browser};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
    Frame,
};

/// Footer hint shown under every page
pub const NAV_HINT: &str = "Use ←/→ to navigate, Q/q to download game";

/// "Page x/y - ..." footer text
pub fn page_status(page: usize, total_pages: usize) -> String {
    format!("Page {}/{} - {}", page + 1, total_pages, NAV_HINT)
}

/// Draw the browse screen
pub fn draw(f: &mut Frame, browser: &Browser, heading: &str) {
    let page = match browser.state() {
        BrowseState::Browsing { page } => page,
        BrowseState::Selecting => return,
    };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(5),    // Page
            Constraint::Length(3), // Footer
        ])
        .split(f.area());

    draw_header(f, heading, browser.entries().len(), chunks[0]);
    draw_page(f, browser, page, chunks[1]);
    draw_footer(f, page, browser.total_pages(), chunks[2]);
}

fn draw_header(f: &mut Frame, heading: &str, count: usize, area: Rect) {
    let title = Line::from(vec![
        Span::styled(
            heading.to_string(),
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!("  ({} games)", count),
            Style::default().fg(Color::DarkGray),
        ),
    ]);

    let header = Paragraph::new(title)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(header, area);
}

fn draw_page(f: &mut Frame, browser: &Browser, page: usize, area: Rect) {
    let entries = browser.page_entries(page);

    let items: Vec<ListItem> = if entries.is_empty() {
        vec![ListItem::new(Span::styled(
            "No games found",
            Style::default().fg(Color::DarkGray),
        ))]
    } else {
        entries
            .iter()
            .map(|e| {
                ListItem::new(Line::from(vec![
                    Span::raw(format!("{}: ", e.title)),
                    Span::styled(e.vault_id.clone(), Style::default().fg(Color::Yellow)),
                ]))
            })
            .collect()
    };

    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Title: Vault ID "),
    );
    f.render_widget(list, area);
}

fn draw_footer(f: &mut Frame, page: usize, total_pages: usize, area: Rect) {
    let footer = Paragraph::new(page_status(page, total_pages))
        .style(Style::default().fg(Color::Gray))
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(footer, area);
}
