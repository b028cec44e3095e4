//! Terminal front end: system menu prompts and the paginated browse screen

pub mod browser;
pub mod prompt;
mod ui;

pub use browser::{BrowseEvent, BrowseState, Browser};

use anyhow::{bail, Result};
use crossterm::{
    cursor::MoveTo,
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{
        disable_raw_mode, enable_raw_mode, Clear, ClearType, EnterAlternateScreen,
        LeaveAlternateScreen,
    },
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;

/// Map a key press to a browse event
pub fn browse_event(key: &KeyEvent) -> Option<BrowseEvent> {
    match key.code {
        KeyCode::Left | KeyCode::PageUp | KeyCode::Char('h') => Some(BrowseEvent::Previous),
        KeyCode::Right | KeyCode::PageDown | KeyCode::Char('l') => Some(BrowseEvent::Next),
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc | KeyCode::Enter => {
            Some(BrowseEvent::Confirm)
        }
        _ => None,
    }
}

/// Clear the visible screen
pub fn clear_screen() -> Result<()> {
    execute!(io::stdout(), Clear(ClearType::All), MoveTo(0, 0))?;
    Ok(())
}

/// Full-screen wrapper for the browse step
pub struct Tui {
    terminal: Terminal<CrosstermBackend<io::Stdout>>,
}

impl Tui {
    /// Create a new TUI instance
    pub fn new() -> Result<Self> {
        let backend = CrosstermBackend::new(io::stdout());
        let terminal = Terminal::new(backend)?;
        Ok(Self { terminal })
    }

    /// Set up the terminal
    fn setup(&mut self) -> Result<()> {
        enable_raw_mode()?;
        execute!(self.terminal.backend_mut(), EnterAlternateScreen)?;
        self.terminal.hide_cursor()?;
        Ok(())
    }

    /// Restore the terminal
    fn restore(&mut self) -> Result<()> {
        disable_raw_mode()?;
        execute!(self.terminal.backend_mut(), LeaveAlternateScreen)?;
        self.terminal.show_cursor()?;
        Ok(())
    }

    /// Page through `browser` until the user confirms
    pub fn browse(&mut self, browser: &mut Browser, heading: &str) -> Result<()> {
        self.setup()?;
        let result = self.event_loop(browser, heading);
        self.restore()?;
        result
    }

    fn event_loop(&mut self, browser: &mut Browser, heading: &str) -> Result<()> {
        while browser.state() != BrowseState::Selecting {
            self.terminal.draw(|f| ui::draw(f, browser, heading))?;

            let Event::Key(key) = event::read()? else {
                continue;
            };
            if key.kind != KeyEventKind::Press {
                continue;
            }
            if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
                bail!("Browsing cancelled");
            }

            if let Some(event) = browse_event(&key) {
                tracing::trace!("Browse event {:?}", event);
                browser.handle(event);
            }
        }

        Ok(())
    }
}
