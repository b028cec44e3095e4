//! Paginated game list browsing

use crate::vault::GameEntry;

/// Where the browser is
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BrowseState {
    /// Showing a page (zero-based)
    Browsing { page: usize },
    /// User is done browsing and will type a vault ID
    Selecting,
}

/// Discrete input the browser reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BrowseEvent {
    Previous,
    Next,
    Confirm,
}

/// Pages through scraped entries a fixed number at a time
#[derive(Debug, Clone)]
pub struct Browser {
    entries: Vec<GameEntry>,
    page_size: usize,
    state: BrowseState,
    /// Last page shown; kept after Confirm
    page: usize,
}

impl Browser {
    pub fn new(entries: Vec<GameEntry>, page_size: usize) -> Self {
        Self {
            entries,
            page_size: page_size.max(1),
            state: BrowseState::Browsing { page: 0 },
            page: 0,
        }
    }

    pub fn state(&self) -> BrowseState {
        self.state
    }

    pub fn entries(&self) -> &[GameEntry] {
        &self.entries
    }

    /// Number of pages; an empty list still has one (empty) page
    pub fn total_pages(&self) -> usize {
        self.entries.len().div_ceil(self.page_size).max(1)
    }

    /// Entries on a zero-based page
    pub fn page_entries(&self, page: usize) -> &[GameEntry] {
        let start = (page * self.page_size).min(self.entries.len());
        let end = (start + self.page_size).min(self.entries.len());
        &self.entries[start..end]
    }

    /// Page the user was looking at, including after Confirm
    pub fn current_page(&self) -> usize {
        self.page
    }

    /// Entries of the current page
    pub fn current_page_entries(&self) -> &[GameEntry] {
        self.page_entries(self.page)
    }

    /// Apply an event; Previous/Next clamp at the first/last page and
    /// nothing moves once selecting.
    pub fn handle(&mut self, event: BrowseEvent) -> BrowseState {
        if let BrowseState::Browsing { page } = self.state {
            self.state = match event {
                BrowseEvent::Previous => BrowseState::Browsing {
                    page: page.saturating_sub(1),
                },
                BrowseEvent::Next => BrowseState::Browsing {
                    page: (page + 1).min(self.total_pages() - 1),
                },
                BrowseEvent::Confirm => BrowseState::Selecting,
            };
            if let BrowseState::Browsing { page } = self.state {
                self.page = page;
            }
        }
        self.state
    }

    /// Feed a scripted sequence of events, returning the final state
    #[cfg(test)]
    pub fn run<I>(&mut self, events: I) -> BrowseState
    where
        I: IntoIterator<Item = BrowseEvent>,
    {
        for event in events {
            if self.handle(event) == BrowseState::Selecting {
                break;
            }
        }
        self.state
    }
}
