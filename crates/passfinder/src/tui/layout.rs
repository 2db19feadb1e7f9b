//! Layout calculations for the TUI.

use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Main layout areas
pub struct MainLayout {
    pub header: Rect,
    pub input: Rect,
    pub status: Rect,
    pub results: Rect,
    pub footer: Rect,
}

impl MainLayout {
    /// Calculate the main layout from the terminal area
    pub fn new(area: Rect) -> Self {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(4), // Title + subtitle
                Constraint::Length(3), // Search input
                Constraint::Length(1), // Status line
                Constraint::Min(5),    // Results
                Constraint::Length(3), // Footer
            ])
            .split(area);

        Self {
            header: chunks[0],
            input: chunks[1],
            status: chunks[2],
            results: chunks[3],
            footer: chunks[4],
        }
    }
}
