//! Search input widget.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};

use passfinder_core::{INPUT_HELP, INPUT_LABEL, INPUT_PLACEHOLDER};

/// Text input widget with cursor
pub struct SearchInput<'a> {
    value: &'a str,
    cursor_position: usize,
}

impl<'a> SearchInput<'a> {
    pub fn new(value: &'a str, cursor_position: usize) -> Self {
        Self {
            value,
            cursor_position,
        }
    }
}

impl Widget for SearchInput<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Green))
            .title(format!(" {} ", INPUT_LABEL))
            .title_bottom(Line::from(Span::styled(
                format!(" {} ", INPUT_HELP),
                Style::default().fg(Color::DarkGray),
            )));

        let inner_area = block.inner(area);
        block.render(area, buf);

        let cursor_style = Style::default().bg(Color::White).fg(Color::Black);

        let display = if self.value.is_empty() {
            Line::from(vec![
                Span::styled(" ", cursor_style),
                Span::styled(INPUT_PLACEHOLDER, Style::default().fg(Color::DarkGray)),
            ])
        } else {
            let before: String = self.value.chars().take(self.cursor_position).collect();
            let cursor_char = self.value.chars().nth(self.cursor_position).unwrap_or(' ');
            let after: String = self.value.chars().skip(self.cursor_position + 1).collect();

            Line::from(vec![
                Span::raw(before),
                Span::styled(cursor_char.to_string(), cursor_style),
                Span::raw(after),
            ])
        };

        Paragraph::new(display).render(inner_area, buf);
    }
}
