//! Result list widget.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{
        Block, Borders, Paragraph, Scrollbar, ScrollbarOrientation, ScrollbarState, StatefulWidget,
        Widget, Wrap,
    },
};

use passfinder_core::{Badge, FacilityCard, ResultsBody, ResultsView};

use crate::tui::state::Outcome;

/// Widget for the cards of the latest search
pub struct ResultsWidget<'a> {
    outcome: Option<&'a Outcome>,
    pending: bool,
    scroll_offset: u16,
}

impl<'a> ResultsWidget<'a> {
    pub fn new(outcome: Option<&'a Outcome>) -> Self {
        Self {
            outcome,
            pending: false,
            scroll_offset: 0,
        }
    }

    pub fn pending(mut self, pending: bool) -> Self {
        self.pending = pending;
        self
    }

    pub fn scroll(mut self, offset: u16) -> Self {
        self.scroll_offset = offset;
        self
    }

    fn view_lines(view: &ResultsView) -> Vec<Line<'static>> {
        match &view.body {
            ResultsBody::Empty { notice } => vec![Line::from(Span::styled(
                format!("⚠ {}", notice),
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            ))],
            ResultsBody::Cards { heading, cards } => {
                let mut lines = vec![Line::from(Span::styled(
                    heading.clone(),
                    Style::default()
                        .fg(Color::White)
                        .add_modifier(Modifier::BOLD),
                ))];
                for card in cards {
                    Self::card_lines(card, &mut lines);
                }
                lines
            }
        }
    }

    fn card_lines(card: &FacilityCard, lines: &mut Vec<Line<'static>>) {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            "─".repeat(40),
            Style::default().fg(Color::DarkGray),
        )));
        lines.push(Line::from(Span::styled(
            card.title.clone(),
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )));

        let badge_color = match card.badge {
            Badge::Included => Color::Green,
            Badge::Excluded => Color::Red,
        };
        lines.push(Line::from(Span::styled(
            card.badge.label(),
            Style::default().fg(badge_color),
        )));

        for field in &card.fields {
            lines.push(Line::from(vec![
                Span::styled(
                    format!("{}: ", field.label),
                    Style::default()
                        .fg(Color::Yellow)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::raw(field.value.clone()),
            ]));
        }
    }
}

impl Widget for ResultsWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let failed = matches!(self.outcome, Some(Outcome::Failed(_)));
        let border_color = if failed { Color::Red } else { Color::Magenta };
        let title = if self.pending {
            " Results (searching...) "
        } else {
            " Results "
        };

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(border_color))
            .title(title);

        let inner_area = block.inner(area);
        block.render(area, buf);

        let lines = match self.outcome {
            Some(Outcome::Ready(view)) => Self::view_lines(view),
            Some(Outcome::Failed(message)) => vec![Line::from(Span::styled(
                message.clone(),
                Style::default().fg(Color::Red),
            ))],
            None => vec![Line::from(Span::styled(
                "Searching...",
                Style::default().fg(Color::DarkGray),
            ))],
        };

        let text = Text::from(lines);
        let content_height = text.height() as u16;
        let scroll = self.scroll_offset.min(content_height.saturating_sub(1));
        let paragraph = Paragraph::new(text)
            .wrap(Wrap { trim: false })
            .scroll((scroll, 0));

        paragraph.render(inner_area, buf);

        // Render scrollbar if content is larger than area
        if content_height > inner_area.height {
            let mut scrollbar_state = ScrollbarState::default()
                .content_length(content_height as usize)
                .position(scroll as usize)
                .viewport_content_length(inner_area.height as usize);

            let scrollbar = Scrollbar::new(ScrollbarOrientation::VerticalRight)
                .begin_symbol(Some("▲"))
                .end_symbol(Some("▼"));

            scrollbar.render(inner_area, buf, &mut scrollbar_state);
        }
    }
}
