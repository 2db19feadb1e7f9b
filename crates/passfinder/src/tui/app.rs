//! Main TUI application for interactive search.

use std::io::{self, Stdout};
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame, Terminal,
};
use tokio::sync::mpsc;

use passfinder_core::{run_search, status_line, PAGE_SUBTITLE, PAGE_TITLE};
use passfinder_db::FacilityStore;
use passfinder_logging::Logger;

use super::layout::MainLayout;
use super::state::{Outcome, QueryInput, SearchState};
use super::widgets::{ResultsWidget, SearchInput};

const SCROLL_PAGE: u16 = 10;

/// Reply from a background fetch
struct SearchReply {
    generation: u64,
    outcome: Outcome,
}

/// The main TUI application
pub struct App {
    store: Arc<FacilityStore>,
    logger: Arc<Logger>,
    input: QueryInput,
    search: SearchState,
    /// Result list scroll position
    scroll: u16,
    running: bool,
    replies_tx: mpsc::UnboundedSender<SearchReply>,
    replies_rx: mpsc::UnboundedReceiver<SearchReply>,
    terminal: Terminal<CrosstermBackend<Stdout>>,
}

impl App {
    /// Create a new TUI application
    pub fn new(store: FacilityStore, logger: Logger) -> Result<Self> {
        // Setup terminal
        enable_raw_mode().context("Failed to enable raw mode")?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen).context("Failed to enter alternate screen")?;
        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend).context("Failed to create terminal")?;

        let (replies_tx, replies_rx) = mpsc::unbounded_channel();

        Ok(Self {
            store: Arc::new(store),
            logger: Arc::new(logger),
            input: QueryInput::default(),
            search: SearchState::default(),
            scroll: 0,
            running: true,
            replies_tx,
            replies_rx,
            terminal,
        })
    }

    /// Run the TUI application until the user quits
    pub async fn run(&mut self) -> Result<()> {
        self.request_search();

        while self.running {
            self.drain_replies();
            self.draw()?;

            if event::poll(Duration::from_millis(50))? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key_event(key);
                    }
                }
            }
        }

        self.cleanup_terminal()
    }

    /// Fetch results for the current query on a blocking task.
    ///
    /// The store opens its own connection per call, so nothing is shared
    /// between requests except the channel back to the UI.
    fn request_search(&mut self) {
        let generation = self.search.begin();
        let query = self.input.value().to_string();
        let store = Arc::clone(&self.store);
        let logger = Arc::clone(&self.logger);
        let tx = self.replies_tx.clone();

        tokio::task::spawn_blocking(move || {
            let outcome = match run_search(&store, Some(query.as_str()), &logger) {
                Ok(view) => Outcome::Ready(view),
                Err(e) => Outcome::Failed(e.to_string()),
            };
            // Receiver only goes away on shutdown
            let _ = tx.send(SearchReply {
                generation,
                outcome,
            });
        });

        self.scroll = 0;
    }

    fn drain_replies(&mut self) {
        while let Ok(reply) = self.replies_rx.try_recv() {
            if !self.search.accept(reply.generation, reply.outcome) {
                tracing::debug!(generation = reply.generation, "dropped superseded reply");
            }
        }
    }

    /// Cleanup the terminal
    fn cleanup_terminal(&mut self) -> Result<()> {
        disable_raw_mode().context("Failed to disable raw mode")?;
        execute!(self.terminal.backend_mut(), LeaveAlternateScreen)
            .context("Failed to leave alternate screen")?;
        self.terminal
            .show_cursor()
            .context("Failed to show cursor")?;
        Ok(())
    }

    /// Draw the UI
    fn draw(&mut self) -> Result<()> {
        let render_state = RenderState {
            query: self.input.value(),
            cursor: self.input.cursor(),
            search: &self.search,
            scroll: self.scroll,
        };

        self.terminal.draw(|frame| {
            render_state.render(frame);
        })?;
        Ok(())
    }

    /// Handle a key event
    fn handle_key_event(&mut self, key: KeyEvent) {
        let changed = match (key.modifiers, key.code) {
            (KeyModifiers::CONTROL, KeyCode::Char('c'))
            | (KeyModifiers::CONTROL, KeyCode::Char('q')) => {
                self.running = false;
                false
            }
            (KeyModifiers::NONE | KeyModifiers::SHIFT, KeyCode::Char(c)) => self.input.insert(c),
            (_, KeyCode::Backspace) => self.input.backspace(),
            (_, KeyCode::Delete) => self.input.delete(),
            (_, KeyCode::Esc) => self.input.clear(),
            (_, KeyCode::Left) => {
                self.input.left();
                false
            }
            (_, KeyCode::Right) => {
                self.input.right();
                false
            }
            (_, KeyCode::Home) => {
                self.input.home();
                false
            }
            (_, KeyCode::End) => {
                self.input.end();
                false
            }
            (_, KeyCode::Up) => {
                self.scroll = self.scroll.saturating_sub(1);
                false
            }
            (_, KeyCode::Down) => {
                self.scroll = self.scroll.saturating_add(1);
                false
            }
            (_, KeyCode::PageUp) => {
                self.scroll = self.scroll.saturating_sub(SCROLL_PAGE);
                false
            }
            (_, KeyCode::PageDown) => {
                self.scroll = self.scroll.saturating_add(SCROLL_PAGE);
                false
            }
            _ => false,
        };

        if changed {
            self.request_search();
        }
    }
}

impl Drop for App {
    fn drop(&mut self) {
        // Try to restore terminal state
        let _ = disable_raw_mode();
        let _ = execute!(self.terminal.backend_mut(), LeaveAlternateScreen);
        let _ = self.terminal.show_cursor();
    }
}

/// State needed for rendering (to avoid borrow issues)
struct RenderState<'a> {
    query: &'a str,
    cursor: usize,
    search: &'a SearchState,
    scroll: u16,
}

impl RenderState<'_> {
    fn render(&self, frame: &mut Frame) {
        let layout = MainLayout::new(frame.area());

        self.render_header(frame, layout.header);
        frame.render_widget(SearchInput::new(self.query, self.cursor), layout.input);
        self.render_status(frame, layout.status);
        frame.render_widget(
            ResultsWidget::new(self.search.outcome())
                .pending(self.search.is_pending())
                .scroll(self.scroll),
            layout.results,
        );
        self.render_footer(frame, layout.footer);
    }

    fn render_header(&self, frame: &mut Frame, area: Rect) {
        let lines = vec![
            Line::from(Span::styled(
                PAGE_TITLE,
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                PAGE_SUBTITLE,
                Style::default().fg(Color::DarkGray),
            )),
        ];

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Blue));

        frame.render_widget(Paragraph::new(lines).block(block), area);
    }

    fn render_status(&self, frame: &mut Frame, area: Rect) {
        let status = Line::from(Span::styled(
            format!(" {}", status_line(Some(self.query))),
            Style::default().fg(Color::Green),
        ));
        frame.render_widget(Paragraph::new(status), area);
    }

    fn render_footer(&self, frame: &mut Frame, area: Rect) {
        let key = Style::default().bg(Color::DarkGray).fg(Color::White);
        let shortcuts = Line::from(vec![
            Span::styled(" Esc ", key),
            Span::raw(" Clear "),
            Span::styled(" ↑↓ ", key),
            Span::raw(" Scroll "),
            Span::styled(" PgUp/PgDn ", key),
            Span::raw(" Page "),
            Span::styled(" Ctrl+C ", key),
            Span::raw(" Quit "),
        ]);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray));

        frame.render_widget(Paragraph::new(shortcuts).block(block), area);
    }
}
