use anyhow::Result;
use crossterm::event::KeyCode;
use futures::FutureExt;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::prelude::*;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap};
use ratatui::Frame;
use tokio::runtime::Handle;
use tokio::task::{JoinError, JoinHandle};
use tracing::{info, warn};

use crate::error::{BeerError, FetchError};
use crate::models::BeerDetails;
use crate::repository::BeerRepository;
use crate::source::BeerSource;
use crate::state::{ViewState, FETCH_ERROR_MESSAGE};

use super::helpers::{detail_lines, surface_error};

/// Header space for the title and the history counter.
const HEADER_HEIGHT: u16 = 3;
/// Footer space reserved for status messages and instructions.
const FOOTER_HEIGHT: u16 = 3;

/// Holds the footer message text plus its severity.
struct StatusMessage {
    text: String,
    kind: StatusKind,
}

/// Severity levels shown in the footer.
enum StatusKind {
    Info,
    Error,
}

impl StatusKind {
    fn style(&self) -> Style {
        match self {
            StatusKind::Info => Style::default().fg(Color::Green),
            StatusKind::Error => Style::default().fg(Color::Red),
        }
    }
}

/// Central application state shared across the TUI. The repository (and with
/// it the SQLite connection) lives on the UI thread; only the HTTP request is
/// handed to the runtime.
pub struct App<S> {
    repository: BeerRepository<S>,
    state: ViewState,
    cursor: usize,
    runtime: Handle,
    pending: Option<JoinHandle<Result<BeerDetails, FetchError>>>,
    status: Option<StatusMessage>,
}

impl<S: BeerSource> App<S> {
    /// Build the app and hydrate the view from the store. A store that cannot
    /// be read at startup is fatal.
    pub fn new(repository: BeerRepository<S>, runtime: Handle) -> Result<Self> {
        let mut state = ViewState::new();
        state.load(repository.load_all()?);
        info!(beers = state.beers().len(), "loaded beer history");

        Ok(Self {
            repository,
            state,
            cursor: 0,
            runtime,
            pending: None,
            status: None,
        })
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    pub fn repository(&self) -> &BeerRepository<S> {
        &self.repository
    }

    /// React to one key press. Returns `true` when the user asked to quit.
    pub fn handle_key(&mut self, code: KeyCode) -> Result<bool> {
        match code {
            KeyCode::Char('q') => return Ok(true),
            KeyCode::Esc => {
                if self.state.selected().is_some() {
                    self.state.deselect();
                } else {
                    return Ok(true);
                }
            }
            KeyCode::Char('f') => self.start_fetch(),
            KeyCode::Char('c') => self.clear_history(),
            KeyCode::Up => self.move_cursor(-1),
            KeyCode::Down => self.move_cursor(1),
            KeyCode::Enter => self.select_current(),
            _ => {}
        }
        Ok(false)
    }

    /// Called once per loop iteration; picks up a finished fetch without
    /// blocking the draw loop.
    pub fn tick(&mut self) {
        let Some(handle) = self.pending.as_mut() else {
            return;
        };
        if let Some(joined) = handle.now_or_never() {
            self.pending = None;
            self.finish_fetch(joined);
        }
    }

    /// Block until the in-flight fetch (if any) completes and apply it.
    #[cfg(test)]
    pub(crate) fn wait_for_fetch(&mut self) {
        if let Some(handle) = self.pending.take() {
            let joined = self.runtime.block_on(handle);
            self.finish_fetch(joined);
        }
    }

    /// Drop any in-flight request. Nothing has been written for it yet, so
    /// abandoning it leaves the store consistent.
    pub fn shutdown(&mut self) {
        if let Some(handle) = self.pending.take() {
            warn!("abandoning in-flight beer fetch on exit");
            handle.abort();
        }
    }

    pub fn into_repository(mut self) -> BeerRepository<S> {
        self.shutdown();
        self.repository
    }

    fn start_fetch(&mut self) {
        if !self.state.begin_fetch() {
            self.set_status("A fetch is already in progress.", StatusKind::Info);
            return;
        }

        info!("fetching a random beer");
        let source = self.repository.source_handle();
        self.pending = Some(self.runtime.spawn(async move { source.fetch_beer().await }));
        self.set_status("Fetching a random beer...", StatusKind::Info);
    }

    fn finish_fetch(
        &mut self,
        joined: Result<Result<BeerDetails, FetchError>, JoinError>,
    ) {
        let fetched = joined.unwrap_or_else(|err| {
            warn!(error = %err, "beer fetch task failed");
            Err(FetchError::Interrupted)
        });

        match self.repository.store_fetched(fetched) {
            Ok(beer) => {
                let message = format!("Added {}.", beer.summary());
                self.state.fetch_succeeded(beer);
                self.cursor = self.state.beers().len().saturating_sub(1);
                self.set_status(message, StatusKind::Info);
            }
            Err(BeerError::Fetch(_)) => {
                self.state.fetch_failed(FETCH_ERROR_MESSAGE);
                self.clear_status();
            }
            Err(err @ BeerError::Storage(_)) => {
                self.state
                    .storage_failed(format!("Failed to save beer: {}", surface_error(&err)));
                self.clear_status();
            }
        }
    }

    fn clear_history(&mut self) {
        if self.state.is_fetching() {
            self.set_status("Wait for the current fetch to finish.", StatusKind::Info);
            return;
        }

        match self.repository.clear_all() {
            Ok(()) => {
                self.state.clear();
                self.cursor = 0;
                self.set_status("Cleared beer history.", StatusKind::Info);
            }
            Err(err) => {
                self.state
                    .storage_failed(format!("Failed to clear beers: {}", surface_error(&err)));
                self.clear_status();
            }
        }
    }

    fn select_current(&mut self) {
        let Some(id) = self.state.beers().get(self.cursor).map(|beer| beer.id) else {
            self.set_status("No beer selected.", StatusKind::Error);
            return;
        };
        self.state.select(id);
        self.clear_status();
    }

    fn move_cursor(&mut self, offset: isize) {
        let len = self.state.beers().len();
        if len == 0 {
            self.cursor = 0;
            return;
        }
        let next = (self.cursor as isize + offset).clamp(0, len as isize - 1);
        self.cursor = next as usize;
    }

    pub(crate) fn draw(&self, frame: &mut Frame) {
        let area = frame.area();
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(HEADER_HEIGHT.min(area.height)),
                Constraint::Min(0),
                Constraint::Length(FOOTER_HEIGHT),
            ])
            .split(area);

        self.draw_header(frame, chunks[0]);

        if self.state.selected().is_some() {
            let columns = Layout::default()
                .direction(Direction::Horizontal)
                .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
                .split(chunks[1]);
            self.draw_history(frame, columns[0]);
            self.draw_detail(frame, columns[1]);
        } else {
            self.draw_history(frame, chunks[1]);
        }

        self.draw_footer(frame, chunks[2]);
    }

    fn draw_header(&self, frame: &mut Frame, area: Rect) {
        let mut spans = vec![
            Span::styled("Beer Cellar", Style::default().add_modifier(Modifier::BOLD)),
            Span::raw(format!("  •  {} beers stored", self.state.beers().len())),
        ];
        if self.state.is_fetching() {
            spans.push(Span::styled(
                "  •  fetching...",
                Style::default().fg(Color::Yellow),
            ));
        }

        let header = Paragraph::new(Line::from(spans))
            .alignment(Alignment::Left)
            .block(Block::default().borders(Borders::ALL));
        frame.render_widget(header, area);
    }

    fn draw_history(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default().borders(Borders::ALL).title("History");

        if self.state.beers().is_empty() {
            let message = Paragraph::new("No beers yet. Press 'f' to fetch one.")
                .alignment(Alignment::Center)
                .block(block);
            frame.render_widget(message, area);
            return;
        }

        let selected_id = self.state.selected().map(|beer| beer.id);
        let items: Vec<ListItem> = self
            .state
            .beers()
            .iter()
            .map(|beer| {
                let marker = if Some(beer.id) == selected_id { "*" } else { " " };
                ListItem::new(format!("{marker} #{:<4} {}", beer.id, beer.summary()))
            })
            .collect();

        let list = List::new(items)
            .block(block)
            .highlight_style(Style::default().fg(Color::Yellow))
            .highlight_symbol("▶ ");

        let mut list_state = ListState::default();
        list_state.select(Some(self.cursor));
        frame.render_stateful_widget(list, area, &mut list_state);
    }

    fn draw_detail(&self, frame: &mut Frame, area: Rect) {
        let Some(beer) = self.state.selected() else {
            return;
        };

        let detail = Paragraph::new(detail_lines(beer))
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(format!("Beer #{}", beer.id)),
            )
            .wrap(Wrap { trim: true });
        frame.render_widget(detail, area);
    }

    fn draw_footer(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default().borders(Borders::TOP);
        frame.render_widget(block.clone(), area);
        let inner = block.inner(area);

        let status_line = if let Some(error) = self.state.error() {
            Line::from(vec![Span::styled(
                error.to_string(),
                StatusKind::Error.style(),
            )])
        } else if let Some(status) = &self.status {
            Line::from(vec![Span::styled(status.text.clone(), status.kind.style())])
        } else {
            Line::from("")
        };

        let paragraph = Paragraph::new(vec![status_line, self.footer_instructions()])
            .wrap(Wrap { trim: true });
        frame.render_widget(paragraph, inner);
    }

    fn footer_instructions(&self) -> Line<'static> {
        let key_style = Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD);
        let esc_label = if self.state.selected().is_some() {
            " Close Detail   "
        } else {
            " Quit   "
        };
        Line::from(vec![
            Span::styled("[f]", key_style),
            Span::raw(" Fetch Beer   "),
            Span::styled("[c]", key_style),
            Span::raw(" Clear   "),
            Span::styled("[↑↓]", key_style),
            Span::raw(" Navigate   "),
            Span::styled("[Enter]", key_style),
            Span::raw(" Details   "),
            Span::styled("[Esc]", key_style),
            Span::raw(esc_label),
            Span::styled("[q]", key_style),
            Span::raw(" Quit"),
        ])
    }

    fn set_status<T: Into<String>>(&mut self, text: T, kind: StatusKind) {
        self.status = Some(StatusMessage {
            text: text.into(),
            kind,
        });
    }

    fn clear_status(&mut self) {
        self.status = None;
    }
}
