//! In-memory view state. It holds a copy of the beer history that is only
//! resynchronised with the store at startup and after each insert or clear,
//! plus the detail selection and the last error shown to the user.

use crate::models::Beer;

/// Message shown for every failed fetch, whatever the underlying cause.
pub const FETCH_ERROR_MESSAGE: &str = "Failed to fetch beer data";

/// Coarse lifecycle of the history view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Nothing has been loaded from the store yet.
    Idle,
    Loaded,
    /// The last action failed; the list still shows what it had before.
    Error,
    Empty,
}

#[derive(Debug, Default)]
pub struct ViewState {
    beers: Vec<Beer>,
    selected: Option<i64>,
    error: Option<String>,
    loaded: bool,
    fetching: bool,
}

impl ViewState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the list with a fresh read of the store.
    pub fn load(&mut self, beers: Vec<Beer>) {
        self.beers = beers;
        self.loaded = true;
        if let Some(id) = self.selected {
            if !self.contains(id) {
                self.selected = None;
            }
        }
    }

    /// Mark a fetch as in flight. Returns `false` when one already is; the
    /// caller must then drop the new trigger.
    pub fn begin_fetch(&mut self) -> bool {
        if self.fetching {
            return false;
        }
        self.fetching = true;
        true
    }

    pub fn fetch_succeeded(&mut self, beer: Beer) {
        self.fetching = false;
        self.error = None;
        self.loaded = true;
        self.beers.push(beer);
    }

    pub fn fetch_failed(&mut self, message: impl Into<String>) {
        self.fetching = false;
        self.error = Some(message.into());
    }

    /// Record a store failure (insert or clear) without touching the list.
    /// An insert failure ends the fetch that produced the beer.
    pub fn storage_failed(&mut self, message: impl Into<String>) {
        self.fetching = false;
        self.error = Some(message.into());
    }

    pub fn clear(&mut self) {
        self.beers.clear();
        self.selected = None;
        self.error = None;
        self.loaded = true;
    }

    /// Select the beer with `id` for the detail view. Ids that are not in the
    /// list are refused and leave the current selection alone.
    pub fn select(&mut self, id: i64) -> bool {
        if self.contains(id) {
            self.selected = Some(id);
            true
        } else {
            false
        }
    }

    pub fn deselect(&mut self) {
        self.selected = None;
    }

    pub fn beers(&self) -> &[Beer] {
        &self.beers
    }

    pub fn selected(&self) -> Option<&Beer> {
        self.selected
            .and_then(|id| self.beers.iter().find(|beer| beer.id == id))
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn is_fetching(&self) -> bool {
        self.fetching
    }

    pub fn phase(&self) -> Phase {
        if !self.loaded {
            Phase::Idle
        } else if self.error.is_some() {
            Phase::Error
        } else if self.beers.is_empty() {
            Phase::Empty
        } else {
            Phase::Loaded
        }
    }

    fn contains(&self, id: i64) -> bool {
        self.beers.iter().any(|beer| beer.id == id)
    }
}
