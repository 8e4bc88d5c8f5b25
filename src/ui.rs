//! Ratatui front-end: a single screen with the beer history on the left, the
//! selected beer's details on the right, and a footer for status and key hints.

mod app;
mod helpers;
mod terminal;

pub use app::App;
pub use terminal::run_app;
