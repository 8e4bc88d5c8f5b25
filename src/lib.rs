//! Core library surface for the Beer Cellar TUI: fetch a random beer, keep it
//! in a local SQLite history, browse and clear that history.
pub mod config;
pub mod db;
pub mod error;
pub mod logging;
pub mod models;
pub mod repository;
pub mod source;
pub mod state;
pub mod ui;

pub use config::Config;
pub use db::BeerStore;
pub use error::{BeerError, ConfigError, FetchError, StorageError};
pub use models::{Beer, BeerDetails};
pub use repository::BeerRepository;
pub use source::{BeerSource, RandomBeerApi};
pub use state::{Phase, ViewState};
pub use ui::{run_app, App};
