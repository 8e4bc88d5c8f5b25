//! Persistence module split across logical submodules.

mod beers;
mod connection;
mod store;

pub use beers::{count_beers, delete_all_beers, fetch_beers, insert_beer};
pub use connection::{ensure_schema, open_connection};
pub use store::BeerStore;
