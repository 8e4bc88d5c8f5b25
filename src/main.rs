//! Binary entry point: resolve configuration, start logging, open the store,
//! hydrate the view and drive the Ratatui event loop until the user exits.
use anyhow::Context;
use beer_cellar::{logging, run_app, App, BeerRepository, BeerStore, Config, RandomBeerApi};
use tracing::{error, info};

/// Returning a `Result` bubbles fatal startup problems (an unwritable data
/// directory, a rejected schema) up to the terminal instead of crashing
/// silently.
fn main() -> anyhow::Result<()> {
    let config = Config::from_env().context("failed to resolve configuration")?;
    let _log_guard = logging::init(&config.log_dir)?;
    info!(
        database = %config.database_path.display(),
        endpoint = %config.endpoint,
        "starting beer cellar"
    );

    let runtime = tokio::runtime::Runtime::new().context("failed to start async runtime")?;

    let store = BeerStore::open(&config.database_path)?;
    store.ensure_schema()?;
    let repository = BeerRepository::new(store, RandomBeerApi::new(config.endpoint.clone()));

    let mut app = App::new(repository, runtime.handle().clone())?;
    let result = run_app(&mut app);

    if let Err(err) = app.into_repository().close() {
        error!(error = %err, "failed to close beer database");
    }
    info!("beer cellar stopped");
    result
}
