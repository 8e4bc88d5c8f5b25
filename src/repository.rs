//! Coordination between the remote beer source and the local store. The
//! repository owns both, so there is exactly one store handle per process and
//! its lifetime is tied to the repository's.

use std::sync::Arc;

use tracing::{info, warn};

use crate::db::BeerStore;
use crate::error::{BeerError, FetchError};
use crate::models::{Beer, BeerDetails};
use crate::source::BeerSource;

pub struct BeerRepository<S> {
    store: BeerStore,
    source: Arc<S>,
}

impl<S: BeerSource> BeerRepository<S> {
    pub fn new(store: BeerStore, source: S) -> Self {
        Self {
            store,
            source: Arc::new(source),
        }
    }

    /// Call the source once and persist whatever it returned. Failures never
    /// touch the store.
    pub async fn fetch_and_store_one(&self) -> Result<Beer, BeerError> {
        let fetched = self.source.fetch_beer().await;
        self.store_fetched(fetched)
    }

    /// Insert half of [`BeerRepository::fetch_and_store_one`], for callers that
    /// ran the network request elsewhere (the TUI spawns it on the runtime so
    /// the draw loop keeps ticking).
    pub fn store_fetched(
        &self,
        fetched: Result<BeerDetails, FetchError>,
    ) -> Result<Beer, BeerError> {
        let details = fetched.inspect_err(|err| warn!(error = %err, "beer fetch failed"))?;
        let beer = self
            .store
            .insert(&details)
            .inspect_err(|err| warn!(error = %err, "failed to persist fetched beer"))?;
        info!(id = beer.id, "fetched and stored beer");
        Ok(beer)
    }

    pub fn load_all(&self) -> Result<Vec<Beer>, BeerError> {
        Ok(self.store.list_all()?)
    }

    pub fn clear_all(&self) -> Result<(), BeerError> {
        let deleted = self.store.delete_all()?;
        info!(deleted, "cleared beer history");
        Ok(())
    }

    /// Shared handle to the source so a request can run on another task while
    /// the store stays on the caller's thread.
    pub fn source_handle(&self) -> Arc<S> {
        Arc::clone(&self.source)
    }

    pub fn store(&self) -> &BeerStore {
        &self.store
    }

    pub fn close(self) -> Result<(), BeerError> {
        Ok(self.store.close()?)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use std::collections::VecDeque;
    use std::sync::Mutex;

    use async_trait::async_trait;

    use super::*;

    /// Source that replays a fixed script of responses and counts calls.
    #[derive(Default)]
    pub(crate) struct ScriptedSource {
        responses: Mutex<VecDeque<Result<BeerDetails, FetchError>>>,
        calls: Mutex<usize>,
    }

    impl ScriptedSource {
        pub(crate) fn new(
            responses: impl IntoIterator<Item = Result<BeerDetails, FetchError>>,
        ) -> Self {
            Self {
                responses: Mutex::new(responses.into_iter().collect()),
                calls: Mutex::new(0),
            }
        }

        pub(crate) fn calls(&self) -> usize {
            *self.calls.lock().unwrap()
        }
    }

    #[async_trait]
    impl BeerSource for ScriptedSource {
        async fn fetch_beer(&self) -> Result<BeerDetails, FetchError> {
            *self.calls.lock().unwrap() += 1;
            self.responses
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or(Err(FetchError::Status(503)))
        }
    }

    pub(crate) fn odell() -> BeerDetails {
        BeerDetails {
            brand: Some("Odell".into()),
            name: Some("IPA".into()),
            style: Some("India Pale Ale".into()),
            hop: Some("Cascade".into()),
            yeast: Some("Ale".into()),
            malts: Some("Pale".into()),
            ibu: Some("70".into()),
            alcohol: Some("6.5".into()),
            blg: Some("14".into()),
        }
    }

    fn repository(source: ScriptedSource) -> BeerRepository<ScriptedSource> {
        let store = BeerStore::open_in_memory().unwrap();
        store.ensure_schema().unwrap();
        BeerRepository::new(store, source)
    }

    #[tokio::test]
    async fn successful_fetch_adds_exactly_one_row() {
        let repo = repository(ScriptedSource::new([Ok(odell())]));

        let beer = repo.fetch_and_store_one().await.unwrap();

        assert_eq!(beer.id, 1);
        assert_eq!(beer.details, odell());
        assert_eq!(repo.load_all().unwrap(), vec![beer]);
        assert_eq!(repo.source_handle().calls(), 1);
    }

    #[tokio::test]
    async fn failed_fetch_leaves_store_untouched() {
        let repo = repository(ScriptedSource::new([
            Ok(odell()),
            Err(FetchError::Status(500)),
        ]));

        repo.fetch_and_store_one().await.unwrap();
        let err = repo.fetch_and_store_one().await.unwrap_err();

        assert!(matches!(err, BeerError::Fetch(FetchError::Status(500))));
        assert_eq!(repo.store().count().unwrap(), 1);
        assert_eq!(repo.source_handle().calls(), 2);
    }

    #[tokio::test]
    async fn every_call_hits_the_source_exactly_once() {
        let repo = repository(ScriptedSource::new([Err(FetchError::Interrupted)]));
        assert!(repo.fetch_and_store_one().await.is_err());
        assert_eq!(repo.source_handle().calls(), 1);
    }

    #[test]
    fn store_failure_after_fetch_is_reported() {
        let store = BeerStore::open_in_memory().unwrap();
        let repo = BeerRepository::new(store, ScriptedSource::default());

        let err = repo.store_fetched(Ok(odell())).unwrap_err();
        assert!(matches!(err, BeerError::Storage(_)));
    }

    #[tokio::test]
    async fn clear_all_empties_store_from_any_state() {
        let repo = repository(ScriptedSource::new([Ok(odell()), Ok(odell())]));
        repo.clear_all().unwrap();
        assert!(repo.load_all().unwrap().is_empty());

        repo.fetch_and_store_one().await.unwrap();
        repo.clear_all().unwrap();
        assert!(repo.load_all().unwrap().is_empty());

        repo.fetch_and_store_one().await.unwrap();
        repo.store_fetched(Ok(BeerDetails::default())).unwrap();
        repo.clear_all().unwrap();
        assert_eq!(repo.store().count().unwrap(), 0);
    }

    #[tokio::test]
    async fn stored_ids_are_fresh() {
        let repo = repository(ScriptedSource::new([Ok(odell()), Ok(odell())]));
        let first = repo.fetch_and_store_one().await.unwrap();
        let second = repo.fetch_and_store_one().await.unwrap();
        assert_ne!(first.id, second.id);
        assert_eq!(first.details, second.details);
    }
}
