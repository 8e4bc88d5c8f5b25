//! The remote beer source. The production implementation is a thin reqwest
//! client around the public random-beer endpoint; tests swap in their own
//! [`BeerSource`] so the repository can be exercised without a network.

use async_trait::async_trait;
use tracing::debug;

use crate::error::FetchError;
use crate::models::BeerDetails;

/// Public endpoint that returns one randomly generated beer per request.
pub const DEFAULT_ENDPOINT: &str = "https://random-data-api.com/api/beer/random_beer";

/// Anything that can hand out one beer per call.
#[async_trait]
pub trait BeerSource: Send + Sync + 'static {
    async fn fetch_beer(&self) -> Result<BeerDetails, FetchError>;
}

/// HTTP client for the random beer API. One `GET`, no parameters, no retry and
/// no timeout beyond reqwest's defaults.
#[derive(Clone)]
pub struct RandomBeerApi {
    client: reqwest::Client,
    endpoint: String,
}

impl RandomBeerApi {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: endpoint.into(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl Default for RandomBeerApi {
    fn default() -> Self {
        Self::new(DEFAULT_ENDPOINT)
    }
}

#[async_trait]
impl BeerSource for RandomBeerApi {
    async fn fetch_beer(&self) -> Result<BeerDetails, FetchError> {
        debug!(url = %self.endpoint, "requesting random beer");

        let response = self
            .client
            .get(&self.endpoint)
            .send()
            .await
            .map_err(FetchError::Transport)?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }

        let body = response.bytes().await.map_err(FetchError::Transport)?;
        BeerDetails::from_json(&body).map_err(FetchError::Decode)
    }
}
