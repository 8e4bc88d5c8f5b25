//! Integration tests for the random beer source and repository using wiremock
//!
//! These tests run the real reqwest client against a mock HTTP server and an
//! in-memory store, covering the success path and the failure modes that must
//! leave the store untouched.

use beer_cellar::{
    BeerDetails, BeerError, BeerRepository, BeerSource, BeerStore, FetchError, RandomBeerApi,
};
use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const BEER_PATH: &str = "/api/beer/random_beer";

fn odell_body() -> serde_json::Value {
    json!({
        "id": 9183,
        "uid": "3c1c5b4e-5a7e-4bc6-9d5e-0f0a1f3b9c11",
        "brand": "Odell",
        "name": "IPA",
        "style": "India Pale Ale",
        "hop": "Cascade",
        "yeast": "Ale",
        "malts": "Pale",
        "ibu": "70",
        "alcohol": "6.5",
        "blg": "14"
    })
}

fn odell() -> BeerDetails {
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

fn api(server: &MockServer) -> RandomBeerApi {
    RandomBeerApi::new(format!("{}{}", server.uri(), BEER_PATH))
}

fn repository(server: &MockServer) -> BeerRepository<RandomBeerApi> {
    let store = BeerStore::open_in_memory().expect("in-memory store");
    store.ensure_schema().expect("schema");
    BeerRepository::new(store, api(server))
}

async fn mount(server: &MockServer, response: ResponseTemplate, times: u64) {
    Mock::given(method("GET"))
        .and(path(BEER_PATH))
        .respond_with(response)
        .expect(times)
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_fetch_beer_decodes_body() {
    let server = MockServer::start().await;
    mount(&server, ResponseTemplate::new(200).set_body_json(odell_body()), 1).await;

    let details = api(&server).fetch_beer().await.expect("should fetch beer");

    assert_eq!(details, odell());
}

#[tokio::test]
async fn test_fetch_beer_server_error() {
    let server = MockServer::start().await;
    mount(&server, ResponseTemplate::new(500), 1).await;

    let err = api(&server).fetch_beer().await.unwrap_err();

    assert!(matches!(err, FetchError::Status(500)));
}

#[tokio::test]
async fn test_fetch_beer_error_status_with_valid_body() {
    let server = MockServer::start().await;
    mount(&server, ResponseTemplate::new(404).set_body_json(odell_body()), 1).await;

    let err = api(&server).fetch_beer().await.unwrap_err();

    assert!(matches!(err, FetchError::Status(404)));
}

#[tokio::test]
async fn test_fetch_beer_malformed_body() {
    let server = MockServer::start().await;
    mount(
        &server,
        ResponseTemplate::new(200).set_body_string("<html>rate limited</html>"),
        1,
    )
    .await;

    let err = api(&server).fetch_beer().await.unwrap_err();

    assert!(matches!(err, FetchError::Decode(_)));
}

#[tokio::test]
async fn test_fetch_beer_unreachable_host() {
    // Grab a free port and release it so nothing is listening there.
    let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind");
    let port = listener.local_addr().expect("local addr").port();
    drop(listener);
    let endpoint = format!("http://127.0.0.1:{port}{BEER_PATH}");

    let err = RandomBeerApi::new(endpoint).fetch_beer().await.unwrap_err();

    assert!(matches!(err, FetchError::Transport(_)));
}

#[tokio::test]
async fn test_fetch_and_store_success_then_failure() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(BEER_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(odell_body()))
        .up_to_n_times(1)
        .expect(1)
        .mount(&server)
        .await;
    mount(&server, ResponseTemplate::new(500), 1).await;

    let repo = repository(&server);

    let beer = repo.fetch_and_store_one().await.expect("first fetch");
    assert_eq!(beer.id, 1);
    assert_eq!(beer.details, odell());

    let err = repo.fetch_and_store_one().await.unwrap_err();
    assert!(matches!(err, BeerError::Fetch(FetchError::Status(500))));

    let stored = repo.load_all().expect("load");
    assert_eq!(stored, vec![beer]);
}

#[tokio::test]
async fn test_malformed_body_does_not_touch_store() {
    let server = MockServer::start().await;
    mount(
        &server,
        ResponseTemplate::new(200).set_body_json(json!({ "brand": "Odell", "ibu": 70 })),
        1,
    )
    .await;

    let repo = repository(&server);
    let err = repo.fetch_and_store_one().await.unwrap_err();

    assert!(matches!(err, BeerError::Fetch(FetchError::Decode(_))));
    assert_eq!(repo.store().count().expect("count"), 0);
}

#[tokio::test]
async fn test_array_bodies_are_rejected_without_storing() {
    for body in [json!([]), json!(["Odell", "IPA"])] {
        let server = MockServer::start().await;
        mount(&server, ResponseTemplate::new(200).set_body_json(body.clone()), 1).await;

        let repo = repository(&server);
        let err = repo.fetch_and_store_one().await.unwrap_err();

        assert!(
            matches!(err, BeerError::Fetch(FetchError::Decode(_))),
            "body {body} should not decode, got {err:?}"
        );
        assert_eq!(repo.store().count().expect("count"), 0);
    }
}
