use super::*;
use axum::{
    http::{HeaderMap, StatusCode},
    routing::get,
    Router,
};
use tokio::net::TcpListener;

const BREEDS_JSON: &str = r#"[
    {"id": "abys", "name": "Abyssinian", "origin": "Egypt", "temperament": "Active, Energetic", "description": "Lean and lithe"},
    {"id": "beng", "name": "Bengal", "origin": "United States", "temperament": "Alert, Agile"}
]"#;

async fn spawn_server(app: Router) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("addr");
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    format!("http://{addr}/v1/breeds")
}

fn client(endpoint: &str) -> BreedApiClient {
    BreedApiClient::new(endpoint, Duration::from_secs(5)).expect("client")
}

#[tokio::test]
async fn fetches_and_maps_breed_records() {
    let endpoint = spawn_server(Router::new().route("/v1/breeds", get(|| async { BREEDS_JSON }))).await;

    let records = client(&endpoint).fetch_breeds().await.expect("fetch");

    assert_eq!(records.len(), 2);
    assert_eq!(records[0].name, "Abyssinian");
    assert_eq!(records[0].origin, "Egypt");
    assert_eq!(records[1].description, "", "missing description defaults to empty");
}

#[tokio::test]
async fn sends_api_key_header_when_configured() {
    let app = Router::new().route(
        "/v1/breeds",
        get(|headers: HeaderMap| async move {
            match headers.get("x-api-key").and_then(|v| v.to_str().ok()) {
                Some("secret-key") => (StatusCode::OK, BREEDS_JSON),
                _ => (StatusCode::UNAUTHORIZED, "[]"),
            }
        }),
    );
    let endpoint = spawn_server(app).await;

    let without_key = client(&endpoint).fetch_breeds().await;
    assert!(matches!(without_key, Err(FetchError::Status { status: 401 })));

    let with_key = client(&endpoint)
        .with_api_key("secret-key")
        .fetch_breeds()
        .await
        .expect("fetch with key");
    assert_eq!(with_key.len(), 2);
}

#[tokio::test]
async fn blank_api_key_is_ignored() {
    let client = client("http://127.0.0.1:9/v1/breeds").with_api_key("   ");
    assert!(client.api_key.is_none());
}

#[tokio::test]
async fn non_success_status_is_reported() {
    let app = Router::new().route(
        "/v1/breeds",
        get(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "boom") }),
    );
    let endpoint = spawn_server(app).await;

    let err = client(&endpoint).fetch_breeds().await.expect_err("status");

    assert!(matches!(err, FetchError::Status { status: 500 }));
}

#[tokio::test]
async fn non_json_body_is_a_decode_error() {
    let endpoint =
        spawn_server(Router::new().route("/v1/breeds", get(|| async { "<html>nope</html>" }))).await;

    let err = client(&endpoint).fetch_breeds().await.expect_err("decode");

    assert!(matches!(err, FetchError::Decode(_)));
}

#[tokio::test]
async fn load_or_empty_degrades_to_empty_list_on_failure() {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("addr");
    drop(listener);

    let client = client(&format!("http://{addr}/v1/breeds"));
    let outcome = load_or_empty(&client).await;

    assert!(outcome.records.is_empty());
    assert!(matches!(outcome.error, Some(FetchError::Transport(_))));
}

#[tokio::test]
async fn load_or_empty_passes_records_through_on_success() {
    let endpoint = spawn_server(Router::new().route("/v1/breeds", get(|| async { BREEDS_JSON }))).await;

    let outcome = load_or_empty(&client(&endpoint)).await;

    assert_eq!(outcome.records.len(), 2);
    assert!(outcome.error.is_none());
}

#[test]
fn rejects_invalid_endpoint() {
    let err = BreedApiClient::new("not a url", DEFAULT_REQUEST_TIMEOUT)
        .err()
        .expect("invalid endpoint");

    assert!(matches!(err, FetchError::InvalidEndpoint { .. }));
}
