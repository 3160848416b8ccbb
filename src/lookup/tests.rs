use super::*;

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use axum::Router;
use axum::extract::{Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::routing::get;
use axum::Json;
use serde_json::{Value, json};
use tokio::net::TcpListener;

async fn spawn_search_server(router: Router) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{addr}/search/")
}

fn client_for(url: String, token: Option<&str>) -> CourtListenerClient {
    let config = LookupConfig {
        search_url: url,
        token: token.map(str::to_string),
        timeout: Duration::from_secs(5),
        ..Default::default()
    };
    CourtListenerClient::new(&config).unwrap()
}

#[derive(Clone, Default)]
struct SearchState {
    requests: Arc<AtomicUsize>,
}

/// Knows `410 U.S. 113` by citation and `Roe v. Wade` by opinion text.
async fn search(
    State(state): State<SearchState>,
    Query(params): Query<HashMap<String, String>>,
) -> Json<Value> {
    state.requests.fetch_add(1, Ordering::SeqCst);

    let hit = match (params.get("cite"), params.get("q"), params.get("type")) {
        (Some(cite), _, _) => cite == "410 U.S. 113",
        (None, Some(q), Some(kind)) => q == "Roe v. Wade" && kind == "o",
        _ => false,
    };

    if hit {
        Json(json!({"count": 1, "results": [{"caseName": "Roe v. Wade"}]}))
    } else {
        Json(json!({"count": 0, "results": []}))
    }
}

async fn search_server(state: SearchState) -> String {
    let router = Router::new()
        .route("/search/", get(search))
        .with_state(state);
    spawn_search_server(router).await
}

#[tokio::test]
async fn test_found_by_citation() {
    let state = SearchState::default();
    let client = client_for(search_server(state.clone()).await, None);

    let outcome = client.lookup(&Citation::from("410 U.S. 113")).await.unwrap();

    assert!(outcome.found);
    assert!(!outcome.cached);
    assert_eq!(outcome.matches.len(), 1);
    assert_eq!(state.requests.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_found_by_opinion_search() {
    let state = SearchState::default();
    let client = client_for(search_server(state.clone()).await, None);

    let outcome = client.lookup(&Citation::from("Roe v. Wade")).await.unwrap();

    assert!(outcome.found);
    assert_eq!(state.requests.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn test_not_found_after_both_phases() {
    let state = SearchState::default();
    let client = client_for(search_server(state.clone()).await, None);

    let outcome = client
        .lookup(&Citation::from("Pringle v. JP Morgan Chase"))
        .await
        .unwrap();

    assert!(!outcome.found);
    assert!(outcome.matches.is_empty());
    assert_eq!(state.requests.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn test_error_status_is_failure_not_missing() {
    let router = Router::new().route(
        "/search/",
        get(|| async { (StatusCode::TOO_MANY_REQUESTS, "slow down") }),
    );
    let client = client_for(spawn_search_server(router).await, None);

    let err = client
        .lookup(&Citation::from("410 U.S. 113"))
        .await
        .unwrap_err();

    match err {
        LookupError::Status { status, body } => {
            assert_eq!(status, 429);
            assert_eq!(body, "slow down");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn test_malformed_body_is_invalid_response() {
    let router = Router::new().route("/search/", get(|| async { "not json" }));
    let client = client_for(spawn_search_server(router).await, None);

    let err = client
        .lookup(&Citation::from("410 U.S. 113"))
        .await
        .unwrap_err();
    assert!(matches!(err, LookupError::InvalidResponse(_)));
}

#[tokio::test]
async fn test_token_sent_in_authorization_header() {
    let router = Router::new().route(
        "/search/",
        get(|headers: HeaderMap| async move {
            let authorized = headers
                .get("authorization")
                .and_then(|v| v.to_str().ok())
                == Some("Token secret");
            if authorized {
                (StatusCode::OK, Json(json!({"count": 3, "results": []})))
            } else {
                (StatusCode::UNAUTHORIZED, Json(json!({"detail": "no"})))
            }
        }),
    );
    let url = spawn_search_server(router).await;

    let with_token = client_for(url.clone(), Some("secret"));
    let outcome = with_token.lookup(&Citation::from("1 F.3d 2")).await.unwrap();
    assert!(outcome.found);

    let without_token = client_for(url, None);
    assert!(without_token.lookup(&Citation::from("1 F.3d 2")).await.is_err());
}

#[tokio::test]
async fn test_empty_citation_rejected() {
    let client = client_for("http://127.0.0.1:9/search/".to_string(), None);
    let err = client.lookup(&Citation::from("   ")).await.unwrap_err();
    assert!(matches!(err, LookupError::EmptyCitation));
}

#[tokio::test]
async fn test_cache_serves_repeated_lookups() {
    let mock = Arc::new(MockCitationLookup::new().with_missing("Fake v. Case"));
    let cached = CachedLookup::new(mock.clone(), 100, Duration::from_secs(60));

    let first = cached.lookup(&Citation::from("Fake v. Case")).await.unwrap();
    let second = cached.lookup(&Citation::from("Fake v. Case")).await.unwrap();

    assert!(!first.found);
    assert!(!first.cached);
    assert!(!second.found);
    assert!(second.cached);
    assert_eq!(mock.calls(), 1);
    assert_eq!(cached.len(), 1);
    assert_eq!(cached.name(), "mock");
}

#[tokio::test]
async fn test_cache_does_not_store_failures() {
    let mock = Arc::new(MockCitationLookup::new().with_failure("1 F.3d 2"));
    let cached = CachedLookup::new(mock.clone(), 100, Duration::from_secs(60));

    assert!(cached.lookup(&Citation::from("1 F.3d 2")).await.is_err());
    assert!(cached.lookup(&Citation::from("1 F.3d 2")).await.is_err());

    assert_eq!(mock.calls(), 2);
    assert!(cached.is_empty());
}

#[tokio::test]
async fn test_mock_defaults() {
    let mock = MockCitationLookup::nothing_found();
    let outcome = mock.lookup(&Citation::from("410 U.S. 113")).await.unwrap();
    assert!(!outcome.found);

    let mock = MockCitationLookup::new();
    let outcome = mock.lookup(&Citation::from("410 U.S. 113")).await.unwrap();
    assert!(outcome.found);
}

#[test]
fn test_config_defaults() {
    let config = LookupConfig::default();

    assert!(config.enabled);
    assert_eq!(config.search_url, config::DEFAULT_SEARCH_URL);
    assert!(config.token.is_none());
    assert!(config.caching_enabled());
    assert!(config.validate().is_ok());
}

#[test]
fn test_config_validation() {
    let config = LookupConfig {
        search_url: " ".to_string(),
        ..Default::default()
    };
    assert!(matches!(config.validate(), Err(LookupError::Config(_))));

    let disabled = LookupConfig {
        enabled: false,
        search_url: String::new(),
        ..Default::default()
    };
    assert!(disabled.validate().is_ok());

    let no_cache = LookupConfig {
        cache_capacity: 0,
        ..Default::default()
    };
    assert!(!no_cache.caching_enabled());
}
