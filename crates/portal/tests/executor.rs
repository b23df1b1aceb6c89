//! Request executor tests against a mock API.
//!
//! These tests use wiremock to simulate the API and count network calls, so
//! cache behavior is observable without real network access.

mod common;

use portal::{Character, EndpointKind, Error, Location, Page, Request};
use serde_json::json;
use tokio::sync::oneshot;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use common::{api_url, character_json, character_page, client_for};

// ============================================================================
// Cache Tests
// ============================================================================

#[tokio::test]
async fn test_second_execute_is_served_from_cache() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/character/1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(character_json(&server, 1)))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);

    let first: Character = client.get(1).await.unwrap();
    let second: Character = client.get(1).await.unwrap();

    assert_eq!(first, second);
    assert_eq!(client.cache().len(EndpointKind::Character), 1);
}

#[tokio::test]
async fn test_equivalent_requests_share_a_cache_entry() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/character"))
        .and(query_param("page", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(character_page(
            &server,
            21..23,
            22,
            2,
            None,
            Some(api_url(&server, "character?page=1")),
        )))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);

    let by_endpoint: Page<Character> = client
        .execute(&Request::page(EndpointKind::Character, 2))
        .await
        .unwrap();
    let by_url: Page<Character> = client
        .follow(&api_url(&server, "character?page=2"))
        .await
        .unwrap();

    assert_eq!(by_endpoint.results, by_url.results);
}

#[tokio::test]
async fn test_server_next_link_reuses_filtered_page() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/character"))
        .and(query_param("page", "2"))
        .and(query_param("name", "rick"))
        .respond_with(ResponseTemplate::new(200).set_body_json(character_page(
            &server,
            21..23,
            22,
            2,
            None,
            Some(api_url(&server, "character?page=1&name=rick")),
        )))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);

    let local: Page<Character> = client
        .execute(
            &Request::new(EndpointKind::Character)
                .query("page", "2")
                .query("name", "rick"),
        )
        .await
        .unwrap();
    let linked: Page<Character> = client
        .follow(&api_url(&server, "character?page=2&name=rick"))
        .await
        .unwrap();

    assert_eq!(local.results, linked.results);
    assert_eq!(client.cache().len(EndpointKind::Character), 1);
}

#[tokio::test]
async fn test_cached_bytes_serve_a_different_shape() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/character/7"))
        .respond_with(ResponseTemplate::new(200).set_body_json(character_json(&server, 7)))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);

    let typed: Character = client.get(7).await.unwrap();
    let raw: serde_json::Value = client
        .execute(&Request::item(EndpointKind::Character, 7))
        .await
        .unwrap();

    assert_eq!(raw["name"], typed.name.as_str());
}

#[tokio::test]
async fn test_decode_failure_is_not_cached() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/location/1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": "not-a-number"})))
        .expect(2)
        .mount(&server)
        .await;

    let client = client_for(&server);

    let err = client.get::<Location>(1).await.unwrap_err();
    assert!(err.is_decode());
    assert_eq!(client.cache().len(EndpointKind::Location), 0);

    // A shape that accepts the body succeeds and only then populates the cache
    let raw: serde_json::Value = client
        .execute(&Request::item(EndpointKind::Location, 1))
        .await
        .unwrap();
    assert_eq!(raw["id"], "not-a-number");
    assert_eq!(client.cache().len(EndpointKind::Location), 1);
}

#[tokio::test]
async fn test_urls_outside_the_api_bypass_the_cache() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/mirror/character/1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(character_json(&server, 1)))
        .expect(2)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let url = format!("{}/mirror/character/1", server.uri());

    client.follow::<Character>(&url).await.unwrap();
    client.follow::<Character>(&url).await.unwrap();

    assert!(client.cache().is_empty());
}

// ============================================================================
// Error Handling Tests
// ============================================================================

#[tokio::test]
async fn test_non_success_status_is_a_transport_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/character/9999"))
        .respond_with(
            ResponseTemplate::new(404).set_body_json(json!({"error": "Character not found"})),
        )
        .expect(2)
        .mount(&server)
        .await;

    let client = client_for(&server);

    let err = client.get::<Character>(9999).await.unwrap_err();
    assert_eq!(err.status(), Some(404));
    assert!(matches!(err, Error::Transport(_)));

    // Failures are never cached, so a retry goes back to the network
    assert!(client.get::<Character>(9999).await.is_err());
}

#[tokio::test]
async fn test_empty_body_is_no_body() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/episode/1"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    let client = client_for(&server);

    let err = client
        .execute::<serde_json::Value>(&Request::item(EndpointKind::Episode, 1))
        .await
        .unwrap_err();
    assert!(matches!(err, Error::NoBody { .. }));
}

#[tokio::test]
async fn test_connection_refused_is_a_transport_error() {
    let server = MockServer::start().await;
    let client = client_for(&server);
    drop(server);

    let err = client.get::<Character>(1).await.unwrap_err();
    assert!(matches!(err, Error::Transport(_)));
}

#[tokio::test]
async fn test_malformed_follow_url_never_reaches_the_network() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let err = client
        .follow::<Character>("https//missing-colon")
        .await
        .unwrap_err();
    assert!(err.is_invalid_url());
}

// ============================================================================
// Typed Helpers
// ============================================================================

#[tokio::test]
async fn test_list_first_page_without_more() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/character"))
        .respond_with(ResponseTemplate::new(200).set_body_json(character_page(
            &server,
            1..21,
            20,
            1,
            None,
            None,
        )))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let page = client.list::<Character>().await.unwrap();

    assert_eq!(page.info.count, 20);
    assert_eq!(page.info.pages, 1);
    assert!(page.info.next.is_none());
    assert!(page.info.prev.is_none());
    assert_eq!(page.results.len(), 20);
}

#[tokio::test]
async fn test_filter_sends_query_items() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/character"))
        .and(query_param("name", "rick"))
        .and(query_param("status", "alive"))
        .respond_with(ResponseTemplate::new(200).set_body_json(character_page(
            &server,
            1..3,
            2,
            1,
            None,
            None,
        )))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let page = client
        .filter::<Character>(&[("status", "alive"), ("name", "rick")])
        .await
        .unwrap();

    assert_eq!(page.results.len(), 2);
}

#[tokio::test]
async fn test_spawn_execute_delivers_through_callback() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/character/2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(character_json(&server, 2)))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let (tx, rx) = oneshot::channel();

    client.spawn_execute::<Character, _>(
        Request::item(EndpointKind::Character, 2),
        move |result| {
            let _ = tx.send(result.map(|c| c.id));
        },
    );

    assert_eq!(rx.await.unwrap().unwrap(), 2);
}
