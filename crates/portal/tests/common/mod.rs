//! Shared fixtures for the mock API tests.

#![allow(dead_code)]

use portal::{ApiClient, ApiUrl, ClientConfig};
use serde_json::{Value, json};
use wiremock::MockServer;

/// Build a client whose base URL points at the mock server's `/api`.
pub fn client_for(server: &MockServer) -> ApiClient {
    let base = ApiUrl::new(format!("{}/api", server.uri())).unwrap();
    ApiClient::new(ClientConfig::default().with_base_url(base)).unwrap()
}

/// Like [`client_for`], but every request goes to the network.
pub fn uncached_client_for(server: &MockServer) -> ApiClient {
    let base = ApiUrl::new(format!("{}/api", server.uri())).unwrap();
    let config = ClientConfig::default()
        .with_base_url(base)
        .with_cache_capacity(0);
    ApiClient::new(config).unwrap()
}

/// Absolute URL of `path` on the mock server, e.g. `api_url(&s, "character/1")`.
pub fn api_url(server: &MockServer, path: &str) -> String {
    format!("{}/api/{}", server.uri(), path)
}

pub fn character_json(server: &MockServer, id: u32) -> Value {
    json!({
        "id": id,
        "name": format!("Character {id}"),
        "status": "Alive",
        "species": "Human",
        "type": "",
        "gender": "unknown",
        "origin": {"name": "unknown", "url": ""},
        "location": {"name": "Earth (C-137)", "url": api_url(server, "location/1")},
        "image": api_url(server, &format!("character/avatar/{id}.jpeg")),
        "episode": [api_url(server, "episode/1")],
        "url": api_url(server, &format!("character/{id}")),
        "created": "2017-11-04T18:48:46.250Z"
    })
}

pub fn episode_json(server: &MockServer, id: u32, characters: &[String]) -> Value {
    json!({
        "id": id,
        "name": "Pilot",
        "air_date": "December 2, 2013",
        "episode": "S01E01",
        "characters": characters,
        "url": api_url(server, &format!("episode/{id}")),
        "created": "2017-11-10T12:56:33.798Z"
    })
}

/// A page of characters with ids in `ids`.
pub fn character_page(
    server: &MockServer,
    ids: std::ops::Range<u32>,
    count: u32,
    pages: u32,
    next: Option<String>,
    prev: Option<String>,
) -> Value {
    let results: Vec<Value> = ids.map(|id| character_json(server, id)).collect();
    json!({
        "info": {"count": count, "pages": pages, "next": next, "prev": prev},
        "results": results
    })
}
