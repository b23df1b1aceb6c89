#![allow(dead_code)]

use std::process::Output;

use serde_json::{Value, json};
use tokio::process::Command;
use wiremock::MockServer;

/// Base URL of the mock API.
pub fn api_base(server: &MockServer) -> String {
    format!("{}/api", server.uri())
}

/// Run the CLI binary against the mock API.
pub async fn run_cli(args: &[&str], server: &MockServer) -> Output {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_portal"));
    cmd.args(args);
    cmd.env("PORTAL_API_URL", api_base(server));
    cmd.env_remove("PORTAL_CACHE_CAPACITY");
    cmd.env_remove("PORTAL_TIMEOUT_SECS");
    cmd.env_remove("RUST_LOG");
    cmd.env("NO_COLOR", "1");
    cmd.output().await.expect("Failed to execute CLI")
}

/// Run the CLI and expect success, returning stdout.
pub async fn run_cli_success(args: &[&str], server: &MockServer) -> String {
    let output = run_cli(args, server).await;
    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        panic!("CLI command failed: {:?}\nstderr: {}", args, stderr);
    }
    String::from_utf8_lossy(&output.stdout).to_string()
}

/// Run the CLI and expect failure, returning stderr.
pub async fn run_cli_failure(args: &[&str], server: &MockServer) -> String {
    let output = run_cli(args, server).await;
    if output.status.success() {
        panic!("CLI command should have failed: {:?}", args);
    }
    String::from_utf8_lossy(&output.stderr).to_string()
}

pub fn character_json(server: &MockServer, id: u32) -> Value {
    let base = api_base(server);
    json!({
        "id": id,
        "name": format!("Character {id}"),
        "status": "Alive",
        "species": "Human",
        "type": "",
        "gender": "Male",
        "origin": {"name": "Earth (C-137)", "url": format!("{base}/location/1")},
        "location": {"name": "Citadel of Ricks", "url": format!("{base}/location/3")},
        "image": format!("{}/images/{id}.jpeg", server.uri()),
        "episode": [format!("{base}/episode/1"), format!("{base}/episode/2")],
        "url": format!("{base}/character/{id}"),
        "created": "2017-11-04T18:48:46.250Z"
    })
}

pub fn episode_json(server: &MockServer, id: u32) -> Value {
    let base = api_base(server);
    json!({
        "id": id,
        "name": format!("Episode {id}"),
        "air_date": "December 2, 2013",
        "episode": format!("S01E{id:02}"),
        "characters": [format!("{base}/character/1")],
        "url": format!("{base}/episode/{id}"),
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
) -> Value {
    let results: Vec<Value> = ids.map(|id| character_json(server, id)).collect();
    json!({
        "info": {"count": count, "pages": pages, "next": next, "prev": null},
        "results": results
    })
}
