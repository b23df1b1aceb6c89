//! Fetch command implementation.

use anyhow::{Context, Result};
use clap::Args;
use serde_json::Value;

use portal::ApiClient;

use crate::output;

#[derive(Args, Debug)]
pub struct FetchArgs {
    /// Absolute URL, e.g. one taken from a `next` or reference field
    pub url: String,

    /// Pretty-print JSON output
    #[arg(long)]
    pub pretty: bool,
}

pub async fn run(args: FetchArgs, client: ApiClient) -> Result<()> {
    let value: Value = client
        .follow(&args.url)
        .await
        .with_context(|| format!("Failed to fetch {}", args.url))?;

    output::json(&value, args.pretty)
}
