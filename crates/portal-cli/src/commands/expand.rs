//! Expand command implementation.
//!
//! Fetches one entity and resolves its cross references concurrently:
//! a character's episodes, a location's residents or an episode's cast.

use anyhow::{Context, Result, bail};
use clap::Args;
use colored::Colorize;
use serde::Serialize;
use serde_json::json;

use portal::{
    ApiClient, Character, EndpointKind, Episode, Expanded, Location, References, Request, Resource,
};

use crate::output;

#[derive(Args, Debug)]
pub struct ExpandArgs {
    /// Endpoint the entity belongs to (character, location, episode)
    pub kind: EndpointKind,

    /// Entity id
    pub id: u32,

    /// Fail if any reference could not be resolved
    #[arg(long)]
    pub strict: bool,
}

pub async fn run(args: ExpandArgs, client: ApiClient) -> Result<()> {
    match args.kind {
        EndpointKind::Character => expand::<Character, Episode>(&args, &client).await,
        EndpointKind::Location => expand::<Location, Character>(&args, &client).await,
        EndpointKind::Episode => expand::<Episode, Character>(&args, &client).await,
    }
}

async fn expand<P, R>(args: &ExpandArgs, client: &ApiClient) -> Result<()>
where
    P: Resource + References + Serialize,
    R: Resource + Serialize,
{
    let request = Request::item(P::ENDPOINT, args.id);
    let Expanded { parent, related } = client
        .aggregator()
        .expand::<P, R>(&request)
        .await
        .with_context(|| format!("Failed to fetch {} {}", P::ENDPOINT, args.id))?;

    let total = parent.references().len();
    let body = json!({
        "parent": parent,
        "related": related.items,
    });
    output::json(&body, true)?;

    eprintln!(
        "{}: {} of {} references",
        "Resolved".dimmed(),
        related.items.len(),
        total
    );

    for failure in &related.failures {
        output::failure(&failure.reference, &failure.error);
    }

    if args.strict && !related.is_complete() {
        bail!("{} references failed to resolve", related.failures.len());
    }

    Ok(())
}
