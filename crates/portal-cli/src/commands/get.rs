//! Get command implementation.

use anyhow::{Context, Result};
use clap::Args;

use portal::{ApiClient, Character, EndpointKind, Episode, Location, Resource};

use crate::output;

#[derive(Args, Debug)]
pub struct GetArgs {
    /// Endpoint the entity belongs to (character, location, episode)
    pub kind: EndpointKind,

    /// Entity id
    pub id: u32,

    /// Print a short human-readable summary instead of JSON
    #[arg(long)]
    pub summary: bool,
}

pub async fn run(args: GetArgs, client: ApiClient) -> Result<()> {
    match args.kind {
        EndpointKind::Character => {
            let character: Character = fetch(&client, args.id).await?;
            if args.summary {
                output::field("Name", &character.name);
                output::field("Status", character.status_text());
                output::field("Species", &character.species);
                output::field("Origin", &character.origin.name);
                output::field("Location", &character.location.name);
                output::field("Episodes", character.episode.len());
                return Ok(());
            }
            output::json(&character, true)
        }
        EndpointKind::Location => {
            let location: Location = fetch(&client, args.id).await?;
            if args.summary {
                output::field("Name", &location.name);
                output::field("Type", &location.kind);
                output::field("Dimension", &location.dimension);
                output::field("Residents", location.residents.len());
                return Ok(());
            }
            output::json(&location, true)
        }
        EndpointKind::Episode => {
            let episode: Episode = fetch(&client, args.id).await?;
            if args.summary {
                output::field("Name", &episode.name);
                output::field("Episode", &episode.code);
                output::field("Air date", &episode.air_date);
                output::field("Characters", episode.characters.len());
                return Ok(());
            }
            output::json(&episode, true)
        }
    }
}

async fn fetch<R: Resource>(client: &ApiClient, id: u32) -> Result<R> {
    client
        .get::<R>(id)
        .await
        .with_context(|| format!("Failed to fetch {} {}", R::ENDPOINT, id))
}
