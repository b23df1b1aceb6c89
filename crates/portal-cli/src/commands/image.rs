//! Image command implementation.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use portal::{ApiClient, Character, HttpImageSource, ImageSource};

use crate::output;

#[derive(Args, Debug)]
pub struct ImageArgs {
    /// Character id
    pub id: u32,

    /// File to write the image to
    #[arg(long, short)]
    pub output: PathBuf,
}

pub async fn run(args: ImageArgs, client: ApiClient) -> Result<()> {
    let character: Character = client
        .get(args.id)
        .await
        .with_context(|| format!("Failed to fetch character {}", args.id))?;

    let source = HttpImageSource::new(client.http().clone());
    let bytes = source
        .fetch(&character.image)
        .await
        .with_context(|| format!("Failed to download {}", character.image))?;

    tokio::fs::write(&args.output, &bytes)
        .await
        .with_context(|| format!("Failed to write {}", args.output.display()))?;

    output::field("Character", &character.name);
    output::field("Bytes", bytes.len());
    output::success(&format!("Saved image to {}", args.output.display()));

    Ok(())
}
