//! Subcommand implementations.

pub mod expand;
pub mod fetch;
pub mod get;
pub mod image;
pub mod list;

use anyhow::Result;

use portal::ApiClient;

use crate::cli::Commands;

pub async fn handle(cmd: Commands, client: ApiClient) -> Result<()> {
    match cmd {
        Commands::List(args) => list::run(args, client).await,
        Commands::Get(args) => get::run(args, client).await,
        Commands::Fetch(args) => fetch::run(args, client).await,
        Commands::Expand(args) => expand::run(args, client).await,
        Commands::Image(args) => image::run(args, client).await,
    }
}
