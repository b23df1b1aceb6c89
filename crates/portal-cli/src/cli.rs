//! CLI argument definitions.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use portal::{ApiUrl, ClientConfig};

use crate::commands::{expand, fetch, get, image, list};

/// Explore the Rick and Morty REST API from the command line.
#[derive(Parser, Debug)]
#[command(name = "portal")]
#[command(author, version = env!("PORTAL_VERSION"), about, long_about = None)]
pub struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Output logs as JSON
    #[arg(long, global = true)]
    pub json_logs: bool,

    /// API base URL (overrides PORTAL_API_URL)
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// Cached responses kept per endpoint, 0 disables caching (overrides PORTAL_CACHE_CAPACITY)
    #[arg(long, global = true)]
    pub cache_capacity: Option<usize>,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Client configuration from the environment with command line overrides applied.
    pub fn client_config(&self) -> Result<ClientConfig> {
        let mut config = ClientConfig::from_env().context("Invalid environment configuration")?;

        if let Some(url) = &self.api_url {
            config = config.with_base_url(ApiUrl::new(url).context("Invalid API URL")?);
        }
        if let Some(capacity) = self.cache_capacity {
            config = config.with_cache_capacity(capacity);
        }

        Ok(config)
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List entities, following `next` links page by page
    List(list::ListArgs),

    /// Fetch a single entity by id
    Get(get::GetArgs),

    /// Fetch an absolute API URL and print the raw JSON
    Fetch(fetch::FetchArgs),

    /// Fetch an entity together with everything it references
    Expand(expand::ExpandArgs),

    /// Download a character's image
    Image(image::ImageArgs),
}
