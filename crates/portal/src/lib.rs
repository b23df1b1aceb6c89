//! portal - Rick and Morty API client
//!
//! This library is the data-access layer for the Rick and Morty REST API. It
//! provides a cached request executor, a pagination controller that follows
//! the server's `next` links, and a fan-out resolver for the URL cross
//! references entities carry.
//!
//! # Example
//!
//! ```no_run
//! use portal::{ApiClient, Character, ClientConfig, Episode};
//!
//! # async fn example() -> Result<(), portal::Error> {
//! let client = ApiClient::new(ClientConfig::from_env()?)?;
//!
//! let episode: Episode = client.get(28).await?;
//! let cast = client.aggregator().join::<Character>(&episode.characters).await;
//!
//! for character in &cast.items {
//!     println!("{}: {}", character.name, character.status_text());
//! }
//! # Ok(())
//! # }
//! ```

pub mod aggregate;
pub mod cache;
pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod image;
pub mod models;
pub mod pagination;
pub mod request;
pub mod types;

// Re-export primary types at crate root for convenience
pub use aggregate::{Aggregator, Expanded, Joined, ReferenceFailure};
pub use cache::ResponseCache;
pub use client::ApiClient;
pub use config::ClientConfig;
pub use error::Error;
pub use image::{HttpImageSource, ImageSource};
pub use models::{
    Character, CharacterStatus, Episode, Gender, Location, NamedLink, Page, PageInfo, References,
    Resource,
};
pub use pagination::{PageEvent, Paginator, Phase};
pub use request::{Request, RequestTarget, ResolvedRequest};
pub use types::{ApiUrl, EndpointKind};

/// Result type alias using the crate's Error type.
pub type Result<T> = std::result::Result<T, Error>;
