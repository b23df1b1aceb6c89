//! Entity models decoded from API responses.
//!
//! Relationships between entities are plain URL strings; resolving one
//! always takes a follow-up request (see [`Aggregator`](crate::Aggregator)).

mod character;
mod episode;
mod location;
mod page;

pub use character::{Character, CharacterStatus, Gender, NamedLink};
pub use episode::Episode;
pub use location::Location;
pub use page::{Page, PageInfo};

use serde::de::DeserializeOwned;

use crate::types::EndpointKind;

/// An entity type served by one endpoint.
pub trait Resource: DeserializeOwned + Send + 'static {
    /// The endpoint that serves this entity.
    const ENDPOINT: EndpointKind;
}

/// An entity that refers to other entities by URL.
pub trait References {
    /// The cross-reference URLs, in the order the server listed them.
    fn references(&self) -> &[String];
}

impl Resource for Character {
    const ENDPOINT: EndpointKind = EndpointKind::Character;
}

impl Resource for Location {
    const ENDPOINT: EndpointKind = EndpointKind::Location;
}

impl Resource for Episode {
    const ENDPOINT: EndpointKind = EndpointKind::Episode;
}

impl References for Character {
    fn references(&self) -> &[String] {
        &self.episode
    }
}

impl References for Location {
    fn references(&self) -> &[String] {
        &self.residents
    }
}

impl References for Episode {
    fn references(&self) -> &[String] {
        &self.characters
    }
}
