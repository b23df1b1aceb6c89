//! Core API types.
//!
//! These types enforce URL and endpoint invariants at construction time,
//! so a request that reaches the network is always well formed.

mod api_url;
mod endpoint;

pub use api_url::ApiUrl;
pub use endpoint::EndpointKind;
