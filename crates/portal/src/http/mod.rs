//! HTTP transport.
//!
//! This module provides the thin reqwest wrapper the executor and the image
//! source share. It knows nothing about caching or decoding.

mod client;

pub use client::HttpClient;
