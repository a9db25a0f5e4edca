//! Reading documents out of the key-value store.

pub mod api_types;
mod cached_client;
mod client;
pub mod document;
mod types;

pub use cached_client::CachedKvClient;
pub use client::KvClient;
pub use document::{navigate, Node};
pub use types::{CachedDocument, FetchOutcome};
