//! In-process caching for remote lookups.
//!
//! This module provides a store-agnostic single-flight cache that:
//! - Runs at most one fetch per target for the life of the process
//! - Lets concurrent callers for the same target share that one result
//! - Keeps every result, failures included, with no expiry or eviction

mod layer;

pub use layer::SingleFlightCache;
