//! HTTP access to the key-value store.
//!
//! - [`ClientPool`] keeps one keep-alive client per remote host
//! - [`HttpFetcher`] issues a single GET through it and classifies the status
//! - [`Transport`] is the seam the document layer talks to

mod fetcher;
mod pool;

pub use fetcher::{HttpFetcher, HttpResponse, Transport};
pub use pool::ClientPool;
