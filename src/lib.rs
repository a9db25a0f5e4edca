//! Resolve dotted configuration keys against a Consul-style HTTP key-value
//! store.
//!
//! A key such as `consul.db.host` names an endpoint selector (`consul`)
//! whose configured URL holds a YAML or JSON document, and a field path
//! (`db.host`) inside it. Each document is fetched at most once per
//! [`Resolver`] and kept for its lifetime; any failure reads as "not found".

pub mod blocking;
pub mod cache;
pub mod config;
pub mod endpoint;
pub mod error;
pub mod http;
pub mod key;
pub mod kv;
pub mod logging;
pub mod resolver;
pub mod source;

#[cfg(test)]
mod testing;

pub use blocking::BlockingResolver;
pub use config::Config;
pub use error::{DecodeError, FetchError, HttpError, ResolveError};
pub use key::LookupKey;
pub use resolver::Resolver;
pub use source::{LookupSource, SystemSource};
