//! Error types for each stage of a lookup.
//!
//! Only [`ResolveError`] can reach a caller of
//! [`Resolver::try_get_value`](crate::Resolver::try_get_value); fetch and
//! decode failures are absorbed by the document cache and logged there.

use thiserror::Error;

/// Failure talking to the remote store.
#[derive(Debug, Error)]
pub enum HttpError {
  #[error("invalid url {url}: {source}")]
  InvalidUrl {
    url: String,
    #[source]
    source: url::ParseError,
  },

  #[error("failed to build http client for {host}: {source}")]
  ClientBuild {
    host: String,
    #[source]
    source: reqwest::Error,
  },

  #[error("request to {url} failed: {source}")]
  Network {
    url: String,
    #[source]
    source: reqwest::Error,
  },

  /// The store answered, but not with 200. A 404 means the key does not exist.
  #[error("{url} returned status {status}")]
  NonSuccessStatus {
    url: String,
    status: u16,
    body: String,
  },
}

impl HttpError {
  /// True when the store reported the key as absent rather than failing.
  pub fn is_not_found(&self) -> bool {
    matches!(self, HttpError::NonSuccessStatus { status: 404, .. })
  }
}

/// Failure turning a response body into a document.
#[derive(Debug, Error)]
pub enum DecodeError {
  #[error("malformed key-value response: {0}")]
  WireFormat(#[from] serde_json::Error),

  #[error("value is not valid base64: {0}")]
  Base64(#[from] base64::DecodeError),

  #[error("value is not valid utf-8: {0}")]
  Utf8(#[from] std::string::FromUtf8Error),

  #[error("value is not a valid document: {0}")]
  Document(#[from] serde_yaml::Error),
}

/// Any failure on the fetch path for one remote target.
#[derive(Debug, Error)]
pub enum FetchError {
  #[error(transparent)]
  Http(#[from] HttpError),

  #[error(transparent)]
  Decode(#[from] DecodeError),
}

/// Reasons a key could not even be turned into a remote target.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ResolveError {
  #[error("key {key:?} needs at least two dot-separated segments")]
  MalformedKey { key: String },

  #[error("no endpoint configured for selector {selector:?}")]
  UnresolvedEndpoint { selector: String },
}
