//! Answers `key -> value` lookups against the remote store.

use std::sync::Arc;
use tracing::{debug, trace};

use crate::config::Config;
use crate::endpoint::EndpointResolver;
use crate::error::ResolveError;
use crate::http::{ClientPool, HttpFetcher, Transport};
use crate::key::LookupKey;
use crate::kv::{CachedKvClient, KvClient};
use crate::source::{LookupSource, SystemSource};

/// Resolution context.
///
/// Owns the per-host client pool and the per-target document cache. Every
/// clone shares them; a freshly built resolver starts with both empty.
#[derive(Clone)]
pub struct Resolver {
  endpoints: EndpointResolver,
  documents: CachedKvClient,
}

impl Resolver {
  /// Resolver talking HTTP with the settings from `config`.
  pub fn new(config: &Config) -> Self {
    let pool = Arc::new(ClientPool::new(config.http.clone()));
    Self::with_transport(config, Arc::new(HttpFetcher::new(pool)))
  }

  /// Resolver using `transport` to reach the store.
  pub fn with_transport(config: &Config, transport: Arc<dyn Transport>) -> Self {
    let system = SystemSource::new(config.system_properties.clone());
    Self::from_parts(
      EndpointResolver::new(config.properties.clone(), system),
      KvClient::new(transport, config.http.proxy.clone()),
    )
  }

  pub fn from_parts(endpoints: EndpointResolver, client: KvClient) -> Self {
    Self {
      endpoints,
      documents: CachedKvClient::new(client),
    }
  }

  /// Look `key` up in the remote store.
  ///
  /// `primary` and `secondary` are consulted, in that order, for the URL of
  /// the key's endpoint selector. Every failure is reported as `None`.
  pub async fn get_value(
    &self,
    key: &str,
    primary: Option<&dyn LookupSource>,
    secondary: Option<&dyn LookupSource>,
  ) -> Option<String> {
    match self.try_get_value(key, primary, secondary).await {
      Ok(value) => value,
      Err(e) => {
        trace!(key, error = %e, "key not resolvable remotely");
        None
      }
    }
  }

  /// Like [`get_value`](Self::get_value), but says why a key could not be
  /// mapped to a remote target. Fetch failures still come back as `Ok(None)`.
  pub async fn try_get_value(
    &self,
    key: &str,
    primary: Option<&dyn LookupSource>,
    secondary: Option<&dyn LookupSource>,
  ) -> Result<Option<String>, ResolveError> {
    let key = LookupKey::parse(key)?;

    let target = self
      .endpoints
      .resolve(&key.selector, primary, secondary)
      .ok_or_else(|| ResolveError::UnresolvedEndpoint {
        selector: key.selector.clone(),
      })?;

    let value = self.documents.lookup(&target, &key.field_path).await;
    debug!(
      selector = %key.selector,
      url = %target,
      found = value.is_some(),
      "remote lookup"
    );
    Ok(value)
  }

  /// Number of distinct remote targets fetched so far.
  pub fn cached_targets(&self) -> usize {
    self.documents.cached_targets()
  }
}
