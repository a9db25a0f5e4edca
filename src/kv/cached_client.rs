//! Key-value client behind the single-flight document cache.

use chrono::Utc;
use std::sync::Arc;
use tracing::{debug, trace, warn};

use crate::cache::SingleFlightCache;
use crate::error::FetchError;

use super::client::KvClient;
use super::types::{CachedDocument, FetchOutcome};

/// Fetches each remote target at most once and serves every later lookup
/// from memory.
///
/// Failures never escape: a target that could not be fetched is cached as an
/// empty document and is not retried.
#[derive(Clone)]
pub struct CachedKvClient {
  inner: KvClient,
  cache: Arc<SingleFlightCache<Arc<CachedDocument>>>,
}

impl CachedKvClient {
  pub fn new(inner: KvClient) -> Self {
    Self {
      inner,
      cache: Arc::new(SingleFlightCache::new()),
    }
  }

  /// The document for `target`, fetching it on first use.
  pub async fn document(&self, target: &str) -> Arc<CachedDocument> {
    let inner = self.inner.clone();
    let url = target.to_string();

    self
      .cache
      .get_or_fetch(target, || async move {
        let document = match inner.fetch_document(&url).await {
          Ok(document) => document,
          Err(e) => empty_after_failure(&url, e),
        };
        debug!(url = %url, outcome = ?document.outcome, "cached document");
        Arc::new(document)
      })
      .await
  }

  /// Field at `path` of the document for `target`.
  pub async fn lookup(&self, target: &str, path: &[String]) -> Option<String> {
    let document = self.document(target).await;
    trace!(
      url = target,
      outcome = ?document.outcome,
      age_ms = (Utc::now() - document.fetched_at).num_milliseconds(),
      "serving cached document"
    );
    document.lookup(path)
  }

  /// Number of distinct targets fetched so far.
  pub fn cached_targets(&self) -> usize {
    self.cache.len()
  }
}

fn empty_after_failure(url: &str, error: FetchError) -> CachedDocument {
  match &error {
    // The key simply does not exist in the store
    FetchError::Http(e) if e.is_not_found() => {
      debug!(url, "key not present in store");
      CachedDocument::empty(FetchOutcome::Missing)
    }
    _ => {
      warn!(url, error = %error, "remote lookup failed, caching empty document");
      CachedDocument::empty(FetchOutcome::Failed)
    }
  }
}
