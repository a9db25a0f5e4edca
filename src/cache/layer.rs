//! Single-flight cache keyed by remote target.

use futures::future::{BoxFuture, FutureExt, Shared};
use std::collections::HashMap;
use std::future::Future;
use std::sync::{Mutex, PoisonError};
use tracing::{debug, error};

type Flight<V> = Shared<BoxFuture<'static, V>>;

/// Cache that computes each entry exactly once.
///
/// The first caller for a target starts the fetch; every caller, including
/// those arriving while it is still running, awaits the same shared result.
/// The fetch runs on its own task, so it completes and fills the entry even
/// if every caller waiting on it gives up.
pub struct SingleFlightCache<V> {
  entries: Mutex<HashMap<String, Flight<V>>>,
}

impl<V> SingleFlightCache<V>
where
  V: Clone + Default + Send + Sync + 'static,
{
  pub fn new() -> Self {
    Self {
      entries: Mutex::new(HashMap::new()),
    }
  }

  /// Get the value for `target`, running `fetcher` if nobody has yet.
  ///
  /// `fetcher` cannot fail: it must fold its own errors into a value. If it
  /// panics the entry settles on `V::default()`. Must be called from within
  /// a tokio runtime.
  pub async fn get_or_fetch<F, Fut>(&self, target: &str, fetcher: F) -> V
  where
    F: FnOnce() -> Fut,
    Fut: Future<Output = V> + Send + 'static,
  {
    let flight = {
      let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
      match entries.get(target) {
        Some(flight) => flight.clone(),
        None => {
          debug!(key = target, "cache miss, fetching");
          let flight = spawn_flight(target.to_string(), fetcher());
          entries.insert(target.to_string(), flight.clone());
          flight
        }
      }
    };

    flight.await
  }

  /// The value for `target` if its fetch has already finished.
  pub fn peek(&self, target: &str) -> Option<V> {
    let entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
    entries.get(target).and_then(|flight| flight.peek().cloned())
  }

  pub fn contains(&self, target: &str) -> bool {
    let entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
    entries.contains_key(target)
  }

  /// Number of targets fetched or being fetched.
  pub fn len(&self) -> usize {
    let entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
    entries.len()
  }

  pub fn is_empty(&self) -> bool {
    self.len() == 0
  }
}

impl<V> Default for SingleFlightCache<V>
where
  V: Clone + Default + Send + Sync + 'static,
{
  fn default() -> Self {
    Self::new()
  }
}

fn spawn_flight<V, Fut>(target: String, fetch: Fut) -> Flight<V>
where
  V: Clone + Default + Send + Sync + 'static,
  Fut: Future<Output = V> + Send + 'static,
{
  let handle = tokio::spawn(fetch);
  async move {
    match handle.await {
      Ok(value) => value,
      Err(e) => {
        error!(key = %target, error = %e, "fetch task failed, caching empty result");
        V::default()
      }
    }
  }
  .boxed()
  .shared()
}
