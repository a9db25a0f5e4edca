//! Synchronous facade for callers that are not async.

use std::io;
use tokio::runtime::{self, Runtime};

use crate::config::Config;
use crate::resolver::Resolver;
use crate::source::LookupSource;

/// A [`Resolver`] driven by its own tokio runtime.
///
/// Each call blocks the current thread until the lookup finishes, at most
/// the configured HTTP timeout. Must not be used from inside another tokio
/// runtime.
pub struct BlockingResolver {
  runtime: Runtime,
  inner: Resolver,
}

impl BlockingResolver {
  pub fn new(config: &Config) -> io::Result<Self> {
    Self::from_resolver(Resolver::new(config))
  }

  pub fn from_resolver(resolver: Resolver) -> io::Result<Self> {
    let runtime = runtime::Builder::new_multi_thread()
      .worker_threads(2)
      .thread_name("kvsubst")
      .enable_all()
      .build()?;

    Ok(Self {
      runtime,
      inner: resolver,
    })
  }

  pub fn get_value(
    &self,
    key: &str,
    primary: Option<&dyn LookupSource>,
    secondary: Option<&dyn LookupSource>,
  ) -> Option<String> {
    self
      .runtime
      .block_on(self.inner.get_value(key, primary, secondary))
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::endpoint::EndpointResolver;
  use crate::kv::KvClient;
  use crate::source::SystemSource;
  use crate::testing::{kv_body, FakeTransport};
  use std::collections::BTreeMap;
  use std::sync::atomic::Ordering;
  use std::sync::Arc;
  use std::time::Duration;

  #[test]
  fn test_blocking_lookup_from_many_threads() {
    let transport = FakeTransport::slow(kv_body("db:\n  port: 5432"), Duration::from_millis(20));
    let resolver = Resolver::from_parts(
      EndpointResolver::new(BTreeMap::new(), SystemSource::isolated(BTreeMap::new())),
      KvClient::new(transport.clone(), None),
    );
    let blocking = Arc::new(BlockingResolver::from_resolver(resolver).unwrap());

    let threads: Vec<_> = (0..8)
      .map(|_| {
        let blocking = blocking.clone();
        std::thread::spawn(move || blocking.get_value("consul.db.port", None, None))
      })
      .collect();

    for t in threads {
      assert_eq!(t.join().unwrap().as_deref(), Some("5432"));
    }
    assert_eq!(transport.calls.load(Ordering::SeqCst), 1);
  }
}
