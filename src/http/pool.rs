//! One pooled HTTP client per remote host.

use once_cell::sync::OnceCell;
use reqwest::Client;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};
use tracing::debug;
use url::Url;

use crate::config::{HttpSettings, ProxyConfig};
use crate::error::HttpError;

type ClientCell = Arc<OnceCell<Client>>;

/// Lazily builds and keeps a `reqwest::Client` for every `host:port`.
///
/// A proxied request gets its own client, keyed by host and proxy, since
/// proxies are a client-level setting in reqwest.
pub struct ClientPool {
  settings: HttpSettings,
  clients: Mutex<HashMap<String, ClientCell>>,
}

impl ClientPool {
  pub fn new(settings: HttpSettings) -> Self {
    Self {
      settings,
      clients: Mutex::new(HashMap::new()),
    }
  }

  pub fn settings(&self) -> &HttpSettings {
    &self.settings
  }

  /// Get the client for the host `url` points at, building it on first use.
  pub fn client_for(&self, url: &str, proxy: Option<&ProxyConfig>) -> Result<Client, HttpError> {
    let parsed = Url::parse(url).map_err(|source| HttpError::InvalidUrl {
      url: url.to_string(),
      source,
    })?;
    let host = parsed.host_str().unwrap_or_default();
    let port = parsed.port_or_known_default().unwrap_or(80);
    let key = pool_key(host, port, proxy);

    // Only the map access is serialised; building happens on the host's cell
    // so other hosts are not held up.
    let cell = {
      let mut clients = self.clients.lock().unwrap_or_else(PoisonError::into_inner);
      Arc::clone(clients.entry(key.clone()).or_default())
    };

    cell
      .get_or_try_init(|| {
        debug!(host = %key, "creating http client");
        self.build_client(proxy)
      })
      .cloned()
      .map_err(|source| HttpError::ClientBuild { host: key, source })
  }

  /// Number of distinct hosts with a client.
  pub fn len(&self) -> usize {
    let clients = self.clients.lock().unwrap_or_else(PoisonError::into_inner);
    clients.values().filter(|cell| cell.get().is_some()).count()
  }

  pub fn is_empty(&self) -> bool {
    self.len() == 0
  }

  fn build_client(&self, proxy: Option<&ProxyConfig>) -> Result<Client, reqwest::Error> {
    let mut builder = Client::builder()
      .connect_timeout(self.settings.connect_timeout())
      .timeout(self.settings.request_timeout())
      .pool_max_idle_per_host(self.settings.max_idle_per_host)
      .pool_idle_timeout(self.settings.idle_timeout())
      .tcp_keepalive(self.settings.idle_timeout())
      .danger_accept_invalid_certs(self.settings.accept_invalid_certs);

    builder = match proxy {
      Some(proxy) => builder.proxy(reqwest::Proxy::all(proxy.url())?),
      None => builder.no_proxy(),
    };

    builder.build()
  }
}

fn pool_key(host: &str, port: u16, proxy: Option<&ProxyConfig>) -> String {
  match proxy {
    Some(p) => format!("{}:{} via {}:{}", host, port, p.host, p.port),
    None => format!("{}:{}", host, port),
  }
}
