use async_trait::async_trait;
use reqwest::StatusCode;
use std::sync::Arc;
use tracing::{debug, trace};

use super::pool::ClientPool;
use crate::config::ProxyConfig;
use crate::error::HttpError;

/// A successful (200) response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
  pub status: u16,
  pub body: String,
}

/// Something that can GET a URL from the key-value store.
#[async_trait]
pub trait Transport: Send + Sync {
  /// Exactly one request reaches the wire per call; failures are not retried.
  async fn get(&self, url: &str, proxy: Option<&ProxyConfig>) -> Result<HttpResponse, HttpError>;
}

/// Transport backed by the shared [`ClientPool`].
#[derive(Clone)]
pub struct HttpFetcher {
  pool: Arc<ClientPool>,
}

impl HttpFetcher {
  pub fn new(pool: Arc<ClientPool>) -> Self {
    Self { pool }
  }
}

#[async_trait]
impl Transport for HttpFetcher {
  async fn get(&self, url: &str, proxy: Option<&ProxyConfig>) -> Result<HttpResponse, HttpError> {
    let client = self.pool.client_for(url, proxy)?;

    let network = |source: reqwest::Error| {
      if source.is_timeout() {
        debug!(
          url,
          budget_ms = self.pool.settings().request_timeout_ms,
          "request timed out"
        );
      }
      HttpError::Network {
        url: url.to_string(),
        source,
      }
    };

    let response = client.get(url).send().await.map_err(network)?;
    let status = response.status();

    // Reading the body to the end hands the connection back to the pool;
    // dropping the response on the error path releases it as well.
    let body = response.text().await.map_err(network)?;
    trace!(url, status = status.as_u16(), bytes = body.len(), "GET");

    if status != StatusCode::OK {
      return Err(HttpError::NonSuccessStatus {
        url: url.to_string(),
        status: status.as_u16(),
        body,
      });
    }

    Ok(HttpResponse {
      status: status.as_u16(),
      body,
    })
  }
}
