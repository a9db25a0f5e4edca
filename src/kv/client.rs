use std::sync::Arc;

use crate::config::ProxyConfig;
use crate::error::FetchError;
use crate::http::Transport;

use super::api_types::decode_response;
use super::document::Node;
use super::types::{CachedDocument, FetchOutcome};

/// Key-value store client: one GET, decoded into a document.
#[derive(Clone)]
pub struct KvClient {
  transport: Arc<dyn Transport>,
  proxy: Option<ProxyConfig>,
}

impl KvClient {
  pub fn new(transport: Arc<dyn Transport>, proxy: Option<ProxyConfig>) -> Self {
    Self { transport, proxy }
  }

  /// Fetch and parse the document stored at `url`.
  ///
  /// A key with no value gives an empty document with outcome `Missing`.
  pub async fn fetch_document(&self, url: &str) -> Result<CachedDocument, FetchError> {
    let response = self.transport.get(url, self.proxy.as_ref()).await?;

    let text = match decode_response(&response.body)? {
      Some(text) if !text.is_empty() => text,
      _ => return Ok(CachedDocument::empty(FetchOutcome::Missing)),
    };

    let root = Node::parse(&text)?;
    Ok(CachedDocument::found(text, root))
  }
}
