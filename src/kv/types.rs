use chrono::{DateTime, Utc};

use super::document::Node;

/// How the fetch behind a cached document ended.
///
/// Kept for diagnostics only: lookups treat all three the same way, an empty
/// document simply has no fields.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FetchOutcome {
  /// The key exists and its value was decoded
  Found,
  /// The store answered 404, or the key holds no value
  Missing,
  /// Network, status or decode failure
  #[default]
  Failed,
}

/// The document fetched for one remote target, kept for the life of the
/// process.
#[derive(Debug, Clone, Default)]
pub struct CachedDocument {
  /// Decoded text as stored under the key
  pub text: Option<String>,
  pub root: Node,
  pub outcome: FetchOutcome,
  pub fetched_at: DateTime<Utc>,
}

impl CachedDocument {
  pub fn found(text: String, root: Node) -> Self {
    Self {
      text: Some(text),
      root,
      outcome: FetchOutcome::Found,
      fetched_at: Utc::now(),
    }
  }

  pub fn empty(outcome: FetchOutcome) -> Self {
    Self {
      text: None,
      root: Node::Null,
      outcome,
      fetched_at: Utc::now(),
    }
  }

  /// Extract the field at `path`; an empty path yields the whole text.
  pub fn lookup<S: AsRef<str>>(&self, path: &[S]) -> Option<String> {
    if path.is_empty() {
      return self.text.clone();
    }
    self.root.lookup(path)
  }

  pub fn is_empty(&self) -> bool {
    self.root.is_empty()
  }
}
