//! Property sources consulted while resolving an endpoint selector.

use std::collections::{BTreeMap, HashMap};

/// A read-only bag of named properties.
///
/// The surrounding substitution engine passes its local property containers
/// in through this trait.
pub trait LookupSource: Send + Sync {
  fn get_property(&self, name: &str) -> Option<String>;
}

impl LookupSource for HashMap<String, String> {
  fn get_property(&self, name: &str) -> Option<String> {
    self.get(name).cloned()
  }
}

impl LookupSource for BTreeMap<String, String> {
  fn get_property(&self, name: &str) -> Option<String> {
    self.get(name).cloned()
  }
}

/// Environment fallback: explicit "system properties" first, then the
/// process environment.
#[derive(Debug, Clone, Default)]
pub struct SystemSource {
  overrides: BTreeMap<String, String>,
  read_env: bool,
}

impl SystemSource {
  /// System properties backed by the real process environment.
  pub fn new(overrides: BTreeMap<String, String>) -> Self {
    Self {
      overrides,
      read_env: true,
    }
  }

  /// Only the given properties; the process environment is ignored.
  pub fn isolated(overrides: BTreeMap<String, String>) -> Self {
    Self {
      overrides,
      read_env: false,
    }
  }
}

impl LookupSource for SystemSource {
  fn get_property(&self, name: &str) -> Option<String> {
    if let Some(value) = self.overrides.get(name) {
      return Some(value.clone());
    }
    if !self.read_env {
      return None;
    }
    std::env::var(name).ok()
  }
}

/// Parse a `name=value` pair as given on the command line.
pub fn parse_definition(s: &str) -> Result<(String, String), String> {
  let (name, value) = s
    .split_once('=')
    .ok_or_else(|| format!("expected name=value, got {:?}", s))?;
  let name = name.trim();
  if name.is_empty() {
    return Err(format!("empty property name in {:?}", s));
  }
  Ok((name.to_string(), value.to_string()))
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_overrides_win_over_environment() {
    std::env::set_var("KVSUBST_TEST_OVERRIDE", "from-env");
    let mut overrides = BTreeMap::new();
    overrides.insert("KVSUBST_TEST_OVERRIDE".to_string(), "from-override".to_string());

    let source = SystemSource::new(overrides);
    assert_eq!(
      source.get_property("KVSUBST_TEST_OVERRIDE").as_deref(),
      Some("from-override")
    );
  }

  #[test]
  fn test_environment_fallback() {
    std::env::set_var("KVSUBST_TEST_ENV_ONLY", "from-env");
    let source = SystemSource::new(BTreeMap::new());
    assert_eq!(
      source.get_property("KVSUBST_TEST_ENV_ONLY").as_deref(),
      Some("from-env")
    );

    let isolated = SystemSource::isolated(BTreeMap::new());
    assert_eq!(isolated.get_property("KVSUBST_TEST_ENV_ONLY"), None);
  }

  #[test]
  fn test_parse_definition() {
    assert_eq!(
      parse_definition("consul=http://a/b?x=1"),
      Ok(("consul".to_string(), "http://a/b?x=1".to_string()))
    );
    assert!(parse_definition("novalue").is_err());
    assert!(parse_definition("=x").is_err());
  }
}
