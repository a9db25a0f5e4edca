use crate::error::ResolveError;

/// A dotted lookup key split into its endpoint selector and field path.
///
/// `consul.db.host` addresses field `db.host` of the document stored at the
/// URL configured for selector `consul`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupKey {
  pub selector: String,
  pub field_path: Vec<String>,
}

impl LookupKey {
  pub fn parse(key: &str) -> Result<Self, ResolveError> {
    let mut segments: Vec<&str> = key.split('.').collect();
    // Trailing dots do not add segments.
    while segments.last().is_some_and(|s| s.is_empty()) {
      segments.pop();
    }

    let selector = segments.first().copied().unwrap_or_default();
    let field_path: Vec<String> = segments.iter().skip(1).map(|s| s.to_string()).collect();

    if selector.is_empty() || field_path.is_empty() {
      return Err(ResolveError::MalformedKey {
        key: key.to_string(),
      });
    }

    Ok(Self {
      selector: selector.to_string(),
      field_path,
    })
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_split_selector_and_path() {
    let key = LookupKey::parse("a.b.c.d").unwrap();
    assert_eq!(key.selector, "a");
    assert_eq!(key.field_path, vec!["b", "c", "d"]);
  }

  #[test]
  fn test_two_segments() {
    let key = LookupKey::parse("consul.port").unwrap();
    assert_eq!(key.selector, "consul");
    assert_eq!(key.field_path, vec!["port"]);
  }

  #[test]
  fn test_single_segment_is_malformed() {
    assert_eq!(
      LookupKey::parse("consul"),
      Err(ResolveError::MalformedKey {
        key: "consul".to_string()
      })
    );
    assert!(LookupKey::parse("").is_err());
  }

  #[test]
  fn test_empty_selector_is_malformed() {
    assert!(LookupKey::parse(".db.host").is_err());
  }

  #[test]
  fn test_trailing_dots_are_ignored() {
    assert!(LookupKey::parse("consul.").is_err());
    let key = LookupKey::parse("consul.db..").unwrap();
    assert_eq!(key.field_path, vec!["db"]);
  }
}
