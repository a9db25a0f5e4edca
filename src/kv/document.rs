//! Structured documents stored as key values, and field-path navigation.
//!
//! Values are parsed as YAML, which also accepts JSON.

use serde_yaml::Value;
use std::collections::BTreeMap;

use crate::error::DecodeError;

/// A parsed document node.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Node {
  #[default]
  Null,
  /// Strings, numbers and booleans, already in string form
  Scalar(String),
  Mapping(BTreeMap<String, Node>),
  /// Sequences and tagged values, rendered as compact JSON
  Other(String),
}

impl Node {
  pub fn parse(text: &str) -> Result<Self, DecodeError> {
    let value: Value = serde_yaml::from_str(text)?;
    Ok(Self::from(value))
  }

  /// Follow `path` through nested mappings.
  ///
  /// The walk stops at the first value that is not a mapping; that value is
  /// the result even if path segments remain. Ending on a mapping or a null
  /// gives `None`. A root that is not a mapping has no fields.
  pub fn lookup<S: AsRef<str>>(&self, path: &[S]) -> Option<String> {
    let Node::Mapping(root) = self else {
      return None;
    };

    let mut current = root;
    let mut terminal = None;
    for segment in path {
      let next = current.get(segment.as_ref());
      terminal = next;
      match next {
        Some(Node::Mapping(map)) => current = map,
        _ => break,
      }
    }

    match terminal? {
      Node::Scalar(s) | Node::Other(s) => Some(s.clone()),
      Node::Null | Node::Mapping(_) => None,
    }
  }

  pub fn is_empty(&self) -> bool {
    match self {
      Node::Null => true,
      Node::Mapping(map) => map.is_empty(),
      _ => false,
    }
  }
}

impl From<Value> for Node {
  fn from(value: Value) -> Self {
    match value {
      Value::Null => Node::Null,
      Value::Bool(_) | Value::Number(_) | Value::String(_) => match scalar_string(&value) {
        Some(s) => Node::Scalar(s),
        None => Node::Null,
      },
      Value::Mapping(mapping) => Node::Mapping(
        mapping
          .into_iter()
          .map(|(k, v)| (key_string(&k), Node::from(v)))
          .collect(),
      ),
      other => Node::Other(serde_json::to_string(&other).unwrap_or_default()),
    }
  }
}

fn scalar_string(value: &Value) -> Option<String> {
  match value {
    Value::Bool(b) => Some(b.to_string()),
    Value::Number(n) => Some(n.to_string()),
    Value::String(s) => Some(s.clone()),
    _ => None,
  }
}

/// Mapping keys are matched by their string form, so `8080: x` is reachable
/// as segment `8080`.
fn key_string(key: &Value) -> String {
  scalar_string(key).unwrap_or_else(|| serde_json::to_string(key).unwrap_or_default())
}

/// Parse `decoded` and extract the field at `path`.
///
/// An empty path returns the text unchanged without parsing it.
pub fn navigate<S: AsRef<str>>(decoded: &str, path: &[S]) -> Result<Option<String>, DecodeError> {
  if path.is_empty() {
    return Ok(Some(decoded.to_string()));
  }
  Ok(Node::parse(decoded)?.lookup(path))
}

#[cfg(test)]
mod tests {
  use super::*;

  const SERVICE_JSON: &str = r#"{"service":{"name":"auth","port":8080}}"#;

  #[test]
  fn test_nested_json() {
    assert_eq!(
      navigate(SERVICE_JSON, &["service", "port"]).unwrap().as_deref(),
      Some("8080")
    );
    assert_eq!(
      navigate(SERVICE_JSON, &["service", "name"]).unwrap().as_deref(),
      Some("auth")
    );
    assert_eq!(navigate(SERVICE_JSON, &["service", "missing"]).unwrap(), None);
  }

  #[test]
  fn test_residual_mapping_is_absent() {
    assert_eq!(navigate(SERVICE_JSON, &["service"]).unwrap(), None);
  }

  #[test]
  fn test_empty_path_returns_text() {
    assert_eq!(
      navigate::<&str>("anything: at all", &[]).unwrap().as_deref(),
      Some("anything: at all")
    );
  }

  #[test]
  fn test_yaml_document() {
    let doc = "db:\n  host: 10.0.0.5\n  pool: 20\n  ssl: true\n  ratio: 0.5\n";
    assert_eq!(navigate(doc, &["db", "host"]).unwrap().as_deref(), Some("10.0.0.5"));
    assert_eq!(navigate(doc, &["db", "pool"]).unwrap().as_deref(), Some("20"));
    assert_eq!(navigate(doc, &["db", "ssl"]).unwrap().as_deref(), Some("true"));
    assert_eq!(navigate(doc, &["db", "ratio"]).unwrap().as_deref(), Some("0.5"));
  }

  #[test]
  fn test_walk_stops_at_scalar() {
    let doc = "a: x\n";
    assert_eq!(navigate(doc, &["a", "b", "c"]).unwrap().as_deref(), Some("x"));
  }

  #[test]
  fn test_null_leaf_is_absent() {
    assert_eq!(navigate("a: ~\n", &["a"]).unwrap(), None);
  }

  #[test]
  fn test_sequence_rendered_as_json() {
    let doc = "hosts:\n  - a\n  - b\n";
    assert_eq!(
      navigate(doc, &["hosts"]).unwrap().as_deref(),
      Some(r#"["a","b"]"#)
    );
  }

  #[test]
  fn test_yaml_1_2_booleans() {
    // Only true/false are booleans; on/yes/off stay strings
    let doc = "a: on\nb: yes\nc: off\nd: true\n";
    assert_eq!(navigate(doc, &["a"]).unwrap().as_deref(), Some("on"));
    assert_eq!(navigate(doc, &["b"]).unwrap().as_deref(), Some("yes"));
    assert_eq!(navigate(doc, &["c"]).unwrap().as_deref(), Some("off"));
    assert_eq!(navigate(doc, &["d"]).unwrap().as_deref(), Some("true"));
  }

  #[test]
  fn test_non_string_keys() {
    let doc = "ports:\n  8080: http\n  true: yes\n";
    assert_eq!(navigate(doc, &["ports", "8080"]).unwrap().as_deref(), Some("http"));
  }

  #[test]
  fn test_scalar_root_has_no_fields() {
    assert_eq!(navigate("just text", &["a"]).unwrap(), None);
  }

  #[test]
  fn test_malformed_document() {
    assert!(matches!(
      navigate("a: [unclosed", &["a"]),
      Err(DecodeError::Document(_))
    ));
  }
}
