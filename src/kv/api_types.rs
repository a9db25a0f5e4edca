//! Serde-deserializable types matching the key-value store's read response.
//!
//! `GET /v1/kv/<key>` answers with a JSON array of records. Only the first
//! record's `Value` is used.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde::Deserialize;

use crate::error::DecodeError;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct KvRecord {
  pub lock_index: Option<u64>,
  pub key: Option<String>,
  pub flags: Option<u64>,
  /// Base64 encoded, `null` when the key holds no data
  pub value: Option<String>,
  pub create_index: Option<u64>,
  pub modify_index: Option<u64>,
}

impl KvRecord {
  /// The decoded, trimmed value, or `None` if the record carries none.
  pub fn decoded_value(&self) -> Result<Option<String>, DecodeError> {
    let encoded = match self.value.as_deref() {
      Some(v) if !v.is_empty() => v,
      _ => return Ok(None),
    };

    let bytes = STANDARD.decode(encoded)?;
    let text = String::from_utf8(bytes)?;
    Ok(Some(text.trim().to_string()))
  }
}

/// Decode a raw response body to the text stored under the key.
///
/// A blank body, an empty array, or a first record with no value are all
/// `Ok(None)` rather than errors.
pub fn decode_response(raw_body: &str) -> Result<Option<String>, DecodeError> {
  if raw_body.trim().is_empty() {
    return Ok(None);
  }

  let records: Vec<KvRecord> = serde_json::from_str(raw_body)?;
  match records.first() {
    Some(record) => record.decoded_value(),
    None => Ok(None),
  }
}
