//! Test doubles shared by unit tests.

use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use crate::config::ProxyConfig;
use crate::error::HttpError;
use crate::http::{HttpResponse, Transport};

/// A store response body holding a single record with `value`.
pub fn kv_body(value: &str) -> String {
  format!(
    r#"[{{"LockIndex":0,"Key":"config/test","Flags":0,"Value":"{}","CreateIndex":1,"ModifyIndex":1}}]"#,
    STANDARD.encode(value)
  )
}

/// Transport answering every request with the same canned response.
pub struct FakeTransport {
  pub status: u16,
  pub body: String,
  pub delay: Duration,
  pub calls: AtomicUsize,
  pub urls: Mutex<Vec<String>>,
}

impl FakeTransport {
  pub fn with_body(body: String) -> Arc<Self> {
    Arc::new(Self {
      status: 200,
      body,
      delay: Duration::ZERO,
      calls: AtomicUsize::new(0),
      urls: Mutex::new(Vec::new()),
    })
  }

  pub fn with_status(status: u16) -> Arc<Self> {
    Arc::new(Self {
      status,
      body: String::new(),
      delay: Duration::ZERO,
      calls: AtomicUsize::new(0),
      urls: Mutex::new(Vec::new()),
    })
  }

  pub fn slow(body: String, delay: Duration) -> Arc<Self> {
    Arc::new(Self {
      status: 200,
      body,
      delay,
      calls: AtomicUsize::new(0),
      urls: Mutex::new(Vec::new()),
    })
  }

  pub fn urls(&self) -> Vec<String> {
    self.urls.lock().unwrap().clone()
  }
}

#[async_trait]
impl Transport for FakeTransport {
  async fn get(&self, url: &str, _proxy: Option<&ProxyConfig>) -> Result<HttpResponse, HttpError> {
    self.calls.fetch_add(1, Ordering::SeqCst);
    self.urls.lock().unwrap().push(url.to_string());

    if !self.delay.is_zero() {
      tokio::time::sleep(self.delay).await;
    }

    if self.status != 200 {
      return Err(HttpError::NonSuccessStatus {
        url: url.to_string(),
        status: self.status,
        body: self.body.clone(),
      });
    }

    Ok(HttpResponse {
      status: self.status,
      body: self.body.clone(),
    })
  }
}
