use color_eyre::{eyre::eyre, Result};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
  /// Build-time properties: `profileActive`, `appName` and overrides for the
  /// built-in endpoint selectors (`consul`, `consulEnv`, `consulCustom`)
  #[serde(default)]
  pub properties: BTreeMap<String, String>,
  /// Checked before the process environment when falling back
  #[serde(default)]
  pub system_properties: BTreeMap<String, String>,
  #[serde(default)]
  pub http: HttpSettings,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct HttpSettings {
  pub connect_timeout_ms: u64,
  /// Whole-request budget: waiting for a pooled connection, sending, and
  /// reading the response all count against it
  pub request_timeout_ms: u64,
  pub max_idle_per_host: usize,
  pub idle_timeout_secs: u64,
  /// Accept any server certificate. The store is normally reached inside
  /// the same datacenter with self-signed certificates.
  pub accept_invalid_certs: bool,
  pub proxy: Option<ProxyConfig>,
}

impl Default for HttpSettings {
  fn default() -> Self {
    Self {
      connect_timeout_ms: 5000,
      request_timeout_ms: 5000,
      max_idle_per_host: 5000,
      idle_timeout_secs: 90,
      accept_invalid_certs: true,
      proxy: None,
    }
  }
}

impl HttpSettings {
  pub fn connect_timeout(&self) -> Duration {
    Duration::from_millis(self.connect_timeout_ms)
  }

  pub fn request_timeout(&self) -> Duration {
    Duration::from_millis(self.request_timeout_ms)
  }

  pub fn idle_timeout(&self) -> Duration {
    Duration::from_secs(self.idle_timeout_secs)
  }
}

/// Plain HTTP proxy given as host and port.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize)]
pub struct ProxyConfig {
  pub host: String,
  pub port: u16,
}

impl ProxyConfig {
  pub fn url(&self) -> String {
    format!("http://{}:{}", self.host, self.port)
  }
}

impl Config {
  /// Load configuration from file.
  ///
  /// Search order:
  /// 1. Explicit path if provided
  /// 2. ./kvsubst.yaml (current directory)
  /// 3. $XDG_CONFIG_HOME/kvsubst/config.yaml
  ///
  /// Having no file at all is fine: every lookup then falls through to the
  /// environment and the built-in defaults.
  pub fn load(explicit_path: Option<&Path>) -> Result<Self> {
    let path = if let Some(p) = explicit_path {
      if p.exists() {
        Some(p.to_path_buf())
      } else {
        return Err(eyre!("Config file not found: {}", p.display()));
      }
    } else {
      Self::find_config_file()
    };

    match path {
      Some(p) => Self::load_from_path(&p),
      None => Ok(Self::default()),
    }
  }

  fn find_config_file() -> Option<PathBuf> {
    // Check current directory
    let local = PathBuf::from("kvsubst.yaml");
    if local.exists() {
      return Some(local);
    }

    // Check XDG config directory
    if let Some(config_dir) = dirs::config_dir() {
      let xdg_path = config_dir.join("kvsubst").join("config.yaml");
      if xdg_path.exists() {
        return Some(xdg_path);
      }
    }

    None
  }

  fn load_from_path(path: &Path) -> Result<Self> {
    let contents = std::fs::read_to_string(path)
      .map_err(|e| eyre!("Failed to read config file {}: {}", path.display(), e))?;

    Self::from_yaml(&contents)
      .map_err(|e| eyre!("Failed to parse config file {}: {}", path.display(), e))
  }

  pub fn from_yaml(contents: &str) -> Result<Self> {
    // An empty file is a valid, empty configuration.
    if contents.trim().is_empty() {
      return Ok(Self::default());
    }
    let config: Config = serde_yaml::from_str(contents)?;
    Ok(config)
  }
}
