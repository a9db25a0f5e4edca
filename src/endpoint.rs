//! Endpoint selector to URL resolution.

use std::collections::BTreeMap;

use tracing::debug;

use crate::source::{LookupSource, SystemSource};

/// Per-application configuration scope.
pub const CUSTOM_SELECTOR: &str = "consulCustom";
/// Per-environment configuration scope.
pub const ENV_SELECTOR: &str = "consulEnv";
/// Configuration shared by every application.
pub const COMMON_SELECTOR: &str = "consul";

const CUSTOM_DEFAULT: &str = "http://127.0.0.1:8500/v1/kv/config/${profileActive}/${appName}";
const ENV_DEFAULT: &str = "http://127.0.0.1:8500/v1/kv/config/${profileActive}/common";
const COMMON_DEFAULT: &str = "http://127.0.0.1:8500/v1/kv/config/common";

const PLACEHOLDERS: [&str; 2] = ["profileActive", "appName"];

/// Built-in template for one of the recognised selectors.
pub fn default_template(selector: &str) -> Option<&'static str> {
  match selector {
    CUSTOM_SELECTOR => Some(CUSTOM_DEFAULT),
    ENV_SELECTOR => Some(ENV_DEFAULT),
    COMMON_SELECTOR => Some(COMMON_DEFAULT),
    _ => None,
  }
}

/// Replace both `${name}` and `@name@` with `value`.
pub fn substitute(template: &str, name: &str, value: &str) -> String {
  template
    .replace(&format!("${{{}}}", name), value)
    .replace(&format!("@{}@", name), value)
}

/// Turns an endpoint selector into the URL of the document to fetch.
#[derive(Debug, Clone, Default)]
pub struct EndpointResolver {
  build_properties: BTreeMap<String, String>,
  system: SystemSource,
}

impl EndpointResolver {
  pub fn new(build_properties: BTreeMap<String, String>, system: SystemSource) -> Self {
    Self {
      build_properties,
      system,
    }
  }

  /// Resolve `selector` through primary, secondary, build properties (for
  /// the built-in selectors only), system properties and finally the built-in
  /// default, then fill in the placeholders.
  pub fn resolve(
    &self,
    selector: &str,
    primary: Option<&dyn LookupSource>,
    secondary: Option<&dyn LookupSource>,
  ) -> Option<String> {
    let template = primary
      .and_then(|s| s.get_property(selector))
      .or_else(|| secondary.and_then(|s| s.get_property(selector)))
      .or_else(|| self.build_property(selector))
      .or_else(|| self.system.get_property(selector))
      .or_else(|| default_template(selector).map(String::from))?;

    let url = self.fill_placeholders(&template);
    debug!(selector, url = %url, "resolved endpoint");
    Some(url)
  }

  /// Substitute every known placeholder that has a value. Placeholders with
  /// no value are left as written.
  pub fn fill_placeholders(&self, template: &str) -> String {
    PLACEHOLDERS.iter().fold(template.to_string(), |url, name| {
      match self.placeholder_value(name) {
        Some(value) => substitute(&url, name, &value),
        None => url,
      }
    })
  }

  fn build_property(&self, selector: &str) -> Option<String> {
    default_template(selector)?;
    self.build_properties.get(selector).cloned()
  }

  fn placeholder_value(&self, name: &str) -> Option<String> {
    self
      .build_properties
      .get(name)
      .cloned()
      .or_else(|| self.system.get_property(name))
  }
}
