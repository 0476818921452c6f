use std::collections::HashMap;

use serde::Deserialize;

/// Plugin configuration, deserialized from the host bundler's camelCase JSON.
#[derive(Clone, Debug, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TransformOptions {
  /// Extra seed mixed into every group hash. Scopes generated class names so
  /// independently built bundles cannot collide.
  pub class_hash_prefix: Option<String>,
  /// Map from 8-character atomic hash to a short alias, shared with the CSS
  /// extraction step.
  pub class_name_compression_map: Option<HashMap<String, String>>,
  /// Surface unknown-property and shorthand-mixing diagnostics.
  pub check_property_validity: bool,
}

impl Default for TransformOptions {
  fn default() -> Self {
    Self {
      class_hash_prefix: None,
      class_name_compression_map: None,
      check_property_validity: true,
    }
  }
}

impl TransformOptions {
  pub(crate) fn css_options(&self) -> cinder_css::CssOptions {
    cinder_css::CssOptions {
      class_hash_prefix: self.class_hash_prefix.clone(),
      class_name_compression_map: self.class_name_compression_map.clone(),
      check_property_validity: self.check_property_validity,
    }
  }
}
