use std::collections::HashMap;

use serde::Deserialize;

/// Build configuration for CSS transformation, deserialized from the host
/// tool's camelCase JSON configuration.
#[derive(Clone, Debug, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CssOptions {
  /// Extra seed mixed into every group hash, scoping generated class names.
  /// Must be a valid CSS identifier.
  pub class_hash_prefix: Option<String>,
  /// Optional map from the 8-character atomic hash (class name without the
  /// leading underscore) to a short alias.
  pub class_name_compression_map: Option<HashMap<String, String>>,
  /// When set, unknown property names and shorthand/longhand mixing surface
  /// as diagnostics. Never fatal either way.
  pub check_property_validity: bool,
}

impl Default for CssOptions {
  fn default() -> Self {
    Self {
      class_hash_prefix: None,
      class_name_compression_map: None,
      check_property_validity: true,
    }
  }
}
