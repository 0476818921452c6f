//! CSS normalization and atomic rule generation.
//!
//! Takes CSS text (with any dynamic interpolations already replaced by
//! `var()` references), splits it into one declaration per rule, and names
//! each rule with a stable content hash. The resulting class names follow
//! the `_` + group hash + value hash convention that the runtime's `ax`
//! merge relies on for override resolution.

pub mod affix;
pub mod atomic;
pub mod error;
pub mod options;
pub mod parser;
pub mod properties;
pub mod sort;

use indexmap::IndexSet;

pub use crate::affix::{css_affix_interpolation, AfterInterpolation, BeforeInterpolation};
pub use crate::error::{CssError, Diagnostic};
pub use crate::options::CssOptions;

/// The result of transforming one blob of CSS text.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TransformedCss {
  /// Runtime class names in source declaration order (compressed aliases
  /// where the map supplies one).
  pub class_names: Vec<String>,
  /// One minified rule string per atomic rule, in cascade-safe order.
  /// Hoisted keyframes blocks come first since atomic rules reference them.
  pub sheets: Vec<String>,
  pub diagnostics: Vec<Diagnostic>,
}

/// Transform CSS text into atomic rules and their class names.
pub fn transform_css(css: &str, options: &CssOptions) -> Result<TransformedCss, CssError> {
  let nodes = parser::parse(css)?;
  let mut output = atomic::atomicify(&nodes, options)?;

  // Class names keep declaration order; the sheet is reordered for cascade
  // safety independently.
  let class_names: Vec<String> = output
    .rules
    .iter()
    .filter(|rule| !rule.class_name.is_empty())
    .map(|rule| rule.class_name.clone())
    .collect::<IndexSet<String>>()
    .into_iter()
    .collect();

  sort::sort_atomic_rules(&mut output.rules);

  let mut sheets: IndexSet<String> = output.keyframes.iter().cloned().collect();
  for rule in &output.rules {
    sheets.insert(rule.to_css_text());
  }

  Ok(TransformedCss {
    class_names,
    sheets: sheets.into_iter().collect(),
    diagnostics: output.diagnostics,
  })
}

#[cfg(test)]
mod tests {
  use super::*;
  use pretty_assertions::assert_eq;

  #[test]
  fn duplicate_declarations_share_one_rule() {
    let result = transform_css("color: blue; color: blue;", &CssOptions::default()).unwrap();
    assert_eq!(result.sheets, vec!["._syaz13q2{color:blue}".to_string()]);
    assert_eq!(result.class_names, vec!["_syaz13q2".to_string()]);
  }

  #[test]
  fn repeated_calls_are_deterministic() {
    let first = transform_css("font-size: 12px;", &CssOptions::default()).unwrap();
    let second = transform_css("font-size: 12px;", &CssOptions::default()).unwrap();
    assert_eq!(first, second);
  }
}
