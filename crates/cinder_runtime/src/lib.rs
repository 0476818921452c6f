//! Render-time helpers consumed by compiled output.
//!
//! The compiler emits `ax([...])` calls to merge class lists and `ix(...)`
//! calls to feed dynamic values into CSS custom properties. Both run on the
//! render hot path, so they stay dependency-light and allocate only the one
//! map `ax` needs to track groups.

use indexmap::IndexMap;
use std::fmt::Write;

/// Marker character that opens every atomic class name.
const ATOMIC_MARKER: u8 = b'_';

/// Length of the group key for atomic class names: the marker plus the
/// four-character group hash.
const GROUP_KEY_LEN: usize = 5;

/// Joins classes together, keeping at most one atomic declaration per group.
///
/// Atomic class names take the form `_{group}{value}` where both hashes are
/// four characters long. For every class name the group key is its first five
/// characters when it starts with the atomic marker, or the entire name
/// otherwise (so consumer-supplied class names never collide with each other
/// unless identical). Later entries in the same group overwrite earlier
/// ones; output preserves the order in which each group was first seen.
///
/// ```
/// use cinder_runtime::ax;
///
/// assert_eq!(ax(&[Some("_aaaabbbb"), Some("_aaaacccc")]), "_aaaacccc");
/// ```
pub fn ax(classes: &[Option<&str>]) -> String {
  let mut found: IndexMap<&str, &str> = IndexMap::new();

  for entry in classes {
    let Some(entry) = entry else {
      continue;
    };

    for class_name in entry.split_ascii_whitespace() {
      let group = if class_name.as_bytes()[0] == ATOMIC_MARKER {
        class_name.get(..GROUP_KEY_LEN).unwrap_or(class_name)
      } else {
        class_name
      };
      found.insert(group, class_name);
    }
  }

  let mut out = String::new();
  for (i, class_name) in found.values().enumerate() {
    if i > 0 {
      out.push(' ');
    }
    out.push_str(class_name);
  }
  out
}

/// A dynamic value bound to a CSS custom property at render time.
#[derive(Clone, Debug, PartialEq)]
pub enum CssVar {
  String(String),
  Number(f64),
  Bool(bool),
}

impl CssVar {
  fn write_into(&self, out: &mut String) {
    match self {
      CssVar::String(text) => out.push_str(text),
      CssVar::Number(num) => {
        if num.fract() == 0.0 && num.is_finite() {
          let _ = write!(out, "{}", *num as i64);
        } else {
          let _ = write!(out, "{num}");
        }
      }
      CssVar::Bool(value) => {
        let _ = write!(out, "{value}");
      }
    }
  }
}

impl From<&str> for CssVar {
  fn from(value: &str) -> Self {
    CssVar::String(value.to_string())
  }
}

impl From<f64> for CssVar {
  fn from(value: f64) -> Self {
    CssVar::Number(value)
  }
}

/// Wraps a dynamic value with optional suffix and prefix strings before it
/// is assigned to a CSS custom property. An absent value returns `None` so
/// the property is omitted instead of becoming the string `"undefined"`.
pub fn ix(value: Option<CssVar>, suffix: Option<&str>, prefix: Option<&str>) -> Option<String> {
  let value = value?;

  let mut out = String::new();
  if let Some(prefix) = prefix {
    out.push_str(prefix);
  }
  value.write_into(&mut out);
  if let Some(suffix) = suffix {
    out.push_str(suffix);
  }
  Some(out)
}
