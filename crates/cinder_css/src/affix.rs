//! Prefix/suffix extraction around template interpolations.
//!
//! When a dynamic expression is interpolated into CSS text, any literal glue
//! around the hole (a unit like `px`, a quote, a leading `-`, or a `url(...)`
//! wrapper) must travel with the runtime value rather than stay inside the
//! `var()` reference, so that the custom property can be omitted cleanly when
//! the value is absent.

use once_cell::sync::Lazy;
use regex::Regex;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BeforeInterpolation {
  /// CSS text preceding the interpolation with the prefix removed.
  pub css: String,
  /// Literal characters to apply to the runtime value before it.
  pub variable_prefix: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AfterInterpolation {
  /// CSS text following the interpolation with the suffix removed.
  pub css: String,
  /// Literal characters to apply to the runtime value after it.
  pub variable_suffix: String,
}

static UNIT_REGEX: Lazy<Regex> = Lazy::new(|| {
  const UNITS: &[&str] = &[
    "em", "ex", "cap", "ch", "ic", "rem", "lh", "rlh", "vw", "vh", "vi", "vb", "vmin", "vmax",
    "cm", "mm", "Q", "in", "pc", "pt", "px", "deg", "grad", "rad", "turn", "s", "ms", "Hz", "kHz",
    "dpi", "dpcm", "dppx", "x", "fr", "%",
  ];

  let pattern = format!(
    "^(({}|\"|'))(;|,|\\n| |\\\\)?",
    UNITS
      .iter()
      .map(|unit| regex::escape(unit))
      .collect::<Vec<_>>()
      .join("|")
  );

  Regex::new(&pattern).expect("valid css unit regex")
});

fn before_interpolation(input: &str) -> BeforeInterpolation {
  let mut css = input.to_string();
  let mut variable_prefix = String::new();

  if let Some(last) = css.chars().last() {
    if matches!(last, '"' | '\'' | '-') {
      css.pop();
      variable_prefix.push(last);
    }
  }

  BeforeInterpolation {
    css,
    variable_prefix,
  }
}

fn after_interpolation(input: &str) -> AfterInterpolation {
  if let Some(captures) = UNIT_REGEX.captures(input) {
    if let Some(unit) = captures.get(1) {
      let mut css = input.to_string();
      css.replace_range(unit.range(), "");
      return AfterInterpolation {
        css,
        variable_suffix: unit.as_str().to_string(),
      };
    }
  }

  AfterInterpolation {
    css: input.to_string(),
    variable_suffix: String::new(),
  }
}

/// Split the CSS text on either side of an interpolation into the text that
/// stays in the sheet and the affixes that wrap the runtime value.
///
/// `url(` / `)` pairs are only treated as affixes when both sides are
/// present, so a bare `url(` in `before` stays in the sheet.
pub fn css_affix_interpolation(
  before: &str,
  after: &str,
) -> (BeforeInterpolation, AfterInterpolation) {
  if before.ends_with("url(") && after.starts_with(')') {
    let css_before = &before[..before.len() - "url(".len()];
    let css_after = &after[1..];

    return (
      BeforeInterpolation {
        css: css_before.to_string(),
        variable_prefix: "url(".into(),
      },
      AfterInterpolation {
        css: css_after.to_string(),
        variable_suffix: ")".into(),
      },
    );
  }

  (before_interpolation(before), after_interpolation(after))
}
