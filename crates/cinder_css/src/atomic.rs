//! Atomic rule generation.
//!
//! Every declaration becomes its own rule with a generated class name of the
//! form `_` + 4-char group hash + 4-char value hash. The group hash covers
//! the at-rule chain, the normalized selector and the property, so two
//! declarations for the same (selector, property) pair land in the same
//! override group no matter which source file produced them.

use std::collections::{HashMap, HashSet};

use indexmap::IndexMap;
use regex::Regex;

use crate::error::{CssError, Diagnostic};
use crate::options::CssOptions;
use crate::parser::Node;
use crate::properties;

/// One generated atomic rule, not yet rendered to CSS text.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AtomicRule {
  /// The class name to hand to the runtime. When a compression alias exists
  /// this is the short `_{group}_{alias}` form.
  pub class_name: String,
  /// Rendered selector, e.g. `._1wyb1fwx:hover` or `._1wyb1fwx, .a`.
  pub selector: String,
  /// The selector before nesting substitution, e.g. `&:hover`. Drives
  /// bucket ordering.
  pub normalized_selector: String,
  /// Minified declaration text, e.g. `font-size:12px`.
  pub declaration: String,
  /// Enclosing at-rules, outermost first, e.g. `media (min-width: 30rem)`.
  pub at_rules: Vec<String>,
}

impl AtomicRule {
  pub fn to_css_text(&self) -> String {
    let mut text = format!("{}{{{}}}", self.selector, self.declaration);
    for label in self.at_rules.iter().rev() {
      text = format!("@{label}{{{text}}}");
    }
    text
  }
}

#[derive(Debug)]
pub struct AtomicifyOutput {
  pub rules: Vec<AtomicRule>,
  /// Hoisted `@keyframes` blocks, deduplicated by content, rendered.
  pub keyframes: Vec<String>,
  pub diagnostics: Vec<Diagnostic>,
}

/// Convert a parsed node tree into atomic rules.
pub fn atomicify(nodes: &[Node], options: &CssOptions) -> Result<AtomicifyOutput, CssError> {
  if let Some(prefix) = options.class_hash_prefix.as_deref() {
    if !is_css_identifier_valid(prefix) {
      return Err(CssError::InvalidHashPrefix(prefix.to_string()));
    }
  }

  let keyframes = collect_keyframes(nodes);

  let mut walker = Walker {
    options,
    keyframes: &keyframes,
    rules: Vec::new(),
    diagnostics: Vec::new(),
    seen_properties: HashMap::new(),
  };
  walker.walk(nodes, "&", "", &mut Vec::new())?;

  let rules = walker.rules;
  let diagnostics = walker.diagnostics;
  Ok(AtomicifyOutput {
    rules,
    keyframes: keyframes.sheets,
    diagnostics,
  })
}

struct Walker<'a> {
  options: &'a CssOptions,
  keyframes: &'a KeyframesRegistry,
  rules: Vec<AtomicRule>,
  diagnostics: Vec<Diagnostic>,
  /// Per (at-rule label, selector) property tracking for the
  /// shorthand/longhand mixing diagnostic.
  seen_properties: HashMap<String, PropertyTracker>,
}

#[derive(Default)]
struct PropertyTracker {
  properties: HashSet<String>,
  /// Shorthands implied by longhands already seen in this scope.
  implied_shorthands: HashSet<&'static str>,
}

impl Walker<'_> {
  fn walk(
    &mut self,
    nodes: &[Node],
    selector: &str,
    at_rule_label: &str,
    at_rule_chain: &mut Vec<String>,
  ) -> Result<(), CssError> {
    for node in nodes {
      match node {
        Node::Declaration {
          property,
          value,
          important,
        } => {
          self.push_declaration(property, value, *important, selector, at_rule_label, at_rule_chain);
        }
        Node::Rule {
          selector: child,
          nodes,
        } => {
          let resolved = resolve_selector(selector, child);
          self.walk(nodes, &resolved, at_rule_label, at_rule_chain)?;
        }
        Node::AtRule {
          name,
          params,
          nodes,
        } => {
          if is_keyframes(name) {
            continue;
          }
          match classify_at_rule(name)? {
            AtRuleKind::Atomicify => {
              let label = format!("{at_rule_label}{name}{params}");
              at_rule_chain.push(render_at_rule_label(name, params));
              self.walk(nodes, selector, &label, at_rule_chain)?;
              at_rule_chain.pop();
            }
            AtRuleKind::PassThrough => {
              // Emitted verbatim as its own sheet via a synthetic rule with
              // no class name.
              self.rules.push(AtomicRule {
                class_name: String::new(),
                selector: format!("@{}", render_at_rule_label(name, params)),
                normalized_selector: "&".to_string(),
                declaration: render_block(nodes),
                at_rules: at_rule_chain.clone(),
              });
            }
          }
        }
      }
    }

    Ok(())
  }

  fn push_declaration(
    &mut self,
    property: &str,
    value: &str,
    important: bool,
    selector: &str,
    at_rule_label: &str,
    at_rule_chain: &[String],
  ) {
    self.check_property(property, selector, at_rule_label);

    let value = self.keyframes.rename_in_value(property, value);
    let value = minify_value(&value);

    let prefix = self.options.class_hash_prefix.as_deref().unwrap_or("");
    let at_rule = if at_rule_label.is_empty() {
      "undefined"
    } else {
      at_rule_label
    };
    let group_seed = format!("{prefix}{at_rule}{selector}{property}");
    let group: String = cinder_hash::hash(&group_seed).chars().take(4).collect();

    let mut value_seed = value.clone();
    if important {
      value_seed.push_str("true");
    }
    let value_hash: String = cinder_hash::hash(&value_seed).chars().take(4).collect();

    let full_class = format!("_{group}{value_hash}");

    let alias = self
      .options
      .class_name_compression_map
      .as_ref()
      .and_then(|map| map.get(&full_class[1..]));

    let (class_name, rendered_selector) = match alias {
      Some(alias) => (
        format!("_{group}_{alias}"),
        format!(
          "{}, {}",
          replace_nesting_selector(selector, &full_class),
          replace_nesting_selector(selector, alias)
        ),
      ),
      None => (
        full_class.clone(),
        replace_nesting_selector(selector, &full_class),
      ),
    };

    let mut declaration = format!("{property}:{value}");
    if important {
      declaration.push_str("!important");
    }

    self.rules.push(AtomicRule {
      class_name,
      selector: rendered_selector,
      normalized_selector: selector.to_string(),
      declaration,
      at_rules: at_rule_chain.to_vec(),
    });
  }

  fn check_property(&mut self, property: &str, selector: &str, at_rule_label: &str) {
    if !self.options.check_property_validity || properties::bypasses_validation(property) {
      return;
    }

    if !properties::is_known_property(property) {
      let message = format!("Unknown property '{property}'.");
      tracing::warn!("{message}");
      self.diagnostics.push(Diagnostic::new(message));
      return;
    }

    let scope = format!("{at_rule_label}{selector}");
    let tracker = self.seen_properties.entry(scope).or_default();

    if let Some(shorthand) = properties::parent_shorthand(property) {
      if tracker.properties.contains(shorthand) {
        let message = format!(
          "Longhand property '{property}' mixed with its shorthand '{shorthand}' in the same rule."
        );
        tracing::warn!("{message}");
        self.diagnostics.push(Diagnostic::new(message));
      }
      tracker.implied_shorthands.insert(shorthand);
    }
    if tracker.implied_shorthands.contains(property) && !tracker.properties.contains(property) {
      let message =
        format!("Shorthand property '{property}' mixed with one of its longhands in the same rule.");
      tracing::warn!("{message}");
      self.diagnostics.push(Diagnostic::new(message));
    }

    tracker.properties.insert(property.to_string());
  }
}

/// Resolve a child selector against its parent path. The child is first
/// normalized to contain `&` (orphaned pseudos attach directly, anything else
/// becomes a descendant), then `&` is substituted with the parent path.
fn resolve_selector(parent: &str, child: &str) -> String {
  normalize_selector(child).replace('&', parent)
}

fn normalize_selector(selector: &str) -> String {
  let trimmed = selector.trim();
  let collapsed = collapse_adjacent_nesting_selectors(trimmed);
  let collapsed = collapsed.trim();
  if collapsed.is_empty() {
    return "&".to_string();
  }
  if collapsed.contains('&') {
    return collapsed.to_string();
  }
  if collapsed.starts_with(':') {
    return format!("&{collapsed}");
  }

  format!("& {collapsed}")
}

fn collapse_adjacent_nesting_selectors(selector: &str) -> String {
  let mut out = String::with_capacity(selector.len());
  let mut chars = selector.chars().peekable();
  while let Some(ch) = chars.next() {
    if ch == '&' {
      out.push('&');
      let mut saw_ws = false;
      while let Some(next) = chars.peek() {
        if next.is_whitespace() {
          saw_ws = true;
          chars.next();
        } else {
          break;
        }
      }
      if let Some('&') = chars.peek().copied() {
        continue;
      }
      if saw_ws {
        out.push(' ');
      }
      continue;
    }
    out.push(ch);
  }
  out
}

fn replace_nesting_selector(selector: &str, class_name: &str) -> String {
  selector.replace('&', &format!(".{class_name}"))
}

fn render_at_rule_label(name: &str, params: &str) -> String {
  if params.is_empty() {
    name.to_string()
  } else {
    format!("{name} {params}")
  }
}

/// Normalize a value before hashing and emission: fractional numbers drop
/// their leading zero and whitespace around multiplication inside calc() is
/// trimmed. Hashes only stay stable across source spellings (`0.5` vs `.5`)
/// because this runs on every path that renders a declaration.
fn minify_value(value: &str) -> String {
  strip_fraction_leading_zeros(value)
    .replace(" *", "*")
    .replace("* ", "*")
    .replace("*-", "* -")
    .replace("*+", "* +")
}

fn strip_fraction_leading_zeros(value: &str) -> String {
  let mut out = String::with_capacity(value.len());
  let mut prev: Option<char> = None;
  let mut chars = value.chars().peekable();
  while let Some(ch) = chars.next() {
    // `0` opens a fraction only when nothing numeric precedes it, so `10.5`
    // and `1.05` stay untouched.
    if ch == '0'
      && chars.peek() == Some(&'.')
      && !prev.is_some_and(|p| p.is_ascii_alphanumeric() || p == '.')
    {
      prev = Some(ch);
      continue;
    }
    out.push(ch);
    prev = Some(ch);
  }
  out
}

enum AtRuleKind {
  Atomicify,
  PassThrough,
}

const ALLOWED_AT_RULES: [&str; 8] = [
  "container",
  "-moz-document",
  "else",
  "layer",
  "media",
  "starting-style",
  "supports",
  "when",
];
const FORBIDDEN_AT_RULES: [&str; 3] = ["charset", "import", "namespace"];
const IGNORED_AT_RULES: [&str; 7] = [
  "color-profile",
  "counter-style",
  "font-face",
  "font-palette-values",
  "keyframes",
  "page",
  "property",
];

fn classify_at_rule(name: &str) -> Result<AtRuleKind, CssError> {
  if ALLOWED_AT_RULES.contains(&name) {
    Ok(AtRuleKind::Atomicify)
  } else if FORBIDDEN_AT_RULES.contains(&name) {
    Err(CssError::ForbiddenAtRule(name.to_string()))
  } else if IGNORED_AT_RULES.contains(&name) {
    Ok(AtRuleKind::PassThrough)
  } else {
    Err(CssError::UnknownAtRule(name.to_string()))
  }
}

fn is_keyframes(name: &str) -> bool {
  name == "keyframes" || name.ends_with("-keyframes")
}

struct KeyframesRegistry {
  /// Source animation name to generated content-hash name.
  renames: IndexMap<String, String>,
  sheets: Vec<String>,
}

impl KeyframesRegistry {
  fn rename_in_value(&self, property: &str, value: &str) -> String {
    if self.renames.is_empty() || !matches!(property, "animation" | "animation-name") {
      return value.to_string();
    }

    let mut out = value.to_string();
    for (source, generated) in &self.renames {
      let pattern = format!(r"\b{}\b", regex::escape(source));
      if let Ok(word) = Regex::new(&pattern) {
        out = word.replace_all(&out, generated.as_str()).into_owned();
      }
    }
    out
  }
}

/// Hoist keyframes blocks: name them by content hash so identical animations
/// from unrelated sources collapse into one rule. Blocks nested inside rules
/// or other at-rules hoist to the top level as well, matching how the walker
/// skips them at any depth.
fn collect_keyframes(nodes: &[Node]) -> KeyframesRegistry {
  let mut renames: IndexMap<String, String> = IndexMap::new();
  let mut by_content: IndexMap<String, String> = IndexMap::new();
  collect_keyframes_into(nodes, &mut renames, &mut by_content);

  let sheets = by_content
    .iter()
    .map(|(content, name)| format!("@keyframes {name}{{{content}}}"))
    .collect();

  KeyframesRegistry { renames, sheets }
}

fn collect_keyframes_into(
  nodes: &[Node],
  renames: &mut IndexMap<String, String>,
  by_content: &mut IndexMap<String, String>,
) {
  for node in nodes {
    match node {
      Node::AtRule {
        name,
        params,
        nodes,
      } if is_keyframes(name) => {
        if params.is_empty() {
          continue;
        }
        let content = render_block(nodes);
        let generated = by_content
          .entry(content.clone())
          .or_insert_with(|| keyframes_name(&content))
          .clone();
        renames.insert(params.clone(), generated);
      }
      Node::AtRule { nodes, .. } | Node::Rule { nodes, .. } => {
        collect_keyframes_into(nodes, renames, by_content);
      }
      Node::Declaration { .. } => {}
    }
  }
}

/// Class names can't start with a digit, so digit-leading hashes get a `k`.
fn keyframes_name(content: &str) -> String {
  let hashed = cinder_hash::hash(content);
  if hashed.starts_with(|ch: char| ch.is_ascii_digit()) {
    format!("k{hashed}")
  } else {
    hashed
  }
}

/// Render a node tree to minified CSS text, used for keyframes bodies and
/// pass-through at-rule blocks.
fn render_block(nodes: &[Node]) -> String {
  let mut out = String::new();
  let mut pending_declarations: Vec<String> = Vec::new();

  let flush = |out: &mut String, pending: &mut Vec<String>| {
    if !pending.is_empty() {
      out.push_str(&pending.join(";"));
      pending.clear();
    }
  };

  for node in nodes {
    match node {
      Node::Declaration {
        property,
        value,
        important,
      } => {
        let mut text = format!("{property}:{value}");
        if *important {
          text.push_str("!important");
        }
        pending_declarations.push(text);
      }
      Node::Rule { selector, nodes } => {
        flush(&mut out, &mut pending_declarations);
        out.push_str(selector);
        out.push('{');
        out.push_str(&render_block(nodes));
        out.push('}');
      }
      Node::AtRule {
        name,
        params,
        nodes,
      } => {
        flush(&mut out, &mut pending_declarations);
        out.push('@');
        out.push_str(&render_at_rule_label(name, params));
        out.push('{');
        out.push_str(&render_block(nodes));
        out.push('}');
      }
    }
  }

  flush(&mut out, &mut pending_declarations);
  out
}

fn is_css_identifier_valid(value: &str) -> bool {
  let mut chars = value.chars();
  match chars.next() {
    Some(first) if is_identifier_start(first) => chars.all(is_identifier_continue),
    _ => false,
  }
}

fn is_identifier_start(ch: char) -> bool {
  ch.is_ascii_alphabetic() || ch == '-' || ch == '_'
}

fn is_identifier_continue(ch: char) -> bool {
  ch.is_ascii_alphanumeric() || ch == '-' || ch == '_'
}
