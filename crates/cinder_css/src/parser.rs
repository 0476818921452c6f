//! Lightweight CSS tokenizer.
//!
//! Splits CSS text on `:` / `;` / `{` / `}` while respecting strings,
//! parentheses and comments. This is deliberately not a spec-complete CSS
//! parser; it produces just enough structure for atomic rule generation:
//! declarations, nested rules and at-rules.

use crate::error::CssError;

/// One node of parsed CSS.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Node {
  Declaration {
    property: String,
    value: String,
    important: bool,
  },
  /// A nested rule, e.g. `&:hover { ... }` or `> span { ... }`.
  Rule { selector: String, nodes: Vec<Node> },
  /// An at-rule with a block, e.g. `@media (...) { ... }`.
  AtRule {
    name: String,
    params: String,
    nodes: Vec<Node>,
  },
}

/// Parse CSS text into a node tree.
pub fn parse(css: &str) -> Result<Vec<Node>, CssError> {
  let mut input = Cursor::new(css);
  let nodes = parse_block(&mut input)?;

  if input.peek().is_some() {
    // A stray `}` is the only way parse_block returns early.
    return Err(CssError::UnbalancedBraces {
      context: input.context(),
    });
  }

  Ok(nodes)
}

fn parse_block(input: &mut Cursor<'_>) -> Result<Vec<Node>, CssError> {
  let mut nodes = Vec::new();

  loop {
    input.skip_trivia();

    match input.peek() {
      None => break,
      Some('}') => break,
      Some(';') => {
        input.bump();
      }
      _ => {
        let (prelude, terminator) = input.read_prelude()?;
        let prelude = prelude.trim();

        match terminator {
          Some('{') => {
            input.bump();
            let children = parse_block(input)?;
            match input.peek() {
              Some('}') => {
                input.bump();
              }
              _ => {
                return Err(CssError::UnbalancedBraces {
                  context: prelude.to_string(),
                });
              }
            }
            if !prelude.is_empty() {
              nodes.push(block_node(prelude, children));
            }
          }
          _ => {
            if let Some(declaration) = parse_declaration(prelude) {
              nodes.push(declaration);
            }
          }
        }
      }
    }
  }

  Ok(nodes)
}

fn block_node(prelude: &str, nodes: Vec<Node>) -> Node {
  if let Some(rest) = prelude.strip_prefix('@') {
    let (name, params) = match rest.find(char::is_whitespace) {
      Some(at) => (&rest[..at], rest[at..].trim()),
      None => (rest, ""),
    };
    Node::AtRule {
      name: name.to_string(),
      params: params.to_string(),
      nodes,
    }
  } else {
    Node::Rule {
      selector: prelude.to_string(),
      nodes,
    }
  }
}

fn parse_declaration(text: &str) -> Option<Node> {
  let colon = find_declaration_colon(text)?;
  let property = text[..colon].trim();
  let mut value = text[colon + 1..].trim();

  if property.is_empty() || value.is_empty() {
    return None;
  }

  let mut important = false;
  if let Some(stripped) = value.strip_suffix("!important") {
    important = true;
    value = stripped.trim_end();
  }

  Some(Node::Declaration {
    property: property.to_string(),
    value: collapse_whitespace(value),
    important,
  })
}

/// Find the colon separating property from value, skipping any leading
/// pseudo-selector-ish colons (a declaration's property never starts with
/// `:`) and colons inside parentheses or strings.
fn find_declaration_colon(text: &str) -> Option<usize> {
  let mut depth = 0usize;
  let mut quote: Option<char> = None;

  for (i, ch) in text.char_indices() {
    match (quote, ch) {
      (Some(open), _) if ch == open => quote = None,
      (Some(_), _) => {}
      (None, '"') | (None, '\'') => quote = Some(ch),
      (None, '(') => depth += 1,
      (None, ')') => depth = depth.saturating_sub(1),
      (None, ':') if depth == 0 && i > 0 => return Some(i),
      _ => {}
    }
  }

  None
}

/// Collapse runs of whitespace (including newlines) into single spaces.
pub fn collapse_whitespace(text: &str) -> String {
  let mut out = String::with_capacity(text.len());
  let mut in_space = false;
  for ch in text.chars() {
    if ch.is_whitespace() {
      in_space = true;
    } else {
      if in_space && !out.is_empty() {
        out.push(' ');
      }
      in_space = false;
      out.push(ch);
    }
  }
  out
}

struct Cursor<'a> {
  rest: &'a str,
}

impl<'a> Cursor<'a> {
  fn new(input: &'a str) -> Self {
    Self { rest: input }
  }

  fn peek(&self) -> Option<char> {
    self.rest.chars().next()
  }

  fn bump(&mut self) {
    if let Some(ch) = self.peek() {
      self.rest = &self.rest[ch.len_utf8()..];
    }
  }

  fn context(&self) -> String {
    self.rest.chars().take(24).collect()
  }

  fn skip_trivia(&mut self) {
    loop {
      let trimmed = self.rest.trim_start();
      if let Some(after) = trimmed.strip_prefix("/*") {
        self.rest = match after.find("*/") {
          Some(end) => &after[end + 2..],
          None => "",
        };
      } else {
        self.rest = trimmed;
        return;
      }
    }
  }

  /// Read raw text up to an unquoted, unparenthesised `{`, `;` or `}`.
  /// Returns the text and the terminator (which is not consumed, except
  /// that `;` is left for the caller loop).
  fn read_prelude(&mut self) -> Result<(String, Option<char>), CssError> {
    let mut out = String::new();
    let mut depth = 0usize;
    let mut quote: Option<char> = None;

    while let Some(ch) = self.peek() {
      match (quote, ch) {
        (Some(open), _) if ch == open => {
          quote = None;
          out.push(ch);
          self.bump();
        }
        (Some(_), _) => {
          out.push(ch);
          self.bump();
        }
        (None, '"') | (None, '\'') => {
          quote = Some(ch);
          out.push(ch);
          self.bump();
        }
        (None, '(') => {
          depth += 1;
          out.push(ch);
          self.bump();
        }
        (None, ')') => {
          depth = depth.saturating_sub(1);
          out.push(ch);
          self.bump();
        }
        (None, '{') | (None, '}') if depth == 0 => {
          return Ok((out, Some(ch)));
        }
        (None, ';') if depth == 0 => {
          self.bump();
          return Ok((out, Some(';')));
        }
        (None, '/') if self.rest.starts_with("/*") => {
          self.skip_trivia();
        }
        _ => {
          out.push(ch);
          self.bump();
        }
      }
    }

    Ok((out, None))
  }
}

#[cfg(test)]
mod tests {
  use super::{parse, Node};
  use indoc::indoc;
  use pretty_assertions::assert_eq;

  fn decl(property: &str, value: &str) -> Node {
    Node::Declaration {
      property: property.to_string(),
      value: value.to_string(),
      important: false,
    }
  }

  #[test]
  fn parses_flat_declarations() {
    let nodes = parse("font-size: 12px; color: blue;").unwrap();
    assert_eq!(nodes, vec![decl("font-size", "12px"), decl("color", "blue")]);
  }

  #[test]
  fn parses_nested_selector() {
    let nodes = parse("&:hover { color: red; }").unwrap();
    assert_eq!(
      nodes,
      vec![Node::Rule {
        selector: "&:hover".to_string(),
        nodes: vec![decl("color", "red")],
      }]
    );
  }

  #[test]
  fn parses_bare_pseudo_selector() {
    // A leading `:` opens a selector, not a declaration.
    let nodes = parse(":focus { outline: none; }").unwrap();
    assert_eq!(
      nodes,
      vec![Node::Rule {
        selector: ":focus".to_string(),
        nodes: vec![decl("outline", "none")],
      }]
    );
  }

  #[test]
  fn parses_media_query() {
    let css = indoc! {"
      @media (min-width: 30rem) {
        user-select: none;
      }
    "};
    let nodes = parse(css).unwrap();
    assert_eq!(
      nodes,
      vec![Node::AtRule {
        name: "media".to_string(),
        params: "(min-width: 30rem)".to_string(),
        nodes: vec![decl("user-select", "none")],
      }]
    );
  }

  #[test]
  fn keeps_parenthesised_values_whole() {
    let nodes = parse("background: url(https://example.com/a;b.png);").unwrap();
    assert_eq!(
      nodes,
      vec![decl("background", "url(https://example.com/a;b.png)")]
    );
  }

  #[test]
  fn strips_comments_and_collapses_whitespace() {
    let nodes = parse("margin: 0   auto; /* gutter */ padding: 0;").unwrap();
    assert_eq!(nodes, vec![decl("margin", "0 auto"), decl("padding", "0")]);
  }

  #[test]
  fn extracts_important_flag() {
    let nodes = parse("color: blue !important;").unwrap();
    assert_eq!(
      nodes,
      vec![Node::Declaration {
        property: "color".to_string(),
        value: "blue".to_string(),
        important: true,
      }]
    );
  }

  #[test]
  fn rejects_unbalanced_braces() {
    assert!(parse("&:hover { color: red;").is_err());
    assert!(parse("color: red; }").is_err());
  }

  #[test]
  fn parses_custom_property_declarations() {
    let nodes = parse("--main-color: #fff;").unwrap();
    assert_eq!(nodes, vec![decl("--main-color", "#fff")]);
  }
}
