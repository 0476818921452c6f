//! Normalization of style sources into CSS items.
//!
//! A style source is one of a closed set of expression shapes: object
//! literal, template literal, array of mixins, or a composition call whose
//! arguments are themselves style sources. Each shape has one builder, so
//! the dispatch stays exhaustive.

use swc_core::ecma::ast::{
  ArrayLit, BinExpr, BinaryOp, CondExpr, Expr, Lit, ObjectLit, Prop, PropName, PropOrSpread, Tpl,
};

use cinder_css::properties::{add_unit_if_needed, kebab_case};

use crate::codegen::serialize_expression;
use crate::context::EvalContext;
use crate::error::TransformError;
use crate::evaluate::{evaluate, evaluate_arrow_body, ConstValue, Evaluated};
use crate::items::{
  apply_selectors, ConditionalCssItem, CssItem, CssOutput, LogicalCssItem, LogicalOperator,
  Variable,
};

/// The closed set of style source shapes.
#[derive(Clone, Debug)]
pub enum StyleSource {
  Object(ObjectLit),
  Template(Tpl),
  /// Raw CSS text passed as a plain string literal.
  Text(String),
  /// An array of mixins applied in order.
  Array(Vec<StyleSource>),
  /// A composition call: each argument contributes its styles in order.
  Composition(Vec<StyleSource>),
  /// A mixin gated behind a logical short-circuit, e.g. `cond && styles`.
  Logical {
    expression: Expr,
    operator: LogicalOperator,
    source: Box<StyleSource>,
  },
  /// A mixin selected by a ternary. An absent branch contributes nothing.
  Conditional {
    test: Expr,
    consequent: Option<Box<StyleSource>>,
    alternate: Option<Box<StyleSource>>,
  },
}

impl StyleSource {
  /// Classify an expression as a style source, resolving identifiers
  /// through the context's bindings.
  pub fn classify(expr: &Expr, ctx: &mut EvalContext) -> Option<StyleSource> {
    match expr {
      Expr::Object(object) => Some(StyleSource::Object(object.clone())),
      Expr::Tpl(tpl) => Some(StyleSource::Template(tpl.clone())),
      Expr::TaggedTpl(tagged) => Some(StyleSource::Template((*tagged.tpl).clone())),
      Expr::Lit(Lit::Str(text)) => Some(StyleSource::Text(text.value.to_string())),
      Expr::Paren(paren) => StyleSource::classify(&paren.expr, ctx),
      Expr::Array(array) => Some(StyleSource::Array(classify_array(array, ctx))),
      Expr::Call(call) => {
        let sources = call
          .args
          .iter()
          .filter_map(|arg| StyleSource::classify(&arg.expr, ctx))
          .collect::<Vec<_>>();
        if sources.is_empty() {
          None
        } else {
          Some(StyleSource::Composition(sources))
        }
      }
      Expr::Ident(ident) => {
        let name = ident.sym.to_string();
        let bound = ctx.binding(&name).cloned()?;
        if !ctx.enter_identifier(&name) {
          return None;
        }
        let source = StyleSource::classify(&bound, ctx);
        ctx.leave_identifier(&name);
        source
      }
      Expr::Bin(bin) => {
        let operator = logical_operator(bin.op)?;
        let source = StyleSource::classify(&bin.right, ctx)?;
        Some(StyleSource::Logical {
          expression: (*bin.left).clone(),
          operator,
          source: Box::new(source),
        })
      }
      Expr::Cond(cond) => {
        let consequent = StyleSource::classify(&cond.cons, ctx).map(Box::new);
        let alternate = StyleSource::classify(&cond.alt, ctx).map(Box::new);
        if consequent.is_none() && alternate.is_none() {
          return None;
        }
        Some(StyleSource::Conditional {
          test: (*cond.test).clone(),
          consequent,
          alternate,
        })
      }
      _ => None,
    }
  }
}

fn classify_array(array: &ArrayLit, ctx: &mut EvalContext) -> Vec<StyleSource> {
  array
    .elems
    .iter()
    .flatten()
    .filter_map(|elem| StyleSource::classify(&elem.expr, ctx))
    .collect()
}

/// Build CSS items and variables for a style source.
pub fn build_css(source: &StyleSource, ctx: &mut EvalContext) -> Result<CssOutput, TransformError> {
  match source {
    StyleSource::Object(object) => build_object(object, ctx),
    StyleSource::Template(tpl) => build_template(tpl, ctx),
    StyleSource::Text(text) => {
      let mut out = CssOutput::new();
      if !text.trim().is_empty() {
        out.css.push(CssItem::unconditional(text.clone()));
      }
      Ok(out)
    }
    StyleSource::Array(sources) | StyleSource::Composition(sources) => {
      let mut out = CssOutput::new();
      for source in sources {
        out.extend(build_css(source, ctx)?);
      }
      Ok(out)
    }
    StyleSource::Logical {
      expression,
      operator,
      source,
    } => {
      let inner = build_css(source, ctx)?;
      let mut out = CssOutput::new();
      out.variables = inner.variables;
      for item in inner.css {
        out.css.push(gate_logical(expression, *operator, item)?);
      }
      Ok(out)
    }
    StyleSource::Conditional {
      test,
      consequent,
      alternate,
    } => {
      let consequent = match consequent {
        Some(source) => build_css(source, ctx)?,
        None => CssOutput::new(),
      };
      let alternate = match alternate {
        Some(source) => build_css(source, ctx)?,
        None => CssOutput::new(),
      };

      let mut out = CssOutput::new();
      match (
        flatten_unconditional(&consequent.css),
        flatten_unconditional(&alternate.css),
      ) {
        (Some(cons), Some(alt)) => {
          out.css.push(CssItem::Conditional(ConditionalCssItem {
            test: test.clone(),
            consequent: Box::new(CssItem::unconditional(cons)),
            alternate: Box::new(CssItem::unconditional(alt)),
          }));
        }
        _ => {
          // Arms with their own conditions cannot be merged into a single
          // ternary, so each item keeps its arm via an empty other side.
          for item in consequent.css {
            out.css.push(CssItem::Conditional(ConditionalCssItem {
              test: test.clone(),
              consequent: Box::new(item),
              alternate: Box::new(CssItem::unconditional(String::new())),
            }));
          }
          for item in alternate.css {
            out.css.push(CssItem::Conditional(ConditionalCssItem {
              test: test.clone(),
              consequent: Box::new(CssItem::unconditional(String::new())),
              alternate: Box::new(item),
            }));
          }
        }
      }
      out.variables.extend(consequent.variables);
      out.variables.extend(alternate.variables);
      Ok(out)
    }
  }
}

/// Gate a built item behind a logical mixin condition. Plain CSS becomes a
/// logical item; items that already carry a condition get wrapped in a
/// conditional with an empty other arm.
fn gate_logical(
  expression: &Expr,
  operator: LogicalOperator,
  item: CssItem,
) -> Result<CssItem, TransformError> {
  match item {
    CssItem::Unconditional(css) if css.trim().is_empty() => Ok(CssItem::Unconditional(css)),
    CssItem::Unconditional(css) => Ok(CssItem::Logical(LogicalCssItem {
      expression: expression.clone(),
      operator,
      css,
    })),
    nested => match operator {
      LogicalOperator::And => Ok(CssItem::Conditional(ConditionalCssItem {
        test: expression.clone(),
        consequent: Box::new(nested),
        alternate: Box::new(CssItem::unconditional(String::new())),
      })),
      LogicalOperator::Or => Ok(CssItem::Conditional(ConditionalCssItem {
        test: expression.clone(),
        consequent: Box::new(CssItem::unconditional(String::new())),
        alternate: Box::new(nested),
      })),
      LogicalOperator::Nullish => Err(TransformError::UnsupportedCssType),
    },
  }
}

/// Concatenate items into one CSS string, or `None` when any item carries
/// its own condition.
fn flatten_unconditional(items: &[CssItem]) -> Option<String> {
  let mut css = String::new();
  for item in items {
    match item {
      CssItem::Unconditional(text) => css.push_str(text),
      _ => return None,
    }
  }
  Some(css)
}

fn build_object(object: &ObjectLit, ctx: &mut EvalContext) -> Result<CssOutput, TransformError> {
  let mut out = CssOutput::new();

  for prop in &object.props {
    match prop {
      PropOrSpread::Spread(spread) => match StyleSource::classify(&spread.expr, ctx) {
        Some(source) => out.extend(build_css(&source, ctx)?),
        None => {
          tracing::warn!("Could not statically resolve spread in style object, skipping");
        }
      },
      PropOrSpread::Prop(prop) => match prop.as_ref() {
        Prop::KeyValue(kv) => {
          let Some(key) = prop_key_name(&kv.key) else {
            continue;
          };
          build_object_entry(&key, &kv.value, ctx, &mut out)?;
        }
        Prop::Shorthand(ident) => {
          let key = ident.sym.to_string();
          let value = Expr::Ident(ident.clone());
          build_object_entry(&key, &value, ctx, &mut out)?;
        }
        _ => {}
      },
    }
  }

  Ok(out)
}

fn build_object_entry(
  key: &str,
  value: &Expr,
  ctx: &mut EvalContext,
  out: &mut CssOutput,
) -> Result<(), TransformError> {
  // A nested object means the key is a selector or at-rule, not a property.
  if let Some(nested) = resolve_object(value, ctx) {
    let mut inner = build_object(&nested, ctx)?;
    let opener = vec![format!("{key} {{")];
    for item in &mut inner.css {
      apply_selectors(item, &opener);
    }
    out.extend(inner);
    return Ok(());
  }

  let property = kebab_case(key);
  build_declaration(&property, value, ctx, out)
}

fn build_declaration(
  property: &str,
  value: &Expr,
  ctx: &mut EvalContext,
  out: &mut CssOutput,
) -> Result<(), TransformError> {
  let value = unwrap_parens(value);

  if let Expr::Cond(cond) = value {
    if let Some(item) = conditional_value_item(property, cond, ctx)? {
      out.css.push(item);
      return Ok(());
    }
    push_variable_declaration(property, value, out);
    return Ok(());
  }

  if let Expr::Bin(bin) = value {
    if let Some(operator) = logical_operator(bin.op) {
      if let Some(item) = logical_value_item(property, bin, operator, ctx)? {
        out.css.push(item);
        return Ok(());
      }
      push_variable_declaration(property, value, out);
      return Ok(());
    }
  }

  if let Expr::Arrow(arrow) = value {
    if let Some(result) = evaluate_arrow_body(arrow, ctx) {
      match result {
        Evaluated::Constant(constant) => {
          push_constant_declaration(property, &constant, out);
        }
        Evaluated::Dynamic(body) => {
          build_declaration(property, &body, ctx, out)?;
        }
      }
      return Ok(());
    }
    push_variable_declaration(property, value, out);
    return Ok(());
  }

  match evaluate(value, ctx) {
    Evaluated::Constant(constant) => push_constant_declaration(property, &constant, out),
    Evaluated::Dynamic(expr) => push_variable_declaration(property, &expr, out),
  }
  Ok(())
}

fn push_constant_declaration(property: &str, value: &ConstValue, out: &mut CssOutput) {
  // Absent values drop the declaration entirely.
  if value.is_absent() {
    return;
  }
  out
    .css
    .push(CssItem::unconditional(declaration_text(property, value)));
}

fn push_variable_declaration(property: &str, expr: &Expr, out: &mut CssOutput) {
  let name = variable_name(expr, None, None);
  out
    .css
    .push(CssItem::unconditional(format!("{property}: var({name});")));
  out.variables.push(Variable {
    name,
    expression: expr.clone(),
    prefix: None,
    suffix: None,
  });
}

fn declaration_text(property: &str, value: &ConstValue) -> String {
  match value {
    ConstValue::Number(num) => format!("{property}: {};", add_unit_if_needed(property, *num)),
    other => format!("{property}: {};", other.to_css_text()),
  }
}

/// Decompose a ternary value into branch declarations. Returns `None` when a
/// branch cannot be represented as a discrete class (the caller then falls
/// back to a custom property).
fn conditional_value_item(
  property: &str,
  cond: &CondExpr,
  ctx: &mut EvalContext,
) -> Result<Option<CssItem>, TransformError> {
  let Some(consequent) = branch_item(property, &cond.cons, ctx)? else {
    return Ok(None);
  };
  let Some(alternate) = branch_item(property, &cond.alt, ctx)? else {
    return Ok(None);
  };

  Ok(Some(CssItem::Conditional(ConditionalCssItem {
    test: (*cond.test).clone(),
    consequent: Box::new(consequent),
    alternate: Box::new(alternate),
  })))
}

fn branch_item(
  property: &str,
  branch: &Expr,
  ctx: &mut EvalContext,
) -> Result<Option<CssItem>, TransformError> {
  let branch = unwrap_parens(branch);

  // Nested ternaries produce nested conditional items.
  if let Expr::Cond(cond) = branch {
    return conditional_value_item(property, cond, ctx);
  }

  match evaluate(branch, ctx) {
    Evaluated::Constant(constant) if constant.is_absent() => {
      Ok(Some(CssItem::unconditional(String::new())))
    }
    Evaluated::Constant(constant) => Ok(Some(CssItem::unconditional(declaration_text(
      property, &constant,
    )))),
    Evaluated::Dynamic(_) => Ok(None),
  }
}

/// Build a logical short-circuit declaration, e.g. `cond && value`. A
/// conditional on the right-hand side is a hard failure: two condition
/// layers cannot be flattened into independent class toggles.
fn logical_value_item(
  property: &str,
  bin: &BinExpr,
  operator: LogicalOperator,
  ctx: &mut EvalContext,
) -> Result<Option<CssItem>, TransformError> {
  if matches!(unwrap_parens(&bin.right), Expr::Cond(_)) {
    return Err(TransformError::UnsupportedCssType);
  }

  match evaluate(&bin.right, ctx) {
    // An absent right-hand side can never produce a value, so the whole
    // declaration drops instead of becoming a custom property.
    Evaluated::Constant(constant) if constant.is_absent() => {
      Ok(Some(CssItem::unconditional(String::new())))
    }
    Evaluated::Constant(constant) => Ok(Some(CssItem::Logical(LogicalCssItem {
      expression: (*bin.left).clone(),
      operator,
      css: declaration_text(property, &constant),
    }))),
    Evaluated::Dynamic(_) => Ok(None),
  }
}

fn logical_operator(op: BinaryOp) -> Option<LogicalOperator> {
  match op {
    BinaryOp::LogicalAnd => Some(LogicalOperator::And),
    BinaryOp::LogicalOr => Some(LogicalOperator::Or),
    BinaryOp::NullishCoalescing => Some(LogicalOperator::Nullish),
    _ => None,
  }
}

fn prop_key_name(key: &PropName) -> Option<String> {
  match key {
    PropName::Ident(ident) => Some(ident.sym.to_string()),
    PropName::Str(text) => Some(text.value.to_string()),
    _ => None,
  }
}

fn resolve_object(expr: &Expr, ctx: &mut EvalContext) -> Option<ObjectLit> {
  match expr {
    Expr::Object(object) => Some(object.clone()),
    Expr::Paren(paren) => resolve_object(&paren.expr, ctx),
    Expr::Ident(ident) => {
      let name = ident.sym.to_string();
      let bound = ctx.binding(&name).cloned()?;
      if !ctx.enter_identifier(&name) {
        return None;
      }
      let object = resolve_object(&bound, ctx);
      ctx.leave_identifier(&name);
      object
    }
    _ => None,
  }
}

fn unwrap_parens(expr: &Expr) -> &Expr {
  match expr {
    Expr::Paren(paren) => unwrap_parens(&paren.expr),
    _ => expr,
  }
}

/// Deterministic custom-property name. Distinct prefix/suffix wrapping of
/// the same expression yields distinct names, since the wrapped forms are
/// different values.
fn variable_name(expr: &Expr, prefix: Option<&str>, suffix: Option<&str>) -> String {
  let text = serialize_expression(expr).unwrap_or_default();
  let seed = format!(
    "{text}{}{}",
    prefix.unwrap_or_default(),
    suffix.unwrap_or_default()
  );
  format!("--_{}", cinder_hash::hash(&seed))
}

fn build_template(tpl: &Tpl, ctx: &mut EvalContext) -> Result<CssOutput, TransformError> {
  let mut out = CssOutput::new();
  let mut css = String::new();
  // Set when a conditional interpolation consumed the declaration's
  // terminating semicolon from the following quasi.
  let mut strip_semicolon = false;
  // Set when affix extraction rewrote the following quasi.
  let mut next_override: Option<String> = None;

  for (i, quasi) in tpl.quasis.iter().enumerate() {
    let mut text = match next_override.take() {
      Some(text) => text,
      None => quasi
        .cooked
        .as_ref()
        .map(|atom| atom.to_string())
        .unwrap_or_else(|| quasi.raw.to_string()),
    };
    if strip_semicolon {
      strip_semicolon = false;
      let trimmed = text.trim_start();
      text = trimmed.strip_prefix(';').unwrap_or(trimmed).to_string();
    }
    css.push_str(&text);

    let Some(expr) = tpl.exprs.get(i) else {
      continue;
    };
    let expr = unwrap_parens(expr);

    // Arrow interpolations evaluate their body with destructured props
    // treated as dynamic.
    let resolved = if let Expr::Arrow(arrow) = expr {
      evaluate_arrow_body(arrow, ctx).unwrap_or_else(|| Evaluated::Dynamic(expr.clone()))
    } else {
      evaluate(expr, ctx)
    };

    let dynamic = match resolved {
      Evaluated::Constant(constant) => {
        css.push_str(&constant.to_css_text());
        continue;
      }
      Evaluated::Dynamic(dynamic) => dynamic,
    };

    let after = tpl
      .quasis
      .get(i + 1)
      .map(|next| {
        next
          .cooked
          .as_ref()
          .map(|atom| atom.to_string())
          .unwrap_or_else(|| next.raw.to_string())
      })
      .unwrap_or_default();

    if let Some((head, item)) = interpolated_condition_item(&css, &dynamic, &after, ctx)? {
      if let Some(head) = head {
        out.css.push(CssItem::unconditional(head));
      }
      out.css.push(item);
      css.clear();
      strip_semicolon = true;
      continue;
    }

    // Custom-property fallback: literal glue around the hole travels with
    // the runtime value.
    let (before, after) = cinder_css::css_affix_interpolation(&css, &after);
    let prefix = (!before.variable_prefix.is_empty()).then(|| before.variable_prefix.clone());
    let suffix = (!after.variable_suffix.is_empty()).then(|| after.variable_suffix.clone());
    let name = variable_name(&dynamic, prefix.as_deref(), suffix.as_deref());

    css = before.css;
    css.push_str(&format!("var({name})"));
    next_override = Some(after.css);

    out.variables.push(Variable {
      name,
      expression: dynamic,
      prefix,
      suffix,
    });
  }

  if !css.trim().is_empty() {
    out.css.push(CssItem::unconditional(css));
  }

  Ok(out)
}

/// Try to decompose a conditional or logical interpolation into class-toggle
/// items. On success returns the accumulated text preceding the declaration
/// (if any) together with the conditional item. Returns `None` when the
/// interpolation is embedded in a way that requires the custom-property
/// fallback.
fn interpolated_condition_item(
  css: &str,
  dynamic: &Expr,
  after: &str,
  ctx: &mut EvalContext,
) -> Result<Option<(Option<String>, CssItem)>, TransformError> {
  let is_condition = matches!(dynamic, Expr::Cond(_))
    || matches!(dynamic, Expr::Bin(bin) if logical_operator(bin.op).is_some());
  if !is_condition {
    return Ok(None);
  }

  // Only safe at the top nesting level: inside a nested block the toggled
  // classes would lose their selector context.
  if !braces_balanced(css) {
    return Ok(None);
  }

  let split = css
    .rfind([';', '{', '}'])
    .map(|idx| idx + 1)
    .unwrap_or(0);
  let tail = css[split..].trim();

  let item = if tail.is_empty() {
    // `${cond && 'color: red;'}` — branches are whole declarations.
    build_interpolated_condition("", dynamic, ctx)?
  } else if is_value_position(tail) {
    // `color: ${cond ? 'red' : 'blue'};` — the tail holds the property. The
    // interpolation must be the whole value; a fragment concatenated next
    // to more text cannot become a class toggle.
    let terminated = {
      let trimmed = after.trim_start();
      trimmed.is_empty() || trimmed.starts_with(';') || trimmed.starts_with('}')
    };
    if !terminated {
      return Ok(None);
    }
    let property = tail.strip_suffix(':').map(str::trim_end).unwrap_or(tail);
    build_interpolated_condition(&format!("{property}:"), dynamic, ctx)?
  } else {
    None
  };

  let Some(item) = item else {
    return Ok(None);
  };

  let head = css[..split].to_string();
  let head = (!head.trim().is_empty()).then_some(head);
  Ok(Some((head, item)))
}

fn is_value_position(tail: &str) -> bool {
  let Some(property) = tail.strip_suffix(':') else {
    return false;
  };
  let property = property.trim_end();
  !property.is_empty()
    && property
      .chars()
      .all(|ch| ch.is_ascii_alphanumeric() || ch == '-')
}

/// Build the item for a condition interpolated into template text.
/// `declaration_head` is `"{property}:"` in value position or empty when the
/// branches are whole declarations.
fn build_interpolated_condition(
  declaration_head: &str,
  expr: &Expr,
  ctx: &mut EvalContext,
) -> Result<Option<CssItem>, TransformError> {
  match expr {
    Expr::Cond(cond) => {
      let Some(consequent) = interpolated_branch(declaration_head, &cond.cons, ctx)? else {
        return Ok(None);
      };
      let Some(alternate) = interpolated_branch(declaration_head, &cond.alt, ctx)? else {
        return Ok(None);
      };
      Ok(Some(CssItem::Conditional(ConditionalCssItem {
        test: (*cond.test).clone(),
        consequent: Box::new(consequent),
        alternate: Box::new(alternate),
      })))
    }
    Expr::Bin(bin) => {
      let Some(operator) = logical_operator(bin.op) else {
        return Ok(None);
      };
      if matches!(unwrap_parens(&bin.right), Expr::Cond(_)) {
        return Err(TransformError::UnsupportedCssType);
      }
      match evaluate(&bin.right, ctx) {
        Evaluated::Constant(constant) if constant.is_absent() => {
          Ok(Some(CssItem::unconditional(String::new())))
        }
        Evaluated::Constant(constant) => Ok(Some(CssItem::Logical(LogicalCssItem {
          expression: (*bin.left).clone(),
          operator,
          css: branch_css(declaration_head, &constant),
        }))),
        Evaluated::Dynamic(_) => Ok(None),
      }
    }
    _ => Ok(None),
  }
}

fn interpolated_branch(
  declaration_head: &str,
  branch: &Expr,
  ctx: &mut EvalContext,
) -> Result<Option<CssItem>, TransformError> {
  let branch = unwrap_parens(branch);

  if matches!(branch, Expr::Cond(_)) {
    return build_interpolated_condition(declaration_head, branch, ctx);
  }

  match evaluate(branch, ctx) {
    Evaluated::Constant(constant) if constant.is_absent() => {
      Ok(Some(CssItem::unconditional(String::new())))
    }
    Evaluated::Constant(constant) => Ok(Some(CssItem::unconditional(branch_css(
      declaration_head,
      &constant,
    )))),
    Evaluated::Dynamic(_) => Ok(None),
  }
}

fn branch_css(declaration_head: &str, value: &ConstValue) -> String {
  let text = value.to_css_text();
  if declaration_head.is_empty() {
    text
  } else {
    format!("{declaration_head} {text};")
  }
}

fn braces_balanced(text: &str) -> bool {
  let mut depth = 0i32;
  for ch in text.chars() {
    match ch {
      '{' => depth += 1,
      '}' => depth -= 1,
      _ => {}
    }
  }
  depth == 0
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::testing::parse_expr;
  use pretty_assertions::assert_eq;

  fn build(code: &str) -> CssOutput {
    let mut ctx = EvalContext::new();
    build_with_ctx(code, &mut ctx)
  }

  fn build_with_ctx(code: &str, ctx: &mut EvalContext) -> CssOutput {
    let expr = parse_expr(code);
    let source = StyleSource::classify(&expr, ctx).expect("classifies");
    build_css(&source, ctx).expect("builds")
  }

  #[test]
  fn numbers_gain_px_on_dimensional_properties_only() {
    let out = build("({ fontSize: 12, lineHeight: 1.5, opacity: 0 })");
    assert_eq!(
      out.css,
      vec![
        CssItem::unconditional("font-size: 12px;"),
        CssItem::unconditional("line-height: 1.5;"),
        CssItem::unconditional("opacity: 0;"),
      ]
    );
  }

  #[test]
  fn nested_objects_wrap_in_their_selector() {
    let out = build("({ '&:hover': { color: 'red' } })");
    assert_eq!(out.css, vec![CssItem::unconditional("&:hover {color: red;}")]);
  }

  #[test]
  fn at_rule_keys_wrap_like_selectors() {
    let out = build("({ '@media print': { color: 'red' } })");
    assert_eq!(
      out.css,
      vec![CssItem::unconditional("@media print {color: red;}")]
    );
  }

  #[test]
  fn spreads_inline_the_referenced_styles() {
    let mut ctx = EvalContext::new();
    ctx.bind("base", parse_expr("({ display: 'block' })"));
    let out = build_with_ctx("({ ...base, color: 'red' })", &mut ctx);
    assert_eq!(
      out.css,
      vec![
        CssItem::unconditional("display: block;"),
        CssItem::unconditional("color: red;"),
      ]
    );
  }

  #[test]
  fn absent_constant_values_drop_the_declaration() {
    let out = build("({ color: undefined, display: 'block' })");
    assert_eq!(out.css, vec![CssItem::unconditional("display: block;")]);
  }

  #[test]
  fn dynamic_object_value_becomes_a_variable() {
    let out = build("({ color: props.color })");
    assert_eq!(out.variables.len(), 1);
    let name = &out.variables[0].name;
    assert!(name.starts_with("--_"), "got {name}");
    assert_eq!(out.css, vec![CssItem::unconditional(format!("color: var({name});"))]);
  }

  #[test]
  fn ternary_with_dynamic_branch_falls_back_to_a_variable() {
    let out = build("({ color: isPrimary ? props.tint : 'red' })");
    assert_eq!(out.variables.len(), 1);
    assert!(matches!(
      &out.css[0],
      CssItem::Unconditional(css) if css.starts_with("color: var(--_")
    ));
  }

  #[test]
  fn nested_ternaries_nest_conditional_items() {
    let out = build("({ color: a ? 'red' : b ? 'blue' : 'green' })");
    let CssItem::Conditional(outer) = &out.css[0] else {
      panic!("expected conditional");
    };
    assert_eq!(*outer.consequent, CssItem::unconditional("color: red;"));
    assert!(matches!(*outer.alternate, CssItem::Conditional(_)));
  }

  #[test]
  fn template_dynamic_value_gets_var_with_unit_suffix() {
    let out = build("`margin-top: ${size}px;`");
    assert_eq!(out.variables.len(), 1);
    let variable = &out.variables[0];
    assert_eq!(variable.suffix.as_deref(), Some("px"));
    assert_eq!(variable.prefix, None);
    assert_eq!(
      out.css,
      vec![CssItem::unconditional(format!("margin-top: var({});", variable.name))]
    );
  }

  #[test]
  fn template_url_wrapper_travels_with_the_value() {
    let out = build("`background-image: url(${image});`");
    let variable = &out.variables[0];
    assert_eq!(variable.prefix.as_deref(), Some("url("));
    assert_eq!(variable.suffix.as_deref(), Some(")"));
  }

  #[test]
  fn text_before_a_template_conditional_stays_ordered() {
    let out = build("`display: block; ${isBold && 'font-weight: bold;'}`");
    assert_eq!(out.css.len(), 2);
    assert_eq!(out.css[0], CssItem::unconditional("display: block;"));
    assert!(matches!(&out.css[1], CssItem::Logical(_)));
  }

  #[test]
  fn conditional_inside_a_nested_block_falls_back_to_a_variable() {
    let out = build("`&:hover { color: ${isPrimary ? 'red' : 'blue'}; }`");
    // Inside a block the toggle would lose its selector, so the value
    // becomes a custom property instead.
    assert_eq!(out.variables.len(), 1);
    assert_eq!(out.css.len(), 1);
  }

  #[test]
  fn same_expression_and_affixes_hash_to_the_same_name() {
    let first = build("`margin-top: ${size}px;`");
    let second = build("`margin-bottom: ${size}px;`");
    assert_eq!(first.variables[0].name, second.variables[0].name);

    let bare = build("`z-index: ${size};`");
    assert_ne!(first.variables[0].name, bare.variables[0].name);
  }

  #[test]
  fn logical_mixin_gates_its_declarations() {
    let out = build("isPrimary && ({ color: 'blue' })");
    assert_eq!(out.css.len(), 1);
    let CssItem::Logical(logical) = &out.css[0] else {
      panic!("expected logical item");
    };
    assert_eq!(logical.operator, LogicalOperator::And);
    assert_eq!(logical.css, "color: blue;");
  }

  #[test]
  fn logical_mixin_inside_an_array_keeps_siblings() {
    let out = build("[{ display: 'block' }, isPrimary && { color: 'blue' }]");
    assert_eq!(out.css.len(), 2);
    assert_eq!(out.css[0], CssItem::unconditional("display: block;"));
    assert!(matches!(&out.css[1], CssItem::Logical(_)));
  }

  #[test]
  fn ternary_mixin_splits_into_both_arms() {
    let out = build("isPrimary ? { color: 'blue' } : { color: 'red' }");
    let CssItem::Conditional(conditional) = &out.css[0] else {
      panic!("expected conditional item");
    };
    assert_eq!(*conditional.consequent, CssItem::unconditional("color: blue;"));
    assert_eq!(*conditional.alternate, CssItem::unconditional("color: red;"));
  }

  #[test]
  fn ternary_mixin_with_absent_arm_contributes_one_side() {
    let out = build("isPrimary ? { color: 'blue' } : undefined");
    let CssItem::Conditional(conditional) = &out.css[0] else {
      panic!("expected conditional item");
    };
    assert_eq!(*conditional.consequent, CssItem::unconditional("color: blue;"));
    assert_eq!(*conditional.alternate, CssItem::unconditional(""));
  }

  #[test]
  fn conditional_mixin_arm_with_its_own_condition_nests() {
    let out = build("isPrimary ? { color: isBold && 'blue' } : { color: 'red' }");
    assert_eq!(out.css.len(), 2);
    let CssItem::Conditional(first) = &out.css[0] else {
      panic!("expected conditional item");
    };
    assert!(matches!(*first.consequent, CssItem::Logical(_)));
    assert_eq!(*first.alternate, CssItem::unconditional(""));
    let CssItem::Conditional(second) = &out.css[1] else {
      panic!("expected conditional item");
    };
    assert_eq!(*second.consequent, CssItem::unconditional(""));
    assert_eq!(*second.alternate, CssItem::unconditional("color: red;"));
  }

  #[test]
  fn logical_value_with_absent_branch_drops_the_declaration() {
    let out = build("({ color: isPrimary && undefined, display: 'block' })");
    assert!(out.variables.is_empty());
    assert_eq!(
      out.css,
      vec![
        CssItem::unconditional(""),
        CssItem::unconditional("display: block;"),
      ]
    );
  }

  #[test]
  fn composition_arguments_contribute_in_order() {
    let out = build("styles({ display: 'block' }, { color: 'red' })");
    assert_eq!(
      out.css,
      vec![
        CssItem::unconditional("display: block;"),
        CssItem::unconditional("color: red;"),
      ]
    );
  }
}
