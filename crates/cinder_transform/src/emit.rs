//! Emission: turn built CSS items into atomic sheets and the runtime
//! class-name expression.
//!
//! Unconditional items become plain string literals. Conditional items fold
//! into the smallest expression that still toggles the right classes: a
//! branch with no classes collapses the ternary into a guarded `&&`, with
//! the test negated when only the alternate produces classes.

use swc_core::common::DUMMY_SP;
use swc_core::ecma::ast::{
  ArrayLit, BinExpr, BinaryOp, CallExpr, Callee, CondExpr, Expr, ExprOrSpread, Ident, Lit, Str,
};

use cinder_css::{CssOptions, Diagnostic};

use crate::error::TransformError;
use crate::items::{negate_expression, CssItem};

/// Sheets, class-name expressions and diagnostics for one style source.
#[derive(Debug, Default)]
pub struct EmittedCss {
  pub sheets: Vec<String>,
  pub class_name_expressions: Vec<Expr>,
  pub diagnostics: Vec<Diagnostic>,
}

pub fn transform_css_items(
  items: &[CssItem],
  options: &CssOptions,
) -> Result<EmittedCss, TransformError> {
  let mut out = EmittedCss::default();
  for item in items {
    if let Some(expr) = transform_item(item, options, &mut out)? {
      out.class_name_expressions.push(expr);
    }
  }
  Ok(out)
}

fn transform_item(
  item: &CssItem,
  options: &CssOptions,
  out: &mut EmittedCss,
) -> Result<Option<Expr>, TransformError> {
  match item {
    CssItem::Unconditional(css) => {
      Ok(transform_fragment(css, options, out)?.map(string_literal))
    }
    CssItem::Logical(logical) => {
      let Some(classes) = transform_fragment(&logical.css, options, out)? else {
        return Ok(None);
      };
      Ok(Some(Expr::Bin(BinExpr {
        span: DUMMY_SP,
        op: logical.operator.to_binary_op(),
        left: Box::new(logical.expression.clone()),
        right: Box::new(string_literal(classes)),
      })))
    }
    CssItem::Conditional(conditional) => {
      let consequent = transform_item(&conditional.consequent, options, out)?;
      let alternate = transform_item(&conditional.alternate, options, out)?;
      let expr = match (consequent, alternate) {
        (Some(consequent), Some(alternate)) => Some(Expr::Cond(CondExpr {
          span: DUMMY_SP,
          test: Box::new(conditional.test.clone()),
          cons: Box::new(consequent),
          alt: Box::new(alternate),
        })),
        (Some(consequent), None) => Some(guarded(conditional.test.clone(), consequent)),
        (None, Some(alternate)) => {
          Some(guarded(negate_expression(conditional.test.clone()), alternate))
        }
        (None, None) => None,
      };
      Ok(expr)
    }
  }
}

/// Run one CSS fragment through the atomic transform, collecting its sheets
/// and diagnostics. Returns the space-joined class names, or `None` when the
/// fragment produced no classes.
fn transform_fragment(
  css: &str,
  options: &CssOptions,
  out: &mut EmittedCss,
) -> Result<Option<String>, TransformError> {
  if css.trim().is_empty() {
    return Ok(None);
  }

  let result = cinder_css::transform_css(css, options)?;
  out.sheets.extend(result.sheets);
  out.diagnostics.extend(result.diagnostics);

  let classes = result.class_names.join(" ");
  Ok((!classes.is_empty()).then_some(classes))
}

fn guarded(test: Expr, classes: Expr) -> Expr {
  Expr::Bin(BinExpr {
    span: DUMMY_SP,
    op: BinaryOp::LogicalAnd,
    left: Box::new(test),
    right: Box::new(classes),
  })
}

fn string_literal(value: String) -> Expr {
  Expr::Lit(Lit::Str(Str {
    span: DUMMY_SP,
    value: value.into(),
    raw: None,
  }))
}

/// Build the runtime merge call: `ax([expr, expr, ...])`.
pub fn build_ax_call(class_name_expressions: Vec<Expr>) -> Expr {
  let elems = class_name_expressions
    .into_iter()
    .map(|expr| {
      Some(ExprOrSpread {
        spread: None,
        expr: Box::new(expr),
      })
    })
    .collect();

  Expr::Call(CallExpr {
    span: DUMMY_SP,
    ctxt: Default::default(),
    callee: Callee::Expr(Box::new(Expr::Ident(Ident {
      span: DUMMY_SP,
      ctxt: Default::default(),
      sym: "ax".into(),
      optional: false,
    }))),
    args: vec![ExprOrSpread {
      spread: None,
      expr: Box::new(Expr::Array(ArrayLit {
        span: DUMMY_SP,
        elems,
      })),
    }],
    type_args: None,
  })
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::items::{ConditionalCssItem, LogicalCssItem, LogicalOperator};
  use crate::testing::{parse_expr, print_expr};
  use pretty_assertions::assert_eq;

  fn emit(items: &[CssItem]) -> EmittedCss {
    transform_css_items(items, &CssOptions::default()).unwrap()
  }

  #[test]
  fn unconditional_item_becomes_string_literal() {
    let out = emit(&[CssItem::unconditional("color: blue;")]);
    assert_eq!(out.sheets, vec!["._syaz13q2{color:blue}"]);
    assert_eq!(out.class_name_expressions.len(), 1);
    assert_eq!(print_expr(&out.class_name_expressions[0]), "\"_syaz13q2\"");
  }

  #[test]
  fn both_branches_fold_into_ternary() {
    let out = emit(&[CssItem::Conditional(ConditionalCssItem {
      test: parse_expr("isPrimary"),
      consequent: Box::new(CssItem::unconditional("color: blue;")),
      alternate: Box::new(CssItem::unconditional("color: red;")),
    })]);
    assert_eq!(
      print_expr(&out.class_name_expressions[0]),
      "isPrimary ? \"_syaz13q2\" : \"_syaz5scu\""
    );
    // Both branch sheets are always registered.
    assert_eq!(out.sheets.len(), 2);
  }

  #[test]
  fn empty_consequent_negates_the_test() {
    let out = emit(&[CssItem::Conditional(ConditionalCssItem {
      test: parse_expr("isHidden"),
      consequent: Box::new(CssItem::unconditional("")),
      alternate: Box::new(CssItem::unconditional("color: red;")),
    })]);
    assert_eq!(
      print_expr(&out.class_name_expressions[0]),
      "!(isHidden) && \"_syaz5scu\""
    );
  }

  #[test]
  fn empty_alternate_guards_with_the_test() {
    let out = emit(&[CssItem::Conditional(ConditionalCssItem {
      test: parse_expr("isPrimary"),
      consequent: Box::new(CssItem::unconditional("color: blue;")),
      alternate: Box::new(CssItem::unconditional("")),
    })]);
    assert_eq!(
      print_expr(&out.class_name_expressions[0]),
      "isPrimary && \"_syaz13q2\""
    );
  }

  #[test]
  fn logical_item_keeps_its_operator() {
    let out = emit(&[CssItem::Logical(LogicalCssItem {
      expression: parse_expr("isBold"),
      operator: LogicalOperator::And,
      css: "font-weight: bold;".into(),
    })]);
    assert_eq!(out.class_name_expressions.len(), 1);
    let printed = print_expr(&out.class_name_expressions[0]);
    assert!(printed.starts_with("isBold && "), "got {printed}");
  }

  #[test]
  fn ax_call_wraps_expressions_in_an_array() {
    let call = build_ax_call(vec![
      string_literal("_syaz13q2".into()),
      parse_expr("isPrimary && \"_1wyb1fwx\""),
    ]);
    let printed = print_expr(&call);
    assert!(printed.starts_with("ax(["), "got {printed}");
    assert!(printed.contains("\"_syaz13q2\""), "got {printed}");
    assert!(printed.contains("isPrimary && \"_1wyb1fwx\""), "got {printed}");
  }
}
