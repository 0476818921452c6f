//! Inline-style entries for dynamic values.
//!
//! Each [`Variable`] becomes a `"--_hash": ix(expr, suffix, prefix)`
//! property on the element's style object. The runtime `ix` helper applies
//! the affixes and drops the entry entirely when the value is absent.

use indexmap::IndexSet;
use swc_core::common::DUMMY_SP;
use swc_core::ecma::ast::{
  CallExpr, Callee, Expr, ExprOrSpread, Ident, KeyValueProp, Lit, Prop, PropName, PropOrSpread,
  Str,
};

use crate::items::Variable;

/// Build style-object properties for the collected variables. Duplicate
/// names collapse to the first occurrence; the same expression with the same
/// affixes always hashes to the same name, so later copies are redundant.
pub fn build_css_variables(variables: &[Variable]) -> Vec<PropOrSpread> {
  let mut seen = IndexSet::new();
  let mut props = Vec::new();

  for variable in variables {
    if !seen.insert(variable.name.clone()) {
      continue;
    }

    let mut args = vec![call_arg(variable.expression.clone())];
    // Positional signature is (value, suffix, prefix): a prefix can only be
    // passed when the suffix slot is filled.
    if let Some(suffix) = &variable.suffix {
      args.push(call_arg(string_literal(suffix)));
      if let Some(prefix) = &variable.prefix {
        args.push(call_arg(string_literal(prefix)));
      }
    }

    props.push(PropOrSpread::Prop(Box::new(Prop::KeyValue(KeyValueProp {
      key: PropName::Str(Str {
        span: DUMMY_SP,
        value: variable.name.clone().into(),
        raw: None,
      }),
      value: Box::new(Expr::Call(CallExpr {
        span: DUMMY_SP,
        ctxt: Default::default(),
        callee: Callee::Expr(Box::new(Expr::Ident(Ident {
          span: DUMMY_SP,
          ctxt: Default::default(),
          sym: "ix".into(),
          optional: false,
        }))),
        args,
        type_args: None,
      })),
    }))));
  }

  props
}

fn call_arg(expr: Expr) -> ExprOrSpread {
  ExprOrSpread {
    spread: None,
    expr: Box::new(expr),
  }
}

fn string_literal(value: &str) -> Expr {
  Expr::Lit(Lit::Str(Str {
    span: DUMMY_SP,
    value: value.into(),
    raw: None,
  }))
}
