//! Constant folding over style value expressions.
//!
//! Evaluation is pure and never errors: anything that cannot be proven
//! constant falls back to [`Evaluated::Dynamic`], carrying the original
//! expression for the custom-property path. Folding fails closed — one
//! dynamic operand makes the whole expression dynamic, never a partial fold.

use swc_core::ecma::ast::{
  ArrowExpr, BinaryOp, BlockStmtOrExpr, Expr, Lit, ObjectPatProp, Pat, PropName, Tpl, UnaryOp,
};

use crate::context::EvalContext;

/// A fully known primitive value.
#[derive(Clone, Debug, PartialEq)]
pub enum ConstValue {
  String(String),
  Number(f64),
  Bool(bool),
  Null,
  Undefined,
}

impl ConstValue {
  /// Render the value the way it appears in CSS text.
  pub fn to_css_text(&self) -> String {
    match self {
      ConstValue::String(text) => text.clone(),
      ConstValue::Number(num) => format_number(*num),
      ConstValue::Bool(value) => value.to_string(),
      ConstValue::Null | ConstValue::Undefined => String::new(),
    }
  }

  pub fn is_absent(&self) -> bool {
    matches!(self, ConstValue::Null | ConstValue::Undefined)
  }
}

/// The outcome of evaluating one expression.
#[derive(Clone, Debug, PartialEq)]
pub enum Evaluated {
  Constant(ConstValue),
  /// Unresolvable at compile time; the original expression survives for
  /// runtime evaluation.
  Dynamic(Expr),
}

pub(crate) fn format_number(num: f64) -> String {
  if num.fract() == 0.0 && num.abs() < 1e15 {
    format!("{}", num as i64)
  } else {
    format!("{num}")
  }
}

/// Evaluate an expression against the context's bindings.
pub fn evaluate(expr: &Expr, ctx: &mut EvalContext) -> Evaluated {
  match expr {
    Expr::Lit(lit) => evaluate_literal(lit, expr),
    Expr::Paren(paren) => evaluate(&paren.expr, ctx),
    Expr::Tpl(tpl) => evaluate_template(tpl, expr, ctx),
    Expr::Ident(ident) => {
      let name = ident.sym.as_ref();
      if name == "undefined" {
        return Evaluated::Constant(ConstValue::Undefined);
      }
      if ctx.is_dynamic_name(name) {
        return Evaluated::Dynamic(expr.clone());
      }
      let Some(bound) = ctx.binding(name).cloned() else {
        return Evaluated::Dynamic(expr.clone());
      };
      if !ctx.enter_identifier(name) {
        // Cycle: the identifier resolves through itself.
        return Evaluated::Dynamic(expr.clone());
      }
      let result = evaluate(&bound, ctx);
      ctx.leave_identifier(name);
      result
    }
    Expr::Unary(unary) => match (unary.op, evaluate(&unary.arg, ctx)) {
      (UnaryOp::Minus, Evaluated::Constant(ConstValue::Number(num))) => {
        Evaluated::Constant(ConstValue::Number(-num))
      }
      (UnaryOp::Bang, Evaluated::Constant(ConstValue::Bool(value))) => {
        Evaluated::Constant(ConstValue::Bool(!value))
      }
      _ => Evaluated::Dynamic(expr.clone()),
    },
    Expr::Bin(bin) => {
      let left = evaluate(&bin.left, ctx);
      let right = evaluate(&bin.right, ctx);
      match (left, right) {
        (Evaluated::Constant(left), Evaluated::Constant(right)) => {
          fold_binary(bin.op, &left, &right)
            .map(Evaluated::Constant)
            .unwrap_or_else(|| Evaluated::Dynamic(expr.clone()))
        }
        _ => Evaluated::Dynamic(expr.clone()),
      }
    }
    _ => Evaluated::Dynamic(expr.clone()),
  }
}

fn evaluate_literal(lit: &Lit, expr: &Expr) -> Evaluated {
  match lit {
    Lit::Str(text) => Evaluated::Constant(ConstValue::String(text.value.to_string())),
    Lit::Num(num) => Evaluated::Constant(ConstValue::Number(num.value)),
    Lit::Bool(value) => Evaluated::Constant(ConstValue::Bool(value.value)),
    Lit::Null(_) => Evaluated::Constant(ConstValue::Null),
    _ => Evaluated::Dynamic(expr.clone()),
  }
}

fn evaluate_template(tpl: &Tpl, expr: &Expr, ctx: &mut EvalContext) -> Evaluated {
  let mut out = String::new();
  for (i, quasi) in tpl.quasis.iter().enumerate() {
    out.push_str(quasi.cooked.as_ref().map(|atom| atom.as_ref()).unwrap_or(""));
    if let Some(inner) = tpl.exprs.get(i) {
      match evaluate(inner, ctx) {
        Evaluated::Constant(value) if !value.is_absent() => out.push_str(&value.to_css_text()),
        _ => return Evaluated::Dynamic(expr.clone()),
      }
    }
  }
  Evaluated::Constant(ConstValue::String(out))
}

fn fold_binary(op: BinaryOp, left: &ConstValue, right: &ConstValue) -> Option<ConstValue> {
  match (op, left, right) {
    (BinaryOp::Add, ConstValue::String(a), ConstValue::String(b)) => {
      Some(ConstValue::String(format!("{a}{b}")))
    }
    (BinaryOp::Add, ConstValue::String(a), ConstValue::Number(b)) => {
      Some(ConstValue::String(format!("{a}{}", format_number(*b))))
    }
    (BinaryOp::Add, ConstValue::Number(a), ConstValue::String(b)) => {
      Some(ConstValue::String(format!("{}{b}", format_number(*a))))
    }
    (BinaryOp::Add, ConstValue::Number(a), ConstValue::Number(b)) => {
      Some(ConstValue::Number(a + b))
    }
    (BinaryOp::Sub, ConstValue::Number(a), ConstValue::Number(b)) => {
      Some(ConstValue::Number(a - b))
    }
    (BinaryOp::Mul, ConstValue::Number(a), ConstValue::Number(b)) => {
      Some(ConstValue::Number(a * b))
    }
    (BinaryOp::Div, ConstValue::Number(a), ConstValue::Number(b)) if *b != 0.0 => {
      Some(ConstValue::Number(a / b))
    }
    _ => None,
  }
}

/// Evaluate the body of an arrow function taking a single destructured
/// `props` parameter. Destructured field names are recorded on the context
/// and treated as dynamic inside the body, so `({ color }) => color` comes
/// back dynamic while `({ color }) => 'red'` still folds.
pub fn evaluate_arrow_body(arrow: &ArrowExpr, ctx: &mut EvalContext) -> Option<Evaluated> {
  let body = match arrow.body.as_ref() {
    BlockStmtOrExpr::Expr(expr) => expr,
    BlockStmtOrExpr::BlockStmt(_) => return None,
  };

  let destructured = destructured_prop_names(&arrow.params);
  for name in &destructured {
    ctx.record_prop_name(name);
  }

  ctx.enter_dynamic_scope(&destructured);
  let result = evaluate(body, ctx);
  ctx.leave_dynamic_scope(&destructured);

  Some(result)
}

fn destructured_prop_names(params: &[Pat]) -> Vec<String> {
  let Some(Pat::Object(object)) = params.first() else {
    return Vec::new();
  };

  object
    .props
    .iter()
    .filter_map(|prop| match prop {
      ObjectPatProp::Assign(assign) => Some(assign.key.sym.to_string()),
      ObjectPatProp::KeyValue(kv) => match &kv.key {
        PropName::Ident(ident) => Some(ident.sym.to_string()),
        _ => None,
      },
      ObjectPatProp::Rest(_) => None,
    })
    .collect()
}
