//! Intermediate CSS items produced by the builders.
//!
//! Each item carries CSS text plus the runtime condition (if any) under
//! which its classes apply. Emission turns items into sheets and class-name
//! expressions.

use swc_core::common::DUMMY_SP;
use swc_core::ecma::ast::{BinaryOp, Expr, ParenExpr, UnaryExpr, UnaryOp};

/// CSS gated behind a logical short-circuit, e.g. `cond && css`.
#[derive(Clone, Debug, PartialEq)]
pub struct LogicalCssItem {
  pub expression: Expr,
  pub operator: LogicalOperator,
  pub css: String,
}

/// CSS split across the two arms of a ternary. Arms may nest further
/// conditionals for compound conditions.
#[derive(Clone, Debug, PartialEq)]
pub struct ConditionalCssItem {
  pub test: Expr,
  pub consequent: Box<CssItem>,
  pub alternate: Box<CssItem>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LogicalOperator {
  Or,
  Nullish,
  And,
}

impl LogicalOperator {
  pub fn to_binary_op(self) -> BinaryOp {
    match self {
      LogicalOperator::Or => BinaryOp::LogicalOr,
      LogicalOperator::Nullish => BinaryOp::NullishCoalescing,
      LogicalOperator::And => BinaryOp::LogicalAnd,
    }
  }
}

#[derive(Clone, Debug, PartialEq)]
pub enum CssItem {
  /// CSS that is always active.
  Unconditional(String),
  Logical(LogicalCssItem),
  Conditional(ConditionalCssItem),
}

impl CssItem {
  pub fn unconditional(css: impl Into<String>) -> Self {
    CssItem::Unconditional(css.into())
  }
}

/// A dynamic interpolation emitted as a CSS custom property.
#[derive(Clone, Debug, PartialEq)]
pub struct Variable {
  /// The custom property name, `--_<hash>`.
  pub name: String,
  pub expression: Expr,
  pub prefix: Option<String>,
  pub suffix: Option<String>,
}

/// Everything the builders produce for one style source.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CssOutput {
  pub css: Vec<CssItem>,
  pub variables: Vec<Variable>,
}

impl CssOutput {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn extend(&mut self, other: CssOutput) {
    self.css.extend(other.css);
    self.variables.extend(other.variables);
  }
}

/// Wrap CSS text in the given selector openers, e.g.
/// `["@media print {", "&:hover {"]` produces `@media print {&:hover {..}}`.
pub fn wrap_css_with_selectors(css: &str, selectors: &[String]) -> String {
  if selectors.is_empty() {
    return css.to_string();
  }

  let mut out = String::new();
  for selector in selectors {
    out.push_str(selector);
  }
  out.push_str(css);
  for _ in selectors {
    out.push('}');
  }
  out
}

/// Apply selector wrappers to every CSS fragment in an item, recursing into
/// conditional arms.
pub fn apply_selectors(item: &mut CssItem, selectors: &[String]) {
  match item {
    CssItem::Unconditional(css) => {
      *css = wrap_css_with_selectors(css, selectors);
    }
    CssItem::Logical(logical) => {
      logical.css = wrap_css_with_selectors(&logical.css, selectors);
    }
    CssItem::Conditional(conditional) => {
      apply_selectors(&mut conditional.consequent, selectors);
      apply_selectors(&mut conditional.alternate, selectors);
    }
  }
}

/// Negate a test expression as `!(test)`. The parentheses matter both for
/// operator precedence and for stable generated output.
pub fn negate_expression(expr: Expr) -> Expr {
  Expr::Unary(UnaryExpr {
    span: DUMMY_SP,
    op: UnaryOp::Bang,
    arg: Box::new(Expr::Paren(ParenExpr {
      span: DUMMY_SP,
      expr: Box::new(expr),
    })),
  })
}
