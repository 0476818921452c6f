//! Compile-time CSS-in-JS transform.
//!
//! Takes a style expression from a JavaScript module, statically evaluates
//! it against the module's bindings, and produces atomic CSS sheets plus the
//! runtime expressions that apply them: an `ax([...])` class-name merge call
//! and `ix(...)` custom-property entries for values only known at runtime.
//!
//! The pipeline is classify ([`StyleSource`]) -> build ([`CssOutput`] of
//! [`CssItem`]s and [`Variable`]s) -> emit (atomic sheets and class-name
//! expressions). Sheets are registered in a build-wide [`StyleSheetCache`]
//! so repeated declarations across files cost one rule.

mod builders;
mod cache;
mod codegen;
mod context;
mod emit;
mod error;
mod evaluate;
mod items;
mod options;
pub mod testing;
mod variables;

pub use builders::{build_css, StyleSource};
pub use cache::StyleSheetCache;
pub use cinder_css::Diagnostic;
pub use context::EvalContext;
pub use error::TransformError;
pub use evaluate::{evaluate, ConstValue, Evaluated};
pub use items::{CssItem, CssOutput, Variable};
pub use options::TransformOptions;

use swc_core::ecma::ast::{Expr, PropOrSpread};

/// The compiled artifacts for one style expression.
#[derive(Debug)]
pub struct CompiledStyles {
  /// Replacement for the style expression: an `ax([...])` call merging the
  /// atomic class names, with conditional classes folded into their guards.
  pub class_name_expression: Expr,
  /// Atomic rule sheets this expression contributed, in emission order.
  pub sheets: Vec<String>,
  /// Inline-style entries binding CSS custom properties to runtime values
  /// via `ix(...)` calls. Empty when everything folded statically.
  pub style_properties: Vec<PropOrSpread>,
  /// Non-fatal findings such as unknown property names.
  pub diagnostics: Vec<Diagnostic>,
}

/// Compile one style expression.
///
/// `ctx` carries the module-level bindings the expression may reference
/// (see [`EvalContext::collect_module_bindings`]). Every produced sheet is
/// also registered in `cache`, which deduplicates rules across the build.
pub fn compile_style_expression(
  expr: &Expr,
  ctx: &mut EvalContext,
  options: &TransformOptions,
  cache: &StyleSheetCache,
) -> Result<CompiledStyles, TransformError> {
  let Some(source) = StyleSource::classify(expr, ctx) else {
    return Err(TransformError::UnresolvedStyleSource);
  };

  let output = builders::build_css(&source, ctx)?;
  let emitted = emit::transform_css_items(&output.css, &options.css_options())?;

  tracing::debug!(
    sheets = emitted.sheets.len(),
    variables = output.variables.len(),
    diagnostics = emitted.diagnostics.len(),
    "compiled style expression"
  );

  for sheet in &emitted.sheets {
    cache.insert_if_absent(sheet);
  }

  Ok(CompiledStyles {
    class_name_expression: emit::build_ax_call(emitted.class_name_expressions),
    sheets: emitted.sheets,
    style_properties: variables::build_css_variables(&output.variables),
    diagnostics: emitted.diagnostics,
  })
}
