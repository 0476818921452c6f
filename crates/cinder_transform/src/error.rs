use thiserror::Error;

/// Fatal failures raised while compiling a style expression.
#[derive(Debug, Error)]
pub enum TransformError {
  /// A logical expression's right-hand side is itself a conditional, e.g.
  /// `cond && (cond2 ? a : b)`. The two condition layers cannot be flattened
  /// into independent class toggles, so this aborts instead of guessing.
  #[error("ConditionalExpression isn't a supported CSS type - try using an object or string")]
  UnsupportedCssType,

  /// The style expression is not one of the supported shapes and does not
  /// resolve to one through module bindings.
  #[error("Styles cannot be statically resolved - expected an object, template literal or array")]
  UnresolvedStyleSource,

  #[error(transparent)]
  Css(#[from] cinder_css::CssError),
}
