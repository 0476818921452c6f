use thiserror::Error;

/// Fatal failures raised while normalizing CSS text.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CssError {
  #[error("Unbalanced braces in CSS input near \"{context}\"")]
  UnbalancedBraces { context: String },

  #[error("At-rule '@{0}' cannot be used in CSS rules.")]
  ForbiddenAtRule(String),

  #[error("Unknown at-rule '@{0}'.")]
  UnknownAtRule(String),

  #[error(
    "{0} isn't a valid CSS identifier. Accepted characters are ^[a-zA-Z\\-_]+[a-zA-Z\\-_0-9]*$"
  )]
  InvalidHashPrefix(String),
}

/// A non-fatal finding surfaced while transforming CSS. Diagnostics never
/// stop the transform; the declaration is used as written.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Diagnostic {
  pub message: String,
}

impl Diagnostic {
  pub fn new(message: impl Into<String>) -> Self {
    Self {
      message: message.into(),
    }
  }
}
