//! Parse and print helpers for exercising the transform against real
//! JavaScript snippets.

use swc_core::common::input::StringInput;
use swc_core::common::sync::Lrc;
use swc_core::common::{FileName, SourceMap};
use swc_core::ecma::ast::{Expr, Module};
use swc_core::ecma::parser::lexer::Lexer;
use swc_core::ecma::parser::Parser;

/// Parse a single expression.
pub fn parse_expr(code: &str) -> Expr {
  let cm: Lrc<SourceMap> = Default::default();
  let fm = cm.new_source_file(Lrc::new(FileName::Anon), code.to_string());
  let lexer = Lexer::new(
    Default::default(),
    Default::default(),
    StringInput::from(&*fm),
    None,
  );
  let mut parser = Parser::new_from(lexer);
  *parser.parse_expr().expect("valid test expression")
}

/// Parse a module.
pub fn parse_module(code: &str) -> Module {
  let cm: Lrc<SourceMap> = Default::default();
  let fm = cm.new_source_file(Lrc::new(FileName::Anon), code.to_string());
  let lexer = Lexer::new(
    Default::default(),
    Default::default(),
    StringInput::from(&*fm),
    None,
  );
  let mut parser = Parser::new_from(lexer);
  parser.parse_module().expect("valid test module")
}

/// Render an expression back to JavaScript text.
pub fn print_expr(expr: &Expr) -> String {
  crate::codegen::serialize_expression(expr).expect("expression serializes")
}
