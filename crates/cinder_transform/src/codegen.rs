use swc_core::common::sync::Lrc;
use swc_core::common::SourceMap;
use swc_core::ecma::ast::Expr;
use swc_core::ecma::codegen::text_writer::JsWriter;
use swc_core::ecma::codegen::{Emitter, Node};

/// Render an expression to stable JavaScript text. Used for deterministic
/// custom-property naming, where the same source expression must always
/// produce the same hash input.
pub fn serialize_expression(expr: &Expr) -> Option<String> {
  let cm: Lrc<SourceMap> = Default::default();
  let mut buf = vec![];
  {
    let writer = JsWriter::new(cm.clone(), "\n", &mut buf, None);
    let mut emitter = Emitter {
      cfg: Default::default(),
      cm,
      comments: None,
      wr: writer,
    };
    if expr.emit_with(&mut emitter).is_err() {
      return None;
    }
  }

  String::from_utf8(buf).ok().map(|text| text.trim().to_string())
}
