use indexmap::{IndexMap, IndexSet};
use swc_core::ecma::ast::{Decl, Expr, Module, ModuleDecl, ModuleItem, Pat, Stmt, VarDecl};

/// Lexical environment for constant evaluation of one style expression.
///
/// Bindings are the module-level `const` declarations visible to the style
/// expression. The visited set guards against identifiers that resolve
/// through themselves; on revisit evaluation fails closed to dynamic instead
/// of recursing forever.
#[derive(Debug, Default)]
pub struct EvalContext {
  bindings: IndexMap<String, Expr>,
  visited: IndexSet<String>,
  /// Destructured prop names observed while evaluating arrow-function
  /// values. The caller uses these to widen the component's prop signature.
  prop_names: IndexSet<String>,
  /// Names currently bound as dynamic props inside an arrow body.
  dynamic_scope: IndexSet<String>,
}

impl EvalContext {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn bind(&mut self, name: impl Into<String>, expr: Expr) {
    self.bindings.insert(name.into(), expr);
  }

  pub fn binding(&self, name: &str) -> Option<&Expr> {
    self.bindings.get(name)
  }

  /// Mark an identifier as being resolved. Returns false when the identifier
  /// is already on the evaluation stack, i.e. a cycle.
  pub(crate) fn enter_identifier(&mut self, name: &str) -> bool {
    self.visited.insert(name.to_string())
  }

  pub(crate) fn leave_identifier(&mut self, name: &str) {
    self.visited.shift_remove(name);
  }

  pub(crate) fn record_prop_name(&mut self, name: &str) {
    self.prop_names.insert(name.to_string());
  }

  pub fn prop_names(&self) -> impl Iterator<Item = &str> {
    self.prop_names.iter().map(String::as_str)
  }

  pub(crate) fn enter_dynamic_scope(&mut self, names: &[String]) {
    for name in names {
      self.dynamic_scope.insert(name.clone());
    }
  }

  pub(crate) fn leave_dynamic_scope(&mut self, names: &[String]) {
    for name in names {
      self.dynamic_scope.shift_remove(name);
    }
  }

  pub(crate) fn is_dynamic_name(&self, name: &str) -> bool {
    self.dynamic_scope.contains(name)
  }

  /// Capture every top-level `var`/`let`/`const` initializer in the module
  /// as a binding, including exported ones.
  pub fn collect_module_bindings(&mut self, module: &Module) {
    for item in &module.body {
      let var: &VarDecl = match item {
        ModuleItem::Stmt(Stmt::Decl(Decl::Var(var))) => var,
        ModuleItem::ModuleDecl(ModuleDecl::ExportDecl(export)) => match &export.decl {
          Decl::Var(var) => var,
          _ => continue,
        },
        _ => continue,
      };

      for declarator in &var.decls {
        let Pat::Ident(ident) = &declarator.name else {
          continue;
        };
        let Some(init) = &declarator.init else {
          continue;
        };
        self.bind(ident.id.sym.to_string(), (**init).clone());
      }
    }
  }
}
