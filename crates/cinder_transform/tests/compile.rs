use cinder_transform::testing::{parse_expr, parse_module, print_expr};
use cinder_transform::{
  compile_style_expression, CompiledStyles, EvalContext, StyleSheetCache, TransformError,
  TransformOptions,
};
use pretty_assertions::assert_eq;

fn compile(code: &str) -> CompiledStyles {
  compile_with_ctx(code, &mut EvalContext::new())
}

fn compile_with_ctx(code: &str, ctx: &mut EvalContext) -> CompiledStyles {
  let expr = parse_expr(code);
  compile_style_expression(&expr, ctx, &TransformOptions::default(), &StyleSheetCache::new())
    .unwrap()
}

#[test]
fn object_styles_produce_atomic_classes() {
  let compiled = compile("({ fontSize: 12, color: 'blue' })");

  assert_eq!(
    compiled.sheets,
    vec!["._1wyb1fwx{font-size:12px}", "._syaz13q2{color:blue}"]
  );
  let class_names = print_expr(&compiled.class_name_expression);
  assert!(class_names.starts_with("ax(["), "got {class_names}");
  assert!(class_names.contains("\"_1wyb1fwx\""), "got {class_names}");
  assert!(class_names.contains("\"_syaz13q2\""), "got {class_names}");
  assert!(compiled.style_properties.is_empty());
}

#[test]
fn multi_declaration_template_produces_one_class_per_declaration() {
  let compiled = compile(indoc::indoc! {"
    `
      display: block;
      text-align: center;
    `
  "});
  assert_eq!(
    compiled.sheets,
    vec!["._1e0c1ule{display:block}", "._y3gn1h6o{text-align:center}"]
  );
  let printed = print_expr(&compiled.class_name_expression);
  assert!(printed.contains("\"_1e0c1ule _y3gn1h6o\""), "got {printed}");
}

#[test]
fn identical_declarations_share_a_class() {
  let first = compile("({ color: 'blue' })");
  let second = compile("`color: blue;`");
  assert_eq!(first.sheets, second.sheets);
}

#[test]
fn fractional_values_share_a_class_across_source_shapes() {
  let object = compile("({ opacity: 0.5 })");
  let template = compile("`opacity: 0.5;`");

  assert_eq!(object.sheets, template.sheets);
  assert_eq!(object.sheets, vec!["._tzy4105o{opacity:.5}"]);
}

#[test]
fn pseudo_selectors_nest_under_the_parent_class() {
  let compiled = compile("({ userSelect: 'none', '&:hover': { userSelect: 'none' } })");
  assert_eq!(
    compiled.sheets,
    vec![
      "._uiztglyw{user-select:none}",
      "._180hglyw:hover{user-select:none}"
    ]
  );
}

#[test]
fn at_rules_wrap_their_contents() {
  let compiled = compile("({ '@media (min-width: 30rem)': { userSelect: 'none' } })");
  assert_eq!(
    compiled.sheets,
    vec!["@media (min-width: 30rem){._ufx4glyw{user-select:none}}"]
  );
}

#[test]
fn ternary_value_becomes_a_class_toggle() {
  let compiled = compile("({ color: isPrimary ? 'blue' : 'red' })");

  let printed = print_expr(&compiled.class_name_expression);
  assert!(
    printed.contains("isPrimary ? \"_syaz13q2\" : \"_syaz5scu\""),
    "got {printed}"
  );
  // Both branches' sheets ship regardless of which branch wins at runtime.
  assert_eq!(
    compiled.sheets,
    vec!["._syaz13q2{color:blue}", "._syaz5scu{color:red}"]
  );
}

#[test]
fn absent_ternary_branch_folds_to_a_guard() {
  let compiled = compile("({ color: isPrimary ? 'blue' : undefined })");
  let printed = print_expr(&compiled.class_name_expression);
  assert!(
    printed.contains("isPrimary && \"_syaz13q2\""),
    "got {printed}"
  );
  assert_eq!(compiled.sheets, vec!["._syaz13q2{color:blue}"]);
}

#[test]
fn absent_consequent_negates_the_test() {
  let compiled = compile("({ color: isHidden ? undefined : 'red' })");
  let printed = print_expr(&compiled.class_name_expression);
  assert!(
    printed.contains("!(isHidden) && \"_syaz5scu\""),
    "got {printed}"
  );
}

#[test]
fn logical_and_guards_the_class() {
  let compiled = compile("({ color: isPrimary && 'blue' })");
  let printed = print_expr(&compiled.class_name_expression);
  assert!(
    printed.contains("isPrimary && \"_syaz13q2\""),
    "got {printed}"
  );
}

#[test]
fn conditional_on_the_right_of_a_logical_is_rejected() {
  let expr = parse_expr("({ color: isPrimary && (isLarge ? 'blue' : 'red') })");
  let result = compile_style_expression(
    &expr,
    &mut EvalContext::new(),
    &TransformOptions::default(),
    &StyleSheetCache::new(),
  );
  assert!(matches!(result, Err(TransformError::UnsupportedCssType)));
}

#[test]
fn dynamic_value_falls_back_to_a_custom_property() {
  let compiled = compile("({ color: props.color })");

  assert_eq!(compiled.sheets.len(), 1);
  assert!(
    compiled.sheets[0].contains("color:var(--_"),
    "got {}",
    compiled.sheets[0]
  );
  assert_eq!(compiled.style_properties.len(), 1);
}

#[test]
fn template_interpolation_extracts_the_unit_suffix() {
  let compiled = compile("`font-size: ${fontSize}px;`");

  assert!(
    compiled.sheets[0].contains("font-size:var(--_"),
    "got {}",
    compiled.sheets[0]
  );
  assert_eq!(compiled.style_properties.len(), 1);
}

#[test]
fn template_conditional_in_value_position_becomes_a_toggle() {
  let compiled = compile("`color: ${isPrimary ? 'blue' : 'red'};`");

  let printed = print_expr(&compiled.class_name_expression);
  assert!(
    printed.contains("isPrimary ? \"_syaz13q2\" : \"_syaz5scu\""),
    "got {printed}"
  );
}

#[test]
fn template_logical_declaration_becomes_a_toggle() {
  let compiled = compile("`${isBold && 'font-weight: bold;'} color: red;`");
  let printed = print_expr(&compiled.class_name_expression);
  assert!(printed.contains("isBold && "), "got {printed}");
  assert!(printed.contains("\"_syaz5scu\""), "got {printed}");
}

#[test]
fn module_bindings_fold_into_constants() {
  let module = parse_module("const primary = 'blue';");
  let mut ctx = EvalContext::new();
  ctx.collect_module_bindings(&module);

  let compiled = compile_with_ctx("({ color: primary })", &mut ctx);
  assert_eq!(compiled.sheets, vec!["._syaz13q2{color:blue}"]);
}

#[test]
fn arrays_apply_mixins_in_order() {
  let compiled = compile("[{ display: 'block' }, { textAlign: 'center' }]");
  assert_eq!(
    compiled.sheets,
    vec!["._1e0c1ule{display:block}", "._y3gn1h6o{text-align:center}"]
  );
}

#[test]
fn logical_mixin_in_an_array_keeps_its_sheet_and_guard() {
  let compiled = compile("[{ display: 'block' }, isPrimary && { color: 'blue' }]");

  // The gated mixin still ships its sheet; only the class toggle is gated.
  assert_eq!(
    compiled.sheets,
    vec!["._1e0c1ule{display:block}", "._syaz13q2{color:blue}"]
  );
  let printed = print_expr(&compiled.class_name_expression);
  assert!(printed.contains("\"_1e0c1ule\""), "got {printed}");
  assert!(
    printed.contains("isPrimary && \"_syaz13q2\""),
    "got {printed}"
  );
}

#[test]
fn top_level_logical_mixin_compiles() {
  let compiled = compile("isPrimary && { color: 'blue' }");
  assert_eq!(compiled.sheets, vec!["._syaz13q2{color:blue}"]);
  let printed = print_expr(&compiled.class_name_expression);
  assert!(
    printed.contains("isPrimary && \"_syaz13q2\""),
    "got {printed}"
  );
}

#[test]
fn ternary_mixin_toggles_between_both_sheets() {
  let compiled = compile("isPrimary ? { color: 'blue' } : { color: 'red' }");
  assert_eq!(
    compiled.sheets,
    vec!["._syaz13q2{color:blue}", "._syaz5scu{color:red}"]
  );
  let printed = print_expr(&compiled.class_name_expression);
  assert!(
    printed.contains("isPrimary ? \"_syaz13q2\" : \"_syaz5scu\""),
    "got {printed}"
  );
}

#[test]
fn logical_declaration_with_absent_value_emits_nothing() {
  let compiled = compile("({ color: isPrimary && undefined, display: 'block' })");
  assert_eq!(compiled.sheets, vec!["._1e0c1ule{display:block}"]);
  assert!(compiled.style_properties.is_empty());
}

#[test]
fn composition_calls_merge_their_arguments() {
  let module = parse_module("const base = { display: 'block' };");
  let mut ctx = EvalContext::new();
  ctx.collect_module_bindings(&module);

  let compiled = compile_with_ctx("css(base, { textAlign: 'center' })", &mut ctx);
  assert_eq!(
    compiled.sheets,
    vec!["._1e0c1ule{display:block}", "._y3gn1h6o{text-align:center}"]
  );
}

#[test]
fn arrow_values_with_destructured_props_record_prop_names() {
  let mut ctx = EvalContext::new();
  let compiled = compile_with_ctx("({ color: ({ tint }) => tint })", &mut ctx);

  assert_eq!(ctx.prop_names().collect::<Vec<_>>(), vec!["tint"]);
  assert_eq!(compiled.style_properties.len(), 1);
}

#[test]
fn cache_deduplicates_across_expressions() {
  let cache = StyleSheetCache::new();
  let options = TransformOptions::default();

  for code in ["({ color: 'blue' })", "({ color: 'blue', display: 'block' })"] {
    let expr = parse_expr(code);
    compile_style_expression(&expr, &mut EvalContext::new(), &options, &cache).unwrap();
  }

  assert_eq!(
    cache.sheets(),
    vec!["._syaz13q2{color:blue}", "._1e0c1ule{display:block}"]
  );
}

#[test]
fn unresolvable_expression_is_an_error() {
  let expr = parse_expr("someRuntimeValue");
  let result = compile_style_expression(
    &expr,
    &mut EvalContext::new(),
    &TransformOptions::default(),
    &StyleSheetCache::new(),
  );
  assert!(matches!(result, Err(TransformError::UnresolvedStyleSource)));
}
