//! CSS property tables and value normalization.
//!
//! The known-property set backs a best-effort diagnostic only; an unknown
//! property never fails the transform. Custom properties (`--*`) and vendor
//! prefixed names bypass the check entirely, since the list is heuristic and
//! lags the evolving CSS specification.

use std::collections::HashSet;

use once_cell::sync::Lazy;

/// Converts camelCase style-object keys into kebab-case CSS property names.
pub fn kebab_case(input: &str) -> String {
  let mut out = String::with_capacity(input.len() + 4);
  for ch in input.chars() {
    if ch.is_ascii_uppercase() {
      out.push('-');
      out.push(ch.to_ascii_lowercase());
    } else {
      out.push(ch);
    }
  }
  out
}

/// Properties whose numeric values must not receive an implicit `px`.
/// Kebab-case counterpart of React's unitless property list.
static UNITLESS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
  HashSet::from([
    "animation-iteration-count",
    "border-image-outset",
    "border-image-slice",
    "border-image-width",
    "box-flex",
    "box-flex-group",
    "box-ordinal-group",
    "column-count",
    "columns",
    "fill-opacity",
    "flex",
    "flex-grow",
    "flex-negative",
    "flex-order",
    "flex-positive",
    "flex-shrink",
    "flood-opacity",
    "font-size-adjust",
    "font-weight",
    "grid-area",
    "grid-column",
    "grid-column-end",
    "grid-column-span",
    "grid-column-start",
    "grid-row",
    "grid-row-end",
    "grid-row-span",
    "grid-row-start",
    "line-clamp",
    "line-height",
    "opacity",
    "order",
    "orphans",
    "stop-opacity",
    "stroke-dasharray",
    "stroke-dashoffset",
    "stroke-miterlimit",
    "stroke-opacity",
    "stroke-width",
    "tab-size",
    "-webkit-line-clamp",
    "widows",
    "z-index",
    "zoom",
  ])
});

/// Format a number the way the JS implementation stringifies it: integral
/// values lose the fraction, `0.5` renders as `.5`.
fn format_number(num: f64) -> String {
  let num = if num == 0.0 { 0.0 } else { num };
  let mut out = if num.fract() == 0.0 && num.abs() < 1e15 {
    format!("{}", num as i64)
  } else {
    format!("{num}")
  };
  if out.starts_with("0.") {
    out.remove(0);
  } else if out.starts_with("-0.") {
    out.remove(1);
  }
  out
}

/// Append an implicit `px` unit to bare numbers unless the property is
/// unit-less or the value is zero.
pub fn add_unit_if_needed(property: &str, num: f64) -> String {
  if num == 0.0 || UNITLESS.contains(property) {
    format_number(num)
  } else {
    format!("{}px", format_number(num))
  }
}

/// Whether a property name is exempt from validation: CSS custom properties
/// and vendor prefixed names.
pub fn bypasses_validation(property: &str) -> bool {
  property.starts_with("--")
    || property.starts_with("-webkit-")
    || property.starts_with("-moz-")
    || property.starts_with("-ms-")
    || property.starts_with("-o-")
}

/// Whether `property` is in the known CSS property set. Callers should check
/// [`bypasses_validation`] first.
pub fn is_known_property(property: &str) -> bool {
  KNOWN_PROPERTIES.contains(property)
}

/// The shorthand a longhand property belongs to, when tracked. Used for the
/// shorthand/longhand mixing diagnostic.
pub fn parent_shorthand(property: &str) -> Option<&'static str> {
  match property {
    "padding-top" | "padding-right" | "padding-bottom" | "padding-left" => Some("padding"),
    "padding-block-start" | "padding-block-end" => Some("padding-block"),
    "padding-inline-start" | "padding-inline-end" => Some("padding-inline"),
    "margin-top" | "margin-right" | "margin-bottom" | "margin-left" => Some("margin"),
    "margin-block-start" | "margin-block-end" => Some("margin-block"),
    "margin-inline-start" | "margin-inline-end" => Some("margin-inline"),
    "border-top-color" | "border-right-color" | "border-bottom-color" | "border-left-color" => {
      Some("border-color")
    }
    "border-top-style" | "border-right-style" | "border-bottom-style" | "border-left-style" => {
      Some("border-style")
    }
    "border-top-width" | "border-right-width" | "border-bottom-width" | "border-left-width" => {
      Some("border-width")
    }
    "border-color" | "border-style" | "border-width" => Some("border"),
    "font-family" | "font-size" | "font-style" | "font-variant" | "font-weight"
    | "font-stretch" => Some("font"),
    "flex-grow" | "flex-shrink" | "flex-basis" => Some("flex"),
    "flex-direction" | "flex-wrap" => Some("flex-flow"),
    "overflow-x" | "overflow-y" => Some("overflow"),
    "top" | "right" | "bottom" | "left" => Some("inset"),
    "row-gap" | "column-gap" => Some("gap"),
    "outline-color" | "outline-style" | "outline-width" => Some("outline"),
    "animation-name" | "animation-duration" | "animation-timing-function" | "animation-delay"
    | "animation-iteration-count" | "animation-direction" | "animation-fill-mode"
    | "animation-play-state" => Some("animation"),
    "transition-property" | "transition-duration" | "transition-timing-function"
    | "transition-delay" => Some("transition"),
    "background-color" | "background-image" | "background-position" | "background-repeat"
    | "background-size" | "background-attachment" | "background-origin" | "background-clip" => {
      Some("background")
    }
    "text-decoration-line" | "text-decoration-style" | "text-decoration-color"
    | "text-decoration-thickness" => Some("text-decoration"),
    "list-style-type" | "list-style-position" | "list-style-image" => Some("list-style"),
    "grid-template-rows" | "grid-template-columns" | "grid-template-areas" => {
      Some("grid-template")
    }
    "align-items" | "justify-items" => Some("place-items"),
    "align-content" | "justify-content" => Some("place-content"),
    "align-self" | "justify-self" => Some("place-self"),
    "column-width" | "column-count" => Some("columns"),
    _ => None,
  }
}

static KNOWN_PROPERTIES: Lazy<HashSet<&'static str>> = Lazy::new(|| {
  HashSet::from([
    "accent-color",
    "align-content",
    "align-items",
    "align-self",
    "all",
    "animation",
    "animation-delay",
    "animation-direction",
    "animation-duration",
    "animation-fill-mode",
    "animation-iteration-count",
    "animation-name",
    "animation-play-state",
    "animation-timing-function",
    "appearance",
    "aspect-ratio",
    "backdrop-filter",
    "backface-visibility",
    "background",
    "background-attachment",
    "background-blend-mode",
    "background-clip",
    "background-color",
    "background-image",
    "background-origin",
    "background-position",
    "background-repeat",
    "background-size",
    "block-size",
    "border",
    "border-bottom",
    "border-bottom-color",
    "border-bottom-left-radius",
    "border-bottom-right-radius",
    "border-bottom-style",
    "border-bottom-width",
    "border-collapse",
    "border-color",
    "border-end-end-radius",
    "border-end-start-radius",
    "border-image",
    "border-image-outset",
    "border-image-repeat",
    "border-image-slice",
    "border-image-source",
    "border-image-width",
    "border-left",
    "border-left-color",
    "border-left-style",
    "border-left-width",
    "border-radius",
    "border-right",
    "border-right-color",
    "border-right-style",
    "border-right-width",
    "border-spacing",
    "border-start-end-radius",
    "border-start-start-radius",
    "border-style",
    "border-top",
    "border-top-color",
    "border-top-left-radius",
    "border-top-right-radius",
    "border-top-style",
    "border-top-width",
    "border-width",
    "bottom",
    "box-decoration-break",
    "box-shadow",
    "box-sizing",
    "break-after",
    "break-before",
    "break-inside",
    "caption-side",
    "caret-color",
    "clear",
    "clip",
    "clip-path",
    "color",
    "color-scheme",
    "column-count",
    "column-fill",
    "column-gap",
    "column-rule",
    "column-rule-color",
    "column-rule-style",
    "column-rule-width",
    "column-span",
    "column-width",
    "columns",
    "contain",
    "content",
    "content-visibility",
    "counter-increment",
    "counter-reset",
    "counter-set",
    "cursor",
    "direction",
    "display",
    "empty-cells",
    "fill",
    "fill-opacity",
    "filter",
    "flex",
    "flex-basis",
    "flex-direction",
    "flex-flow",
    "flex-grow",
    "flex-shrink",
    "flex-wrap",
    "float",
    "flood-opacity",
    "font",
    "font-family",
    "font-feature-settings",
    "font-kerning",
    "font-optical-sizing",
    "font-size",
    "font-size-adjust",
    "font-stretch",
    "font-style",
    "font-synthesis",
    "font-variant",
    "font-variant-caps",
    "font-variant-ligatures",
    "font-variant-numeric",
    "font-variation-settings",
    "font-weight",
    "gap",
    "grid",
    "grid-area",
    "grid-auto-columns",
    "grid-auto-flow",
    "grid-auto-rows",
    "grid-column",
    "grid-column-end",
    "grid-column-start",
    "grid-row",
    "grid-row-end",
    "grid-row-start",
    "grid-template",
    "grid-template-areas",
    "grid-template-columns",
    "grid-template-rows",
    "height",
    "hyphens",
    "image-rendering",
    "inline-size",
    "inset",
    "inset-block",
    "inset-block-end",
    "inset-block-start",
    "inset-inline",
    "inset-inline-end",
    "inset-inline-start",
    "isolation",
    "justify-content",
    "justify-items",
    "justify-self",
    "left",
    "letter-spacing",
    "line-break",
    "line-clamp",
    "line-height",
    "list-style",
    "list-style-image",
    "list-style-position",
    "list-style-type",
    "margin",
    "margin-block",
    "margin-block-end",
    "margin-block-start",
    "margin-bottom",
    "margin-inline",
    "margin-inline-end",
    "margin-inline-start",
    "margin-left",
    "margin-right",
    "margin-top",
    "mask",
    "mask-image",
    "mask-position",
    "mask-repeat",
    "mask-size",
    "max-block-size",
    "max-height",
    "max-inline-size",
    "max-width",
    "min-block-size",
    "min-height",
    "min-inline-size",
    "min-width",
    "mix-blend-mode",
    "object-fit",
    "object-position",
    "opacity",
    "order",
    "orphans",
    "outline",
    "outline-color",
    "outline-offset",
    "outline-style",
    "outline-width",
    "overflow",
    "overflow-anchor",
    "overflow-wrap",
    "overflow-x",
    "overflow-y",
    "overscroll-behavior",
    "overscroll-behavior-x",
    "overscroll-behavior-y",
    "padding",
    "padding-block",
    "padding-block-end",
    "padding-block-start",
    "padding-bottom",
    "padding-inline",
    "padding-inline-end",
    "padding-inline-start",
    "padding-left",
    "padding-right",
    "padding-top",
    "page-break-after",
    "page-break-before",
    "page-break-inside",
    "paint-order",
    "perspective",
    "perspective-origin",
    "place-content",
    "place-items",
    "place-self",
    "pointer-events",
    "position",
    "quotes",
    "resize",
    "right",
    "rotate",
    "row-gap",
    "scale",
    "scroll-behavior",
    "scroll-margin",
    "scroll-padding",
    "scroll-snap-align",
    "scroll-snap-stop",
    "scroll-snap-type",
    "scrollbar-color",
    "scrollbar-gutter",
    "scrollbar-width",
    "shape-outside",
    "stop-opacity",
    "stroke",
    "stroke-dasharray",
    "stroke-dashoffset",
    "stroke-miterlimit",
    "stroke-opacity",
    "stroke-width",
    "tab-size",
    "table-layout",
    "text-align",
    "text-align-last",
    "text-combine-upright",
    "text-decoration",
    "text-decoration-color",
    "text-decoration-line",
    "text-decoration-style",
    "text-decoration-thickness",
    "text-emphasis",
    "text-indent",
    "text-justify",
    "text-orientation",
    "text-overflow",
    "text-rendering",
    "text-shadow",
    "text-transform",
    "text-underline-offset",
    "text-underline-position",
    "text-wrap",
    "top",
    "touch-action",
    "transform",
    "transform-box",
    "transform-origin",
    "transform-style",
    "transition",
    "transition-delay",
    "transition-duration",
    "transition-property",
    "transition-timing-function",
    "translate",
    "unicode-bidi",
    "user-select",
    "vertical-align",
    "visibility",
    "white-space",
    "widows",
    "width",
    "will-change",
    "word-break",
    "word-spacing",
    "word-wrap",
    "writing-mode",
    "z-index",
    "zoom",
  ])
});
