//! Cascade-safe ordering of atomic rules.
//!
//! Pseudo-class rules must come after plain rules and follow the LVFHA
//! ordering so that, for equal specificity, `:active` beats `:hover` beats
//! `:focus` and so on. At-rule wrapped rules sink to the bottom; within one
//! at-rule the same pseudo ordering applies.

use indexmap::IndexSet;

use crate::atomic::AtomicRule;

/// Pseudo-class buckets in emission order. Plain rules come before all of
/// these; at-rules come after.
pub const STYLE_ORDER: [&str; 7] = [
  ":link",
  ":visited",
  ":focus-within",
  ":focus",
  ":focus-visible",
  ":hover",
  ":active",
];

fn pseudo_score(selector: &str) -> usize {
  STYLE_ORDER
    .iter()
    .position(|pseudo| selector.trim_end().ends_with(pseudo))
    .map(|idx| idx + 1)
    .unwrap_or(0)
}

/// Sort rules in place: plain rules bucketed by trailing pseudo-class, then
/// at-rule wrapped rules grouped by their (first-seen) at-rule chain with the
/// same pseudo bucketing inside each group. The sort is stable, so rules in
/// the same bucket keep source order.
pub fn sort_atomic_rules(rules: &mut [AtomicRule]) {
  let mut at_rule_groups: IndexSet<String> = IndexSet::new();
  for rule in rules.iter() {
    if !rule.at_rules.is_empty() {
      at_rule_groups.insert(rule.at_rules.join(" "));
    }
  }

  rules.sort_by_key(|rule| {
    if rule.at_rules.is_empty() {
      (0, 0, pseudo_score(&rule.normalized_selector))
    } else {
      let group = at_rule_groups
        .get_index_of(rule.at_rules.join(" ").as_str())
        .unwrap_or(0);
      (1, group, pseudo_score(&rule.normalized_selector))
    }
  });
}

#[cfg(test)]
mod tests {
  use super::*;
  use pretty_assertions::assert_eq;

  fn rule(selector: &str, at_rules: &[&str]) -> AtomicRule {
    AtomicRule {
      class_name: String::new(),
      selector: selector.replace('&', "._test"),
      normalized_selector: selector.to_string(),
      declaration: "color:red".to_string(),
      at_rules: at_rules.iter().map(|label| label.to_string()).collect(),
    }
  }

  fn selectors(rules: &[AtomicRule]) -> Vec<&str> {
    rules
      .iter()
      .map(|rule| rule.normalized_selector.as_str())
      .collect()
  }

  #[test]
  fn plain_rules_come_before_pseudo_rules() {
    let mut rules = vec![rule("&:hover", &[]), rule("&", &[])];
    sort_atomic_rules(&mut rules);
    assert_eq!(selectors(&rules), vec!["&", "&:hover"]);
  }

  #[test]
  fn pseudo_buckets_follow_lvfha_order() {
    let mut rules = vec![
      rule("&:active", &[]),
      rule("&:hover", &[]),
      rule("&:focus", &[]),
      rule("&:visited", &[]),
      rule("&:link", &[]),
    ];
    sort_atomic_rules(&mut rules);
    assert_eq!(
      selectors(&rules),
      vec!["&:link", "&:visited", "&:focus", "&:hover", "&:active"]
    );
  }

  #[test]
  fn at_rules_sink_to_the_bottom() {
    let mut rules = vec![
      rule("&", &["media (min-width: 30rem)"]),
      rule("&:hover", &[]),
      rule("&", &[]),
    ];
    sort_atomic_rules(&mut rules);
    assert_eq!(selectors(&rules), vec!["&", "&:hover", "&"]);
    assert!(rules[2].at_rules.len() == 1);
  }

  #[test]
  fn pseudo_ordering_applies_inside_an_at_rule() {
    let mut rules = vec![
      rule("&:hover", &["media (max-width: 400px)"]),
      rule("&:link", &["media (max-width: 400px)"]),
    ];
    sort_atomic_rules(&mut rules);
    assert_eq!(selectors(&rules), vec!["&:link", "&:hover"]);
  }

  #[test]
  fn distinct_at_rules_keep_first_seen_order() {
    let mut rules = vec![
      rule("&", &["media (min-width: 400px)"]),
      rule("&", &["media (min-width: 200px)"]),
    ];
    sort_atomic_rules(&mut rules);
    assert_eq!(rules[0].at_rules[0], "media (min-width: 400px)");
    assert_eq!(rules[1].at_rules[0], "media (min-width: 200px)");
  }

  #[test]
  fn same_bucket_preserves_source_order() {
    let mut first = rule("&", &[]);
    first.declaration = "color:red".into();
    let mut second = rule("&", &[]);
    second.declaration = "color:blue".into();
    let mut rules = vec![first, second];
    sort_atomic_rules(&mut rules);
    assert_eq!(rules[0].declaration, "color:red");
    assert_eq!(rules[1].declaration, "color:blue");
  }
}
