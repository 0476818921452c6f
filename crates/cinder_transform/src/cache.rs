//! Build-wide atomic rule cache.
//!
//! Compilation of independent files may be parallelized by the host build
//! tool, so the cache supports concurrent insert-if-absent. Rules are only
//! ever appended for the duration of a compilation run; the surrounding
//! bundler pass reads the accumulated sheets when extracting stylesheets.

use indexmap::IndexMap;
use parking_lot::Mutex;

/// Deduplicates atomic rules by CSS text across every file in a build.
#[derive(Debug, Default)]
pub struct StyleSheetCache {
  /// CSS rule text keyed by content, preserving first-insertion order so
  /// extraction output is stable.
  rules: Mutex<IndexMap<String, ()>>,
}

impl StyleSheetCache {
  pub fn new() -> Self {
    Self::default()
  }

  /// Record a rule. Returns true when the rule was not present before.
  pub fn insert_if_absent(&self, css_text: &str) -> bool {
    let mut rules = self.rules.lock();
    if rules.contains_key(css_text) {
      false
    } else {
      rules.insert(css_text.to_string(), ());
      true
    }
  }

  /// Snapshot of every rule seen so far, in first-insertion order.
  pub fn sheets(&self) -> Vec<String> {
    self.rules.lock().keys().cloned().collect()
  }

  pub fn len(&self) -> usize {
    self.rules.lock().len()
  }

  pub fn is_empty(&self) -> bool {
    self.rules.lock().is_empty()
  }
}

#[cfg(test)]
mod tests {
  use super::StyleSheetCache;

  #[test]
  fn deduplicates_by_content() {
    let cache = StyleSheetCache::new();
    assert!(cache.insert_if_absent("._syaz13q2{color:blue}"));
    assert!(!cache.insert_if_absent("._syaz13q2{color:blue}"));
    assert_eq!(cache.len(), 1);
  }

  #[test]
  fn snapshot_preserves_insertion_order() {
    let cache = StyleSheetCache::new();
    cache.insert_if_absent("._a{color:red}");
    cache.insert_if_absent("._b{color:blue}");
    cache.insert_if_absent("._a{color:red}");
    assert_eq!(
      cache.sheets(),
      vec!["._a{color:red}".to_string(), "._b{color:blue}".to_string()]
    );
  }

  #[test]
  fn concurrent_inserts_do_not_lose_rules() {
    use std::sync::Arc;

    let cache = Arc::new(StyleSheetCache::new());
    let handles: Vec<_> = (0..4)
      .map(|_| {
        let cache = Arc::clone(&cache);
        std::thread::spawn(move || {
          for i in 0..50 {
            cache.insert_if_absent(&format!("._rule{}{{order:{}}}", i % 10, i % 10));
          }
        })
      })
      .collect();
    for handle in handles {
      handle.join().unwrap();
    }
    assert_eq!(cache.len(), 10);
  }
}
