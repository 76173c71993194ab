use serde::Serialize;
use std::collections::HashSet;
use std::hash::Hash;

/// Elements of `b` whose key also appears in `a`, in `b`'s order.
///
/// Runs in O(|a| + |b|). Duplicates in `b` are kept as they appear.
pub fn intersect_by_key<T, K, F>(a: &[T], b: &[T], key_of: F) -> Vec<T>
where
    T: Clone,
    K: Eq + Hash,
    F: Fn(&T) -> K,
{
    let keys: HashSet<K> = a.iter().map(&key_of).collect();
    b.iter().filter(|item| keys.contains(&key_of(*item))).cloned().collect()
}

/// A common-items list ready for display, optionally truncated
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CommonSet<T> {
    pub shown: Vec<T>,
    /// Matches left out of `shown`
    pub remaining: usize,
    pub noun: &'static str,
}

impl<T> CommonSet<T> {
    pub fn all(items: Vec<T>, noun: &'static str) -> Self {
        Self {
            shown: items,
            remaining: 0,
            noun,
        }
    }

    pub fn truncated(mut items: Vec<T>, limit: usize, noun: &'static str) -> Self {
        let remaining = items.len().saturating_sub(limit);
        items.truncate(limit);
        Self {
            shown: items,
            remaining,
            noun,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.shown.is_empty()
    }

    pub fn total(&self) -> usize {
        self.shown.len() + self.remaining
    }

    pub fn more_summary(&self) -> Option<String> {
        (self.remaining > 0).then(|| format!("and {} more...", self.remaining))
    }

    pub fn empty_message(&self) -> String {
        format!("No common {}", self.noun)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use media_catalog_models::Actor;

    #[test]
    fn test_common_actor_keeps_right_side_entry() {
        let a = vec![Actor::new("A", "X"), Actor::new("B", "Y")];
        let b = vec![Actor::new("B", "Y"), Actor::new("C", "Z")];

        let common = intersect_by_key(&a, &b, |actor| actor.name.clone());
        assert_eq!(common, vec![Actor::new("B", "Y")]);
    }

    #[test]
    fn test_result_is_subset_of_b_in_order() {
        let a = vec!["d", "b", "a"];
        let b = vec!["a", "c", "d", "e", "b"];
        let common = intersect_by_key(&a, &b, |s| *s);
        assert_eq!(common, vec!["a", "d", "b"]);
        assert!(common.iter().all(|s| b.contains(s) && a.contains(s)));
    }

    #[test]
    fn test_empty_inputs() {
        let empty: Vec<&str> = Vec::new();
        assert!(intersect_by_key(&empty, &["a"], |s| *s).is_empty());
        assert!(intersect_by_key(&["a"], &empty, |s| *s).is_empty());
    }

    #[test]
    fn test_truncated_summary() {
        let set = CommonSet::truncated((1..=8).collect::<Vec<_>>(), 5, "actors");
        assert_eq!(set.shown, vec![1, 2, 3, 4, 5]);
        assert_eq!(set.total(), 8);
        assert_eq!(set.more_summary().as_deref(), Some("and 3 more..."));

        let short = CommonSet::truncated(vec![1, 2], 5, "actors");
        assert_eq!(short.more_summary(), None);
    }

    #[test]
    fn test_empty_message() {
        let set: CommonSet<String> = CommonSet::all(Vec::new(), "genres");
        assert!(set.is_empty());
        assert_eq!(set.empty_message(), "No common genres");
    }
}
