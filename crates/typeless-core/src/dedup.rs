//! Order-preserving uniqueness.

use indexmap::IndexSet;
use std::hash::Hash;

/// Returns the distinct items of `items`, keeping the first occurrence of each.
///
/// Items are compared by value only. No sorting takes place, so generated
/// output stays deterministic for identical input.
pub fn unique<I, T>(items: I) -> Vec<T>
where
    I: IntoIterator<Item = T>,
    T: Eq + Hash,
{
    items.into_iter().collect::<IndexSet<T>>().into_iter().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_element() {
        assert_eq!(unique(vec!["Banana"]), vec!["Banana"]);
    }

    #[test]
    fn test_empty() {
        let empty: Vec<String> = Vec::new();
        assert!(unique(empty).is_empty());
    }

    #[test]
    fn test_two_duplicates() {
        assert_eq!(unique(vec!["Banana", "Banana"]), vec!["Banana"]);
    }

    #[test]
    fn test_first_occurrence_wins() {
        assert_eq!(
            unique(vec!["Banana", "Apple", "Banana"]),
            vec!["Banana", "Apple"]
        );
    }

    #[test]
    fn test_no_normalization() {
        assert_eq!(
            unique(vec!["fruit", "Fruit", " Fruit"]),
            vec!["fruit", "Fruit", " Fruit"]
        );
    }

    #[test]
    fn test_idempotent() {
        let once = unique(vec!["C", "A", "C", "B", "A"]);
        let twice = unique(once.clone());
        assert_eq!(once, twice);
        assert_eq!(once, vec!["C", "A", "B"]);
    }
}
