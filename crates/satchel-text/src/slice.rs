use std::collections::HashSet;
use std::hash::Hash;

/// Sort byte strings longest first. Equal lengths keep their order.
pub fn sort_by_length_desc<T: AsRef<[u8]>>(items: &mut [T]) {
    items.sort_by(|a, b| b.as_ref().len().cmp(&a.as_ref().len()));
}

pub fn contains<T: PartialEq>(items: &[T], value: &T) -> bool {
    items.iter().any(|item| item == value)
}

/// Drop duplicates, keeping the first occurrence of each value.
pub fn unique<T: Eq + Hash + Clone>(items: &[T]) -> Vec<T> {
    let mut seen = HashSet::with_capacity(items.len());
    items
        .iter()
        .filter(|item| seen.insert(*item))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn sorts_longest_first_and_is_stable() {
        let mut items = vec![b"bb".to_vec(), b"a".to_vec(), b"cc".to_vec(), b"dddd".to_vec()];
        sort_by_length_desc(&mut items);
        assert_eq!(
            items,
            vec![b"dddd".to_vec(), b"bb".to_vec(), b"cc".to_vec(), b"a".to_vec()]
        );
    }

    #[test]
    fn contains_and_unique() {
        let values = [3, 1, 3, 2, 1];
        assert!(contains(&values, &2));
        assert!(!contains(&values, &7));
        assert!(!contains(&[] as &[i64], &0));
        assert_eq!(unique(&values), vec![3, 1, 2]);
        assert!(unique::<i64>(&[]).is_empty());
    }

    proptest! {
        #[test]
        fn unique_keeps_first_occurrences(values in proptest::collection::vec(-5i64..5, 0..40)) {
            let out = unique(&values);
            let distinct: HashSet<_> = values.iter().collect();
            prop_assert_eq!(out.len(), distinct.len());
            for pair in out.windows(2) {
                let first = values.iter().position(|v| *v == pair[0]);
                let second = values.iter().position(|v| *v == pair[1]);
                prop_assert!(first < second);
            }
        }

        #[test]
        fn sort_lengths_non_increasing(mut items in proptest::collection::vec(proptest::collection::vec(any::<u8>(), 0..8), 0..20)) {
            sort_by_length_desc(&mut items);
            prop_assert!(items.windows(2).all(|w| w[0].len() >= w[1].len()));
        }
    }
}
