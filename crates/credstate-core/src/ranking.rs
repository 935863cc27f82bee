// Rust guideline compliant 2026-02-06

//! In-place heap sort used for the independent usage ranking.
//!
//! The slice is first turned into a max-heap by sifting down every parent from
//! the last one to the root. The root is then repeatedly swapped into the last
//! unsorted slot and the shrunken heap is repaired, which leaves the slice in
//! ascending order. O(n log n) time, O(1) extra space, not stable.

use std::cmp::Ordering;

/// Sorts a slice in ascending order.
pub fn heap_sort<T: Ord>(items: &mut [T]) {
    heap_sort_by(items, Ord::cmp);
}

/// Sorts a slice in ascending order of the key extracted by `key`.
pub fn heap_sort_by_key<T, K, F>(items: &mut [T], mut key: F)
where
    K: Ord,
    F: FnMut(&T) -> K,
{
    heap_sort_by(items, |a, b| key(a).cmp(&key(b)));
}

/// Sorts a slice in ascending order according to `compare`.
pub fn heap_sort_by<T, F>(items: &mut [T], mut compare: F)
where
    F: FnMut(&T, &T) -> Ordering,
{
    let len = items.len();
    if len < 2 {
        return;
    }

    for parent in (0..len / 2).rev() {
        sift_down(items, parent, len, &mut compare);
    }

    for end in (1..len).rev() {
        items.swap(0, end);
        sift_down(items, 0, end, &mut compare);
    }
}

/// Restores the max-heap property for the subtree at `root` within `items[..end]`.
fn sift_down<T, F>(items: &mut [T], mut root: usize, end: usize, compare: &mut F)
where
    F: FnMut(&T, &T) -> Ordering,
{
    loop {
        let left = 2 * root + 1;
        let right = left + 1;
        let mut largest = root;

        if left < end && compare(&items[left], &items[largest]) == Ordering::Greater {
            largest = left;
        }
        if right < end && compare(&items[right], &items[largest]) == Ordering::Greater {
            largest = right;
        }
        if largest == root {
            return;
        }

        items.swap(root, largest);
        root = largest;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_sorts_small_inputs() {
        let mut empty: Vec<i32> = Vec::new();
        heap_sort(&mut empty);
        assert!(empty.is_empty());

        let mut single = vec![7];
        heap_sort(&mut single);
        assert_eq!(single, vec![7]);

        let mut values = vec![5, 1, 4, 1, 3, 9, 2];
        heap_sort(&mut values);
        assert_eq!(values, vec![1, 1, 2, 3, 4, 5, 9]);
    }

    #[test]
    fn test_sort_by_key() {
        let mut pairs = vec![("gmail", 5), ("twitter", 1), ("facebook", 3)];
        heap_sort_by_key(&mut pairs, |&(_, count)| count);
        let names: Vec<&str> = pairs.iter().map(|&(name, _)| name).collect();
        assert_eq!(names, vec!["twitter", "facebook", "gmail"]);
    }

    proptest! {
        #[test]
        fn prop_matches_std_sort(mut values in prop::collection::vec(any::<i64>(), 0..200)) {
            let mut expected = values.clone();
            expected.sort();
            heap_sort(&mut values);
            prop_assert_eq!(values, expected);
        }
    }
}
