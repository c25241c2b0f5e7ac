use std::cmp::Ordering;

/// Stable insertion sort with a custom comparator.
///
/// Elements are only moved past neighbours that compare strictly
/// `Greater`, so elements comparing `Equal` keep their relative order.
///
/// # Examples
///
/// ```
/// use vactory_util::sort::insertion_sort_by;
///
/// let mut rows = vec![(3, 'a'), (1, 'b'), (3, 'c'), (1, 'd')];
/// insertion_sort_by(&mut rows, |a, b| a.0.cmp(&b.0));
/// assert_eq!(rows, vec![(1, 'b'), (1, 'd'), (3, 'a'), (3, 'c')]);
/// ```
pub fn insertion_sort_by<T, F>(arr: &mut [T], mut compare: F)
where
    F: FnMut(&T, &T) -> Ordering,
{
    let len = arr.len();
    for i in 1..len {
        let mut j = i;
        while j > 0 && compare(&arr[j - 1], &arr[j]) == Ordering::Greater {
            arr.swap(j - 1, j);
            j -= 1;
        }
    }
}

/// Stable insertion sort with a key extraction function.
///
/// # Examples
///
/// ```
/// use vactory_util::sort::insertion_sort_by_key;
///
/// let mut weights = vec![("hero", 2), ("cta", 1), ("footer", 2)];
/// insertion_sort_by_key(&mut weights, |w| w.1);
/// assert_eq!(weights, vec![("cta", 1), ("hero", 2), ("footer", 2)]);
/// ```
pub fn insertion_sort_by_key<T, K, F>(arr: &mut [T], mut key: F)
where
    K: Ord,
    F: FnMut(&T) -> K,
{
    let len = arr.len();
    for i in 1..len {
        let mut j = i;
        while j > 0 && key(&arr[j - 1]) > key(&arr[j]) {
            arr.swap(j - 1, j);
            j -= 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_sort_by_key_empty() {
        let mut arr: Vec<(i64, usize)> = vec![];
        insertion_sort_by_key(&mut arr, |e| e.0);
        assert!(arr.is_empty());
    }

    #[test]
    fn test_sort_by_key_single() {
        let mut arr = vec![(7, 0)];
        insertion_sort_by_key(&mut arr, |e| e.0);
        assert_eq!(arr, vec![(7, 0)]);
    }

    #[test]
    fn test_sort_by_key_reverse() {
        let mut arr = vec![(5, 0), (4, 1), (3, 2), (2, 3), (1, 4)];
        insertion_sort_by_key(&mut arr, |e| e.0);
        assert_eq!(arr, vec![(1, 4), (2, 3), (3, 2), (4, 1), (5, 0)]);
    }

    #[test]
    fn test_sort_by_key_ties_keep_order() {
        let mut arr = vec![(2, 'a'), (1, 'b'), (2, 'c'), (1, 'd'), (2, 'e')];
        insertion_sort_by_key(&mut arr, |e| e.0);
        assert_eq!(arr, vec![(1, 'b'), (1, 'd'), (2, 'a'), (2, 'c'), (2, 'e')]);
    }

    #[test]
    fn test_sort_by_descending() {
        let mut arr = vec![3, 1, 4, 1, 5];
        insertion_sort_by(&mut arr, |a, b| b.cmp(a));
        assert_eq!(arr, vec![5, 4, 3, 1, 1]);
    }

    proptest! {
        #[test]
        fn sort_by_key_is_stable(weights in proptest::collection::vec(-3i64..3, 0..40)) {
            let mut tagged: Vec<(i64, usize)> =
                weights.iter().copied().enumerate().map(|(i, w)| (w, i)).collect();
            insertion_sort_by_key(&mut tagged, |e| e.0);

            let mut expected: Vec<(i64, usize)> =
                weights.iter().copied().enumerate().map(|(i, w)| (w, i)).collect();
            expected.sort_by_key(|e| e.0);

            prop_assert_eq!(tagged, expected);
        }
    }
}
