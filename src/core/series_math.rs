//! Pure array transforms shared by series preparation and default chart
//! configurations.

use crate::core::Datum;

/// A sample that may be missing.
pub trait SeriesValue: Copy {
    fn value(self) -> Option<f64>;
}

impl SeriesValue for f64 {
    fn value(self) -> Option<f64> {
        Some(self)
    }
}

impl SeriesValue for Option<f64> {
    fn value(self) -> Option<f64> {
        self
    }
}

/// Running total of `values`; missing samples contribute zero.
#[must_use]
pub fn cumsum<V: SeriesValue>(values: &[V]) -> Vec<f64> {
    let mut sum = 0.0;
    values
        .iter()
        .map(|value| {
            sum += value.value().unwrap_or(0.0);
            sum
        })
        .collect()
}

/// Index of the first occurrence of the largest present value.
///
/// Returns `None` for empty or all-missing input. Later ties never replace
/// an earlier maximum.
#[must_use]
pub fn max_index<V: SeriesValue>(values: &[V]) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for (index, value) in values.iter().enumerate() {
        let Some(value) = value.value().filter(|value| !value.is_nan()) else {
            continue;
        };
        if best.is_none_or(|(_, max)| max < value) {
            best = Some((index, value));
        }
    }
    best.map(|(index, _)| index)
}

/// Element-wise sum of parallel arrays, skipping unavailable (`None`) arrays.
///
/// Arrays are expected to share one length. Returns `None` when no array is
/// available.
#[must_use]
pub fn element_sum(arrays: &[Option<&[f64]>]) -> Option<Vec<f64>> {
    let mut available = arrays.iter().flatten();
    let mut sum = available.next()?.to_vec();
    for array in available {
        for (acc, value) in sum.iter_mut().zip(array.iter()) {
            *acc += value;
        }
    }
    Some(sum)
}

/// Per-day differences of a cumulative series. The first element is kept.
#[must_use]
pub fn extract_diff(values: &[f64]) -> Vec<f64> {
    let mut previous = 0.0;
    values
        .iter()
        .map(|&value| {
            let diff = value - previous;
            previous = value;
            diff
        })
        .collect()
}

#[must_use]
pub fn last<T: Copy>(values: &[T]) -> Option<T> {
    values.last().copied()
}

/// Leftmost insertion point of `target` among datum times (first `x >= target`).
#[must_use]
pub fn bisect_left(data: &[Datum], target: f64) -> usize {
    data.partition_point(|datum| (datum.x as f64) < target)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cumsum_treats_missing_as_zero() {
        assert!(cumsum::<f64>(&[]).is_empty());
        assert_eq!(cumsum(&[Some(1.0), None, Some(2.0)]), vec![1.0, 1.0, 3.0]);
        assert_eq!(cumsum(&[2.0, 3.0]), vec![2.0, 5.0]);
    }

    #[test]
    fn max_index_prefers_first_peak() {
        assert_eq!(max_index(&[1.0, 5.0, 3.0, 5.0]), Some(1));
        assert_eq!(max_index::<f64>(&[]), None);
        assert_eq!(max_index::<Option<f64>>(&[None, None]), None);
        assert_eq!(max_index(&[None, Some(-2.0), Some(-1.0)]), Some(2));
    }

    #[test]
    fn element_sum_skips_unavailable_arrays() {
        let a = [1.0, 2.0];
        let b = [10.0, 20.0];
        assert_eq!(
            element_sum(&[Some(&a[..]), None, Some(&b[..])]),
            Some(vec![11.0, 22.0])
        );
        assert_eq!(element_sum(&[None]), None);
        assert_eq!(element_sum(&[]), None);
    }

    #[test]
    fn diff_inverts_cumsum() {
        assert_eq!(extract_diff(&[1.0, 3.0, 3.0, 7.0]), vec![1.0, 2.0, 0.0, 4.0]);
        assert_eq!(last(&[1, 2, 3]), Some(3));
        assert_eq!(last::<i32>(&[]), None);
    }

    #[test]
    fn bisect_left_returns_first_not_less() {
        let data: Vec<Datum> = (0..4).map(|x| Datum::new(x, Some(0.0))).collect();
        assert_eq!(bisect_left(&data, 1.4), 2);
        assert_eq!(bisect_left(&data, 1.0), 1);
        assert_eq!(bisect_left(&data, -3.0), 0);
        assert_eq!(bisect_left(&data, 9.0), 4);
    }
}
