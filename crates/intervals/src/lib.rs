//! Split a dataset into three buckets (thirds) and classify values against them.
//!
//! Used to colour durations or speeds as low/medium/high relative to the
//! rest of the dataset.

use std::fmt;

use serde::Serialize;

/// One of the three ranges produced by [`distributed_intervals_from_values`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Bucket {
    Low,
    Medium,
    High,
}

impl Bucket {
    /// Bucket position, `0` for the lowest third.
    pub fn index(self) -> usize {
        match self {
            Bucket::Low => 0,
            Bucket::Medium => 1,
            Bucket::High => 2,
        }
    }
}

impl fmt::Display for Bucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Bucket::Low => "low",
            Bucket::Medium => "medium",
            Bucket::High => "high",
        };
        f.write_str(label)
    }
}

/// Ordered thresholds `[min, q1, q2, max]` bracketing three buckets.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IntervalBounds(pub [f64; 4]);

impl IntervalBounds {
    pub fn min(&self) -> f64 {
        self.0[0]
    }

    pub fn max(&self) -> f64 {
        self.0[3]
    }

    /// Classify a value against these bounds.
    pub fn classify(&self, value: f64) -> Bucket {
        if value < self.0[1] {
            Bucket::Low
        } else if value < self.0[2] {
            Bucket::Medium
        } else {
            Bucket::High
        }
    }
}

/// Compute the boundaries splitting `values` into thirds.
///
/// Boundaries sit at sorted indexes `n/3` and `2n/3`. For an even number of
/// values the boundary is the mean of the two neighbouring values. Returns
/// `None` for an empty dataset.
pub fn distributed_intervals_from_values(values: &[f64]) -> Option<IntervalBounds> {
    if values.is_empty() {
        return None;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);
    let n = sorted.len();

    let boundary = |index: usize| -> f64 {
        if n % 2 == 0 && index > 0 {
            (sorted[index - 1] + sorted[index]) / 2.0
        } else {
            sorted[index]
        }
    };

    Some(IntervalBounds([
        sorted[0],
        boundary(n / 3),
        boundary(2 * n / 3),
        sorted[n - 1],
    ]))
}

/// Bucket of `value`, or `None` when either input is missing.
pub fn value_to_interval(value: Option<f64>, intervals: Option<&IntervalBounds>) -> Option<Bucket> {
    Some(intervals?.classify(value?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn odd_length_uses_sorted_values() {
        let bounds = distributed_intervals_from_values(&[9.0, 1.0, 5.0, 3.0, 7.0, 2.0, 8.0, 4.0, 6.0])
            .unwrap();
        assert_eq!(bounds.0, [1.0, 4.0, 7.0, 9.0]);
    }

    #[test]
    fn even_length_averages_neighbours() {
        let bounds = distributed_intervals_from_values(&[60.0, 10.0, 40.0, 20.0, 50.0, 30.0]).unwrap();
        // n = 6: indexes 2 and 4
        assert_eq!(bounds.0, [10.0, 25.0, 45.0, 60.0]);
    }

    #[test]
    fn tiny_datasets_stay_ordered() {
        assert_eq!(distributed_intervals_from_values(&[]), None);
        assert_eq!(
            distributed_intervals_from_values(&[3.0]).unwrap().0,
            [3.0, 3.0, 3.0, 3.0]
        );
        assert_eq!(
            distributed_intervals_from_values(&[4.0, 2.0]).unwrap().0,
            [2.0, 2.0, 3.0, 4.0]
        );
    }

    #[test]
    fn boundary_values_fall_into_the_upper_bucket() {
        let bounds = IntervalBounds([0.0, 10.0, 20.0, 30.0]);
        assert_eq!(value_to_interval(Some(9.9), Some(&bounds)), Some(Bucket::Low));
        assert_eq!(value_to_interval(Some(10.0), Some(&bounds)), Some(Bucket::Medium));
        assert_eq!(value_to_interval(Some(19.9), Some(&bounds)), Some(Bucket::Medium));
        assert_eq!(value_to_interval(Some(20.0), Some(&bounds)), Some(Bucket::High));
        assert_eq!(value_to_interval(Some(99.0), Some(&bounds)), Some(Bucket::High));
        assert_eq!(value_to_interval(None, Some(&bounds)), None);
        assert_eq!(value_to_interval(Some(1.0), None), None);
    }
}
