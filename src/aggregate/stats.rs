//! Order-independent sums and means shared by the grouping aggregators.
//!
//! Float addition is not associative, so every sum here is taken over the
//! samples sorted with [`f64::total_cmp`]. Any permutation of the same
//! samples yields a bit-identical result.

use crate::plant::types::usable;

/// Sum of `values` in ascending total order.
pub fn ordered_sum(values: &[f64]) -> f64 {
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);
    sorted.iter().sum()
}

/// Mean of a slice, `0.0` when empty.
pub fn mean_or_zero(values: &[f64]) -> f64 {
    if values.is_empty() {
        0.0
    } else {
        ordered_sum(values) / values.len() as f64
    }
}

/// Usable values collected for one group.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MeanAccumulator {
    samples: Vec<f64>,
}

impl MeanAccumulator {
    /// Adds `value` if it is present and finite; otherwise ignores it.
    pub fn push(&mut self, value: Option<f64>) {
        if let Some(v) = usable(value) {
            self.samples.push(v);
        }
    }

    /// Sum of accepted values, `None` if nothing was accepted.
    pub fn sum(&self) -> Option<f64> {
        (!self.samples.is_empty()).then(|| ordered_sum(&self.samples))
    }

    /// Arithmetic mean of accepted values, `None` if nothing was accepted.
    pub fn mean(&self) -> Option<f64> {
        (!self.samples.is_empty()).then(|| mean_or_zero(&self.samples))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn skips_unusable_values() {
        let mut acc = MeanAccumulator::default();
        acc.push(Some(2.0));
        acc.push(None);
        acc.push(Some(f64::NAN));
        acc.push(Some(4.0));
        assert_eq!(acc.sum(), Some(6.0));
        assert_eq!(acc.mean(), Some(3.0));
    }

    #[test]
    fn empty_has_no_sum_or_mean() {
        let acc = MeanAccumulator::default();
        assert_eq!(acc.sum(), None);
        assert_eq!(acc.mean(), None);
        assert_eq!(mean_or_zero(&[]), 0.0);
    }

    #[test]
    fn push_order_does_not_change_sum() {
        let mut forward = MeanAccumulator::default();
        let mut reversed = MeanAccumulator::default();
        for v in [0.1, 0.2, 0.3] {
            forward.push(Some(v));
        }
        for v in [0.3, 0.2, 0.1] {
            reversed.push(Some(v));
        }
        assert_eq!(forward.sum(), reversed.sum());
        assert_eq!(forward.mean(), reversed.mean());
        assert_eq!(ordered_sum(&[0.3, 0.1, 0.2]), ordered_sum(&[0.1, 0.2, 0.3]));
    }
}
