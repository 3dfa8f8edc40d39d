//! Single-pass standard deviation kernel
//!
//! Welford's method keeps a running mean and the running sum of squared deviations
//! from it, so the variance comes out of one pass with O(1) state and without the
//! cancellation of the sum-of-squares formula.

use crate::dtype::Element;

/// Running mean and sum of squared deviations
#[derive(Debug, Clone, Copy)]
pub(crate) struct Welford {
    count: usize,
    mean: f64,
    m2: f64,
}

impl Welford {
    pub(crate) const fn new() -> Self {
        Self {
            count: 0,
            mean: 0.0,
            m2: 0.0,
        }
    }

    #[allow(clippy::cast_precision_loss)]
    pub(crate) fn push(&mut self, x: f64) {
        self.count += 1;
        let delta = x - self.mean;
        self.mean += delta / self.count as f64;
        self.m2 += delta * (x - self.mean);
    }

    /// `None` when nothing was pushed, exactly `0.0` after a single value
    #[allow(clippy::cast_precision_loss)]
    pub(crate) fn stdev(&self, bias: bool) -> Option<f64> {
        match self.count {
            0 => None,
            1 => Some(0.0),
            n => {
                let denominator = if bias { n } else { n - 1 };
                Some((self.m2 / denominator as f64).sqrt())
            }
        }
    }
}

/// Standard deviation of a numeric sequence
///
/// Returns `None` for an empty sequence and `Some(0.0)` for a single value. With
/// `bias` the squared deviations are divided by `N`, otherwise by `N - 1`.
///
/// ```
/// use ru_stdev::statistics::stdev_sequence;
///
/// let s = stdev_sequence(&[2.0, 4.0, 5.0, 3.0, 8.0, 2.0], false).unwrap();
/// assert!((s - 2.280350850198276).abs() < 1e-15);
/// ```
#[must_use]
pub fn stdev_sequence<T: Element>(values: &[T], bias: bool) -> Option<f64> {
    stdev_by(values, |&value, _| value.to_f64(), bias)
}

/// Standard deviation of the values extracted from `items` by `accessor`
///
/// The accessor receives each element with its zero-based index and is called once per
/// element. Empty and single-element inputs return before it is called at all.
#[must_use]
pub fn stdev_by<T, F>(items: &[T], accessor: F, bias: bool) -> Option<f64>
where
    F: Fn(&T, usize) -> f64,
{
    match items.len() {
        0 => return None,
        1 => return Some(0.0),
        _ => {}
    }
    let mut acc = Welford::new();
    for (index, item) in items.iter().enumerate() {
        acc.push(accessor(item, index));
    }
    acc.stdev(bias)
}

/// Standard deviation over any stream of values
pub(crate) fn stdev_values(values: impl IntoIterator<Item = f64>, bias: bool) -> Option<f64> {
    let mut acc = Welford::new();
    values.into_iter().for_each(|x| acc.push(x));
    acc.stdev(bias)
}
