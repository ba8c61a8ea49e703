//! Descriptive statistics over timing samples.

/// Summary of one sample.
///
/// Quartiles follow the "exclusive" method (linear interpolation over
/// `n + 1` positions, extrapolating at the ends).  `std_err` is the
/// population standard deviation divided by `sqrt(n)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Summary {
    /// Smallest value.
    pub min: f64,
    /// First quartile.
    pub q1: f64,
    /// Second quartile.
    pub median: f64,
    /// Arithmetic mean.
    pub mean: f64,
    /// Third quartile.
    pub q3: f64,
    /// Largest value.
    pub max: f64,
    /// Standard error of the mean.
    pub std_err: f64,
}

impl Summary {
    /// Summarise `samples`, or `None` when there are none.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn of(samples: &[f64]) -> Option<Self> {
        let mut sorted = samples.to_vec();
        sorted.sort_by(f64::total_cmp);
        let (&min, &max) = (sorted.first()?, sorted.last()?);

        let n = sorted.len() as f64;
        let mean = sorted.iter().sum::<f64>() / n;
        let variance = sorted.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / n;
        let [q1, median, q3] = quartiles(&sorted);

        Some(Self {
            min,
            q1,
            median,
            mean,
            q3,
            max,
            std_err: variance.sqrt() / n.sqrt(),
        })
    }
}

/// Cut points of `sorted` into four equal-probability intervals.
#[allow(clippy::cast_precision_loss)]
fn quartiles(sorted: &[f64]) -> [f64; 3] {
    const PARTS: usize = 4;
    let len = sorted.len();
    let at = |i: usize| sorted.get(i).copied().unwrap_or(f64::NAN);

    if len == 1 {
        return [at(0); 3];
    }

    let m = len + 1;
    [1, 2, 3].map(|i| {
        let j = (i * m / PARTS).clamp(1, len - 1);
        // may fall outside 0..=PARTS, which extrapolates
        let delta = (i * m) as f64 - (j * PARTS) as f64;
        let parts = PARTS as f64;
        (at(j - 1) * (parts - delta) + at(j) * delta) / parts
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn empty_sample_has_no_summary() {
        assert!(Summary::of(&[]).is_none());
    }

    #[test]
    fn odd_sample() {
        let s = Summary::of(&[5.0, 1.0, 4.0, 2.0, 3.0]).unwrap();
        assert!(close(s.min, 1.0));
        assert!(close(s.q1, 1.5));
        assert!(close(s.median, 3.0));
        assert!(close(s.mean, 3.0));
        assert!(close(s.q3, 4.5));
        assert!(close(s.max, 5.0));
        // pstdev = sqrt(2), n = 5
        assert!(close(s.std_err, 2.0_f64.sqrt() / 5.0_f64.sqrt()));
    }

    #[test]
    fn two_samples_extrapolate() {
        let s = Summary::of(&[1.0, 3.0]).unwrap();
        assert!(close(s.q1, 0.5));
        assert!(close(s.median, 2.0));
        assert!(close(s.q3, 3.5));
    }

    #[test]
    fn even_sample() {
        let s = Summary::of(&[1.0, 2.0, 3.0, 4.0]).unwrap();
        assert!(close(s.q1, 1.25));
        assert!(close(s.median, 2.5));
        assert!(close(s.q3, 3.75));
    }

    #[test]
    fn single_sample_collapses() {
        let s = Summary::of(&[7.25]).unwrap();
        assert_eq!(
            s,
            Summary {
                min: 7.25,
                q1: 7.25,
                median: 7.25,
                mean: 7.25,
                q3: 7.25,
                max: 7.25,
                std_err: 0.0,
            }
        );
    }

    #[test]
    fn constant_sample_has_zero_error() {
        let s = Summary::of(&[2.0; 10]).unwrap();
        assert!(close(s.std_err, 0.0));
        assert!(close(s.q1, 2.0));
        assert!(close(s.q3, 2.0));
    }
}
