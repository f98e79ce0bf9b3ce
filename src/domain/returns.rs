//! Period returns and the cumulative return curve.
//!
//! returns[0] is absent; returns[i] = (P[i] - P[i-1]) / P[i-1].
//! cumulative[0] = 0; 1 + cumulative[i] = (1 + cumulative[i-1]) * (1 + returns[i]).

use super::error::SigperfError;

#[derive(Debug, Clone, PartialEq)]
pub struct ReturnSeries {
    pub returns: Vec<Option<f64>>,
    pub cumulative: Vec<f64>,
}

impl ReturnSeries {
    pub fn len(&self) -> usize {
        self.cumulative.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cumulative.is_empty()
    }

    pub fn defined_returns(&self) -> Vec<f64> {
        self.returns.iter().flatten().copied().collect()
    }

    /// Per-index distance below the running peak of the cumulative curve.
    pub fn drawdowns(&self) -> Vec<f64> {
        drawdown_series(&self.cumulative)
    }
}

/// Build returns and cumulative returns for an ordered price sequence.
pub fn build(prices: &[f64]) -> Result<ReturnSeries, SigperfError> {
    if prices.is_empty() {
        return Err(SigperfError::EmptySeries);
    }

    let mut returns = Vec::with_capacity(prices.len());
    let mut cumulative = Vec::with_capacity(prices.len());
    returns.push(None);
    cumulative.push(0.0);

    // 1 + cumulative[i], carried directly so a zero return leaves the curve unchanged.
    let mut growth = 1.0;
    for (i, pair) in prices.windows(2).enumerate() {
        let (prev, curr) = (pair[0], pair[1]);
        if prev == 0.0 {
            return Err(SigperfError::DivisionByZero { index: i + 1 });
        }

        let r = (curr - prev) / prev;
        growth *= 1.0 + r;
        if !r.is_finite() || !growth.is_finite() {
            return Err(SigperfError::NonFiniteReturn { index: i + 1 });
        }
        returns.push(Some(r));
        cumulative.push(growth - 1.0);
    }

    Ok(ReturnSeries {
        returns,
        cumulative,
    })
}

/// `cumulative[i] - max(cumulative[0..=i])` for every index; all values <= 0.
pub fn drawdown_series(cumulative: &[f64]) -> Vec<f64> {
    let mut peak = f64::NEG_INFINITY;
    cumulative
        .iter()
        .map(|&c| {
            peak = peak.max(c);
            c - peak
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn single_price_has_no_returns() {
        let series = build(&[100.0]).unwrap();
        assert_eq!(series.returns, vec![None]);
        assert_eq!(series.cumulative, vec![0.0]);
        assert!(series.defined_returns().is_empty());
    }

    #[test]
    fn empty_prices_fail() {
        assert!(matches!(build(&[]), Err(SigperfError::EmptySeries)));
    }

    #[test]
    fn single_drop_series() {
        let series = build(&[100.0, 110.0, 90.0, 95.0]).unwrap();

        assert_eq!(series.returns[0], None);
        assert_relative_eq!(series.returns[1].unwrap(), 0.10, epsilon = 1e-12);
        assert_relative_eq!(series.returns[2].unwrap(), -20.0 / 110.0, epsilon = 1e-12);
        assert_relative_eq!(series.returns[3].unwrap(), 5.0 / 90.0, epsilon = 1e-12);

        let expected = [0.0, 0.10, -0.10, -0.05];
        for (got, want) in series.cumulative.iter().zip(expected) {
            assert_relative_eq!(*got, want, epsilon = 1e-12);
        }
    }

    #[test]
    fn zero_price_is_division_by_zero() {
        let err = build(&[100.0, 0.0, 50.0]).unwrap_err();
        assert!(matches!(err, SigperfError::DivisionByZero { index: 2 }));
    }

    #[test]
    fn zero_first_price_fails_at_index_one() {
        let err = build(&[0.0, 10.0]).unwrap_err();
        assert!(matches!(err, SigperfError::DivisionByZero { index: 1 }));
    }

    #[test]
    fn trailing_zero_price_is_allowed() {
        // Only a zero *denominator* is undefined.
        let series = build(&[100.0, 0.0]).unwrap();
        assert_relative_eq!(series.returns[1].unwrap(), -1.0);
        assert_relative_eq!(series.cumulative[1], -1.0);
    }

    #[test]
    fn drawdown_series_tracks_running_peak() {
        let dd = drawdown_series(&[0.0, 0.10, -0.10, -0.05]);
        let expected = [0.0, 0.0, -0.20, -0.15];
        for (got, want) in dd.iter().zip(expected) {
            assert_relative_eq!(*got, want, epsilon = 1e-12);
        }
    }

    #[test]
    fn drawdown_series_empty() {
        assert!(drawdown_series(&[]).is_empty());
    }

    #[test]
    fn overflowing_return_is_rejected() {
        // 1e300 / 1e-300 overflows f64.
        let err = build(&[1e-300, 1e300, 2e300]).unwrap_err();
        assert!(matches!(err, SigperfError::NonFiniteReturn { index: 1 }));
    }

    #[test]
    fn overflowing_growth_is_rejected() {
        // Both returns are finite (about 1e10 and 1e300); their product is not.
        let err = build(&[1e-10, 1.0, 1e300]).unwrap_err();
        assert!(matches!(err, SigperfError::NonFiniteReturn { index: 2 }));
    }
}
