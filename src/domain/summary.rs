//! Performance summary: Sharpe ratio, maximum drawdown, final cumulative return.

use super::error::SigperfError;
use super::returns::drawdown_series;

/// Fewest defined returns a sample standard deviation needs.
pub const MIN_DEFINED_RETURNS: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PerformanceSummary {
    /// Mean of defined returns over their sample standard deviation.
    /// No risk-free rate and no annualization.
    pub sharpe_ratio: f64,
    /// Most negative `cumulative[i] - runningMax(cumulative[..=i])`. Always <= 0.
    pub max_drawdown: f64,
    pub final_cumulative_return: f64,
}

pub fn summarize(
    returns: &[Option<f64>],
    cumulative: &[f64],
) -> Result<PerformanceSummary, SigperfError> {
    let final_cumulative_return = *cumulative.last().ok_or(SigperfError::EmptySeries)?;

    let defined: Vec<f64> = returns.iter().flatten().copied().collect();
    let sharpe_ratio = sharpe_ratio(&defined)?;
    let max_drawdown = max_drawdown(cumulative);

    Ok(PerformanceSummary {
        sharpe_ratio,
        max_drawdown,
        final_cumulative_return,
    })
}

/// Mean over sample standard deviation (divisor k - 1).
pub fn sharpe_ratio(returns: &[f64]) -> Result<f64, SigperfError> {
    let k = returns.len();
    if k < MIN_DEFINED_RETURNS {
        return Err(SigperfError::InsufficientData {
            returns: k,
            minimum: MIN_DEFINED_RETURNS,
        });
    }

    // Identical returns must be caught before summing: the rounded mean of
    // three or more equal values can differ from them by an ulp.
    if returns.iter().all(|r| *r == returns[0]) {
        return Err(SigperfError::DegenerateInput);
    }

    let n = k as f64;
    let mean = finite("mean", returns.iter().sum::<f64>() / n)?;
    let variance = returns.iter().map(|r| (r - mean).powi(2)).sum::<f64>() / (n - 1.0);
    let stddev = finite("standard deviation", variance.sqrt())?;

    if stddev == 0.0 {
        return Err(SigperfError::DegenerateInput);
    }

    finite("ratio", mean / stddev)
}

fn finite(statistic: &'static str, value: f64) -> Result<f64, SigperfError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(SigperfError::NonFiniteStatistic { statistic })
    }
}

/// Deepest peak-to-trough fall of the cumulative curve, as a value <= 0.
///
/// Taking the maximum of the same differences instead would always give 0
/// (the value at any new peak), so the minimum is reported.
pub fn max_drawdown(cumulative: &[f64]) -> f64 {
    drawdown_series(cumulative)
        .into_iter()
        .fold(0.0, f64::min)
}
