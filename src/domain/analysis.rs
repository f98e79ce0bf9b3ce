//! Analysis pipeline: signal table to return series and performance summary.

use tracing::debug;

use super::error::SigperfError;
use super::returns::{self, ReturnSeries};
use super::signal_table::SignalTable;
use super::summary::{self, PerformanceSummary};

/// Outputs handed to the presentation layer.
#[derive(Debug, Clone, PartialEq)]
pub struct Analysis {
    pub series: ReturnSeries,
    pub summary: PerformanceSummary,
}

pub fn analyze(table: &SignalTable) -> Result<Analysis, SigperfError> {
    let prices = table.prices();
    debug!(points = prices.len(), "building return series");
    let series = returns::build(&prices)?;

    debug!(
        defined_returns = series.defined_returns().len(),
        "summarizing performance"
    );
    let summary = summary::summarize(&series.returns, &series.cumulative)?;

    debug!(
        sharpe = summary.sharpe_ratio,
        max_drawdown = summary.max_drawdown,
        final_return = summary.final_cumulative_return,
        "analysis complete"
    );
    Ok(Analysis { series, summary })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::signal::Signal;
    use approx::assert_relative_eq;

    #[test]
    fn analyze_single_drop_table() {
        let table = SignalTable::new(
            vec![100.0, 110.0, 90.0, 95.0],
            vec![Signal::Buy, Signal::Hold, Signal::Sell, Signal::Hold],
        )
        .unwrap();

        let analysis = analyze(&table).unwrap();
        assert_eq!(analysis.series.len(), 4);
        assert_relative_eq!(analysis.summary.max_drawdown, -0.20, epsilon = 1e-12);
        assert_relative_eq!(
            analysis.summary.final_cumulative_return,
            -0.05,
            epsilon = 1e-12
        );
    }

    #[test]
    fn analyze_propagates_division_by_zero() {
        let table = SignalTable::new(vec![100.0, 0.0, 50.0], vec![Signal::Hold; 3]).unwrap();
        assert!(matches!(
            analyze(&table),
            Err(SigperfError::DivisionByZero { index: 2 })
        ));
    }

    #[test]
    fn analyze_empty_table() {
        let table = SignalTable::new(vec![], vec![]).unwrap();
        assert!(matches!(analyze(&table), Err(SigperfError::EmptySeries)));
    }

    #[test]
    fn analyze_single_point() {
        let table = SignalTable::new(vec![42.0], vec![Signal::Buy]).unwrap();
        assert!(matches!(
            analyze(&table),
            Err(SigperfError::InsufficientData { .. })
        ));
    }
}
