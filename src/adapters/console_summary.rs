//! Plain-text performance summary.

use crate::domain::signal::Signal;
use crate::domain::signal_table::SignalTable;
use crate::domain::summary::PerformanceSummary;

pub fn format_summary(summary: &PerformanceSummary) -> String {
    format!(
        "Sharpe Ratio: {:.2}\nMaximum Drawdown: {:.2}%\nCumulative Return: {:.2}%\n",
        summary.sharpe_ratio,
        summary.max_drawdown * 100.0,
        summary.final_cumulative_return * 100.0
    )
}

/// Row and signal counts, used by `validate`.
pub fn format_table_overview(table: &SignalTable) -> String {
    format!(
        "Rows: {}\nBuy signals: {}\nSell signals: {}\nHold signals: {}\n",
        table.len(),
        table.count(Signal::Buy),
        table.count(Signal::Sell),
        table.count(Signal::Hold)
    )
}
