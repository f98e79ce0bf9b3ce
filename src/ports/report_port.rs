//! Report generation port trait.

use crate::domain::analysis::Analysis;
use crate::domain::error::SigperfError;
use crate::domain::signal_table::SignalTable;

/// Port for writing a rendered view of an analysis.
pub trait ReportPort {
    fn write(
        &self,
        table: &SignalTable,
        analysis: &Analysis,
        output_path: &str,
    ) -> Result<(), SigperfError>;
}
