//! SVG report adapter implementing ReportPort.
//!
//! Writes the price/signal chart to the requested path and, when enabled,
//! the drawdown chart next to it as `<stem>_drawdown.svg`.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{info, warn};

use super::chart_svg::{self, ChartOptions};
use crate::domain::analysis::Analysis;
use crate::domain::error::SigperfError;
use crate::domain::signal_table::SignalTable;
use crate::ports::report_port::ReportPort;

#[derive(Debug, Clone, Default)]
pub struct SvgReportAdapter {
    options: ChartOptions,
    include_drawdown: bool,
}

impl SvgReportAdapter {
    pub fn new(options: ChartOptions) -> Self {
        Self {
            options,
            include_drawdown: false,
        }
    }

    pub fn with_drawdown(mut self, include: bool) -> Self {
        self.include_drawdown = include;
        self
    }

    pub fn drawdown_path(output_path: &Path) -> PathBuf {
        let stem = output_path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "chart".to_string());
        output_path.with_file_name(format!("{stem}_drawdown.svg"))
    }
}

impl ReportPort for SvgReportAdapter {
    fn write(
        &self,
        table: &SignalTable,
        analysis: &Analysis,
        output_path: &str,
    ) -> Result<(), SigperfError> {
        let path = Path::new(output_path);
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }

        let svg = chart_svg::render_price_chart(table, &self.options);
        fs::write(path, svg)?;
        info!(path = %path.display(), "price chart written");

        if self.include_drawdown {
            let dd_svg = chart_svg::render_drawdown_chart(&analysis.series, &self.options);
            if dd_svg.is_empty() {
                warn!("not enough points for a drawdown chart");
            } else {
                let dd_path = Self::drawdown_path(path);
                fs::write(&dd_path, dd_svg)?;
                info!(path = %dd_path.display(), "drawdown chart written");
            }
        }

        Ok(())
    }
}
