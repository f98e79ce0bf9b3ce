//! Concrete adapter implementations for ports.

pub mod csv_adapter;
pub mod file_config_adapter;
pub mod chart_svg;
pub mod svg_report_adapter;
pub mod console_summary;
