//! Output formatting: analysis reports, heatmaps and skill graphs

pub mod formatter;
pub mod graph;
pub mod heatmap;
pub mod report;

pub use formatter::{emit, save_report_to_file, suggest_filename, ReportGenerator, ReportOutput};
pub use report::AnalysisReport;
