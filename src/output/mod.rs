pub mod report;

pub use report::{render_export, render_summary, write_reports, ReportOutcome, REPORT_FILE, SUMMARY_FILE};
