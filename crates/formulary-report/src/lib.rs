//! # formulary-report
//!
//! Export formatters for formulary calculations: a structured
//! [`ExportRecord`] for JSON and a fixed-layout plain-text report.

mod error;
mod options;
mod record;
mod text;

pub use error::{ReportError, ReportResult};
pub use options::TextReportOptions;
pub use record::{to_record, ExportRecord};
pub use text::{render_text_report, render_text_report_with, to_text_report, write_report_file};
