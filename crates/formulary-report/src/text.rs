//! Plain-text calculation report

use std::fs;
use std::path::Path;

use chrono::{Local, NaiveDateTime};
use formulary_core::{format_number, CalculationResult, FormulaDescriptor, InputMap};
use formulary_expr::substitute;

use crate::error::ReportResult;
use crate::options::TextReportOptions;

const RULE_WIDTH: usize = 63;
const SUB_RULE_WIDTH: usize = 45;
const BOX_INNER_WIDTH: usize = 36;
/// Width of the boxed result line before its closing border, in UTF-16 units
const BOX_LINE_WIDTH: usize = 40;

/// Render a report stamped with the local time
pub fn to_text_report(
    formula: &FormulaDescriptor,
    inputs: &InputMap,
    result: &CalculationResult,
) -> String {
    render_text_report(formula, inputs, result, Local::now().naive_local())
}

/// Render a report with the default headings
pub fn render_text_report(
    formula: &FormulaDescriptor,
    inputs: &InputMap,
    result: &CalculationResult,
    generated_at: NaiveDateTime,
) -> String {
    render_text_report_with(formula, inputs, result, generated_at, &TextReportOptions::default())
}

/// Render a report.
///
/// The output depends only on the arguments, so the same call always
/// produces the same bytes.
pub fn render_text_report_with(
    formula: &FormulaDescriptor,
    inputs: &InputMap,
    result: &CalculationResult,
    generated_at: NaiveDateTime,
    options: &TextReportOptions,
) -> String {
    let mut report = ReportBuilder::default();

    let heading = format!("         {}", options.heading);
    let subheading = format!("         {}", options.subheading);
    report.banner(&[heading.as_str(), subheading.as_str()]);
    report.blank();
    report.line(format!(
        "Generated: {}",
        generated_at.format(&options.timestamp_format)
    ));
    report.blank();

    report.section("FORMULA INFORMATION");
    report.line(format!("Formula ID: {}", formula.id));
    report.line(format!("Category: {}", formula.category));
    report.line(format!("Title: {}", formula.title));
    report.blank();
    report.line("Description:");
    report.line(&formula.description);
    report.blank();

    report.section("CALCULATION DETAILS");
    report.line("Formula Expression:");
    report.line(&formula.formula);
    report.blank();

    report.line("INPUT VARIABLES:");
    report.rule('─', SUB_RULE_WIDTH);
    for (index, variable) in formula.variables.iter().enumerate() {
        let value = inputs
            .get(&variable.key)
            .map(format_number)
            .unwrap_or_else(|| "(not provided)".to_string());
        report.line(format!("{}. {} ({})", index + 1, variable.label, variable.key));
        report.line(format!("   Value: {} {}", value, variable.unit));
    }
    report.blank();

    report.line("SUBSTITUTED FORMULA:");
    report.rule('─', SUB_RULE_WIDTH);
    report.line(substitute(&formula.formula, inputs));
    report.blank();

    report.section("CALCULATION RESULT");
    match result {
        CalculationResult::Success { value } => {
            let output = &formula.output;
            report.line(format!("{} ({}):", output.label, output.key));
            report.blank();
            report.line(format!("   ╔{}╗", "═".repeat(BOX_INNER_WIDTH)));
            let boxed = format!("   ║  {} {}", format_number(*value), output.unit);
            report.line(format!("{}║", pad_end(&boxed, BOX_LINE_WIDTH)));
            report.line(format!("   ╚{}╝", "═".repeat(BOX_INNER_WIDTH)));
        }
        CalculationResult::Failure { error_message } => {
            report.line(format!("ERROR: {}", error_message));
        }
    }
    report.blank();

    report.section("SUMMARY");
    report.line(format!("Total Input Variables: {}", formula.variables.len()));
    report.line(format!(
        "Calculation Status: {}",
        if result.is_success() { "SUCCESS" } else { "FAILED" }
    ));
    report.line(format!("Output Unit: {}", formula.output.unit));
    report.blank();

    report.banner(&["                    END OF REPORT"]);

    report.finish()
}

/// Write a report to `path`, replacing any existing file
pub fn write_report_file<P: AsRef<Path>>(path: P, contents: &str) -> ReportResult<()> {
    let path = path.as_ref();
    fs::write(path, contents)?;
    tracing::debug!(path = %path.display(), bytes = contents.len(), "wrote report");
    Ok(())
}

/// Pad `text` with spaces to `width` UTF-16 code units; longer text is kept
fn pad_end(text: &str, width: usize) -> String {
    let len = text.encode_utf16().count();
    let mut padded = text.to_string();
    padded.extend(std::iter::repeat(' ').take(width.saturating_sub(len)));
    padded
}

#[derive(Default)]
struct ReportBuilder {
    out: String,
}

impl ReportBuilder {
    fn line(&mut self, text: impl AsRef<str>) {
        self.out.push_str(text.as_ref());
        self.out.push('\n');
    }

    fn blank(&mut self) {
        self.out.push('\n');
    }

    fn rule(&mut self, ch: char, width: usize) {
        let rule: String = std::iter::repeat(ch).take(width).collect();
        self.line(rule);
    }

    fn banner(&mut self, lines: &[&str]) {
        self.rule('═', RULE_WIDTH);
        for line in lines {
            self.line(line);
        }
        self.rule('═', RULE_WIDTH);
    }

    fn section(&mut self, name: &str) {
        self.rule('─', RULE_WIDTH);
        self.line(name);
        self.rule('─', RULE_WIDTH);
        self.blank();
    }

    fn finish(self) -> String {
        self.out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_pad_end_counts_utf16_units() {
        assert_eq!(pad_end("ab", 4), "ab  ");
        assert_eq!(pad_end("║x", 3), "║x ");
        assert_eq!(pad_end("abcdef", 4), "abcdef");
    }

    #[test]
    fn test_section_layout() {
        let mut report = ReportBuilder::default();
        report.section("SUMMARY");
        let expected = format!("{0}\nSUMMARY\n{0}\n\n", "─".repeat(63));
        assert_eq!(report.finish(), expected);
    }
}
