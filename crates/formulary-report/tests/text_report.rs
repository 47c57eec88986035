//! Text report layout tests

use chrono::NaiveDate;
use formulary_core::{CalculationResult, Catalog, InputMap};
use formulary_report::{
    render_text_report, render_text_report_with, to_text_report, write_report_file,
    TextReportOptions,
};
use pretty_assertions::assert_eq;

fn generated_at() -> chrono::NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 3, 1)
        .unwrap()
        .and_hms_opt(12, 30, 0)
        .unwrap()
}

/// Successful heat source calculation with default inputs
#[test]
fn test_golden_success_report() {
    let catalog = Catalog::builtin().unwrap();
    let formula = catalog.get("HS_3.1").unwrap();
    let inputs = InputMap::defaults_for(formula);

    let report = render_text_report(
        formula,
        &inputs,
        &CalculationResult::success(2508.0),
        generated_at(),
    );

    assert_eq!(report, include_str!("golden/hs_3_1.txt"));
}

/// Failed calculation with a variable left out of the inputs
#[test]
fn test_golden_failure_report() {
    let catalog = Catalog::builtin().unwrap();
    let formula = catalog.get("SOLAR_3.10").unwrap();
    let inputs = InputMap::from([("A", 100.0), ("I", 800.0)]);

    let report = render_text_report(
        formula,
        &inputs,
        &CalculationResult::failure("Undefined symbol eta_collector"),
        generated_at(),
    );

    assert_eq!(report, include_str!("golden/solar_3_10_missing.txt"));
}

/// Every boxed result line closes at the same column
#[test]
fn test_result_box_is_aligned() {
    let catalog = Catalog::builtin().unwrap();
    let formula = catalog.get("EFF_3.7").unwrap();
    let inputs = InputMap::defaults_for(formula);

    let report = render_text_report(
        formula,
        &inputs,
        &CalculationResult::success(140.3509),
        generated_at(),
    );

    let boxed: Vec<&str> = report
        .lines()
        .filter(|line| line.starts_with("   ╔") || line.starts_with("   ║") || line.starts_with("   ╚"))
        .collect();
    assert_eq!(boxed.len(), 3);
    assert_eq!(boxed[1], format!("{:<40}║", "   ║  140.3509 %"));
    assert!(boxed.iter().all(|line| line.chars().count() == 41));
}

#[test]
fn test_custom_headings() {
    let catalog = Catalog::builtin().unwrap();
    let formula = catalog.get("COND_3.6").unwrap();
    let options = TextReportOptions {
        heading: "PLANT REPORT".to_string(),
        subheading: "Unit 2".to_string(),
        timestamp_format: "%d/%m/%Y".to_string(),
    };

    let report = render_text_report_with(
        formula,
        &InputMap::defaults_for(formula),
        &CalculationResult::success(6000.0),
        generated_at(),
        &options,
    );

    let head: Vec<&str> = report.lines().take(6).collect();
    assert_eq!(head[1], "         PLANT REPORT");
    assert_eq!(head[2], "         Unit 2");
    assert_eq!(head[5], "Generated: 01/03/2024");
}

#[test]
fn test_write_report_file() {
    let catalog = Catalog::builtin().unwrap();
    let formula = catalog.get("HS_3.1").unwrap();
    let inputs = InputMap::defaults_for(formula);
    let report = to_text_report(formula, &inputs, &CalculationResult::success(2508.0));

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("report.txt");
    write_report_file(&path, &report).unwrap();

    assert_eq!(std::fs::read_to_string(&path).unwrap(), report);
    assert!(report.ends_with(&format!("END OF REPORT\n{}\n", "═".repeat(63))));
}
