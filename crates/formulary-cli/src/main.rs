//! Formulary CLI - engineering formula calculator

mod logging;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use formulary::prelude::*;
use formulary::{format_number, to_record, to_text_report, write_report_file};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "formulary")]
#[command(
    author,
    version,
    about = "Engineering formula calculator for thermodynamic cycle analysis"
)]
struct Cli {
    /// Formula catalog JSON file (default: built-in catalog)
    #[arg(long, global = true, env = "FORMULARY_CATALOG")]
    catalog: Option<PathBuf>,

    /// Increase log output (-v, -vv, -vvv)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List formulas grouped by category
    #[command(alias = "ls")]
    List {
        /// Only show formulas whose id, title or category contains this text
        #[arg(short, long)]
        search: Option<String>,
    },

    /// Show a formula with its variables and defaults
    Show {
        /// Formula id, e.g. HS_3.1
        id: String,
    },

    /// Calculate a formula from its defaults and any overrides
    Calc {
        /// Formula id, e.g. HS_3.1
        id: String,

        /// Override an input value (repeatable)
        #[arg(long = "set", value_name = "KEY=VALUE", value_parser = parse_set)]
        set: Vec<(String, f64)>,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Summary)]
        format: OutputFormat,

        /// Write output to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Treat division by zero and non-finite results as errors
        #[arg(long)]
        strict: bool,

        /// Decimal places kept in the result
        #[arg(long, default_value = "4")]
        decimals: u32,
    },

    /// Evaluate an ad-hoc expression
    Eval {
        /// Expression, e.g. "2 * pi * r"
        expression: String,

        /// Bind a variable (repeatable)
        #[arg(long = "set", value_name = "KEY=VALUE", value_parser = parse_set)]
        set: Vec<(String, f64)>,

        /// Treat division by zero and non-finite results as errors
        #[arg(long)]
        strict: bool,
    },

    /// List the catalog's reference assumptions
    Assumptions,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    /// Substituted formula and result
    Summary,
    /// Export record as JSON
    Json,
    /// Plain-text calculation report
    Report,
}

fn parse_set(text: &str) -> std::result::Result<(String, f64), String> {
    InputMap::parse_assignment(text).map_err(|e| e.to_string())
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let catalog = load_catalog(cli.catalog.as_deref())?;
    let stdout = io::stdout();
    let mut out = stdout.lock();

    match cli.command {
        Commands::List { search } => list_formulas(&mut out, &catalog, search.as_deref()),
        Commands::Show { id } => show_formula(&mut out, &catalog, &id),
        Commands::Calc {
            id,
            set,
            format,
            output,
            strict,
            decimals,
        } => {
            let options = calculation_options(strict, decimals);
            run_calculation(
                &mut out,
                &catalog,
                &id,
                set,
                format,
                output.as_deref(),
                &options,
            )
        }
        Commands::Eval {
            expression,
            set,
            strict,
        } => eval_expression(&mut out, &expression, set, &calculation_options(strict, 4)),
        Commands::Assumptions => list_assumptions(&mut out, &catalog),
    }
}

fn load_catalog(path: Option<&Path>) -> Result<Catalog> {
    match path {
        Some(path) => Catalog::from_path(path)
            .with_context(|| format!("Failed to load catalog '{}'", path.display())),
        None => Catalog::builtin().context("Failed to load built-in catalog"),
    }
}

fn calculation_options(strict: bool, decimals: u32) -> CalculationOptions {
    let options = if strict {
        CalculationOptions::strict()
    } else {
        CalculationOptions::default()
    };
    options.with_decimal_places(decimals)
}

fn list_formulas(out: &mut impl Write, catalog: &Catalog, search: Option<&str>) -> Result<ExitCode> {
    let matches: Option<Vec<&str>> =
        search.map(|q| catalog.search(q).into_iter().map(|f| f.id.as_str()).collect());

    let mut shown = 0;
    for (category, formulas) in catalog.by_category() {
        let formulas: Vec<_> = formulas
            .into_iter()
            .filter(|f| matches.as_ref().map_or(true, |ids| ids.contains(&f.id.as_str())))
            .collect();
        if formulas.is_empty() {
            continue;
        }

        if shown > 0 {
            writeln!(out)?;
        }
        writeln!(out, "{}", category)?;
        for formula in formulas {
            writeln!(out, "  {:<14}{}", formula.id, formula.title)?;
            shown += 1;
        }
    }

    if shown == 0 {
        eprintln!("No formulas found");
    }
    Ok(ExitCode::SUCCESS)
}

fn show_formula(out: &mut impl Write, catalog: &Catalog, id: &str) -> Result<ExitCode> {
    let formula = catalog.require(id)?;

    writeln!(out, "{}: {}", formula.id, formula.title)?;
    writeln!(out, "Category: {}", formula.category)?;
    writeln!(out, "{}", formula.description)?;
    writeln!(out)?;
    writeln!(out, "Formula: {}", formula.formula)?;
    writeln!(
        out,
        "Output:  {} ({}) [{}]",
        formula.output.label, formula.output.key, formula.output.unit
    )?;
    writeln!(out)?;
    writeln!(out, "Variables:")?;
    for variable in &formula.variables {
        writeln!(
            out,
            "  {:<14}{:<28}default {} {}",
            variable.key,
            variable.label,
            format_number(variable.default),
            variable.unit
        )?;
    }

    Ok(ExitCode::SUCCESS)
}

fn run_calculation(
    out: &mut impl Write,
    catalog: &Catalog,
    id: &str,
    overrides: Vec<(String, f64)>,
    format: OutputFormat,
    output: Option<&Path>,
    options: &CalculationOptions,
) -> Result<ExitCode> {
    let formula = catalog.require(id)?;

    for (key, _) in &overrides {
        if formula.variable(key).is_none() {
            tracing::warn!(formula = %formula.id, key = %key, "input is not a variable of this formula");
        }
    }

    let inputs = InputMap::resolve(formula, overrides);
    let result = formula.calculate_with_options(&inputs, options);

    let rendered = match format {
        OutputFormat::Summary => render_summary(formula, &inputs, &result),
        OutputFormat::Json => to_record(formula, &inputs, &result)
            .to_json_pretty()
            .context("Failed to serialize export record")?,
        OutputFormat::Report => to_text_report(formula, &inputs, &result),
    };

    match output {
        Some(path) => {
            write_report_file(path, &rendered)
                .with_context(|| format!("Failed to write '{}'", path.display()))?;
            eprintln!("Wrote {} to '{}'", formula.id, path.display());
        }
        None => {
            out.write_all(rendered.as_bytes())
                .context("Failed to write to stdout")?;
            if !rendered.ends_with('\n') {
                writeln!(out)?;
            }
        }
    }

    Ok(exit_code(&result))
}

fn render_summary(formula: &FormulaDescriptor, inputs: &InputMap, result: &CalculationResult) -> String {
    let mut summary = format!("{} ({})\n", formula.title, formula.id);
    summary.push_str(&format!("  {}\n", formula.substitute(inputs)));
    match result {
        CalculationResult::Success { value } => summary.push_str(&format!(
            "  {} ({}) = {} {}\n",
            formula.output.label,
            formula.output.key,
            format_number(*value),
            formula.output.unit
        )),
        CalculationResult::Failure { error_message } => {
            summary.push_str(&format!("  Error: {}\n", error_message))
        }
    }
    summary
}

fn eval_expression(
    out: &mut impl Write,
    expression: &str,
    bindings: Vec<(String, f64)>,
    options: &CalculationOptions,
) -> Result<ExitCode> {
    let inputs: InputMap = bindings.into_iter().collect();
    let result = formulary::calculate_with_options(expression, &inputs, options);

    match &result {
        CalculationResult::Success { value } => writeln!(out, "{}", format_number(*value))?,
        CalculationResult::Failure { error_message } => eprintln!("Error: {}", error_message),
    }

    Ok(exit_code(&result))
}

fn list_assumptions(out: &mut impl Write, catalog: &Catalog) -> Result<ExitCode> {
    for assumption in catalog.assumptions() {
        writeln!(
            out,
            "  {:<28}{:>10} {:<8}({})",
            assumption.label,
            format_number(assumption.value),
            assumption.unit,
            assumption.key
        )?;
    }
    Ok(ExitCode::SUCCESS)
}

fn exit_code(result: &CalculationResult) -> ExitCode {
    if result.is_success() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}
