use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use log::{debug, warn};
use serde::Serialize;

use rusty_workbench::data::loader::load_file;
use rusty_workbench::stats::correlation::CorrelationMatrix;
use rusty_workbench::stats::descriptive::describe;
use rusty_workbench::{demo, TableParser, TestRequest, Workbench, WorkbenchConfig};

/// Statistical workbench: describe a table, correlate its numeric columns and
/// run classical hypothesis tests.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    #[clap(flatten)]
    global_opts: GlobalOpts,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args, Debug)]
struct GlobalOpts {
    /// Data file to analyse (.csv, .txt or .json).
    #[arg(global = true, long, conflicts_with = "demo")]
    input: Option<PathBuf>,

    /// Use the bundled 15-row demo dataset.
    #[arg(global = true, long, default_value_t = false)]
    demo: bool,

    /// JSON file overriding the default thresholds.
    #[arg(global = true, long)]
    config: Option<PathBuf>,

    /// Print results as JSON instead of text.
    #[arg(global = true, long, default_value_t = false)]
    json: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Column kinds and descriptive statistics.
    Describe,
    /// Pairwise Pearson correlation matrix.
    Correlate {
        /// Comma-separated numeric columns (default: all numeric columns).
        #[arg(long, value_delimiter = ',')]
        columns: Vec<String>,
        /// Also write the matrix to this CSV file.
        #[arg(long)]
        csv: Option<PathBuf>,
    },
    /// Welch two-sample t-test of an outcome between two group values.
    Ttest {
        #[arg(long)]
        group: String,
        #[arg(long)]
        outcome: String,
        #[arg(long)]
        first: String,
        #[arg(long)]
        second: String,
    },
    /// Pearson correlation test between two numeric columns.
    Correlation {
        #[arg(long)]
        x: String,
        #[arg(long)]
        y: String,
    },
    /// Simple OLS regression of one numeric column on another.
    Regression {
        #[arg(long)]
        dependent: String,
        #[arg(long)]
        independent: String,
    },
    /// One-way ANOVA of an outcome across every value of a group column.
    Anova {
        #[arg(long)]
        group: String,
        #[arg(long)]
        outcome: String,
    },
    /// Plain-language interpretation of the dataset.
    Summary,
}

fn open_workbench(opts: &GlobalOpts) -> Result<Workbench> {
    let config = match &opts.config {
        Some(path) => WorkbenchConfig::from_file(path)?,
        None => WorkbenchConfig::default(),
    };
    debug!("config: {config:?}");
    let mut bench = Workbench::new(config);

    match (&opts.input, opts.demo) {
        (Some(path), _) => {
            let parser = TableParser::with_threshold(bench.config.numeric_threshold);
            let table = load_file(path, &parser)?;
            bench.load_table(table);
        }
        (None, true) => {
            bench.load_text(demo::DEMO_CSV);
        }
        (None, false) => bail!("no data: pass --input <file> or --demo"),
    }
    Ok(bench)
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn write_matrix_csv(matrix: &CorrelationMatrix, path: &Path) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("creating {}", path.display()))?;
    let mut header = vec![String::new()];
    header.extend(matrix.columns.iter().cloned());
    writer.write_record(&header)?;
    for (name, row) in matrix.columns.iter().zip(&matrix.values) {
        let mut record = vec![name.clone()];
        record.extend(row.iter().map(|r| r.to_string()));
        writer.write_record(&record)?;
    }
    writer.flush()?;
    Ok(())
}

fn print_matrix(matrix: &CorrelationMatrix) {
    let width = matrix
        .columns
        .iter()
        .map(|c| c.chars().count())
        .max()
        .unwrap_or(0)
        .max(6);
    print!("{:width$}", "");
    for c in &matrix.columns {
        print!("  {c:>width$}");
    }
    println!();
    for (name, row) in matrix.columns.iter().zip(&matrix.values) {
        print!("{name:width$}");
        for r in row {
            print!("  {r:>width$.3}");
        }
        println!();
    }
}

fn run(cli: Cli) -> Result<()> {
    let opts = &cli.global_opts;
    let mut bench = open_workbench(opts)?;

    let request = match cli.command {
        Commands::Describe => {
            let table = bench.table.as_ref().context("no dataset loaded")?;
            let summaries = describe(table);
            if opts.json {
                let per_column: Vec<serde_json::Value> = summaries
                    .iter()
                    .map(|(name, s)| serde_json::json!({ "column": name, "summary": s }))
                    .collect();
                return print_json(&serde_json::json!({
                    "rows": table.len(),
                    "columns": table.columns(),
                    "summaries": per_column,
                }));
            }
            println!("{} rows", table.len());
            for col in table.columns() {
                println!("  {:<16} {}", col.name, col.kind);
            }
            println!();
            println!(
                "{:<16} {:>5} {:>9} {:>9} {:>9} {:>9} {:>9}",
                "column", "n", "mean", "sd", "median", "min", "max"
            );
            for (name, s) in &summaries {
                println!(
                    "{name:<16} {:>5} {:>9.2} {:>9.2} {:>9.2} {:>9.2} {:>9.2}",
                    s.n, s.mean, s.sd, s.median, s.min, s.max
                );
            }
            return Ok(());
        }
        Commands::Correlate { columns, csv } => {
            if !columns.is_empty() {
                bench.correlation_columns = columns;
            }
            let matrix = bench.correlation_matrix().context("no dataset loaded")?;
            if matrix.len() < bench.correlation_columns.len() {
                warn!("non-numeric or unknown columns were left out of the matrix");
            }
            if let Some(path) = csv {
                write_matrix_csv(&matrix, &path)?;
                debug!("matrix written to {}", path.display());
            }
            if opts.json {
                return print_json(&matrix);
            }
            print_matrix(&matrix);
            if let Some((a, b, r)) = matrix.strongest_pair() {
                println!("\nstrongest: {a} ↔ {b} (|r| = {r:.3})");
            }
            return Ok(());
        }
        Commands::Summary => {
            let interpretation = bench.interpret();
            if opts.json {
                return print_json(&interpretation);
            }
            if interpretation.is_empty() {
                println!("not enough rows to interpret");
                return Ok(());
            }
            println!("{}", interpretation.text);
            for finding in &interpretation.findings {
                println!("  [{:?}] {}", finding.kind, finding.label);
            }
            return Ok(());
        }
        Commands::Ttest {
            group,
            outcome,
            first,
            second,
        } => TestRequest::TTest {
            group,
            outcome,
            first,
            second,
        },
        Commands::Correlation { x, y } => TestRequest::Correlation { x, y },
        Commands::Regression {
            dependent,
            independent,
        } => TestRequest::Regression {
            dependent,
            independent,
        },
        Commands::Anova { group, outcome } => TestRequest::Anova { group, outcome },
    };

    let report = bench.run_test(&request)?;
    if opts.json {
        print_json(report)
    } else {
        print!("{report}");
        Ok(())
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    debug!("parsed arguments: {cli:?}");
    run(cli)
}
