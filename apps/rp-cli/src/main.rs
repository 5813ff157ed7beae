use clap::{Parser, Subcommand, ValueEnum};
use rp_app::{AppError, AppResult, ResultOptions};
use rp_export::{
    ComparisonItem, Report, comparison_report, comparison_workbook, scenario_report,
    scenario_workbook, to_json, write_csv_dir,
};
use rp_solver::CalculationResult;
use rp_store::{FileStorage, ScenarioStore};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

const STORE_ENV: &str = "RESIPLOT_HOME";
const DEFAULT_STORE_DIR: &str = ".resiplot";

#[derive(Parser)]
#[command(name = "resiplot")]
#[command(about = "Resiplot CLI - residential master plan yield estimator", long_about = None)]
struct Cli {
    /// Scenario store directory (defaults to $RESIPLOT_HOME, then ./.resiplot)
    #[arg(long, global = true)]
    store: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Solve a site input file and print the result
    Solve {
        /// Path to the site input (.yaml, .yml or .json)
        input: PathBuf,
        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },
    /// Check a site input file
    Validate {
        /// Path to the site input (.yaml, .yml or .json)
        input: PathBuf,
    },
    /// Write the default site input to a new file
    Init {
        /// Output path (.yaml, .yml or .json)
        path: PathBuf,
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
    /// Solve a site input and save it as a scenario
    Save {
        /// Path to the site input
        input: PathBuf,
        /// Scenario name (defaults to the next "Master Plan Scheme N")
        #[arg(short, long)]
        name: Option<String>,
    },
    /// List saved scenarios
    List,
    /// Show a saved scenario
    Show {
        /// Scenario ID
        id: String,
        /// Print the scenario record as JSON
        #[arg(long)]
        json: bool,
    },
    /// Delete a saved scenario
    Delete {
        /// Scenario ID
        id: String,
    },
    /// Rename a saved scenario
    Rename {
        /// Scenario ID
        id: String,
        /// New name
        name: String,
    },
    /// Compare up to three saved scenarios side by side
    Compare {
        /// Scenario IDs
        #[arg(required = true)]
        ids: Vec<String>,
    },
    /// Export a saved scenario
    Export {
        /// Scenario ID
        id: String,
        #[arg(short, long, value_enum, default_value_t = ExportFormat::Report)]
        format: ExportFormat,
        /// Output file (json, report) or directory (csv)
        #[arg(short, long)]
        output: PathBuf,
    },
    /// Export a comparison of up to three saved scenarios
    ExportCompare {
        /// Scenario IDs
        #[arg(required = true)]
        ids: Vec<String>,
        #[arg(short, long, value_enum, default_value_t = ExportFormat::Report)]
        format: ExportFormat,
        /// Output file (json, report) or directory (csv)
        #[arg(short, long)]
        output: PathBuf,
    },
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum ExportFormat {
    /// One CSV file per sheet
    Csv,
    /// Workbook as JSON
    Json,
    /// Paginated plain-text report
    Report,
}

fn main() -> AppResult<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let store_dir = resolve_store_dir(cli.store);
    tracing::debug!(store = %store_dir.display(), "scenario store");

    match cli.command {
        Commands::Solve { input, json } => cmd_solve(&input, json),
        Commands::Validate { input } => cmd_validate(&input),
        Commands::Init { path, force } => cmd_init(&path, force),
        Commands::Save { input, name } => cmd_save(&store_dir, &input, name.as_deref()),
        Commands::List => cmd_list(&store_dir),
        Commands::Show { id, json } => cmd_show(&store_dir, &id, json),
        Commands::Delete { id } => cmd_delete(&store_dir, &id),
        Commands::Rename { id, name } => cmd_rename(&store_dir, &id, &name),
        Commands::Compare { ids } => cmd_compare(&store_dir, &ids),
        Commands::Export { id, format, output } => cmd_export(&store_dir, &id, format, &output),
        Commands::ExportCompare {
            ids,
            format,
            output,
        } => cmd_export_compare(&store_dir, &ids, format, &output),
    }
}

fn resolve_store_dir(flag: Option<PathBuf>) -> PathBuf {
    flag.or_else(|| std::env::var_os(STORE_ENV).map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from(DEFAULT_STORE_DIR))
}

fn open_store(store_dir: &Path) -> AppResult<ScenarioStore<FileStorage>> {
    Ok(ScenarioStore::open(store_dir.to_path_buf())?)
}

fn print_report(report: &Report) {
    for line in report.lines() {
        println!("{}", line);
    }
}

fn print_json<T: serde::Serialize + ?Sized>(value: &T) -> AppResult<()> {
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| AppError::Export(format!("Failed to serialize JSON: {}", e)))?;
    println!("{}", json);
    Ok(())
}

fn cmd_solve(input_path: &Path, json: bool) -> AppResult<()> {
    let input = rp_app::load_site_input(input_path)?;
    let result = rp_app::solve_site(&input);

    if json {
        print_json(&result)
    } else {
        print_report(&scenario_report(&result));
        Ok(())
    }
}

fn cmd_validate(input_path: &Path) -> AppResult<()> {
    println!("Validating site input: {}", input_path.display());
    let input = rp_app::load_site_input(input_path)?;
    println!("✓ Site input is valid");

    let result = rp_app::solve_site(&input);
    if !result.warnings.is_empty() {
        println!("\nSolver warnings:");
        for w in &result.warnings {
            println!("  - {}", w);
        }
    }
    Ok(())
}

fn cmd_init(path: &Path, force: bool) -> AppResult<()> {
    if path.exists() && !force {
        return Err(AppError::InvalidInput(format!(
            "{} already exists (use --force to overwrite)",
            path.display()
        )));
    }
    rp_app::save_site_input(path, &rp_app::default_site_input())?;
    println!("✓ Wrote default site input to {}", path.display());
    Ok(())
}

fn cmd_save(store_dir: &Path, input_path: &Path, name: Option<&str>) -> AppResult<()> {
    let input = rp_app::load_site_input(input_path)?;
    let mut store = open_store(store_dir)?;
    let record = rp_app::save_scenario(&mut store, name, &input)?;

    println!("✓ Saved scenario '{}' ({})", record.name, record.id);
    println!("  Total units: {}", record.total_units());
    for w in &record.output.warnings {
        println!("  Warning: {}", w);
    }
    Ok(())
}

fn cmd_list(store_dir: &Path) -> AppResult<()> {
    let store = open_store(store_dir)?;
    let scenarios = rp_app::list_scenarios(&store)?;

    if scenarios.is_empty() {
        println!("No saved scenarios in {}", store_dir.display());
        return Ok(());
    }

    println!("Saved scenarios:");
    for record in &scenarios {
        let s = rp_app::summarize_scenario(record);
        println!(
            "  {} - {} ({} units, {:.2}% sellable, {})",
            s.id, s.name, s.total_units, s.net_lot_to_gross_pct, s.created_at
        );
    }
    Ok(())
}

fn cmd_show(store_dir: &Path, id: &str, json: bool) -> AppResult<()> {
    let store = open_store(store_dir)?;
    let record = rp_app::load_scenario(&store, id)?;

    if json {
        return print_json(&record);
    }

    println!("Scenario: {} ({})", record.name, record.id);
    println!("Created:  {}\n", record.created_at);
    let response = rp_app::ensure_result(&record, &ResultOptions::default());
    if !response.loaded_from_cache {
        println!("(stored result was out of date; showing a fresh solve)\n");
    }
    print_report(&scenario_report(&response.output));
    Ok(())
}

fn cmd_delete(store_dir: &Path, id: &str) -> AppResult<()> {
    let mut store = open_store(store_dir)?;
    rp_app::delete_scenario(&mut store, id)?;
    println!("✓ Deleted scenario {}", id);
    Ok(())
}

fn cmd_rename(store_dir: &Path, id: &str, name: &str) -> AppResult<()> {
    let mut store = open_store(store_dir)?;
    let record = rp_app::rename_scenario(&mut store, id, name)?;
    println!("✓ Renamed {} to '{}'", record.id, record.name);
    Ok(())
}

fn cmd_compare(store_dir: &Path, ids: &[String]) -> AppResult<()> {
    let store = open_store(store_dir)?;
    let items = rp_app::compare_scenarios(&store, ids)?;
    print_report(&comparison_report(&items)?);
    Ok(())
}

fn cmd_export(store_dir: &Path, id: &str, format: ExportFormat, output: &Path) -> AppResult<()> {
    let mut store = open_store(store_dir)?;
    let response = rp_app::ensure_scenario_result(&mut store, id, &ResultOptions::default())?;
    write_scenario(&response.output, format, output)
}

fn write_scenario(result: &CalculationResult, format: ExportFormat, output: &Path) -> AppResult<()> {
    match format {
        ExportFormat::Csv => {
            let files = write_csv_dir(&scenario_workbook(result), output)?;
            println!("✓ Exported {} sheets to {}", files.len(), output.display());
        }
        ExportFormat::Json => {
            std::fs::write(output, to_json(&scenario_workbook(result))?)?;
            println!("✓ Exported workbook to {}", output.display());
        }
        ExportFormat::Report => {
            let report = scenario_report(result);
            report.write_to(output)?;
            println!(
                "✓ Exported {}-page report to {}",
                report.page_count(),
                output.display()
            );
        }
    }
    Ok(())
}

fn cmd_export_compare(
    store_dir: &Path,
    ids: &[String],
    format: ExportFormat,
    output: &Path,
) -> AppResult<()> {
    let store = open_store(store_dir)?;
    let items = rp_app::compare_scenarios(&store, ids)?;
    write_comparison(&items, format, output)
}

fn write_comparison(items: &[ComparisonItem], format: ExportFormat, output: &Path) -> AppResult<()> {
    match format {
        ExportFormat::Csv => {
            let files = write_csv_dir(&comparison_workbook(items)?, output)?;
            println!("✓ Exported {} sheet to {}", files.len(), output.display());
        }
        ExportFormat::Json => {
            std::fs::write(output, to_json(&comparison_workbook(items)?)?)?;
            println!("✓ Exported comparison to {}", output.display());
        }
        ExportFormat::Report => {
            comparison_report(items)?.write_to(output)?;
            println!("✓ Exported comparison report to {}", output.display());
        }
    }
    Ok(())
}
