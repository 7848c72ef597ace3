use anyhow::{Context, bail};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use compute_service::ComputeService;
use core_types::{Benchmark, BenchmarkQuote, BenchmarkSeries, FundObservation};
use events::ComputeRequest;
use futures::future::try_join_all;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::path::{Path, PathBuf};

mod logging;
mod render;

/// The main entry point for the FundLens statistics tool.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // FUNDLENS__* overrides may live in a .env file; it is optional.
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let settings = configuration::load_config(cli.config.as_deref())
        .context("Failed to load configuration")?;
    let _log_guard = logging::init(&settings.logging);

    let service = compute_service::init_global(&settings)
        .await
        .context("Failed to start the compute service")?;

    match cli.command {
        Commands::Stats(args) => handle_stats(service, args).await,
        Commands::Compare(args) => handle_compare(service, args).await,
        Commands::Benchmark(args) => handle_benchmark(service, args).await,
        Commands::Correlate(args) => handle_correlate(service, args).await,
        Commands::Run(args) => handle_run(service, args).await,
    }
}

// ==============================================================================
// CLI Structure
// ==============================================================================

/// Return, risk and consistency statistics for investment funds.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to a TOML settings file (defaults to an optional ./fundlens.toml).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute the full statistics of one fund against a benchmark.
    Stats(StatsArgs),
    /// Compare several funds against a benchmark from a common start date.
    Compare(CompareArgs),
    /// Compute the return and risk of a benchmark's own history.
    Benchmark(BenchmarkArgs),
    /// Build the correlation matrix of several funds and benchmarks.
    Correlate(CorrelateArgs),
    /// Execute a plain-data compute request read from a JSON file.
    Run(RunArgs),
}

#[derive(Parser)]
struct StatsArgs {
    /// JSON file with the fund's daily rows, most recent first.
    #[arg(long)]
    rows: PathBuf,

    /// The benchmark to compare against (e.g., "cdi", "bovespa").
    #[arg(long)]
    benchmark: Benchmark,

    /// Start the series at this date (format: YYYY-MM-DD).
    #[arg(long)]
    from: Option<NaiveDate>,

    /// Pretty-print the JSON output.
    #[arg(long)]
    pretty: bool,
}

#[derive(Parser)]
struct CompareArgs {
    /// JSON files with each fund's daily rows, most recent first.
    #[arg(long = "rows", required = true, num_args = 1..)]
    rows: Vec<PathBuf>,

    #[arg(long)]
    benchmark: Benchmark,

    /// Common start date every fund is normalized to (format: YYYY-MM-DD).
    #[arg(long)]
    from: Option<NaiveDate>,
}

#[derive(Parser)]
struct BenchmarkArgs {
    /// JSON file with the benchmark's raw quotes, most recent first.
    #[arg(long)]
    quotes: PathBuf,

    #[arg(long)]
    benchmark: Benchmark,

    #[arg(long)]
    from: Option<NaiveDate>,

    #[arg(long)]
    pretty: bool,
}

#[derive(Parser)]
struct CorrelateArgs {
    /// JSON files with each fund's daily rows, most recent first.
    #[arg(long = "rows", num_args = 1..)]
    rows: Vec<PathBuf>,

    /// Benchmark histories as NAME=FILE (e.g., "bovespa=ibov.json").
    #[arg(long = "series", value_parser = parse_series, num_args = 1..)]
    series: Vec<(Benchmark, PathBuf)>,
}

#[derive(Parser)]
struct RunArgs {
    /// JSON file holding one request, e.g. {"operation": "aggregate", "payload": {...}}.
    #[arg(long)]
    request: PathBuf,

    #[arg(long)]
    pretty: bool,
}

fn parse_series(s: &str) -> Result<(Benchmark, PathBuf), String> {
    let (name, path) = s
        .split_once('=')
        .ok_or_else(|| format!("expected NAME=FILE, got '{s}'"))?;
    let benchmark = name.parse::<Benchmark>().map_err(|e| e.to_string())?;
    Ok((benchmark, PathBuf::from(path)))
}

// ==============================================================================
// Command Handlers
// ==============================================================================

async fn handle_stats(service: &ComputeService, args: StatsArgs) -> anyhow::Result<()> {
    let rows: Vec<FundObservation> = read_json(&args.rows)?;
    tracing::info!(rows = rows.len(), benchmark = %args.benchmark, "Aggregating fund history.");

    let result = service.aggregate(rows, args.benchmark, args.from).await?;
    print_json(&result, args.pretty)
}

async fn handle_compare(service: &ComputeService, args: CompareArgs) -> anyhow::Result<()> {
    let mut names = Vec::with_capacity(args.rows.len());
    let mut histories = Vec::with_capacity(args.rows.len());
    for path in &args.rows {
        names.push(display_name(path));
        histories.push(read_json::<Vec<FundObservation>>(path)?);
    }

    // All funds are queued at once; the worker answers them in order.
    let calls = histories
        .into_iter()
        .map(|rows| service.aggregate(rows, args.benchmark, args.from));
    let results = try_join_all(calls).await?;

    let table = render::comparison_table(&names.into_iter().zip(results).collect::<Vec<_>>());
    println!("{table}");
    Ok(())
}

async fn handle_benchmark(service: &ComputeService, args: BenchmarkArgs) -> anyhow::Result<()> {
    let quotes: Vec<BenchmarkQuote> = read_json(&args.quotes)?;
    tracing::info!(quotes = quotes.len(), benchmark = %args.benchmark, "Aggregating benchmark history.");

    let result = service
        .aggregate_benchmark(quotes, args.benchmark, args.from)
        .await?;
    print_json(&result, args.pretty)
}

async fn handle_correlate(service: &ComputeService, args: CorrelateArgs) -> anyhow::Result<()> {
    if args.rows.is_empty() && args.series.is_empty() {
        bail!("Nothing to correlate: pass at least one --rows or --series.");
    }

    // Benchmarks occupy the first rows of the matrix, funds follow.
    let mut labels = Vec::new();
    let mut benchmarks = Vec::with_capacity(args.series.len());
    for (benchmark, path) in &args.series {
        labels.push(benchmark.to_string());
        benchmarks.push(BenchmarkSeries {
            benchmark: *benchmark,
            quotes: read_json(path)?,
        });
    }
    let mut funds = Vec::with_capacity(args.rows.len());
    for path in &args.rows {
        labels.push(display_name(path));
        funds.push(read_json::<Vec<FundObservation>>(path)?);
    }

    let matrix = service.build_matrix(funds, benchmarks).await?;
    println!("{}", render::matrix_table(&labels, &matrix));
    Ok(())
}

async fn handle_run(service: &ComputeService, args: RunArgs) -> anyhow::Result<()> {
    let json = std::fs::read_to_string(&args.request)
        .with_context(|| format!("Failed to read {}", args.request.display()))?;
    let request = ComputeRequest::from_json(&json)?;
    tracing::info!(operation = request.operation(), "Running plain-data request.");

    let response = service.dispatch(request).await?;
    let output = if args.pretty {
        response.to_json_pretty()?
    } else {
        response.to_json()?
    };
    println!("{output}");
    Ok(())
}

// ==============================================================================
// Helpers
// ==============================================================================

fn read_json<T: DeserializeOwned>(path: &Path) -> anyhow::Result<T> {
    let file = std::fs::File::open(path)
        .with_context(|| format!("Failed to open {}", path.display()))?;
    serde_json::from_reader(std::io::BufReader::new(file))
        .with_context(|| format!("Failed to parse {}", path.display()))
}

fn print_json<T: Serialize>(value: &T, pretty: bool) -> anyhow::Result<()> {
    let output = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    println!("{output}");
    Ok(())
}

/// File stem used to label a fund in tables.
fn display_name(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn series_argument_splits_name_and_file() {
        let (benchmark, path) = parse_series("bovespa=data/ibov.json").unwrap();
        assert_eq!(benchmark, Benchmark::Bovespa);
        assert_eq!(path, PathBuf::from("data/ibov.json"));
        assert!(parse_series("bovespa").is_err());
        assert!(parse_series("nasdaq=x.json").is_err());
    }

    #[test]
    fn compare_parses_several_funds() {
        let cli = Cli::try_parse_from([
            "fundlens", "compare", "--rows", "a.json", "b.json", "--benchmark", "cdi", "--from",
            "2021-01-04",
        ])
        .unwrap();
        match cli.command {
            Commands::Compare(args) => {
                assert_eq!(args.rows.len(), 2);
                assert_eq!(args.benchmark, Benchmark::Cdi);
                assert_eq!(args.from, NaiveDate::from_ymd_opt(2021, 1, 4));
            }
            _ => panic!("expected compare"),
        }
    }
}
