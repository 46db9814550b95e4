use analytics::Investment;
use anyhow::{Context, Result, anyhow};
use clap::{Parser, Subcommand, ValueEnum};
use configuration::{Config, Overrides};
use core_types::PriceSeriesBuilder;
use engine::{AnalyticsParams, AnalyticsRequest, EngineError, ReportAssembler, SelectionGuard};
use std::path::PathBuf;

mod input;
mod render;

/// The main entry point for the Quantscope analytics host.
fn main() -> Result<()> {
    // A missing .env file is fine; real environment variables still apply.
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    match cli.command {
        Commands::Analyze(args) => handle_analyze(args),
    }
}

// ==============================================================================
// CLI Structure
// ==============================================================================

/// Risk, Monte Carlo and growth analytics over an already-fetched price history.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze one price file and print the assembled response.
    Analyze(AnalyzeArgs),
}

#[derive(Parser)]
struct AnalyzeArgs {
    /// JSON price file: {"prices": [[epoch_millis, price], ...]} or a bare array of pairs.
    #[arg(long)]
    input: PathBuf,

    /// Settings file to load instead of ./config.toml.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Principal of a hypothetical investment to project.
    #[arg(long, requires = "years")]
    amount: Option<f64>,

    /// Horizon of the projection, in years.
    #[arg(long, requires = "amount")]
    years: Option<f64>,

    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    format: OutputFormat,

    #[command(flatten)]
    overrides: Overrides,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Table,
    Json,
}

// ==============================================================================
// Analyze Command Logic
// ==============================================================================

fn handle_analyze(args: AnalyzeArgs) -> Result<()> {
    let config = load_settings(&args)?;
    // Keep the guard alive so buffered file logs are flushed on exit.
    let _log_guard = configuration::init_tracing(&config.logging).context("Failed to initialize logging")?;

    let samples = input::read_samples(&args.input)?;
    let mut builder = PriceSeriesBuilder::new(config.data.invalid_price_policy);
    builder.extend(samples);
    let (series, report) = builder
        .build_with_report()
        .map_err(|e| anyhow!(EngineError::from(e).user_message()))
        .with_context(|| format!("Failed to build a price series from {}", args.input.display()))?;
    tracing::info!(
        received = report.received,
        dropped = report.dropped_invalid,
        collapsed = report.collapsed,
        observations = series.len(),
        "Price series loaded"
    );

    let mut params = AnalyticsParams::from_config(&config);
    if let (Some(amount), Some(years)) = (args.amount, args.years) {
        params = params.with_investment(Investment::new(amount, years));
    }

    let selection = SelectionGuard::new();
    let request = AnalyticsRequest::new(selection.issue(), series, params);
    let response = ReportAssembler::new().assemble(&request);
    let response = selection
        .accept(request.id, response)
        .context("Analytics result was superseded")?;

    match args.format {
        OutputFormat::Table => render::print_response(&response),
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&response).context("Failed to serialize response")?;
            println!("{json}");
        }
    }
    Ok(())
}

fn load_settings(args: &AnalyzeArgs) -> Result<Config> {
    let mut config = match &args.config {
        Some(path) => configuration::load_config_from(path),
        None => configuration::load_config(),
    }
    .context("Failed to load configuration")?;

    args.overrides.apply(&mut config);
    config.validate().context("Invalid settings after command-line overrides")?;
    Ok(config)
}
