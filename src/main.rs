use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use configuration::LoggingSettings;
use core_types::PeriodType;
use rust_decimal::Decimal;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, fmt};

mod commands;
mod render;

/// The main entry point for the agile-ledger application.
fn main() -> ExitCode {
    // Load environment variables from .env file, if there is one.
    dotenvy::dotenv().ok();

    // Parse command-line arguments
    let cli = Cli::parse();

    let config = match configuration::load_config_from(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error loading configuration: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let _log_guard = match init_tracing(&config.logging) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Error initializing logging: {}", e);
            return ExitCode::FAILURE;
        }
    };

    // Execute the appropriate command
    match commands::run(cli.command, &config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::debug!(error = ?e, "Command failed.");
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

/// Installs the stderr subscriber and, when configured, a daily rolling log file.
///
/// The returned guard must live until exit so buffered file logs are flushed.
fn init_tracing(settings: &LoggingSettings) -> anyhow::Result<Option<WorkerGuard>> {
    let filter = EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(&settings.level))?;
    let stderr_layer = fmt::layer().with_writer(std::io::stderr).with_target(false);

    let Some(directory) = &settings.directory else {
        tracing_subscriber::registry()
            .with(filter)
            .with(stderr_layer)
            .init();
        return Ok(None);
    };

    let appender = tracing_appender::rolling::daily(directory, "agile-ledger.log");
    let (writer, guard) = tracing_appender::non_blocking(appender);
    tracing_subscriber::registry()
        .with(filter)
        .with(stderr_layer)
        .with(fmt::layer().with_writer(writer).with_ansi(false))
        .init();
    Ok(Some(guard))
}

// ==============================================================================
// CLI Structure
// ==============================================================================

/// Finance and sprint metrics for an agile project dashboard.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Configuration file to use instead of ./config.toml.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Income, expense and profit per month, quarter or year.
    Periods(PeriodsArgs),
    /// Income, fixed and variable costs, profit and margin per project.
    Projects(RecordArgs),
    /// Totals, burn rate, runway and customer metrics.
    Metrics(MetricsArgs),
    /// Velocity, cycle time and completion rate of sprints.
    Velocity(VelocityArgs),
    /// Ideal versus actual remaining story points of a sprint.
    Burndown(BurndownArgs),
    /// Preview a percentage-based split of a revenue figure.
    Distribute(DistributeArgs),
    /// Split a pool into equal salary and profit-sharing parts.
    Pool(PoolArgs),
    /// Validate and save a project's profit shares.
    SaveShares(SaveSharesArgs),
    /// Show the profit shares saved for a project.
    ShowShares(ShowSharesArgs),
}

#[derive(Args)]
pub(crate) struct RecordArgs {
    /// Only use records of this project.
    #[arg(long)]
    pub project: Option<String>,

    /// Records file (defaults to storage.records_path).
    #[arg(long)]
    pub records: Option<PathBuf>,
}

#[derive(Args)]
pub(crate) struct PeriodsArgs {
    #[command(flatten)]
    pub source: RecordArgs,

    /// monthly, quarterly or annual (defaults to reporting.default_period).
    #[arg(long)]
    pub period: Option<PeriodType>,
}

#[derive(Args)]
pub(crate) struct MetricsArgs {
    #[command(flatten)]
    pub source: RecordArgs,

    #[arg(long, default_value = "0")]
    pub cash_on_hand: Decimal,

    /// Marketing and sales spend used for CAC.
    #[arg(long, default_value = "0")]
    pub acquisition_spend: Decimal,

    #[arg(long, default_value_t = 0)]
    pub new_customers: u64,

    #[arg(long, default_value_t = 0)]
    pub lost_customers: u64,

    #[arg(long, default_value_t = 0)]
    pub total_customers: u64,

    #[arg(long, default_value = "0")]
    pub avg_revenue_per_customer: Decimal,
}

#[derive(Args)]
pub(crate) struct VelocityArgs {
    /// Sprint ids to report on.
    #[arg(long = "sprint", required = true)]
    pub sprints: Vec<String>,

    /// Tasks file (defaults to storage.tasks_path).
    #[arg(long)]
    pub tasks: Option<PathBuf>,
}

#[derive(Args)]
pub(crate) struct BurndownArgs {
    #[arg(long)]
    pub sprint: String,

    /// First day of the sprint (YYYY-MM-DD).
    #[arg(long)]
    pub from: NaiveDate,

    /// Last day of the sprint (YYYY-MM-DD).
    #[arg(long)]
    pub to: NaiveDate,

    /// Day the chart is computed for (defaults to today).
    #[arg(long)]
    pub today: Option<NaiveDate>,

    #[arg(long)]
    pub tasks: Option<PathBuf>,
}

#[derive(Args)]
pub(crate) struct DistributeArgs {
    #[arg(long)]
    pub revenue: Decimal,

    /// JSON array of shares ({memberId, memberName, percentage}).
    #[arg(long)]
    pub shares: PathBuf,
}

#[derive(Args)]
pub(crate) struct PoolArgs {
    #[arg(long)]
    pub pool: Decimal,

    /// Team file (defaults to storage.team_path).
    #[arg(long)]
    pub team: Option<PathBuf>,

    /// Overrides distribution.salary_ratio.
    #[arg(long)]
    pub salary_ratio: Option<Decimal>,
}

#[derive(Args)]
pub(crate) struct SaveSharesArgs {
    #[arg(long)]
    pub project: String,

    /// JSON array of shares ({memberId, memberName, percentage}).
    #[arg(long)]
    pub shares: PathBuf,

    /// Recompute the amounts from this revenue before saving.
    #[arg(long)]
    pub revenue: Option<Decimal>,

    /// Share store file (defaults to storage.shares_path).
    #[arg(long)]
    pub store: Option<PathBuf>,
}

#[derive(Args)]
pub(crate) struct ShowSharesArgs {
    #[arg(long)]
    pub project: String,

    #[arg(long)]
    pub store: Option<PathBuf>,
}
