mod commands;
mod input;
mod logging;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::process;

use commands::holidays::IsHolidayArgs;
use commands::metrics::MetricsArgs;
use commands::portfolio::PortfolioArgs;
use commands::schedule::ScheduleArgs;

/// Loan repayment schedules and collection metrics
#[derive(Parser)]
#[command(
    name = "loanbook",
    version,
    about = "Loan repayment schedules and collection metrics",
    long_about = "Builds day-by-day repayment schedules and point-in-time collection \
                  metrics for daily-installment loans, skipping weekends and a \
                  configurable holiday catalog. Reads JSON from --input or stdin."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, default_value = "json", global = true)]
    output: OutputFormat,

    /// Log at debug level (overridden by RUST_LOG)
    #[arg(long, short, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate the day-by-day repayment schedule for a loan
    Schedule(ScheduleArgs),
    /// Expected-versus-actual collection metrics for a loan
    Metrics(MetricsArgs),
    /// Collection metrics across many loans
    Portfolio(PortfolioArgs),
    /// Check a date against a holiday catalog
    IsHoliday(IsHolidayArgs),
    /// Print version information
    Version,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Csv,
    Minimal,
}

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let result: Result<serde_json::Value, Box<dyn std::error::Error>> = match cli.command {
        Commands::Schedule(args) => commands::schedule::run_schedule(args),
        Commands::Metrics(args) => commands::metrics::run_metrics(args),
        Commands::Portfolio(args) => commands::portfolio::run_portfolio(args),
        Commands::IsHoliday(args) => commands::holidays::run_is_holiday(args),
        Commands::Version => {
            println!("loanbook {}", env!("CARGO_PKG_VERSION"));
            return;
        }
    };

    match result {
        Ok(value) => {
            output::format_output(&cli.output, &value);
            process::exit(0);
        }
        Err(e) => {
            tracing::debug!(error = %e, "command failed");
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
    }
}
