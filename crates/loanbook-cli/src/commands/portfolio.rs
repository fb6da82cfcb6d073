use chrono::NaiveDate;
use clap::Args;
use serde_json::Value;

use loanbook_core::portfolio::{self, PortfolioInput};

use crate::input;

/// Arguments for the portfolio collection report
#[derive(Args)]
pub struct PortfolioArgs {
    /// Path to JSON input file: {"loans": [...], "holidays": [...]}
    #[arg(long)]
    pub input: Option<String>,

    /// Evaluate as of this date (YYYY-MM-DD); defaults to today (UTC)
    #[arg(long)]
    pub as_of: Option<NaiveDate>,

    /// Path to a JSON or YAML repayment policy
    #[arg(long)]
    pub policy: Option<String>,
}

pub fn run_portfolio(args: PortfolioArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let mut portfolio_input: PortfolioInput =
        input::read_input(args.input.as_deref(), "portfolio metrics")?;
    if args.as_of.is_some() {
        portfolio_input.as_of = args.as_of;
    }
    portfolio_input.policy =
        super::resolve_policy(args.policy.as_deref(), portfolio_input.policy)?;

    let result = portfolio::compute_portfolio_metrics(&portfolio_input)?;
    Ok(serde_json::to_value(result)?)
}
