use chrono::NaiveDate;
use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;

use loanbook_core::metrics::{self, MetricsInput};
use loanbook_core::Loan;

use crate::input;

/// Arguments for single-loan collection metrics
#[derive(Args)]
pub struct MetricsArgs {
    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    /// Evaluate as of this date (YYYY-MM-DD); defaults to today (UTC)
    #[arg(long)]
    pub as_of: Option<NaiveDate>,

    /// Path to a JSON or YAML repayment policy
    #[arg(long)]
    pub policy: Option<String>,

    /// Disbursement date or timestamp
    #[arg(long)]
    pub disbursed_at: Option<String>,

    /// Amount disbursed
    #[arg(long)]
    pub amount_disbursed: Option<Decimal>,

    /// Daily installment
    #[arg(long)]
    pub daily_amount: Option<Decimal>,

    /// Total principal plus interest owed
    #[arg(long)]
    pub amount_to_be_paid: Option<Decimal>,

    /// Cumulative payments recorded so far
    #[arg(long)]
    pub amount_paid_so_far: Option<Decimal>,
}

pub fn run_metrics(args: MetricsArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let mut metrics_input: MetricsInput = if args.input.is_some() || args.disbursed_at.is_none() {
        input::read_input(args.input.as_deref(), "loan metrics")?
    } else {
        MetricsInput {
            loan: loan_from_flags(&args)?,
            holidays: Default::default(),
            as_of: None,
            policy: Default::default(),
        }
    };

    if args.as_of.is_some() {
        metrics_input.as_of = args.as_of;
    }
    metrics_input.policy = super::resolve_policy(args.policy.as_deref(), metrics_input.policy)?;

    let result = metrics::compute_loan_metrics(&metrics_input)?;
    Ok(serde_json::to_value(result)?)
}

fn loan_from_flags(args: &MetricsArgs) -> Result<Loan, Box<dyn std::error::Error>> {
    let daily_amount = args
        .daily_amount
        .ok_or("--daily-amount is required (or provide --input)")?;
    let amount_to_be_paid = args
        .amount_to_be_paid
        .ok_or("--amount-to-be-paid is required (or provide --input)")?;

    // Flags go through the same coercion as file input.
    let loan = serde_json::json!({
        "disbursed_at": args.disbursed_at,
        "amount_disbursed": args.amount_disbursed,
        "daily_amount": daily_amount,
        "amount_to_be_paid": amount_to_be_paid,
        "amount_paid_so_far": args.amount_paid_so_far,
    });
    Ok(serde_json::from_value(loan)?)
}
