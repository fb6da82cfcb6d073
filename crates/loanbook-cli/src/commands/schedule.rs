use clap::Args;
use serde_json::Value;

use loanbook_core::schedule::{self, ScheduleInput};

use crate::input;

/// Arguments for repayment schedule generation
#[derive(Args)]
pub struct ScheduleArgs {
    /// Path to JSON input file: {"loan": {...}, "holidays": [...]}
    #[arg(long)]
    pub input: Option<String>,

    /// Path to a JSON or YAML repayment policy
    #[arg(long)]
    pub policy: Option<String>,
}

pub fn run_schedule(args: ScheduleArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let mut schedule_input: ScheduleInput =
        input::read_input(args.input.as_deref(), "schedule generation")?;
    schedule_input.policy = super::resolve_policy(args.policy.as_deref(), schedule_input.policy)?;

    let result = schedule::build_repayment_schedule(&schedule_input)?;
    Ok(serde_json::to_value(result)?)
}
