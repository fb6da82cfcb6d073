//! Day-by-day repayment schedule with paid/partial/pending/holiday status.
//!
//! Recorded payments are pooled and allocated to due days in schedule order.
//! Each payment's own date is not consulted.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::time::Instant;
use tracing::{debug, warn};

use crate::calendar::{add_days, is_weekend};
use crate::holidays::{find_holiday, rejected_warning, Holiday, HolidayCatalog};
use crate::loan::Loan;
use crate::policy::RepaymentPolicy;
use crate::types::{saturating_add, with_metadata, ComputationOutput, Money};
use crate::LoanbookResult;

// ---------------------------------------------------------------------------
// Input / Output types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScheduleStatus {
    Holiday,
    Paid,
    Partial,
    Pending,
}

impl std::fmt::Display for ScheduleStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Holiday => "holiday",
            Self::Paid => "paid",
            Self::Partial => "partial",
            Self::Pending => "pending",
        };
        write!(f, "{}", s)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleEntry {
    pub date: NaiveDate,
    pub status: ScheduleStatus,
    /// Installment falling due on this day; zero for holidays.
    pub amount_due: Money,
    pub amount_paid: Money,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub holiday_reason: Option<String>,
}

impl ScheduleEntry {
    fn holiday(date: NaiveDate, reason: &str) -> Self {
        Self {
            date,
            status: ScheduleStatus::Holiday,
            amount_due: Decimal::ZERO,
            amount_paid: Decimal::ZERO,
            holiday_reason: Some(reason.to_string()),
        }
    }

    pub fn is_holiday(&self) -> bool {
        self.status == ScheduleStatus::Holiday
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScheduleSummary {
    pub due_days: u32,
    pub holidays: u32,
    pub paid: u32,
    pub partial: u32,
    pub pending: u32,
    pub total_due: Money,
    pub total_paid: Money,
    pub first_due_date: Option<NaiveDate>,
    pub last_due_date: Option<NaiveDate>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleInput {
    #[serde(default, deserialize_with = "crate::coerce::lenient_loan")]
    pub loan: Loan,
    #[serde(default)]
    pub holidays: HolidayCatalog,
    #[serde(default)]
    pub policy: RepaymentPolicy,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleOutput {
    pub entries: Vec<ScheduleEntry>,
    pub summary: ScheduleSummary,
}

struct ScheduleWalk {
    entries: Vec<ScheduleEntry>,
    truncated: bool,
    unallocated: Money,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Generate the repayment schedule under the default policy.
pub fn generate_schedule(loan: &Loan, holidays: &[Holiday]) -> Vec<ScheduleEntry> {
    generate_schedule_with_policy(loan, holidays, &RepaymentPolicy::default())
}

/// Generate the repayment schedule.
///
/// Returns an empty schedule when the loan has no disbursement date or no
/// positive daily amount. The walk stops after `max_schedule_iterations`
/// non-weekend days even if the total has not been reached.
pub fn generate_schedule_with_policy(
    loan: &Loan,
    holidays: &[Holiday],
    policy: &RepaymentPolicy,
) -> Vec<ScheduleEntry> {
    walk(loan, holidays, policy).entries
}

/// Tally a generated schedule.
pub fn summarize_schedule(entries: &[ScheduleEntry]) -> ScheduleSummary {
    let mut summary = ScheduleSummary::default();
    for entry in entries {
        match entry.status {
            ScheduleStatus::Holiday => {
                summary.holidays += 1;
                continue;
            }
            ScheduleStatus::Paid => summary.paid += 1,
            ScheduleStatus::Partial => summary.partial += 1,
            ScheduleStatus::Pending => summary.pending += 1,
        }
        summary.due_days += 1;
        summary.total_due = saturating_add(summary.total_due, entry.amount_due);
        summary.total_paid = saturating_add(summary.total_paid, entry.amount_paid);
        summary.first_due_date.get_or_insert(entry.date);
        summary.last_due_date = Some(entry.date);
    }
    summary
}

/// Generate a schedule and its summary wrapped in the computation envelope.
pub fn build_repayment_schedule(
    input: &ScheduleInput,
) -> LoanbookResult<ComputationOutput<ScheduleOutput>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    input.policy.validate()?;
    warnings.extend(rejected_warning(&input.holidays));

    let loan = &input.loan;
    if loan.disbursed_at.is_none() {
        warnings.push("Loan has no disbursement date; schedule is empty.".into());
    } else if loan.daily_amount <= Decimal::ZERO {
        warnings.push("Daily amount is zero; schedule is empty.".into());
    }

    let walk = walk(loan, &input.holidays, &input.policy);
    if walk.truncated {
        warnings.push(format!(
            "Schedule stopped after {} days before reaching the amount to be paid.",
            input.policy.max_schedule_iterations
        ));
    }
    if walk.unallocated > input.policy.epsilon {
        warnings.push(format!(
            "Recorded payments exceed the scheduled total by {}.",
            walk.unallocated
        ));
    }

    let summary = summarize_schedule(&walk.entries);
    let output = ScheduleOutput {
        entries: walk.entries,
        summary,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    let assumptions = serde_json::json!({
        "first_due_day": "disbursement date + 1 calendar day",
        "weekends": "skipped",
        "holidays": "listed with zero amount, no installment",
        "payment_allocation": "recorded order, payment dates ignored",
        "max_schedule_iterations": input.policy.max_schedule_iterations,
        "epsilon": input.policy.epsilon,
    });

    Ok(with_metadata(
        "Daily installment schedule with sequential payment allocation",
        &assumptions,
        warnings,
        elapsed,
        output,
    ))
}

// ---------------------------------------------------------------------------
// Internal helpers
// ---------------------------------------------------------------------------

fn walk(loan: &Loan, holidays: &[Holiday], policy: &RepaymentPolicy) -> ScheduleWalk {
    let mut entries = Vec::new();
    let mut remaining_paid = loan.total_payments();

    let Some(disbursed) = loan.disbursement_date() else {
        return ScheduleWalk {
            entries,
            truncated: false,
            unallocated: remaining_paid,
        };
    };
    if loan.daily_amount <= Decimal::ZERO {
        return ScheduleWalk {
            entries,
            truncated: false,
            unallocated: remaining_paid,
        };
    }

    let total = loan.amount_to_be_paid;
    let target = total.checked_sub(policy.epsilon).unwrap_or(total);
    let mut scheduled = Decimal::ZERO;
    let mut iterations = 0u32;
    let mut cursor = add_days(disbursed, 1);

    while scheduled < target && iterations < policy.max_schedule_iterations {
        if is_weekend(cursor) {
            match cursor.succ_opt() {
                Some(next) => cursor = next,
                None => break,
            }
            continue;
        }

        if let Some(holiday) = find_holiday(cursor, holidays) {
            entries.push(ScheduleEntry::holiday(cursor, holiday.reason()));
        } else {
            let amount_due = loan.daily_amount.min(total - scheduled);
            let amount_paid = remaining_paid.min(amount_due);
            remaining_paid -= amount_paid;
            scheduled += amount_due;

            let threshold = amount_due.checked_sub(policy.epsilon).unwrap_or(amount_due);
            let status = if amount_paid >= threshold {
                ScheduleStatus::Paid
            } else if amount_paid > Decimal::ZERO {
                ScheduleStatus::Partial
            } else {
                ScheduleStatus::Pending
            };

            entries.push(ScheduleEntry {
                date: cursor,
                status,
                amount_due,
                amount_paid,
                holiday_reason: None,
            });
        }

        iterations += 1;
        match cursor.succ_opt() {
            Some(next) => cursor = next,
            None => break,
        }
    }

    let truncated = scheduled < target;
    if truncated {
        warn!(
            iterations,
            %scheduled,
            %total,
            "repayment schedule truncated at safety bound"
        );
    }
    debug!(
        entries = entries.len(),
        %scheduled,
        unallocated = %remaining_paid,
        "repayment schedule generated"
    );

    ScheduleWalk {
        entries,
        truncated,
        unallocated: remaining_paid,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
