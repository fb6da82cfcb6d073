//! Batch collection report over many loans sharing one holiday catalog.

use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::time::Instant;
use tracing::info;

use crate::holidays::{rejected_warning, HolidayCatalog};
use crate::loan::Loan;
use crate::metrics::{calculate_metrics_with_policy, MetricsSnapshot};
use crate::policy::RepaymentPolicy;
use crate::types::{saturating_add, with_metadata, ComputationOutput, Money};
use crate::LoanbookResult;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PortfolioInput {
    /// Unreadable records stay in place as empty loans with zero metrics.
    #[serde(default, deserialize_with = "crate::coerce::loan_list")]
    pub loans: Vec<Loan>,
    #[serde(default)]
    pub holidays: HolidayCatalog,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub as_of: Option<NaiveDate>,
    #[serde(default)]
    pub policy: RepaymentPolicy,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoanMetricsRow {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub loan_id: Option<String>,
    pub metrics: MetricsSnapshot,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PortfolioTotals {
    pub loan_count: u32,
    pub disbursed_count: u32,
    pub loans_with_outstanding_due: u32,
    pub total_expected_by_now: Money,
    pub total_paid_so_far: Money,
    pub total_outstanding_due: Money,
    pub total_balance_remaining: Money,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PortfolioOutput {
    pub as_of: NaiveDate,
    pub totals: PortfolioTotals,
    pub loans: Vec<LoanMetricsRow>,
}

/// Evaluate every loan against the same holiday list and day.
pub fn compute_portfolio_metrics(
    input: &PortfolioInput,
) -> LoanbookResult<ComputationOutput<PortfolioOutput>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    input.policy.validate()?;
    warnings.extend(rejected_warning(&input.holidays));
    let as_of = input.as_of.unwrap_or_else(|| Utc::now().date_naive());

    let rows: Vec<LoanMetricsRow> = input
        .loans
        .iter()
        .map(|loan| LoanMetricsRow {
            loan_id: loan.id.clone(),
            metrics: calculate_metrics_with_policy(loan, &input.holidays, as_of, &input.policy),
        })
        .collect();

    let mut totals = PortfolioTotals {
        loan_count: rows.len() as u32,
        ..Default::default()
    };
    for row in &rows {
        let m = &row.metrics;
        if m.disbursed_at.is_some() {
            totals.disbursed_count += 1;
        }
        if m.outstanding_due > Decimal::ZERO {
            totals.loans_with_outstanding_due += 1;
        }
        totals.total_expected_by_now =
            saturating_add(totals.total_expected_by_now, m.expected_repayments_by_now);
        totals.total_paid_so_far = saturating_add(totals.total_paid_so_far, m.amount_paid_so_far);
        totals.total_outstanding_due =
            saturating_add(totals.total_outstanding_due, m.outstanding_due);
        totals.total_balance_remaining =
            saturating_add(totals.total_balance_remaining, m.balance_remaining);
    }

    let undisbursed = totals.loan_count - totals.disbursed_count;
    if undisbursed > 0 {
        warnings.push(format!(
            "{undisbursed} loan(s) have no disbursement date and report zero metrics."
        ));
    }

    info!(
        loans = totals.loan_count,
        overdue = totals.loans_with_outstanding_due,
        total_outstanding_due = %totals.total_outstanding_due,
        "portfolio metrics computed"
    );

    let elapsed = start.elapsed().as_micros() as u64;
    let assumptions = serde_json::json!({
        "as_of": as_of,
        "installment_count": input.policy.installment_count,
        "holiday_count": input.holidays.len(),
    });

    Ok(with_metadata(
        "Per-loan collection metrics aggregated across the portfolio",
        &assumptions,
        warnings,
        elapsed,
        PortfolioOutput {
            as_of,
            totals,
            loans: rows,
        },
    ))
}
