//! Point-in-time collection metrics for a single loan.

use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::time::Instant;
use tracing::debug;

use crate::calendar::{add_business_days, add_days, count_business_days};
use crate::holidays::{rejected_warning, Holiday, HolidayCatalog};
use crate::loan::Loan;
use crate::policy::RepaymentPolicy;
use crate::types::{
    non_negative, round_money, saturating_mul, with_metadata, ComputationOutput, Money,
};
use crate::LoanbookResult;

// ---------------------------------------------------------------------------
// Input / Output types
// ---------------------------------------------------------------------------

/// Expected-versus-actual collection for one loan as of a given day.
///
/// A loan without a disbursement date yields the default snapshot: zero
/// amounts and no dates.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MetricsSnapshot {
    pub disbursed_at: Option<NaiveDate>,
    pub projected_end_date: Option<NaiveDate>,
    pub amount_disbursed: Money,
    pub amount_to_be_paid: Money,
    pub amount_paid_so_far: Money,
    pub daily_amount: Money,
    pub business_days_since_disbursement: u32,
    pub expected_repayments_by_now: Money,
    pub outstanding_due: Money,
    pub balance_remaining: Money,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetricsInput {
    #[serde(default, deserialize_with = "crate::coerce::lenient_loan")]
    pub loan: Loan,
    #[serde(default)]
    pub holidays: HolidayCatalog,
    /// Day to evaluate at; the current UTC date when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub as_of: Option<NaiveDate>,
    #[serde(default)]
    pub policy: RepaymentPolicy,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Metrics as of the current UTC date under the default policy.
pub fn calculate_metrics_now(loan: &Loan, holidays: &[Holiday]) -> MetricsSnapshot {
    calculate_metrics(loan, holidays, Utc::now().date_naive())
}

/// Metrics as of `today` under the default policy.
pub fn calculate_metrics(loan: &Loan, holidays: &[Holiday], today: NaiveDate) -> MetricsSnapshot {
    calculate_metrics_with_policy(loan, holidays, today, &RepaymentPolicy::default())
}

/// Metrics as of `today`.
///
/// Business days are counted from the day after disbursement through `today`
/// inclusive, skipping weekends and holidays. Until `installment_count` such
/// days have elapsed the amount due is the linear accrual less payments;
/// afterwards the whole remaining balance is due. The projected end date only
/// skips weekends. The accrual saturates at `Decimal::MAX` rather than
/// overflowing.
pub fn calculate_metrics_with_policy(
    loan: &Loan,
    holidays: &[Holiday],
    today: NaiveDate,
    policy: &RepaymentPolicy,
) -> MetricsSnapshot {
    let Some(disbursed) = loan.disbursement_date() else {
        return MetricsSnapshot::default();
    };

    let projected_end_date = add_business_days(disbursed, policy.installment_count);
    let business_days = count_business_days(add_days(disbursed, 1), today, holidays);
    let expected = saturating_mul(loan.daily_amount, Decimal::from(business_days));

    let balance_remaining = non_negative(loan.amount_to_be_paid - loan.amount_paid_so_far);
    let outstanding_due = if business_days >= policy.installment_count {
        balance_remaining
    } else {
        non_negative(expected - loan.amount_paid_so_far)
    };

    debug!(
        business_days,
        %expected,
        %outstanding_due,
        "loan metrics computed"
    );

    MetricsSnapshot {
        disbursed_at: Some(disbursed),
        projected_end_date: Some(projected_end_date),
        amount_disbursed: loan.amount_disbursed,
        amount_to_be_paid: loan.amount_to_be_paid,
        amount_paid_so_far: loan.amount_paid_so_far,
        daily_amount: loan.daily_amount,
        business_days_since_disbursement: business_days,
        expected_repayments_by_now: expected,
        outstanding_due: round_money(outstanding_due),
        balance_remaining: round_money(balance_remaining),
    }
}

/// Compute metrics wrapped in the computation envelope.
pub fn compute_loan_metrics(
    input: &MetricsInput,
) -> LoanbookResult<ComputationOutput<MetricsSnapshot>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    input.policy.validate()?;
    warnings.extend(rejected_warning(&input.holidays));

    let today = input.as_of.unwrap_or_else(|| Utc::now().date_naive());
    let snapshot = calculate_metrics_with_policy(&input.loan, &input.holidays, today, &input.policy);

    if input.loan.disbursed_at.is_none() {
        warnings.push("Loan has no disbursement date; metrics are zero.".into());
    } else if input.loan.amount_paid_so_far > input.loan.amount_to_be_paid {
        warnings.push(format!(
            "Loan is overpaid by {}; balance reported as zero.",
            input.loan.amount_paid_so_far - input.loan.amount_to_be_paid
        ));
    }

    let elapsed = start.elapsed().as_micros() as u64;
    let assumptions = serde_json::json!({
        "as_of": today,
        "business_days": "weekdays excluding holidays, day after disbursement through as_of",
        "projected_end_date": "weekends skipped, holidays not skipped",
        "installment_count": input.policy.installment_count,
        "rounding": "2 dp, half away from zero",
    });

    Ok(with_metadata(
        "Linear daily accrual with full balance due after the installment window",
        &assumptions,
        warnings,
        elapsed,
        snapshot,
    ))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn sample_loan(paid: Money) -> Loan {
        Loan {
            disbursed_at: Some(Utc.with_ymd_and_hms(2024, 1, 1, 14, 45, 0).unwrap()),
            amount_disbursed: dec!(20000),
            daily_amount: dec!(1000),
            amount_to_be_paid: dec!(22000),
            amount_paid_so_far: paid,
            ..Default::default()
        }
    }

    #[test]
    fn test_worked_example() {
        let m = calculate_metrics(&sample_loan(dec!(15000)), &[], d(2024, 1, 31));
        assert_eq!(m.disbursed_at, Some(d(2024, 1, 1)));
        assert_eq!(m.projected_end_date, Some(d(2024, 1, 31)));
        assert_eq!(m.business_days_since_disbursement, 22);
        assert_eq!(m.expected_repayments_by_now, dec!(22000));
        assert_eq!(m.outstanding_due, dec!(7000.00));
        assert_eq!(m.balance_remaining, dec!(7000.00));
    }

    #[test]
    fn test_linear_accrual_before_window_closes() {
        // Jan 2..Jan 12 = 9 weekdays
        let m = calculate_metrics(&sample_loan(dec!(5000)), &[], d(2024, 1, 12));
        assert_eq!(m.business_days_since_disbursement, 9);
        assert_eq!(m.expected_repayments_by_now, dec!(9000));
        assert_eq!(m.outstanding_due, dec!(4000));
        assert_eq!(m.balance_remaining, dec!(17000));
    }

    #[test]
    fn test_ahead_of_schedule_owes_nothing_yet() {
        let m = calculate_metrics(&sample_loan(dec!(10000)), &[], d(2024, 1, 5));
        assert_eq!(m.business_days_since_disbursement, 4);
        assert_eq!(m.outstanding_due, Decimal::ZERO);
    }

    #[test]
    fn test_full_balance_due_after_window_regardless_of_pace() {
        let mut loan = sample_loan(dec!(2000));
        loan.daily_amount = dec!(100);
        let m = calculate_metrics(&loan, &[], d(2024, 2, 15));
        assert!(m.business_days_since_disbursement >= 22);
        assert_eq!(m.outstanding_due, dec!(20000));
    }

    #[test]
    fn test_holidays_reduce_business_days_but_not_projection() {
        let holidays = vec![Holiday::fixed(d(2024, 1, 15))];
        let m = calculate_metrics(&sample_loan(dec!(15000)), &holidays, d(2024, 1, 31));
        assert_eq!(m.business_days_since_disbursement, 21);
        assert_eq!(m.expected_repayments_by_now, dec!(21000));
        assert_eq!(m.outstanding_due, dec!(6000));
        assert_eq!(m.projected_end_date, Some(d(2024, 1, 31)));
    }

    #[test]
    fn test_today_on_disbursement_day() {
        let m = calculate_metrics(&sample_loan(Decimal::ZERO), &[], d(2024, 1, 1));
        assert_eq!(m.business_days_since_disbursement, 0);
        assert_eq!(m.outstanding_due, Decimal::ZERO);
    }

    #[test]
    fn test_today_before_disbursement() {
        let m = calculate_metrics(&sample_loan(Decimal::ZERO), &[], d(2023, 12, 1));
        assert_eq!(m.business_days_since_disbursement, 0);
        assert_eq!(m.expected_repayments_by_now, Decimal::ZERO);
    }

    #[test]
    fn test_overpaid_clamps_to_zero() {
        let m = calculate_metrics(&sample_loan(dec!(25000)), &[], d(2024, 2, 28));
        assert_eq!(m.outstanding_due, Decimal::ZERO);
        assert_eq!(m.balance_remaining, Decimal::ZERO);
    }

    #[test]
    fn test_missing_disbursement_is_zeroed() {
        let mut loan = sample_loan(dec!(100));
        loan.disbursed_at = None;
        let m = calculate_metrics(&loan, &[], d(2024, 1, 31));
        assert_eq!(m, MetricsSnapshot::default());
    }

    #[test]
    fn test_rounding_to_cents() {
        let mut loan = sample_loan(dec!(0));
        loan.daily_amount = dec!(333.3333);
        loan.amount_to_be_paid = dec!(7333.3333);
        let m = calculate_metrics(&loan, &[], d(2024, 1, 3));
        assert_eq!(m.expected_repayments_by_now, dec!(666.6666));
        assert_eq!(m.outstanding_due, dec!(666.67));
        assert_eq!(m.balance_remaining, dec!(7333.33));
    }

    #[test]
    fn test_custom_installment_count() {
        let policy = RepaymentPolicy {
            installment_count: 5,
            ..Default::default()
        };
        let m = calculate_metrics_with_policy(&sample_loan(dec!(1000)), &[], d(2024, 1, 8), &policy);
        assert_eq!(m.projected_end_date, Some(d(2024, 1, 8)));
        assert_eq!(m.business_days_since_disbursement, 5);
        assert_eq!(m.outstanding_due, dec!(21000));
    }

    #[test]
    fn test_envelope_uses_as_of_and_warns() {
        let input = MetricsInput {
            loan: sample_loan(dec!(23000)),
            holidays: HolidayCatalog::default(),
            as_of: Some(d(2024, 1, 31)),
            policy: RepaymentPolicy::default(),
        };
        let out = compute_loan_metrics(&input).unwrap();
        assert_eq!(out.result.business_days_since_disbursement, 22);
        assert!(out.warnings.iter().any(|w| w.contains("overpaid")));

        let input = MetricsInput {
            loan: Loan::default(),
            holidays: HolidayCatalog::default(),
            as_of: Some(d(2024, 1, 31)),
            policy: RepaymentPolicy::default(),
        };
        let out = compute_loan_metrics(&input).unwrap();
        assert_eq!(out.result, MetricsSnapshot::default());
        assert_eq!(out.warnings.len(), 1);
    }

    #[test]
    fn test_huge_daily_amount_saturates() {
        let mut loan = sample_loan(Decimal::ZERO);
        loan.daily_amount = Decimal::MAX;
        loan.amount_to_be_paid = Decimal::MAX;
        let m = calculate_metrics(&loan, &[], d(2024, 1, 31));
        assert_eq!(m.expected_repayments_by_now, Decimal::MAX);
        assert_eq!(m.outstanding_due, Decimal::MAX);
    }

    #[test]
    fn test_out_of_range_json_amount_is_capped() {
        let loan: Loan = serde_json::from_str(
            r#"{"disbursedAt": "2024-01-01", "dailyAmount": "1e28", "amountToBePaid": 1e300}"#,
        )
        .unwrap();
        let m = calculate_metrics(&loan, &[], d(2024, 1, 31));
        assert_eq!(m.daily_amount, crate::types::MAX_AMOUNT);
        assert_eq!(m.amount_to_be_paid, crate::types::MAX_AMOUNT);
        assert_eq!(m.expected_repayments_by_now, crate::types::MAX_AMOUNT * dec!(22));
    }

    #[test]
    fn test_envelope_survives_bad_holiday_entry() {
        let input: MetricsInput = serde_json::from_value(serde_json::json!({
            "loan": {"disbursedAt": "2024-01-01", "dailyAmount": 1000, "amountToBePaid": 22000},
            "holidays": [{"date": null, "isRecurring": true}, {"date": "2024-01-15"}],
            "as_of": "2024-01-31"
        }))
        .unwrap();
        let out = compute_loan_metrics(&input).unwrap();
        assert_eq!(out.result.business_days_since_disbursement, 21);
        assert!(out.warnings.iter().any(|w| w.contains("holiday entry")));
    }
}
