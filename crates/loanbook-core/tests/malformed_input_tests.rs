use loanbook_core::metrics::{self, MetricsInput};
use loanbook_core::portfolio::{self, PortfolioInput};
use loanbook_core::schedule::{self, ScheduleInput};
use loanbook_core::MAX_AMOUNT;
use pretty_assertions::assert_eq;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde_json::{json, Value};

fn worked_example_loan() -> Value {
    json!({
        "id": "good",
        "disbursedAt": "2024-01-01T14:45:00Z",
        "amountDisbursed": 20000,
        "dailyAmount": 1000,
        "amountToBePaid": 22000,
        "amountPaidSoFar": 15000
    })
}

// ===========================================================================
// Extreme amounts
// ===========================================================================

#[test]
fn test_extreme_amounts_are_capped_not_fatal() {
    let cases: Vec<(Value, Decimal)> = vec![
        (json!(1e300), MAX_AMOUNT),
        (json!("1e28"), MAX_AMOUNT),
        (json!("79228162514264337593543950336"), MAX_AMOUNT),
        (json!(MAX_AMOUNT.to_string()), MAX_AMOUNT),
        (json!(-1e300), Decimal::ZERO),
        (json!("1000.555"), dec!(1000.555)),
    ];

    for (daily, expected_daily) in cases {
        let loan = json!({
            "disbursedAt": "2024-01-01",
            "dailyAmount": daily.clone(),
            "amountToBePaid": 1e300,
            "payments": [1e300, "5e28", 100]
        });

        let input: MetricsInput =
            serde_json::from_value(json!({"loan": loan.clone(), "as_of": "2024-01-31"})).unwrap();
        let out = metrics::compute_loan_metrics(&input).unwrap();
        assert_eq!(out.result.daily_amount, expected_daily, "daily {daily}");
        assert_eq!(out.result.amount_to_be_paid, MAX_AMOUNT, "daily {daily}");
        assert_eq!(
            out.result.expected_repayments_by_now,
            expected_daily * dec!(22),
            "daily {daily}"
        );

        let input: ScheduleInput = serde_json::from_value(json!({"loan": loan})).unwrap();
        assert_eq!(input.loan.total_payments(), MAX_AMOUNT * dec!(2) + dec!(100));
        let out = schedule::build_repayment_schedule(&input).unwrap();
        assert!(out.result.entries.len() <= 365, "daily {daily}");
        assert!(out.result.summary.total_due <= MAX_AMOUNT, "daily {daily}");
    }
}

// ===========================================================================
// Holiday lists
// ===========================================================================

#[test]
fn test_bad_holiday_entries_are_dropped_with_warning() {
    // (holidays, kept entries, rejected warning expected, business days to Jan 31)
    let cases: Vec<(Value, usize, bool, u32)> = vec![
        (json!([{"date": null, "isRecurring": true}]), 0, true, 22),
        (json!([{"date": "2024-01-15"}, {"date": "soon"}]), 1, true, 21),
        (json!([{"date": 1705276800000i64, "reason": "MLK"}]), 1, false, 21),
        (json!([null, 5, "2024-01-15", {"isRecurring": true}]), 0, true, 22),
        (json!("2024-01-15"), 0, false, 22),
        (json!(null), 0, false, 22),
        (json!([]), 0, false, 22),
    ];

    for (holidays, kept, warned, business_days) in cases {
        let input: MetricsInput = serde_json::from_value(json!({
            "loan": worked_example_loan(),
            "holidays": holidays.clone(),
            "as_of": "2024-01-31"
        }))
        .unwrap();
        assert_eq!(input.holidays.len(), kept, "holidays {holidays}");

        let out = metrics::compute_loan_metrics(&input).unwrap();
        assert_eq!(
            out.result.business_days_since_disbursement, business_days,
            "holidays {holidays}"
        );
        assert_eq!(
            out.warnings.iter().any(|w| w.contains("without a readable date")),
            warned,
            "holidays {holidays}"
        );
    }
}

// ===========================================================================
// Bad records inside a portfolio
// ===========================================================================

#[test]
fn test_bad_record_does_not_fail_portfolio() {
    let bad_records: Vec<Value> = vec![
        json!(42),
        json!("loan-7"),
        json!(null),
        json!([]),
        json!({"id": {"oid": 1}}),
        json!({"id": 42, "payments": [500]}),
        json!({"payments": "lots"}),
        json!({"disbursedAt": false, "dailyAmount": 1000}),
        json!({"disbursedAt": "2024-01-01", "dailyAmount": "1e300"}),
    ];

    for bad in bad_records {
        let input: PortfolioInput = serde_json::from_value(json!({
            "loans": [bad.clone(), worked_example_loan()],
            "holidays": [{"date": null}],
            "as_of": "2024-01-31"
        }))
        .unwrap();
        let out = portfolio::compute_portfolio_metrics(&input).unwrap();
        let r = &out.result;
        assert_eq!(r.totals.loan_count, 2, "record {bad}");
        assert_eq!(r.loans[1].loan_id.as_deref(), Some("good"), "record {bad}");
        assert_eq!(r.loans[1].metrics.outstanding_due, dec!(7000), "record {bad}");
        assert!(out.warnings.iter().any(|w| w.contains("holiday entry")));
    }
}

#[test]
fn test_numeric_id_and_bare_payments_survive() {
    let input: ScheduleInput = serde_json::from_value(json!({
        "loan": {
            "id": 42,
            "disbursedAt": 1704067200000i64,
            "dailyAmount": 1000,
            "amountToBePaid": 3000,
            "payments": [500, "1000", {"amount": 500}, true]
        }
    }))
    .unwrap();
    assert_eq!(input.loan.id.as_deref(), Some("42"));
    assert_eq!(input.loan.payments.len(), 3);

    let out = schedule::build_repayment_schedule(&input).unwrap();
    assert_eq!(out.result.summary.due_days, 3);
    assert_eq!(out.result.summary.paid, 2);
    assert_eq!(out.result.summary.pending, 1);
    assert_eq!(out.result.summary.total_paid, dec!(2000));
}
