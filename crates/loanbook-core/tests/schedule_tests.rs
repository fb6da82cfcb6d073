use chrono::NaiveDate;
use loanbook_core::holidays::{is_holiday, Holiday};
use loanbook_core::schedule::{self, ScheduleInput, ScheduleStatus};
use loanbook_core::Loan;
use pretty_assertions::assert_eq;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

fn loan_from_json(json: &str) -> Loan {
    serde_json::from_str(json).unwrap()
}

// ===========================================================================
// Schedule generation
// ===========================================================================

#[test]
fn test_schedule_from_web_layer_record() {
    let loan = loan_from_json(
        r#"{
            "disbursedAt": "2024-01-01T09:00:00.000Z",
            "dailyAmount": 1000,
            "amountToBePaid": 22000,
            "payments": [
                {"amount": 3000, "date": "2024-01-05T12:00:00.000Z"},
                {"amount": 500, "date": "2024-01-08T12:00:00.000Z"}
            ]
        }"#,
    );
    let holidays = vec![Holiday::recurring(d(2020, 1, 15)).with_name("Heroes Day")];

    let entries = schedule::generate_schedule(&loan, &holidays);

    // 22 due days plus one holiday
    assert_eq!(entries.len(), 23);
    let due: Vec<_> = entries.iter().filter(|e| !e.is_holiday()).collect();
    assert_eq!(due.len(), 22);
    assert_eq!(due[0].status, ScheduleStatus::Paid);
    assert_eq!(due[2].status, ScheduleStatus::Paid);
    assert_eq!(due[3].status, ScheduleStatus::Partial);
    assert_eq!(due[3].amount_paid, dec!(500));
    assert_eq!(due[4].status, ScheduleStatus::Pending);

    let holiday = entries.iter().find(|e| e.is_holiday()).unwrap();
    assert_eq!(holiday.date, d(2024, 1, 15));
    assert_eq!(holiday.holiday_reason.as_deref(), Some("Heroes Day"));

    // The holiday pushes the last installment one business day out
    assert_eq!(entries.last().unwrap().date, d(2024, 2, 1));
}

#[test]
fn test_cumulative_paid_never_exceeds_total() {
    let loan = loan_from_json(
        r#"{
            "disbursed_at": "2024-03-01",
            "daily_amount": "333.33",
            "amount_to_be_paid": "5000",
            "payments": [{"amount": 4000}, {"amount": 4000}]
        }"#,
    );
    let entries = schedule::generate_schedule(&loan, &[]);
    let due: Decimal = entries.iter().map(|e| e.amount_due).sum();
    let paid: Decimal = entries.iter().map(|e| e.amount_paid).sum();
    assert!(due <= loan.amount_to_be_paid + dec!(0.01));
    assert!(paid <= loan.amount_to_be_paid);
    assert!(entries.iter().all(|e| e.status == ScheduleStatus::Paid));
}

#[test]
fn test_non_holiday_dates_strictly_increase() {
    let loan = loan_from_json(
        r#"{"disbursedAt": "2024-12-20", "dailyAmount": 250, "amountToBePaid": 10000}"#,
    );
    let holidays = vec![
        Holiday::recurring(d(2000, 12, 25)),
        Holiday::recurring(d(2000, 12, 26)),
        Holiday::recurring(d(2000, 1, 1)),
    ];
    let entries = schedule::generate_schedule(&loan, &holidays);
    let dates: Vec<_> = entries.iter().filter(|e| !e.is_holiday()).map(|e| e.date).collect();
    assert!(dates.windows(2).all(|w| w[0] < w[1]));
    assert!(dates.iter().all(|date| !is_holiday(*date, &holidays)));
    assert_eq!(dates.len(), 40);
}

#[test]
fn test_pathological_loan_terminates() {
    let loan = loan_from_json(
        r#"{"disbursedAt": "2024-01-01", "dailyAmount": 0.01, "amountToBePaid": 1000000}"#,
    );
    let entries = schedule::generate_schedule(&loan, &[]);
    assert!(entries.len() <= 365);
}

#[test]
fn test_missing_disbursement_yields_empty_schedule() {
    let loan = loan_from_json(r#"{"dailyAmount": 1000, "amountToBePaid": 22000}"#);
    assert!(schedule::generate_schedule(&loan, &[]).is_empty());
}

#[test]
fn test_envelope_from_json_input() {
    let input: ScheduleInput = serde_json::from_str(
        r#"{
            "loan": {"disbursedAt": "2024-01-01", "dailyAmount": 1000, "amountToBePaid": 3000},
            "holidays": [{"date": "2024-01-03", "isRecurring": false}]
        }"#,
    )
    .unwrap();
    let out = schedule::build_repayment_schedule(&input).unwrap();
    let summary = &out.result.summary;
    assert_eq!(summary.due_days, 3);
    assert_eq!(summary.holidays, 1);
    assert_eq!(summary.pending, 3);
    assert_eq!(summary.total_due, dec!(3000));
    assert!(out.warnings.is_empty());

    let json = serde_json::to_value(&out).unwrap();
    assert_eq!(json["result"]["entries"][1]["status"], "holiday");
    assert_eq!(json["result"]["entries"][1]["holiday_reason"], "Holiday");
}
