use napi::Result as NapiResult;
use napi_derive::napi;

use loanbook_core::{metrics, portfolio, schedule};

/// Convert any Display error into a napi::Error.
fn to_napi_error(e: impl std::fmt::Display) -> napi::Error {
    napi::Error::from_reason(e.to_string())
}

// ---------------------------------------------------------------------------
// Schedule
// ---------------------------------------------------------------------------

#[napi]
pub fn repayment_schedule(input_json: String) -> NapiResult<String> {
    let input: schedule::ScheduleInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = schedule::build_repayment_schedule(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Metrics
// ---------------------------------------------------------------------------

#[napi]
pub fn loan_metrics(input_json: String) -> NapiResult<String> {
    let input: metrics::MetricsInput = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = metrics::compute_loan_metrics(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn portfolio_metrics(input_json: String) -> NapiResult<String> {
    let input: portfolio::PortfolioInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = portfolio::compute_portfolio_metrics(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}
