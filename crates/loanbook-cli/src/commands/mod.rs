pub mod holidays;
pub mod metrics;
pub mod portfolio;
pub mod schedule;

use loanbook_core::RepaymentPolicy;

/// Load `--policy` when given; otherwise keep the policy carried by the input.
pub fn resolve_policy(
    path: Option<&str>,
    from_input: RepaymentPolicy,
) -> Result<RepaymentPolicy, Box<dyn std::error::Error>> {
    match path {
        Some(path) => {
            let policy = RepaymentPolicy::load(path)?;
            tracing::debug!(path, ?policy, "loaded repayment policy");
            Ok(policy)
        }
        None => Ok(from_input),
    }
}
