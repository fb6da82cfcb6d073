use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// All monetary values. Wraps Decimal to prevent accidental f64 usage.
pub type Money = Decimal;

/// Largest amount accepted from input; larger values are capped on read.
/// Leaves headroom for daily amount × elapsed days and portfolio sums.
pub const MAX_AMOUNT: Money = dec!(1000000000000000);

/// Standard computation output envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputationOutput<T: Serialize> {
    pub result: T,
    pub methodology: String,
    pub assumptions: serde_json::Value,
    pub warnings: Vec<String>,
    pub metadata: ComputationMetadata,
}

/// Metadata for every computation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputationMetadata {
    pub version: String,
    pub computation_time_us: u64,
    pub precision: String,
}

/// Helper to wrap computation results with metadata
pub fn with_metadata<T: Serialize>(
    methodology: &str,
    assumptions: &impl Serialize,
    warnings: Vec<String>,
    elapsed_us: u64,
    result: T,
) -> ComputationOutput<T> {
    ComputationOutput {
        result,
        methodology: methodology.to_string(),
        assumptions: serde_json::to_value(assumptions).unwrap_or_default(),
        warnings,
        metadata: ComputationMetadata {
            version: env!("CARGO_PKG_VERSION").to_string(),
            computation_time_us: elapsed_us,
            precision: "rust_decimal_128bit".to_string(),
        },
    }
}

/// Round a currency amount to cents, halves away from zero.
pub fn round_money(amount: Money) -> Money {
    amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Addition that saturates at `Decimal::MAX` instead of panicking.
pub fn saturating_add(a: Money, b: Money) -> Money {
    a.checked_add(b).unwrap_or(Decimal::MAX)
}

/// Multiplication that saturates at `Decimal::MAX` instead of panicking.
/// Both operands are non-negative throughout this crate.
pub fn saturating_mul(a: Money, b: Money) -> Money {
    a.checked_mul(b).unwrap_or(Decimal::MAX)
}

/// Clamp a currency amount so it is never negative.
pub fn non_negative(amount: Money) -> Money {
    amount.max(Decimal::ZERO)
}
