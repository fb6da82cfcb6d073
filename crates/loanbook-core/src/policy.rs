//! Tunable constants for schedule generation and collection metrics.
//!
//! `installment_count` drives the metrics calculator (projected end date and
//! the point at which the full balance falls due). `max_schedule_iterations`
//! bounds the schedule walk. The two are independent on purpose: the schedule
//! length is derived from the loan's own economics.

use std::path::Path;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::types::Money;
use crate::{LoanbookError, LoanbookResult};

/// Contractual number of daily installments.
pub const FIXED_INSTALLMENT_COUNT: u32 = 22;
/// Upper bound on non-weekend days visited by the schedule generator.
pub const MAX_SCHEDULE_ITERATIONS: u32 = 365;
/// Tolerance for currency comparisons.
pub const CURRENCY_EPSILON: Decimal = dec!(0.01);

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RepaymentPolicy {
    pub installment_count: u32,
    pub max_schedule_iterations: u32,
    pub epsilon: Money,
}

impl Default for RepaymentPolicy {
    fn default() -> Self {
        Self {
            installment_count: FIXED_INSTALLMENT_COUNT,
            max_schedule_iterations: MAX_SCHEDULE_ITERATIONS,
            epsilon: CURRENCY_EPSILON,
        }
    }
}

impl RepaymentPolicy {
    pub fn validate(&self) -> LoanbookResult<()> {
        if self.epsilon < Decimal::ZERO {
            return Err(LoanbookError::InvalidInput {
                field: "epsilon".into(),
                reason: "Epsilon cannot be negative.".into(),
            });
        }
        if self.max_schedule_iterations == 0 {
            return Err(LoanbookError::InvalidInput {
                field: "max_schedule_iterations".into(),
                reason: "Schedule iteration bound must be positive.".into(),
            });
        }
        Ok(())
    }

    pub fn from_json_str(s: &str) -> LoanbookResult<Self> {
        let policy: Self = serde_json::from_str(s)?;
        policy.validate()?;
        Ok(policy)
    }

    pub fn from_yaml_str(s: &str) -> LoanbookResult<Self> {
        let policy: Self = serde_yaml::from_str(s)?;
        policy.validate()?;
        Ok(policy)
    }

    /// Load from a `.yaml`/`.yml` or JSON file, chosen by extension.
    pub fn load(path: impl AsRef<Path>) -> LoanbookResult<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|e| LoanbookError::InvalidInput {
            field: "policy".into(),
            reason: format!("Failed to read '{}': {}", path.display(), e),
        })?;
        match path.extension().and_then(|e| e.to_str()) {
            Some("yaml") | Some("yml") => Self::from_yaml_str(&contents),
            _ => Self::from_json_str(&contents),
        }
    }
}
