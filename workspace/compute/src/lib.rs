pub mod alerts;
pub mod error;
pub mod insight;
pub mod ledger;
pub mod projection;
pub mod risk;
pub mod rollup;
pub mod schedule;
pub mod summary;

#[cfg(test)]
pub(crate) mod testing;

use chrono::{NaiveDate, Utc};
use projection::ProjectionEngine;
use risk::RiskPolicy;

pub use alerts::{detect_alerts, detect_alerts_at, first_critical};
pub use error::{ComputeError, Result};
pub use ledger::Ledger;
pub use projection::{ProjectionCalculator, project};
pub use risk::classify;

/// Returns a projection engine classifying with the given policy.
///
/// This function uses the provided date as "today" or the current UTC date if none is provided.
pub fn engine_with_policy(today: Option<NaiveDate>, policy: RiskPolicy) -> ProjectionEngine {
    let today = today.unwrap_or_else(|| Utc::now().date_naive());
    ProjectionEngine::new(today, policy)
}
