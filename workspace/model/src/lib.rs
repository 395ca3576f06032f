//! Domain value objects for the cash-flow projection engine.
//!
//! Everything in this crate is an immutable value: a ledger entry, one
//! projected day, an alert derived from a projected day, or an insight report
//! produced by an external collaborator.

pub mod alert;
pub mod insight;
pub mod projection;
pub mod transaction;

pub use alert::{Alert, AlertType};
pub use insight::{InsightReport, RiskLevel};
pub use projection::{DailyProjection, RiskStatus};
pub use transaction::{Transaction, TransactionStatus, TransactionType};

// Re-export tracing for use in this crate
pub use tracing;
