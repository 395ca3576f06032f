//! Dashboard figures derived from a projection.

use chrono::NaiveDate;
use model::{DailyProjection, RiskStatus};
use rust_decimal::Decimal;
use tracing::instrument;

use crate::error::{ComputeError, Result};

/// Number of leading days aggregated into income and expense totals.
pub const DEFAULT_SUMMARY_WINDOW_DAYS: usize = 30;

/// Headline numbers of a projection
#[derive(Debug, Clone, PartialEq)]
pub struct CashFlowSummary {
    /// Final balance of the first projected day.
    pub current_liquidity: Decimal,
    /// Days actually aggregated into `incomes` and `expenses`.
    pub window_days: usize,
    pub incomes: Decimal,
    pub expenses: Decimal,
    pub lowest_balance: Option<Decimal>,
    pub lowest_balance_date: Option<NaiveDate>,
    pub critical_days: usize,
    pub warning_days: usize,
    pub first_critical_date: Option<NaiveDate>,
}

/// Summarizes a projection.
///
/// Income and expense totals cover the first `window_days` days; every other
/// figure covers the whole projection. The lowest balance keeps the earliest
/// date on ties. Totals beyond the decimal range are reported as overflow.
#[instrument(skip(projections), fields(days = projections.len()))]
pub fn summarize(projections: &[DailyProjection], window_days: usize) -> Result<CashFlowSummary> {
    let window = &projections[..window_days.min(projections.len())];

    let lowest = projections.iter().fold(None::<&DailyProjection>, |lowest, p| match lowest {
        Some(current) if current.final_balance <= p.final_balance => Some(current),
        _ => Some(p),
    });

    Ok(CashFlowSummary {
        current_liquidity: projections
            .first()
            .map(|p| p.final_balance)
            .unwrap_or(Decimal::ZERO),
        window_days: window.len(),
        incomes: checked_total(window.iter().map(|p| p.incomes), "Income")?,
        expenses: checked_total(window.iter().map(|p| p.expenses), "Expense")?,
        lowest_balance: lowest.map(|p| p.final_balance),
        lowest_balance_date: lowest.map(|p| p.date),
        critical_days: count_status(projections, RiskStatus::Critical),
        warning_days: count_status(projections, RiskStatus::Warning),
        first_critical_date: projections
            .iter()
            .find(|p| p.status == RiskStatus::Critical)
            .map(|p| p.date),
    })
}

fn checked_total(values: impl Iterator<Item = Decimal>, label: &str) -> Result<Decimal> {
    let mut total = Decimal::ZERO;
    for value in values {
        total = total.checked_add(value).ok_or_else(|| {
            ComputeError::Overflow(format!("{} total exceeds the decimal range", label))
        })?;
    }
    Ok(total)
}

fn count_status(projections: &[DailyProjection], status: RiskStatus) -> usize {
    projections.iter().filter(|p| p.status == status).count()
}
