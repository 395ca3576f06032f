use chrono::{Days, NaiveDate};
use model::DailyProjection;
use rust_decimal::Decimal;
use tracing::{debug, info, instrument, trace};

use crate::error::{ComputeError, Result};
use crate::ledger::Ledger;
use crate::risk::RiskPolicy;

/// Anything that can turn a ledger into a day-by-day balance projection.
pub trait ProjectionCalculator {
    /// Projects `horizon_days` consecutive days of balances.
    fn project(
        &self,
        ledger: &Ledger,
        horizon_days: i64,
        starting_balance: Decimal,
    ) -> Result<Vec<DailyProjection>>;
}

/// Walks the ledger forward from a fixed reference date.
///
/// The reference date is an explicit input so the same engine always produces
/// the same projection for the same ledger.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProjectionEngine {
    reference_date: NaiveDate,
    policy: RiskPolicy,
}

impl ProjectionEngine {
    pub fn new(reference_date: NaiveDate, policy: RiskPolicy) -> Self {
        Self {
            reference_date,
            policy,
        }
    }
}

impl ProjectionCalculator for ProjectionEngine {
    fn project(
        &self,
        ledger: &Ledger,
        horizon_days: i64,
        starting_balance: Decimal,
    ) -> Result<Vec<DailyProjection>> {
        project(
            ledger,
            horizon_days,
            starting_balance,
            self.reference_date,
            &self.policy,
        )
    }
}

/// Projects daily balances over `[reference_date, reference_date + horizon_days - 1]`.
///
/// Each day starts from the previous day's final balance (the starting balance
/// on day 0), adds the day's incomes, subtracts its expenses and is classified
/// with the policy. A non-positive horizon is rejected, and so is a running
/// balance leaving the decimal range.
#[instrument(skip(ledger, policy), fields(ledger_size = ledger.len()))]
pub fn project(
    ledger: &Ledger,
    horizon_days: i64,
    starting_balance: Decimal,
    reference_date: NaiveDate,
    policy: &RiskPolicy,
) -> Result<Vec<DailyProjection>> {
    if horizon_days <= 0 {
        return Err(ComputeError::InvalidArgument(format!(
            "Horizon must be a positive number of days, got {}",
            horizon_days
        )));
    }

    let last_date = reference_date
        .checked_add_days(Days::new(horizon_days as u64 - 1))
        .ok_or_else(|| {
            ComputeError::Date(format!(
                "Projection window of {} days starting {} exceeds the calendar",
                horizon_days, reference_date
            ))
        })?;
    debug!("Projecting from {} to {}", reference_date, last_date);

    let mut projections = Vec::with_capacity(horizon_days as usize);
    let mut running_balance = starting_balance;

    for date in reference_date.iter_days().take(horizon_days as usize) {
        let totals = ledger.totals_on(date);
        let initial_balance = running_balance;
        let final_balance = initial_balance.checked_add(totals.net()).ok_or_else(|| {
            ComputeError::Overflow(format!(
                "Balance on {} exceeds the decimal range",
                date
            ))
        })?;
        let status = policy.classify(final_balance);

        trace!(
            "Projected day: date={}, initial={}, incomes={}, expenses={}, final={}, status={}",
            date, initial_balance, totals.incomes, totals.expenses, final_balance, status
        );

        projections.push(DailyProjection {
            date,
            initial_balance,
            incomes: totals.incomes,
            expenses: totals.expenses,
            final_balance,
            status,
        });
        running_balance = final_balance;
    }

    info!(
        "Projected {} days, closing balance {}",
        projections.len(),
        running_balance
    );

    Ok(projections)
}
