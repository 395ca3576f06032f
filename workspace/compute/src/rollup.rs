//! Aggregation of daily projections into weekly or monthly buckets.

use chrono::{Datelike, Duration, NaiveDate};
use model::{DailyProjection, RiskStatus};
use rust_decimal::Decimal;
use std::fmt;
use std::str::FromStr;
use tracing::{debug, instrument};

use crate::error::{ComputeError, Result};

/// Bucket size of a rollup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Period {
    #[default]
    Daily,
    /// ISO weeks, Monday to Sunday.
    Weekly,
    /// Calendar months.
    Monthly,
}

impl Period {
    pub fn as_str(&self) -> &'static str {
        match self {
            Period::Daily => "daily",
            Period::Weekly => "weekly",
            Period::Monthly => "monthly",
        }
    }

    /// First calendar day of the bucket containing `date`.
    fn bucket_start(&self, date: NaiveDate) -> NaiveDate {
        match self {
            Period::Daily => date,
            Period::Weekly => date - Duration::days(date.weekday().num_days_from_monday() as i64),
            Period::Monthly => date - Duration::days(date.day0() as i64),
        }
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Period {
    type Err = ComputeError;

    fn from_str(value: &str) -> Result<Self> {
        match value.trim().to_lowercase().as_str() {
            "daily" => Ok(Period::Daily),
            "weekly" => Ok(Period::Weekly),
            "monthly" => Ok(Period::Monthly),
            other => Err(ComputeError::InvalidArgument(format!(
                "Invalid rollup period: {}",
                other
            ))),
        }
    }
}

/// Consecutive projected days folded into one row.
#[derive(Debug, Clone, PartialEq)]
pub struct PeriodBucket {
    pub period: Period,
    /// First projected day in the bucket.
    pub start: NaiveDate,
    /// Last projected day in the bucket.
    pub end: NaiveDate,
    pub days: usize,
    pub opening_balance: Decimal,
    pub incomes: Decimal,
    pub expenses: Decimal,
    pub closing_balance: Decimal,
    /// Worst status of any day in the bucket.
    pub status: RiskStatus,
}

impl PeriodBucket {
    fn open(period: Period, projection: &DailyProjection) -> Self {
        Self {
            period,
            start: projection.date,
            end: projection.date,
            days: 1,
            opening_balance: projection.initial_balance,
            incomes: projection.incomes,
            expenses: projection.expenses,
            closing_balance: projection.final_balance,
            status: projection.status,
        }
    }

    fn extend(&mut self, projection: &DailyProjection) -> Result<()> {
        let (period, start) = (self.period, self.start);
        let overflow = || {
            ComputeError::Overflow(format!(
                "{} bucket starting {} exceeds the decimal range",
                period, start
            ))
        };
        self.incomes = self.incomes.checked_add(projection.incomes).ok_or_else(overflow)?;
        self.expenses = self.expenses.checked_add(projection.expenses).ok_or_else(overflow)?;
        self.end = projection.date;
        self.days += 1;
        self.closing_balance = projection.final_balance;
        self.status = self.status.max(projection.status);
        Ok(())
    }
}

/// Groups consecutive projections sharing the same period bucket.
#[instrument(skip(projections), fields(days = projections.len()))]
pub fn rollup(projections: &[DailyProjection], period: Period) -> Result<Vec<PeriodBucket>> {
    let mut buckets: Vec<PeriodBucket> = Vec::new();

    for projection in projections {
        let key = period.bucket_start(projection.date);
        match buckets.last_mut() {
            Some(bucket) if period.bucket_start(bucket.start) == key => {
                bucket.extend(projection)?;
                continue;
            }
            _ => {}
        }
        buckets.push(PeriodBucket::open(period, projection));
    }

    debug!("Rolled {} days into {} {} buckets", projections.len(), buckets.len(), period);
    Ok(buckets)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::Ledger;
    use crate::projection::{ProjectionCalculator, ProjectionEngine};
    use crate::risk::RiskPolicy;
    use crate::testing::helpers::{amount, date, new_expense, new_income};
    use model::Transaction;

    fn projections() -> Vec<DailyProjection> {
        // 2026-01-28 is a Wednesday; the window spans two ISO weeks and two months.
        let ledger = Ledger::new(vec![
            new_income(date(2026, 1, 28), 100),
            new_expense(date(2026, 1, 31), 400),
            new_income(date(2026, 2, 2), 500),
            new_expense(date(2026, 2, 3), 50),
        ])
        .unwrap();
        ProjectionEngine::new(date(2026, 1, 28), RiskPolicy::new(amount(100)))
            .project(&ledger, 8, amount(200))
            .unwrap()
    }

    #[test]
    fn test_parse_period() {
        assert_eq!("weekly".parse::<Period>().unwrap(), Period::Weekly);
        assert_eq!("MONTHLY".parse::<Period>().unwrap(), Period::Monthly);
        assert_eq!(" Daily ".parse::<Period>().unwrap(), Period::Daily);
        assert!("yearly".parse::<Period>().unwrap_err().is_invalid_argument());
    }

    #[test]
    fn test_daily_rollup_mirrors_projection() {
        let projections = projections();
        let buckets = rollup(&projections, Period::Daily).unwrap();
        assert_eq!(buckets.len(), projections.len());
        assert_eq!(buckets[3].closing_balance, projections[3].final_balance);
    }

    #[test]
    fn test_weekly_rollup() {
        let buckets = rollup(&projections(), Period::Weekly).unwrap();
        assert_eq!(buckets.len(), 2);

        let first = &buckets[0];
        assert_eq!(first.start, date(2026, 1, 28));
        assert_eq!(first.end, date(2026, 2, 1));
        assert_eq!(first.days, 5);
        assert_eq!(first.opening_balance, amount(200));
        assert_eq!(first.incomes, amount(100));
        assert_eq!(first.expenses, amount(400));
        assert_eq!(first.closing_balance, amount(-100));
        assert_eq!(first.status, RiskStatus::Critical);

        let second = &buckets[1];
        assert_eq!(second.start, date(2026, 2, 2));
        assert_eq!(second.end, date(2026, 2, 4));
        assert_eq!(second.opening_balance, amount(-100));
        assert_eq!(second.closing_balance, amount(350));
        assert_eq!(second.status, RiskStatus::Normal);
    }

    #[test]
    fn test_monthly_rollup() {
        let buckets = rollup(&projections(), Period::Monthly).unwrap();
        assert_eq!(buckets.len(), 2);
        assert_eq!(buckets[0].end, date(2026, 1, 31));
        assert_eq!(buckets[0].days, 4);
        assert_eq!(buckets[1].start, date(2026, 2, 1));
        assert_eq!(buckets[1].incomes, amount(500));
        assert_eq!(buckets[1].expenses, amount(50));
        assert_eq!(buckets[1].opening_balance, buckets[0].closing_balance);
    }

    #[test]
    fn test_empty_projection() {
        assert!(rollup(&[], Period::Monthly).unwrap().is_empty());
    }

    #[test]
    fn test_bucket_total_overflow_is_reported() {
        // 2026-03-02 is a Monday, all three days share one ISO week.
        let ledger = Ledger::new(vec![
            Transaction::income("1", date(2026, 3, 2), Decimal::MAX),
            Transaction::expense("2", date(2026, 3, 3), Decimal::MAX),
            Transaction::income("3", date(2026, 3, 4), Decimal::MAX),
        ])
        .unwrap();
        let projections = ProjectionEngine::new(date(2026, 3, 2), RiskPolicy::new(Decimal::ZERO))
            .project(&ledger, 3, Decimal::ZERO)
            .unwrap();

        let err = rollup(&projections, Period::Weekly).unwrap_err();
        assert!(matches!(err, ComputeError::Overflow(_)));
        assert_eq!(rollup(&projections, Period::Daily).unwrap().len(), 3);
    }
}
