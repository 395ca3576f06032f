//! Recurring cash-flow schedules expanded into ledgers.
//!
//! A schedule is a ledger provider: it materializes a finite set of
//! transactions for a date range. The projection engine never sees the rules,
//! only the resulting ledger.

use chrono::{Datelike, NaiveDate, Weekday};
use model::{Transaction, TransactionStatus, TransactionType};
use rust_decimal::Decimal;
use tracing::{debug, instrument, trace};

use crate::error::{ComputeError, Result};
use crate::ledger::Ledger;

/// Returns the number of days in the given month using chrono.
pub fn days_in_month(year: i32, month: u32) -> u32 {
    let (next_year, next_month) = if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    };

    NaiveDate::from_ymd_opt(next_year, next_month, 1)
        .and_then(|first_day_next_month| first_day_next_month.pred_opt())
        .map(|last_day| last_day.day())
        .unwrap_or(31)
}

/// When a scheduled entry settles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScheduleRule {
    /// A single settlement date.
    Once(NaiveDate),
    /// Every month on the given day, clamped to the month's last day.
    Monthly { day: u32 },
    /// Every week on the given weekday.
    Weekly { weekday: Weekday },
}

impl ScheduleRule {
    fn validate(&self) -> Result<()> {
        match self {
            ScheduleRule::Monthly { day } if !(1..=31).contains(day) => {
                Err(ComputeError::InvalidArgument(format!(
                    "Monthly schedule day must be between 1 and 31, got {}",
                    day
                )))
            }
            _ => Ok(()),
        }
    }

    /// Checks whether the rule settles on the given date.
    pub fn occurs_on(&self, date: NaiveDate) -> bool {
        match self {
            ScheduleRule::Once(once) => *once == date,
            ScheduleRule::Monthly { day } => {
                date.day() == (*day).min(days_in_month(date.year(), date.month()))
            }
            ScheduleRule::Weekly { weekday } => date.weekday() == *weekday,
        }
    }
}

/// A cash movement template repeated according to a rule.
#[derive(Debug, Clone, PartialEq)]
pub struct ScheduledEntry {
    pub concept: String,
    pub entity: String,
    pub responsible: String,
    pub amount: Decimal,
    pub kind: TransactionType,
    pub rule: ScheduleRule,
}

impl ScheduledEntry {
    pub fn new(
        concept: impl Into<String>,
        amount: Decimal,
        kind: TransactionType,
        rule: ScheduleRule,
    ) -> Self {
        Self {
            concept: concept.into(),
            entity: String::new(),
            responsible: String::new(),
            amount,
            kind,
            rule,
        }
    }

    pub fn with_entity(mut self, entity: impl Into<String>) -> Self {
        self.entity = entity.into();
        self
    }

    pub fn with_responsible(mut self, responsible: impl Into<String>) -> Self {
        self.responsible = responsible.into();
        self
    }
}

/// An ordered collection of scheduled entries.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Schedule {
    entries: Vec<ScheduledEntry>,
}

impl Schedule {
    pub fn new(entries: Vec<ScheduledEntry>) -> Self {
        Self { entries }
    }

    /// Expands the schedule into transactions settling within `[start, end]`.
    ///
    /// Ids are sequential in chronological order, entries settling on the
    /// same day follow schedule order. Occurrences before `today` are marked
    /// completed, the others pending.
    #[instrument(skip(self), fields(entries = self.entries.len()))]
    pub fn materialize(
        &self,
        start: NaiveDate,
        end: NaiveDate,
        today: NaiveDate,
    ) -> Result<Vec<Transaction>> {
        if start > end {
            return Err(ComputeError::InvalidArgument(format!(
                "Schedule range start {} is after end {}",
                start, end
            )));
        }
        for entry in &self.entries {
            entry.rule.validate()?;
            if entry.amount < Decimal::ZERO {
                return Err(ComputeError::InvalidArgument(format!(
                    "Scheduled entry '{}' has a negative amount: {}",
                    entry.concept, entry.amount
                )));
            }
        }

        let mut transactions = Vec::new();
        let mut next_id: u64 = 1;

        for date in start.iter_days().take_while(|date| *date <= end) {
            for entry in self.entries.iter().filter(|e| e.rule.occurs_on(date)) {
                let status = if date < today {
                    TransactionStatus::Completed
                } else {
                    TransactionStatus::Pending
                };
                trace!("Scheduled occurrence: date={}, concept={}", date, entry.concept);

                transactions.push(
                    Transaction::new(next_id.to_string(), date, entry.amount, entry.kind)
                        .with_status(status)
                        .with_entity(entry.entity.clone())
                        .with_responsible(entry.responsible.clone())
                        .with_concept(entry.concept.clone()),
                );
                next_id += 1;
            }
        }

        debug!(
            "Materialized {} transactions from {} to {}",
            transactions.len(),
            start,
            end
        );
        Ok(transactions)
    }

    /// Expands the schedule and indexes the result.
    pub fn to_ledger(&self, start: NaiveDate, end: NaiveDate, today: NaiveDate) -> Result<Ledger> {
        Ledger::new(self.materialize(start, end, today)?)
    }
}

/// A corporate treasury pattern used when no ledger file is configured.
pub fn demo_schedule() -> Schedule {
    Schedule::new(vec![
        ScheduledEntry::new(
            "Head office rent",
            Decimal::new(4_500_000, 0),
            TransactionType::Expense,
            ScheduleRule::Monthly { day: 1 },
        )
        .with_entity("Delta Real Estate")
        .with_responsible("Administration"),
        ScheduledEntry::new(
            "Staff payroll",
            Decimal::new(12_000_000, 0),
            TransactionType::Expense,
            ScheduleRule::Monthly { day: 5 },
        )
        .with_entity("General payroll")
        .with_responsible("Human resources"),
        ScheduledEntry::new(
            "Retail sales",
            Decimal::new(6_500_000, 0),
            TransactionType::Income,
            ScheduleRule::Weekly {
                weekday: Weekday::Mon,
            },
        )
        .with_entity("Direct customers")
        .with_responsible("Sales"),
        ScheduledEntry::new(
            "Retail sales",
            Decimal::new(6_500_000, 0),
            TransactionType::Income,
            ScheduleRule::Weekly {
                weekday: Weekday::Thu,
            },
        )
        .with_entity("Direct customers")
        .with_responsible("Sales"),
        ScheduledEntry::new(
            "Consulting services",
            Decimal::new(15_000_000, 0),
            TransactionType::Income,
            ScheduleRule::Monthly { day: 15 },
        )
        .with_entity("Corporate VIP client")
        .with_responsible("Collections"),
        ScheduledEntry::new(
            "Consulting services",
            Decimal::new(15_000_000, 0),
            TransactionType::Income,
            ScheduleRule::Monthly { day: 28 },
        )
        .with_entity("Corporate VIP client")
        .with_responsible("Collections"),
    ])
}
