use std::collections::{BTreeMap, HashMap, HashSet};
use std::ops::Bound;

use chrono::NaiveDate;
use model::{Transaction, TransactionType};
use rust_decimal::Decimal;
use tracing::{debug, instrument, trace};

use crate::error::{ComputeError, Result};

/// Calendar date format used by ledger payloads.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Parses a `YYYY-MM-DD` settlement date.
pub fn parse_date(value: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT).map_err(|e| {
        ComputeError::InvalidArgument(format!("Malformed transaction date '{}': {}", value, e))
    })
}

/// Income and expense sums of a single calendar day.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DayTotals {
    pub incomes: Decimal,
    pub expenses: Decimal,
}

impl DayTotals {
    fn add(&mut self, transaction: &Transaction) -> Result<()> {
        let total = match transaction.kind() {
            TransactionType::Income => &mut self.incomes,
            TransactionType::Expense => &mut self.expenses,
        };
        *total = total.checked_add(transaction.amount()).ok_or_else(|| {
            ComputeError::Overflow(format!(
                "{} total of {} exceeds the decimal range at transaction '{}'",
                transaction.kind(),
                transaction.date(),
                transaction.id()
            ))
        })?;
        Ok(())
    }

    /// Incomes minus expenses. Both sums are non-negative so this cannot overflow.
    pub fn net(&self) -> Decimal {
        self.incomes - self.expenses
    }
}

/// A validated set of transactions indexed by settlement date.
///
/// The index is built once so a projection walks each simulated day with a
/// single map lookup, and range listings read only the dates they cover.
#[derive(Debug, Clone, Default)]
pub struct Ledger {
    transactions: Vec<Transaction>,
    by_date: BTreeMap<NaiveDate, Vec<usize>>,
    totals: HashMap<NaiveDate, DayTotals>,
}

impl Ledger {
    /// Validates and indexes the transactions.
    ///
    /// Rejects negative amounts, duplicated ids and daily totals beyond the
    /// decimal range. Order of the input is
    /// irrelevant; it is kept only for listing purposes.
    #[instrument(skip(transactions), fields(count = transactions.len()))]
    pub fn new(transactions: Vec<Transaction>) -> Result<Self> {
        let mut seen_ids = HashSet::with_capacity(transactions.len());
        let mut by_date: BTreeMap<NaiveDate, Vec<usize>> = BTreeMap::new();
        let mut totals: HashMap<NaiveDate, DayTotals> = HashMap::new();

        for (position, tx) in transactions.iter().enumerate() {
            if tx.amount() < Decimal::ZERO {
                return Err(ComputeError::InvalidArgument(format!(
                    "Transaction '{}' has a negative amount: {}",
                    tx.id(),
                    tx.amount()
                )));
            }
            if !seen_ids.insert(tx.id()) {
                return Err(ComputeError::InvalidArgument(format!(
                    "Duplicated transaction id '{}'",
                    tx.id()
                )));
            }

            trace!(
                "Indexing transaction: id={}, date={}, type={}, amount={}",
                tx.id(),
                tx.date(),
                tx.kind(),
                tx.amount()
            );
            by_date.entry(tx.date()).or_default().push(position);
            totals.entry(tx.date()).or_default().add(tx)?;
        }

        debug!(
            "Indexed {} transactions over {} distinct dates",
            transactions.len(),
            by_date.len()
        );

        Ok(Self {
            transactions,
            by_date,
            totals,
        })
    }

    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }

    /// All transactions in insertion order.
    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    /// Income and expense sums for the given date, zero when nothing settles.
    pub fn totals_on(&self, date: NaiveDate) -> DayTotals {
        self.totals.get(&date).copied().unwrap_or_default()
    }

    /// Earliest and latest settlement dates.
    pub fn date_range(&self) -> Option<(NaiveDate, NaiveDate)> {
        let (first, _) = self.by_date.first_key_value()?;
        let (last, _) = self.by_date.last_key_value()?;
        Some((*first, *last))
    }

    /// Transactions within the optional inclusive bounds, ordered by date.
    ///
    /// Same-day transactions keep their insertion order. An inverted range
    /// selects nothing.
    pub fn between(&self, start: Option<NaiveDate>, end: Option<NaiveDate>) -> Vec<&Transaction> {
        if let (Some(start), Some(end)) = (start, end) {
            if start > end {
                return Vec::new();
            }
        }
        let lower = start.map_or(Bound::Unbounded, Bound::Included);
        let upper = end.map_or(Bound::Unbounded, Bound::Included);

        self.by_date
            .range((lower, upper))
            .flat_map(|(_, positions)| positions.iter().map(|&position| &self.transactions[position]))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_parse_date() {
        assert_eq!(parse_date("2026-02-04").unwrap(), date(2026, 2, 4));
        assert_eq!(parse_date(" 2026-02-04 ").unwrap(), date(2026, 2, 4));
    }

    #[test]
    fn test_parse_date_rejects_malformed_values() {
        for value in ["2026-02-30", "04/02/2026", "", "2026-2"] {
            let err = parse_date(value).unwrap_err();
            assert!(err.is_invalid_argument(), "expected rejection for {:?}", value);
        }
    }

    #[test]
    fn test_totals_are_indexed_per_day() {
        let day = date(2026, 3, 5);
        let ledger = Ledger::new(vec![
            Transaction::income("1", day, Decimal::new(700, 0)),
            Transaction::income("2", day, Decimal::new(300, 0)),
            Transaction::expense("3", day, Decimal::new(250, 0)),
            Transaction::expense("4", date(2026, 3, 6), Decimal::new(90, 0)),
        ])
        .unwrap();

        assert_eq!(
            ledger.totals_on(day),
            DayTotals {
                incomes: Decimal::new(1000, 0),
                expenses: Decimal::new(250, 0),
            }
        );
        assert_eq!(ledger.totals_on(day).net(), Decimal::new(750, 0));
        assert_eq!(ledger.totals_on(date(2026, 3, 7)), DayTotals::default());
        assert_eq!(ledger.date_range(), Some((day, date(2026, 3, 6))));
    }

    #[test]
    fn test_negative_amount_is_rejected() {
        let result = Ledger::new(vec![Transaction::expense(
            "1",
            date(2026, 3, 5),
            Decimal::new(-1, 0),
        )]);

        assert!(matches!(result, Err(ComputeError::InvalidArgument(_))));
    }

    #[test]
    fn test_zero_amount_is_accepted() {
        let ledger =
            Ledger::new(vec![Transaction::income("1", date(2026, 3, 5), Decimal::ZERO)]).unwrap();
        assert_eq!(ledger.len(), 1);
    }

    #[test]
    fn test_duplicated_id_is_rejected() {
        let result = Ledger::new(vec![
            Transaction::income("dup", date(2026, 3, 5), Decimal::ONE),
            Transaction::expense("dup", date(2026, 3, 6), Decimal::ONE),
        ]);

        assert!(matches!(result, Err(ComputeError::InvalidArgument(_))));
    }

    #[test]
    fn test_between_orders_by_date() {
        let ledger = Ledger::new(vec![
            Transaction::income("late", date(2026, 3, 9), Decimal::ONE),
            Transaction::income("early", date(2026, 3, 1), Decimal::ONE),
            Transaction::income("middle", date(2026, 3, 5), Decimal::ONE),
        ])
        .unwrap();

        let all: Vec<&str> = ledger.between(None, None).iter().map(|tx| tx.id()).collect();
        assert_eq!(all, vec!["early", "middle", "late"]);

        let bounded: Vec<&str> = ledger
            .between(Some(date(2026, 3, 2)), Some(date(2026, 3, 9)))
            .iter()
            .map(|tx| tx.id())
            .collect();
        assert_eq!(bounded, vec!["middle", "late"]);

        let single_day: Vec<&str> = ledger
            .between(Some(date(2026, 3, 5)), Some(date(2026, 3, 5)))
            .iter()
            .map(|tx| tx.id())
            .collect();
        assert_eq!(single_day, vec!["middle"]);

        assert!(ledger.between(Some(date(2026, 3, 9)), Some(date(2026, 3, 1))).is_empty());
    }

    #[test]
    fn test_same_day_total_overflow_is_reported() {
        let day = date(2026, 3, 5);
        let result = Ledger::new(vec![
            Transaction::income("1", day, Decimal::MAX),
            Transaction::income("2", day, Decimal::MAX),
        ]);
        assert!(matches!(result, Err(ComputeError::Overflow(_))));

        let ledger = Ledger::new(vec![
            Transaction::income("1", day, Decimal::MAX),
            Transaction::expense("2", day, Decimal::MAX),
        ])
        .unwrap();
        assert_eq!(ledger.totals_on(day).net(), Decimal::ZERO);
    }

    #[test]
    fn test_empty_ledger() {
        let ledger = Ledger::default();
        assert!(ledger.is_empty());
        assert_eq!(ledger.date_range(), None);
    }
}
