use std::sync::atomic::{AtomicU64, Ordering};

use chrono::NaiveDate;
use model::{DailyProjection, Transaction};
use rust_decimal::Decimal;
use tracing::Level;

static TRANSACTION_ID: AtomicU64 = AtomicU64::new(0);

pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

/// Whole currency units.
pub fn amount(units: i64) -> Decimal {
    Decimal::new(units, 0)
}

/// Routes compute logs to STDERR for the duration of a test.
pub fn init_test_tracing() -> tracing::subscriber::DefaultGuard {
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(Level::WARN)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_default(subscriber)
}

fn next_id() -> String {
    format!("tx-{}", TRANSACTION_ID.fetch_add(1, Ordering::SeqCst))
}

pub fn new_income(date: NaiveDate, units: i64) -> Transaction {
    Transaction::income(next_id(), date, amount(units)).with_concept("Test income")
}

pub fn new_expense(date: NaiveDate, units: i64) -> Transaction {
    Transaction::expense(next_id(), date, amount(units)).with_concept("Test expense")
}

/// Checks the structural guarantees every projection must satisfy.
pub fn assert_projection_invariants(
    projections: &[DailyProjection],
    reference_date: NaiveDate,
    horizon_days: i64,
    starting_balance: Decimal,
) {
    assert_eq!(projections.len() as i64, horizon_days, "projection length");
    assert_eq!(projections[0].date, reference_date, "day 0");
    assert_eq!(projections[0].initial_balance, starting_balance, "seed balance");

    for projection in projections {
        assert_eq!(
            projection.final_balance,
            projection.initial_balance + projection.incomes - projection.expenses,
            "conservation on {}",
            projection.date
        );
        assert!(projection.incomes >= Decimal::ZERO);
        assert!(projection.expenses >= Decimal::ZERO);
    }

    for pair in projections.windows(2) {
        assert_eq!(pair[0].date.succ_opt(), Some(pair[1].date), "consecutive dates");
        assert_eq!(
            pair[1].initial_balance, pair[0].final_balance,
            "carried balance on {}",
            pair[1].date
        );
    }
}
