//! Where the served ledger comes from: a JSON or YAML file, or the demo schedule.

use anyhow::{Context, Result, bail};
use chrono::{Days, NaiveDate};
use common::TransactionDto;
use compute::Ledger;
use compute::schedule::demo_schedule;
use std::path::Path;
use tracing::{debug, info, instrument};

use crate::config::Settings;
use crate::helpers::converters::dto_to_transaction;

/// Days of history the demo ledger covers before "today".
pub const DEMO_LOOKBACK_DAYS: u64 = 30;
/// Days the demo ledger covers after "today".
pub const DEMO_LOOKAHEAD_DAYS: u64 = 365;

/// Builds the ledger configured in the settings.
pub fn build_ledger(settings: &Settings, today: NaiveDate) -> Result<Ledger> {
    match &settings.ledger_path {
        Some(path) => load_ledger_file(path),
        None => demo_ledger(today),
    }
}

/// Reads a ledger file; the format is chosen by extension.
#[instrument]
pub fn load_ledger_file(path: &Path) -> Result<Ledger> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read ledger file {}", path.display()))?;

    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_lowercase());
    let payload: Vec<TransactionDto> = match extension.as_deref() {
        Some("json") => serde_json::from_str(&content)
            .with_context(|| format!("Invalid JSON ledger {}", path.display()))?,
        Some("yaml") | Some("yml") => serde_yaml::from_str(&content)
            .with_context(|| format!("Invalid YAML ledger {}", path.display()))?,
        _ => bail!(
            "Unsupported ledger file {}, expected .json, .yaml or .yml",
            path.display()
        ),
    };
    debug!("Parsed {} ledger entries", payload.len());

    let transactions = payload
        .into_iter()
        .map(dto_to_transaction)
        .collect::<compute::Result<Vec<_>>>()?;

    let ledger = Ledger::new(transactions)?;
    info!("Loaded {} transactions from {}", ledger.len(), path.display());
    Ok(ledger)
}

/// Materializes the demo schedule around `today`.
pub fn demo_ledger(today: NaiveDate) -> Result<Ledger> {
    let start = today
        .checked_sub_days(Days::new(DEMO_LOOKBACK_DAYS))
        .context("Demo ledger start is out of range")?;
    let end = today
        .checked_add_days(Days::new(DEMO_LOOKAHEAD_DAYS))
        .context("Demo ledger end is out of range")?;

    info!("No ledger file configured, using the demo schedule from {} to {}", start, end);
    Ok(demo_schedule().to_ledger(start, end, today)?)
}
