use anyhow::Result;
use chrono::NaiveDate;
use common::SimulationResponse;
use compute::risk::RiskPolicy;
use compute::{ProjectionCalculator, detect_alerts, engine_with_policy, first_critical};
use model::{Alert, DailyProjection};
use rust_decimal::Decimal;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::config::Settings;
use crate::helpers::converters::{ProjectionParams, alert_to_dto, projections_to_timeseries};
use crate::ledger_source::build_ledger;

/// Command-line overrides of the configured projection parameters.
#[derive(Debug, Default)]
pub struct ProjectOptions {
    pub ledger: Option<PathBuf>,
    pub horizon_days: Option<i64>,
    pub starting_balance: Option<Decimal>,
    pub min_operative_balance: Option<Decimal>,
    pub reference_date: Option<NaiveDate>,
    pub json: bool,
}

pub fn project(config_path: Option<&Path>, options: ProjectOptions) -> Result<()> {
    let settings = Settings::load(config_path)?;
    let stdout = std::io::stdout();
    run_projection(&settings, options, &mut stdout.lock())
}

/// Applies the overrides, projects and writes the report.
pub fn run_projection(
    settings: &Settings,
    options: ProjectOptions,
    out: &mut impl Write,
) -> Result<()> {
    let mut settings = settings.clone();
    if let Some(ledger) = options.ledger {
        settings.ledger_path = Some(ledger);
    }
    if let Some(horizon_days) = options.horizon_days {
        settings.horizon_days = horizon_days;
    }
    if let Some(starting_balance) = options.starting_balance {
        settings.starting_balance = starting_balance;
    }
    if let Some(min_operative_balance) = options.min_operative_balance {
        settings.min_operative_balance = min_operative_balance;
    }
    if let Some(reference_date) = options.reference_date {
        settings.reference_date = Some(reference_date);
    }
    settings.validate()?;

    let params = ProjectionParams {
        reference_date: settings.today(),
        horizon_days: settings.horizon_days,
        starting_balance: settings.starting_balance,
        min_operative_balance: settings.min_operative_balance,
    };
    debug!("Projection parameters: {:?}", params);

    let ledger = build_ledger(&settings, params.reference_date)?;
    let projections = engine_with_policy(
        Some(params.reference_date),
        RiskPolicy::new(params.min_operative_balance),
    )
    .project(&ledger, params.horizon_days, params.starting_balance)?;
    let alerts = detect_alerts(&projections);
    info!("Projected {} days, {} alerts", projections.len(), alerts.len());

    if options.json {
        let response = SimulationResponse {
            projection: projections_to_timeseries(&params, &projections),
            alerts: alerts.iter().map(alert_to_dto).collect(),
        };
        serde_json::to_writer_pretty(&mut *out, &response)?;
        writeln!(out)?;
    } else {
        write_table(out, &projections, &alerts)?;
    }
    Ok(())
}

fn write_table(
    out: &mut impl Write,
    projections: &[DailyProjection],
    alerts: &[Alert],
) -> Result<()> {
    writeln!(
        out,
        "{:<10}  {:>16}  {:>14}  {:>14}  {:>16}  {}",
        "date", "initial", "incomes", "expenses", "final", "status"
    )?;
    for p in projections {
        writeln!(
            out,
            "{:<10}  {:>16}  {:>14}  {:>14}  {:>16}  {}",
            p.date.to_string(),
            p.initial_balance.to_string(),
            p.incomes.to_string(),
            p.expenses.to_string(),
            p.final_balance.to_string(),
            p.status
        )?;
    }

    writeln!(out)?;
    match first_critical(alerts) {
        Some(alert) => writeln!(out, "First deficit: {} ({})", alert.critical_date, alert.amount)?,
        None => writeln!(out, "No projected deficit")?,
    }
    writeln!(out, "{} alerts", alerts.len())?;
    for alert in alerts {
        writeln!(out, "  [{}] {}", alert.alert_type, alert.message)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings() -> Settings {
        Settings {
            reference_date: NaiveDate::from_ymd_opt(2026, 2, 1),
            ..Settings::default()
        }
    }

    #[test]
    fn test_table_output_for_demo_month() {
        let options = ProjectOptions {
            horizon_days: Some(5),
            starting_balance: Some(Decimal::new(5_000_000, 0)),
            ..ProjectOptions::default()
        };

        let mut out = Vec::new();
        run_projection(&settings(), options, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert!(text.starts_with("date"));
        assert!(text.contains("2026-02-01"));
        assert!(text.contains("2026-02-05"));
        assert!(!text.contains("2026-02-06"));
        assert!(text.contains("No projected deficit"));
        assert!(text.contains("2 alerts"));
    }

    #[test]
    fn test_json_output_with_ledger_file() {
        let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        write!(
            file,
            r#"[{{"id": "1", "date": "2026-02-02", "amount": "300", "type": "EXPENSE"}}]"#
        )
        .unwrap();

        let options = ProjectOptions {
            ledger: Some(file.path().to_path_buf()),
            horizon_days: Some(3),
            starting_balance: Some(Decimal::new(100, 0)),
            min_operative_balance: Some(Decimal::ZERO),
            json: true,
            ..ProjectOptions::default()
        };

        let mut out = Vec::new();
        run_projection(&settings(), options, &mut out).unwrap();
        let response: SimulationResponse = serde_json::from_slice(&out).unwrap();

        assert_eq!(response.projection.points.len(), 3);
        assert_eq!(response.projection.points[1].final_balance, Decimal::new(-200, 0));
        assert_eq!(response.alerts.len(), 2);
        assert_eq!(response.alerts[0].id, "alert-2026-02-02-critical");
    }

    #[test]
    fn test_invalid_horizon_is_rejected() {
        for horizon_days in [0, -5, crate::config::MAX_HORIZON_DAYS + 1, 90_000_000] {
            let options = ProjectOptions {
                horizon_days: Some(horizon_days),
                ..ProjectOptions::default()
            };
            let mut out = Vec::new();
            assert!(run_projection(&settings(), options, &mut out).is_err());
            assert!(out.is_empty());
        }
    }

    #[test]
    fn test_overflowing_ledger_is_reported() {
        let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        write!(
            file,
            r#"[{{"id": "1", "date": "2026-02-01", "amount": "1", "type": "INCOME"}}]"#
        )
        .unwrap();

        let options = ProjectOptions {
            ledger: Some(file.path().to_path_buf()),
            horizon_days: Some(2),
            starting_balance: Some(Decimal::MAX),
            ..ProjectOptions::default()
        };
        let err = run_projection(&settings(), options, &mut Vec::new()).unwrap_err();
        assert!(err.to_string().contains("overflow"));
    }
}
