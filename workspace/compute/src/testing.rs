pub mod helpers;
pub mod scenario_boundary_income;
pub mod scenario_empty_ledger;
pub mod scenario_recurring_month;
pub mod scenario_same_day_deficit;

pub use scenario_boundary_income::ScenarioBoundaryIncome;
pub use scenario_empty_ledger::ScenarioEmptyLedger;
pub use scenario_recurring_month::ScenarioRecurringMonth;
pub use scenario_same_day_deficit::ScenarioSameDayDeficit;

use chrono::NaiveDate;
use model::{AlertType, RiskStatus};
use rust_decimal::Decimal;

use crate::alerts::detect_alerts;
use crate::error::Result;
use crate::ledger::Ledger;
use crate::projection::{ProjectionCalculator, ProjectionEngine};
use crate::risk::RiskPolicy;

/// Type representing the expected projection of a test scenario.
/// in the following schema (date, expected final balance, expected status)
pub type AssertResult = Vec<(NaiveDate, Decimal, RiskStatus)>;

/// Every alert the scenario must raise, in order: (critical date, type, amount)
pub type AlertAssert = Vec<(NaiveDate, AlertType, Decimal)>;

/// Prepared test scenario.
pub struct TestScenario {
    pub ledger: Ledger,
    pub reference_date: NaiveDate,
    pub horizon_days: i64,
    pub starting_balance: Decimal,
    pub policy: RiskPolicy,
    pub expected: AssertResult,
    pub expected_alerts: AlertAssert,
}

/// Trait for building test scenarios.
pub trait TestScenarioBuilder {
    fn get_scenario(&self) -> Result<TestScenario>;
}

pub fn run_and_assert_scenario(builder: &dyn TestScenarioBuilder) -> Result<()> {
    let _guard = helpers::init_test_tracing();
    let scenario = builder.get_scenario()?;

    let engine = ProjectionEngine::new(scenario.reference_date, scenario.policy);
    let projections = engine.project(
        &scenario.ledger,
        scenario.horizon_days,
        scenario.starting_balance,
    )?;

    helpers::assert_projection_invariants(
        &projections,
        scenario.reference_date,
        scenario.horizon_days,
        scenario.starting_balance,
    );

    for (date, final_balance, status) in &scenario.expected {
        let projection = projections
            .iter()
            .find(|p| p.date == *date)
            .unwrap_or_else(|| panic!("No projection for {}", date));
        assert_eq!(projection.final_balance, *final_balance, "final balance on {}", date);
        assert_eq!(projection.status, *status, "status on {}", date);
    }

    let alerts: AlertAssert = detect_alerts(&projections)
        .iter()
        .map(|alert| (alert.critical_date, alert.alert_type, alert.amount))
        .collect();
    assert_eq!(alerts, scenario.expected_alerts);

    Ok(())
}
