use model::RiskStatus;

use super::helpers::{amount, date};
use crate::error::Result;
use crate::ledger::Ledger;
use crate::risk::RiskPolicy;
use crate::testing::{AssertResult, TestScenario, TestScenarioBuilder};

/// No transactions at all: the starting balance is carried unchanged.
pub struct ScenarioEmptyLedger {}

impl ScenarioEmptyLedger {
    pub fn new() -> Self {
        Self {}
    }
}

impl TestScenarioBuilder for ScenarioEmptyLedger {
    fn get_scenario(&self) -> Result<TestScenario> {
        let today = date(2026, 2, 4);

        let expected: AssertResult = vec![
            (date(2026, 2, 4), amount(1_000_000), RiskStatus::Normal),
            (date(2026, 2, 5), amount(1_000_000), RiskStatus::Normal),
            (date(2026, 2, 6), amount(1_000_000), RiskStatus::Normal),
        ];

        Ok(TestScenario {
            ledger: Ledger::default(),
            reference_date: today,
            horizon_days: 3,
            starting_balance: amount(1_000_000),
            policy: RiskPolicy::new(amount(500_000)),
            expected,
            expected_alerts: vec![],
        })
    }
}
