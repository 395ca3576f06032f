use model::RiskStatus;

use super::helpers::{amount, date, new_income};
use crate::error::Result;
use crate::ledger::Ledger;
use crate::risk::RiskPolicy;
use crate::testing::{AssertResult, TestScenario, TestScenarioBuilder};

/// An income lifts the balance exactly to the minimum operative balance.
pub struct ScenarioBoundaryIncome {}

impl ScenarioBoundaryIncome {
    pub fn new() -> Self {
        Self {}
    }
}

impl TestScenarioBuilder for ScenarioBoundaryIncome {
    fn get_scenario(&self) -> Result<TestScenario> {
        let today = date(2026, 2, 4);
        let ledger = Ledger::new(vec![new_income(today, 100_000)])?;

        let expected: AssertResult = vec![(today, amount(500_000), RiskStatus::Normal)];

        Ok(TestScenario {
            ledger,
            reference_date: today,
            horizon_days: 1,
            starting_balance: amount(400_000),
            policy: RiskPolicy::new(amount(500_000)),
            expected,
            expected_alerts: vec![],
        })
    }
}
