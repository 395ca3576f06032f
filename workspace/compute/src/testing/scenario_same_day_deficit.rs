use model::{AlertType, RiskStatus};

use super::helpers::{amount, date, new_expense};
use crate::error::Result;
use crate::ledger::Ledger;
use crate::risk::RiskPolicy;
use crate::testing::{AssertResult, TestScenario, TestScenarioBuilder};

/// An expense larger than the starting balance settles on day 0.
pub struct ScenarioSameDayDeficit {}

impl ScenarioSameDayDeficit {
    pub fn new() -> Self {
        Self {}
    }
}

impl TestScenarioBuilder for ScenarioSameDayDeficit {
    fn get_scenario(&self) -> Result<TestScenario> {
        let today = date(2026, 2, 4);
        let ledger = Ledger::new(vec![new_expense(today, 2_000_000)])?;

        // Day 0: 1,000,000 - 2,000,000 = -1,000,000
        // Day 1: nothing settles, the deficit is carried
        let expected: AssertResult = vec![
            (date(2026, 2, 4), amount(-1_000_000), RiskStatus::Critical),
            (date(2026, 2, 5), amount(-1_000_000), RiskStatus::Critical),
        ];

        Ok(TestScenario {
            ledger,
            reference_date: today,
            horizon_days: 2,
            starting_balance: amount(1_000_000),
            policy: RiskPolicy::new(amount(500_000)),
            expected,
            expected_alerts: vec![
                (date(2026, 2, 4), AlertType::Critical, amount(1_000_000)),
                (date(2026, 2, 5), AlertType::Critical, amount(1_000_000)),
            ],
        })
    }
}
