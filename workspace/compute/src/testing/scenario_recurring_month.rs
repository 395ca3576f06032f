use model::{AlertType, RiskStatus};

use super::helpers::{amount, date};
use crate::error::Result;
use crate::risk::RiskPolicy;
use crate::schedule::demo_schedule;
use crate::testing::{AssertResult, TestScenario, TestScenarioBuilder};

/// February 2026 of the demo schedule, starting right at the minimum operative balance.
pub struct ScenarioRecurringMonth {}

impl ScenarioRecurringMonth {
    pub fn new() -> Self {
        Self {}
    }
}

impl TestScenarioBuilder for ScenarioRecurringMonth {
    fn get_scenario(&self) -> Result<TestScenario> {
        let today = date(2026, 2, 1);
        let ledger = demo_schedule().to_ledger(today, date(2026, 2, 28), today)?;

        // Feb 1:  5,000,000 - 4,500,000 rent                  =    500,000
        // Feb 2:  + 6,500,000 sales                           =  7,000,000
        // Feb 5:  + 6,500,000 sales - 12,000,000 payroll      =  1,500,000
        // Feb 9:  + 6,500,000 sales                           =  8,000,000
        // Feb 12, 16, 19, 23, 26: + 6,500,000 each; Feb 15, 28: + 15,000,000 each
        let expected: AssertResult = vec![
            (date(2026, 2, 1), amount(500_000), RiskStatus::Warning),
            (date(2026, 2, 2), amount(7_000_000), RiskStatus::Normal),
            (date(2026, 2, 5), amount(1_500_000), RiskStatus::Warning),
            (date(2026, 2, 9), amount(8_000_000), RiskStatus::Normal),
            (date(2026, 2, 15), amount(29_500_000), RiskStatus::Normal),
            (date(2026, 2, 28), amount(70_500_000), RiskStatus::Normal),
        ];

        Ok(TestScenario {
            ledger,
            reference_date: today,
            horizon_days: 28,
            starting_balance: amount(5_000_000),
            policy: RiskPolicy::new(amount(5_000_000)),
            expected,
            expected_alerts: vec![
                (date(2026, 2, 1), AlertType::Warning, amount(500_000)),
                (date(2026, 2, 5), AlertType::Warning, amount(1_500_000)),
                (date(2026, 2, 6), AlertType::Warning, amount(1_500_000)),
                (date(2026, 2, 7), AlertType::Warning, amount(1_500_000)),
                (date(2026, 2, 8), AlertType::Warning, amount(1_500_000)),
            ],
        })
    }
}
