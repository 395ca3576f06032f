use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::fmt;

/// Liquidity risk of a projected day.
///
/// Variants are ordered by severity so the worst status of a group of days
/// is simply the maximum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum RiskStatus {
    /// Final balance at or above the minimum operative balance.
    Normal,
    /// Final balance non-negative but below the minimum operative balance.
    Warning,
    /// Final balance strictly negative.
    Critical,
}

impl RiskStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskStatus::Normal => "NORMAL",
            RiskStatus::Warning => "WARNING",
            RiskStatus::Critical => "CRITICAL",
        }
    }
}

impl fmt::Display for RiskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One simulated day of the balance projection.
#[derive(Debug, Clone, PartialEq)]
pub struct DailyProjection {
    pub date: NaiveDate,
    /// Balance carried in from the previous day, or the starting balance on day 0.
    pub initial_balance: Decimal,
    /// Sum of the day's income amounts.
    pub incomes: Decimal,
    /// Sum of the day's expense amounts.
    pub expenses: Decimal,
    /// `initial_balance + incomes - expenses`
    pub final_balance: Decimal,
    pub status: RiskStatus,
}
