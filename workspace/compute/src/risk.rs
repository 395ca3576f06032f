use model::RiskStatus;
use rust_decimal::Decimal;

/// Minimum operative balance used when none is configured.
pub const DEFAULT_MIN_OPERATIVE_BALANCE: i64 = 5_000_000;

/// Classifies a projected final balance.
///
/// Only strictly negative balances are critical; zero is compared against the
/// minimum operative balance like any other non-negative value, and a balance
/// exactly at the minimum is normal.
pub fn classify(final_balance: Decimal, min_operative_balance: Decimal) -> RiskStatus {
    if final_balance < Decimal::ZERO {
        RiskStatus::Critical
    } else if final_balance < min_operative_balance {
        RiskStatus::Warning
    } else {
        RiskStatus::Normal
    }
}

/// Liquidity thresholds applied to every projected day.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RiskPolicy {
    min_operative_balance: Decimal,
}

impl RiskPolicy {
    pub fn new(min_operative_balance: Decimal) -> Self {
        Self {
            min_operative_balance,
        }
    }

    pub fn min_operative_balance(&self) -> Decimal {
        self.min_operative_balance
    }

    pub fn classify(&self, final_balance: Decimal) -> RiskStatus {
        classify(final_balance, self.min_operative_balance)
    }
}

impl Default for RiskPolicy {
    fn default() -> Self {
        Self::new(Decimal::from(DEFAULT_MIN_OPERATIVE_BALANCE))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_negative_balance_is_critical() {
        let min = Decimal::new(500_000, 0);
        assert_eq!(classify(Decimal::new(-1, 0), min), RiskStatus::Critical);
        assert_eq!(classify(Decimal::new(-1, 2), min), RiskStatus::Critical);
    }

    #[test]
    fn test_zero_is_never_critical() {
        assert_eq!(
            classify(Decimal::ZERO, Decimal::new(500_000, 0)),
            RiskStatus::Warning
        );
        assert_eq!(classify(Decimal::ZERO, Decimal::ZERO), RiskStatus::Normal);
    }

    #[test]
    fn test_minimum_boundary() {
        let min = Decimal::new(500_000, 0);
        assert_eq!(classify(min, min), RiskStatus::Normal);
        assert_eq!(classify(min - Decimal::ONE, min), RiskStatus::Warning);
        assert_eq!(classify(min + Decimal::ONE, min), RiskStatus::Normal);
    }

    #[test]
    fn test_policy_uses_configured_minimum() {
        let policy = RiskPolicy::new(Decimal::new(1_000, 0));
        assert_eq!(policy.classify(Decimal::new(999, 0)), RiskStatus::Warning);
        assert_eq!(policy.classify(Decimal::new(1_000, 0)), RiskStatus::Normal);
    }

    #[test]
    fn test_default_policy() {
        assert_eq!(
            RiskPolicy::default().min_operative_balance(),
            Decimal::new(5_000_000, 0)
        );
    }
}
