//! Insight collaborators reading a finished projection.
//!
//! Providers are read-only consumers of the projection; their failure never
//! affects projections or alerts, callers fall back to
//! [`InsightReport::unavailable`].

use async_trait::async_trait;
use model::{DailyProjection, InsightReport, RiskLevel, RiskStatus};
use tracing::{debug, instrument};

use crate::error::{ComputeError, Result};
use crate::summary::{DEFAULT_SUMMARY_WINDOW_DAYS, summarize};

/// Produces a free-text reading of a projection.
#[async_trait]
pub trait InsightProvider: Send + Sync {
    /// Short provider name used in logs and responses.
    fn name(&self) -> &'static str;

    /// Analyses the projection.
    async fn generate(&self, projections: &[DailyProjection]) -> Result<InsightReport>;
}

/// Deterministic provider deriving its reading from alert counts.
#[derive(Debug, Clone, Copy)]
pub struct RuleBasedInsights {
    window_days: usize,
}

impl RuleBasedInsights {
    pub fn new(window_days: usize) -> Self {
        Self { window_days }
    }
}

impl Default for RuleBasedInsights {
    fn default() -> Self {
        Self::new(DEFAULT_SUMMARY_WINDOW_DAYS)
    }
}

#[async_trait]
impl InsightProvider for RuleBasedInsights {
    fn name(&self) -> &'static str {
        "rule-based"
    }

    #[instrument(skip(self, projections), fields(days = projections.len()))]
    async fn generate(&self, projections: &[DailyProjection]) -> Result<InsightReport> {
        if projections.is_empty() {
            return Err(ComputeError::Insight(
                "No projected days to analyse".to_string(),
            ));
        }

        let summary = summarize(projections, self.window_days)?;
        let worst = projections
            .iter()
            .map(|p| p.status)
            .max()
            .unwrap_or(RiskStatus::Normal);
        let risk_level = match worst {
            RiskStatus::Critical => RiskLevel::High,
            RiskStatus::Warning => RiskLevel::Medium,
            RiskStatus::Normal => RiskLevel::Low,
        };

        let mut text = format!(
            "Over the next {} days the balance moves from {} to {}.",
            projections.len(),
            summary.current_liquidity,
            projections[projections.len() - 1].final_balance
        );
        if let (Some(lowest), Some(lowest_date)) =
            (summary.lowest_balance, summary.lowest_balance_date)
        {
            text.push_str(&format!(" Lowest projected balance is {} on {}.", lowest, lowest_date));
        }
        match summary.first_critical_date {
            Some(first) => text.push_str(&format!(
                " {} deficit days projected, the first on {}.",
                summary.critical_days, first
            )),
            None if summary.warning_days > 0 => text.push_str(&format!(
                " {} days fall below the minimum operative balance.",
                summary.warning_days
            )),
            None => text.push_str(" Liquidity stays above the minimum operative balance."),
        }

        let recommendations = match risk_level {
            RiskLevel::High => vec![
                "Negotiate payment dates for expenses scheduled before the first deficit day"
                    .to_string(),
                "Accelerate collection of pending receivables".to_string(),
                "Arrange a short-term credit line covering the largest deficit".to_string(),
            ],
            RiskLevel::Medium => vec![
                "Postpone non-essential expenses in low-balance weeks".to_string(),
                "Follow up pending income due in the projection window".to_string(),
                "Review the minimum operative balance against upcoming payroll".to_string(),
            ],
            _ => vec![
                "Place surplus cash in short-term deposits".to_string(),
                "Keep monitoring recurring expense growth".to_string(),
                "Re-run the projection after each ledger update".to_string(),
            ],
        };

        debug!("Generated {} insight report", risk_level);
        Ok(InsightReport {
            summary: text,
            recommendations,
            risk_level,
            available: true,
        })
    }
}

/// Provider used when analysis is switched off.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnavailableInsights;

#[async_trait]
impl InsightProvider for UnavailableInsights {
    fn name(&self) -> &'static str {
        "unavailable"
    }

    async fn generate(&self, _projections: &[DailyProjection]) -> Result<InsightReport> {
        Ok(InsightReport::unavailable(
            "Automatic analysis is not available, no insight provider is configured",
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::Ledger;
    use crate::projection::{ProjectionCalculator, ProjectionEngine};
    use crate::risk::RiskPolicy;
    use crate::testing::helpers::{amount, date, new_expense};

    fn projections(starting_balance: i64) -> Vec<DailyProjection> {
        let today = date(2026, 9, 1);
        let ledger = Ledger::new(vec![new_expense(date(2026, 9, 3), 600)]).unwrap();
        ProjectionEngine::new(today, RiskPolicy::new(amount(300)))
            .project(&ledger, 5, amount(starting_balance))
            .unwrap()
    }

    #[tokio::test]
    async fn test_rule_based_levels() {
        let provider = RuleBasedInsights::default();

        let high = provider.generate(&projections(500)).await.unwrap();
        assert_eq!(high.risk_level, RiskLevel::High);
        assert!(high.available);
        assert_eq!(high.recommendations.len(), 3);
        assert!(high.summary.contains("2026-09-03"));

        let medium = provider.generate(&projections(800)).await.unwrap();
        assert_eq!(medium.risk_level, RiskLevel::Medium);

        let low = provider.generate(&projections(2_000)).await.unwrap();
        assert_eq!(low.risk_level, RiskLevel::Low);
    }

    #[tokio::test]
    async fn test_rule_based_rejects_empty_projection() {
        let err = RuleBasedInsights::default().generate(&[]).await.unwrap_err();
        assert!(matches!(err, ComputeError::Insight(_)));
    }

    #[tokio::test]
    async fn test_unavailable_provider() {
        let report = UnavailableInsights.generate(&projections(500)).await.unwrap();
        assert!(!report.available);
        assert_eq!(report.risk_level, RiskLevel::NotAvailable);
    }
}
