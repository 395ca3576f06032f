use std::fmt;

/// Coarse risk label attached to an insight report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RiskLevel {
    Low,
    Medium,
    High,
    /// No analysis could be produced.
    NotAvailable,
}

impl RiskLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::Low => "LOW",
            RiskLevel::Medium => "MEDIUM",
            RiskLevel::High => "HIGH",
            RiskLevel::NotAvailable => "N/A",
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Free-text reading of a projection produced by an insight collaborator.
#[derive(Debug, Clone, PartialEq)]
pub struct InsightReport {
    pub summary: String,
    pub recommendations: Vec<String>,
    pub risk_level: RiskLevel,
    /// False when the report is a placeholder for a failed or missing analysis.
    pub available: bool,
}

impl InsightReport {
    /// Placeholder report used when no analysis could be produced.
    pub fn unavailable(reason: impl Into<String>) -> Self {
        Self {
            summary: reason.into(),
            recommendations: vec![
                "Check the insight provider configuration".to_string(),
                "Review the projection table manually".to_string(),
            ],
            risk_level: RiskLevel::NotAvailable,
            available: false,
        }
    }
}
