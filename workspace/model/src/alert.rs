use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use std::fmt;

use crate::projection::RiskStatus;

/// Kind of threshold breach. Normal days never produce an alert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AlertType {
    Critical,
    Warning,
}

impl AlertType {
    pub fn as_str(&self) -> &'static str {
        match self {
            AlertType::Critical => "CRITICAL",
            AlertType::Warning => "WARNING",
        }
    }

    /// Maps a projected day's status to the alert it raises, if any.
    pub fn from_status(status: RiskStatus) -> Option<Self> {
        match status {
            RiskStatus::Critical => Some(AlertType::Critical),
            RiskStatus::Warning => Some(AlertType::Warning),
            RiskStatus::Normal => None,
        }
    }
}

impl fmt::Display for AlertType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A warning derived from one projected day.
#[derive(Debug, Clone, PartialEq)]
pub struct Alert {
    /// Stable identifier derived from the critical date and the alert type.
    pub id: String,
    /// When the detector ran.
    pub timestamp: DateTime<Utc>,
    pub alert_type: AlertType,
    pub message: String,
    /// Deficit magnitude for critical alerts, the final balance for warnings.
    pub amount: Decimal,
    pub critical_date: NaiveDate,
}

impl Alert {
    /// Builds the deterministic alert id for a date and type.
    pub fn id_for(date: NaiveDate, alert_type: AlertType) -> String {
        format!(
            "alert-{}-{}",
            date.format("%Y-%m-%d"),
            alert_type.as_str().to_lowercase()
        )
    }

    pub fn is_critical(&self) -> bool {
        self.alert_type == AlertType::Critical
    }
}
