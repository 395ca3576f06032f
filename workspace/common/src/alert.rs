use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AlertTypeDto {
    Critical,
    Warning,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct AlertDto {
    /// Stable per date and type, e.g. `alert-2026-03-05-critical`.
    pub id: String,
    pub timestamp: DateTime<Utc>,
    #[serde(rename = "type")]
    pub alert_type: AlertTypeDto,
    pub message: String,
    /// Deficit size for critical alerts, the balance itself for warnings.
    #[schema(value_type = String)]
    pub amount: Decimal,
    pub critical_date: NaiveDate,
}
