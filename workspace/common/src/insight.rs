use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub enum RiskLevelDto {
    #[serde(rename = "LOW")]
    Low,
    #[serde(rename = "MEDIUM")]
    Medium,
    #[serde(rename = "HIGH")]
    High,
    #[serde(rename = "N/A")]
    NotAvailable,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct InsightReportDto {
    /// Name of the provider that produced the report.
    pub provider: String,
    pub summary: String,
    pub recommendations: Vec<String>,
    pub risk_level: RiskLevelDto,
    pub available: bool,
}
