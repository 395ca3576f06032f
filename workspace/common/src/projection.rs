use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::alert::AlertDto;
use crate::transaction::TransactionDto;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RiskStatusDto {
    Normal,
    Warning,
    Critical,
}

/// Represents a date range
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct DateRange {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

impl DateRange {
    pub fn new(start_date: NaiveDate, end_date: NaiveDate) -> Self {
        Self {
            start_date,
            end_date,
        }
    }
}

/// One projected day.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct ProjectionPoint {
    pub date: NaiveDate,
    #[schema(value_type = String)]
    pub initial_balance: Decimal,
    #[schema(value_type = String)]
    pub incomes: Decimal,
    #[schema(value_type = String)]
    pub expenses: Decimal,
    #[schema(value_type = String)]
    pub final_balance: Decimal,
    pub status: RiskStatusDto,
}

/// A projection together with the parameters that produced it.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct ProjectionTimeseries {
    pub reference_date: NaiveDate,
    pub horizon_days: i64,
    #[schema(value_type = String)]
    pub starting_balance: Decimal,
    #[schema(value_type = String)]
    pub min_operative_balance: Decimal,
    pub date_range: DateRange,
    pub points: Vec<ProjectionPoint>,
}

impl ProjectionTimeseries {
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// Consecutive projected days folded into a weekly or monthly row.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct PeriodBucketDto {
    /// `daily`, `weekly` or `monthly`
    pub period: String,
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub days: usize,
    #[schema(value_type = String)]
    pub opening_balance: Decimal,
    #[schema(value_type = String)]
    pub incomes: Decimal,
    #[schema(value_type = String)]
    pub expenses: Decimal,
    #[schema(value_type = String)]
    pub closing_balance: Decimal,
    pub status: RiskStatusDto,
}

/// Projection request over a caller-supplied ledger.
///
/// Omitted parameters fall back to the server configuration.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct SimulationRequest {
    pub transactions: Vec<TransactionDto>,
    pub horizon_days: Option<i64>,
    #[schema(value_type = Option<String>)]
    pub starting_balance: Option<Decimal>,
    #[schema(value_type = Option<String>)]
    pub min_operative_balance: Option<Decimal>,
    pub reference_date: Option<NaiveDate>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct SimulationResponse {
    pub projection: ProjectionTimeseries,
    pub alerts: Vec<AlertDto>,
}
