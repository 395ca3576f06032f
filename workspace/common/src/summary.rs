use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::alert::AlertDto;

/// Dashboard headline figures.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct CashFlowSummaryDto {
    pub reference_date: NaiveDate,
    pub horizon_days: i64,
    #[schema(value_type = String)]
    pub current_liquidity: Decimal,
    pub window_days: usize,
    #[schema(value_type = String)]
    pub incomes: Decimal,
    #[schema(value_type = String)]
    pub expenses: Decimal,
    #[schema(value_type = Option<String>)]
    pub lowest_balance: Option<Decimal>,
    pub lowest_balance_date: Option<NaiveDate>,
    pub critical_days: usize,
    pub warning_days: usize,
    pub first_critical_date: Option<NaiveDate>,
    /// Nearest-future deficit alert, if any.
    pub first_critical_alert: Option<AlertDto>,
}
