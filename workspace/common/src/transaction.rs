use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransactionTypeDto {
    Income,
    Expense,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, ToSchema, PartialEq, Eq, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransactionStatusDto {
    #[default]
    Pending,
    Completed,
    Overdue,
    Processed,
}

/// A ledger entry as exchanged over the wire and stored in ledger files.
///
/// `date` is kept as a `YYYY-MM-DD` string so malformed dates surface as
/// validation errors instead of deserialization failures.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct TransactionDto {
    pub id: String,
    #[schema(example = "2026-03-05")]
    pub date: String,
    /// Non-negative decimal amount, serialized as a string.
    #[schema(value_type = String, example = "12000000")]
    pub amount: Decimal,
    #[serde(rename = "type")]
    pub kind: TransactionTypeDto,
    #[serde(default)]
    pub status: TransactionStatusDto,
    #[serde(default)]
    pub entity: String,
    #[serde(default)]
    pub responsible: String,
    #[serde(default)]
    pub concept: String,
}
