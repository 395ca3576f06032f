//! Common transport-layer types shared by the API handlers and the CLI.
//! These structs mirror the JSON payloads of the HTTP API so clients can
//! deserialize responses without duplicating shapes.

mod alert;
mod insight;
mod projection;
mod summary;
mod transaction;

pub use alert::{AlertDto, AlertTypeDto};
pub use insight::{InsightReportDto, RiskLevelDto};
pub use projection::{
    DateRange, PeriodBucketDto, ProjectionPoint, ProjectionTimeseries, RiskStatusDto,
    SimulationRequest, SimulationResponse,
};
pub use summary::CashFlowSummaryDto;
pub use transaction::{TransactionDto, TransactionStatusDto, TransactionTypeDto};

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Generic API response wrapper used by every successful endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ApiResponse<T> {
    /// Response data
    pub data: T,
    /// Response message
    pub message: String,
    /// Success flag
    pub success: bool,
}

impl<T> ApiResponse<T> {
    pub fn ok(data: T, message: impl Into<String>) -> Self {
        Self {
            data,
            message: message.into(),
            success: true,
        }
    }
}
