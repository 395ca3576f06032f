use axum::{http::StatusCode, response::Json};
use chrono::NaiveDate;
use common::{
    AlertDto, AlertTypeDto, CashFlowSummaryDto, DateRange, InsightReportDto, PeriodBucketDto,
    ProjectionPoint, ProjectionTimeseries, RiskLevelDto, RiskStatusDto, SimulationRequest,
    SimulationResponse, TransactionDto, TransactionStatusDto, TransactionTypeDto,
};
use compute::Ledger;
use compute::insight::InsightProvider;
use model::DailyProjection;
use moka::future::Cache;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;
use utoipa::{IntoParams, OpenApi, ToSchema};
use validator::Validate;

use crate::config::Settings;

pub use common::ApiResponse;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub settings: Arc<Settings>,
    /// Ledger served by the read endpoints, immutable for the process lifetime
    pub ledger: Arc<Ledger>,
    /// Cache for expensive operations
    pub cache: Cache<String, CachedData>,
    pub insights: Arc<dyn InsightProvider>,
}

impl fmt::Debug for AppState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppState")
            .field("settings", &self.settings)
            .field("ledger_size", &self.ledger.len())
            .field("cache_entries", &self.cache.entry_count())
            .field("insights", &self.insights.name())
            .finish()
    }
}

/// Cached data types
#[derive(Clone, Debug)]
pub enum CachedData {
    Projection(Arc<Vec<DailyProjection>>),
}

/// Error half of every handler result.
pub type ApiError = (StatusCode, Json<ErrorResponse>);

/// Projection parameters; omitted values fall back to the configuration.
#[derive(Debug, Default, Deserialize, IntoParams, Validate)]
#[into_params(parameter_in = Query)]
pub struct ProjectionQuery {
    /// Number of projected days, including the reference date
    #[validate(range(min = 1, max = 3660))]
    pub horizon_days: Option<i64>,
    /// Balance before the first projected day
    #[param(value_type = Option<String>)]
    pub starting_balance: Option<Decimal>,
    /// Warning threshold
    #[param(value_type = Option<String>)]
    pub min_operative_balance: Option<Decimal>,
    /// Day 0 of the projection (YYYY-MM-DD), defaults to today
    pub reference_date: Option<NaiveDate>,
}

/// Rollup bucket size
#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct RollupQuery {
    /// `daily`, `weekly` or `monthly` (default: `daily`)
    pub period: Option<String>,
}

/// Ledger listing filter
#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct LedgerQuery {
    /// Earliest settlement date (YYYY-MM-DD), inclusive
    pub start_date: Option<NaiveDate>,
    /// Latest settlement date (YYYY-MM-DD), inclusive
    pub end_date: Option<NaiveDate>,
}

/// Error response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
    /// Error code
    pub code: String,
    /// Success status (always false for errors)
    pub success: bool,
}

/// Health check response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    /// Service status
    pub status: String,
    /// Service version
    pub version: String,
    /// Number of transactions in the served ledger
    pub ledger_transactions: usize,
    /// Earliest settlement date in the served ledger
    pub ledger_start: Option<NaiveDate>,
    /// Latest settlement date in the served ledger. Projected days after it
    /// carry the balance forward unchanged.
    pub ledger_end: Option<NaiveDate>,
    /// Active insight provider
    pub insight_provider: String,
}

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        crate::handlers::health::health_check,
        crate::handlers::ledger::get_ledger,
        crate::handlers::projections::get_projections,
        crate::handlers::projections::get_projection_rollup,
        crate::handlers::projections::simulate_projection,
        crate::handlers::alerts::get_alerts,
        crate::handlers::summary::get_summary,
        crate::handlers::insights::get_insights,
    ),
    components(
        schemas(
            ErrorResponse,
            HealthResponse,
            TransactionDto,
            TransactionTypeDto,
            TransactionStatusDto,
            ProjectionTimeseries,
            ProjectionPoint,
            RiskStatusDto,
            DateRange,
            PeriodBucketDto,
            AlertDto,
            AlertTypeDto,
            CashFlowSummaryDto,
            InsightReportDto,
            RiskLevelDto,
            SimulationRequest,
            SimulationResponse,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "ledger", description = "Ledger listing endpoints"),
        (name = "projections", description = "Daily balance projection endpoints"),
        (name = "alerts", description = "Liquidity alert endpoints"),
        (name = "summary", description = "Dashboard summary endpoints"),
        (name = "insights", description = "Projection analysis endpoints"),
    ),
    info(
        title = "Cashflow API",
        description = "Cash-flow projection service: daily balance forecasts, liquidity risk classification and alerts",
        version = "0.1.0",
        license(
            name = "MIT",
            url = "https://opensource.org/licenses/MIT"
        )
    )
)]
pub struct ApiDoc;
