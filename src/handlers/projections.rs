use axum::{
    extract::{Query, State},
    response::Json,
};
use axum_valid::Valid;
use chrono::NaiveDate;
use common::{PeriodBucketDto, ProjectionTimeseries, SimulationRequest, SimulationResponse};
use compute::risk::RiskPolicy;
use compute::rollup::{Period, rollup};
use compute::{Ledger, ProjectionCalculator, detect_alerts, engine_with_policy};
use model::DailyProjection;
use rust_decimal::Decimal;
use std::sync::Arc;
use tracing::{debug, info, instrument, trace};

use crate::config::{MAX_HORIZON_DAYS, Settings};
use crate::helpers::converters::{
    ProjectionParams, alert_to_dto, bucket_to_dto, dto_to_transaction, projections_to_timeseries,
};
use crate::helpers::errors::{bad_request, compute_error_response};
use crate::schemas::{
    ApiError, ApiResponse, AppState, CachedData, ErrorResponse, ProjectionQuery, RollupQuery,
};

/// Fills the omitted parameters from the configuration.
pub(crate) fn resolve_params(
    horizon_days: Option<i64>,
    starting_balance: Option<Decimal>,
    min_operative_balance: Option<Decimal>,
    reference_date: Option<NaiveDate>,
    settings: &Settings,
) -> Result<ProjectionParams, ApiError> {
    let params = ProjectionParams {
        reference_date: reference_date.unwrap_or_else(|| settings.today()),
        horizon_days: horizon_days.unwrap_or(settings.horizon_days),
        starting_balance: starting_balance.unwrap_or(settings.starting_balance),
        min_operative_balance: min_operative_balance.unwrap_or(settings.min_operative_balance),
    };

    if params.horizon_days > MAX_HORIZON_DAYS {
        return Err(bad_request(format!(
            "horizon_days must not exceed {}, got {}",
            MAX_HORIZON_DAYS, params.horizon_days
        )));
    }
    if params.min_operative_balance < Decimal::ZERO {
        return Err(bad_request(format!(
            "min_operative_balance must not be negative, got {}",
            params.min_operative_balance
        )));
    }
    Ok(params)
}

pub(crate) fn resolve_query(
    query: ProjectionQuery,
    settings: &Settings,
) -> Result<ProjectionParams, ApiError> {
    resolve_params(
        query.horizon_days,
        query.starting_balance,
        query.min_operative_balance,
        query.reference_date,
        settings,
    )
}

fn run_projection(
    ledger: &Ledger,
    params: &ProjectionParams,
) -> Result<Vec<DailyProjection>, ApiError> {
    engine_with_policy(
        Some(params.reference_date),
        RiskPolicy::new(params.min_operative_balance),
    )
    .project(ledger, params.horizon_days, params.starting_balance)
    .map_err(compute_error_response)
}

/// Projection of the served ledger, memoized per parameter set.
pub(crate) async fn cached_projection(
    state: &AppState,
    params: &ProjectionParams,
) -> Result<Arc<Vec<DailyProjection>>, ApiError> {
    let cache_key = params.cache_key();

    if let Some(CachedData::Projection(projections)) = state.cache.get(&cache_key).await {
        trace!("Projection cache hit: {}", cache_key);
        return Ok(projections);
    }

    let projections = Arc::new(run_projection(&state.ledger, params)?);
    if let (Some(last_day), Some((_, ledger_end))) = (projections.last(), state.ledger.date_range()) {
        if last_day.date > ledger_end {
            debug!(
                "Projection to {} runs past the ledger coverage ending {}",
                last_day.date, ledger_end
            );
        }
    }
    state
        .cache
        .insert(cache_key, CachedData::Projection(projections.clone()))
        .await;
    Ok(projections)
}

/// Get the daily balance projection of the served ledger
#[utoipa::path(
    get,
    path = "/api/v1/projections",
    tag = "projections",
    params(ProjectionQuery),
    responses(
        (status = 200, description = "Projection computed successfully", body = ApiResponse<ProjectionTimeseries>),
        (status = 400, description = "Invalid projection parameters", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn get_projections(
    Valid(Query(query)): Valid<Query<ProjectionQuery>>,
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<ProjectionTimeseries>>, ApiError> {
    trace!("Entering get_projections function");
    let params = resolve_query(query, &state.settings)?;
    let projections = cached_projection(&state, &params).await?;
    debug!("Projected {} days from {}", projections.len(), params.reference_date);

    Ok(Json(ApiResponse::ok(
        projections_to_timeseries(&params, &projections),
        "Projection computed successfully",
    )))
}

/// Get the projection aggregated into daily, weekly or monthly buckets
#[utoipa::path(
    get,
    path = "/api/v1/projections/rollup",
    tag = "projections",
    params(ProjectionQuery, RollupQuery),
    responses(
        (status = 200, description = "Projection rollup computed successfully", body = ApiResponse<Vec<PeriodBucketDto>>),
        (status = 400, description = "Invalid projection parameters or period", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn get_projection_rollup(
    Valid(Query(query)): Valid<Query<ProjectionQuery>>,
    Query(rollup_query): Query<RollupQuery>,
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<PeriodBucketDto>>>, ApiError> {
    trace!("Entering get_projection_rollup function");
    let period = match rollup_query.period.as_deref() {
        Some(value) => value.parse::<Period>().map_err(compute_error_response)?,
        None => Period::default(),
    };

    let params = resolve_query(query, &state.settings)?;
    let projections = cached_projection(&state, &params).await?;
    let buckets: Vec<PeriodBucketDto> = rollup(&projections, period)
        .map_err(compute_error_response)?
        .iter()
        .map(bucket_to_dto)
        .collect();

    Ok(Json(ApiResponse::ok(
        buckets,
        format!("Projection rolled up by {} period", period),
    )))
}

/// Project a caller-supplied ledger without touching the served one
#[utoipa::path(
    post,
    path = "/api/v1/projections/simulate",
    tag = "projections",
    request_body = SimulationRequest,
    responses(
        (status = 200, description = "Simulation computed successfully", body = ApiResponse<SimulationResponse>),
        (status = 400, description = "Invalid ledger or parameters", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state, request), fields(transactions = request.transactions.len()))]
pub async fn simulate_projection(
    State(state): State<AppState>,
    Json(request): Json<SimulationRequest>,
) -> Result<Json<ApiResponse<SimulationResponse>>, ApiError> {
    trace!("Entering simulate_projection function");
    let params = resolve_params(
        request.horizon_days,
        request.starting_balance,
        request.min_operative_balance,
        request.reference_date,
        &state.settings,
    )?;

    let transactions = request
        .transactions
        .into_iter()
        .map(dto_to_transaction)
        .collect::<compute::Result<Vec<_>>>()
        .map_err(compute_error_response)?;
    let ledger = Ledger::new(transactions).map_err(compute_error_response)?;

    let projections = run_projection(&ledger, &params)?;
    let alerts = detect_alerts(&projections);
    info!(
        "Simulated {} days over {} transactions, {} alerts",
        projections.len(),
        ledger.len(),
        alerts.len()
    );

    Ok(Json(ApiResponse::ok(
        SimulationResponse {
            projection: projections_to_timeseries(&params, &projections),
            alerts: alerts.iter().map(alert_to_dto).collect(),
        },
        "Simulation computed successfully",
    )))
}
