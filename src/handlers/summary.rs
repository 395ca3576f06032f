use axum::{
    extract::{Query, State},
    response::Json,
};
use axum_valid::Valid;
use common::CashFlowSummaryDto;
use compute::summary::summarize;
use compute::{detect_alerts, first_critical};
use tracing::instrument;

use crate::handlers::projections::{cached_projection, resolve_query};
use crate::helpers::converters::summary_to_dto;
use crate::helpers::errors::compute_error_response;
use crate::schemas::{ApiError, ApiResponse, AppState, ErrorResponse, ProjectionQuery};

/// Get the dashboard summary of the projection
#[utoipa::path(
    get,
    path = "/api/v1/summary",
    tag = "summary",
    params(ProjectionQuery),
    responses(
        (status = 200, description = "Summary computed successfully", body = ApiResponse<CashFlowSummaryDto>),
        (status = 400, description = "Invalid projection parameters", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn get_summary(
    Valid(Query(query)): Valid<Query<ProjectionQuery>>,
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<CashFlowSummaryDto>>, ApiError> {
    let params = resolve_query(query, &state.settings)?;
    let projections = cached_projection(&state, &params).await?;

    let summary = summarize(&projections, state.settings.summary_window_days)
        .map_err(compute_error_response)?;
    let alerts = detect_alerts(&projections);

    Ok(Json(ApiResponse::ok(
        summary_to_dto(&params, summary, first_critical(&alerts)),
        "Summary computed successfully",
    )))
}
