use axum::{
    extract::{Query, State},
    response::Json,
};
use axum_valid::Valid;
use common::InsightReportDto;
use model::InsightReport;
use tracing::{debug, instrument, warn};

use crate::handlers::projections::{cached_projection, resolve_query};
use crate::helpers::converters::insight_to_dto;
use crate::schemas::{ApiError, ApiResponse, AppState, ErrorResponse, ProjectionQuery};

/// Get an analysis of the projection
///
/// Provider failures and timeouts degrade to a report with `available = false`;
/// they never fail the request.
#[utoipa::path(
    get,
    path = "/api/v1/insights",
    tag = "insights",
    params(ProjectionQuery),
    responses(
        (status = 200, description = "Insight report produced", body = ApiResponse<InsightReportDto>),
        (status = 400, description = "Invalid projection parameters", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn get_insights(
    Valid(Query(query)): Valid<Query<ProjectionQuery>>,
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<InsightReportDto>>, ApiError> {
    let params = resolve_query(query, &state.settings)?;
    let projections = cached_projection(&state, &params).await?;

    let provider = state.insights.name();
    let timeout = state.settings.insight_timeout();
    let report = match tokio::time::timeout(timeout, state.insights.generate(&projections)).await {
        Ok(Ok(report)) => report,
        Ok(Err(e)) => {
            warn!("Insight provider {} failed: {}", provider, e);
            InsightReport::unavailable(format!("Automatic analysis failed: {}", e))
        }
        Err(_) => {
            warn!("Insight provider {} timed out after {:?}", provider, timeout);
            InsightReport::unavailable("Automatic analysis timed out")
        }
    };
    debug!("Insight report available: {}", report.available);

    let message = if report.available {
        "Insight report generated successfully"
    } else {
        "Insight report not available"
    };
    Ok(Json(ApiResponse::ok(insight_to_dto(provider, report), message)))
}
