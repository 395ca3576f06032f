use axum::{
    extract::{Query, State},
    response::Json,
};
use axum_valid::Valid;
use common::AlertDto;
use compute::detect_alerts;
use tracing::{debug, instrument};

use crate::handlers::projections::{cached_projection, resolve_query};
use crate::helpers::converters::alert_to_dto;
use crate::schemas::{ApiError, ApiResponse, AppState, ErrorResponse, ProjectionQuery};

/// Get the liquidity alerts raised by the projection
///
/// One alert per critical or warning day, in date order.
#[utoipa::path(
    get,
    path = "/api/v1/alerts",
    tag = "alerts",
    params(ProjectionQuery),
    responses(
        (status = 200, description = "Alerts computed successfully", body = ApiResponse<Vec<AlertDto>>),
        (status = 400, description = "Invalid projection parameters", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn get_alerts(
    Valid(Query(query)): Valid<Query<ProjectionQuery>>,
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<AlertDto>>>, ApiError> {
    let params = resolve_query(query, &state.settings)?;
    let projections = cached_projection(&state, &params).await?;

    let alerts: Vec<AlertDto> = detect_alerts(&projections).iter().map(alert_to_dto).collect();
    debug!("Returning {} alerts", alerts.len());

    let message = if alerts.is_empty() {
        "No liquidity alerts in the projection".to_string()
    } else {
        format!("{} liquidity alerts detected", alerts.len())
    };
    Ok(Json(ApiResponse::ok(alerts, message)))
}
