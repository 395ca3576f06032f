use axum::{
    extract::{Query, State},
    response::Json,
};
use common::TransactionDto;
use tracing::{debug, instrument, trace};

use crate::helpers::converters::transaction_to_dto;
use crate::helpers::errors::bad_request;
use crate::schemas::{ApiError, ApiResponse, AppState, ErrorResponse, LedgerQuery};

/// List ledger transactions ordered by settlement date
#[utoipa::path(
    get,
    path = "/api/v1/ledger",
    tag = "ledger",
    params(LedgerQuery),
    responses(
        (status = 200, description = "Ledger transactions retrieved successfully", body = ApiResponse<Vec<TransactionDto>>),
        (status = 400, description = "Invalid date range", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn get_ledger(
    Query(query): Query<LedgerQuery>,
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<TransactionDto>>>, ApiError> {
    trace!("Entering get_ledger function");

    if let (Some(start), Some(end)) = (query.start_date, query.end_date) {
        if start > end {
            return Err(bad_request(format!(
                "start_date {} is after end_date {}",
                start, end
            )));
        }
    }

    let transactions: Vec<TransactionDto> = state
        .ledger
        .between(query.start_date, query.end_date)
        .into_iter()
        .map(transaction_to_dto)
        .collect();
    debug!("Returning {} ledger transactions", transactions.len());

    Ok(Json(ApiResponse::ok(
        transactions,
        "Ledger transactions retrieved successfully",
    )))
}
