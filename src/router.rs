use crate::handlers::{
    alerts::get_alerts,
    health::health_check,
    insights::get_insights,
    ledger::get_ledger,
    projections::{get_projection_rollup, get_projections, simulate_projection},
    summary::get_summary,
};
use crate::schemas::{ApiDoc, AppState};
use axum::{
    Router,
    routing::{get, post},
};
use std::time::Duration;
use tower::ServiceBuilder;
use tower_http::{
    compression::CompressionLayer, cors::CorsLayer, timeout::TimeoutLayer, trace::TraceLayer,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

/// Create application router with all routes and middleware
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Health check
        .route("/health", get(health_check))
        // Ledger
        .route("/api/v1/ledger", get(get_ledger))
        // Projections
        .route("/api/v1/projections", get(get_projections))
        .route("/api/v1/projections/rollup", get(get_projection_rollup))
        .route("/api/v1/projections/simulate", post(simulate_projection))
        // Derived views
        .route("/api/v1/alerts", get(get_alerts))
        .route("/api/v1/summary", get(get_summary))
        .route("/api/v1/insights", get(get_insights))
        // Swagger UI
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        // Add middleware
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CompressionLayer::new())
                .layer(TimeoutLayer::new(Duration::from_secs(30)))
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}
