use axum::routing::{get, post};
use axum::Router;

use atm_application::AppState;

use crate::error::HttpError;
use crate::handlers::{ops_handlers, report_handlers, stats_handlers};

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route(
            "/api/reports",
            post(report_handlers::create_report).get(report_handlers::list_reports),
        )
        .route("/api/chart", get(report_handlers::chart_data))
        .route("/api/locations", get(stats_handlers::list_locations))
        .route(
            "/api/stats/top-locations",
            get(stats_handlers::top_locations),
        )
        .route("/api/stats/summary", get(stats_handlers::summary))
        .route("/api/ops/health/live", get(ops_handlers::health_live))
        .route("/api/ops/health/ready", get(ops_handlers::health_ready))
        .route(
            "/api/ops/metrics/prometheus",
            get(ops_handlers::metrics_prometheus),
        )
        .fallback(|| async { HttpError::NotFound })
        .with_state(state)
}
