use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::Json;

use atm_application::commands::report_commands;
use atm_application::queries::{chart_queries, report_queries};
use atm_application::AppState;
use atm_domain::{ChartPoint, ChartQuery, CreateReportRequest, CreateReportResponse, ReportFeedEntry};

use crate::error::HttpError;

pub async fn create_report(
    State(state): State<AppState>,
    Json(payload): Json<CreateReportRequest>,
) -> Result<(StatusCode, Json<CreateReportResponse>), HttpError> {
    let report = report_commands::create_report(&state, payload).await?;
    Ok((
        StatusCode::CREATED,
        Json(CreateReportResponse {
            success: true,
            report,
        }),
    ))
}

pub async fn list_reports(State(state): State<AppState>) -> Json<Vec<ReportFeedEntry>> {
    Json(report_queries::get_report_feed(&state).await)
}

pub async fn chart_data(
    State(state): State<AppState>,
    Query(query): Query<ChartQuery>,
) -> Json<Vec<ChartPoint>> {
    Json(chart_queries::get_chart_data_for(&state, query.mode.as_deref()).await)
}
