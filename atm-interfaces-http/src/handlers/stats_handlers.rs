use axum::extract::{Query, State};
use axum::Json;

use atm_application::queries::stats_queries;
use atm_application::AppState;
use atm_domain::{LocationCount, ReportSummary, TopLocationsQuery};

pub async fn top_locations(
    State(state): State<AppState>,
    Query(query): Query<TopLocationsQuery>,
) -> Json<Vec<LocationCount>> {
    Json(stats_queries::list_top_locations(&state, query).await)
}

pub async fn summary(State(state): State<AppState>) -> Json<ReportSummary> {
    Json(stats_queries::get_summary(&state).await)
}

pub async fn list_locations(State(state): State<AppState>) -> Json<Vec<String>> {
    Json(stats_queries::list_known_locations(&state))
}
