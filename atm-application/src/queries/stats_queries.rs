use crate::queries::report_queries;
use crate::AppState;
use atm_domain::{summarize, top_locations, LocationCount, ReportSummary, TopLocationsQuery};

const MAX_TOP_LOCATIONS: usize = 100;

pub async fn list_top_locations(state: &AppState, query: TopLocationsQuery) -> Vec<LocationCount> {
    let limit = query
        .limit
        .unwrap_or(state.config.top_locations_limit)
        .clamp(1, MAX_TOP_LOCATIONS);
    let reports = report_queries::get_reports(state).await;
    top_locations(&reports, limit)
}

pub async fn get_summary(state: &AppState) -> ReportSummary {
    let reports = report_queries::get_reports(state).await;
    summarize(&reports, state.clock.now())
}

pub fn list_known_locations(state: &AppState) -> Vec<String> {
    state.config.known_locations.clone()
}
