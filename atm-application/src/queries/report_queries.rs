use tracing::error;

use crate::AppState;
use atm_domain::{to_feed, ReportEvent, ReportFeedEntry};

/// All reports, newest first. Read failures are logged and yield an empty list.
pub async fn get_reports(state: &AppState) -> Vec<ReportEvent> {
    match state.report_repo.list_all().await {
        Ok(reports) => reports,
        Err(err) => {
            state.metrics.record_read_failure();
            error!("failed to fetch reports: {}", err);
            Vec::new()
        }
    }
}

/// Recent activity feed with ages relative to the current clock.
pub async fn get_report_feed(state: &AppState) -> Vec<ReportFeedEntry> {
    let reports = get_reports(state).await;
    to_feed(reports, state.clock.now())
}
