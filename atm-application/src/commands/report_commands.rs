use tracing::{error, info};

use crate::{AppError, AppState};
use atm_domain::{normalize_location, normalize_reporter, CreateReportRequest, ReportEvent, StoreError};

/// Validates and appends a report. Store failures are logged and reported to the
/// caller only as a generic creation failure.
pub async fn create_report(
    state: &AppState,
    request: CreateReportRequest,
) -> Result<ReportEvent, AppError> {
    let location = normalize_location(&request.location).map_err(|err| {
        state.metrics.record_validation_rejection();
        AppError::Validation(err.to_string())
    })?;
    let reported_by = normalize_reporter(request.reported_by.as_deref());

    match state.report_repo.append(&location, &reported_by).await {
        Ok(report) => {
            state.metrics.record_report_created();
            info!(
                report_id = report.id,
                location = %report.location,
                reported_by = %report.reported_by,
                "report created"
            );
            Ok(report)
        }
        Err(StoreError::Validation(message)) => {
            state.metrics.record_validation_rejection();
            Err(AppError::Validation(message))
        }
        Err(err) => {
            state.metrics.record_report_error();
            error!("failed to create report: {}", err);
            Err(AppError::ReportCreation)
        }
    }
}
