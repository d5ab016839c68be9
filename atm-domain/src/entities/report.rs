// Report entity
// One user-submitted assertion that an ATM was found empty

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::errors::StoreError;
use crate::value_objects::ANONYMOUS_REPORTER;

pub const LOCATION_REQUIRED: &str = "location required";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportEvent {
    pub id: i64,
    pub location: String,
    pub reported_by: String,
    pub timestamp: NaiveDateTime,
    pub created_at: NaiveDateTime,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateReportRequest {
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub reported_by: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CreateReportResponse {
    pub success: bool,
    pub report: ReportEvent,
}

/// Feed entry: the stored event plus a human readable age relative to now.
#[derive(Debug, Clone, Serialize)]
pub struct ReportFeedEntry {
    #[serde(flatten)]
    pub report: ReportEvent,
    pub age: String,
}

/// Trims the location and rejects it when nothing is left.
pub fn normalize_location(raw: &str) -> Result<String, StoreError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(StoreError::Validation(LOCATION_REQUIRED.to_string()));
    }
    Ok(trimmed.to_string())
}

pub fn normalize_reporter(raw: Option<&str>) -> String {
    raw.map(str::trim)
        .filter(|value| !value.is_empty())
        .map(ToString::to_string)
        .unwrap_or_else(|| ANONYMOUS_REPORTER.to_string())
}
