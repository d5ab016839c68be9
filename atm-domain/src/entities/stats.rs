use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocationCount {
    pub location: String,
    pub count: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportSummary {
    pub total_reports: u64,
    pub unique_locations: u64,
    pub reports_last_24h: u64,
}

#[derive(Debug, Deserialize)]
pub struct TopLocationsQuery {
    pub limit: Option<usize>,
}
