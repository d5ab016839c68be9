// Chart series entities

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Bucket label to event count, holding only buckets that saw activity.
pub type SparseCounts = BTreeMap<String, u64>;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChartPoint {
    pub time: String,
    pub reports: u64,
}

impl ChartPoint {
    pub fn new(time: impl Into<String>, reports: u64) -> Self {
        Self {
            time: time.into(),
            reports,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct ChartQuery {
    pub mode: Option<String>,
}
