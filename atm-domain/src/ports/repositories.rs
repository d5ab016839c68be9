use async_trait::async_trait;
use chrono::NaiveDateTime;

use crate::entities::{ReportEvent, SparseCounts};
use crate::errors::StoreError;

/// Append-only store of report events. Timestamps are local wall-clock time.
#[async_trait]
pub trait ReportRepository: Send + Sync {
    /// Stamps the event with the store's clock; `location` must be non-empty after trimming.
    async fn append(&self, location: &str, reported_by: &str) -> Result<ReportEvent, StoreError>;

    /// Newest first.
    async fn list_all(&self) -> Result<Vec<ReportEvent>, StoreError>;

    /// Hour label (`"00".."23"`) to count for events at or after `now - window_hours`.
    async fn count_by_hour_of_day(
        &self,
        now: NaiveDateTime,
        window_hours: u32,
    ) -> Result<SparseCounts, StoreError>;

    /// ISO date to count for events at or after `now - window_days`.
    async fn count_by_day(
        &self,
        now: NaiveDateTime,
        window_days: u32,
    ) -> Result<SparseCounts, StoreError>;

    async fn count(&self) -> Result<u64, StoreError>;
    async fn ping(&self) -> Result<(), StoreError>;
}
