// In-memory fixtures for application tests

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{Duration, NaiveDate, NaiveDateTime};

use atm_domain::{
    normalize_location, Clock, ReportEvent, ReportRepository, RuntimeConfig, SparseCounts,
    StoreError, DAY_FORMAT,
};

use crate::{AppState, Metrics};

pub fn fixed_now() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2026, 10, 18)
        .and_then(|d| d.and_hms_opt(14, 30, 0))
        .expect("fixed now")
}

pub struct FixedClock {
    now: Mutex<NaiveDateTime>,
}

impl FixedClock {
    pub fn new(now: NaiveDateTime) -> Self {
        Self {
            now: Mutex::new(now),
        }
    }

    pub fn advance(&self, by: Duration) {
        let mut now = self.now.lock().expect("clock lock");
        *now += by;
    }
}

impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        *self.now.lock().expect("clock lock")
    }
}

pub struct InMemoryReportRepository {
    clock: Arc<dyn Clock>,
    rows: Mutex<Vec<ReportEvent>>,
    failure: Mutex<Option<String>>,
}

impl InMemoryReportRepository {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            clock,
            rows: Mutex::new(Vec::new()),
            failure: Mutex::new(None),
        }
    }

    pub fn fail_with(&self, message: &str) {
        *self.failure.lock().expect("failure lock") = Some(message.to_string());
    }

    pub fn len(&self) -> usize {
        self.rows.lock().expect("rows lock").len()
    }

    /// Inserts a row with an explicit timestamp, bypassing the clock.
    pub fn seed(&self, location: &str, timestamp: NaiveDateTime) -> ReportEvent {
        let mut rows = self.rows.lock().expect("rows lock");
        let report = ReportEvent {
            id: rows.len() as i64 + 1,
            location: location.to_string(),
            reported_by: "Anonymous".to_string(),
            timestamp,
            created_at: timestamp,
        };
        rows.push(report.clone());
        report
    }

    fn check(&self) -> Result<(), StoreError> {
        match self.failure.lock().expect("failure lock").as_ref() {
            Some(message) => Err(StoreError::Storage(message.clone())),
            None => Ok(()),
        }
    }

    fn count_since(
        &self,
        threshold: NaiveDateTime,
        label: impl Fn(&NaiveDateTime) -> String,
    ) -> SparseCounts {
        let rows = self.rows.lock().expect("rows lock");
        let mut counts = SparseCounts::new();
        for row in rows.iter().filter(|row| row.timestamp >= threshold) {
            *counts.entry(label(&row.timestamp)).or_default() += 1;
        }
        counts
    }
}

#[async_trait]
impl ReportRepository for InMemoryReportRepository {
    async fn append(&self, location: &str, reported_by: &str) -> Result<ReportEvent, StoreError> {
        self.check()?;
        let location = normalize_location(location)?;
        let now = self.clock.now();
        let mut rows = self.rows.lock().expect("rows lock");
        let report = ReportEvent {
            id: rows.len() as i64 + 1,
            location,
            reported_by: reported_by.to_string(),
            timestamp: now,
            created_at: now,
        };
        rows.push(report.clone());
        Ok(report)
    }

    async fn list_all(&self) -> Result<Vec<ReportEvent>, StoreError> {
        self.check()?;
        let mut rows = self.rows.lock().expect("rows lock").clone();
        rows.sort_by(|a, b| b.timestamp.cmp(&a.timestamp).then_with(|| b.id.cmp(&a.id)));
        Ok(rows)
    }

    async fn count_by_hour_of_day(
        &self,
        now: NaiveDateTime,
        window_hours: u32,
    ) -> Result<SparseCounts, StoreError> {
        self.check()?;
        let threshold = now - Duration::hours(i64::from(window_hours));
        Ok(self.count_since(threshold, |ts| ts.format("%H").to_string()))
    }

    async fn count_by_day(
        &self,
        now: NaiveDateTime,
        window_days: u32,
    ) -> Result<SparseCounts, StoreError> {
        self.check()?;
        let threshold = now - Duration::days(i64::from(window_days));
        Ok(self.count_since(threshold, |ts| ts.format(DAY_FORMAT).to_string()))
    }

    async fn count(&self) -> Result<u64, StoreError> {
        self.check()?;
        Ok(self.len() as u64)
    }

    async fn ping(&self) -> Result<(), StoreError> {
        self.check()
    }
}

pub fn test_state() -> (AppState, Arc<InMemoryReportRepository>, Arc<FixedClock>) {
    let clock = Arc::new(FixedClock::new(fixed_now()));
    let repo = Arc::new(InMemoryReportRepository::new(clock.clone()));
    let state = AppState {
        config: RuntimeConfig::default(),
        report_repo: repo.clone(),
        clock: clock.clone(),
        metrics: Arc::new(Metrics::default()),
    };
    (state, repo, clock)
}
