use std::fs;
use std::path::Path;
use std::sync::{Arc, Mutex};
use std::time::Duration as StdDuration;

use async_trait::async_trait;
use chrono::{Duration, NaiveDateTime};
use rusqlite::types::Value;
use rusqlite::{params, Connection, Row};
use tracing::warn;

use atm_domain::{
    format_storage, normalize_location, parse_timestamp, Clock, ParsedTimestamp, ReportEvent,
    ReportRepository, SparseCounts, StoreError, ANONYMOUS_REPORTER,
};

const BUSY_TIMEOUT_SECONDS: u64 = 5;

const CREATE_SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS atm_reports (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    location TEXT NOT NULL,
    timestamp DATETIME DEFAULT CURRENT_TIMESTAMP,
    reported_by TEXT,
    created_at DATETIME DEFAULT CURRENT_TIMESTAMP
);
CREATE INDEX IF NOT EXISTS idx_atm_reports_timestamp ON atm_reports (timestamp);
"#;

const SELECT_COLUMNS: &str = "SELECT id, location, timestamp, reported_by, created_at FROM atm_reports";

/// Stored timestamp reduced to `YYYY-MM-DD HH:MM:SS` wall-clock time. Drops any
/// fraction or offset and maps the `T` separator to a space; unreadable values become NULL.
const LOCAL_TIMESTAMP: &str = "datetime(substr(trim(timestamp), 1, 19))";

/// Append-only report table in a single SQLite database. One connection guarded
/// by a mutex serialises every statement, so ids follow insertion order.
#[derive(Clone)]
pub struct SqliteReportRepository {
    conn: Arc<Mutex<Connection>>,
    clock: Arc<dyn Clock>,
}

impl SqliteReportRepository {
    /// Opens (or creates) the database file and its parent directory, then ensures the schema.
    pub fn open(path: impl AsRef<Path>, clock: Arc<dyn Clock>) -> Result<Self, StoreError> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent).map_err(StoreError::storage)?;
            }
        }
        let conn = Connection::open(path).map_err(StoreError::storage)?;
        Self::from_connection(conn, clock)
    }

    pub fn open_in_memory(clock: Arc<dyn Clock>) -> Result<Self, StoreError> {
        let conn = Connection::open_in_memory().map_err(StoreError::storage)?;
        Self::from_connection(conn, clock)
    }

    fn from_connection(conn: Connection, clock: Arc<dyn Clock>) -> Result<Self, StoreError> {
        conn.busy_timeout(StdDuration::from_secs(BUSY_TIMEOUT_SECONDS))
            .map_err(StoreError::storage)?;
        conn.execute_batch(CREATE_SCHEMA)
            .map_err(StoreError::storage)?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
            clock,
        })
    }

    async fn run<T, F>(&self, op: F) -> Result<T, StoreError>
    where
        T: Send + 'static,
        F: FnOnce(&Connection) -> Result<T, StoreError> + Send + 'static,
    {
        let conn = self.conn.clone();
        tokio::task::spawn_blocking(move || {
            let guard = conn
                .lock()
                .map_err(|_| StoreError::Storage("sqlite connection lock poisoned".to_string()))?;
            op(&guard)
        })
        .await
        .map_err(StoreError::storage)?
    }
}

struct RawReportRow {
    id: i64,
    location: String,
    timestamp: Value,
    reported_by: Option<String>,
    created_at: Value,
}

impl RawReportRow {
    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            location: row.get(1)?,
            timestamp: row.get(2)?,
            reported_by: row.get(3)?,
            created_at: row.get(4)?,
        })
    }

    /// Stored timestamps that cannot be read back are replaced by `fallback`.
    fn into_event(self, fallback: NaiveDateTime) -> ReportEvent {
        let timestamp = resolve_timestamp(self.id, "timestamp", &self.timestamp, fallback);
        let created_at = resolve_timestamp(self.id, "created_at", &self.created_at, timestamp);
        ReportEvent {
            id: self.id,
            location: self.location,
            reported_by: self
                .reported_by
                .filter(|value| !value.trim().is_empty())
                .unwrap_or_else(|| ANONYMOUS_REPORTER.to_string()),
            timestamp,
            created_at,
        }
    }
}

fn resolve_timestamp(id: i64, column: &str, value: &Value, fallback: NaiveDateTime) -> NaiveDateTime {
    let parsed = match value {
        Value::Text(text) => parse_timestamp(text),
        Value::Integer(number) => parse_timestamp(&number.to_string()),
        Value::Real(number) => parse_timestamp(&number.to_string()),
        Value::Null | Value::Blob(_) => ParsedTimestamp::Invalid,
    };
    if !parsed.is_valid() {
        warn!(report_id = id, column, value = ?value, "unreadable timestamp, using current time");
    }
    parsed.unwrap_or(fallback)
}

fn collect_counts(conn: &Connection, sql: &str, threshold: String) -> Result<SparseCounts, StoreError> {
    let mut stmt = conn.prepare(sql).map_err(StoreError::storage)?;
    let rows = stmt
        .query_map(params![threshold], |row| {
            Ok((row.get::<_, Option<String>>(0)?, row.get::<_, i64>(1)?))
        })
        .map_err(StoreError::storage)?;
    let mut counts = SparseCounts::new();
    for row in rows {
        let (bucket, count) = row.map_err(StoreError::storage)?;
        if let Some(bucket) = bucket {
            counts.insert(bucket, count.max(0) as u64);
        }
    }
    Ok(counts)
}

#[async_trait]
impl ReportRepository for SqliteReportRepository {
    async fn append(&self, location: &str, reported_by: &str) -> Result<ReportEvent, StoreError> {
        let location = normalize_location(location)?;
        let reported_by = reported_by.to_string();
        let now = self.clock.now();
        let stamp = format_storage(&now);
        self.run(move |conn| {
            conn.execute(
                "INSERT INTO atm_reports (location, reported_by, timestamp, created_at) \
                 VALUES (?1, ?2, ?3, ?3)",
                params![location, reported_by, stamp],
            )
            .map_err(StoreError::storage)?;
            let id = conn.last_insert_rowid();
            let sql = format!("{} WHERE id = ?1", SELECT_COLUMNS);
            let raw = conn
                .query_row(&sql, params![id], RawReportRow::from_row)
                .map_err(StoreError::storage)?;
            Ok(raw.into_event(now))
        })
        .await
    }

    async fn list_all(&self) -> Result<Vec<ReportEvent>, StoreError> {
        let now = self.clock.now();
        self.run(move |conn| {
            let sql = format!("{} ORDER BY {} DESC, id DESC", SELECT_COLUMNS, LOCAL_TIMESTAMP);
            let mut stmt = conn.prepare(&sql).map_err(StoreError::storage)?;
            let rows = stmt
                .query_map([], RawReportRow::from_row)
                .map_err(StoreError::storage)?;
            let mut reports = Vec::new();
            for row in rows {
                reports.push(row.map_err(StoreError::storage)?.into_event(now));
            }
            Ok(reports)
        })
        .await
    }

    async fn count_by_hour_of_day(
        &self,
        now: NaiveDateTime,
        window_hours: u32,
    ) -> Result<SparseCounts, StoreError> {
        let threshold = format_storage(&(now - Duration::hours(i64::from(window_hours))));
        let sql = format!(
            "SELECT strftime('%H', {ts}) AS hour, COUNT(*) FROM atm_reports \
             WHERE {ts} >= ?1 GROUP BY hour ORDER BY hour",
            ts = LOCAL_TIMESTAMP
        );
        self.run(move |conn| collect_counts(conn, &sql, threshold))
            .await
    }

    async fn count_by_day(
        &self,
        now: NaiveDateTime,
        window_days: u32,
    ) -> Result<SparseCounts, StoreError> {
        let threshold = format_storage(&(now - Duration::days(i64::from(window_days))));
        let sql = format!(
            "SELECT strftime('%Y-%m-%d', {ts}) AS day, COUNT(*) FROM atm_reports \
             WHERE {ts} >= ?1 GROUP BY day ORDER BY day",
            ts = LOCAL_TIMESTAMP
        );
        self.run(move |conn| collect_counts(conn, &sql, threshold))
            .await
    }

    async fn count(&self) -> Result<u64, StoreError> {
        self.run(|conn| {
            conn.query_row("SELECT COUNT(*) FROM atm_reports", [], |row| row.get::<_, i64>(0))
                .map(|count| count.max(0) as u64)
                .map_err(StoreError::storage)
        })
        .await
    }

    async fn ping(&self) -> Result<(), StoreError> {
        self.run(|conn| {
            conn.query_row("SELECT 1", [], |row| row.get::<_, i64>(0))
                .map(|_| ())
                .map_err(StoreError::storage)
        })
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    struct FixedClock(Mutex<NaiveDateTime>);

    impl FixedClock {
        fn at(now: NaiveDateTime) -> Arc<Self> {
            Arc::new(Self(Mutex::new(now)))
        }

        fn set(&self, now: NaiveDateTime) {
            *self.0.lock().expect("clock lock") = now;
        }
    }

    impl Clock for FixedClock {
        fn now(&self) -> NaiveDateTime {
            *self.0.lock().expect("clock lock")
        }
    }

    const BBVA: &str = "ATM BBVA - Las Americas Mall";
    const BANORTE: &str = "ATM Banorte - North Supermarket";

    fn noon() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 10, 18)
            .and_then(|d| d.and_hms_opt(12, 0, 0))
            .expect("noon")
    }

    fn repo_at(now: NaiveDateTime) -> (SqliteReportRepository, Arc<FixedClock>) {
        let clock = FixedClock::at(now);
        let repo = SqliteReportRepository::open_in_memory(clock.clone()).expect("open sqlite");
        (repo, clock)
    }

    fn insert_raw(repo: &SqliteReportRepository, location: &str, timestamp: &str) {
        let conn = repo.conn.lock().expect("conn lock");
        conn.execute(
            "INSERT INTO atm_reports (location, reported_by, timestamp, created_at) VALUES (?1, NULL, ?2, ?2)",
            params![location, timestamp],
        )
        .expect("raw insert");
    }

    #[tokio::test]
    async fn append_stamps_local_clock_and_increments_ids() {
        let (repo, clock) = repo_at(noon());
        let first = repo.append(BBVA, "Ana").await.expect("first");
        clock.set(noon() + Duration::seconds(30));
        let second = repo.append(BANORTE, "Anonymous").await.expect("second");

        assert_eq!(first.timestamp, noon());
        assert_eq!(first.created_at, noon());
        assert_eq!(second.timestamp, noon() + Duration::seconds(30));
        assert!(second.id > first.id);
        assert_eq!(first.reported_by, "Ana");
        assert_eq!(repo.count().await.expect("count"), 2);
    }

    #[tokio::test]
    async fn append_rejects_blank_location() {
        let (repo, _clock) = repo_at(noon());
        let err = repo.append("   ", "Ana").await.expect_err("blank location");
        assert!(matches!(err, StoreError::Validation(_)));
        assert_eq!(repo.count().await.expect("count"), 0);
    }

    #[tokio::test]
    async fn list_all_is_newest_first() {
        let (repo, clock) = repo_at(noon() - Duration::hours(2));
        let older = repo.append(BBVA, "Ana").await.expect("older");
        clock.set(noon());
        let newer = repo.append(BANORTE, "Luis").await.expect("newer");
        clock.set(noon() - Duration::hours(1));
        let middle = repo.append(BBVA, "Eva").await.expect("middle");

        let listed = repo.list_all().await.expect("list");
        let ids: Vec<i64> = listed.iter().map(|report| report.id).collect();
        assert_eq!(ids, vec![newer.id, middle.id, older.id]);
        assert_eq!(listed, repo.list_all().await.expect("list again"));
    }

    #[tokio::test]
    async fn hourly_window_has_inclusive_lower_bound() {
        let (repo, clock) = repo_at(noon() - Duration::hours(24));
        repo.append(BBVA, "edge").await.expect("edge");
        clock.set(noon() - Duration::hours(24) - Duration::seconds(1));
        repo.append(BBVA, "too old").await.expect("old");
        clock.set(noon() - Duration::minutes(30));
        repo.append(BANORTE, "recent").await.expect("recent");

        let counts = repo.count_by_hour_of_day(noon(), 24).await.expect("counts");
        assert_eq!(counts.get("12"), Some(&1));
        assert_eq!(counts.get("11"), Some(&1));
        assert_eq!(counts.values().sum::<u64>(), 2);
    }

    #[tokio::test]
    async fn daily_window_groups_by_local_date() {
        let (repo, clock) = repo_at(noon() - Duration::days(3));
        repo.append(BBVA, "a").await.expect("a");
        repo.append(BBVA, "b").await.expect("b");
        clock.set(noon() - Duration::days(8));
        repo.append(BBVA, "stale").await.expect("stale");
        clock.set(noon());
        repo.append(BANORTE, "c").await.expect("c");

        let counts = repo.count_by_day(noon(), 7).await.expect("counts");
        let mut expected = SparseCounts::new();
        expected.insert("2026-10-15".to_string(), 2);
        expected.insert("2026-10-18".to_string(), 1);
        assert_eq!(counts, expected);
    }

    #[tokio::test]
    async fn empty_store_yields_empty_sparse_counts() {
        let (repo, _clock) = repo_at(noon());
        assert!(repo.count_by_hour_of_day(noon(), 24).await.expect("hourly").is_empty());
        assert!(repo.count_by_day(noon(), 7).await.expect("daily").is_empty());
        assert!(repo.list_all().await.expect("list").is_empty());
        repo.ping().await.expect("ping");
    }

    #[tokio::test]
    async fn legacy_rows_are_normalized_on_read() {
        let (repo, _clock) = repo_at(noon());
        insert_raw(&repo, BBVA, "2026-10-17T08:15:00");
        insert_raw(&repo, BANORTE, "not-a-date");
        insert_raw(&repo, BANORTE, "1999-01-01 00:00:00");

        let listed = repo.list_all().await.expect("list");
        assert_eq!(listed.len(), 3);
        for report in &listed {
            assert_eq!(report.reported_by, "Anonymous");
        }
        let iso = listed
            .iter()
            .find(|report| report.location == BBVA)
            .expect("iso row");
        assert_eq!(
            iso.timestamp,
            NaiveDate::from_ymd_opt(2026, 10, 17)
                .and_then(|d| d.and_hms_opt(8, 15, 0))
                .expect("iso ts")
        );
        let broken: Vec<&ReportEvent> = listed
            .iter()
            .filter(|report| report.location == BANORTE)
            .collect();
        assert!(broken.iter().all(|report| report.timestamp == noon()));
    }

    #[tokio::test]
    async fn iso_rows_respect_window_bounds() {
        let (repo, _clock) = repo_at(noon());
        insert_raw(&repo, BBVA, "2026-10-17T08:15:00");
        insert_raw(&repo, BBVA, "2026-10-17T13:05:00.250");
        insert_raw(&repo, BANORTE, "2026-10-18T09:40:00+02:00");

        let hourly = repo.count_by_hour_of_day(noon(), 24).await.expect("hourly");
        let mut expected = SparseCounts::new();
        expected.insert("09".to_string(), 1);
        expected.insert("13".to_string(), 1);
        assert_eq!(hourly, expected);

        let daily = repo.count_by_day(noon(), 1).await.expect("daily");
        let mut expected = SparseCounts::new();
        expected.insert("2026-10-17".to_string(), 1);
        expected.insert("2026-10-18".to_string(), 1);
        assert_eq!(daily, expected);
    }

    #[tokio::test]
    async fn list_all_orders_mixed_layouts_by_time() {
        let (repo, _clock) = repo_at(noon());
        insert_raw(&repo, BBVA, "2026-10-18T08:00:00");
        insert_raw(&repo, BANORTE, "2026-10-18 09:00:00");

        let listed = repo.list_all().await.expect("list");
        let locations: Vec<&str> = listed.iter().map(|report| report.location.as_str()).collect();
        assert_eq!(locations, vec![BANORTE, BBVA]);
    }

    #[tokio::test]
    async fn concurrent_appends_get_distinct_ids() {
        let (repo, _clock) = repo_at(noon());
        let mut handles = Vec::new();
        for idx in 0..16 {
            let repo = repo.clone();
            handles.push(tokio::spawn(async move {
                repo.append(&format!("ATM #{}", idx), "load").await
            }));
        }
        let mut ids = Vec::new();
        for handle in handles {
            ids.push(handle.await.expect("join").expect("append").id);
        }
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), 16);
        assert_eq!(repo.count().await.expect("count"), 16);
    }

    #[tokio::test]
    async fn reports_survive_reopen() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("data").join("atm-reports.db");
        let clock = FixedClock::at(noon());
        let created = {
            let repo = SqliteReportRepository::open(&path, clock.clone()).expect("open");
            repo.append(BBVA, "Ana").await.expect("append")
        };
        assert!(path.exists());

        let reopened = SqliteReportRepository::open(&path, clock.clone()).expect("reopen");
        let listed = reopened.list_all().await.expect("list");
        assert_eq!(listed, vec![created.clone()]);
        let next = reopened.append(BANORTE, "Luis").await.expect("append");
        assert!(next.id > created.id);
    }
}
