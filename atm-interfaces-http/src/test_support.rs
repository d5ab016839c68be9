use std::sync::Arc;

use atm_application::{AppState, Metrics};
use atm_domain::RuntimeConfig;
use atm_infrastructure::{SqliteReportRepository, SystemClock};

pub fn sqlite_state() -> AppState {
    let clock = Arc::new(SystemClock);
    let repo = SqliteReportRepository::open_in_memory(clock.clone()).expect("open sqlite");
    AppState {
        config: RuntimeConfig::default(),
        report_repo: Arc::new(repo),
        clock,
        metrics: Arc::new(Metrics::default()),
    }
}
