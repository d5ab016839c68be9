use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::info;

use atm_application::{AppState, Metrics};
use atm_domain::{Clock, ReportRepository};
use atm_infrastructure::{AppConfig, SqliteReportRepository, SystemClock};

pub struct AppContext {
    pub state: AppState,
}

impl AppContext {
    pub async fn new() -> Result<Self> {
        let config = AppConfig::load().await?;
        Self::from_config(&config).await
    }

    /// Opens the report store named by `config` and wires it into the application state.
    pub async fn from_config(config: &AppConfig) -> Result<Self> {
        let runtime_config = config.to_runtime_config();
        let db_config = config.to_db_config();

        let clock: Arc<dyn Clock> = Arc::new(SystemClock);
        let repo = SqliteReportRepository::open(&db_config.database_path, clock.clone())
            .with_context(|| format!("failed to open report store at {}", db_config.database_path))?;
        let report_count = repo.count().await?;
        info!(
            database_path = %db_config.database_path,
            report_count,
            "report store ready"
        );

        let state = AppState {
            config: runtime_config,
            report_repo: Arc::new(repo),
            clock,
            metrics: Arc::new(Metrics::default()),
        };

        Ok(Self { state })
    }
}
