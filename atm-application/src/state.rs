use std::sync::Arc;

use atm_domain::ports::{Clock, ReportRepository};
use atm_domain::RuntimeConfig;

use crate::Metrics;

#[derive(Clone)]
pub struct AppState {
    pub config: RuntimeConfig,
    pub report_repo: Arc<dyn ReportRepository>,
    pub clock: Arc<dyn Clock>,
    pub metrics: Arc<Metrics>,
}
