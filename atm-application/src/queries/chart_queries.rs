use tracing::{error, warn};

use crate::AppState;
use atm_domain::{build_series, ChartMode, ChartPoint, StoreError};

/// Dense chart series for `mode`, or an empty series if the store cannot be read.
pub async fn get_chart_data(state: &AppState, mode: ChartMode) -> Vec<ChartPoint> {
    match try_chart_data(state, mode).await {
        Ok(series) => series,
        Err(err) => {
            state.metrics.record_read_failure();
            error!(mode = mode.as_str(), "failed to fetch chart data: {}", err);
            Vec::new()
        }
    }
}

/// Like [`get_chart_data`] but accepts the raw mode string from a request.
/// Missing mode means hourly; unknown modes get an empty series.
pub async fn get_chart_data_for(state: &AppState, mode: Option<&str>) -> Vec<ChartPoint> {
    let Some(raw) = mode else {
        return get_chart_data(state, ChartMode::default()).await;
    };
    match ChartMode::parse(raw) {
        Some(mode) => get_chart_data(state, mode).await,
        None => {
            warn!(mode = raw, "unknown chart mode");
            Vec::new()
        }
    }
}

async fn try_chart_data(state: &AppState, mode: ChartMode) -> Result<Vec<ChartPoint>, StoreError> {
    let now = state.clock.now();
    let sparse = match mode {
        ChartMode::Hourly => {
            state
                .report_repo
                .count_by_hour_of_day(now, state.config.hourly_window_hours)
                .await?
        }
        ChartMode::Daily => {
            state
                .report_repo
                .count_by_day(now, state.config.daily_window_days)
                .await?
        }
    };
    Ok(build_series(mode, now, &sparse))
}
