// Turns sparse bucket counts into dense, chart-ready series

use chrono::{Duration, NaiveDate, NaiveDateTime};

use crate::entities::{ChartPoint, SparseCounts};
use crate::value_objects::{ChartMode, DAY_FORMAT};

pub const HOURS_PER_DAY: u32 = 24;
pub const DAILY_SERIES_LEN: i64 = 7;

/// Builds the dense series for `mode`. `now` must be the same instant used to
/// query `sparse` so labels and window agree.
pub fn build_series(mode: ChartMode, now: NaiveDateTime, sparse: &SparseCounts) -> Vec<ChartPoint> {
    match mode {
        ChartMode::Hourly => dense_hourly(sparse),
        ChartMode::Daily => dense_daily(now.date(), sparse),
    }
}

/// 24 points `"00:00".."23:00"` in ascending hour order, independent of the current hour.
pub fn dense_hourly(sparse: &SparseCounts) -> Vec<ChartPoint> {
    (0..HOURS_PER_DAY)
        .map(|hour| {
            let key = format!("{:02}", hour);
            let reports = sparse.get(&key).copied().unwrap_or(0);
            ChartPoint::new(format!("{}:00", key), reports)
        })
        .collect()
}

/// 7 points for `today - 6 .. today`, oldest first.
pub fn dense_daily(today: NaiveDate, sparse: &SparseCounts) -> Vec<ChartPoint> {
    (0..DAILY_SERIES_LEN)
        .rev()
        .map(|offset| {
            let day = (today - Duration::days(offset)).format(DAY_FORMAT).to_string();
            let reports = sparse.get(&day).copied().unwrap_or(0);
            ChartPoint::new(day, reports)
        })
        .collect()
}
