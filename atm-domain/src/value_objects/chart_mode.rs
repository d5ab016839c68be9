// Chart mode value object

use serde::{Deserialize, Serialize};

pub const HOURLY_WINDOW_HOURS: u32 = 24;
pub const DAILY_WINDOW_DAYS: u32 = 7;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartMode {
    #[default]
    Hourly,
    Daily,
}

impl ChartMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChartMode::Hourly => "hourly",
            ChartMode::Daily => "daily",
        }
    }

    /// Unknown modes yield `None`; callers render them as an empty series.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "hourly" => Some(ChartMode::Hourly),
            "daily" => Some(ChartMode::Daily),
            _ => None,
        }
    }
}
