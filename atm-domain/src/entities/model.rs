// Runtime configuration handed to the application layer

#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub bind_addr: String,
    pub max_body_bytes: u64,
    pub request_timeout_seconds: u64,
    pub hourly_window_hours: u32,
    pub daily_window_days: u32,
    pub top_locations_limit: usize,
    pub known_locations: Vec<String>,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            bind_addr: "127.0.0.1:3000".to_string(),
            max_body_bytes: 64 * 1024,
            request_timeout_seconds: 15,
            hourly_window_hours: crate::HOURLY_WINDOW_HOURS,
            daily_window_days: crate::DAILY_WINDOW_DAYS,
            top_locations_limit: crate::TOP_LOCATIONS_LIMIT,
            known_locations: crate::default_known_locations(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct DbConfig {
    pub database_path: String,
}
