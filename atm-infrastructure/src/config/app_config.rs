use std::env;
use std::path::Path;

use anyhow::{anyhow, Result};
use serde::Deserialize;
use tokio::fs;
use atm_domain::{
    default_known_locations, DbConfig, RuntimeConfig, DAILY_WINDOW_DAYS, HOURLY_WINDOW_HOURS,
    TOP_LOCATIONS_LIMIT,
};

pub const CONFIG_ENV: &str = "ATM_TRACKER_CONFIG";
const DEFAULT_CONFIG_PATH: &str = "./config.toml";

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct AppConfig {
    pub bind_addr: String,
    pub database_path: String,
    pub log_dir: Option<String>,
    pub max_body_bytes: u64,
    pub request_timeout_seconds: u64,
    pub hourly_window_hours: u32,
    pub daily_window_days: u32,
    pub top_locations_limit: usize,
    pub known_locations: Vec<String>,
    /// File the values were read from; `None` when defaults were used.
    #[serde(skip)]
    pub source_path: Option<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bind_addr: "127.0.0.1:3000".to_string(),
            database_path: "./data/atm-reports.db".to_string(),
            log_dir: None,
            max_body_bytes: 64 * 1024,
            request_timeout_seconds: 15,
            hourly_window_hours: HOURLY_WINDOW_HOURS,
            daily_window_days: DAILY_WINDOW_DAYS,
            top_locations_limit: TOP_LOCATIONS_LIMIT,
            known_locations: default_known_locations(),
            source_path: None,
        }
    }
}

impl AppConfig {
    pub async fn load() -> Result<Self> {
        let path = env::var(CONFIG_ENV).unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
        Self::load_from(&path).await
    }

    pub async fn load_from(path: &str) -> Result<Self> {
        let file_path = Path::new(path);
        let base_dir = file_path.parent();
        let mut config = if file_path.exists() {
            let content = fs::read_to_string(file_path).await?;
            let mut config = Self::from_toml(&content)?;
            config.source_path = Some(file_path.display().to_string());
            config
        } else {
            AppConfig::default()
        };
        config.apply_env_overrides();
        config.resolve_paths(base_dir);
        config.normalize();
        config.validate()?;
        Ok(config)
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|err| anyhow!("invalid config: {}", err))
    }

    pub fn normalize(&mut self) {
        if let Some(log_dir) = &self.log_dir {
            if log_dir.trim().is_empty() {
                self.log_dir = None;
            }
        }
        let mut locations: Vec<String> = std::mem::take(&mut self.known_locations)
            .into_iter()
            .map(|location| location.trim().to_string())
            .filter(|location| !location.is_empty())
            .collect();
        let mut seen = std::collections::HashSet::new();
        locations.retain(|location| seen.insert(location.clone()));
        self.known_locations = locations;
    }

    fn resolve_paths(&mut self, base_dir: Option<&Path>) {
        let Some(base) = base_dir else {
            return;
        };
        self.database_path = resolve_path(base, &self.database_path);
        if let Some(log_dir) = &self.log_dir {
            self.log_dir = Some(resolve_path(base, log_dir));
        }
    }

    pub fn validate(&self) -> Result<()> {
        self.bind_addr
            .parse::<std::net::SocketAddr>()
            .map_err(|err| anyhow!("invalid bind_addr: {}", err))?;
        if self.database_path.trim().is_empty() {
            return Err(anyhow!("database_path must not be empty"));
        }
        if self.max_body_bytes == 0 {
            return Err(anyhow!("max_body_bytes must be greater than 0"));
        }
        if self.request_timeout_seconds == 0 {
            return Err(anyhow!("request_timeout_seconds must be greater than 0"));
        }
        if self.hourly_window_hours == 0 || self.daily_window_days == 0 {
            return Err(anyhow!("chart windows must be greater than 0"));
        }
        if self.top_locations_limit == 0 {
            return Err(anyhow!("top_locations_limit must be greater than 0"));
        }
        Ok(())
    }

    pub fn to_runtime_config(&self) -> RuntimeConfig {
        RuntimeConfig {
            bind_addr: self.bind_addr.clone(),
            max_body_bytes: self.max_body_bytes,
            request_timeout_seconds: self.request_timeout_seconds,
            hourly_window_hours: self.hourly_window_hours,
            daily_window_days: self.daily_window_days,
            top_locations_limit: self.top_locations_limit,
            known_locations: self.known_locations.clone(),
        }
    }

    pub fn to_db_config(&self) -> DbConfig {
        DbConfig {
            database_path: self.database_path.clone(),
        }
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(value) = env::var("ATM_TRACKER_BIND_ADDR") {
            self.bind_addr = value;
        }
        if let Ok(value) = env::var("ATM_TRACKER_DATABASE_PATH") {
            self.database_path = value;
        }
        if let Ok(value) = env::var("ATM_TRACKER_LOG_DIR") {
            self.log_dir = Some(value);
        }
        if let Ok(value) = env::var("ATM_TRACKER_MAX_BODY_BYTES") {
            self.max_body_bytes = value.parse().unwrap_or(self.max_body_bytes);
        }
        if let Ok(value) = env::var("ATM_TRACKER_REQUEST_TIMEOUT_SECONDS") {
            self.request_timeout_seconds = value.parse().unwrap_or(self.request_timeout_seconds);
        }
        if let Ok(value) = env::var("ATM_TRACKER_HOURLY_WINDOW_HOURS") {
            self.hourly_window_hours = value.parse().unwrap_or(self.hourly_window_hours);
        }
        if let Ok(value) = env::var("ATM_TRACKER_DAILY_WINDOW_DAYS") {
            self.daily_window_days = value.parse().unwrap_or(self.daily_window_days);
        }
        if let Ok(value) = env::var("ATM_TRACKER_TOP_LOCATIONS_LIMIT") {
            self.top_locations_limit = value.parse().unwrap_or(self.top_locations_limit);
        }
        if let Ok(value) = env::var("ATM_TRACKER_KNOWN_LOCATIONS") {
            self.known_locations = parse_env_list(&value);
        }
    }
}

fn resolve_path(base: &Path, value: &str) -> String {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return trimmed.to_string();
    }
    let path = Path::new(trimmed);
    if path.is_absolute() {
        trimmed.to_string()
    } else {
        base.join(path).to_string_lossy().to_string()
    }
}

/// `ATM_TRACKER_KNOWN_LOCATIONS` entries are `;`-separated.
fn parse_env_list(value: &str) -> Vec<String> {
    value
        .split(';')
        .map(|item| item.trim())
        .filter(|item| !item.is_empty())
        .map(ToString::to_string)
        .collect()
}
