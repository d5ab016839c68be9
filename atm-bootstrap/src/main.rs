use anyhow::Result;
use clap::Parser;
use tracing::{info, warn};

use atm_infrastructure::{AppConfig, CONFIG_ENV};

#[derive(Parser, Debug)]
#[command(name = "atm-tracker")]
#[command(about = "Empty ATM report tracker", long_about = None)]
struct Args {
    /// Path to config file
    #[arg(short, long)]
    config: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    if let Some(config) = args.config {
        std::env::set_var(CONFIG_ENV, config);
    }

    let config = AppConfig::load().await?;
    atm_bootstrap::logging::init(config.log_dir.as_deref())?;
    match &config.source_path {
        Some(path) => info!(config = %path, "configuration loaded"),
        None => warn!("config file not found, using defaults"),
    }

    atm_bootstrap::lifecycle::serve(config).await
}
