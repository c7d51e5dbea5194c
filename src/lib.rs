pub mod cli;
pub mod core;
pub mod providers;

use crate::core::Currency;
use crate::core::config::AppConfig;
use crate::providers::ExchangeRateApiProvider;
use anyhow::Result;
use tracing::{debug, info};

pub enum AppCommand {
    Convert {
        amount: String,
        from: Currency,
        to: Currency,
    },
    Currencies,
}

pub fn load_config(config_path: Option<&str>) -> Result<AppConfig> {
    match config_path {
        Some(path) => AppConfig::load_from_path(path),
        None => AppConfig::load(),
    }
}

/// Builds the live rate source described by `config`.
pub fn rate_provider(config: &AppConfig) -> ExchangeRateApiProvider {
    ExchangeRateApiProvider::new(config.exchange_rate_base_url(), config.api_key())
        .with_timeout(config.timeout())
}

pub async fn run_command(command: AppCommand, config_path: Option<&str>) -> Result<()> {
    info!("Currency converter starting...");

    match command {
        AppCommand::Convert { amount, from, to } => {
            let config = load_config(config_path)?;
            debug!(
                base_url = config.exchange_rate_base_url(),
                timeout_secs = config.timeout_secs,
                "Loaded config"
            );
            let provider = rate_provider(&config);
            cli::convert::run(&provider, &amount, from, to).await;
        }
        AppCommand::Currencies => cli::currencies::run(),
    }
    Ok(())
}
