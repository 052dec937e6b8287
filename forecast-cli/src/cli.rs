use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand};
use forecast_core::{Config, ForecastService, HttpTransport, ProviderMode};
use inquire::{Select, Text};

use crate::render;

const COMPONENT_NAME: &str = "forecast-cli";

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "forecast", version, about = "Weather forecast demo")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Fetch and print the forecast.
    Show {
        /// Skip the network and synthesize data locally.
        #[arg(long)]
        local: bool,

        /// Override the API base URL for this run.
        #[arg(long)]
        base_url: Option<String>,

        /// Number of days to synthesize when mock data is used.
        #[arg(long)]
        days: Option<usize>,
    },

    /// Interactively set the API base URL and default mode.
    Configure,

    /// Print the location of the config file.
    ConfigPath,
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        match self.command {
            Command::Show { local, base_url, days } => {
                let config = Config::load()?;
                let service = build_service(&config, local, base_url, days)?;

                tracing::debug!(component = COMPONENT_NAME, mode = %service.mode(), "loading forecast");
                let outcome = service.fetch().await;

                print!("{}", render::forecast_table(&outcome));
            }
            Command::Configure => configure()?,
            Command::ConfigPath => {
                println!("{}", Config::config_file_path()?.display());
            }
        }

        Ok(())
    }
}

fn build_service(
    config: &Config,
    local: bool,
    base_url: Option<String>,
    days: Option<usize>,
) -> anyhow::Result<ForecastService> {
    let base_url = base_url.unwrap_or_else(|| config.base_url());
    let transport = HttpTransport::new(&base_url, config.timeout())?;

    let mode = if local { ProviderMode::Local } else { config.mode() };

    Ok(ForecastService::new(Arc::new(transport))
        .with_name(COMPONENT_NAME)
        .with_mode(mode)
        .with_endpoint(config.endpoint())
        .with_days(days.unwrap_or_else(|| config.days()))
        .with_local_delay(config.local_delay()))
}

fn configure() -> anyhow::Result<()> {
    let mut config = Config::load()?;

    let current_url = config.base_url_with_override(None);
    let base_url = Text::new("Forecast API base URL:")
        .with_default(&current_url)
        .prompt()
        .context("Failed to read base URL")?;

    let mode = Select::new("Default mode:", ProviderMode::all().to_vec())
        .with_starting_cursor(if config.mode() == ProviderMode::Local { 1 } else { 0 })
        .prompt()
        .context("Failed to read mode")?;

    config.set_base_url(base_url);
    config.set_mode(mode);
    config.save()?;

    println!("Saved configuration to {}", Config::config_file_path()?.display());
    Ok(())
}
