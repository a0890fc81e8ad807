use anyhow::bail;
use chrono::Local;
use clap::{Parser, Subcommand};
use inquire::{Password, PasswordDisplayMode, Text};
use tracing::{debug, info};
use weather_core::{Config, OpenWeatherClient, WeatherViewModel, display, lookup_from_config};

use crate::session;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "weather", version, about = "Current weather lookup with search history")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Store the OpenWeather API key (and an optional custom endpoint).
    Configure,

    /// Show current weather for a city.
    Show {
        /// City name, sent to the weather service as typed.
        city: String,
    },

    /// Interactive search session with history (the default).
    Interactive,
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        match self.command.unwrap_or(Command::Interactive) {
            Command::Configure => configure(),
            Command::Show { city } => {
                let mut vm = load_view_model()?;

                vm.set_query(city);
                vm.search(None).await;

                println!("{}", display::render_panel(vm.panel(), Local::now()));
                Ok(())
            }
            Command::Interactive => session::run(load_view_model()?).await,
        }
    }
}

fn load_view_model() -> anyhow::Result<WeatherViewModel<OpenWeatherClient>> {
    let config = Config::load()?;
    let lookup = lookup_from_config(&config)?;
    debug!(?lookup, "weather lookup ready");

    Ok(WeatherViewModel::new(lookup))
}

fn configure() -> anyhow::Result<()> {
    let mut config = Config::load()?;

    let api_key = Password::new("OpenWeather API key:")
        .without_confirmation()
        .with_display_mode(PasswordDisplayMode::Masked)
        .prompt()?;
    let api_key = api_key.trim();
    if api_key.is_empty() {
        bail!("API key must not be empty");
    }
    config.set_api_key(api_key.to_string());

    let current_url = config.base_url().unwrap_or_default().to_string();
    let base_url = Text::new("Custom endpoint (leave empty for the public API):")
        .with_default(&current_url)
        .prompt()?;
    config.set_base_url(Some(base_url));

    let path = config.save()?;
    info!(path = %path.display(), "configuration saved");
    println!("Configuration saved to {}", path.display());

    Ok(())
}
