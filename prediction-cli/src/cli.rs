use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand};
use prediction_core::{Config, PredictClient, PredictionUi};

use crate::render::TerminalView;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "predict", version, about = "Temperature prediction client")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Configure the prediction backend endpoint.
    Configure,

    /// Predict the temperature for a location and date.
    Predict {
        /// Location name, e.g. a city, district, or state.
        location: String,

        /// Date to predict for (YYYY-MM-DD); defaults to today.
        #[arg(long)]
        date: Option<String>,

        /// Backend base URL, overriding the configured one.
        #[arg(long)]
        url: Option<String>,
    },
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        match self.command {
            Command::Configure => configure(),
            Command::Predict { location, date, url } => predict(location, date, url).await,
        }
    }
}

fn configure() -> anyhow::Result<()> {
    let mut cfg = Config::load()?;

    let backend_url = inquire::Text::new("Backend base URL:")
        .with_initial_value(&cfg.backend_url)
        .prompt()
        .context("Failed to read backend URL")?;

    cfg.backend_url = backend_url.trim().to_string();
    cfg.save()?;

    println!("Saved configuration to {}", Config::config_file_path()?.display());
    Ok(())
}

async fn predict(
    location: String,
    date: Option<String>,
    url: Option<String>,
) -> anyhow::Result<()> {
    let mut config = Config::load()?;
    if let Some(url) = url {
        config.backend_url = url;
    }

    let date = date.unwrap_or_else(|| chrono::Local::now().format("%Y-%m-%d").to_string());

    let client = PredictClient::new(&config).context("Failed to build HTTP client")?;
    let ui = PredictionUi::new(Arc::new(client), Arc::new(TerminalView));

    if ui.submit(&location, &date).await.is_err() {
        // The view has already shown the message; only the exit code is left.
        std::process::exit(1);
    }
    Ok(())
}
