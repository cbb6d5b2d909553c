use anyhow::Context;
use clap::{Parser, Subcommand};
use geoforecast_core::{
    ClockZone, Config, FixedLocation, ForecastView, HttpForecastClient, MemoryPage, Position,
    SubmitOutcome, config::DEFAULT_SERVER_URL,
};
use inquire::{Confirm, CustomType, Text};
use std::time::Duration;

use crate::output;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "geoforecast", version, about = "Forecast for your location")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Configure the forecast server and default location.
    Configure,

    /// Fetch and show the forecast for a position.
    Show {
        /// Latitude in degrees; defaults to the configured location.
        #[arg(long, requires = "lon", allow_negative_numbers = true)]
        lat: Option<f64>,

        /// Longitude in degrees; defaults to the configured location.
        #[arg(long, requires = "lat", allow_negative_numbers = true)]
        lon: Option<f64>,

        /// Forecast server URL, overriding the configured one.
        #[arg(long)]
        server: Option<String>,

        /// Show hourly times at this UTC offset (minutes) instead of local time.
        #[arg(long, allow_negative_numbers = true)]
        utc_offset: Option<i32>,
    },

    /// Print the location of the config file.
    ConfigPath,
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        match self.command {
            Command::Configure => configure(),
            Command::Show {
                lat,
                lon,
                server,
                utc_offset,
            } => {
                let explicit = lat.zip(lon).map(|(lat, lon)| Position::new(lat, lon));
                show(explicit, server, utc_offset).await
            }
            Command::ConfigPath => {
                println!("{}", Config::config_file_path()?.display());
                Ok(())
            }
        }
    }
}

async fn show(
    explicit: Option<Position>,
    server: Option<String>,
    utc_offset: Option<i32>,
) -> anyhow::Result<()> {
    let config = Config::load()?;

    let client = match server {
        Some(url) => {
            let timeout = Duration::from_secs(config.timeout_secs);
            HttpForecastClient::with_timeout(url, timeout)?
        }
        None => HttpForecastClient::from_config(&config)?,
    };

    let zone = match utc_offset {
        Some(minutes) => ClockZone::from_offset_minutes(minutes)?,
        None => config.clock_zone()?,
    };

    let source = FixedLocation::resolve(explicit, &config);
    let page = MemoryPage::with_layout(config.hourly_slots);
    let mut view = ForecastView::new(page, client)?.with_clock_zone(zone);

    let outcome = view.init(&source).await;
    let page = view.into_page();

    for line in output::report(&page, outcome) {
        println!("{line}");
    }

    match outcome {
        SubmitOutcome::FetchFailed => eprintln!("Could not get the forecast."),
        SubmitOutcome::Partial { hourly } => {
            eprintln!("Only {hourly} hourly rows fit; the rest were not shown.")
        }
        SubmitOutcome::NoLocation | SubmitOutcome::Rendered { .. } => {}
    }

    Ok(())
}

fn configure() -> anyhow::Result<()> {
    let mut config = Config::load()?;

    let server_url = Text::new("Forecast server URL:")
        .with_default(config.server_url.as_deref().unwrap_or(DEFAULT_SERVER_URL))
        .prompt()?;
    config.server_url = Some(server_url);

    let wants_location = Confirm::new("Set a default location?")
        .with_default(config.default_location.is_some())
        .prompt()?;

    config.default_location = if wants_location {
        let latitude = CustomType::<f64>::new("Latitude:")
            .with_error_message("Please enter a number")
            .prompt()?;
        let longitude = CustomType::<f64>::new("Longitude:")
            .with_error_message("Please enter a number")
            .prompt()?;
        Some(Position::new(latitude, longitude))
    } else {
        None
    };

    config.hourly_slots = CustomType::<usize>::new("Hourly rows to show:")
        .with_default(config.hourly_slots)
        .prompt()?;

    config.save().context("Failed to save configuration")?;
    let path = Config::config_file_path()?;
    println!("Saved configuration to {}", path.display());

    Ok(())
}
