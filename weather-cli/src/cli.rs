use anyhow::Context;
use clap::{Parser, Subcommand};
use std::{io, path::PathBuf, sync::Arc};
use tokio::io::BufReader;
use weather_collector_core::{
    Config, Exporter, Poller, ReadingStore, SessionEnd, provider_from_config, run_session,
};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(
    name = "weather-collector",
    version,
    about = "Polls current weather, stores readings and exports them to Excel"
)]
pub struct Cli {
    /// Use this config file instead of the platform default.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Poll the weather API and accept commands on stdin (default).
    Run,

    /// Export the latest readings once and exit.
    Export,

    /// Write the effective configuration to disk so it can be edited.
    Configure,
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        let config = self.load_config()?;

        match self.command.unwrap_or(Command::Run) {
            Command::Run => collect(config).await,
            Command::Export => {
                let path = exporter(&config)?.export()?;
                println!("Data exported to file: {}", path.display());
                Ok(())
            }
            Command::Configure => {
                let path = match self.config {
                    Some(path) => path,
                    None => Config::config_file_path()?,
                };
                config.save_to(&path)?;
                println!("Configuration written to {}", path.display());
                Ok(())
            }
        }
    }

    fn load_config(&self) -> anyhow::Result<Config> {
        match &self.config {
            Some(path) if path.exists() => Config::load_from(path),
            Some(path) => {
                tracing::warn!(path = %path.display(), "config file not found, using defaults");
                Ok(Config::default())
            }
            None => Config::load(),
        }
    }
}

fn exporter(config: &Config) -> anyhow::Result<Exporter> {
    let store = open_store(config)?;
    Ok(Exporter::new(store, &config.export_dir, config.export_limit))
}

fn open_store(config: &Config) -> anyhow::Result<ReadingStore> {
    ReadingStore::open(&config.database_path).with_context(|| {
        format!(
            "Failed to open weather database: {}",
            config.database_path.display()
        )
    })
}

/// Run the poll loop and the command session side by side.
async fn collect(config: Config) -> anyhow::Result<()> {
    println!("Starting weather data collector...");

    let store = open_store(&config)?;
    let provider = Arc::from(provider_from_config(&config));
    let poller = Poller::new(provider, store.clone(), config.poll_interval());
    let exporter = Exporter::new(store, &config.export_dir, config.export_limit);

    tracing::info!(
        latitude = config.latitude,
        longitude = config.longitude,
        interval_secs = config.poll_interval_secs,
        "collector started"
    );

    let polling = tokio::spawn(poller.run());

    let stdin = BufReader::new(tokio::io::stdin());
    let end = run_session(stdin, &mut io::stdout(), &exporter).await?;

    match end {
        SessionEnd::Exit => std::process::exit(0),
        SessionEnd::InputClosed => {
            tracing::info!("stdin closed; polling continues until the process is stopped");
            polling.await.context("poll loop panicked")?;
            Ok(())
        }
    }
}
