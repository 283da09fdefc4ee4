use chrono::Local;
use std::{sync::Arc, time::Duration};

use crate::{error::PollError, model::Reading, provider::WeatherProvider, store::ReadingStore};

/// Fetch-then-store on a fixed cadence.
#[derive(Debug, Clone)]
pub struct Poller {
    provider: Arc<dyn WeatherProvider>,
    store: ReadingStore,
    interval: Duration,
}

impl Poller {
    pub fn new(
        provider: Arc<dyn WeatherProvider>,
        store: ReadingStore,
        interval: Duration,
    ) -> Self {
        Self {
            provider,
            store,
            interval,
        }
    }

    /// One tick: fetch current weather and persist it.
    pub async fn poll_once(&self) -> Result<Reading, PollError> {
        let observation = self.provider.fetch().await?;
        let reading = self.store.insert(&observation)?;
        Ok(reading)
    }

    /// Poll forever. Errors are logged and the next tick proceeds as usual.
    pub async fn run(self) {
        loop {
            match self.poll_once().await {
                Ok(reading) => {
                    tracing::debug!(id = reading.id, "reading stored");
                    println!("\n{}", saved_message(&reading));
                }
                Err(err) => tracing::error!("{err}"),
            }

            tokio::time::sleep(self.interval).await;
        }
    }
}

/// Confirmation line for a stored reading, stamped with its persisted time.
fn saved_message(reading: &Reading) -> String {
    format!(
        "Weather data saved: {}",
        reading.timestamp.with_timezone(&Local).format("%Y-%m-%d %H:%M:%S")
    )
}
