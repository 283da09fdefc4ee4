//! Core library for the `weather-collector` CLI.
//!
//! This crate defines:
//! - Configuration of location, storage and cadence
//! - The weather provider abstraction and its Open-Meteo implementation
//! - The SQLite reading store and the Excel exporter
//! - The poll loop and the line-based command session
//!
//! It is used by `weather-collector`, but the pieces are plain handles and can
//! be wired into other binaries as well.

pub mod config;
pub mod console;
pub mod error;
pub mod export;
pub mod model;
pub mod poll;
pub mod provider;
pub mod store;

pub use config::Config;
pub use console::{Command, SessionEnd, run_session};
pub use error::{ExportError, FetchError, PollError, StoreError};
pub use export::Exporter;
pub use model::{Observation, PrecipitationType, Reading, WindDirection};
pub use poll::Poller;
pub use provider::{WeatherProvider, provider_from_config};
pub use store::ReadingStore;
