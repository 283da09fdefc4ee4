use crate::{Config, error::FetchError, model::Observation, provider::openmeteo::OpenMeteoProvider};
use async_trait::async_trait;
use std::fmt::Debug;

pub mod openmeteo;

/// A source of current weather for one fixed location.
#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    async fn fetch(&self) -> Result<Observation, FetchError>;
}

/// Construct the provider described by `config`.
pub fn provider_from_config(config: &Config) -> Box<dyn WeatherProvider> {
    Box::new(OpenMeteoProvider::new(
        config.api_base_url.clone(),
        config.latitude,
        config.longitude,
    ))
}
