use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use crate::{
    error::FetchError,
    model::{Observation, WindDirection, hpa_to_mmhg},
};

use super::WeatherProvider;

/// Hourly series requested alongside current conditions.
pub const HOURLY_METRICS: &str = "temperature_2m,relativehumidity_2m,windspeed_10m,\
                                  winddirection_10m,pressure_msl,precipitation";

/// Current conditions from <https://open-meteo.com/en/docs>.
#[derive(Debug, Clone)]
pub struct OpenMeteoProvider {
    base_url: String,
    latitude: f64,
    longitude: f64,
    http: Client,
}

impl OpenMeteoProvider {
    pub fn new(base_url: String, latitude: f64, longitude: f64) -> Self {
        Self {
            base_url,
            latitude,
            longitude,
            http: Client::new(),
        }
    }

    async fn fetch_forecast(&self) -> Result<OmResponse, FetchError> {
        let res = self
            .http
            .get(&self.base_url)
            .query(&[
                ("latitude", self.latitude.to_string()),
                ("longitude", self.longitude.to_string()),
                ("current_weather", "true".to_string()),
                ("hourly", HOURLY_METRICS.to_string()),
            ])
            .send()
            .await?;

        let status = res.status();
        let body = res.text().await?;

        if !status.is_success() {
            return Err(FetchError::Status {
                status,
                body: truncate_body(&body),
            });
        }

        Ok(serde_json::from_str(&body)?)
    }
}

#[derive(Debug, Deserialize)]
struct OmCurrentWeather {
    temperature: f64,
    windspeed: f64,
    winddirection: f64,
}

#[derive(Debug, Deserialize)]
struct OmHourly {
    pressure_msl: Vec<Option<f64>>,
    precipitation: Vec<Option<f64>>,
}

#[derive(Debug, Deserialize)]
struct OmResponse {
    current_weather: OmCurrentWeather,
    hourly: OmHourly,
}

impl OmResponse {
    fn into_observation(self) -> Result<Observation, FetchError> {
        let pressure_hpa = current_hour(&self.hourly.pressure_msl, "pressure_msl")?;
        let precipitation_mm = current_hour(&self.hourly.precipitation, "precipitation")?;
        let current = self.current_weather;

        Ok(Observation::new(
            current.temperature,
            current.windspeed,
            WindDirection::from_degrees(current.winddirection),
            hpa_to_mmhg(pressure_hpa),
            precipitation_mm,
        ))
    }
}

#[async_trait]
impl WeatherProvider for OpenMeteoProvider {
    async fn fetch(&self) -> Result<Observation, FetchError> {
        let response = self.fetch_forecast().await?;
        let observation = response.into_observation()?;

        tracing::debug!(?observation, "fetched current weather");
        Ok(observation)
    }
}

/// Index 0 of an hourly series is the current hour.
fn current_hour(series: &[Option<f64>], name: &'static str) -> Result<f64, FetchError> {
    series
        .first()
        .copied()
        .flatten()
        .ok_or(FetchError::MissingHourly(name))
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    match body.char_indices().nth(MAX) {
        Some((idx, _)) => format!("{}...", &body[..idx]),
        None => body.to_string(),
    }
}
