use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// Hectopascal to millimetre of mercury.
pub const HPA_TO_MMHG: f64 = 0.75006;

/// Convert a pressure reading from hPa to mmHg.
pub fn hpa_to_mmhg(hpa: f64) -> f64 {
    hpa * HPA_TO_MMHG
}

/// Eight compass points, clockwise from North.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WindDirection {
    N,
    NE,
    E,
    SE,
    S,
    SW,
    W,
    NW,
}

impl WindDirection {
    pub const ALL: [WindDirection; 8] = [
        WindDirection::N,
        WindDirection::NE,
        WindDirection::E,
        WindDirection::SE,
        WindDirection::S,
        WindDirection::SW,
        WindDirection::W,
        WindDirection::NW,
    ];

    /// Map a meteorological wind direction in degrees to its compass sector.
    ///
    /// Each sector is 45° wide and centred on its point, so North covers
    /// `[337.5, 22.5)`. Inputs outside `[0, 360)` are wrapped first.
    pub fn from_degrees(degrees: f64) -> Self {
        let shifted = (degrees + 22.5).rem_euclid(360.0);
        let index = (shifted / 45.0).floor() as usize;
        // rem_euclid can round up to exactly 360.0 for tiny negative inputs
        Self::ALL[index % Self::ALL.len()]
    }

    pub fn label(&self) -> &'static str {
        match self {
            WindDirection::N => "N",
            WindDirection::NE => "NE",
            WindDirection::E => "E",
            WindDirection::SE => "SE",
            WindDirection::S => "S",
            WindDirection::SW => "SW",
            WindDirection::W => "W",
            WindDirection::NW => "NW",
        }
    }
}

impl fmt::Display for WindDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for WindDirection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|dir| dir.label().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown wind direction '{s}'"))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PrecipitationType {
    Rain,
    None,
}

impl PrecipitationType {
    /// Anything strictly above zero millimetres counts as rain.
    pub fn from_amount(mm: f64) -> Self {
        if mm > 0.0 {
            PrecipitationType::Rain
        } else {
            PrecipitationType::None
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            PrecipitationType::Rain => "rain",
            PrecipitationType::None => "none",
        }
    }
}

impl fmt::Display for PrecipitationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for PrecipitationType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "rain" => Ok(PrecipitationType::Rain),
            "none" => Ok(PrecipitationType::None),
            _ => Err(format!("unknown precipitation type '{s}'")),
        }
    }
}

/// The measured part of a reading, as produced by a weather provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    pub temperature_c: f64,
    pub wind_speed_mps: f64,
    pub wind_direction: WindDirection,
    pub pressure_mmhg: f64,
    pub precipitation_type: PrecipitationType,
    pub precipitation_mm: f64,
}

impl Observation {
    pub fn new(
        temperature_c: f64,
        wind_speed_mps: f64,
        wind_direction: WindDirection,
        pressure_mmhg: f64,
        precipitation_mm: f64,
    ) -> Self {
        Self {
            temperature_c,
            wind_speed_mps,
            wind_direction,
            pressure_mmhg,
            precipitation_type: PrecipitationType::from_amount(precipitation_mm),
            precipitation_mm,
        }
    }
}

/// A stored observation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reading {
    pub id: i64,
    pub timestamp: DateTime<Utc>,
    pub observation: Observation,
}
