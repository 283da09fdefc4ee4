//! Excel export of the newest readings.

use chrono::{DateTime, Local};
use rust_xlsxwriter::{Format, Workbook};
use std::path::{Path, PathBuf};

use crate::{error::ExportError, model::Reading, store::ReadingStore};

/// Column labels, in sheet order.
pub const COLUMNS: [&str; 7] = [
    "Timestamp",
    "Temperature (°C)",
    "Wind Speed (m/s)",
    "Wind Direction",
    "Pressure (mmHg)",
    "Precipitation Type",
    "Precipitation Amount (mm)",
];

pub const SHEET_NAME: &str = "Weather";

/// `weather_data_<YYYYMMDD_HHMMSS>.xlsx` for the given local time.
pub fn export_file_name(at: DateTime<Local>) -> String {
    format!("weather_data_{}.xlsx", at.format("%Y%m%d_%H%M%S"))
}

#[derive(Debug, Clone)]
pub struct Exporter {
    store: ReadingStore,
    output_dir: PathBuf,
    limit: usize,
}

impl Exporter {
    pub fn new(store: ReadingStore, output_dir: impl Into<PathBuf>, limit: usize) -> Self {
        Self {
            store,
            output_dir: output_dir.into(),
            limit,
        }
    }

    /// Export the newest readings to a file named after the current time.
    pub fn export(&self) -> Result<PathBuf, ExportError> {
        self.export_at(Local::now())
    }

    pub fn export_at(&self, at: DateTime<Local>) -> Result<PathBuf, ExportError> {
        let readings = self.store.most_recent(self.limit)?;

        std::fs::create_dir_all(&self.output_dir)?;
        let path = self.output_dir.join(export_file_name(at));

        write_workbook(&path, &readings)?;

        tracing::info!(path = %path.display(), rows = readings.len(), "exported readings");
        Ok(path)
    }
}

fn write_workbook(path: &Path, readings: &[Reading]) -> Result<(), ExportError> {
    let mut workbook = Workbook::new();
    let header = Format::new().set_bold();

    {
        let sheet = workbook.add_worksheet();
        sheet.set_name(SHEET_NAME)?;

        for (col, label) in (0u16..).zip(COLUMNS) {
            sheet.write_string_with_format(0, col, label, &header)?;
        }
        sheet.set_column_width(0, 20.0)?;
        for col in 1..COLUMNS.len() as u16 {
            sheet.set_column_width(col, 18.0)?;
        }

        for (row, reading) in (1u32..).zip(readings) {
            let obs = &reading.observation;
            let timestamp = reading
                .timestamp
                .with_timezone(&Local)
                .format("%Y-%m-%d %H:%M:%S")
                .to_string();

            sheet.write_string(row, 0, timestamp)?;
            sheet.write_number(row, 1, obs.temperature_c)?;
            sheet.write_number(row, 2, obs.wind_speed_mps)?;
            sheet.write_string(row, 3, obs.wind_direction.label())?;
            sheet.write_number(row, 4, obs.pressure_mmhg)?;
            sheet.write_string(row, 5, obs.precipitation_type.label())?;
            sheet.write_number(row, 6, obs.precipitation_mm)?;
        }
    }

    workbook.save(path)?;
    Ok(())
}
