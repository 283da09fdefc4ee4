//! SQLite-backed storage of readings.

use chrono::{DateTime, Utc};
use rusqlite::{Connection, OpenFlags, params};
use std::path::{Path, PathBuf};

use crate::{
    error::StoreError,
    model::{Observation, PrecipitationType, Reading, WindDirection},
};

/// Handle to the readings database.
///
/// The handle only remembers where the database lives; each operation opens
/// its own connection and closes it on return, leaving SQLite to serialize
/// concurrent writers and readers.
#[derive(Debug, Clone)]
pub struct ReadingStore {
    db_file: PathBuf,
}

impl ReadingStore {
    /// Open (creating if needed) the database at `db_file` and make sure the
    /// schema exists.
    pub fn open(db_file: impl AsRef<Path>) -> Result<Self, StoreError> {
        let db_file = db_file.as_ref().to_path_buf();

        if let Some(parent) = db_file.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }

        let store = ReadingStore { db_file };
        let conn = store.connect()?;
        conn.execute_batch(include_str!("store/create_schema.sql"))?;

        tracing::debug!(db_file = %store.db_file.display(), "reading store ready");
        Ok(store)
    }

    pub fn db_file(&self) -> &Path {
        &self.db_file
    }

    /// Append a reading stamped with the current time.
    pub fn insert(&self, observation: &Observation) -> Result<Reading, StoreError> {
        self.insert_at(observation, Utc::now())
    }

    /// Append a reading with an explicit timestamp.
    pub fn insert_at(
        &self,
        observation: &Observation,
        timestamp: DateTime<Utc>,
    ) -> Result<Reading, StoreError> {
        let conn = self.connect()?;

        conn.execute(
            "INSERT INTO weather_data (
                timestamp, temperature, wind_speed, wind_direction,
                pressure, precipitation_type, precipitation_amount
             ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            params![
                timestamp,
                observation.temperature_c,
                observation.wind_speed_mps,
                observation.wind_direction.label(),
                observation.pressure_mmhg,
                observation.precipitation_type.label(),
                observation.precipitation_mm,
            ],
        )?;

        Ok(Reading {
            id: conn.last_insert_rowid(),
            timestamp,
            observation: observation.clone(),
        })
    }

    /// Up to `n` readings, newest first.
    pub fn most_recent(&self, n: usize) -> Result<Vec<Reading>, StoreError> {
        let conn = self.connect()?;
        let limit = i64::try_from(n).unwrap_or(i64::MAX);

        let mut stmt = conn.prepare(
            "SELECT id, timestamp, temperature, wind_speed, wind_direction,
                    pressure, precipitation_type, precipitation_amount
             FROM weather_data
             ORDER BY timestamp DESC, id DESC
             LIMIT ?1",
        )?;

        let readings = stmt
            .query_and_then([limit], Self::parse_row_to_reading)?
            .collect::<Result<Vec<_>, StoreError>>()?;

        Ok(readings)
    }

    /// Number of stored readings.
    pub fn count(&self) -> Result<u64, StoreError> {
        let conn = self.connect()?;
        let count: i64 = conn.query_row("SELECT COUNT(*) FROM weather_data", [], |row| row.get(0))?;
        Ok(count.max(0) as u64)
    }

    fn connect(&self) -> Result<Connection, StoreError> {
        let conn = Connection::open_with_flags(
            &self.db_file,
            OpenFlags::SQLITE_OPEN_READ_WRITE | OpenFlags::SQLITE_OPEN_CREATE,
        )?;
        Ok(conn)
    }

    fn parse_row_to_reading(row: &rusqlite::Row) -> Result<Reading, StoreError> {
        let id: i64 = row.get(0)?;

        let wind_direction = row
            .get::<_, String>(4)?
            .parse::<WindDirection>()
            .map_err(|reason| StoreError::InvalidValue {
                id,
                column: "wind_direction",
                reason,
            })?;

        let precipitation_type = row
            .get::<_, String>(6)?
            .parse::<PrecipitationType>()
            .map_err(|reason| StoreError::InvalidValue {
                id,
                column: "precipitation_type",
                reason,
            })?;

        Ok(Reading {
            id,
            timestamp: row.get(1)?,
            observation: Observation {
                temperature_c: row.get(2)?,
                wind_speed_mps: row.get(3)?,
                wind_direction,
                pressure_mmhg: row.get(5)?,
                precipitation_type,
                precipitation_mm: row.get(7)?,
            },
        })
    }
}
