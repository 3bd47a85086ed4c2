// CSV dataset loader and in-memory table

use crate::core::compression::{decoder, InputCompression};
use crate::core::constants::{
    REQUIRED_COLUMNS, STATION_COLUMN, TIME_COLUMN, TIME_FORMAT, TIME_FORMAT_ISO,
    WIND_COLUMN,
};
use crate::core::error::{AqError, Result};
use crate::core::model::{Column, ColumnValues};
use chrono::NaiveDateTime;
use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// The loaded dataset. Columnar, read-only after load; every view queries it
/// through shared references.
pub struct Dataset {
    columns: Vec<Column>,
    times: Vec<NaiveDateTime>,
    stations: Vec<String>,
    by_station: HashMap<String, Vec<usize>>,
}

impl Dataset {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)?;
        let input = decoder(file, InputCompression::from_path(path))?;
        Self::from_reader(input)
    }

    /// Parse a CSV stream. Requires the `station`, `time`, `wd` and `PM2.5`
    /// columns; any other column is carried as-is.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);

        let headers: Vec<String> = csv_reader
            .headers()?
            .iter()
            .map(str::to_string)
            .collect();

        for required in REQUIRED_COLUMNS {
            require_column(&headers, required)?;
        }
        let station_idx = require_column(&headers, STATION_COLUMN)?;
        let time_idx = require_column(&headers, TIME_COLUMN)?;

        let mut cells: Vec<Vec<String>> = vec![Vec::new(); headers.len()];
        for record in csv_reader.records() {
            let record = record?;
            for (i, cell) in record.iter().enumerate() {
                cells[i].push(cell.to_string());
            }
        }

        // Timestamps first: a row with an unparseable time is a format error,
        // not a missing value. Row numbers are 1-based file lines.
        let mut times = Vec::with_capacity(cells[time_idx].len());
        for (row, raw) in cells[time_idx].iter().enumerate() {
            let parsed = NaiveDateTime::parse_from_str(raw, TIME_FORMAT)
                .or_else(|_| NaiveDateTime::parse_from_str(raw, TIME_FORMAT_ISO))
                .map_err(|_| AqError::InvalidTimestamp {
                    row: row + 2,
                    value: raw.clone(),
                })?;
            times.push(parsed);
        }

        let mut stations = Vec::new();
        let mut by_station: HashMap<String, Vec<usize>> = HashMap::new();
        for (row, name) in cells[station_idx].iter().enumerate() {
            match by_station.get_mut(name) {
                Some(rows) => rows.push(row),
                None => {
                    stations.push(name.clone());
                    by_station.insert(name.clone(), vec![row]);
                }
            }
        }

        let columns = headers
            .into_iter()
            .zip(cells)
            .map(|(name, raw)| Column {
                name,
                values: infer_values(raw),
            })
            .collect();

        Ok(Self {
            columns,
            times,
            stations,
            by_station,
        })
    }

    pub fn len(&self) -> usize {
        self.times.len()
    }

    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }

    /// Columns in the file's native header order.
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// Unique station names in first-appearance order.
    pub fn stations(&self) -> &[String] {
        &self.stations
    }

    pub fn time(&self, row: usize) -> NaiveDateTime {
        self.times[row]
    }

    /// Row indices for a station, in file order. Unknown station yields an
    /// empty slice.
    pub fn station_rows(&self, station: &str) -> &[usize] {
        self.by_station
            .get(station)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// The station's row at an exact timestamp, if any.
    pub fn row_at(&self, station: &str, time: NaiveDateTime) -> Option<usize> {
        self.station_rows(station)
            .iter()
            .copied()
            .find(|&row| self.times[row] == time)
    }

    pub fn wind_code(&self, row: usize) -> Option<&str> {
        self.column(WIND_COLUMN)
            .and_then(Column::text)
            .map(|values| values[row].as_str())
    }
}

fn require_column(headers: &[String], name: &str) -> Result<usize> {
    headers
        .iter()
        .position(|h| h == name)
        .ok_or_else(|| AqError::MissingColumn(name.to_string()))
}

/// A column is numeric when every non-missing cell parses as a float. The
/// joined CSV marks missing readings as empty or `NA`.
fn infer_values(raw: Vec<String>) -> ColumnValues {
    let mut numeric = Vec::with_capacity(raw.len());
    for i in 0..raw.len() {
        let cell = raw[i].as_str();
        if is_missing(cell) {
            numeric.push(None);
            continue;
        }
        match cell.parse::<f64>() {
            Ok(value) => numeric.push(Some(value)),
            Err(_) => return ColumnValues::Text(raw),
        }
    }
    ColumnValues::Numeric(numeric)
}

fn is_missing(cell: &str) -> bool {
    cell.is_empty() || cell == "NA" || cell.eq_ignore_ascii_case("nan")
}
