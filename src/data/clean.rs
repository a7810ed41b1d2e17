//! CSV parsing and cleaning into a [`TimeSeries`].
//!
//! Rows are streamed rather than collected, since the fallback dataset covers
//! every country and hundreds of thousands of rows.

use chrono::NaiveDate;
use csv::StringRecord;
use tracing::debug;

use crate::data::types::{Observation, TimeSeries};
use crate::error::DataError;

/// Cells treated as missing values
const NULL_TOKENS: &[&str] = &["", "nan", "NaN", "NA", "N/A", "null", "NULL", "None"];

/// Column names to pull out of a dataset
#[derive(Debug, Clone, Copy)]
pub struct ColumnSpec<'a> {
    pub date: &'a str,
    pub metric: &'a str,
    pub location: &'a str,
}

/// A CSV body whose header row has been read
pub struct CsvDataset<'a> {
    url: &'a str,
    reader: csv::Reader<&'a [u8]>,
    headers: StringRecord,
}

/// Row accounting for one extraction
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CleanStats {
    pub rows_read: usize,
    pub rows_in_scope: usize,
    pub rows_kept: usize,
}

impl<'a> CsvDataset<'a> {
    /// Read the header row of `body`
    pub fn open(body: &'a [u8], url: &'a str) -> Result<Self, DataError> {
        let mut reader = csv::ReaderBuilder::new()
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(body);

        let headers = reader
            .headers()
            .map_err(|e| DataError::Parse {
                url: url.to_string(),
                reason: e.to_string(),
            })?
            .clone();

        if headers.is_empty() {
            return Err(DataError::Parse {
                url: url.to_string(),
                reason: "no header row".to_string(),
            });
        }

        Ok(Self {
            url,
            reader,
            headers,
        })
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.column_index(name).is_some()
    }

    /// Filter to `country` (when a location column exists), keep dated numeric
    /// rows, and build the series
    pub fn extract(
        mut self,
        columns: ColumnSpec<'_>,
        country: &str,
    ) -> Result<(TimeSeries, CleanStats), DataError> {
        let missing = |column: &str| DataError::MissingColumn {
            url: self.url.to_string(),
            column: column.to_string(),
        };
        let date_idx = self.column_index(columns.date).ok_or_else(|| missing(columns.date))?;
        let metric_idx = self
            .column_index(columns.metric)
            .ok_or_else(|| missing(columns.metric))?;
        let location_idx = self.column_index(columns.location);

        if location_idx.is_none() {
            debug!(
                "No '{}' column in {}, treating dataset as country-scoped",
                columns.location, self.url
            );
        }

        let mut stats = CleanStats::default();
        let mut observations = Vec::new();
        let mut record = StringRecord::new();

        loop {
            let more = self.reader.read_record(&mut record).map_err(|e| DataError::Parse {
                url: self.url.to_string(),
                reason: e.to_string(),
            })?;
            if !more {
                break;
            }
            stats.rows_read += 1;

            if let Some(idx) = location_idx {
                if record.get(idx) != Some(country) {
                    continue;
                }
            }
            stats.rows_in_scope += 1;

            let Some(value) = record.get(metric_idx).and_then(parse_value) else {
                continue;
            };
            let Some(date) = record.get(date_idx).and_then(parse_date) else {
                continue;
            };
            observations.push(Observation::new(date, value));
        }

        let series = TimeSeries::from_observations(observations);
        stats.rows_kept = series.len();
        Ok((series, stats))
    }
}

fn is_null(cell: &str) -> bool {
    NULL_TOKENS.contains(&cell)
}

/// Parse a numeric cell; missing or non-finite values yield `None`
pub fn parse_value(cell: &str) -> Option<f64> {
    let cell = cell.trim();
    if is_null(cell) {
        return None;
    }
    cell.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Parse a date cell
///
/// Accepts `YYYY-MM-DD`, `YYYY/MM/DD`, `YYYY-MM` and `YYYY`, optionally
/// followed by a time component which is ignored.
pub fn parse_date(cell: &str) -> Option<NaiveDate> {
    let cell = cell.trim();
    if is_null(cell) {
        return None;
    }
    let day_part = cell
        .split(|c| c == 'T' || c == ' ')
        .next()
        .unwrap_or(cell);

    for format in ["%Y-%m-%d", "%Y/%m/%d"] {
        if let Ok(date) = NaiveDate::parse_from_str(day_part, format) {
            return Some(date);
        }
    }

    let mut parts = day_part.splitn(2, '-');
    let year = parts.next()?;
    if year.len() != 4 || !year.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let year: i32 = year.parse().ok()?;
    let month: u32 = match parts.next() {
        Some(m) if !m.is_empty() && m.len() <= 2 && m.bytes().all(|b| b.is_ascii_digit()) => {
            m.parse().ok()?
        }
        Some(_) => return None,
        None => 1,
    };
    NaiveDate::from_ymd_opt(year, month, 1)
}
