// Data structures for the loaded dataset and its derived aggregates

use chrono::{Datelike, Days, Months, NaiveDate, NaiveDateTime};
use serde::Serialize;

use crate::core::error::{AqError, Result};

/// One CSV column, preserving the header name. Numeric columns keep missing
/// cells as `None`; anything that does not parse as a float throughout stays
/// text.
#[derive(Debug, Clone)]
pub struct Column {
    pub name: String,
    pub values: ColumnValues,
}

#[derive(Debug, Clone)]
pub enum ColumnValues {
    Numeric(Vec<Option<f64>>),
    Text(Vec<String>),
}

impl Column {
    pub fn is_numeric(&self) -> bool {
        matches!(self.values, ColumnValues::Numeric(_))
    }

    pub fn numeric(&self) -> Option<&[Option<f64>]> {
        match &self.values {
            ColumnValues::Numeric(values) => Some(values),
            ColumnValues::Text(_) => None,
        }
    }

    pub fn text(&self) -> Option<&[String]> {
        match &self.values {
            ColumnValues::Text(values) => Some(values),
            ColumnValues::Numeric(_) => None,
        }
    }

    pub fn len(&self) -> usize {
        match &self.values {
            ColumnValues::Numeric(values) => values.len(),
            ColumnValues::Text(values) => values.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A calendar month, ordered chronologically. Parsed from and formatted as
/// `YYYY-MM`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MonthKey {
    pub year: i32,
    pub month: u32,
}

impl MonthKey {
    pub fn new(year: i32, month: u32) -> Result<Self> {
        if !(1..=12).contains(&month) {
            return Err(AqError::ParseError(format!(
                "month out of range: {month}"
            )));
        }
        Ok(Self { year, month })
    }

    pub fn from_datetime(time: &NaiveDateTime) -> Self {
        Self {
            year: time.year(),
            month: time.month(),
        }
    }

    pub fn parse(value: &str) -> Result<Self> {
        let (year, month) = value.split_once('-').ok_or_else(|| {
            AqError::ParseError(format!("expected YYYY-MM, got {value:?}"))
        })?;
        let year = year
            .parse::<i32>()
            .map_err(|_| AqError::ParseError(format!("bad year in {value:?}")))?;
        let month = month
            .parse::<u32>()
            .map_err(|_| AqError::ParseError(format!("bad month in {value:?}")))?;
        Self::new(year, month)
    }

    /// Last day of the month. Groups are labeled with their month end,
    /// matching the dashboard's resampling convention.
    pub fn month_end(&self) -> NaiveDate {
        // month is validated on construction, so the first day always exists
        let first = NaiveDate::from_ymd_opt(self.year, self.month, 1)
            .expect("validated month");
        first + Months::new(1) - Days::new(1)
    }
}

impl std::fmt::Display for MonthKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

/// Mean of one numeric column over one station+month group. `None` when every
/// cell in the group is missing.
#[derive(Debug, Clone, Serialize)]
pub struct ColumnMean {
    pub column: String,
    pub mean: Option<f64>,
}

/// Per-month means of every numeric column for one station. Computed on
/// demand, never stored.
#[derive(Debug, Clone)]
pub struct MonthlyAggregate {
    pub month: MonthKey,
    pub month_end: NaiveDate,
    pub rows: usize,
    pub means: Vec<ColumnMean>,
}

impl MonthlyAggregate {
    pub fn mean_of(&self, column: &str) -> Option<f64> {
        self.means
            .iter()
            .find(|m| m.column == column)
            .and_then(|m| m.mean)
    }
}

/// One point of the PM2.5 line chart.
#[derive(Debug, Clone, Serialize)]
pub struct TrendPoint {
    pub month: String,
    pub label: String,
    pub month_end: NaiveDate,
    pub pm25: Option<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_month_key_parse_and_display() {
        let key = MonthKey::parse("2013-03").unwrap();
        assert_eq!(key, MonthKey { year: 2013, month: 3 });
        assert_eq!(key.to_string(), "2013-03");
    }

    #[test]
    fn test_month_key_parse_rejects_garbage() {
        assert!(MonthKey::parse("2013").is_err());
        assert!(MonthKey::parse("2013-13").is_err());
        assert!(MonthKey::parse("2013-xx").is_err());
    }

    #[test]
    fn test_month_key_ordering() {
        let feb = MonthKey::parse("2013-02").unwrap();
        let mar = MonthKey::parse("2013-03").unwrap();
        let jan_next = MonthKey::parse("2014-01").unwrap();
        assert!(feb < mar);
        assert!(mar < jan_next);
    }

    #[test]
    fn test_month_end() {
        let mar = MonthKey::parse("2013-03").unwrap();
        assert_eq!(mar.month_end(), NaiveDate::from_ymd_opt(2013, 3, 31).unwrap());

        let feb_leap = MonthKey::parse("2016-02").unwrap();
        assert_eq!(
            feb_leap.month_end(),
            NaiveDate::from_ymd_opt(2016, 2, 29).unwrap()
        );

        let dec = MonthKey::parse("2013-12").unwrap();
        assert_eq!(dec.month_end(), NaiveDate::from_ymd_opt(2013, 12, 31).unwrap());
    }
}
