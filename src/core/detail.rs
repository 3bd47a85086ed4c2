// Station detail lookup and hour-over-hour metrics

use crate::core::constants::{WindDirection, EXCLUDED_DETAIL_COLUMNS};
use crate::core::dataset::Dataset;
use crate::core::error::{AqError, Result};
use chrono::{Duration, NaiveDate, NaiveDateTime, Timelike};
use serde::Serialize;

/// Outcome of a station/date/hour lookup. A combination with no matching
/// reading is a normal result, not an error.
#[derive(Debug, Clone)]
pub enum DetailResult {
    Found(DetailComparison),
    NotFound,
}

/// The matched reading and, when present, the reading exactly one hour
/// earlier for the same station.
#[derive(Debug, Clone)]
pub struct DetailComparison {
    pub station: String,
    pub time: NaiveDateTime,
    pub wind_code: String,
    pub row: usize,
    pub previous: Option<usize>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DeltaTone {
    Up,
    Down,
    Flat,
    Off,
}

#[derive(Debug, Clone, Serialize)]
pub struct Metric {
    pub label: String,
    pub value: String,
    pub delta: String,
    pub tone: DeltaTone,
}

/// The two display columns of the detail view.
#[derive(Debug, Clone, Serialize)]
pub struct MetricsPanel {
    pub left: Vec<Metric>,
    pub right: Vec<Metric>,
}

/// Locate the station's reading for `date` at `hour`, plus the reading at the
/// exact timestamp one hour earlier. The current side matches on truncated
/// date and hour-of-day; the previous side requires an exact timestamp.
pub fn detail(dataset: &Dataset, station: &str, date: NaiveDate, hour: u32) -> DetailResult {
    let row = dataset.station_rows(station).iter().copied().find(|&row| {
        let time = dataset.time(row);
        time.date() == date && time.hour() == hour
    });

    let Some(row) = row else {
        return DetailResult::NotFound;
    };
    let Some(at) = date.and_hms_opt(hour, 0, 0) else {
        return DetailResult::NotFound;
    };

    let previous = dataset.row_at(station, at - Duration::hours(1));

    DetailResult::Found(DetailComparison {
        station: station.to_string(),
        time: dataset.time(row),
        wind_code: dataset.wind_code(row).unwrap_or_default().to_string(),
        row,
        previous,
    })
}

/// Build the two-column metrics panel for a matched reading: every numeric
/// column outside the exclusion set, each paired with its percent change
/// versus the previous hour, plus the wind-direction metric.
pub fn metrics_panel(dataset: &Dataset, comparison: &DetailComparison) -> Result<MetricsPanel> {
    let mut left = Vec::new();
    let mut right = Vec::new();

    for (index, column) in dataset.columns().iter().enumerate() {
        if EXCLUDED_DETAIL_COLUMNS.contains(&column.name.as_str()) {
            continue;
        }
        let Some(values) = column.numeric() else {
            continue;
        };

        let current = values[comparison.row];
        let previous = comparison.previous.map(|row| values[row]);
        let (delta, tone) = percent_delta(current, previous);

        let metric = Metric {
            label: column.name.clone(),
            value: current
                .map(|v| format!("{v:.2}"))
                .unwrap_or_else(|| "N/A".to_string()),
            delta,
            tone,
        };

        // Parity follows the file's native column index, so the grid layout
        // is stable regardless of which columns are excluded
        if index % 2 == 0 {
            left.push(metric);
        } else {
            right.push(metric);
        }
    }

    let direction = WindDirection::from_code(&comparison.wind_code)
        .ok_or_else(|| AqError::UnknownWindCode(comparison.wind_code.clone()))?;
    left.push(Metric {
        label: "Wind direction".to_string(),
        value: format_degrees(direction.degrees()),
        delta: "N/A".to_string(),
        tone: DeltaTone::Off,
    });

    Ok(MetricsPanel { left, right })
}

/// Percent change versus the previous hour. Non-actionable cases collapse to
/// fixed placeholder strings with the `Off` tone: no previous-hour row or a
/// missing cell reads `N/A`, a zero previous value reads `0.00` (the division
/// is short-circuited, never attempted).
fn percent_delta(current: Option<f64>, previous: Option<Option<f64>>) -> (String, DeltaTone) {
    let Some(previous) = previous else {
        return ("N/A".to_string(), DeltaTone::Off);
    };
    let (Some(current), Some(previous)) = (current, previous) else {
        return ("N/A".to_string(), DeltaTone::Off);
    };
    if previous == 0.0 {
        return ("0.00".to_string(), DeltaTone::Off);
    }

    let delta = (current - previous) / previous * 100.0;
    let tone = if delta > 0.0 {
        DeltaTone::Up
    } else if delta < 0.0 {
        DeltaTone::Down
    } else {
        DeltaTone::Flat
    };
    (format!("{delta:.2}%"), tone)
}

fn format_degrees(degrees: f64) -> String {
    if degrees.fract() == 0.0 {
        format!("{degrees:.0}°")
    } else {
        format!("{degrees:.1}°")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CSV: &str = "\
station,time,wd,PM2.5,PM10,TEMP,year,month,day,hour
Aotizhongxin,2013-03-01 11:00:00,NNE,10.0,30.0,5.0,2013,3,1,11
Aotizhongxin,2013-03-01 12:00:00,N,15.0,30.0,4.0,2013,3,1,12
Aotizhongxin,2013-03-02 12:00:00,SE,20.0,0.0,NA,2013,3,2,12
Aotizhongxin,2013-03-03 11:30:00,E,8.0,12.0,6.0,2013,3,3,11
Aotizhongxin,2013-03-03 12:00:00,E,8.0,12.0,6.0,2013,3,3,12
Aotizhongxin,2013-03-04 12:00:00,XX,8.0,12.0,6.0,2013,3,4,12
";

    fn dataset() -> Dataset {
        Dataset::from_reader(CSV.as_bytes()).unwrap()
    }

    fn date(value: &str) -> NaiveDate {
        value.parse().unwrap()
    }

    fn find(metrics: &[Metric], label: &str) -> Metric {
        metrics
            .iter()
            .find(|m| m.label == label)
            .unwrap_or_else(|| panic!("metric {label} missing"))
            .clone()
    }

    #[test]
    fn test_not_found() {
        let ds = dataset();
        assert!(matches!(
            detail(&ds, "Aotizhongxin", date("2013-03-01"), 9),
            DetailResult::NotFound
        ));
        assert!(matches!(
            detail(&ds, "Huairou", date("2013-03-01"), 12),
            DetailResult::NotFound
        ));
    }

    #[test]
    fn test_found_without_previous_hour() {
        let ds = dataset();
        // 11:00 reading exists, 10:00 does not
        let DetailResult::Found(cmp) = detail(&ds, "Aotizhongxin", date("2013-03-01"), 11)
        else {
            panic!("expected Found");
        };
        assert!(cmp.previous.is_none());

        let panel = metrics_panel(&ds, &cmp).unwrap();
        for metric in panel.left.iter().chain(&panel.right) {
            assert_eq!(metric.delta, "N/A", "{}", metric.label);
            assert_eq!(metric.tone, DeltaTone::Off, "{}", metric.label);
        }
    }

    #[test]
    fn test_positive_delta() {
        let ds = dataset();
        let DetailResult::Found(cmp) = detail(&ds, "Aotizhongxin", date("2013-03-01"), 12)
        else {
            panic!("expected Found");
        };
        assert!(cmp.previous.is_some());

        let panel = metrics_panel(&ds, &cmp).unwrap();
        // (15 - 10) / 10 * 100
        let pm25 = find(&panel.right, "PM2.5");
        assert_eq!(pm25.value, "15.00");
        assert_eq!(pm25.delta, "50.00%");
        assert_eq!(pm25.tone, DeltaTone::Up);
    }

    #[test]
    fn test_negative_and_flat_deltas() {
        let ds = dataset();
        let DetailResult::Found(cmp) = detail(&ds, "Aotizhongxin", date("2013-03-01"), 12)
        else {
            panic!("expected Found");
        };
        let panel = metrics_panel(&ds, &cmp).unwrap();

        let temp = find(&panel.right, "TEMP");
        assert_eq!(temp.delta, "-20.00%");
        assert_eq!(temp.tone, DeltaTone::Down);

        let pm10 = find(&panel.left, "PM10");
        assert_eq!(pm10.delta, "0.00%");
        assert_eq!(pm10.tone, DeltaTone::Flat);
    }

    #[test]
    fn test_zero_previous_short_circuits() {
        let (delta, tone) = percent_delta(Some(20.0), Some(Some(0.0)));
        assert_eq!(delta, "0.00");
        assert_eq!(tone, DeltaTone::Off);

        // A missing cell on either side is never actionable
        assert_eq!(
            percent_delta(None, Some(Some(5.0))),
            ("N/A".to_string(), DeltaTone::Off)
        );
        assert_eq!(
            percent_delta(Some(5.0), Some(None)),
            ("N/A".to_string(), DeltaTone::Off)
        );
    }

    #[test]
    fn test_missing_cell_is_not_actionable() {
        let ds = dataset();
        // 2013-03-02 12:00 has TEMP=NA and no previous-hour row
        let DetailResult::Found(cmp) = detail(&ds, "Aotizhongxin", date("2013-03-02"), 12)
        else {
            panic!("expected Found");
        };
        let panel = metrics_panel(&ds, &cmp).unwrap();
        let temp = find(&panel.right, "TEMP");
        assert_eq!(temp.value, "N/A");
        assert_eq!(temp.delta, "N/A");
    }

    #[test]
    fn test_previous_requires_exact_timestamp() {
        let ds = dataset();
        // 11:30 reading matches hour 11 as a current row, but is not an exact
        // 11:00 previous-hour match for the 12:00 reading
        let DetailResult::Found(at_11) = detail(&ds, "Aotizhongxin", date("2013-03-03"), 11)
        else {
            panic!("expected Found");
        };
        assert_eq!(at_11.time.format("%H:%M").to_string(), "11:30");

        let DetailResult::Found(at_12) = detail(&ds, "Aotizhongxin", date("2013-03-03"), 12)
        else {
            panic!("expected Found");
        };
        assert!(at_12.previous.is_none());
    }

    #[test]
    fn test_panel_layout() {
        let ds = dataset();
        let DetailResult::Found(cmp) = detail(&ds, "Aotizhongxin", date("2013-03-01"), 12)
        else {
            panic!("expected Found");
        };
        let panel = metrics_panel(&ds, &cmp).unwrap();

        // Native indices: PM2.5=3, PM10=4, TEMP=5; wind metric closes the left
        let left: Vec<&str> = panel.left.iter().map(|m| m.label.as_str()).collect();
        let right: Vec<&str> = panel.right.iter().map(|m| m.label.as_str()).collect();
        assert_eq!(left, ["PM10", "Wind direction"]);
        assert_eq!(right, ["PM2.5", "TEMP"]);
    }

    #[test]
    fn test_wind_direction_metric() {
        let ds = dataset();
        let DetailResult::Found(cmp) = detail(&ds, "Aotizhongxin", date("2013-03-01"), 12)
        else {
            panic!("expected Found");
        };
        assert_eq!(cmp.wind_code, "N");

        let panel = metrics_panel(&ds, &cmp).unwrap();
        let wind = find(&panel.left, "Wind direction");
        assert_eq!(wind.value, "360°");
        assert_eq!(wind.delta, "N/A");
        assert_eq!(wind.tone, DeltaTone::Off);
    }

    #[test]
    fn test_unknown_wind_code_fails() {
        let ds = dataset();
        let DetailResult::Found(cmp) = detail(&ds, "Aotizhongxin", date("2013-03-04"), 12)
        else {
            panic!("expected Found");
        };
        match metrics_panel(&ds, &cmp) {
            Err(AqError::UnknownWindCode(code)) => assert_eq!(code, "XX"),
            other => panic!("expected UnknownWindCode, got {other:?}"),
        }
    }
}
