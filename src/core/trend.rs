// Monthly trend aggregation

use crate::core::constants::PM25_COLUMN;
use crate::core::dataset::Dataset;
use crate::core::model::{Column, ColumnMean, MonthKey, MonthlyAggregate, TrendPoint};
use std::collections::BTreeMap;

/// Per-month means of every numeric column for one station, sorted ascending
/// by month. An unknown station yields an empty vec.
pub fn monthly_means(dataset: &Dataset, station: &str) -> Vec<MonthlyAggregate> {
    let numeric_columns: Vec<&Column> = dataset
        .columns()
        .iter()
        .filter(|c| c.is_numeric())
        .collect();

    // (per-column (sum, non-missing count), rows in group)
    let mut groups: BTreeMap<MonthKey, (Vec<(f64, usize)>, usize)> = BTreeMap::new();

    for &row in dataset.station_rows(station) {
        let key = MonthKey::from_datetime(&dataset.time(row));
        let (sums, rows) = groups
            .entry(key)
            .or_insert_with(|| (vec![(0.0, 0); numeric_columns.len()], 0));
        *rows += 1;

        for (slot, column) in sums.iter_mut().zip(&numeric_columns) {
            if let Some(value) = column.numeric().and_then(|values| values[row]) {
                slot.0 += value;
                slot.1 += 1;
            }
        }
    }

    groups
        .into_iter()
        .map(|(month, (sums, rows))| MonthlyAggregate {
            month,
            month_end: month.month_end(),
            rows,
            means: numeric_columns
                .iter()
                .zip(sums)
                .map(|(column, (sum, count))| ColumnMean {
                    column: column.name.clone(),
                    // Mean skips missing cells; an all-missing group has none
                    mean: (count > 0).then(|| sum / count as f64),
                })
                .collect(),
        })
        .collect()
}

/// Monthly means restricted to `[start, end]` inclusive. An inverted range
/// selects nothing and yields an empty vec.
pub fn aggregate(
    dataset: &Dataset,
    station: &str,
    start: MonthKey,
    end: MonthKey,
) -> Vec<MonthlyAggregate> {
    monthly_means(dataset, station)
        .into_iter()
        .filter(|a| a.month >= start && a.month <= end)
        .collect()
}

/// The PM2.5 line-chart series over the selected month range.
pub fn trend_series(
    dataset: &Dataset,
    station: &str,
    start: MonthKey,
    end: MonthKey,
) -> Vec<TrendPoint> {
    aggregate(dataset, station, start, end)
        .into_iter()
        .map(|a| TrendPoint {
            month: a.month.to_string(),
            label: a.month_end.format("%b %Y").to_string(),
            month_end: a.month_end,
            pm25: a.mean_of(PM25_COLUMN),
        })
        .collect()
}

/// First and last month with data for the station; `None` when it has no rows.
pub fn month_range(dataset: &Dataset, station: &str) -> Option<(MonthKey, MonthKey)> {
    let mut keys = dataset
        .station_rows(station)
        .iter()
        .map(|&row| MonthKey::from_datetime(&dataset.time(row)));

    let first = keys.next()?;
    let (min, max) = keys.fold((first, first), |(min, max), key| {
        (min.min(key), max.max(key))
    });
    Some((min, max))
}

#[cfg(test)]
mod tests {
    use super::*;

    const CSV: &str = "\
station,time,wd,PM2.5,TEMP
Aotizhongxin,2013-04-01 09:00:00,SE,40.0,12.0
Aotizhongxin,2013-03-01 11:00:00,N,10.0,4.0
Aotizhongxin,2013-03-15 12:00:00,NE,20.0,6.0
Aotizhongxin,2013-04-02 10:00:00,SSW,NA,14.0
Dingling,2013-03-01 12:00:00,W,99.0,3.0
";

    fn dataset() -> Dataset {
        Dataset::from_reader(CSV.as_bytes()).unwrap()
    }

    fn month(value: &str) -> MonthKey {
        MonthKey::parse(value).unwrap()
    }

    #[test]
    fn test_groups_by_month_sorted_ascending() {
        let ds = dataset();
        let means = monthly_means(&ds, "Aotizhongxin");
        assert_eq!(means.len(), 2);
        assert_eq!(means[0].month, month("2013-03"));
        assert_eq!(means[1].month, month("2013-04"));
        assert_eq!(means[0].rows, 2);
        assert_eq!(means[1].rows, 2);
    }

    #[test]
    fn test_month_end_labels() {
        let ds = dataset();
        let means = monthly_means(&ds, "Aotizhongxin");
        assert_eq!(means[0].month_end.to_string(), "2013-03-31");
        assert_eq!(means[1].month_end.to_string(), "2013-04-30");
    }

    #[test]
    fn test_means_skip_missing_cells() {
        let ds = dataset();
        let means = monthly_means(&ds, "Aotizhongxin");
        // March: (10 + 20) / 2
        assert_eq!(means[0].mean_of("PM2.5"), Some(15.0));
        // April: one NA cell, mean over the remaining reading
        assert_eq!(means[1].mean_of("PM2.5"), Some(40.0));
        assert_eq!(means[1].mean_of("TEMP"), Some(13.0));
    }

    #[test]
    fn test_unknown_station_is_empty() {
        let ds = dataset();
        assert!(monthly_means(&ds, "Huairou").is_empty());
        assert!(aggregate(&ds, "Huairou", month("2013-01"), month("2013-12")).is_empty());
    }

    #[test]
    fn test_range_is_inclusive() {
        let ds = dataset();
        let only_march = aggregate(&ds, "Aotizhongxin", month("2013-03"), month("2013-03"));
        assert_eq!(only_march.len(), 1);
        assert_eq!(only_march[0].month, month("2013-03"));

        let both = aggregate(&ds, "Aotizhongxin", month("2013-03"), month("2013-04"));
        assert_eq!(both.len(), 2);
    }

    #[test]
    fn test_inverted_range_is_empty() {
        let ds = dataset();
        assert!(aggregate(&ds, "Aotizhongxin", month("2013-04"), month("2013-03")).is_empty());
    }

    #[test]
    fn test_trend_series_projects_pm25() {
        let ds = dataset();
        let series = trend_series(&ds, "Aotizhongxin", month("2013-03"), month("2013-04"));
        assert_eq!(series.len(), 2);
        assert_eq!(series[0].label, "Mar 2013");
        assert_eq!(series[0].pm25, Some(15.0));
        assert_eq!(series[1].month, "2013-04");
    }

    #[test]
    fn test_month_range() {
        let ds = dataset();
        assert_eq!(
            month_range(&ds, "Aotizhongxin"),
            Some((month("2013-03"), month("2013-04")))
        );
        assert_eq!(month_range(&ds, "Dingling"), Some((month("2013-03"), month("2013-03"))));
        assert_eq!(month_range(&ds, "Huairou"), None);
    }
}
