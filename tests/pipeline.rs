//! End-to-end: CSV on disk → loader → selector → decimator → chart models.

use std::fmt::Write as _;
use std::path::PathBuf;

use chrono::{Days, NaiveDate};
use tempfile::TempDir;

use covid_trends::chart::ChartSet;
use covid_trends::config::RunConfig;
use covid_trends::data::error::{LoadError, SchemaError};
use covid_trends::data::filter::ANALYSIS_COLUMNS;
use covid_trends::data::loader::load_file;
use covid_trends::pipeline;

/// OWID-like CSV with spaces in some headers. One row per (location, day).
fn write_csv(dir: &TempDir, locations: &[&str], first: NaiveDate, days: u64) -> PathBuf {
    let mut csv = String::from(
        "iso_code,location,date,total cases,new cases,total deaths,new deaths,\
         total cases per million,total deaths per million,population\n",
    );
    for location in locations {
        for d in 0..days {
            let date = first + Days::new(d);
            let n = d as f64;
            writeln!(
                csv,
                "XXX,{location},{},{},{},{},{},{},{},1000000",
                date.format("%Y-%m-%d"),
                n * 100.0,
                n,
                n * 10.0,
                if d % 3 == 0 { String::new() } else { format!("{}", n / 10.0) },
                n * 2.0,
                n / 2.0,
            )
            .unwrap();
        }
    }
    let path = dir.path().join("owid-covid-data.csv");
    std::fs::write(&path, csv).unwrap();
    path
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[test]
fn five_months_of_ecuador_end_to_end() {
    let dir = TempDir::new().unwrap();
    let path = write_csv(&dir, &["Ecuador"], date(2020, 4, 1), 153);
    let config = RunConfig::default();

    let table = load_file(&path).unwrap();
    assert!(table.column_index("total_cases_per_million").is_some());

    let (decimated, counts) = pipeline::run(&table, &config.selection, config.stride).unwrap();
    assert_eq!(counts.selected_rows, 153);
    assert_eq!(counts.selected_columns, 8);
    assert_eq!(decimated.len(), 16);
    assert_eq!(decimated.table().columns(), ANALYSIS_COLUMNS);
    assert_eq!(
        decimated.positions(),
        (0..=150).step_by(10).collect::<Vec<_>>()
    );

    let charts = ChartSet::build(&decimated, &config).unwrap();
    assert_eq!(charts.trend.dates.len(), 16);
    assert_eq!(charts.trend.dates[15], "2020-08-29");
    // Second bar series sits one bar width to the right.
    let [cases, deaths] = &charts.comparison.panels[0].series;
    assert_eq!(cases.bars[1][0], 10.0);
    assert!(deaths.bars.iter().all(|b| (b[0] - 5.0) % 10.0 == 0.0));
}

#[test]
fn other_locations_and_days_outside_the_window_are_dropped() {
    let dir = TempDir::new().unwrap();
    // 2020-03-01 .. 2020-09-30 for three countries.
    let path = write_csv(&dir, &["Peru", "Ecuador", "Colombia"], date(2020, 3, 1), 214);
    let config = RunConfig::default();

    let table = load_file(&path).unwrap();
    assert_eq!(table.len(), 3 * 214);

    let (decimated, counts) = pipeline::run(&table, &config.selection, config.stride).unwrap();
    assert_eq!(counts.selected_rows, 153);
    assert_eq!(decimated.len(), 16);
    let dates = decimated.dates().unwrap();
    assert_eq!(dates[0], "2020-04-01");
    for (_, row) in decimated.iter() {
        assert_eq!(row[0].as_str(), Some("Ecuador"));
    }
}

#[test]
fn header_only_file_gives_empty_charts() {
    let dir = TempDir::new().unwrap();
    let path = write_csv(&dir, &[], date(2020, 4, 1), 0);
    let config = RunConfig::default();

    let table = load_file(&path).unwrap();
    let (decimated, counts) = pipeline::run(&table, &config.selection, config.stride).unwrap();
    assert_eq!(counts.selected_rows, 0);
    assert!(decimated.is_empty());

    let charts = ChartSet::build(&decimated, &config).unwrap();
    assert!(charts.trend.panels.iter().all(|p| p.segments.is_empty()));
}

#[test]
fn missing_required_column_stops_before_filtering() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("partial.csv");
    std::fs::write(&path, "location,date,new_cases\nEcuador,2020-04-01,3\n").unwrap();
    let config = RunConfig::default();

    let table = load_file(&path).unwrap();
    let err = pipeline::run(&table, &config.selection, config.stride).unwrap_err();
    let SchemaError::MissingColumns { columns } = err;
    assert_eq!(columns.len(), 5);
}

#[test]
fn ragged_file_is_fatal() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("ragged.csv");
    std::fs::write(&path, "location,date\nEcuador,2020-04-01\nEcuador\n").unwrap();
    assert!(matches!(load_file(&path), Err(LoadError::Ragged { row: 2, .. })));
}
