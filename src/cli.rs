//! Command-line arguments.

use std::num::NonZeroUsize;
use std::path::PathBuf;

use chrono::NaiveDate;
use clap::Parser;

use crate::config::{ConfigError, RunConfig};

#[derive(Debug, Parser)]
#[command(
    name = "covid-trends",
    version,
    about = "Chart COVID-19 cases and deaths for one country over a date range",
    long_about = "Load an Our World in Data COVID-19 export, keep one location between two \
                  dates, thin the rows to every Nth day and show a 2x2 trend grid and a \
                  side-by-side bar comparison."
)]
pub struct Cli {
    /// Input table (.csv, .parquet or .json).
    #[arg(value_name = "INPUT", default_value = "owid-covid-data.csv")]
    pub input: PathBuf,

    /// JSON run configuration; flags below override it.
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Location to keep, e.g. "Ecuador".
    #[arg(long)]
    pub location: Option<String>,

    /// First day included.
    #[arg(long, value_name = "YYYY-MM-DD")]
    pub start: Option<NaiveDate>,

    /// Last day included.
    #[arg(long, value_name = "YYYY-MM-DD")]
    pub end: Option<NaiveDate>,

    /// Keep every Nth selected row.
    #[arg(long, value_name = "N")]
    pub stride: Option<NonZeroUsize>,

    /// Print the plotted rows instead of opening a window.
    #[arg(long)]
    pub headless: bool,
}

impl Cli {
    /// Config file (or defaults) with command-line overrides applied, validated.
    pub fn run_config(&self) -> Result<RunConfig, ConfigError> {
        let mut config = match &self.config {
            Some(path) => RunConfig::from_json_file(path)?,
            None => RunConfig::default(),
        };
        if let Some(location) = &self.location {
            config.selection.location = location.clone();
        }
        if let Some(start) = self.start {
            config.selection.start = start;
        }
        if let Some(end) = self.end {
            config.selection.end = end;
        }
        if let Some(stride) = self.stride {
            config.stride = stride;
        }
        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;

    #[test]
    fn defaults() {
        let cli = Cli::try_parse_from(["covid-trends"]).unwrap();
        assert_eq!(cli.input, PathBuf::from("owid-covid-data.csv"));
        assert!(!cli.headless);
        assert_eq!(cli.run_config().unwrap(), RunConfig::default());
    }

    #[test]
    fn flags_override_config_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("run.json");
        std::fs::write(&path, r#"{ "selection": { "location": "Peru", "start": "2020-06-01", "end": "2020-07-01" }, "stride": 3 }"#).unwrap();

        let cli = Cli::try_parse_from([
            "covid-trends",
            "data.csv",
            "--config",
            path.to_str().unwrap(),
            "--location",
            "Chile",
            "--stride",
            "5",
            "--headless",
        ])
        .unwrap();
        let config = cli.run_config().unwrap();
        assert_eq!(config.selection.location, "Chile");
        assert_eq!(config.selection.start, NaiveDate::from_ymd_opt(2020, 6, 1).unwrap());
        assert_eq!(config.stride.get(), 5);
        assert!(cli.headless);
    }

    #[test]
    fn bad_values_are_rejected() {
        assert!(Cli::try_parse_from(["covid-trends", "--stride", "0"]).is_err());
        assert!(Cli::try_parse_from(["covid-trends", "--start", "04/01/2020"]).is_err());

        let cli = Cli::try_parse_from(["covid-trends", "--start", "2021-01-01"]).unwrap();
        assert!(matches!(
            cli.run_config(),
            Err(ConfigError::InvertedRange { .. })
        ));
    }
}
