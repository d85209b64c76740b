//! Run configuration: what to select and how to draw it.
//!
//! Every top-level field and every selection field has a default, so a JSON
//! config file only needs the keys it changes. Panel styles are replaced
//! whole:
//!
//! ```json
//! { "selection": { "location": "Peru", "start": "2020-06-01", "end": "2020-12-31" },
//!   "stride": 7 }
//! ```

use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::color::parse_color;
use crate::data::decimate::DEFAULT_STRIDE;
use crate::data::filter::{Selection, ANALYSIS_COLUMNS};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("location must not be empty")]
    EmptyLocation,

    #[error("start date {start} is after end date {end}")]
    InvertedRange {
        start: chrono::NaiveDate,
        end: chrono::NaiveDate,
    },

    #[error("{field} must be positive, got {value}")]
    NonPositive { field: &'static str, value: f64 },

    #[error("'{column}' is not one of the analysis columns")]
    UnknownColumn { column: String },

    #[error("unrecognised color '{color}'")]
    UnknownColor { color: String },
}

// ---------------------------------------------------------------------------
// Styles
// ---------------------------------------------------------------------------

/// Window and chart size in logical pixels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FigureConfig {
    pub width: f32,
    /// Height of the 2×2 trend grid.
    pub trend_height: f32,
    /// Height of the bar comparison.
    pub comparison_height: f32,
}

impl Default for FigureConfig {
    fn default() -> Self {
        FigureConfig {
            width: 1500.0,
            trend_height: 1200.0,
            comparison_height: 500.0,
        }
    }
}

/// One line panel of the trend grid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinePanelStyle {
    pub column: String,
    pub title: String,
    pub y_label: String,
    pub color: String,
}

/// One bar series of a comparison panel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BarSeriesStyle {
    pub column: String,
    pub label: String,
    pub color: String,
}

/// A comparison panel: two bar series side by side.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BarPanelStyle {
    pub title: String,
    pub y_label: String,
    pub series: [BarSeriesStyle; 2],
}

fn line(column: &str, title: &str, y_label: &str, color: &str) -> LinePanelStyle {
    LinePanelStyle {
        column: column.into(),
        title: title.into(),
        y_label: y_label.into(),
        color: color.into(),
    }
}

fn bars(column: &str, label: &str, color: &str) -> BarSeriesStyle {
    BarSeriesStyle {
        column: column.into(),
        label: label.into(),
        color: color.into(),
    }
}

// ---------------------------------------------------------------------------
// RunConfig
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    pub selection: Selection,
    pub stride: NonZeroUsize,
    /// Figure title; derived from the selection when absent.
    pub title: Option<String>,
    pub figure: FigureConfig,
    /// Panels in row-major order: top-left, top-right, bottom-left, bottom-right.
    pub trend: [LinePanelStyle; 4],
    pub comparison: [BarPanelStyle; 2],
    /// Width of one bar, in row-position units. The second series of each
    /// comparison panel is shifted right by this much.
    pub bar_width: f64,
}

impl Default for RunConfig {
    fn default() -> Self {
        RunConfig {
            selection: Selection::default(),
            stride: DEFAULT_STRIDE,
            title: None,
            figure: FigureConfig::default(),
            trend: [
                line("total_cases", "Total cases", "Cumulative cases", "green"),
                line("new_cases", "New cases", "Daily new cases", "red"),
                line("total_deaths", "Total deaths", "Cumulative deaths", "orange"),
                line("new_deaths", "New deaths", "Daily new deaths", "blue"),
            ],
            comparison: [
                BarPanelStyle {
                    title: "Cases vs. deaths".into(),
                    y_label: "Daily new reports".into(),
                    series: [
                        bars("new_cases", "New cases", "orange"),
                        bars("new_deaths", "New deaths", "purple"),
                    ],
                },
                BarPanelStyle {
                    title: "Cases vs. deaths (cumulative per million)".into(),
                    y_label: "Per million inhabitants".into(),
                    series: [
                        bars("total_cases_per_million", "Cases per million", "green"),
                        bars("total_deaths_per_million", "Deaths per million", "blue"),
                    ],
                },
            ],
            bar_width: 5.0,
        }
    }
}

impl RunConfig {
    /// Read a JSON config file. Missing keys take their defaults.
    pub fn from_json_file(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let sel = &self.selection;
        if sel.location.trim().is_empty() {
            return Err(ConfigError::EmptyLocation);
        }
        if sel.start > sel.end {
            return Err(ConfigError::InvertedRange {
                start: sel.start,
                end: sel.end,
            });
        }

        let sizes = [
            ("bar_width", self.bar_width),
            ("figure.width", self.figure.width as f64),
            ("figure.trend_height", self.figure.trend_height as f64),
            ("figure.comparison_height", self.figure.comparison_height as f64),
        ];
        for (field, value) in sizes {
            if value.is_nan() || value <= 0.0 {
                return Err(ConfigError::NonPositive { field, value });
            }
        }

        let line_styles = self.trend.iter().map(|p| (&p.column, &p.color));
        let bar_styles = self
            .comparison
            .iter()
            .flat_map(|p| p.series.iter())
            .map(|s| (&s.column, &s.color));
        for (column, color) in line_styles.chain(bar_styles) {
            if !ANALYSIS_COLUMNS.contains(&column.as_str()) {
                return Err(ConfigError::UnknownColumn {
                    column: column.clone(),
                });
            }
            if parse_color(color).is_none() {
                return Err(ConfigError::UnknownColor {
                    color: color.clone(),
                });
            }
        }
        Ok(())
    }

    /// The explicit title, or one naming the location and date range.
    pub fn title(&self) -> String {
        match &self.title {
            Some(title) => title.clone(),
            None => format!(
                "Coronavirus in {} ({} to {})",
                self.selection.location,
                self.selection.start.format("%d %b %Y"),
                self.selection.end.format("%d %b %Y")
            ),
        }
    }
}
