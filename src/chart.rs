//! Chart models built from a [`DecimatedTable`].
//!
//! Nothing here touches egui state: the models are plain data, and
//! [`crate::ui::plot`] draws them.

use eframe::egui::Color32;

use crate::color::color_or_gray;
use crate::config::{BarPanelStyle, BarSeriesStyle, LinePanelStyle, RunConfig};
use crate::data::decimate::DecimatedTable;
use crate::data::error::SchemaError;

// ---------------------------------------------------------------------------
// Chart A: 2×2 trend grid
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct LinePanel {
    pub title: String,
    pub y_label: String,
    pub color: Color32,
    /// Runs of consecutive reported values as `[row, value]`. A missing
    /// report breaks the line, so it starts a new segment.
    pub segments: Vec<Vec<[f64; 2]>>,
    /// Smallest and largest reported value; `None` when nothing was reported.
    pub y_range: Option<(f64, f64)>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TrendChart {
    pub title: String,
    /// X-axis labels: the date of each decimated row, in row order.
    pub dates: Vec<String>,
    /// Row-major: top-left, top-right, bottom-left, bottom-right.
    pub panels: [LinePanel; 4],
}

impl TrendChart {
    /// Date label for an x value, if it falls on a row.
    pub fn date_at(&self, x: f64) -> Option<&str> {
        let rounded = x.round();
        if (x - rounded).abs() > 1e-6 || rounded < 0.0 {
            return None;
        }
        self.dates.get(rounded as usize).map(String::as_str)
    }
}

fn line_panel(table: &DecimatedTable, style: &LinePanelStyle) -> Result<LinePanel, SchemaError> {
    let values = table.series(&style.column)?;

    let mut segments: Vec<Vec<[f64; 2]>> = Vec::new();
    let mut current = Vec::new();
    for (row, value) in values.iter().enumerate() {
        match value {
            Some(v) => current.push([row as f64, *v]),
            None if !current.is_empty() => segments.push(std::mem::take(&mut current)),
            None => {}
        }
    }
    if !current.is_empty() {
        segments.push(current);
    }

    Ok(LinePanel {
        title: style.title.clone(),
        y_label: style.y_label.clone(),
        color: color_or_gray(&style.color),
        segments,
        y_range: value_range(values.iter().flatten().copied()),
    })
}

pub fn trend_chart(table: &DecimatedTable, config: &RunConfig) -> Result<TrendChart, SchemaError> {
    let [a, b, c, d] = &config.trend;
    Ok(TrendChart {
        title: config.title(),
        dates: table.dates()?,
        panels: [
            line_panel(table, a)?,
            line_panel(table, b)?,
            line_panel(table, c)?,
            line_panel(table, d)?,
        ],
    })
}

// ---------------------------------------------------------------------------
// Chart B: side-by-side bar comparison
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct BarSeries {
    pub label: String,
    pub color: Color32,
    /// `[x, height]` per reported row; x is the row position plus the
    /// series offset.
    pub bars: Vec<[f64; 2]>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BarPanel {
    pub title: String,
    pub y_label: String,
    pub bar_width: f64,
    pub series: [BarSeries; 2],
}

#[derive(Debug, Clone, PartialEq)]
pub struct ComparisonChart {
    pub title: String,
    pub panels: [BarPanel; 2],
}

fn bar_series(
    table: &DecimatedTable,
    style: &BarSeriesStyle,
    offset: f64,
) -> Result<BarSeries, SchemaError> {
    let values = table.series(&style.column)?;
    let bars = table
        .positions()
        .iter()
        .zip(values)
        .filter_map(|(&pos, value)| value.map(|v| [pos as f64 + offset, v]))
        .collect();
    Ok(BarSeries {
        label: style.label.clone(),
        color: color_or_gray(&style.color),
        bars,
    })
}

fn bar_panel(
    table: &DecimatedTable,
    style: &BarPanelStyle,
    bar_width: f64,
) -> Result<BarPanel, SchemaError> {
    let [first, second] = &style.series;
    Ok(BarPanel {
        title: style.title.clone(),
        y_label: style.y_label.clone(),
        bar_width,
        series: [
            bar_series(table, first, 0.0)?,
            bar_series(table, second, bar_width)?,
        ],
    })
}

pub fn comparison_chart(
    table: &DecimatedTable,
    config: &RunConfig,
) -> Result<ComparisonChart, SchemaError> {
    let [left, right] = &config.comparison;
    Ok(ComparisonChart {
        title: config.title(),
        panels: [
            bar_panel(table, left, config.bar_width)?,
            bar_panel(table, right, config.bar_width)?,
        ],
    })
}

// ---------------------------------------------------------------------------
// Both charts together
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct ChartSet {
    pub trend: TrendChart,
    pub comparison: ComparisonChart,
}

impl ChartSet {
    pub fn build(table: &DecimatedTable, config: &RunConfig) -> Result<Self, SchemaError> {
        Ok(ChartSet {
            trend: trend_chart(table, config)?,
            comparison: comparison_chart(table, config)?,
        })
    }
}

fn value_range(values: impl Iterator<Item = f64>) -> Option<(f64, f64)> {
    values.fold(None, |acc, v| match acc {
        None => Some((v, v)),
        Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
    })
}
