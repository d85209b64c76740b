use std::hash::Hash;

use eframe::egui::{Color32, RichText, Ui};
use egui_plot::{Bar, BarChart, GridInput, GridMark, Legend, Line, Plot, PlotPoints};

use crate::chart::{BarPanel, ComparisonChart, LinePanel, TrendChart};

const PANEL_TITLE_SIZE: f32 = 16.0;
const FIGURE_TITLE_SIZE: f32 = 20.0;
const MIN_PANEL_HEIGHT: f32 = 120.0;
/// Room taken by a panel title above its plot.
const PANEL_TITLE_HEIGHT: f32 = 28.0;

fn figure_title(ui: &mut Ui, title: &str) {
    ui.vertical_centered(|ui: &mut Ui| {
        ui.label(
            RichText::new(title)
                .size(FIGURE_TITLE_SIZE)
                .strong()
                .color(Color32::BLUE),
        );
    });
    ui.add_space(6.0);
}

fn panel_title(ui: &mut Ui, title: &str) {
    ui.label(RichText::new(title).size(PANEL_TITLE_SIZE).strong());
}

// ---------------------------------------------------------------------------
// Chart A: trend grid
// ---------------------------------------------------------------------------

/// Render the 2×2 trend grid, filling the available space.
pub fn trend_grid(ui: &mut Ui, chart: &TrendChart) {
    figure_title(ui, &chart.title);

    let gap = ui.spacing().item_spacing.y;
    let panel_height =
        ((ui.available_height() - 2.0 * PANEL_TITLE_HEIGHT - 3.0 * gap) / 2.0).max(MIN_PANEL_HEIGHT);

    let [a, b, c, d] = &chart.panels;
    for (row, pair) in [[a, b], [c, d]].into_iter().enumerate() {
        ui.columns(2, |cols: &mut [Ui]| {
            for (col, (ui, panel)) in cols.iter_mut().zip(pair).enumerate() {
                line_plot(ui, ("trend", row * 2 + col), panel, chart, panel_height);
            }
        });
    }
}

fn line_plot(ui: &mut Ui, id: impl Hash, panel: &LinePanel, chart: &TrendChart, height: f32) {
    panel_title(ui, &panel.title);

    let rows = chart.dates.len();
    let mut plot = Plot::new(id)
        .height(height)
        .y_axis_label(panel.y_label.as_str())
        // One tick per row; the rows are already thinned by decimation.
        .x_grid_spacer(move |input: GridInput| row_marks(input, rows))
        .x_axis_formatter(|mark: GridMark, _range: &std::ops::RangeInclusive<f64>| {
            chart.date_at(mark.value).unwrap_or_default().to_owned()
        })
        .allow_drag(true)
        .allow_zoom(true)
        .allow_scroll(false);
    if rows > 0 {
        plot = plot.include_x(0.0).include_x((rows - 1) as f64);
    }
    if let Some((lo, hi)) = panel.y_range {
        plot = plot.include_y(lo).include_y(hi);
    }

    plot.show(ui, |plot_ui| {
        for segment in &panel.segments {
            let line = Line::new(PlotPoints::new(segment.clone()))
                .name(&panel.title)
                .color(panel.color)
                .width(2.0);
            plot_ui.line(line);
        }
    });
}

fn row_marks(input: GridInput, rows: usize) -> Vec<GridMark> {
    let (lo, hi) = input.bounds;
    (0..rows)
        .map(|i| i as f64)
        .filter(|&x| x >= lo && x <= hi)
        .map(|value| GridMark {
            value,
            step_size: 1.0,
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Chart B: bar comparison
// ---------------------------------------------------------------------------

/// Render the two comparison panels side by side.
pub fn comparison_bars(ui: &mut Ui, chart: &ComparisonChart) {
    figure_title(ui, &chart.title);

    let height = (ui.available_height() - PANEL_TITLE_HEIGHT).max(MIN_PANEL_HEIGHT);
    ui.columns(2, |cols: &mut [Ui]| {
        for (i, (ui, panel)) in cols.iter_mut().zip(&chart.panels).enumerate() {
            bar_plot(ui, ("comparison", i), panel, height);
        }
    });
}

fn bar_plot(ui: &mut Ui, id: impl Hash, panel: &BarPanel, height: f32) {
    panel_title(ui, &panel.title);

    Plot::new(id)
        .height(height)
        .legend(Legend::default())
        .x_axis_label("Row position")
        .y_axis_label(panel.y_label.as_str())
        .allow_drag(true)
        .allow_zoom(true)
        .allow_scroll(false)
        .show(ui, |plot_ui| {
            for series in &panel.series {
                let bars: Vec<Bar> = series
                    .bars
                    .iter()
                    .map(|&[x, height]| Bar::new(x, height).width(panel.bar_width))
                    .collect();
                let chart = BarChart::new(bars)
                    .name(&series.label)
                    .color(series.color);
                plot_ui.bar_chart(chart);
            }
        });
}

#[cfg(test)]
mod tests {
    use eframe::egui;

    use super::*;
    use crate::chart::ChartSet;
    use crate::config::RunConfig;
    use crate::data::decimate::{decimate, reindex, DEFAULT_STRIDE};
    use crate::data::filter::{select, Selection, ANALYSIS_COLUMNS};
    use crate::data::model::{CellValue, Table};

    fn render(mut draw: impl FnMut(&mut Ui)) {
        let ctx = egui::Context::default();
        let _ = ctx.run(egui::RawInput::default(), |ctx| {
            egui::CentralPanel::default().show(ctx, |ui| draw(ui));
        });
    }

    fn charts(rows: Vec<Vec<CellValue>>) -> ChartSet {
        let columns = ANALYSIS_COLUMNS.iter().map(|c| c.to_string()).collect();
        let table = Table::from_rows(columns, rows).unwrap();
        let filtered = select(&table, &Selection::default()).unwrap();
        let decimated = decimate(reindex(filtered), DEFAULT_STRIDE);
        ChartSet::build(&decimated, &RunConfig::default()).unwrap()
    }

    #[test]
    fn empty_charts_render_without_panicking() {
        let charts = charts(Vec::new());
        render(|ui| trend_grid(ui, &charts.trend));
        render(|ui| comparison_bars(ui, &charts.comparison));
    }

    #[test]
    fn populated_charts_render() {
        let rows = (1..=30)
            .map(|day| {
                let mut row = vec![
                    CellValue::Text("Ecuador".into()),
                    CellValue::Text(format!("2020-04-{day:02}")),
                ];
                row.extend((0..6).map(|k| {
                    if k == 3 && day % 7 == 0 {
                        CellValue::Null
                    } else {
                        CellValue::Number((day * (k + 1)) as f64)
                    }
                }));
                row
            })
            .collect();
        let charts = charts(rows);
        assert_eq!(charts.trend.dates.len(), 3);
        render(|ui| trend_grid(ui, &charts.trend));
        render(|ui| comparison_bars(ui, &charts.comparison));
    }

    #[test]
    fn row_marks_stay_inside_bounds() {
        let input = GridInput {
            bounds: (0.5, 3.2),
            base_step_size: 0.1,
        };
        let marks: Vec<f64> = row_marks(input, 10).iter().map(|m| m.value).collect();
        assert_eq!(marks, [1.0, 2.0, 3.0]);
    }
}
