use std::sync::Arc;

use eframe::egui::{self, ColorImage};

use crate::export;
use crate::state::{AppState, ChartView};
use crate::ui::{panels, plot};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct CovidTrendsApp {
    pub state: AppState,
}

impl CovidTrendsApp {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }

    /// Write any screenshot delivered this frame to the path chosen for it.
    fn save_screenshots(&mut self, ctx: &egui::Context) {
        let shots: Vec<Arc<ColorImage>> = ctx.input(|i| {
            i.raw
                .events
                .iter()
                .filter_map(|e| match e {
                    egui::Event::Screenshot { image, .. } => Some(image.clone()),
                    _ => None,
                })
                .collect()
        });

        for shot in shots {
            let Some(path) = self.state.pending_screenshot.take() else {
                continue;
            };
            if let Err(e) = export::save_png(&path, &shot) {
                log::error!("Failed to save screenshot: {e:#}");
                self.state.status_message = Some(format!("Error: {e:#}"));
            }
        }
    }
}

impl eframe::App for CovidTrendsApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.save_screenshots(ctx);

        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: selection ----
        egui::SidePanel::left("selection_panel")
            .default_width(220.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Central panel: charts ----
        egui::CentralPanel::default().show(ctx, |ui| match &self.state.output {
            None => {
                ui.centered_and_justified(|ui| {
                    ui.heading("Open a file to chart it  (File → Open…)");
                });
            }
            Some(output) => match self.state.view {
                ChartView::Trend => plot::trend_grid(ui, &output.charts.trend),
                ChartView::Comparison => plot::comparison_bars(ui, &output.charts.comparison),
            },
        });

        // ---- Floating window: decimated rows ----
        let mut show_table = self.state.show_table;
        egui::Window::new("Plotted rows")
            .open(&mut show_table)
            .default_width(700.0)
            .show(ctx, |ui| panels::data_table(ui, &self.state));
        self.state.show_table = show_table;
    }
}
