use eframe::egui::{self, Color32, RichText, Ui};
use egui_extras::{Column, DatePickerButton, TableBuilder};

use crate::data::loader;
use crate::state::{AppState, ChartView};

// ---------------------------------------------------------------------------
// Left side panel – selection widgets
// ---------------------------------------------------------------------------

/// Render the left selection panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Selection");
    ui.separator();

    ui.strong("Location");
    ui.text_edit_singleline(&mut state.draft.location);
    ui.add_space(4.0);

    ui.strong("From");
    ui.add(DatePickerButton::new(&mut state.draft.start).id_salt("start_date"));
    ui.strong("To");
    ui.add(DatePickerButton::new(&mut state.draft.end).id_salt("end_date"));
    ui.add_space(4.0);

    ui.strong("Keep every Nth row");
    ui.add(egui::DragValue::new(&mut state.draft.stride).range(1..=365));
    ui.add_space(8.0);

    ui.horizontal(|ui: &mut Ui| {
        let has_source = state.source.is_some();
        if ui
            .add_enabled(has_source, egui::Button::new("Apply"))
            .clicked()
        {
            state.apply_draft();
        }
        if ui.button("Reset").clicked() {
            state.reset_draft();
        }
    });

    ui.separator();

    let Some(output) = &state.output else {
        ui.label("No dataset loaded.");
        return;
    };
    let counts = output.counts;
    egui::Grid::new("run_summary")
        .num_columns(2)
        .show(ui, |ui: &mut Ui| {
            ui.label("Rows loaded");
            ui.label(counts.source_rows.to_string());
            ui.end_row();
            ui.label("Rows selected");
            ui.label(counts.selected_rows.to_string());
            ui.end_row();
            ui.label("Columns");
            ui.label(counts.selected_columns.to_string());
            ui.end_row();
            ui.label("Rows plotted");
            ui.label(counts.decimated_rows.to_string());
            ui.end_row();
        });
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
            let can_save = state.output.is_some();
            if ui
                .add_enabled(can_save, egui::Button::new("Save PNG…"))
                .clicked()
            {
                request_png_export(ui.ctx(), state);
                ui.close_menu();
            }
        });

        ui.separator();

        ui.selectable_value(&mut state.view, ChartView::Trend, "Trends");
        ui.selectable_value(&mut state.view, ChartView::Comparison, "Comparison");

        ui.separator();

        ui.toggle_value(&mut state.show_table, "Data");

        if let Some((path, _)) = &state.source {
            ui.separator();
            ui.label(path.display().to_string());
        }

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// Decimated rows window
// ---------------------------------------------------------------------------

/// Show the decimated table, one row per plotted point.
pub fn data_table(ui: &mut Ui, state: &AppState) {
    let Some(output) = &state.output else {
        ui.label("No dataset loaded.");
        return;
    };
    let decimated = &output.decimated;
    let columns = decimated.table().columns();

    TableBuilder::new(ui)
        .striped(true)
        .resizable(true)
        .column(Column::auto())
        .columns(Column::auto().at_least(60.0), columns.len())
        .header(20.0, |mut header| {
            header.col(|ui: &mut Ui| {
                ui.strong("position");
            });
            for name in columns {
                header.col(|ui: &mut Ui| {
                    ui.strong(name);
                });
            }
        })
        .body(|body| {
            let rows: Vec<_> = decimated.iter().collect();
            body.rows(18.0, rows.len(), |mut row| {
                let (position, cells) = rows[row.index()];
                row.col(|ui: &mut Ui| {
                    ui.label(position.to_string());
                });
                for cell in cells {
                    row.col(|ui: &mut Ui| {
                        ui.label(cell.to_string());
                    });
                }
            });
        });
}

// ---------------------------------------------------------------------------
// File dialogs
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open OWID data")
        .add_filter("Supported files", &["csv", "parquet", "pq", "json"])
        .add_filter("CSV", &["csv"])
        .add_filter("Parquet", &["parquet", "pq"])
        .add_filter("JSON", &["json"])
        .pick_file();

    if let Some(path) = file {
        match loader::load_file(&path) {
            Ok(table) => state.set_source(path, table),
            Err(e) => {
                log::error!("Failed to load file: {e}");
                state.status_message = Some(format!("Error: {e}"));
            }
        }
    }
}

/// Ask for a target path, then ask the viewport for a screenshot. The image
/// arrives as an event on a later frame.
fn request_png_export(ctx: &egui::Context, state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Save charts as PNG")
        .add_filter("PNG", &["png"])
        .set_file_name("charts.png")
        .save_file();

    if let Some(path) = file {
        state.pending_screenshot = Some(path);
        ctx.send_viewport_cmd(egui::ViewportCommand::Screenshot(egui::UserData::default()));
    }
}
