use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};

use crate::data::export::EXPORT_FILE_NAME;
use crate::data::filter::CategoricalField;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Left side panel – filter widgets
// ---------------------------------------------------------------------------

/// Render the left filter panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.add_space(4.0);
    ui.heading("Filter Options");
    ui.separator();

    let Some(table) = &state.table else {
        ui.label("No dataset loaded.");
        return;
    };

    // Clone the load-time domains so we can mutate state inside the loop.
    let ranges = table.ranges.clone();
    let domains: Vec<(CategoricalField, Vec<String>)> = CategoricalField::ALL
        .iter()
        .map(|f| (*f, f.domain(table).iter().cloned().collect()))
        .collect();

    let mut changed = false;

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            // ---- Numeric range filters ----
            changed |= range_controls(ui, "Age", &mut state.filters.age, ranges.age, 1.0);
            changed |= range_controls(ui, "Income", &mut state.filters.income, ranges.income, 500.0);
            changed |= range_controls(
                ui,
                "Credit Score",
                &mut state.filters.credit_score,
                ranges.credit_score,
                5.0,
            );
            ui.separator();

            // ---- Per-column categorical filters (collapsible) ----
            for (field, values) in &domains {
                let n_selected = state.filters.selection(*field).len();
                let header_text = format!("{}  ({n_selected}/{})", field.label(), values.len());

                egui::CollapsingHeader::new(RichText::new(header_text).strong())
                    .id_salt(field.label())
                    .default_open(false)
                    .show(ui, |ui: &mut Ui| {
                        // Select all / none buttons
                        ui.horizontal(|ui: &mut Ui| {
                            if ui.small_button("All").clicked() {
                                state.select_all(*field);
                            }
                            if ui.small_button("None").clicked() {
                                state.select_none(*field);
                            }
                        });

                        for value in values {
                            let mut checked = state.filters.selection(*field).contains(value);
                            if ui.checkbox(&mut checked, value.as_str()).changed() {
                                state.toggle_filter_value(*field, value);
                            }
                        }
                    });
            }
        });

    // Recompute the view after any range change; the categorical handlers
    // refilter on their own.
    if changed {
        state.refilter();
    }
}

/// A min/max pair of drag values clamped to the observed bounds.
fn range_controls<T: egui::emath::Numeric>(
    ui: &mut Ui,
    label: &str,
    value: &mut (T, T),
    bounds: (T, T),
    speed: f64,
) -> bool {
    let mut changed = false;
    ui.strong(label);
    ui.horizontal(|ui: &mut Ui| {
        changed |= ui
            .add(
                egui::DragValue::new(&mut value.0)
                    .range(bounds.0..=value.1)
                    .speed(speed),
            )
            .changed();
        ui.label("to");
        changed |= ui
            .add(
                egui::DragValue::new(&mut value.1)
                    .range(value.0..=bounds.1)
                    .speed(speed),
            )
            .changed();
    });
    ui.add_space(4.0);
    changed
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
            let has_data = state.table.is_some();
            if ui
                .add_enabled(has_data, egui::Button::new("Export filtered CSV…"))
                .clicked()
            {
                export_file_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        if let Some(table) = &state.table {
            ui.label(format!(
                "{} applicants loaded, {} matching filters",
                table.len(),
                state.view.indices.len()
            ));
        }

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialogs
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open applicant data")
        .add_filter("CSV", &["csv"])
        .pick_file();

    if let Some(path) = file {
        state.load_from(&path);
    }
}

pub fn export_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Export filtered data")
        .set_file_name(EXPORT_FILE_NAME)
        .add_filter("CSV", &["csv"])
        .save_file();

    if let Some(path) = file {
        match state.export_filtered(&path) {
            Ok(()) => {
                state.status_message = None;
            }
            Err(e) => {
                log::error!("Failed to export: {e:#}");
                state.status_message = Some(format!("Error: {e:#}"));
            }
        }
    }
}
