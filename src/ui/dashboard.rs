use eframe::egui::{RichText, ScrollArea, Ui};

use crate::state::AppState;
use crate::ui::{charts, panels, table};

// ---------------------------------------------------------------------------
// Central panel – the dashboard itself
// ---------------------------------------------------------------------------

/// Render the dashboard in the central panel.
pub fn central_panel(ui: &mut Ui, state: &mut AppState) {
    let Some(loaded) = &state.table else {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading("Open a loan applicant CSV to get started  (File → Open…)");
        });
        return;
    };
    let view = &state.view;

    let mut export_clicked = false;

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            ui.heading("Loan application dashboard");
            ui.label(RichText::new("Insights to Empower Smarter Lending Decisions").italics());
            ui.label(
                "Adjust age, income, credit score and more in the sidebar. \
                 The table, charts and download below follow the filtered view.",
            );
            ui.separator();

            // ---- Overview ----
            ui.heading("Dataset Overview (Filtered)");
            ui.label(format!("Total Applicants: {}", view.summary.count));
            ui.add_space(4.0);
            table::filtered_table(ui, loaded, view);
            ui.separator();

            // ---- 1. Applicant distribution ----
            ui.heading("1. Applicant Distribution");
            ui.strong("Age Distribution");
            charts::age_histogram(ui, view);
            ui.add_space(8.0);
            ui.strong("Income Distribution");
            charts::income_histogram(ui, view);
            ui.separator();

            // ---- 2. Loan amounts ----
            ui.heading("2. Loan Amount Analysis");
            ui.strong("Average Loan Amount by Employment Status");
            charts::loan_by_employment(ui, &view.summary);
            ui.separator();

            // ---- 3. Defaults ----
            ui.heading("3. Default Analysis");
            ui.strong("Default Rate by Credit Score");
            charts::default_rate_line(ui, &view.summary);
            ui.separator();

            // ---- 4. Risk segmentation ----
            ui.heading("4. Risk Profile Segmentation");
            ui.strong("Risk Category Proportions");
            charts::risk_pie(ui, &view.summary.risk_counts);
            ui.separator();

            // ---- Download ----
            ui.heading("Download Processed Data");
            if ui.button("Download CSV").clicked() {
                export_clicked = true;
            }
            ui.add_space(16.0);
        });

    if export_clicked {
        panels::export_file_dialog(state);
    }
}
