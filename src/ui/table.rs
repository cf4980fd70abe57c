use eframe::egui::Ui;
use egui_extras::{Column, TableBuilder};

use crate::data::model::ApplicantTable;
use crate::data::pipeline::DashboardView;

// ---------------------------------------------------------------------------
// Filtered table view
// ---------------------------------------------------------------------------

/// Render the filtered table: every source column untouched, plus the two
/// derived columns. Rows are virtualised so large datasets stay responsive.
pub fn filtered_table(ui: &mut Ui, table: &ApplicantTable, view: &DashboardView) {
    let n_cols = table.headers.len() + 2;

    TableBuilder::new(ui)
        .striped(true)
        .resizable(true)
        .max_scroll_height(320.0)
        .columns(Column::auto().at_least(70.0), n_cols)
        .header(20.0, |mut header| {
            for name in &table.headers {
                header.col(|ui| {
                    ui.strong(name.as_str());
                });
            }
            header.col(|ui| {
                ui.strong("Risk_Category");
            });
            header.col(|ui| {
                ui.strong("Income_Bracket");
            });
        })
        .body(|body| {
            body.rows(18.0, view.indices.len(), |mut row| {
                let applicant = &table.applicants[view.indices[row.index()]];
                for cell in &applicant.raw {
                    row.col(|ui| {
                        ui.label(cell.as_str());
                    });
                }
                row.col(|ui| {
                    ui.label(applicant.risk_category.label());
                });
                row.col(|ui| {
                    ui.label(applicant.income_bracket.map(|b| b.label()).unwrap_or(""));
                });
            });
        });
}
