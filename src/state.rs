use std::path::{Path, PathBuf};

use anyhow::Result;

use crate::data::export;
use crate::data::filter::{CategoricalField, FilterSpec};
use crate::data::loader;
use crate::data::model::ApplicantTable;
use crate::data::pipeline::{build_view, DashboardView};

/// Path the dashboard tries to load on startup. `generate_sample` writes it.
pub const DEFAULT_DATA_PATH: &str = "loan_details.csv";

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    /// Loaded dataset (None until a file loads successfully).
    pub table: Option<ApplicantTable>,

    /// Constraints currently selected in the sidebar.
    pub filters: FilterSpec,

    /// Output of the pipeline for the current filters (cached per render).
    pub view: DashboardView,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,

    /// Where the current dataset came from.
    pub source_path: Option<PathBuf>,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            table: None,
            filters: FilterSpec::default(),
            view: DashboardView::default(),
            status_message: None,
            source_path: None,
        }
    }
}

impl AppState {
    /// Ingest a newly loaded dataset and reset filters to the full domain.
    pub fn set_table(&mut self, table: ApplicantTable, path: Option<PathBuf>) {
        self.filters = FilterSpec::full(&table);
        self.view = build_view(&table, &self.filters);
        self.table = Some(table);
        self.source_path = path;
        self.status_message = None;
    }

    /// Re-run the pipeline after a filter change.
    pub fn refilter(&mut self) {
        if let Some(table) = &self.table {
            self.view = build_view(table, &self.filters);
        }
    }

    /// Load a dataset from disk, surfacing failure in the status line.
    pub fn load_from(&mut self, path: &Path) {
        match loader::load_file(path) {
            Ok(table) => self.set_table(table, Some(path.to_path_buf())),
            Err(e) => {
                log::error!("Failed to load {}: {e}", path.display());
                self.status_message = Some(format!("Error: {e}"));
            }
        }
    }

    /// Toggle a single categorical value in a filter dimension.
    pub fn toggle_filter_value(&mut self, field: CategoricalField, value: &str) {
        let selected = self.filters.selection_mut(field);
        if !selected.remove(value) {
            selected.insert(value.to_string());
        }
        self.refilter();
    }

    /// Select every observed value in a dimension.
    pub fn select_all(&mut self, field: CategoricalField) {
        if let Some(table) = &self.table {
            let all = field.domain(table).clone();
            *self.filters.selection_mut(field) = all;
            self.refilter();
        }
    }

    /// Clear a dimension's selection (matches nothing until re-selected).
    pub fn select_none(&mut self, field: CategoricalField) {
        self.filters.selection_mut(field).clear();
        self.refilter();
    }

    /// Write the current filtered view to `path`.
    pub fn export_filtered(&self, path: &Path) -> Result<()> {
        let table = self
            .table
            .as_ref()
            .ok_or_else(|| anyhow::anyhow!("no dataset loaded"))?;
        export::export_to_path(table, &self.view.indices, path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::loader::load_from_reader;

    fn state_with_data() -> AppState {
        let text = "Age,Income,Credit_Score,Employment_Status,Marital_Status,Education_Level,Loan_Amount,Defaulted\n\
                    40,25000,580,Employed,Single,Bachelor,10000,0\n\
                    30,45000,640,Employed,Married,Master,20000,0\n";
        let table = load_from_reader(csv::Reader::from_reader(text.as_bytes())).unwrap();
        let mut state = AppState::default();
        state.set_table(table, None);
        state
    }

    #[test]
    fn new_table_starts_with_everything_visible() {
        let state = state_with_data();
        assert_eq!(state.view.indices.len(), 2);
        assert_eq!(state.filters.age, (30, 40));
    }

    #[test]
    fn toggling_a_value_refilters() {
        let mut state = state_with_data();
        state.toggle_filter_value(CategoricalField::MaritalStatus, "Married");
        assert_eq!(state.view.indices, vec![0]);
        state.toggle_filter_value(CategoricalField::MaritalStatus, "Married");
        assert_eq!(state.view.indices.len(), 2);
    }

    #[test]
    fn select_none_then_all_round_trips() {
        let mut state = state_with_data();
        state.select_none(CategoricalField::EmploymentStatus);
        assert!(state.view.indices.is_empty());
        state.select_all(CategoricalField::EmploymentStatus);
        assert_eq!(state.view.indices.len(), 2);
    }
}
