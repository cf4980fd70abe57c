//! The filter → summarize → bin pipeline shared by every UI interaction.
//!
//! Widgets only edit the [`FilterSpec`]; re-rendering always goes through
//! [`build_view`], so the view-model is a pure function of the loaded table
//! and the current specification, decoupled from any re-render trigger.

use super::filter::{filtered_indices, FilterSpec};
use super::model::ApplicantTable;
use super::summary::{histogram, summarize, HistBin, Summary};

/// Bin count for the age and income distribution charts.
pub const HISTOGRAM_BINS: usize = 10;

/// Everything the presentation layer needs for one render of the dashboard.
#[derive(Debug, Clone, Default)]
pub struct DashboardView {
    /// Indices into the table, in row order, of applicants passing the
    /// current filters.
    pub indices: Vec<usize>,
    pub summary: Summary,
    pub age_hist: Vec<HistBin>,
    pub income_hist: Vec<HistBin>,
}

/// Run the full pipeline for one specification.
pub fn build_view(table: &ApplicantTable, spec: &FilterSpec) -> DashboardView {
    let indices = filtered_indices(table, spec);
    let summary = summarize(table, &indices);

    let ages: Vec<f64> = indices
        .iter()
        .map(|&i| table.applicants[i].age as f64)
        .collect();
    let incomes: Vec<f64> = indices.iter().map(|&i| table.applicants[i].income).collect();

    DashboardView {
        indices,
        summary,
        age_hist: histogram(&ages, HISTOGRAM_BINS),
        income_hist: histogram(&incomes, HISTOGRAM_BINS),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::loader::load_from_reader;

    #[test]
    fn view_is_consistent_with_its_spec() {
        let text = "Age,Income,Credit_Score,Employment_Status,Marital_Status,Education_Level,Loan_Amount,Defaulted\n\
                    40,25000,580,Employed,Single,Bachelor,10000,0\n\
                    30,45000,640,Employed,Married,Master,20000,0\n";
        let table = load_from_reader(csv::Reader::from_reader(text.as_bytes())).unwrap();

        let mut spec = FilterSpec::full(&table);
        let view = build_view(&table, &spec);
        assert_eq!(view.indices.len(), 2);
        assert_eq!(view.summary.count, 2);

        spec.income = (40_000.0, 50_000.0);
        let view = build_view(&table, &spec);
        assert_eq!(view.indices, vec![1]);
        assert_eq!(view.summary.count, 1);
        assert_eq!(view.age_hist.iter().map(|b| b.count).sum::<usize>(), 1);
    }
}
