use std::collections::BTreeMap;

use super::model::{ApplicantTable, RiskCategory};

// ---------------------------------------------------------------------------
// Aggregates over the filtered view
// ---------------------------------------------------------------------------

/// Descriptive aggregates the dashboard charts are built from.
#[derive(Debug, Clone, Default)]
pub struct Summary {
    /// Number of applicants in the filtered view.
    pub count: usize,
    /// Mean loan amount per employment status, sorted by status.
    pub avg_loan_by_employment: Vec<(String, f64)>,
    /// Mean of the default indicator per credit score, sorted by score.
    /// Interpreted as the default rate at that score.
    pub default_rate_by_score: Vec<(i64, f64)>,
    /// Applicant count per risk category, categories with no applicants
    /// omitted.
    pub risk_counts: Vec<(RiskCategory, usize)>,
}

/// Compute the summary aggregates for the given row indices.
pub fn summarize(table: &ApplicantTable, indices: &[usize]) -> Summary {
    let mut loan_acc: BTreeMap<&str, (f64, usize)> = BTreeMap::new();
    let mut default_acc: BTreeMap<i64, (usize, usize)> = BTreeMap::new();
    let mut risk_acc: BTreeMap<RiskCategory, usize> = BTreeMap::new();

    for &idx in indices {
        let a = &table.applicants[idx];

        let loan = loan_acc.entry(a.employment_status.as_str()).or_insert((0.0, 0));
        loan.0 += a.loan_amount;
        loan.1 += 1;

        let rate = default_acc.entry(a.credit_score).or_insert((0, 0));
        rate.0 += a.defaulted as usize;
        rate.1 += 1;

        *risk_acc.entry(a.risk_category).or_insert(0) += 1;
    }

    Summary {
        count: indices.len(),
        avg_loan_by_employment: loan_acc
            .into_iter()
            .map(|(status, (sum, n))| (status.to_string(), sum / n as f64))
            .collect(),
        default_rate_by_score: default_acc
            .into_iter()
            .map(|(score, (defaults, n))| (score, defaults as f64 / n as f64))
            .collect(),
        risk_counts: risk_acc.into_iter().collect(),
    }
}

// ---------------------------------------------------------------------------
// Histogram binning
// ---------------------------------------------------------------------------

/// One fixed-width histogram bin over `[lo, hi)` (the last bin closes at hi).
#[derive(Debug, Clone, PartialEq)]
pub struct HistBin {
    pub lo: f64,
    pub hi: f64,
    pub count: usize,
}

impl HistBin {
    pub fn center(&self) -> f64 {
        (self.lo + self.hi) / 2.0
    }

    pub fn width(&self) -> f64 {
        self.hi - self.lo
    }
}

/// Bin `values` into `nbins` equal-width bins over their observed range.
///
/// Returns an empty vector for an empty input; a constant input collapses to
/// a single bin holding everything.
pub fn histogram(values: &[f64], nbins: usize) -> Vec<HistBin> {
    if values.is_empty() || nbins == 0 {
        return Vec::new();
    }

    let min = values.iter().cloned().fold(f64::INFINITY, f64::min);
    let max = values.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
    let span = max - min;

    if span <= 0.0 {
        return vec![HistBin {
            lo: min,
            hi: max,
            count: values.len(),
        }];
    }

    let width = span / nbins as f64;
    let mut bins: Vec<HistBin> = (0..nbins)
        .map(|i| HistBin {
            lo: min + i as f64 * width,
            hi: min + (i + 1) as f64 * width,
            count: 0,
        })
        .collect();

    for &v in values {
        let slot = (((v - min) / width) as usize).min(nbins - 1);
        bins[slot].count += 1;
    }

    bins
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::loader::load_from_reader;

    fn sample_table() -> ApplicantTable {
        let text = "Age,Income,Credit_Score,Employment_Status,Marital_Status,Education_Level,Loan_Amount,Defaulted\n\
                    40,25000,580,Employed,Single,Bachelor,10000,0\n\
                    30,45000,580,Employed,Married,Master,20000,1\n\
                    62,130000,790,Self-Employed,Married,PhD,60000,1\n\
                    24,18000,520,Unemployed,Single,High School,4000,1\n";
        load_from_reader(csv::Reader::from_reader(text.as_bytes())).unwrap()
    }

    #[test]
    fn loan_means_group_by_employment() {
        let table = sample_table();
        let indices: Vec<usize> = (0..table.len()).collect();
        let summary = summarize(&table, &indices);

        assert_eq!(summary.count, 4);
        let employed = summary
            .avg_loan_by_employment
            .iter()
            .find(|(s, _)| s == "Employed")
            .unwrap();
        assert_eq!(employed.1, 15_000.0);
    }

    #[test]
    fn default_rate_is_a_fraction_per_score() {
        let table = sample_table();
        let indices: Vec<usize> = (0..table.len()).collect();
        let summary = summarize(&table, &indices);

        // Score 580 appears twice, one default.
        let rate_580 = summary
            .default_rate_by_score
            .iter()
            .find(|(score, _)| *score == 580)
            .unwrap();
        assert_eq!(rate_580.1, 0.5);
        // Scores come out sorted.
        assert!(summary
            .default_rate_by_score
            .windows(2)
            .all(|w| w[0].0 < w[1].0));
    }

    #[test]
    fn risk_counts_omit_empty_categories() {
        let table = sample_table();
        let summary = summarize(&table, &[0]);
        assert_eq!(summary.risk_counts, vec![(RiskCategory::High, 1)]);
    }

    #[test]
    fn empty_view_summarizes_to_zero() {
        let table = sample_table();
        let summary = summarize(&table, &[]);
        assert_eq!(summary.count, 0);
        assert!(summary.avg_loan_by_employment.is_empty());
        assert!(summary.risk_counts.is_empty());
    }

    #[test]
    fn histogram_counts_every_value_once() {
        let values = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0, 10.0];
        let bins = histogram(&values, 5);
        assert_eq!(bins.len(), 5);
        assert_eq!(bins.iter().map(|b| b.count).sum::<usize>(), values.len());
        // The maximum lands in the last bin, not past it.
        assert_eq!(bins.last().unwrap().count, 2);
    }

    #[test]
    fn histogram_handles_degenerate_inputs() {
        assert!(histogram(&[], 10).is_empty());
        let constant = histogram(&[7.0, 7.0, 7.0], 10);
        assert_eq!(constant.len(), 1);
        assert_eq!(constant[0].count, 3);
    }
}
