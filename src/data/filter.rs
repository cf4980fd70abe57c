use std::collections::BTreeSet;

use super::model::{Applicant, ApplicantTable};

// ---------------------------------------------------------------------------
// Filter specification: the constraints currently selected by the user
// ---------------------------------------------------------------------------

/// The three categorical filter dimensions, so UI code can loop over them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CategoricalField {
    EmploymentStatus,
    MaritalStatus,
    EducationLevel,
}

impl CategoricalField {
    pub const ALL: [CategoricalField; 3] = [
        CategoricalField::EmploymentStatus,
        CategoricalField::MaritalStatus,
        CategoricalField::EducationLevel,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            CategoricalField::EmploymentStatus => "Employment Status",
            CategoricalField::MaritalStatus => "Marital Status",
            CategoricalField::EducationLevel => "Education Level",
        }
    }

    /// The observed value set for this dimension.
    pub fn domain<'t>(&self, table: &'t ApplicantTable) -> &'t BTreeSet<String> {
        match self {
            CategoricalField::EmploymentStatus => &table.domains.employment_status,
            CategoricalField::MaritalStatus => &table.domains.marital_status,
            CategoricalField::EducationLevel => &table.domains.education_level,
        }
    }

    fn value<'a>(&self, applicant: &'a Applicant) -> &'a str {
        match self {
            CategoricalField::EmploymentStatus => &applicant.employment_status,
            CategoricalField::MaritalStatus => &applicant.marital_status,
            CategoricalField::EducationLevel => &applicant.education_level,
        }
    }
}

/// Range and set constraints applied conjunctively to the table.
///
/// Numeric bounds are inclusive on both ends. An empty categorical selection
/// matches nothing (not "all").
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterSpec {
    pub age: (i64, i64),
    pub income: (f64, f64),
    pub credit_score: (i64, i64),
    pub employment_status: BTreeSet<String>,
    pub marital_status: BTreeSet<String>,
    pub education_level: BTreeSet<String>,
}

impl FilterSpec {
    /// The load-time default: full observed range and full observed set for
    /// every dimension, so an untouched spec matches every row.
    pub fn full(table: &ApplicantTable) -> Self {
        FilterSpec {
            age: table.ranges.age,
            income: table.ranges.income,
            credit_score: table.ranges.credit_score,
            employment_status: table.domains.employment_status.clone(),
            marital_status: table.domains.marital_status.clone(),
            education_level: table.domains.education_level.clone(),
        }
    }

    /// Mutable access to one categorical selection set.
    pub fn selection_mut(&mut self, field: CategoricalField) -> &mut BTreeSet<String> {
        match field {
            CategoricalField::EmploymentStatus => &mut self.employment_status,
            CategoricalField::MaritalStatus => &mut self.marital_status,
            CategoricalField::EducationLevel => &mut self.education_level,
        }
    }

    pub fn selection(&self, field: CategoricalField) -> &BTreeSet<String> {
        match field {
            CategoricalField::EmploymentStatus => &self.employment_status,
            CategoricalField::MaritalStatus => &self.marital_status,
            CategoricalField::EducationLevel => &self.education_level,
        }
    }

    /// Whether a single applicant satisfies every constraint.
    pub fn matches(&self, applicant: &Applicant) -> bool {
        if applicant.age < self.age.0 || applicant.age > self.age.1 {
            return false;
        }
        if applicant.income < self.income.0 || applicant.income > self.income.1 {
            return false;
        }
        if applicant.credit_score < self.credit_score.0 || applicant.credit_score > self.credit_score.1
        {
            return false;
        }
        CategoricalField::ALL
            .iter()
            .all(|field| self.selection(*field).contains(field.value(applicant)))
    }
}

/// Return indices of applicants that pass all active filters.
///
/// Pure: never mutates the table, always computable fresh from the full
/// table and a specification. An empty result is valid output.
pub fn filtered_indices(table: &ApplicantTable, spec: &FilterSpec) -> Vec<usize> {
    table
        .applicants
        .iter()
        .enumerate()
        .filter(|(_, a)| spec.matches(a))
        .map(|(i, _)| i)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::loader::load_from_reader;

    fn sample_table() -> ApplicantTable {
        let text = "Age,Income,Credit_Score,Employment_Status,Marital_Status,Education_Level,Loan_Amount,Defaulted\n\
                    40,25000,580,Employed,Single,Bachelor,10000,0\n\
                    30,45000,640,Employed,Married,Master,20000,0\n\
                    62,130000,790,Self-Employed,Married,PhD,55000,1\n\
                    24,18000,520,Unemployed,Single,High School,4000,1\n";
        load_from_reader(csv::Reader::from_reader(text.as_bytes())).unwrap()
    }

    #[test]
    fn full_spec_matches_every_row() {
        let table = sample_table();
        let spec = FilterSpec::full(&table);
        assert_eq!(filtered_indices(&table, &spec).len(), table.len());
    }

    #[test]
    fn result_is_a_subset_and_tightening_is_monotone() {
        let table = sample_table();
        let mut spec = FilterSpec::full(&table);

        let before = filtered_indices(&table, &spec);
        assert!(before.iter().all(|&i| i < table.len()));

        spec.age = (spec.age.0, 45);
        let after = filtered_indices(&table, &spec);
        assert!(after.len() <= before.len());
        assert!(after.iter().all(|i| before.contains(i)));

        spec.credit_score = (600, spec.credit_score.1);
        let tighter = filtered_indices(&table, &spec);
        assert!(tighter.len() <= after.len());
    }

    #[test]
    fn empty_categorical_selection_matches_nothing() {
        let table = sample_table();
        let mut spec = FilterSpec::full(&table);
        spec.marital_status.clear();
        assert!(filtered_indices(&table, &spec).is_empty());
    }

    #[test]
    fn bounds_are_inclusive() {
        let table = sample_table();
        let mut spec = FilterSpec::full(&table);
        spec.age = (40, 40);
        spec.income = (25_000.0, 25_000.0);
        spec.credit_score = (580, 580);
        assert_eq!(filtered_indices(&table, &spec), vec![0]);
    }

    #[test]
    fn example_spec_excludes_low_income_row() {
        // Income 25000 fails the 30000 lower bound even though every other
        // constraint matches.
        let table = sample_table();
        let mut spec = FilterSpec::full(&table);
        spec.age = (25, 50);
        spec.income = (30_000.0, 90_000.0);
        spec.credit_score = (500, 800);
        spec.employment_status = ["Employed".to_string()].into_iter().collect();
        spec.marital_status = ["Single".to_string()].into_iter().collect();
        spec.education_level = ["Bachelor".to_string()].into_iter().collect();

        assert!(!filtered_indices(&table, &spec).contains(&0));
    }
}
