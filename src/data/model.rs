use std::collections::BTreeSet;
use std::fmt;

// ---------------------------------------------------------------------------
// RiskCategory – derived three-way classification
// ---------------------------------------------------------------------------

/// Risk classification of an applicant, derived from credit score and income.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum RiskCategory {
    High,
    Medium,
    Low,
}

impl RiskCategory {
    pub const ALL: [RiskCategory; 3] = [RiskCategory::High, RiskCategory::Medium, RiskCategory::Low];

    /// The label used in the UI and in exported CSVs.
    pub fn label(&self) -> &'static str {
        match self {
            RiskCategory::High => "High Risk",
            RiskCategory::Medium => "Medium Risk",
            RiskCategory::Low => "Low Risk",
        }
    }
}

impl fmt::Display for RiskCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ---------------------------------------------------------------------------
// IncomeBracket – derived income bucket
// ---------------------------------------------------------------------------

/// Income bucket under the fixed bin edges 0..150000.
/// Incomes outside the outer edges carry no bracket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum IncomeBracket {
    Under30k,
    From30kTo60k,
    From60kTo90k,
    From90kTo120k,
    Over120k,
}

impl IncomeBracket {
    pub const ALL: [IncomeBracket; 5] = [
        IncomeBracket::Under30k,
        IncomeBracket::From30kTo60k,
        IncomeBracket::From60kTo90k,
        IncomeBracket::From90kTo120k,
        IncomeBracket::Over120k,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            IncomeBracket::Under30k => "<30k",
            IncomeBracket::From30kTo60k => "30k-60k",
            IncomeBracket::From60kTo90k => "60k-90k",
            IncomeBracket::From90kTo120k => "90k-120k",
            IncomeBracket::Over120k => ">120k",
        }
    }
}

impl fmt::Display for IncomeBracket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ---------------------------------------------------------------------------
// Applicant – one row of the dataset
// ---------------------------------------------------------------------------

/// A single loan applicant (one row of the source CSV).
#[derive(Debug, Clone)]
pub struct Applicant {
    pub age: i64,
    pub income: f64,
    pub credit_score: i64,
    pub employment_status: String,
    pub marital_status: String,
    pub education_level: String,
    pub loan_amount: f64,
    pub defaulted: bool,

    /// Derived at load, never written back to the source file.
    pub risk_category: RiskCategory,
    pub income_bracket: Option<IncomeBracket>,

    /// The row's raw cell values in source-header order. Columns outside the
    /// required schema pass through here untouched for display and export.
    pub raw: Vec<String>,
}

// ---------------------------------------------------------------------------
// ApplicantTable – the complete loaded dataset
// ---------------------------------------------------------------------------

/// Observed categorical value sets, computed once at load and immutable for
/// the session.
#[derive(Debug, Clone, Default)]
pub struct Domains {
    pub employment_status: BTreeSet<String>,
    pub marital_status: BTreeSet<String>,
    pub education_level: BTreeSet<String>,
}

/// Observed numeric (min, max) per filterable column.
#[derive(Debug, Clone, Default)]
pub struct Ranges {
    pub age: (i64, i64),
    pub income: (f64, f64),
    pub credit_score: (i64, i64),
}

/// The full parsed dataset with pre-computed filter domains.
#[derive(Debug, Clone)]
pub struct ApplicantTable {
    /// All applicants (rows).
    pub applicants: Vec<Applicant>,
    /// The source header row, original order, extra columns included.
    pub headers: Vec<String>,
    /// Unique values of the three categorical columns.
    pub domains: Domains,
    /// Min/max of the three numeric filter columns.
    pub ranges: Ranges,
}

impl ApplicantTable {
    /// Build domain and range indices from the loaded rows.
    pub fn from_rows(headers: Vec<String>, applicants: Vec<Applicant>) -> Self {
        let mut domains = Domains::default();
        for a in &applicants {
            domains.employment_status.insert(a.employment_status.clone());
            domains.marital_status.insert(a.marital_status.clone());
            domains.education_level.insert(a.education_level.clone());
        }

        let mut ranges = Ranges::default();
        if let Some(first) = applicants.first() {
            ranges.age = (first.age, first.age);
            ranges.income = (first.income, first.income);
            ranges.credit_score = (first.credit_score, first.credit_score);
            for a in &applicants {
                ranges.age = (ranges.age.0.min(a.age), ranges.age.1.max(a.age));
                ranges.income = (ranges.income.0.min(a.income), ranges.income.1.max(a.income));
                ranges.credit_score = (
                    ranges.credit_score.0.min(a.credit_score),
                    ranges.credit_score.1.max(a.credit_score),
                );
            }
        }

        ApplicantTable {
            applicants,
            headers,
            domains,
            ranges,
        }
    }

    /// Number of applicants.
    pub fn len(&self) -> usize {
        self.applicants.len()
    }

    /// Whether the dataset is empty.
    pub fn is_empty(&self) -> bool {
        self.applicants.is_empty()
    }
}
