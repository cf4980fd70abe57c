use std::collections::HashMap;
use std::io::Read;
use std::path::{Path, PathBuf};

use thiserror::Error;

use super::derive::{bracket_income, classify_risk};
use super::model::{Applicant, ApplicantTable};

// ---------------------------------------------------------------------------
// Error taxonomy
// ---------------------------------------------------------------------------

/// Loading is the only fallible stage of the pipeline; every failure here is
/// fatal to the session (the dashboard cannot render without data).
#[derive(Debug, Error)]
pub enum DataLoadError {
    #[error("failed to open '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to read CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("missing required column '{0}'")]
    MissingColumn(&'static str),

    #[error("line {line}: {message}")]
    Malformed { line: usize, message: String },
}

// ---------------------------------------------------------------------------
// Schema
// ---------------------------------------------------------------------------

/// Columns the dashboard logic needs, named exactly as in the source file.
/// Any additional columns are ignored by the logic but pass through untouched.
pub const REQUIRED_COLUMNS: [&str; 8] = [
    "Age",
    "Income",
    "Credit_Score",
    "Employment_Status",
    "Marital_Status",
    "Education_Level",
    "Loan_Amount",
    "Defaulted",
];

/// Column positions of the required schema within the source header row.
struct SchemaIndex {
    age: usize,
    income: usize,
    credit_score: usize,
    employment_status: usize,
    marital_status: usize,
    education_level: usize,
    loan_amount: usize,
    defaulted: usize,
}

impl SchemaIndex {
    fn resolve(headers: &[String]) -> Result<Self, DataLoadError> {
        let by_name: HashMap<&str, usize> = headers
            .iter()
            .enumerate()
            .map(|(idx, name)| (name.as_str(), idx))
            .collect();

        let find = |name: &'static str| -> Result<usize, DataLoadError> {
            by_name
                .get(name)
                .copied()
                .ok_or(DataLoadError::MissingColumn(name))
        };

        Ok(SchemaIndex {
            age: find("Age")?,
            income: find("Income")?,
            credit_score: find("Credit_Score")?,
            employment_status: find("Employment_Status")?,
            marital_status: find("Marital_Status")?,
            education_level: find("Education_Level")?,
            loan_amount: find("Loan_Amount")?,
            defaulted: find("Defaulted")?,
        })
    }
}

// ---------------------------------------------------------------------------
// Public entry-points
// ---------------------------------------------------------------------------

/// Load the applicant dataset from a CSV file.
pub fn load_file(path: &Path) -> Result<ApplicantTable, DataLoadError> {
    let file = std::fs::File::open(path).map_err(|source| DataLoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let table = load_from_reader(csv::Reader::from_reader(file))?;
    log::info!(
        "Loaded {} applicants ({} columns) from {}",
        table.len(),
        table.headers.len(),
        path.display()
    );
    Ok(table)
}

/// Parse an applicant dataset from an already-open CSV reader.
pub fn load_from_reader<R: Read>(mut reader: csv::Reader<R>) -> Result<ApplicantTable, DataLoadError> {
    let headers: Vec<String> = reader.headers()?.iter().map(|h| h.to_string()).collect();
    let schema = SchemaIndex::resolve(&headers)?;

    let mut applicants = Vec::new();

    for (idx, result) in reader.records().enumerate() {
        // records() starts after the header row; CSV lines are 1-based.
        let line = idx + 2;
        let record = result?;

        let age = parse_int(record.get(schema.age), line, "Age")?;
        let income = parse_float(record.get(schema.income), line, "Income")?;
        let credit_score = parse_int(record.get(schema.credit_score), line, "Credit_Score")?;
        let loan_amount = parse_float(record.get(schema.loan_amount), line, "Loan_Amount")?;
        let defaulted = parse_indicator(record.get(schema.defaulted), line, "Defaulted")?;

        let field = |col: usize| record.get(col).unwrap_or("").to_string();

        applicants.push(Applicant {
            age,
            income,
            credit_score,
            employment_status: field(schema.employment_status),
            marital_status: field(schema.marital_status),
            education_level: field(schema.education_level),
            loan_amount,
            defaulted,
            risk_category: classify_risk(credit_score, income),
            income_bracket: bracket_income(income),
            raw: record.iter().map(|cell| cell.to_string()).collect(),
        });
    }

    Ok(ApplicantTable::from_rows(headers, applicants))
}

// ---------------------------------------------------------------------------
// Cell parsers
// ---------------------------------------------------------------------------

fn malformed(line: usize, col: &str, cell: &str, expected: &str) -> DataLoadError {
    DataLoadError::Malformed {
        line,
        message: format!("{col}: '{cell}' is not {expected}"),
    }
}

fn parse_int(cell: Option<&str>, line: usize, col: &str) -> Result<i64, DataLoadError> {
    let cell = cell.unwrap_or("").trim();
    cell.parse::<i64>()
        .map_err(|_| malformed(line, col, cell, "an integer"))
}

fn parse_float(cell: Option<&str>, line: usize, col: &str) -> Result<f64, DataLoadError> {
    let cell = cell.unwrap_or("").trim();
    cell.parse::<f64>()
        .map_err(|_| malformed(line, col, cell, "a number"))
}

fn parse_indicator(cell: Option<&str>, line: usize, col: &str) -> Result<bool, DataLoadError> {
    match cell.unwrap_or("").trim() {
        "0" => Ok(false),
        "1" => Ok(true),
        other => Err(malformed(line, col, other, "a 0/1 indicator")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::{IncomeBracket, RiskCategory};

    fn reader(csv_text: &str) -> csv::Reader<&[u8]> {
        csv::Reader::from_reader(csv_text.as_bytes())
    }

    const HEADER: &str = "Age,Income,Credit_Score,Employment_Status,Marital_Status,\
Education_Level,Loan_Amount,Defaulted";

    #[test]
    fn loads_rows_and_derives_columns() {
        let text = format!("{HEADER}\n40,25000,580,Employed,Single,Bachelor,10000,0\n");
        let table = load_from_reader(reader(&text)).unwrap();

        assert_eq!(table.len(), 1);
        let a = &table.applicants[0];
        assert_eq!(a.age, 40);
        assert_eq!(a.credit_score, 580);
        assert!(!a.defaulted);
        assert_eq!(a.risk_category, RiskCategory::High);
        assert_eq!(a.income_bracket, Some(IncomeBracket::Under30k));
    }

    #[test]
    fn missing_required_column_is_fatal() {
        let text = "Age,Income,Credit_Score\n40,25000,580\n";
        match load_from_reader(reader(text)) {
            Err(DataLoadError::MissingColumn(col)) => assert_eq!(col, "Employment_Status"),
            other => panic!("expected MissingColumn, got {other:?}"),
        }
    }

    #[test]
    fn malformed_cell_reports_line_number() {
        let text = format!(
            "{HEADER}\n40,25000,580,Employed,Single,Bachelor,10000,0\n41,abc,700,Employed,Married,Master,5000,1\n"
        );
        match load_from_reader(reader(&text)) {
            Err(DataLoadError::Malformed { line, message }) => {
                assert_eq!(line, 3);
                assert!(message.contains("Income"), "{message}");
            }
            other => panic!("expected Malformed, got {other:?}"),
        }
    }

    #[test]
    fn defaulted_must_be_binary() {
        let text = format!("{HEADER}\n40,25000,580,Employed,Single,Bachelor,10000,yes\n");
        assert!(matches!(
            load_from_reader(reader(&text)),
            Err(DataLoadError::Malformed { line: 2, .. })
        ));
    }

    #[test]
    fn extra_columns_pass_through_in_order() {
        let text = format!(
            "Applicant_ID,{HEADER},Notes\nA-1,40,25000,580,Employed,Single,Bachelor,10000,0,call back\n"
        );
        let table = load_from_reader(reader(&text)).unwrap();

        assert_eq!(table.headers.first().map(String::as_str), Some("Applicant_ID"));
        assert_eq!(table.headers.last().map(String::as_str), Some("Notes"));
        let a = &table.applicants[0];
        assert_eq!(a.raw.first().map(String::as_str), Some("A-1"));
        assert_eq!(a.raw.last().map(String::as_str), Some("call back"));
    }

    #[test]
    fn domains_and_ranges_computed_at_load() {
        let text = format!(
            "{HEADER}\n\
             40,25000,580,Employed,Single,Bachelor,10000,0\n\
             55,90000,720,Self-Employed,Married,Master,25000,1\n"
        );
        let table = load_from_reader(reader(&text)).unwrap();

        assert_eq!(table.ranges.age, (40, 55));
        assert_eq!(table.ranges.credit_score, (580, 720));
        assert!(table.domains.employment_status.contains("Self-Employed"));
        assert_eq!(table.domains.marital_status.len(), 2);
    }
}
