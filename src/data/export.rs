use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};

use super::model::ApplicantTable;

/// Default file name offered for the filtered-data download.
pub const EXPORT_FILE_NAME: &str = "filtered_data.csv";

/// Header names of the two derived columns appended to the export.
const DERIVED_HEADERS: [&str; 2] = ["Risk_Category", "Income_Bracket"];

/// Serialize the filtered view as CSV: the original columns untouched, in
/// source order, followed by the two derived columns. A record without an
/// income bracket writes an empty field. No index column.
pub fn write_filtered<W: Write>(table: &ApplicantTable, indices: &[usize], out: W) -> Result<()> {
    let mut writer = csv::Writer::from_writer(out);

    let header: Vec<&str> = table
        .headers
        .iter()
        .map(String::as_str)
        .chain(DERIVED_HEADERS)
        .collect();
    writer.write_record(&header).context("writing CSV header")?;

    for &idx in indices {
        let a = &table.applicants[idx];
        let bracket = a.income_bracket.map(|b| b.label()).unwrap_or("");
        let record: Vec<&str> = a
            .raw
            .iter()
            .map(String::as_str)
            .chain([a.risk_category.label(), bracket])
            .collect();
        writer
            .write_record(&record)
            .with_context(|| format!("writing row {idx}"))?;
    }

    writer.flush().context("flushing CSV")?;
    Ok(())
}

/// Write the filtered view to a file on disk.
pub fn export_to_path(table: &ApplicantTable, indices: &[usize], path: &Path) -> Result<()> {
    let file = std::fs::File::create(path)
        .with_context(|| format!("creating '{}'", path.display()))?;
    write_filtered(table, indices, file)?;
    log::info!("Exported {} rows to {}", indices.len(), path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::filter::{filtered_indices, FilterSpec};
    use crate::data::loader::load_from_reader;

    fn load(text: &str) -> ApplicantTable {
        load_from_reader(csv::Reader::from_reader(text.as_bytes())).unwrap()
    }

    #[test]
    fn export_appends_derived_columns() {
        let table = load(
            "Age,Income,Credit_Score,Employment_Status,Marital_Status,Education_Level,Loan_Amount,Defaulted\n\
             40,25000,580,Employed,Single,Bachelor,10000,0\n",
        );

        let mut buf = Vec::new();
        write_filtered(&table, &[0], &mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();
        let mut lines = text.lines();

        assert!(lines
            .next()
            .unwrap()
            .ends_with("Defaulted,Risk_Category,Income_Bracket"));
        assert!(lines.next().unwrap().ends_with("10000,0,High Risk,<30k"));
    }

    #[test]
    fn missing_bracket_writes_an_empty_field() {
        let table = load(
            "Age,Income,Credit_Score,Employment_Status,Marital_Status,Education_Level,Loan_Amount,Defaulted\n\
             40,200000,700,Employed,Single,Bachelor,10000,0\n",
        );

        let mut buf = Vec::new();
        write_filtered(&table, &[0], &mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert!(text.lines().nth(1).unwrap().ends_with("Low Risk,"));
    }

    #[test]
    fn round_trip_reproduces_records_and_derivations() {
        let table = load(
            "Applicant_ID,Age,Income,Credit_Score,Employment_Status,Marital_Status,Education_Level,Loan_Amount,Defaulted\n\
             A-1,40,25000,580,Employed,Single,Bachelor,10000,0\n\
             A-2,30,45000,640,Employed,Married,Master,20000,1\n\
             A-3,62,160000,790,Self-Employed,Married,PhD,55000,0\n",
        );
        let indices = filtered_indices(&table, &FilterSpec::full(&table));

        let mut buf = Vec::new();
        write_filtered(&table, &indices, &mut buf).unwrap();
        let reloaded = load_from_reader(csv::Reader::from_reader(buf.as_slice()));
        let reloaded = reloaded.unwrap();

        assert_eq!(reloaded.len(), table.len());
        for (orig, back) in table.applicants.iter().zip(&reloaded.applicants) {
            assert_eq!(orig.age, back.age);
            assert_eq!(orig.income, back.income);
            assert_eq!(orig.credit_score, back.credit_score);
            assert_eq!(orig.employment_status, back.employment_status);
            assert_eq!(orig.defaulted, back.defaulted);
            assert_eq!(orig.risk_category, back.risk_category);
            assert_eq!(orig.income_bracket, back.income_bracket);
        }
        // The exported derived columns ride along as passthrough columns when
        // re-read, matching what the re-derivation produced.
        for (i, back) in reloaded.applicants.iter().enumerate() {
            let risk_cell = &back.raw[back.raw.len() - 2];
            assert_eq!(risk_cell, table.applicants[i].risk_category.label());
        }
    }
}
