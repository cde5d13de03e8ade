//! CSV ingest of raw input records.
//!
//! This module turns a CSV of user profiles into `RawInput` values ready for
//! scoring.
//!
//! Design goals:
//! - **Strict schema** for the twelve input columns (clear errors + exit code 2)
//! - **Row-level validation** (skip bad rows, but report what happened)
//! - **No encoding here**: labels are passed through as-is so the encoder stays
//!   the single place that decides what a label means

use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::StringRecord;

use crate::domain::{CategoricalField, NumericField, RawInput};
use crate::error::{AppError, EXIT_INPUT};

/// A row-level error encountered during ingest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowError {
    pub line: usize,
    pub message: String,
}

/// One accepted row with its source line.
#[derive(Debug, Clone)]
pub struct InputRow {
    pub line: usize,
    pub input: RawInput,
}

/// Ingest output: accepted rows + row errors.
#[derive(Debug, Clone)]
pub struct IngestedInputs {
    pub rows: Vec<InputRow>,
    pub row_errors: Vec<RowError>,
    pub rows_read: usize,
}

/// Load raw inputs from a CSV file.
pub fn load_inputs(path: &Path) -> Result<IngestedInputs, AppError> {
    let file = File::open(path).map_err(|e| {
        AppError::new(
            EXIT_INPUT,
            format!("Failed to open CSV '{}': {e}", path.display()),
        )
    })?;
    read_inputs(file)
}

/// Load raw inputs from any CSV reader.
pub fn read_inputs<R: Read>(source: R) -> Result<IngestedInputs, AppError> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(source);

    let headers = reader
        .headers()
        .map_err(|e| AppError::new(EXIT_INPUT, format!("Failed to read CSV headers: {e}")))?
        .clone();

    let header_map = build_header_map(&headers);
    ensure_required_columns_exist(&header_map)?;

    let mut rows = Vec::new();
    let mut row_errors = Vec::new();
    let mut rows_read = 0usize;

    for (idx, result) in reader.records().enumerate() {
        // Header is line 1.
        let line = idx + 2;
        rows_read += 1;

        let record = match result {
            Ok(r) => r,
            Err(e) => {
                row_errors.push(RowError {
                    line,
                    message: format!("CSV parse error: {e}"),
                });
                continue;
            }
        };

        match parse_row(&record, &header_map) {
            Ok(input) => rows.push(InputRow { line, input }),
            Err(message) => {
                tracing::warn!(line, "rejected input row: {message}");
                row_errors.push(RowError { line, message });
            }
        }
    }

    Ok(IngestedInputs {
        rows,
        row_errors,
        rows_read,
    })
}

/// Canonical column name for a numeric field, plus the training-data spelling.
fn numeric_columns(field: NumericField) -> [&'static str; 2] {
    match field {
        NumericField::Age => ["age", "age"],
        NumericField::EducationNum => ["education_num", "educational-num"],
        NumericField::CapitalGain => ["capital_gain", "capital-gain"],
        NumericField::CapitalLoss => ["capital_loss", "capital-loss"],
        NumericField::HoursPerWeek => ["hours_per_week", "hours-per-week"],
    }
}

fn categorical_columns(field: CategoricalField) -> [&'static str; 2] {
    match field {
        CategoricalField::MaritalStatus => ["marital_status", "marital-status"],
        CategoricalField::NativeCountry => ["native_country", "native-country"],
        other => [other.name(), other.name()],
    }
}

fn build_header_map(headers: &StringRecord) -> HashMap<String, usize> {
    headers
        .iter()
        .enumerate()
        .map(|(idx, name)| (normalize_header_name(name), idx))
        .collect()
}

fn normalize_header_name(name: &str) -> String {
    // Spreadsheet exports often prefix the first header with a BOM.
    let name = name.trim().trim_start_matches('\u{feff}');
    name.to_ascii_lowercase()
}

fn column_index(header_map: &HashMap<String, usize>, names: [&str; 2]) -> Option<usize> {
    names.iter().find_map(|n| header_map.get(*n).copied())
}

fn ensure_required_columns_exist(header_map: &HashMap<String, usize>) -> Result<(), AppError> {
    let missing: Vec<&str> = NumericField::ALL
        .into_iter()
        .map(numeric_columns)
        .chain(CategoricalField::ALL.into_iter().map(categorical_columns))
        .filter(|names| column_index(header_map, *names).is_none())
        .map(|names| names[0])
        .collect();

    if missing.is_empty() {
        Ok(())
    } else {
        Err(AppError::new(
            EXIT_INPUT,
            format!("Missing required column(s): {}", missing.join(", ")),
        ))
    }
}

fn get_value<'a>(
    record: &'a StringRecord,
    header_map: &HashMap<String, usize>,
    names: [&str; 2],
) -> &'a str {
    column_index(header_map, names)
        .and_then(|idx| record.get(idx))
        .unwrap_or("")
}

fn get_required<'a>(
    record: &'a StringRecord,
    header_map: &HashMap<String, usize>,
    names: [&str; 2],
) -> Result<&'a str, String> {
    let value = get_value(record, header_map, names);
    if value.is_empty() {
        return Err(format!("Missing `{}` value.", names[0]));
    }
    Ok(value)
}

fn parse_row(record: &StringRecord, header_map: &HashMap<String, usize>) -> Result<RawInput, String> {
    let mut input = RawInput::default();

    for field in NumericField::ALL {
        let names = numeric_columns(field);
        let text = get_required(record, header_map, names)?;
        let value: i64 = text
            .parse()
            .map_err(|_| format!("Invalid `{}` value '{text}'.", names[0]))?;
        if !field.contains(value) {
            let (lo, hi) = field.range();
            return Err(format!(
                "`{}` value {value} is outside [{lo}, {hi}].",
                names[0]
            ));
        }
        input.set_value(field, value);
    }

    for field in CategoricalField::ALL {
        let names = categorical_columns(field);
        // An empty country is just another unknown label.
        let label = if field.is_open() {
            get_value(record, header_map, names)
        } else {
            get_required(record, header_map, names)?
        };
        input.set_label(field, label);
    }

    Ok(input)
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str = "age,workclass,education_num,marital_status,occupation,relationship,race,gender,capital_gain,capital_loss,hours_per_week,native_country";

    #[test]
    fn reads_valid_rows() {
        let csv = format!(
            "{HEADER}\n30,Private,10,Never-married,Prof-specialty,Not-in-family,White,Male,0,0,40,United-States\n\
             52,Self-emp-inc,14,Married-civ-spouse,Exec-managerial,Husband,White,Male,15024,0,60,Atlantis\n"
        );
        let out = read_inputs(csv.as_bytes()).unwrap();
        assert_eq!(out.rows_read, 2);
        assert!(out.row_errors.is_empty());
        assert_eq!(out.rows[0].line, 2);
        assert_eq!(out.rows[0].input.occupation, "Prof-specialty");
        assert_eq!(out.rows[1].input.capital_gain, 15024);
        assert_eq!(out.rows[1].input.native_country, "Atlantis");
    }

    #[test]
    fn accepts_training_column_spellings() {
        let csv = "\u{feff}Age,workclass,educational-num,marital-status,occupation,relationship,race,gender,capital-gain,capital-loss,hours-per-week,native-country\n\
                   30,Private,10,Never-married,Sales,Own-child,Black,Female,0,0,20,Mexico\n";
        let out = read_inputs(csv.as_bytes()).unwrap();
        assert_eq!(out.rows.len(), 1);
        assert_eq!(out.rows[0].input.education_num, 10);
        assert_eq!(out.rows[0].input.native_country, "Mexico");
    }

    #[test]
    fn rejects_out_of_range_and_malformed_rows() {
        let csv = format!(
            "{HEADER}\n16,Private,10,Never-married,Sales,Own-child,White,Male,0,0,40,India\n\
             30,Private,ten,Never-married,Sales,Own-child,White,Male,0,0,40,India\n\
             30,Private,10,Never-married,Sales,Own-child,,Male,0,0,40,India\n\
             30,Private,10,Never-married,Sales,Own-child,White,Male,0,0,40,India\n"
        );
        let out = read_inputs(csv.as_bytes()).unwrap();
        assert_eq!(out.rows_read, 4);
        assert_eq!(out.rows.len(), 1);
        assert_eq!(out.rows[0].line, 5);
        let lines: Vec<usize> = out.row_errors.iter().map(|e| e.line).collect();
        assert_eq!(lines, vec![2, 3, 4]);
        assert!(out.row_errors[0].message.contains("outside [17, 75]"));
        assert!(out.row_errors[1].message.contains("Invalid `education_num`"));
        assert!(out.row_errors[2].message.contains("Missing `race`"));
    }

    #[test]
    fn empty_country_is_kept_for_fallback() {
        let csv = format!(
            "{HEADER}\n30,Private,10,Never-married,Sales,Own-child,White,Male,0,0,40,\n"
        );
        let out = read_inputs(csv.as_bytes()).unwrap();
        assert!(out.row_errors.is_empty());
        assert_eq!(out.rows[0].input.native_country, "");
        let features = crate::encoding::encode(&out.rows[0].input).unwrap();
        assert_eq!(features.get(crate::domain::Feature::NativeCountry), 0);
    }

    #[test]
    fn labels_are_not_validated_at_ingest() {
        let csv = format!(
            "{HEADER}\n30,Astronaut,10,Never-married,Sales,Own-child,White,Male,0,0,40,India\n"
        );
        let out = read_inputs(csv.as_bytes()).unwrap();
        assert_eq!(out.rows[0].input.workclass, "Astronaut");
    }

    #[test]
    fn missing_columns_fail_the_whole_file() {
        let err = read_inputs("age,workclass\n30,Private\n".as_bytes()).unwrap_err();
        assert_eq!(err.exit_code(), EXIT_INPUT);
        assert!(err.to_string().contains("education_num"));
        assert!(err.to_string().contains("native_country"));
    }
}
