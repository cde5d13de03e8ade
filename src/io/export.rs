//! Export scored rows to CSV.
//!
//! The export is meant to be easy to consume in spreadsheets or downstream
//! scripts: the raw inputs, the exact feature vector sent to the model, and
//! the decision.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::domain::{CategoricalField, Feature, NumericField};
use crate::error::{AppError, EXIT_INPUT};
use crate::app::pipeline::ScoredRow;

/// Write scored rows to a CSV file.
pub fn write_results_csv(path: &Path, rows: &[ScoredRow]) -> Result<(), AppError> {
    let file = File::create(path).map_err(|e| {
        AppError::new(
            EXIT_INPUT,
            format!("Failed to create export CSV '{}': {e}", path.display()),
        )
    })?;
    write_results(file, rows)
}

pub fn write_results<W: Write>(sink: W, rows: &[ScoredRow]) -> Result<(), AppError> {
    let mut writer = csv::Writer::from_writer(sink);

    let mut header = vec!["line".to_string()];
    header.extend(NumericField::ALL.iter().map(|f| f.name().to_string()));
    header.extend(CategoricalField::ALL.iter().map(|f| f.name().to_string()));
    header.extend(Feature::ALL.iter().map(|f| format!("x_{}", f.name())));
    header.push("prediction".to_string());
    writer
        .write_record(&header)
        .map_err(|e| AppError::new(EXIT_INPUT, format!("Failed to write export CSV header: {e}")))?;

    for row in rows {
        let mut record = vec![row.line.to_string()];
        record.extend(NumericField::ALL.iter().map(|&f| row.input.value(f).to_string()));
        record.extend(CategoricalField::ALL.iter().map(|&f| row.input.label(f).to_string()));
        record.extend(row.scored.features.values().iter().map(|v| v.to_string()));
        record.push(row.scored.prediction.short_label().to_string());
        writer
            .write_record(&record)
            .map_err(|e| AppError::new(EXIT_INPUT, format!("Failed to write export CSV row: {e}")))?;
    }

    writer
        .flush()
        .map_err(|e| AppError::new(EXIT_INPUT, format!("Failed to flush export CSV: {e}")))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{FeatureVector, PredictionResult, RawInput};
    use crate::predictor::Scored;

    #[test]
    fn writes_inputs_features_and_label() {
        let rows = vec![ScoredRow {
            line: 7,
            input: RawInput::default(),
            scored: Scored {
                features: FeatureVector::new([30, 4, 180000, 10, 0, 9, 2, 4, 1, 0, 0, 40, 38]),
                prediction: PredictionResult::HighIncome,
            },
        }];

        let mut buf = Vec::new();
        write_results(&mut buf, &rows).unwrap();
        let text = String::from_utf8(buf).unwrap();
        let mut lines = text.lines();

        let header = lines.next().unwrap();
        assert!(header.starts_with("line,age,education_num,"));
        assert!(header.contains("x_fnlwgt,x_educational-num"));
        assert!(header.ends_with("x_native-country,prediction"));

        let row = lines.next().unwrap();
        assert!(row.starts_with("7,30,10,0,0,40,Private,"));
        assert!(row.ends_with(",30,4,180000,10,0,9,2,4,1,0,0,40,38,>50K"));
        assert!(lines.next().is_none());
    }
}
