//! Shared batch scoring logic used by the `batch` and `sample` commands.
//!
//! Rows are scored in parallel against one shared service; output order always
//! matches input order.

use rayon::prelude::*;

use crate::domain::{PredictionResult, RawInput};
use crate::error::{AppError, PredictError};
use crate::io::ingest::{InputRow, RowError};
use crate::predictor::{Classifier, IncomeService, Scored};

/// A successfully scored row.
#[derive(Debug, Clone)]
pub struct ScoredRow {
    pub line: usize,
    pub input: RawInput,
    pub scored: Scored,
}

/// All computed outputs of one batch run.
#[derive(Debug, Clone)]
pub struct BatchOutput {
    pub scored: Vec<ScoredRow>,
    /// Rows that could not be scored (ingest rejections and invalid labels), by line.
    pub rejected: Vec<RowError>,
    pub rows_read: usize,
}

impl BatchOutput {
    pub fn count(&self, result: PredictionResult) -> usize {
        self.scored
            .iter()
            .filter(|r| r.scored.prediction == result)
            .count()
    }
}

/// Score every row.
///
/// An invalid label rejects only its row. A model output outside {0, 1}
/// aborts the whole batch, since every other row came from the same model.
pub fn score_rows<M: Classifier>(
    service: &IncomeService<M>,
    rows: Vec<InputRow>,
    mut rejected: Vec<RowError>,
    rows_read: usize,
) -> Result<BatchOutput, AppError> {
    let results: Vec<(InputRow, Result<Scored, PredictError>)> = rows
        .into_par_iter()
        .map(|row| {
            let result = service.score(&row.input);
            (row, result)
        })
        .collect();

    let mut scored = Vec::with_capacity(results.len());
    for (row, result) in results {
        match result {
            Ok(s) => scored.push(ScoredRow {
                line: row.line,
                input: row.input,
                scored: s,
            }),
            Err(err @ PredictError::InvalidInput { .. }) => {
                tracing::warn!(line = row.line, "rejected input row: {err}");
                rejected.push(RowError {
                    line: row.line,
                    message: err.to_string(),
                });
            }
            Err(err @ PredictError::UnexpectedModelOutput { .. }) => {
                return Err(AppError::new(
                    crate::error::EXIT_INTERNAL,
                    format!("Line {}: {err}", row.line),
                ));
            }
        }
    }

    rejected.sort_by_key(|e| e.line);
    tracing::info!(
        rows_read,
        scored = scored.len(),
        rejected = rejected.len(),
        "batch scored"
    );

    Ok(BatchOutput {
        scored,
        rejected,
        rows_read,
    })
}

/// Score generated profiles; lines are numbered from 1.
pub fn score_profiles<M: Classifier>(
    service: &IncomeService<M>,
    profiles: Vec<RawInput>,
) -> Result<BatchOutput, AppError> {
    let rows_read = profiles.len();
    let rows = profiles
        .into_iter()
        .enumerate()
        .map(|(i, input)| InputRow { line: i + 1, input })
        .collect();
    score_rows(service, rows, Vec::new(), rows_read)
}
