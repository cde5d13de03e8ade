//! Error types.
//!
//! `AppError` is what the binary surfaces: a message plus a process exit code.
//! The scoring core reports its own failures through `PredictError` and
//! `StartupError`, which convert into `AppError` at the application boundary.
//!
//! Exit codes:
//! - 2: usage / input errors
//! - 3: fatal startup errors (model artifact)
//! - 4: internal errors

use std::path::PathBuf;

use crate::domain::CategoricalField;

pub const EXIT_INPUT: u8 = 2;
pub const EXIT_STARTUP: u8 = 3;
pub const EXIT_INTERNAL: u8 = 4;

#[derive(Clone)]
pub struct AppError {
    exit_code: u8,
    message: String,
}

impl AppError {
    pub fn new(exit_code: u8, message: impl Into<String>) -> Self {
        Self {
            exit_code,
            message: message.into(),
        }
    }

    pub fn exit_code(&self) -> u8 {
        self.exit_code
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::fmt::Debug for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppError")
            .field("exit_code", &self.exit_code)
            .field("message", &self.message)
            .finish()
    }
}

impl std::error::Error for AppError {}

/// Per-request failures of `encode_and_predict`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PredictError {
    /// A closed-domain categorical field held a label outside its table.
    InvalidInput {
        field: CategoricalField,
        label: String,
    },
    /// The model returned something other than 0 or 1.
    UnexpectedModelOutput { value: i64 },
}

impl std::fmt::Display for PredictError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PredictError::InvalidInput { field, label } => write!(
                f,
                "Invalid input: '{label}' is not a known {} value.",
                field.name()
            ),
            PredictError::UnexpectedModelOutput { value } => write!(
                f,
                "Unexpected model output: expected 0 or 1, got {value}."
            ),
        }
    }
}

impl std::error::Error for PredictError {}

impl From<PredictError> for AppError {
    fn from(err: PredictError) -> Self {
        let code = match err {
            PredictError::InvalidInput { .. } => EXIT_INPUT,
            PredictError::UnexpectedModelOutput { .. } => EXIT_INTERNAL,
        };
        AppError::new(code, err.to_string())
    }
}

/// The model artifact could not be made available at startup.
///
/// There is no recovery inside the process: nothing is served once this occurs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StartupError {
    pub path: PathBuf,
    pub reason: String,
}

impl StartupError {
    pub fn new(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            reason: reason.into(),
        }
    }
}

impl std::fmt::Display for StartupError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.reason)
    }
}

impl std::error::Error for StartupError {}

impl From<StartupError> for AppError {
    fn from(err: StartupError) -> Self {
        AppError::new(EXIT_STARTUP, err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn predict_errors_map_to_distinct_exit_codes() {
        let invalid: AppError = PredictError::InvalidInput {
            field: CategoricalField::Race,
            label: "Martian".to_string(),
        }
        .into();
        assert_eq!(invalid.exit_code(), EXIT_INPUT);
        assert!(invalid.to_string().contains("Martian"));
        assert!(invalid.to_string().contains("race"));

        let unexpected: AppError = PredictError::UnexpectedModelOutput { value: 2 }.into();
        assert_eq!(unexpected.exit_code(), EXIT_INTERNAL);
    }

    #[test]
    fn startup_error_is_fatal_exit_code() {
        let err: AppError = StartupError::new("best_model.json", "Model file 'best_model.json' not found.").into();
        assert_eq!(err.exit_code(), EXIT_STARTUP);
        assert_eq!(err.to_string(), "Model file 'best_model.json' not found.");
    }
}
