//! Tracing subscriber setup.
//!
//! Logs always go to stderr; stdout is reserved for results.

use std::io::IsTerminal;

use tracing_subscriber::EnvFilter;

use crate::error::{AppError, EXIT_INPUT};

/// Install the global subscriber. Safe to call more than once; later calls are no-ops.
pub fn init(filter: &str) -> Result<(), AppError> {
    let filter = EnvFilter::try_new(filter)
        .map_err(|e| AppError::new(EXIT_INPUT, format!("Invalid log filter '{filter}': {e}")))?;

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .with_target(false)
        .try_init();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_malformed_filter() {
        let err = init("income_predictor=loud").unwrap_err();
        assert_eq!(err.exit_code(), EXIT_INPUT);
    }

    #[test]
    fn repeated_init_is_harmless() {
        init("warn").unwrap();
        init("debug").unwrap();
    }
}
