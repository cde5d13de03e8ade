//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - parses CLI arguments and resolves configuration
//! - initializes logging
//! - loads the model artifact once (commands that need it)
//! - dispatches to the requested command and prints results

use std::path::Path;

use clap::Parser;

use crate::cli::{BatchArgs, Command, EncodeArgs, PredictArgs, SampleArgs};
use crate::config::AppConfig;
use crate::domain::RawInput;
use crate::error::{AppError, EXIT_INTERNAL};
use crate::models::{LoadedModel, load_model};
use crate::predictor::IncomeService;

pub mod pipeline;

/// Entry point for the `income` binary.
pub fn run() -> Result<(), AppError> {
    // `income` alone opens the interactive form.
    let argv = rewrite_args(std::env::args().collect());
    let cli = crate::cli::Cli::parse_from(argv);

    let config = AppConfig::from_env(cli.model, cli.log_level);
    let log_filter = match cli.command {
        // Log lines would tear through the alternate screen.
        Command::Tui => "warn".to_string(),
        _ => config.log_filter.clone(),
    };
    crate::logging::init(&log_filter)?;

    match cli.command {
        Command::Encode(args) => handle_encode(args),
        Command::Tables => {
            println!("{}", crate::report::format_tables());
            Ok(())
        }
        Command::Predict(args) => handle_predict(args, &start_service(&config)?),
        Command::Batch(args) => handle_batch(args, &start_service(&config)?),
        Command::Sample(args) => handle_sample(args, &start_service(&config)?),
        Command::Tui => {
            let service = start_service(&config)?;
            let label = format!(
                "{} ({})",
                config.model_path.display(),
                service.adapter().model().kind_name()
            );
            crate::tui::run(&service, &label)
        }
    }
}

/// Load the model artifact. On failure nothing else runs.
pub fn start_service(config: &AppConfig) -> Result<IncomeService<LoadedModel>, AppError> {
    let service = IncomeService::start(|| load_model(&config.model_path))?;
    tracing::info!(
        path = %config.model_path.display(),
        kind = service.adapter().model().kind_name(),
        "model ready"
    );
    Ok(service)
}

fn handle_encode(args: EncodeArgs) -> Result<(), AppError> {
    let raw = RawInput::from(args.profile);
    let features = crate::encoding::encode(&raw)?;

    if args.json {
        let json = serde_json::to_string(features.values())
            .map_err(|e| AppError::new(EXIT_INTERNAL, format!("Failed to serialize features: {e}")))?;
        println!("{json}");
    } else {
        println!("{}", crate::report::format_features(&features));
    }
    Ok(())
}

fn handle_predict(args: PredictArgs, service: &IncomeService<LoadedModel>) -> Result<(), AppError> {
    let raw = RawInput::from(args.profile);
    let scored = service.score(&raw)?;

    if args.json {
        let body = serde_json::json!({
            "input": raw,
            "features": scored.features.values(),
            "prediction": scored.prediction.short_label(),
        });
        let json = serde_json::to_string_pretty(&body)
            .map_err(|e| AppError::new(EXIT_INTERNAL, format!("Failed to serialize prediction: {e}")))?;
        println!("{json}");
    } else {
        println!("{}", crate::report::format_profile(&raw));
        println!("{}", crate::report::format_result_card(scored.prediction));
    }
    Ok(())
}

fn handle_batch(args: BatchArgs, service: &IncomeService<LoadedModel>) -> Result<(), AppError> {
    let ingest = crate::io::ingest::load_inputs(&args.input)?;
    let batch = pipeline::score_rows(service, ingest.rows, ingest.row_errors, ingest.rows_read)?;

    println!("{}", crate::report::format_batch_summary(&batch));
    write_optional_export(args.output.as_deref(), &batch)
}

fn handle_sample(args: SampleArgs, service: &IncomeService<LoadedModel>) -> Result<(), AppError> {
    let profiles = crate::data::generate_profiles(args.count, args.seed)?;
    let batch = pipeline::score_profiles(service, profiles)?;

    println!("{}", crate::report::format_batch_summary(&batch));
    write_optional_export(args.output.as_deref(), &batch)
}

fn write_optional_export(path: Option<&Path>, batch: &pipeline::BatchOutput) -> Result<(), AppError> {
    if let Some(path) = path {
        crate::io::export::write_results_csv(path, &batch.scored)?;
        tracing::info!(path = %path.display(), rows = batch.scored.len(), "wrote results");
    }
    Ok(())
}

/// Rewrite argv so `income` with no arguments behaves like `income tui`.
///
/// Top-level flags alone (e.g. `income --model m.json`) also open the form;
/// `--help`/`--version` are left untouched.
fn rewrite_args(mut argv: Vec<String>) -> Vec<String> {
    const SUBCOMMANDS: [&str; 7] = ["predict", "encode", "tables", "batch", "sample", "tui", "help"];

    let has_subcommand = argv.iter().skip(1).any(|a| SUBCOMMANDS.contains(&a.as_str()));
    let wants_help = argv
        .iter()
        .skip(1)
        .any(|a| matches!(a.as_str(), "-h" | "--help" | "-V" | "--version"));

    if !has_subcommand && !wants_help {
        argv.push("tui".to_string());
    }
    argv
}

#[cfg(test)]
mod tests {
    use super::*;

    fn argv(args: &[&str]) -> Vec<String> {
        std::iter::once("income")
            .chain(args.iter().copied())
            .map(String::from)
            .collect()
    }

    #[test]
    fn bare_invocation_opens_tui() {
        assert_eq!(rewrite_args(argv(&[])), argv(&["tui"]));
        assert_eq!(
            rewrite_args(argv(&["--model", "m.json"])),
            argv(&["--model", "m.json", "tui"])
        );
    }

    #[test]
    fn explicit_commands_and_help_are_untouched() {
        assert_eq!(rewrite_args(argv(&["tables"])), argv(&["tables"]));
        assert_eq!(
            rewrite_args(argv(&["--model", "m.json", "predict", "--age", "40"])),
            argv(&["--model", "m.json", "predict", "--age", "40"])
        );
        assert_eq!(rewrite_args(argv(&["--help"])), argv(&["--help"]));
    }

    #[test]
    fn missing_model_is_a_startup_failure() {
        let config = AppConfig {
            model_path: "no/such/dir/best_model.json".into(),
            log_filter: "off".to_string(),
        };
        let err = start_service(&config).err().unwrap();
        assert_eq!(err.exit_code(), crate::error::EXIT_STARTUP);
        assert!(err.to_string().contains("not found"));
    }
}
