//! Command-line parsing for the income predictor.
//!
//! The goal of this module is to keep **argument parsing** separate from the
//! encoding and scoring code. Closed-domain fields only accept their listed
//! labels and numeric fields only accept in-range values, so anything that
//! reaches the encoder from here is already in domain (except
//! `--native-country`, which is free text).

use std::path::PathBuf;

use clap::builder::{PossibleValuesParser, RangedI64ValueParser};
use clap::{Args, Parser, Subcommand};

use crate::domain::{CategoricalField, NumericField, RawInput};

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(
    name = "income",
    version,
    about = "Predict whether a person earns more or less than $50K from demographic info"
)]
pub struct Cli {
    /// Model artifact (JSON). Defaults to $INCOME_MODEL_PATH, then ./best_model.json.
    #[arg(long, global = true, value_name = "PATH")]
    pub model: Option<PathBuf>,

    /// Log filter (tracing EnvFilter syntax). Defaults to $RUST_LOG, then `income_predictor=info`.
    #[arg(long, global = true, value_name = "FILTER")]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Score one profile and print the result.
    Predict(PredictArgs),
    /// Print the feature vector a profile encodes to (no model needed).
    Encode(EncodeArgs),
    /// Print the categorical encoding tables.
    Tables,
    /// Score every row of a CSV file.
    Batch(BatchArgs),
    /// Generate seeded synthetic profiles and score them.
    Sample(SampleArgs),
    /// Launch the interactive form.
    Tui,
}

fn numeric(field: NumericField) -> RangedI64ValueParser<i64> {
    let (lo, hi) = field.range();
    clap::value_parser!(i64).range(lo..=hi)
}

fn labels(field: CategoricalField) -> PossibleValuesParser {
    PossibleValuesParser::new(field.options().iter().copied())
}

/// One profile, with the same defaults as the interactive form.
#[derive(Debug, Args, Clone)]
pub struct ProfileArgs {
    /// Age in years.
    #[arg(long, default_value_t = NumericField::Age.default_value(), value_parser = numeric(NumericField::Age))]
    pub age: i64,

    #[arg(long, default_value = CategoricalField::Workclass.options()[0], value_parser = labels(CategoricalField::Workclass))]
    pub workclass: String,

    /// Years of education (1-16).
    #[arg(long, default_value_t = NumericField::EducationNum.default_value(), value_parser = numeric(NumericField::EducationNum))]
    pub education_num: i64,

    #[arg(long, default_value = CategoricalField::MaritalStatus.options()[0], value_parser = labels(CategoricalField::MaritalStatus))]
    pub marital_status: String,

    #[arg(long, default_value = CategoricalField::Occupation.options()[0], value_parser = labels(CategoricalField::Occupation))]
    pub occupation: String,

    #[arg(long, default_value = CategoricalField::Relationship.options()[0], value_parser = labels(CategoricalField::Relationship))]
    pub relationship: String,

    #[arg(long, default_value = CategoricalField::Race.options()[0], value_parser = labels(CategoricalField::Race))]
    pub race: String,

    #[arg(long, default_value = CategoricalField::Gender.options()[0], value_parser = labels(CategoricalField::Gender))]
    pub gender: String,

    #[arg(long, default_value_t = NumericField::CapitalGain.default_value(), value_parser = numeric(NumericField::CapitalGain))]
    pub capital_gain: i64,

    #[arg(long, default_value_t = NumericField::CapitalLoss.default_value(), value_parser = numeric(NumericField::CapitalLoss))]
    pub capital_loss: i64,

    #[arg(long, default_value_t = NumericField::HoursPerWeek.default_value(), value_parser = numeric(NumericField::HoursPerWeek))]
    pub hours_per_week: i64,

    /// Country of origin. Countries without a dedicated code are scored as "Others".
    #[arg(long, default_value = CategoricalField::NativeCountry.options()[0])]
    pub native_country: String,
}

impl From<ProfileArgs> for RawInput {
    fn from(args: ProfileArgs) -> Self {
        RawInput {
            age: args.age,
            workclass: args.workclass,
            education_num: args.education_num,
            marital_status: args.marital_status,
            occupation: args.occupation,
            relationship: args.relationship,
            race: args.race,
            gender: args.gender,
            capital_gain: args.capital_gain,
            capital_loss: args.capital_loss,
            hours_per_week: args.hours_per_week,
            native_country: args.native_country,
        }
    }
}

#[derive(Debug, Args, Clone)]
pub struct PredictArgs {
    #[command(flatten)]
    pub profile: ProfileArgs,

    /// Print JSON (`features` + `prediction`) instead of the result card.
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Args, Clone)]
pub struct EncodeArgs {
    #[command(flatten)]
    pub profile: ProfileArgs,

    /// Print the bare vector as a JSON array.
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Args, Clone)]
pub struct BatchArgs {
    /// CSV of profiles (one column per input field).
    #[arg(long, value_name = "CSV")]
    pub input: PathBuf,

    /// Write scored rows (inputs, features, prediction) to CSV.
    #[arg(long, value_name = "CSV")]
    pub output: Option<PathBuf>,
}

#[derive(Debug, Args, Clone)]
pub struct SampleArgs {
    /// Number of profiles to generate.
    #[arg(short = 'n', long, default_value_t = 100)]
    pub count: usize,

    /// Random seed.
    #[arg(long, default_value_t = 42)]
    pub seed: u64,

    /// Write scored rows to CSV.
    #[arg(long, value_name = "CSV")]
    pub output: Option<PathBuf>,
}
