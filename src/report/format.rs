//! Terminal formatting.
//!
//! All human-readable output lives here so the scoring code stays free of
//! presentation concerns.

use crate::app::pipeline::BatchOutput;
use crate::domain::{CategoricalField, FeatureVector, PredictionResult, RawInput};
use crate::encoding::tables;

/// Boxed result card for a single prediction.
pub fn format_result_card(result: PredictionResult) -> String {
    let headline = result.headline();
    let detail = result.detail();
    let width = headline.len().max(detail.len()) + 4;
    let rule = "─".repeat(width);

    let mut out = String::new();
    out.push_str(&format!("┌{rule}┐\n"));
    out.push_str(&format!("│  {headline:<w$}  │\n", w = width - 4));
    out.push_str(&format!("│  {detail:<w$}  │\n", w = width - 4));
    out.push_str(&format!("└{rule}┘"));
    out
}

/// The profile as entered.
pub fn format_profile(raw: &RawInput) -> String {
    let mut out = String::new();
    out.push_str("Profile:\n");
    out.push_str(&format!("  {:<16} {}\n", "age", raw.age));
    out.push_str(&format!("  {:<16} {}\n", "education_num", raw.education_num));
    out.push_str(&format!("  {:<16} {}\n", "capital_gain", raw.capital_gain));
    out.push_str(&format!("  {:<16} {}\n", "capital_loss", raw.capital_loss));
    out.push_str(&format!("  {:<16} {}\n", "hours_per_week", raw.hours_per_week));
    for field in CategoricalField::ALL {
        out.push_str(&format!("  {:<16} {}\n", field.name(), raw.label(field)));
    }
    out
}

/// Feature vector as a `position  name  value` table.
pub fn format_features(features: &FeatureVector) -> String {
    let mut out = String::new();
    out.push_str("Feature vector:\n");
    for (i, (name, value)) in features.named().enumerate() {
        out.push_str(&format!("  {i:>2}  {name:<16} {value}\n"));
    }
    out
}

/// Dump every encoding table in declared order.
pub fn format_tables() -> String {
    let mut out = String::new();
    for field in CategoricalField::ALL {
        let table = tables().get(field);
        out.push_str(field.name());
        if field.is_open() {
            out.push_str(" (unknown labels → 0)");
        }
        out.push('\n');
        for (label, code) in table.entries() {
            out.push_str(&format!("  {label:<24} {code}\n"));
        }
    }
    out
}

/// Batch run summary, including rejected rows.
pub fn format_batch_summary(batch: &BatchOutput) -> String {
    let n = batch.scored.len();
    let high = batch.count(PredictionResult::HighIncome);
    let standard = batch.count(PredictionResult::StandardIncome);
    let pct = |k: usize| if n == 0 { 0.0 } else { 100.0 * k as f64 / n as f64 };

    let mut out = String::new();
    out.push_str("=== income - batch summary ===\n");
    out.push_str(&format!(
        "Rows: read={} | scored={} | rejected={}\n",
        batch.rows_read,
        n,
        batch.rejected.len()
    ));
    out.push_str(&format!(
        "{:<6} {:>6} ({:.1}%)\n",
        PredictionResult::HighIncome.short_label(),
        high,
        pct(high)
    ));
    out.push_str(&format!(
        "{:<6} {:>6} ({:.1}%)\n",
        PredictionResult::StandardIncome.short_label(),
        standard,
        pct(standard)
    ));

    if !batch.rejected.is_empty() {
        out.push_str("\nRejected rows:\n");
        for e in &batch.rejected {
            out.push_str(&format!("  line {}: {}\n", e.line, e.message));
        }
    }
    out
}
