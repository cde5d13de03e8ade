//! Runtime configuration.
//!
//! Resolution order for each setting: command-line flag, then environment
//! (a `.env` file in the working directory is loaded first), then default.

use std::path::PathBuf;

pub const MODEL_PATH_ENV: &str = "INCOME_MODEL_PATH";
pub const DEFAULT_MODEL_PATH: &str = "best_model.json";
pub const DEFAULT_LOG_FILTER: &str = "income_predictor=info";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub model_path: PathBuf,
    pub log_filter: String,
}

impl AppConfig {
    /// Resolve configuration from flags and the process environment.
    pub fn from_env(model_flag: Option<PathBuf>, log_flag: Option<String>) -> Self {
        dotenvy::dotenv().ok();
        Self::resolve(model_flag, log_flag, |key| std::env::var(key).ok())
    }

    fn resolve(
        model_flag: Option<PathBuf>,
        log_flag: Option<String>,
        env: impl Fn(&str) -> Option<String>,
    ) -> Self {
        let model_path = model_flag
            .or_else(|| env(MODEL_PATH_ENV).filter(|s| !s.trim().is_empty()).map(PathBuf::from))
            .unwrap_or_else(|| PathBuf::from(DEFAULT_MODEL_PATH));

        let log_filter = log_flag
            .or_else(|| env("RUST_LOG").filter(|s| !s.trim().is_empty()))
            .unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string());

        Self {
            model_path,
            log_filter,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env_of(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_apply_when_nothing_is_set() {
        let cfg = AppConfig::resolve(None, None, env_of(&[]));
        assert_eq!(cfg.model_path, PathBuf::from("best_model.json"));
        assert_eq!(cfg.log_filter, "income_predictor=info");
    }

    #[test]
    fn environment_beats_defaults_and_flags_beat_environment() {
        let env = env_of(&[(MODEL_PATH_ENV, "/srv/models/m.json"), ("RUST_LOG", "debug")]);
        let cfg = AppConfig::resolve(None, None, &env);
        assert_eq!(cfg.model_path, PathBuf::from("/srv/models/m.json"));
        assert_eq!(cfg.log_filter, "debug");

        let cfg = AppConfig::resolve(Some(PathBuf::from("local.json")), Some("warn".into()), &env);
        assert_eq!(cfg.model_path, PathBuf::from("local.json"));
        assert_eq!(cfg.log_filter, "warn");
    }

    #[test]
    fn blank_environment_values_are_ignored() {
        let cfg = AppConfig::resolve(None, None, env_of(&[(MODEL_PATH_ENV, "  ")]));
        assert_eq!(cfg.model_path, PathBuf::from(DEFAULT_MODEL_PATH));
    }
}
