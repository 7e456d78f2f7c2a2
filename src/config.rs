//! Run configuration supplied by the orchestrator.
//!
//! The raw values arrive through the environment (see `cli::RunArgs`) and are
//! validated once, here. Nothing downstream reads the process environment.

use chrono::NaiveDate;
use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

use crate::{source::BASE_URL, window::Window};

pub const START_DATE_VAR: &str = "START_DATE";
pub const END_DATE_VAR: &str = "END_DATE";
pub const DEFAULT_TAXI_TYPE: &str = "yellow";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing env var: {0}")]
    Missing(&'static str),
    #[error("invalid date in {name}: `{value}`")]
    InvalidDate { name: &'static str, value: String },
    #[error("invalid RUN_VARS: {0}")]
    RunVars(#[from] serde_json::Error),
    #[error("invalid RUN_VARS: expected a JSON object, got `{0}`")]
    RunVarsNotObject(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IngestConfig {
    pub window: Window,
    pub taxi_types: Vec<String>,
    pub base_url: String,
}

#[derive(Debug, Default, Deserialize)]
struct RunVars {
    taxi_types: Option<Vec<String>>,
}

impl IngestConfig {
    pub fn from_raw(
        start_date: Option<&str>,
        end_date: Option<&str>,
        run_vars: Option<&str>,
    ) -> Result<Self, ConfigError> {
        let start = parse_date(START_DATE_VAR, start_date)?;
        let end = parse_date(END_DATE_VAR, end_date)?;
        let taxi_types = parse_taxi_types(run_vars)?;

        Ok(IngestConfig {
            window: Window::new(start, end),
            taxi_types,
            base_url: BASE_URL.to_string(),
        })
    }

    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }
}

fn parse_date(name: &'static str, value: Option<&str>) -> Result<NaiveDate, ConfigError> {
    let value = match value.map(str::trim) {
        Some(v) if !v.is_empty() => v,
        _ => return Err(ConfigError::Missing(name)),
    };

    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(value, "%Y%m%d"))
        .map_err(|_| ConfigError::InvalidDate {
            name,
            value: value.to_string(),
        })
}

fn parse_taxi_types(run_vars: Option<&str>) -> Result<Vec<String>, ConfigError> {
    let run_vars = match run_vars.map(str::trim) {
        Some(v) if !v.is_empty() => match serde_json::from_str::<Value>(v)? {
            value @ Value::Object(_) => serde_json::from_value::<RunVars>(value)?,
            _ => return Err(ConfigError::RunVarsNotObject(v.to_string())),
        },
        _ => RunVars::default(),
    };

    Ok(run_vars
        .taxi_types
        .unwrap_or_else(|| vec![DEFAULT_TAXI_TYPE.to_string()]))
}

// -- Tests -------------------------------------------------------------------

#[cfg(test)]
mod test {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn should_read_config() {
        let config = IngestConfig::from_raw(
            Some("2023-01-15"),
            Some("2023-03-01"),
            Some(r#"{"taxi_types": ["yellow", "green"]}"#),
        )
        .unwrap();

        assert_eq!(config.window, Window::new(date(2023, 1, 15), date(2023, 3, 1)));
        assert_eq!(config.taxi_types, vec!["yellow", "green"]);
        assert_eq!(config.base_url, BASE_URL);
    }

    #[test]
    fn should_default_to_yellow_without_run_vars() {
        let config = IngestConfig::from_raw(Some("2023-01-15"), Some("2023-03-01"), None).unwrap();

        assert_eq!(config.taxi_types, vec!["yellow".to_string()]);
    }

    #[test]
    fn should_default_to_yellow_without_taxi_types_key() {
        let config = IngestConfig::from_raw(
            Some("2023-01-15"),
            Some("2023-03-01"),
            Some(r#"{"other_var": 3}"#),
        )
        .unwrap();

        assert_eq!(config.taxi_types, vec!["yellow".to_string()]);
    }

    #[test]
    fn should_treat_blank_run_vars_as_absent() {
        let config = IngestConfig::from_raw(Some("2023-01-15"), Some("2023-03-01"), Some("  ")).unwrap();

        assert_eq!(config.taxi_types, vec!["yellow".to_string()]);
    }

    #[test]
    fn should_keep_empty_taxi_types() {
        let config =
            IngestConfig::from_raw(Some("2023-01-15"), Some("2023-03-01"), Some(r#"{"taxi_types": []}"#))
                .unwrap();

        assert!(config.taxi_types.is_empty());
    }

    #[test]
    fn should_fail_on_missing_dates() {
        let err = IngestConfig::from_raw(None, Some("2023-03-01"), None).unwrap_err();
        assert!(matches!(err, ConfigError::Missing("START_DATE")));

        let err = IngestConfig::from_raw(Some("2023-01-15"), Some(""), None).unwrap_err();
        assert!(matches!(err, ConfigError::Missing("END_DATE")));
    }

    #[test]
    fn should_fail_on_bad_date() {
        let err = IngestConfig::from_raw(Some("2023-13-01"), Some("2023-03-01"), None).unwrap_err();

        assert!(matches!(err, ConfigError::InvalidDate { name: "START_DATE", .. }));
        assert_eq!(err.to_string(), "invalid date in START_DATE: `2023-13-01`");
    }

    #[test]
    fn should_accept_basic_date_format() {
        let config = IngestConfig::from_raw(Some("20230115"), Some("20230301"), None).unwrap();

        assert_eq!(config.window.start, date(2023, 1, 15));
    }

    #[test]
    fn should_fail_on_malformed_run_vars() {
        let err =
            IngestConfig::from_raw(Some("2023-01-15"), Some("2023-03-01"), Some("{not json")).unwrap_err();
        assert!(matches!(err, ConfigError::RunVars(_)));

        let err = IngestConfig::from_raw(
            Some("2023-01-15"),
            Some("2023-03-01"),
            Some(r#"{"taxi_types": "yellow"}"#),
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::RunVars(_)));
    }

    #[test]
    fn should_fail_on_non_object_run_vars() {
        for run_vars in [r#"[["green"]]"#, "[null]", r#""yellow""#, "3", "null"] {
            let err = IngestConfig::from_raw(Some("2023-01-15"), Some("2023-03-01"), Some(run_vars))
                .unwrap_err();

            assert!(matches!(err, ConfigError::RunVarsNotObject(_)), "{}", run_vars);
        }

        let err = IngestConfig::from_raw(Some("2023-01-15"), Some("2023-03-01"), Some("[null]"))
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "invalid RUN_VARS: expected a JSON object, got `[null]`"
        );
    }

    #[test]
    fn should_trim_base_url() {
        let config = IngestConfig::from_raw(Some("2023-01-15"), Some("2023-03-01"), None)
            .unwrap()
            .with_base_url("http://mirror/trip-data/");

        assert_eq!(config.base_url, "http://mirror/trip-data");
    }
}
