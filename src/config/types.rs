use std::path::PathBuf;

use serde::{
    Deserialize,
    Serialize,
};
use thiserror::Error;

use crate::locale::Locale;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Configuration error in '{field_path}': {message}")]
pub struct ValidationError {
    /// JSON path to the field (e.g., "includePatterns[0]")
    pub field_path: String,
    pub message: String,
}

impl ValidationError {
    #[must_use]
    pub fn new(field_path: impl Into<String>, message: impl Into<String>) -> Self {
        Self { field_path: field_path.into(), message: message.into() }
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration validation failed:\n{}", format_validation_errors(.0))]
    ValidationErrors(Vec<ValidationError>),

    #[error("Failed to load configuration file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Failed to parse configuration: {0}")]
    ParseError(#[from] serde_json::Error),
}

/// Renders one numbered line per validation error.
fn format_validation_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .enumerate()
        .map(|(i, err)| format!("  {}. {} - {}", i + 1, err.field_path, err.message))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Options accepted by both plugin adapters and the CLI.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NlsOptions {
    /// Translation language to substitute.
    pub locale: Locale,

    /// Directory containing `<locale>.json`. Defaults to the bundled resources.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub locale_dir: Option<PathBuf>,

    /// Files (relative to the package root) processed by the CLI.
    #[serde(default = "default_include_patterns")]
    pub include_patterns: Vec<String>,

    #[serde(default)]
    pub exclude_patterns: Vec<String>,
}

/// Every JavaScript file of the package.
fn default_include_patterns() -> Vec<String> {
    vec!["**/*.js".to_string()]
}

impl NlsOptions {
    #[must_use]
    pub fn new(locale: Locale) -> Self {
        Self {
            locale,
            locale_dir: None,
            include_patterns: default_include_patterns(),
            exclude_patterns: Vec::new(),
        }
    }

    /// Checks every field, collecting all problems instead of stopping at the first.
    pub fn validate(&self) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        if self.include_patterns.is_empty() {
            errors.push(ValidationError::new(
                "includePatterns",
                "At least one pattern is required. Example: [\"**/*.js\"]",
            ));
        }

        for (index, pattern) in self.include_patterns.iter().enumerate() {
            if let Err(e) = globset::Glob::new(pattern) {
                errors.push(ValidationError::new(
                    format!("includePatterns[{index}]"),
                    format!("Invalid glob pattern '{pattern}': {e}"),
                ));
            }
        }

        for (index, pattern) in self.exclude_patterns.iter().enumerate() {
            if let Err(e) = globset::Glob::new(pattern) {
                errors.push(ValidationError::new(
                    format!("excludePatterns[{index}]"),
                    format!("Invalid glob pattern '{pattern}': {e}"),
                ));
            }
        }

        if let Some(dir) = &self.locale_dir
            && dir.as_os_str().is_empty()
        {
            errors.push(ValidationError::new(
                "localeDir",
                "The directory cannot be empty. Remove this field to use the bundled translations",
            ));
        }

        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use googletest::prelude::*;
    use rstest::rstest;

    use super::*;

    #[rstest]
    fn deserialize_applies_defaults() {
        let options: NlsOptions = serde_json::from_str(r#"{"locale": "zh-hans"}"#).unwrap();

        assert_eq!(options, NlsOptions::new(Locale::ZhHans));
        assert!(options.validate().is_ok());
    }

    #[rstest]
    fn deserialize_camel_case_fields() {
        let options: NlsOptions = serde_json::from_str(
            r#"{
                "locale": "de",
                "localeDir": "translations",
                "includePatterns": ["esm/**/*.js"],
                "excludePatterns": ["**/*.test.js"]
            }"#,
        )
        .unwrap();

        assert_that!(options.locale, eq(Locale::De));
        assert_eq!(options.locale_dir, Some(PathBuf::from("translations")));
        assert_eq!(options.include_patterns, vec!["esm/**/*.js"]);
        assert_eq!(options.exclude_patterns, vec!["**/*.test.js"]);
    }

    #[rstest]
    fn deserialize_rejects_unknown_locale() {
        let result = serde_json::from_str::<NlsOptions>(r#"{"locale": "xx"}"#);
        assert!(result.is_err());
    }

    #[rstest]
    fn deserialize_requires_locale() {
        let result = serde_json::from_str::<NlsOptions>("{}");
        assert!(result.is_err());
    }

    #[rstest]
    fn validate_collects_every_error() {
        let options = NlsOptions {
            include_patterns: Vec::new(),
            exclude_patterns: vec!["[invalid".to_string(), "ok/**".to_string(), "{a".to_string()],
            locale_dir: Some(PathBuf::new()),
            ..NlsOptions::new(Locale::Fr)
        };

        let errors = options.validate().unwrap_err();

        let fields: Vec<_> = errors.iter().map(|e| e.field_path.as_str()).collect();
        assert_eq!(
            fields,
            vec!["includePatterns", "excludePatterns[0]", "excludePatterns[2]", "localeDir"]
        );
    }

    #[rstest]
    fn validate_rejects_invalid_include_pattern() {
        let options = NlsOptions {
            include_patterns: vec!["**/*.{js".to_string()],
            ..NlsOptions::new(Locale::Fr)
        };

        let errors = options.validate().unwrap_err();

        assert_that!(errors.len(), eq(1));
        assert_that!(errors[0].field_path, eq("includePatterns[0]"));
        assert_that!(errors[0].message, contains_substring("Invalid glob pattern"));
    }

    #[rstest]
    fn validation_errors_are_numbered() {
        let err = ConfigError::ValidationErrors(vec![
            ValidationError::new("a", "first"),
            ValidationError::new("b", "second"),
        ]);

        assert_that!(
            err.to_string(),
            eq("Configuration validation failed:\n  1. a - first\n  2. b - second")
        );
    }
}
