use serde_json::{Value, json};
use thiserror::Error;

#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct CoreError {
    pub code: String,
    pub message: String,
    pub recovery_steps: Vec<String>,
    pub data: Option<Value>,
}

impl CoreError {
    pub fn new(code: &str, message: &str, recovery_steps: Vec<String>) -> Self {
        Self {
            code: code.to_string(),
            message: message.to_string(),
            recovery_steps,
            data: None,
        }
    }

    pub fn with_data(mut self, data: Value) -> Self {
        self.data = Some(data);
        self
    }

    pub fn invalid_argument(message: &str) -> Self {
        Self::new(
            "invalid_argument",
            message,
            vec!["Run `spendlens --help` for usage.".to_string()],
        )
    }

    pub fn invalid_argument_with_recovery(message: &str, recovery_steps: Vec<String>) -> Self {
        Self::new("invalid_argument", message, recovery_steps)
    }

    pub fn decode_failed(attempted: &[&str], last_cause: &str) -> Self {
        Self::new(
            "decode_failed",
            &format!(
                "Could not decode the file with any supported encoding ({}). Last error: {last_cause}",
                attempted.join(", ")
            ),
            vec![
                "Re-export the file as UTF-8 or EUC-KR encoded CSV.".to_string(),
                "Verify the file is delimited text, not a spreadsheet binary.".to_string(),
            ],
        )
        .with_data(json!({
            "attempted_encodings": attempted,
            "last_cause": last_cause,
        }))
    }

    pub fn missing_column(role: &str, requested: &str, columns: &[String], candidates: &[&str]) -> Self {
        Self::new(
            "missing_column",
            &format!("The {role} column `{requested}` does not exist in this file."),
            vec![
                format!("Pick one of the file's columns: {}.", columns.join(", ")),
                format!(
                    "Or drop the override; names containing {} resolve automatically.",
                    candidates.join(", ")
                ),
            ],
        )
        .with_data(json!({
            "role": role,
            "requested": requested,
            "columns": columns,
            "candidates": candidates,
        }))
    }

    pub fn empty_result(rows_read: i64, rows_dropped: i64) -> Self {
        Self::new(
            "empty_result",
            &format!(
                "The file decoded, but no rows survived date/amount conversion ({rows_dropped} of {rows_read} dropped)."
            ),
            vec![
                "Check the date/amount column choices with `spendlens preview <path>`.".to_string(),
                "If dates use a fixed layout, pass it via `--date-format` (e.g. %Y-%m-%d).".to_string(),
            ],
        )
        .with_data(json!({
            "rows_read": rows_read,
            "rows_dropped": rows_dropped,
        }))
    }

    pub fn invalid_rules(source: &str, detail: &str) -> Self {
        Self::new(
            "invalid_rules",
            &format!("Could not load category rules from `{source}`: {detail}"),
            vec![
                "Rules files are CSV with two columns per line: keyword,category.".to_string(),
                "Run `spendlens rules` to see the built-in rule set as a template.".to_string(),
            ],
        )
    }

    pub fn internal_serialization(message: &str) -> Self {
        Self::new("internal_serialization_error", message, Vec::new())
    }
}

pub type CoreResult<T> = Result<T, CoreError>;
