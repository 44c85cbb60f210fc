use axum::Json;
use serde::Serialize;
use serde_json::{json, Value};
use tracing::warn;

use crate::error::{ReportError, ReportResult};

/// Per-route wording for the `error` field.
#[derive(Debug, Clone, Copy)]
pub struct ErrorContext {
    /// Prefix for fetch and parse failures.
    pub unexpected: &'static str,
    /// Prefix for a required header that is absent.
    pub missing_column: &'static str,
}

pub const MONTH_ERRORS: ErrorContext = ErrorContext {
    unexpected: "Error loading data",
    missing_column: "Google Sheet missing required column",
};

pub const ANNUAL_ERRORS: ErrorContext = ErrorContext {
    unexpected: "Error calculating annual spend",
    missing_column: "Missing column",
};

/// Message placed in the `error` field. A missing month is reported as-is;
/// everything else gets the route's prefix.
pub fn error_message(err: &ReportError, context: ErrorContext) -> String {
    match err {
        ReportError::MissingColumn(column) => format!("{}: {}", context.missing_column, column),
        ReportError::NotFound(_) => err.to_string(),
        _ => format!("{}: {}", context.unexpected, err),
    }
}

/// Turn a report result into the response body. Failures are still a
/// successful response; clients look for the `error` key.
pub fn write_json<T: Serialize>(result: ReportResult<T>, context: ErrorContext) -> Json<Value> {
    let body = match result {
        Ok(value) => match serde_json::to_value(&value) {
            Ok(v) => v,
            Err(e) => json!({ "error": format!("{}: {}", context.unexpected, e) }),
        },
        Err(err) => {
            let message = error_message(&err, context);
            warn!(error = %message, "request failed");
            json!({ "error": message })
        }
    };
    Json(body)
}
