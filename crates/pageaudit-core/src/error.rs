//! Structured error types for the audit API.
//!
//! These convert to JSON so callers that embed the engine can report a
//! failure in the same shape as a result.

use std::fmt;

use pageaudit_probe::FetchError;
use pageaudit_settings::SettingsError;
use serde::{Deserialize, Serialize};

/// Error codes for audit operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    /// Neither HTML nor a URL was supplied, or the HTML was empty.
    InvalidInput,
    /// The URL could not be parsed or uses an unsupported scheme.
    InvalidUrl,
    /// The page was reached but could not be used (HTTP error, body error).
    FetchFailed,
    /// More redirects than `max_redirects`.
    RedirectLimit,
    /// DNS, connect or TLS failure.
    Unreachable,
    /// The response was an anti-automation challenge page.
    Blocked,
    /// The page fetch exceeded `fetch_timeout_ms`.
    Timeout,
    /// Settings failed to load or validate.
    InvalidSettings,
    /// Internal error (unexpected state).
    Internal,
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ErrorCode::InvalidInput => "invalid_input",
            ErrorCode::InvalidUrl => "invalid_url",
            ErrorCode::FetchFailed => "fetch_failed",
            ErrorCode::RedirectLimit => "redirect_limit",
            ErrorCode::Unreachable => "unreachable",
            ErrorCode::Blocked => "blocked",
            ErrorCode::Timeout => "timeout",
            ErrorCode::InvalidSettings => "invalid_settings",
            ErrorCode::Internal => "internal",
        };
        f.write_str(s)
    }
}

/// Structured audit failure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditError {
    pub code: ErrorCode,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl AuditError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            details: None,
        }
    }

    pub fn with_details(
        code: ErrorCode,
        message: impl Into<String>,
        details: impl Into<String>,
    ) -> Self {
        Self {
            code,
            message: message.into(),
            details: Some(details.into()),
        }
    }

    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidInput, message)
    }

    pub fn internal(err: impl fmt::Display) -> Self {
        Self::new(ErrorCode::Internal, format!("Internal error: {err}"))
    }

    /// Convert to JSON string.
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| {
            format!(
                r#"{{"code":"{}","message":"{}"}}"#,
                self.code,
                self.message.replace('"', "'")
            )
        })
    }
}

impl fmt::Display for AuditError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.details {
            Some(details) => write!(f, "[{}] {}: {}", self.code, self.message, details),
            None => write!(f, "[{}] {}", self.code, self.message),
        }
    }
}

impl std::error::Error for AuditError {}

impl From<FetchError> for AuditError {
    fn from(err: FetchError) -> Self {
        let code = match &err {
            FetchError::InvalidUrl { .. } | FetchError::UnsupportedScheme { .. } => {
                ErrorCode::InvalidUrl
            }
            FetchError::Timeout { .. } => ErrorCode::Timeout,
            FetchError::RedirectLimit { .. } => ErrorCode::RedirectLimit,
            FetchError::Unreachable { .. } => ErrorCode::Unreachable,
            FetchError::Blocked { .. } => ErrorCode::Blocked,
            FetchError::HttpStatus { .. } | FetchError::Body { .. } | FetchError::Client(_) => {
                ErrorCode::FetchFailed
            }
        };
        Self::new(code, err.to_string())
    }
}

impl From<SettingsError> for AuditError {
    fn from(err: SettingsError) -> Self {
        Self::new(ErrorCode::InvalidSettings, err.to_string())
    }
}
