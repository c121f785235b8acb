use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::kind::ErrorKind;

/// Structured detail payload attached to a [`ClassifiedError`].
///
/// The shape is tied to the kind by convention: field messages for
/// validation failures, the offending configuration key for configuration
/// failures, the HTTP status for service/network/authentication failures,
/// and the process exit code for failed tool runs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ErrorDetails {
    /// Per-field violation messages, keyed by port identifier.
    Fields {
        /// Field identifier → human-readable violation message.
        fields: BTreeMap<String, String>,
    },
    /// The configuration key that was missing or invalid.
    ConfigKey {
        /// Configuration key name (e.g. a credential identifier).
        key: String,
    },
    /// The HTTP status code returned by an upstream API.
    HttpStatus {
        /// Numeric status code.
        status: u16,
    },
    /// The exit code of a failed tool process.
    ExitCode {
        /// Process exit code.
        code: i32,
    },
}

/// An error tagged with exactly one taxonomy kind.
///
/// This is the only error shape that crosses the runtime boundary. Execute
/// functions classify every failure before returning; raw transport or IO
/// errors are wrapped via the `From` impls below so implementation detail
/// never leaks to the caller.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error, Serialize, Deserialize)]
#[error("{kind}: {message}")]
pub struct ClassifiedError {
    kind: ErrorKind,
    message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    details: Option<ErrorDetails>,
}

impl ClassifiedError {
    /// Create an error with an explicit kind and no details.
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            details: None,
        }
    }

    /// Malformed or missing caller input.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Validation, message)
    }

    /// Validation failure carrying per-field messages.
    pub fn validation_with_fields(
        message: impl Into<String>,
        fields: BTreeMap<String, String>,
    ) -> Self {
        Self::validation(message).with_details(ErrorDetails::Fields { fields })
    }

    /// Missing or invalid setup, referencing the offending key.
    pub fn configuration(message: impl Into<String>, key: impl Into<String>) -> Self {
        Self::new(ErrorKind::Configuration, message)
            .with_details(ErrorDetails::ConfigKey { key: key.into() })
    }

    /// Upstream rejected the presented credentials.
    pub fn authentication(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Authentication, message)
    }

    /// Upstream tool or container backend failed.
    pub fn service(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Service, message)
    }

    /// Transport failure reaching an upstream API.
    pub fn network(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Network, message)
    }

    /// A deadline was exceeded.
    pub fn timeout(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Timeout, message)
    }

    /// The invocation was cancelled by the caller.
    ///
    /// The taxonomy is closed, so cancellation rides on the timeout kind
    /// with a distinct message; the cancelling engine can tell the two
    /// apart because it initiated the cancel itself.
    pub fn cancelled() -> Self {
        Self::timeout("execution cancelled")
    }

    /// Attach a structured detail payload.
    pub fn with_details(mut self, details: ErrorDetails) -> Self {
        self.details = Some(details);
        self
    }

    /// Attach an upstream HTTP status code.
    pub fn with_status(self, status: u16) -> Self {
        self.with_details(ErrorDetails::HttpStatus { status })
    }

    /// Attach a tool process exit code.
    pub fn with_exit_code(self, code: i32) -> Self {
        self.with_details(ErrorDetails::ExitCode { code })
    }

    /// The taxonomy kind.
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// The human-readable message.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// The structured details, if any.
    pub fn details(&self) -> Option<&ErrorDetails> {
        self.details.as_ref()
    }

    /// Whether this error is retryable by the kind's convention.
    pub fn is_retryable_by_convention(&self) -> bool {
        self.kind.is_retryable_by_convention()
    }

    /// The per-field messages, if this is a field-detailed validation error.
    pub fn field_errors(&self) -> Option<&BTreeMap<String, String>> {
        match &self.details {
            Some(ErrorDetails::Fields { fields }) => Some(fields),
            _ => None,
        }
    }
}

impl From<std::io::Error> for ClassifiedError {
    fn from(err: std::io::Error) -> Self {
        match err.kind() {
            std::io::ErrorKind::TimedOut => Self::timeout(err.to_string()),
            _ => Self::service(format!("io failure: {err}")),
        }
    }
}

impl From<serde_json::Error> for ClassifiedError {
    fn from(err: serde_json::Error) -> Self {
        Self::service(format!("malformed json: {err}"))
    }
}

impl From<reqwest::Error> for ClassifiedError {
    fn from(err: reqwest::Error) -> Self {
        crate::http::classify_transport(&err)
    }
}
