//! Shared HTTP-to-taxonomy classifier.
//!
//! Every HTTP-backed inline component maps upstream responses through this
//! one table so that identical upstream behavior produces identical error
//! kinds across components.
//!
//! The mapping deliberately does **not** standardize 404: some upstream
//! APIs use it to mean "no reputation data for this indicator" (a valid
//! zero result), others to mean "you asked for something that does not
//! exist" (a caller mistake). A component that documents 404-as-success
//! must check the status itself before delegating here; by default a bare
//! 404 classifies as a validation failure like any other 4xx.

use http::StatusCode;

use crate::classified::ClassifiedError;

/// Classify a non-success HTTP status code from an upstream API.
///
/// `context` names the upstream operation for the message (e.g.
/// `"virustotal ip lookup"`).
///
/// | Status        | Kind            |
/// |---------------|-----------------|
/// | 401, 403      | authentication  |
/// | 408           | timeout         |
/// | 429           | service         |
/// | other 4xx     | validation      |
/// | 5xx           | service         |
/// | anything else | service         |
pub fn classify_status(status: StatusCode, context: &str) -> ClassifiedError {
    let code = status.as_u16();
    let err = match code {
        401 | 403 => {
            ClassifiedError::authentication(format!("{context}: upstream rejected credentials"))
        }
        408 => ClassifiedError::timeout(format!("{context}: upstream timed out")),
        429 => ClassifiedError::service(format!("{context}: upstream rate limit exceeded")),
        400..=499 => {
            ClassifiedError::validation(format!("{context}: upstream rejected request ({code})"))
        }
        _ => ClassifiedError::service(format!("{context}: upstream failed ({code})")),
    };
    err.with_status(code)
}

/// Classify a transport-level `reqwest` failure.
///
/// Timeouts map to the timeout kind; connection and request dispatch
/// failures map to the network kind; everything else (body/decode
/// failures, redirect loops) is a service failure.
pub fn classify_transport(err: &reqwest::Error) -> ClassifiedError {
    if err.is_timeout() {
        ClassifiedError::timeout(format!("http request timed out: {err}"))
    } else if err.is_connect() || err.is_request() {
        ClassifiedError::network(format!("http transport failure: {err}"))
    } else {
        ClassifiedError::service(format!("http failure: {err}"))
    }
}
