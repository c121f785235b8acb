//! # Argus Error Taxonomy
//!
//! The closed set of failure classes every error must be sorted into before
//! it leaves the runtime, plus the shared classifier that maps HTTP
//! responses and transport failures onto that set.
//!
//! ## Core Types
//!
//! - [`ErrorKind`] — the six failure classes (validation, configuration,
//!   authentication, service, network, timeout)
//! - [`ClassifiedError`] — kind + message + optional structured details
//! - [`classify_status`] / [`classify_transport`] — the single shared
//!   HTTP-to-taxonomy mapping used by every HTTP-backed component
//!
//! Raw error shapes (`std::io::Error`, `serde_json::Error`,
//! `reqwest::Error`) never cross the runtime boundary: `From` conversions
//! wrap them into a classified error at the edge.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

/// Classified error type carrying kind, message and structured details.
pub mod classified;
/// Shared HTTP response / transport classifier.
pub mod http;
/// The closed set of failure classes.
pub mod kind;

pub use classified::{ClassifiedError, ErrorDetails};
pub use crate::http::{classify_status, classify_transport};
pub use kind::ErrorKind;
