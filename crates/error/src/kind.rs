use serde::{Deserialize, Serialize};
use std::fmt;

/// The closed set of failure classes.
///
/// Every failure surfaced by the runtime carries exactly one of these kinds.
/// The retry policy model keys its exclusion set on them, so the set is
/// deliberately small and is not extended per component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// Malformed or missing caller input. Never retried.
    Validation,
    /// Missing or invalid credentials / setup on our side. Never retried.
    Configuration,
    /// The upstream service rejected the presented credentials. Never retried.
    Authentication,
    /// The upstream tool or container backend failed. Retryable.
    Service,
    /// Transport failure reaching an upstream API. Retryable.
    Network,
    /// A deadline was exceeded. Retryable.
    Timeout,
}

impl ErrorKind {
    /// All kinds, in declaration order.
    pub const ALL: [Self; 6] = [
        Self::Validation,
        Self::Configuration,
        Self::Authentication,
        Self::Service,
        Self::Network,
        Self::Timeout,
    ];

    /// Whether errors of this kind are retryable by convention.
    ///
    /// Validation, configuration and authentication failures are
    /// deterministic — retrying an unchanged request cannot fix them.
    /// Service, network and timeout failures may be transient.
    ///
    /// A [`RetryPolicy`](https://docs.rs/argus-resilience) may exclude
    /// further kinds, but by convention never re-includes these three.
    pub fn is_retryable_by_convention(self) -> bool {
        match self {
            Self::Validation | Self::Configuration | Self::Authentication => false,
            Self::Service | Self::Network | Self::Timeout => true,
        }
    }

    /// Stable lowercase name, matching the serde representation.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Validation => "validation",
            Self::Configuration => "configuration",
            Self::Authentication => "authentication",
            Self::Service => "service",
            Self::Network => "network",
            Self::Timeout => "timeout",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
