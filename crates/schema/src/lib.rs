//! # Argus Port/Schema System
//!
//! Typed, validated definitions for a component's inputs, parameters and
//! outputs.
//!
//! Every component declares three [`PortSchema`]s at construction time —
//! inputs, parameters, outputs — each an ordered, key-unique set of
//! [`Port`]s. A port carries a [`ValueType`] and a derived
//! [`ConnectionKind`] the (external) graph layer uses for edge
//! compatibility checks.
//!
//! Validation is pure and wholesale: [`PortSchema::parse`] applies declared
//! defaults, coerces textual primitives only where a port opts in, and
//! collects **every** violation into one [`ValidationFailure`] instead of
//! failing on the first, so the caller can show all field errors at once.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

/// Port declarations (key, type, required/default/coercible flags).
pub mod port;
/// Port schemas: ordered port sets with wholesale validation.
pub mod schema;
/// Value types and graph-level connection kinds.
pub mod value;

pub use port::Port;
pub use schema::{FieldViolation, PortSchema, PortSchemaBuilder, ValidationFailure};
pub use value::{ConnectionKind, ValueType};

/// JSON object shorthand used for port value records.
pub type ValueMap = serde_json::Map<String, serde_json::Value>;
