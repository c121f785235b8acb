use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

// ── ConnectionKind ──────────────────────────────────────────────────────────

/// Semantic connection class used by the graph layer for edge compatibility.
///
/// The workflow editor only needs to know whether two ports can be wired
/// together, not the full value type, so every [`ValueType`] collapses to
/// one of these four classes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConnectionKind {
    /// Scalar value (text, number, boolean).
    Primitive,
    /// Homogeneous list of values.
    List,
    /// Arbitrary structured JSON.
    Json,
    /// Sensitive value, masked in UI and logs.
    Secret,
}

// ── ValueType ───────────────────────────────────────────────────────────────

/// The value type of a port.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValueType {
    /// UTF-8 text.
    Text,
    /// JSON number (integer or float).
    Number,
    /// Boolean flag.
    Boolean,
    /// Arbitrary structured JSON; accepts any value.
    Json,
    /// Sensitive text (credential, API key); masked in UI and logs.
    Secret,
    /// Homogeneous list whose elements are of the inner type.
    List(Box<ValueType>),
}

impl ValueType {
    /// Create a list type with the given element type.
    pub fn list(inner: ValueType) -> Self {
        Self::List(Box::new(inner))
    }

    /// The graph-level connection class for this type.
    pub fn connection_kind(&self) -> ConnectionKind {
        match self {
            Self::Text | Self::Number | Self::Boolean => ConnectionKind::Primitive,
            Self::Json => ConnectionKind::Json,
            Self::Secret => ConnectionKind::Secret,
            Self::List(_) => ConnectionKind::List,
        }
    }

    /// Whether values of this type must be masked in UI and logs.
    pub fn is_sensitive(&self) -> bool {
        match self {
            Self::Secret => true,
            Self::List(inner) => inner.is_sensitive(),
            _ => false,
        }
    }

    /// Check a candidate value against this type.
    ///
    /// Returns a human-readable mismatch description on failure; the caller
    /// attaches the port key.
    pub fn check(&self, value: &Value) -> Result<(), String> {
        match (self, value) {
            (Self::Text | Self::Secret, Value::String(_)) => Ok(()),
            (Self::Number, Value::Number(_)) => Ok(()),
            (Self::Boolean, Value::Bool(_)) => Ok(()),
            (Self::Json, _) => Ok(()),
            (Self::List(inner), Value::Array(items)) => {
                for (index, item) in items.iter().enumerate() {
                    inner
                        .check(item)
                        .map_err(|msg| format!("element {index}: {msg}"))?;
                }
                Ok(())
            }
            _ => Err(format!(
                "expected {self}, got {}",
                describe_value(value)
            )),
        }
    }

    /// Coerce a textual representation into this type, where supported.
    ///
    /// Only numbers and booleans have a textual form (to support form-field
    /// string inputs); lists coerce element-wise. Values that don't match a
    /// supported coercion are returned unchanged, so a follow-up
    /// [`check`](Self::check) reports the original mismatch.
    pub fn coerce(&self, value: &Value) -> Value {
        match (self, value) {
            (Self::Number, Value::String(text)) => {
                if let Ok(int) = text.trim().parse::<i64>() {
                    Value::from(int)
                } else if let Ok(float) = text.trim().parse::<f64>() {
                    serde_json::Number::from_f64(float).map_or_else(|| value.clone(), Value::Number)
                } else {
                    value.clone()
                }
            }
            (Self::Boolean, Value::String(text)) => match text.trim() {
                "true" => Value::Bool(true),
                "false" => Value::Bool(false),
                _ => value.clone(),
            },
            (Self::List(inner), Value::Array(items)) => {
                Value::Array(items.iter().map(|item| inner.coerce(item)).collect())
            }
            _ => value.clone(),
        }
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text => f.write_str("text"),
            Self::Number => f.write_str("number"),
            Self::Boolean => f.write_str("boolean"),
            Self::Json => f.write_str("json"),
            Self::Secret => f.write_str("secret"),
            Self::List(inner) => write!(f, "list<{inner}>"),
        }
    }
}

/// Short description of a JSON value's shape for mismatch messages.
fn describe_value(value: &Value) -> String {
    match value {
        Value::Null => "null".to_owned(),
        Value::Bool(b) => format!("boolean {b}"),
        Value::Number(n) => format!("number {n}"),
        Value::String(s) => format!("string {s:?}"),
        Value::Array(items) => format!("array of {} elements", items.len()),
        Value::Object(_) => "object".to_owned(),
    }
}
