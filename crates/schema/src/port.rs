use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::value::{ConnectionKind, ValueType};

/// A named, typed value slot on a component.
///
/// Ports are declared once at component construction time and never
/// mutated; the same shape describes inputs, parameters and outputs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Port {
    key: String,
    label: String,
    #[serde(default)]
    description: String,
    value_type: ValueType,
    #[serde(default)]
    required: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    default: Option<Value>,
    #[serde(default)]
    coercible: bool,
}

impl Port {
    /// Create a port with an explicit value type.
    ///
    /// Defaults: optional, no default value, no coercion.
    pub fn new(key: impl Into<String>, label: impl Into<String>, value_type: ValueType) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
            description: String::new(),
            value_type,
            required: false,
            default: None,
            coercible: false,
        }
    }

    /// Create a text port.
    pub fn text(key: impl Into<String>, label: impl Into<String>) -> Self {
        Self::new(key, label, ValueType::Text)
    }

    /// Create a number port.
    pub fn number(key: impl Into<String>, label: impl Into<String>) -> Self {
        Self::new(key, label, ValueType::Number)
    }

    /// Create a boolean port.
    pub fn boolean(key: impl Into<String>, label: impl Into<String>) -> Self {
        Self::new(key, label, ValueType::Boolean)
    }

    /// Create a port accepting arbitrary JSON.
    pub fn json(key: impl Into<String>, label: impl Into<String>) -> Self {
        Self::new(key, label, ValueType::Json)
    }

    /// Create a secret port (masked in UI and logs).
    pub fn secret(key: impl Into<String>, label: impl Into<String>) -> Self {
        Self::new(key, label, ValueType::Secret)
    }

    /// Create a list port with the given element type.
    pub fn list(key: impl Into<String>, label: impl Into<String>, element: ValueType) -> Self {
        Self::new(key, label, ValueType::list(element))
    }

    /// Mark the port as required.
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Attach a human-readable description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Declare a default applied when the caller omits the value.
    pub fn with_default(mut self, default: impl Into<Value>) -> Self {
        self.default = Some(default.into());
        self
    }

    /// Allow textual coercion ("150" → 150, "true" → true) for this port.
    ///
    /// Off by default; form-field-backed parameters opt in.
    pub fn coercible(mut self) -> Self {
        self.coercible = true;
        self
    }

    /// The unique key within the owning schema.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// The human-readable display name.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// The description shown in the editor.
    pub fn description(&self) -> &str {
        &self.description
    }

    /// The declared value type.
    pub fn value_type(&self) -> &ValueType {
        &self.value_type
    }

    /// Whether a value must be present (or defaulted) before execution.
    pub fn is_required(&self) -> bool {
        self.required
    }

    /// The declared default value, if any.
    pub fn default_value(&self) -> Option<&Value> {
        self.default.as_ref()
    }

    /// Whether textual coercion is enabled.
    pub fn is_coercible(&self) -> bool {
        self.coercible
    }

    /// Whether the port's values must be masked in UI and logs.
    pub fn is_sensitive(&self) -> bool {
        self.value_type.is_sensitive()
    }

    /// The graph-level connection class.
    pub fn connection_kind(&self) -> ConnectionKind {
        self.value_type.connection_kind()
    }
}
