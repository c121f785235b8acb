use std::collections::BTreeMap;
use std::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use argus_error::ClassifiedError;

use crate::ValueMap;
use crate::port::Port;

// ── ValidationFailure ───────────────────────────────────────────────────────

/// One violated constraint on one port.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldViolation {
    /// Key of the violating port.
    pub port: String,
    /// Human-readable description of the violation.
    pub message: String,
}

/// The full set of violations found while parsing a value record.
///
/// Parsing is wholesale: the record is rejected as a unit and every
/// violation is reported, never just the first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationFailure {
    violations: Vec<FieldViolation>,
}

impl std::error::Error for ValidationFailure {}

impl ValidationFailure {
    /// The individual violations, in schema declaration order.
    pub fn violations(&self) -> &[FieldViolation] {
        &self.violations
    }

    /// Number of violations.
    pub fn len(&self) -> usize {
        self.violations.len()
    }

    /// Always `false`: a failure carries at least one violation.
    pub fn is_empty(&self) -> bool {
        self.violations.is_empty()
    }

    /// Merge another failure's violations into this one.
    ///
    /// Used to combine input and parameter violations into a single
    /// wholesale rejection.
    pub fn merge(mut self, other: Self) -> Self {
        self.violations.extend(other.violations);
        self
    }
}

impl fmt::Display for ValidationFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} invalid field(s): ", self.violations.len())?;
        for (index, violation) in self.violations.iter().enumerate() {
            if index > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{}: {}", violation.port, violation.message)?;
        }
        Ok(())
    }
}

impl From<ValidationFailure> for ClassifiedError {
    fn from(failure: ValidationFailure) -> Self {
        let mut fields: BTreeMap<String, String> = BTreeMap::new();
        for violation in &failure.violations {
            fields
                .entry(violation.port.clone())
                .and_modify(|existing| {
                    existing.push_str("; ");
                    existing.push_str(&violation.message);
                })
                .or_insert_with(|| violation.message.clone());
        }
        Self::validation_with_fields(
            format!("{} invalid field(s)", failure.violations.len()),
            fields,
        )
    }
}

// ── PortSchema ──────────────────────────────────────────────────────────────

/// An ordered, key-unique set of ports with wholesale validation.
///
/// The same shape describes a component's inputs, parameters and outputs.
/// Built once through [`PortSchema::builder`] and never mutated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PortSchema {
    ports: IndexMap<String, Port>,
    #[serde(default)]
    open: bool,
}

impl PortSchema {
    /// Start building a schema.
    pub fn builder() -> PortSchemaBuilder {
        PortSchemaBuilder::default()
    }

    /// A schema with no ports (components without parameters).
    pub fn empty() -> Self {
        Self {
            ports: IndexMap::new(),
            open: false,
        }
    }

    /// Look up a port by key.
    pub fn get(&self, key: &str) -> Option<&Port> {
        self.ports.get(key)
    }

    /// Iterate over ports in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = &Port> {
        self.ports.values()
    }

    /// Iterate over port keys in declaration order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.ports.keys().map(String::as_str)
    }

    /// Number of declared ports.
    pub fn len(&self) -> usize {
        self.ports.len()
    }

    /// Whether the schema declares no ports.
    pub fn is_empty(&self) -> bool {
        self.ports.is_empty()
    }

    /// Whether undeclared keys are tolerated (dropped) instead of rejected.
    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Validate a candidate record against this schema.
    ///
    /// On success the returned record contains exactly the declared keys:
    /// defaults are applied for absent optional ports, textual primitives
    /// are coerced where the port opts in, and undeclared keys are dropped
    /// (open schema) or rejected (default). `null` counts as absent.
    ///
    /// On failure **all** violations are reported together; nothing is
    /// silently coerced or partially accepted.
    pub fn parse(&self, candidate: &ValueMap) -> Result<ValueMap, ValidationFailure> {
        let mut parsed = ValueMap::new();
        let mut violations = Vec::new();

        for (key, port) in &self.ports {
            match candidate.get(key) {
                None | Some(Value::Null) => {
                    if let Some(default) = port.default_value() {
                        parsed.insert(key.clone(), default.clone());
                    } else if port.is_required() {
                        violations.push(FieldViolation {
                            port: key.clone(),
                            message: "required value is missing".to_owned(),
                        });
                    }
                }
                Some(value) => {
                    let value = if port.is_coercible() {
                        port.value_type().coerce(value)
                    } else {
                        value.clone()
                    };
                    match port.value_type().check(&value) {
                        Ok(()) => {
                            parsed.insert(key.clone(), value);
                        }
                        Err(message) => violations.push(FieldViolation {
                            port: key.clone(),
                            message,
                        }),
                    }
                }
            }
        }

        if !self.open {
            for key in candidate.keys() {
                if !self.ports.contains_key(key) {
                    violations.push(FieldViolation {
                        port: key.clone(),
                        message: "unknown port".to_owned(),
                    });
                }
            }
        }

        if violations.is_empty() {
            Ok(parsed)
        } else {
            Err(ValidationFailure { violations })
        }
    }
}

// ── PortSchemaBuilder ───────────────────────────────────────────────────────

/// Builder for [`PortSchema`].
#[derive(Debug, Default)]
pub struct PortSchemaBuilder {
    ports: IndexMap<String, Port>,
    open: bool,
}

impl PortSchemaBuilder {
    /// Add a port declaration.
    ///
    /// # Panics
    ///
    /// Panics if a port with the same key was already added. A duplicate
    /// key is a defect in the component definition, caught at startup,
    /// never a runtime condition.
    pub fn port(mut self, port: Port) -> Self {
        let key = port.key().to_owned();
        assert!(
            self.ports.insert(key.clone(), port).is_none(),
            "duplicate port key `{key}` in schema definition"
        );
        self
    }

    /// Tolerate undeclared keys by dropping them instead of rejecting.
    pub fn open(mut self) -> Self {
        self.open = true;
        self
    }

    /// Finish the schema.
    pub fn build(self) -> PortSchema {
        PortSchema {
            ports: self.ports,
            open: self.open,
        }
    }
}
