use serde::{Deserialize, Serialize};

use argus_core::ComponentKey;

/// Static metadata describing a component type.
///
/// Used by the engine for catalogue listings and by the editor for node
/// rendering. Immutable once the component is registered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComponentMetadata {
    /// Globally unique registry key (e.g. `"dns.resolve"`).
    pub key: ComponentKey,
    /// Human-readable display name (e.g. `"DNS Resolver"`).
    pub name: String,
    /// Short description of what this component does.
    pub description: String,
    /// Category for UI grouping (e.g. `"recon"`, `"vulnerability"`,
    /// `"intel"`).
    pub category: String,
}

impl ComponentMetadata {
    /// Create metadata with the minimum required fields.
    pub fn new(
        key: impl Into<ComponentKey>,
        name: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            key: key.into(),
            name: name.into(),
            description: description.into(),
            category: String::new(),
        }
    }

    /// Set the UI category for this component.
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }
}
