use std::collections::HashMap;
use std::sync::Arc;

use argus_core::ComponentKey;

use crate::component::Component;
use crate::metadata::ComponentMetadata;

/// Process-wide catalogue mapping component keys to implementations.
///
/// Built once at startup through explicit [`register`](Self::register)
/// calls, then shared immutably (typically behind an `Arc`) and read
/// concurrently for the rest of the process's life. There is no
/// unregistration.
///
/// # Example
///
/// ```rust,ignore
/// let mut registry = ComponentRegistry::new();
/// registry.register(Arc::new(DnsResolve::new()));
/// registry.register(Arc::new(HttpProbe::new()));
/// let registry = Arc::new(registry); // frozen: reads only from here on
///
/// let component = registry.get("dns.resolve").expect("registered");
/// ```
#[derive(Default)]
pub struct ComponentRegistry {
    components: HashMap<ComponentKey, Arc<dyn Component>>,
}

impl ComponentRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a component.
    ///
    /// # Panics
    ///
    /// Panics if a component with the same key is already registered.
    /// A duplicate key is a build-time defect — two wrappers claiming one
    /// identity — and silently overwriting would route workflows to the
    /// wrong implementation, so startup aborts instead.
    pub fn register(&mut self, component: Arc<dyn Component>) {
        let key = component.metadata().key.clone();
        match self.components.entry(key) {
            std::collections::hash_map::Entry::Occupied(entry) => {
                panic!("component `{}` registered twice", entry.key());
            }
            std::collections::hash_map::Entry::Vacant(entry) => {
                entry.insert(component);
            }
        }
    }

    /// Look up a component by key.
    pub fn get(&self, key: &str) -> Option<&Arc<dyn Component>> {
        self.components.get(key)
    }

    /// Check whether a component with the given key is registered.
    pub fn contains(&self, key: &str) -> bool {
        self.components.contains_key(key)
    }

    /// Return metadata for all registered components.
    pub fn list(&self) -> Vec<&ComponentMetadata> {
        self.components.values().map(|c| c.metadata()).collect()
    }

    /// Iterate over all registered keys.
    pub fn keys(&self) -> impl Iterator<Item = &ComponentKey> {
        self.components.keys()
    }

    /// Iterate over all registered `(key, component)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&ComponentKey, &Arc<dyn Component>)> {
        self.components.iter()
    }

    /// Number of registered components.
    pub fn len(&self) -> usize {
        self.components.len()
    }

    /// Returns `true` if no components are registered.
    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }
}

impl std::fmt::Debug for ComponentRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ComponentRegistry")
            .field("count", &self.components.len())
            .field("keys", &self.components.keys().collect::<Vec<_>>())
            .finish()
    }
}
